use tracing::{debug, info};

use crate::converter::{Context, ConverterPlugin, PluginDescriptor};
use crate::graph::linearize;
use crate::resolution::{build_back_edges, resolve_declaration, PendingSet};
use crate::types::DeclarationId;

/// Resolves type references and builds class/interface hierarchies.
///
/// During the per-declaration signal every reference owned by the declaration
/// is linked and, for classes and interfaces, inverse edges are appended to
/// the declarations they implement or extend. Hierarchies are only built on
/// the completion signal, once every inverse edge is known.
#[derive(Debug, Default)]
pub struct TypePlugin {
    pending: PendingSet,
}

impl TypePlugin {
    pub const NAME: &'static str = "type";

    pub const DESCRIPTOR: PluginDescriptor = PluginDescriptor {
        name: Self::NAME,
        create,
    };

    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations queued for linearization so far.
    pub fn pending(&self) -> &PendingSet {
        &self.pending
    }
}

fn create() -> Box<dyn ConverterPlugin> {
    Box::new(TypePlugin::new())
}

impl ConverterPlugin for TypePlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn on_resolve(&mut self, context: &mut Context<'_>, declaration: DeclarationId) {
        resolve_declaration(context.project, declaration);
        build_back_edges(context.project, declaration, &mut self.pending);
        debug!(declaration = %declaration, "references resolved");
    }

    fn on_resolve_end(&mut self, context: &mut Context<'_>) {
        let pending = self.pending.take();
        let built = linearize(context.project, &pending);
        info!(hierarchies = built, "hierarchies built");
    }
}
