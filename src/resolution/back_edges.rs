use indexmap::IndexSet;
use tracing::debug;

use crate::project::Project;
use crate::types::*;

/// Declarations awaiting hierarchy linearization, in first-enqueue order.
#[derive(Debug, Clone, Default)]
pub struct PendingSet {
    ids: IndexSet<DeclarationId>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` unless already queued. Returns whether it was newly added.
    pub fn enqueue(&mut self, id: DeclarationId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: DeclarationId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DeclarationId> + '_ {
        self.ids.iter().copied()
    }

    /// Empties the set, returning its members in enqueue order.
    pub fn take(&mut self) -> Vec<DeclarationId> {
        std::mem::take(&mut self.ids).into_iter().collect()
    }
}

/// Which inverse list a forward relation feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Implements,
    Extends,
}

/// Records the inverse edges of one class or interface declaration.
///
/// The subject and every declaration it implements or extends are queued for
/// linearization; each target receives a resolved reference back to the
/// subject. Nothing is deduplicated, so this must run once per declaration.
/// Other kinds are left untouched.
pub fn build_back_edges(project: &mut Project, subject: DeclarationId, pending: &mut PendingSet) {
    let Some(decl) = project.get(subject) else {
        return;
    };
    if !decl.is_class_or_interface() {
        return;
    }

    let back_reference = decl.self_reference();
    let implemented = resolved_targets(project, &decl.implemented_types);
    let extended = resolved_targets(project, &decl.extended_types);

    pending.enqueue(subject);
    append(project, pending, &implemented, &back_reference, Relation::Implements);
    append(project, pending, &extended, &back_reference, Relation::Extends);
}

/// Targets of the resolved references in `types` that exist in the project.
fn resolved_targets(project: &Project, types: &[TypeNode]) -> Vec<DeclarationId> {
    types
        .iter()
        .filter_map(TypeNode::target_id)
        .filter(|id| project.get(*id).is_some())
        .collect()
}

fn append(
    project: &mut Project,
    pending: &mut PendingSet,
    targets: &[DeclarationId],
    back_reference: &TypeNode,
    relation: Relation,
) {
    for &target in targets {
        let Some(decl) = project.get_mut(target) else {
            continue;
        };
        pending.enqueue(target);
        debug!(
            target = %decl.name,
            source = ?back_reference.name(),
            relation = ?relation,
            "appending back-edge"
        );
        match relation {
            Relation::Implements => decl.implemented_by.push(back_reference.clone()),
            Relation::Extends => decl.extended_by.push(back_reference.clone()),
        }
    }
}
