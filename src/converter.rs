use std::collections::HashSet;
use std::time::Instant;

use indexmap::IndexMap;
use tracing::info;

use crate::config::ConverterConfig;
use crate::errors::{DocLinkError, Result};
use crate::plugins::TypePlugin;
use crate::project::Project;
use crate::types::DeclarationId;

/// State shared with plugins while the resolve phase runs.
pub struct Context<'a> {
    pub project: &'a mut Project,
}

impl<'a> Context<'a> {
    pub fn new(project: &'a mut Project) -> Self {
        Self { project }
    }
}

/// A converter stage reacting to the resolve phase signals.
pub trait ConverterPlugin {
    /// Name the plugin is registered under.
    fn name(&self) -> &'static str;

    /// Called exactly once per declaration, in unspecified order.
    fn on_resolve(&mut self, context: &mut Context<'_>, declaration: DeclarationId);

    /// Called once after every declaration has been resolved.
    fn on_resolve_end(&mut self, context: &mut Context<'_>);
}

/// Registration record for a plugin: its name and a constructor.
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub create: fn() -> Box<dyn ConverterPlugin>,
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// Named plugin descriptors, in registration order.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    descriptors: IndexMap<&'static str, PluginDescriptor>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in plugins.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.descriptors.insert(TypePlugin::NAME, TypePlugin::DESCRIPTOR);
        registry
    }

    pub fn register(&mut self, descriptor: PluginDescriptor) -> Result<()> {
        if self.descriptors.contains_key(descriptor.name) {
            return Err(DocLinkError::Plugin {
                name: descriptor.name.to_string(),
                message: "a plugin with this name is already registered".to_string(),
            });
        }
        self.descriptors.insert(descriptor.name, descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.descriptors.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.keys().copied()
    }
}

/// Outcome of one resolve phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Number of per-declaration signals delivered.
    pub declarations: usize,
    /// Names of the plugins that received them.
    pub plugins: Vec<&'static str>,
}

/// Drives the resolve phase over a project for a set of plugins.
pub struct Converter {
    plugins: Vec<Box<dyn ConverterPlugin>>,
}

impl Converter {
    pub fn new(plugins: Vec<Box<dyn ConverterPlugin>>) -> Self {
        Self { plugins }
    }

    /// Instantiates the plugins named by `config`, in the configured order.
    ///
    /// Each name may appear once; a repeated plugin would record every
    /// back-edge twice.
    pub fn from_config(registry: &PluginRegistry, config: &ConverterConfig) -> Result<Self> {
        let mut seen = HashSet::with_capacity(config.plugins.len());
        if let Some(name) = config.plugins.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(DocLinkError::Plugin {
                name: name.clone(),
                message: "plugin listed more than once in config".to_string(),
            });
        }

        let plugins = config
            .plugins
            .iter()
            .map(|name| {
                registry
                    .get(name)
                    .map(|descriptor| (descriptor.create)())
                    .ok_or_else(|| DocLinkError::Plugin {
                        name: name.clone(),
                        message: "no plugin registered under this name".to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(plugins))
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Runs the resolve phase, visiting declarations in arena order.
    pub fn resolve(&mut self, project: &mut Project) -> Result<ResolveSummary> {
        let order: Vec<DeclarationId> = project.ids().collect();
        self.resolve_in_order(project, &order)
    }

    /// Runs the resolve phase, visiting declarations in `order`.
    ///
    /// `order` must name every declaration of the project exactly once;
    /// otherwise no signal is delivered.
    pub fn resolve_in_order(
        &mut self,
        project: &mut Project,
        order: &[DeclarationId],
    ) -> Result<ResolveSummary> {
        check_order(project, order)?;
        let start = Instant::now();

        let mut context = Context::new(project);
        for &id in order {
            for plugin in &mut self.plugins {
                plugin.on_resolve(&mut context, id);
            }
        }
        for plugin in &mut self.plugins {
            plugin.on_resolve_end(&mut context);
        }

        let summary = ResolveSummary {
            declarations: order.len(),
            plugins: self.plugin_names(),
        };
        info!(
            declarations = summary.declarations,
            plugins = ?summary.plugins,
            duration_ms = start.elapsed().as_millis() as u64,
            "resolve phase complete"
        );
        Ok(summary)
    }
}

fn check_order(project: &Project, order: &[DeclarationId]) -> Result<()> {
    if order.len() != project.len() {
        return Err(DocLinkError::Model {
            message: format!(
                "resolve order names {} declarations, project has {}",
                order.len(),
                project.len()
            ),
        });
    }
    let mut seen = HashSet::with_capacity(order.len());
    for &id in order {
        if project.get(id).is_none() {
            return Err(DocLinkError::Model {
                message: format!("resolve order names unknown declaration {}", id),
            });
        }
        if !seen.insert(id) {
            return Err(DocLinkError::Model {
                message: format!("resolve order names declaration {} twice", id),
            });
        }
    }
    Ok(())
}
