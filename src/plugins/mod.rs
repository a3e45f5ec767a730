/// Built-in converter plugins.
mod type_plugin;

pub use type_plugin::TypePlugin;
