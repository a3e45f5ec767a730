/// Inheritance hierarchy linearization and display.
pub mod hierarchy;

pub use hierarchy::{build_hierarchy, format_hierarchy, linearize, sort_implemented_by};
