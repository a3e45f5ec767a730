/// Reference resolution module.
///
/// Links symbolic type references to project declarations and derives the
/// implemented-by / extended-by inverse edges.
mod back_edges;
mod resolver;

pub use back_edges::{build_back_edges, PendingSet};
pub use resolver::{resolve_declaration, ReferenceResolver};
