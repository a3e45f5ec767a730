use tracing::trace;

use crate::project::Project;
use crate::types::*;

/// Links symbolic references inside type nodes to project declarations.
///
/// A resolver is bound to the declaration whose types it walks; by-name
/// lookups start from that declaration's lexical scope.
pub struct ReferenceResolver<'a> {
    project: &'a Project,
    scope: DeclarationId,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(project: &'a Project, scope: DeclarationId) -> Self {
        Self { project, scope }
    }

    /// Resolves `node` in place, recursing into composite shapes.
    ///
    /// Targets that cannot be found leave the reference unresolved.
    pub fn resolve(&self, node: &mut TypeNode) {
        match node {
            TypeNode::Reference(reference) => self.resolve_reference(reference),
            TypeNode::Tuple { elements } => self.resolve_all(elements),
            TypeNode::Union { types } => self.resolve_all(types),
            TypeNode::Other { .. } => {}
        }
    }

    pub fn resolve_all(&self, nodes: &mut [TypeNode]) {
        for node in nodes {
            self.resolve(node);
        }
    }

    pub fn resolve_optional(&self, node: &mut Option<TypeNode>) {
        if let Some(node) = node {
            self.resolve(node);
        }
    }

    fn resolve_reference(&self, reference: &mut ReferenceType) {
        let found = match reference.target {
            ReferenceTarget::ByName => self.project.find_by_name(self.scope, &reference.name),
            ReferenceTarget::Symbol(symbol) => self.project.find_by_symbol(symbol),
            ReferenceTarget::Resolved(_) => None,
        };

        match found {
            Some(id) => reference.target = ReferenceTarget::Resolved(id),
            None if !reference.is_resolved() => {
                trace!(name = %reference.name, scope = %self.scope, "dangling reference");
            }
            None => {}
        }

        self.resolve_all(&mut reference.type_arguments);
    }
}

/// The type-bearing fields of a declaration, detached from the project so
/// they can be rewritten while the project is borrowed for lookups.
#[derive(Debug, Default)]
struct DeclarationTypes {
    ty: Option<TypeNode>,
    inherited_from: Option<TypeNode>,
    overwrites: Option<TypeNode>,
    extended_types: Vec<TypeNode>,
    extended_by: Vec<TypeNode>,
    implemented_types: Vec<TypeNode>,
    decorators: Vec<Decorator>,
}

impl DeclarationTypes {
    fn take(decl: &mut Declaration) -> Self {
        Self {
            ty: decl.ty.take(),
            inherited_from: decl.inherited_from.take(),
            overwrites: decl.overwrites.take(),
            extended_types: std::mem::take(&mut decl.extended_types),
            extended_by: std::mem::take(&mut decl.extended_by),
            implemented_types: std::mem::take(&mut decl.implemented_types),
            decorators: std::mem::take(&mut decl.decorators),
        }
    }

    fn restore(self, decl: &mut Declaration) {
        decl.ty = self.ty;
        decl.inherited_from = self.inherited_from;
        decl.overwrites = self.overwrites;
        decl.extended_types = self.extended_types;
        decl.extended_by = self.extended_by;
        decl.implemented_types = self.implemented_types;
        decl.decorators = self.decorators;
    }
}

/// Resolves every type reference owned by one declaration.
///
/// Covers the declaration's own type, `inherited_from`, `overwrites`, the
/// extended/extended-by/implemented lists and each decorator's type.
/// Unknown ids are ignored.
pub fn resolve_declaration(project: &mut Project, id: DeclarationId) {
    let Some(decl) = project.get_mut(id) else {
        return;
    };
    let mut types = DeclarationTypes::take(decl);

    let resolver = ReferenceResolver::new(project, id);
    resolver.resolve_optional(&mut types.ty);
    resolver.resolve_optional(&mut types.inherited_from);
    resolver.resolve_optional(&mut types.overwrites);
    resolver.resolve_all(&mut types.extended_types);
    resolver.resolve_all(&mut types.extended_by);
    resolver.resolve_all(&mut types.implemented_types);
    for decorator in &mut types.decorators {
        resolver.resolve_optional(&mut decorator.ty);
    }

    if let Some(decl) = project.get_mut(id) {
        types.restore(decl);
    }
}
