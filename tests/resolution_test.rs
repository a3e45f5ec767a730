use doclink::project::Project;
use doclink::resolution::{resolve_declaration, ReferenceResolver};
use doclink::types::*;

/// Sets up a project with three top-level classes `A`, `B`, `C` (symbols
/// 100, 101, 102) and a namespace `ns` holding a class `Inner`.
fn setup_project() -> (Project, Vec<DeclarationId>) {
    let mut project = Project::new("resolution");
    let a = project.add_declaration("A", ReflectionKind::Class, None);
    let b = project.add_declaration("B", ReflectionKind::Class, None);
    let c = project.add_declaration("C", ReflectionKind::Class, None);
    let ns = project.add_declaration("ns", ReflectionKind::Namespace, None);
    let inner = project.add_declaration("Inner", ReflectionKind::Class, Some(ns));
    project.register_symbol(SymbolId(100), a);
    project.register_symbol(SymbolId(101), b);
    project.register_symbol(SymbolId(102), c);
    (project, vec![a, b, c, ns, inner])
}

#[test]
fn test_resolve_by_name() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[0]);

    let mut node = TypeNode::reference("B");
    resolver.resolve(&mut node);
    assert_eq!(node, TypeNode::resolved("B", ids[1]));
}

#[test]
fn test_resolve_by_name_from_nested_scope() {
    let (project, ids) = setup_project();
    let inner = ids[4];

    let mut sibling = TypeNode::reference("Inner");
    ReferenceResolver::new(&project, inner).resolve(&mut sibling);
    assert_eq!(sibling.target_id(), Some(inner));

    let mut outer = TypeNode::reference("C");
    ReferenceResolver::new(&project, inner).resolve(&mut outer);
    assert_eq!(outer.target_id(), Some(ids[2]));

    let mut hidden = TypeNode::reference("Inner");
    ReferenceResolver::new(&project, ids[0]).resolve(&mut hidden);
    assert_eq!(hidden.target_id(), None, "Inner is not visible from A");

    let mut qualified = TypeNode::reference("ns.Inner");
    ReferenceResolver::new(&project, ids[0]).resolve(&mut qualified);
    assert_eq!(qualified.target_id(), Some(inner));
}

#[test]
fn test_resolve_by_symbol() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[0]);

    let mut node = TypeNode::symbol("C", SymbolId(102));
    resolver.resolve(&mut node);
    assert_eq!(node, TypeNode::resolved("C", ids[2]));
}

#[test]
fn test_dangling_reference_stays_unresolved() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[0]);

    let mut by_name = TypeNode::reference("DoesNotExist");
    resolver.resolve(&mut by_name);
    assert_eq!(by_name, TypeNode::reference("DoesNotExist"));

    let mut by_symbol = TypeNode::symbol("Gone", SymbolId(999));
    resolver.resolve(&mut by_symbol);
    assert_eq!(by_symbol, TypeNode::symbol("Gone", SymbolId(999)));
}

#[test]
fn test_resolution_is_idempotent() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[0]);

    let mut node = TypeNode::reference("B");
    resolver.resolve(&mut node);
    let first = node.clone();
    resolver.resolve(&mut node);
    assert_eq!(node, first);

    // A resolved link is never rewritten, even if the name now means something else.
    let mut pinned = TypeNode::resolved("B", ids[2]);
    resolver.resolve(&mut pinned);
    assert_eq!(pinned.target_id(), Some(ids[2]));
}

#[test]
fn test_tuple_elements_all_resolve() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[3]);

    let mut tuple = TypeNode::Tuple {
        elements: vec![
            TypeNode::reference("A"),
            TypeNode::symbol("B", SymbolId(101)),
            TypeNode::reference("C"),
        ],
    };
    resolver.resolve(&mut tuple);

    let TypeNode::Tuple { elements } = tuple else {
        panic!("shape must not change");
    };
    let targets: Vec<_> = elements.iter().map(TypeNode::target_id).collect();
    assert_eq!(targets, vec![Some(ids[0]), Some(ids[1]), Some(ids[2])]);
}

#[test]
fn test_empty_composites_are_untouched() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[0]);

    let mut tuple = TypeNode::Tuple { elements: vec![] };
    let mut union = TypeNode::Union { types: vec![] };
    resolver.resolve(&mut tuple);
    resolver.resolve(&mut union);
    assert_eq!(tuple, TypeNode::Tuple { elements: vec![] });
    assert_eq!(union, TypeNode::Union { types: vec![] });
}

#[test]
fn test_union_members_resolve_independently() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[0]);

    let mut union = TypeNode::Union {
        types: vec![
            TypeNode::reference("Missing"),
            TypeNode::other("string"),
            TypeNode::reference("B"),
        ],
    };
    resolver.resolve(&mut union);

    assert_eq!(
        union,
        TypeNode::Union {
            types: vec![
                TypeNode::reference("Missing"),
                TypeNode::other("string"),
                TypeNode::resolved("B", ids[1]),
            ],
        }
    );
}

#[test]
fn test_type_arguments_resolve_even_when_outer_dangles() {
    let (project, ids) = setup_project();
    let resolver = ReferenceResolver::new(&project, ids[0]);

    let mut node = TypeNode::Reference(ReferenceType::by_name("Promise").with_type_arguments(vec![
        TypeNode::reference("A"),
        TypeNode::Tuple {
            elements: vec![TypeNode::symbol("C", SymbolId(102))],
        },
    ]));
    resolver.resolve(&mut node);

    let reference = node.as_reference().expect("still a reference");
    assert!(!reference.is_resolved(), "Promise is external");
    assert_eq!(reference.type_arguments[0].target_id(), Some(ids[0]));
    assert_eq!(
        reference.type_arguments[1],
        TypeNode::Tuple {
            elements: vec![TypeNode::resolved("C", ids[2])]
        }
    );
}

#[test]
fn test_resolve_declaration_covers_every_field() {
    let (mut project, ids) = setup_project();
    let subject = ids[0];
    {
        let decl = project.get_mut(subject).unwrap();
        decl.ty = Some(TypeNode::reference("B"));
        decl.inherited_from = Some(TypeNode::symbol("C", SymbolId(102)));
        decl.overwrites = Some(TypeNode::reference("C"));
        decl.extended_types.push(TypeNode::reference("B"));
        decl.extended_by.push(TypeNode::reference("C"));
        decl.implemented_types.push(TypeNode::reference("ns.Inner"));
        decl.decorators.push(Decorator {
            name: "sealed".to_string(),
            ty: Some(TypeNode::reference("B")),
        });
        decl.decorators.push(Decorator {
            name: "bare".to_string(),
            ty: None,
        });
    }

    resolve_declaration(&mut project, subject);

    let decl = project.get(subject).unwrap();
    assert_eq!(decl.ty.as_ref().and_then(TypeNode::target_id), Some(ids[1]));
    assert_eq!(
        decl.inherited_from.as_ref().and_then(TypeNode::target_id),
        Some(ids[2])
    );
    assert_eq!(decl.overwrites.as_ref().and_then(TypeNode::target_id), Some(ids[2]));
    assert_eq!(decl.extended_types[0].target_id(), Some(ids[1]));
    assert_eq!(decl.extended_by[0].target_id(), Some(ids[2]));
    assert_eq!(decl.implemented_types[0].target_id(), Some(ids[4]));
    assert_eq!(
        decl.decorators[0].ty.as_ref().and_then(TypeNode::target_id),
        Some(ids[1])
    );
    assert!(decl.decorators[1].ty.is_none());
}

#[test]
fn test_resolve_declaration_ignores_unknown_id() {
    let (mut project, _) = setup_project();
    let before = project.clone();
    resolve_declaration(&mut project, DeclarationId(77));
    assert_eq!(project, before);
}
