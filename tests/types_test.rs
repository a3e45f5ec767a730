use doclink::types::*;

#[test]
fn reflection_kind_as_str_roundtrip() {
    let kinds = vec![
        ReflectionKind::Module,
        ReflectionKind::Namespace,
        ReflectionKind::Class,
        ReflectionKind::Interface,
        ReflectionKind::EnumMember,
        ReflectionKind::TypeAlias,
    ];

    for kind in kinds {
        let s = kind.as_str();
        let parsed = ReflectionKind::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse ReflectionKind from '{}'", s));
        assert_eq!(kind, parsed, "roundtrip failed for ReflectionKind::{}", s);
    }
    assert!(ReflectionKind::from_str("struct").is_none());
}

#[test]
fn only_classes_and_interfaces_take_part_in_hierarchies() {
    assert!(ReflectionKind::Class.is_class_or_interface());
    assert!(ReflectionKind::Interface.is_class_or_interface());
    assert!(!ReflectionKind::Function.is_class_or_interface());
    assert!(!ReflectionKind::TypeAlias.is_class_or_interface());
    assert!(!ReflectionKind::Namespace.is_class_or_interface());
}

#[test]
fn reference_target_id_only_when_resolved() {
    assert_eq!(ReferenceType::by_name("A").target_id(), None);
    assert_eq!(ReferenceType::by_symbol("A", SymbolId(7)).target_id(), None);
    assert_eq!(
        ReferenceType::resolved("A", DeclarationId(3)).target_id(),
        Some(DeclarationId(3))
    );
    assert_eq!(TypeNode::other("string").target_id(), None);
}

#[test]
fn type_node_name_is_reference_name() {
    assert_eq!(TypeNode::reference("Foo").name(), Some("Foo"));
    assert_eq!(TypeNode::other("number").name(), None);
    assert_eq!(TypeNode::Tuple { elements: vec![] }.name(), None);
}

#[test]
fn type_node_json_shape() {
    let json = r#"{
        "kind": "union",
        "types": [
            { "kind": "reference", "name": "A", "target": "by_name" },
            { "kind": "reference", "name": "B", "target": { "symbol": 12 } },
            { "kind": "reference", "name": "C", "target": { "resolved": 4 },
              "type_arguments": [ { "kind": "other", "name": "string" } ] },
            { "kind": "tuple", "elements": [] }
        ]
    }"#;

    let node: TypeNode = serde_json::from_str(json).expect("type node should parse");
    let TypeNode::Union { types } = node else {
        panic!("expected a union");
    };
    assert_eq!(types.len(), 4);
    assert_eq!(types[0], TypeNode::reference("A"));
    assert_eq!(types[1], TypeNode::symbol("B", SymbolId(12)));
    assert_eq!(
        types[2],
        TypeNode::Reference(
            ReferenceType::resolved("C", DeclarationId(4))
                .with_type_arguments(vec![TypeNode::other("string")])
        )
    );
    assert_eq!(types[3], TypeNode::Tuple { elements: vec![] });
}

#[test]
fn hierarchy_levels_iterate_in_chain_order() {
    let chain = HierarchyLevel {
        types: vec![TypeNode::resolved("A", DeclarationId(0))],
        is_target: false,
        next: Some(Box::new(HierarchyLevel {
            types: vec![TypeNode::resolved("B", DeclarationId(1))],
            is_target: true,
            next: None,
        })),
    };

    assert_eq!(chain.depth(), 2);
    let flags: Vec<bool> = chain.levels().map(|l| l.is_target).collect();
    assert_eq!(flags, vec![false, true]);
}

#[test]
fn self_reference_points_at_declaration() {
    let decl = Declaration::new(DeclarationId(5), "Widget", ReflectionKind::Class);
    assert_eq!(
        decl.self_reference(),
        TypeNode::resolved("Widget", DeclarationId(5))
    );
    assert!(decl.hierarchy.is_none());
}
