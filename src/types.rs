use serde::{Deserialize, Serialize};

/// Stable identity of a declaration: its index in the project arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(pub u32);

impl DeclarationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Numeric symbol identity assigned by the front-end's type checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// Kinds of documented program entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    Accessor,
    TypeLiteral,
    TypeParameter,
    TypeAlias,
    ObjectLiteral,
}

#[allow(clippy::should_implement_trait)]
impl ReflectionKind {
    /// Returns the string representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReflectionKind::Project => "project",
            ReflectionKind::Module => "module",
            ReflectionKind::Namespace => "namespace",
            ReflectionKind::Enum => "enum",
            ReflectionKind::EnumMember => "enum_member",
            ReflectionKind::Variable => "variable",
            ReflectionKind::Function => "function",
            ReflectionKind::Class => "class",
            ReflectionKind::Interface => "interface",
            ReflectionKind::Constructor => "constructor",
            ReflectionKind::Property => "property",
            ReflectionKind::Method => "method",
            ReflectionKind::Accessor => "accessor",
            ReflectionKind::TypeLiteral => "type_literal",
            ReflectionKind::TypeParameter => "type_parameter",
            ReflectionKind::TypeAlias => "type_alias",
            ReflectionKind::ObjectLiteral => "object_literal",
        }
    }

    /// Parses a string into a `ReflectionKind`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<ReflectionKind> {
        match s {
            "project" => Some(ReflectionKind::Project),
            "module" => Some(ReflectionKind::Module),
            "namespace" => Some(ReflectionKind::Namespace),
            "enum" => Some(ReflectionKind::Enum),
            "enum_member" => Some(ReflectionKind::EnumMember),
            "variable" => Some(ReflectionKind::Variable),
            "function" => Some(ReflectionKind::Function),
            "class" => Some(ReflectionKind::Class),
            "interface" => Some(ReflectionKind::Interface),
            "constructor" => Some(ReflectionKind::Constructor),
            "property" => Some(ReflectionKind::Property),
            "method" => Some(ReflectionKind::Method),
            "accessor" => Some(ReflectionKind::Accessor),
            "type_literal" => Some(ReflectionKind::TypeLiteral),
            "type_parameter" => Some(ReflectionKind::TypeParameter),
            "type_alias" => Some(ReflectionKind::TypeAlias),
            "object_literal" => Some(ReflectionKind::ObjectLiteral),
            _ => None,
        }
    }

    /// Whether this kind takes part in implements/extends relations.
    pub fn is_class_or_interface(&self) -> bool {
        matches!(self, ReflectionKind::Class | ReflectionKind::Interface)
    }
}

/// Resolution state of a reference type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTarget {
    /// Look the target up by name from the owning declaration's scope.
    ByName,
    /// Look the target up in the project's symbol mapping.
    Symbol(SymbolId),
    /// Linked to a declaration of the project.
    Resolved(DeclarationId),
}

/// A type naming another declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceType {
    pub name: String,
    pub target: ReferenceTarget,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeNode>,
}

impl ReferenceType {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: ReferenceTarget::ByName,
            type_arguments: Vec::new(),
        }
    }

    pub fn by_symbol(name: impl Into<String>, symbol: SymbolId) -> Self {
        Self {
            name: name.into(),
            target: ReferenceTarget::Symbol(symbol),
            type_arguments: Vec::new(),
        }
    }

    pub fn resolved(name: impl Into<String>, target: DeclarationId) -> Self {
        Self {
            name: name.into(),
            target: ReferenceTarget::Resolved(target),
            type_arguments: Vec::new(),
        }
    }

    pub fn with_type_arguments(mut self, arguments: Vec<TypeNode>) -> Self {
        self.type_arguments = arguments;
        self
    }

    /// The linked declaration, if this reference has been resolved.
    pub fn target_id(&self) -> Option<DeclarationId> {
        match self.target {
            ReferenceTarget::Resolved(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.target_id().is_some()
    }
}

/// Shapes of types the resolver knows how to walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    Reference(ReferenceType),
    Tuple { elements: Vec<TypeNode> },
    Union { types: Vec<TypeNode> },
    /// Any other shape (intrinsic, literal, reflection...). Never recursed into.
    Other { name: String },
}

impl TypeNode {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference(ReferenceType::by_name(name))
    }

    pub fn symbol(name: impl Into<String>, symbol: SymbolId) -> Self {
        TypeNode::Reference(ReferenceType::by_symbol(name, symbol))
    }

    pub fn resolved(name: impl Into<String>, target: DeclarationId) -> Self {
        TypeNode::Reference(ReferenceType::resolved(name, target))
    }

    pub fn other(name: impl Into<String>) -> Self {
        TypeNode::Other { name: name.into() }
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            TypeNode::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// The declaration this node links to, when it is a resolved reference.
    pub fn target_id(&self) -> Option<DeclarationId> {
        self.as_reference().and_then(ReferenceType::target_id)
    }

    /// Display name of the node. Only references carry one.
    pub fn name(&self) -> Option<&str> {
        self.as_reference().map(|r| r.name.as_str())
    }
}

/// An annotation attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorator {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeNode>,
}

/// One level of a declaration's extends lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub types: Vec<TypeNode>,
    #[serde(default)]
    pub is_target: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<HierarchyLevel>>,
}

impl HierarchyLevel {
    /// Iterates over this level and every level linked after it.
    pub fn levels(&self) -> Levels<'_> {
        Levels {
            current: Some(self),
        }
    }

    /// Number of levels in the chain starting here.
    pub fn depth(&self) -> usize {
        self.levels().count()
    }
}

/// Iterator over a hierarchy chain.
pub struct Levels<'a> {
    current: Option<&'a HierarchyLevel>,
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a HierarchyLevel;

    fn next(&mut self) -> Option<Self::Item> {
        let level = self.current?;
        self.current = level.next.as_deref();
        Some(level)
    }
}

/// A documented program entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclarationId,
    pub name: String,
    pub kind: ReflectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<DeclarationId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeclarationId>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<TypeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrites: Option<TypeNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_types: Vec<TypeNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_by: Vec<TypeNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implemented_types: Vec<TypeNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implemented_by: Vec<TypeNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<Decorator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<HierarchyLevel>,
}

impl Declaration {
    pub fn new(id: DeclarationId, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            ty: None,
            inherited_from: None,
            overwrites: None,
            extended_types: Vec::new(),
            extended_by: Vec::new(),
            implemented_types: Vec::new(),
            implemented_by: Vec::new(),
            decorators: Vec::new(),
            hierarchy: None,
        }
    }

    pub fn is_class_or_interface(&self) -> bool {
        self.kind.is_class_or_interface()
    }

    /// A resolved reference pointing at this declaration.
    pub fn self_reference(&self) -> TypeNode {
        TypeNode::resolved(self.name.clone(), self.id)
    }
}
