use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{DocLinkError, Result};
use crate::types::*;

/// Owner of every declaration of a documentation run.
///
/// Declarations live in an arena addressed by [`DeclarationId`]; the id of a
/// declaration is always its index. The symbol mapping links the front-end's
/// numeric symbol ids to declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    declarations: Vec<Declaration>,
    #[serde(default)]
    symbol_mapping: HashMap<SymbolId, DeclarationId>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            symbol_mapping: HashMap::new(),
        }
    }

    /// Loads a project document and validates its structure.
    pub fn from_json(json: &str) -> Result<Self> {
        let project: Project = serde_json::from_str(json)?;
        project.validate()?;
        Ok(project)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Checks arena ids, scope links and symbol mapping targets.
    ///
    /// Dangling type references are not checked; they are a valid outcome.
    pub fn validate(&self) -> Result<()> {
        let len = self.declarations.len();
        let in_range = |id: DeclarationId| id.index() < len;

        for (index, decl) in self.declarations.iter().enumerate() {
            if decl.id.index() != index {
                return Err(DocLinkError::Model {
                    message: format!(
                        "declaration '{}' has id {} but sits at index {}",
                        decl.name, decl.id, index
                    ),
                });
            }
            if let Some(parent) = decl.parent {
                if !in_range(parent) {
                    return Err(DocLinkError::Model {
                        message: format!(
                            "declaration '{}' has unknown parent {}",
                            decl.name, parent
                        ),
                    });
                }
            }
            if let Some(child) = decl.children.iter().find(|c| !in_range(**c)) {
                return Err(DocLinkError::Model {
                    message: format!("declaration '{}' has unknown child {}", decl.name, child),
                });
            }
        }

        // Scope walks climb parents; a chain longer than the arena loops.
        for decl in &self.declarations {
            let mut current = decl.parent;
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if steps > len {
                    return Err(DocLinkError::Model {
                        message: format!("declaration '{}' is its own ancestor", decl.name),
                    });
                }
                current = self.declarations[parent.index()].parent;
            }
        }

        for (symbol, id) in &self.symbol_mapping {
            if !in_range(*id) {
                return Err(DocLinkError::Model {
                    message: format!("symbol {} maps to unknown declaration {}", symbol.0, id),
                });
            }
        }

        Ok(())
    }

    /// Adds a declaration, linking it under `parent` when given.
    pub fn add_declaration(
        &mut self,
        name: impl Into<String>,
        kind: ReflectionKind,
        parent: Option<DeclarationId>,
    ) -> DeclarationId {
        let id = DeclarationId(self.declarations.len() as u32);
        let mut decl = Declaration::new(id, name, kind);
        decl.parent = parent;
        self.declarations.push(decl);
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    pub fn register_symbol(&mut self, symbol: SymbolId, id: DeclarationId) {
        self.symbol_mapping.insert(symbol, id);
    }

    pub fn get(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    pub fn get_mut(&mut self, id: DeclarationId) -> Option<&mut Declaration> {
        self.declarations.get_mut(id.index())
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = DeclarationId> + '_ {
        self.declarations.iter().map(|d| d.id)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Looks up the declaration registered for a symbol id.
    pub fn find_by_symbol(&self, symbol: SymbolId) -> Option<DeclarationId> {
        self.symbol_mapping
            .get(&symbol)
            .copied()
            .filter(|id| self.get(*id).is_some())
    }

    /// Resolves a possibly dotted name as seen from `scope`.
    ///
    /// The child chain is searched from `scope` first, then from each enclosing
    /// declaration, and finally from the project's top-level declarations.
    pub fn find_by_name(&self, scope: DeclarationId, name: &str) -> Option<DeclarationId> {
        let segments: Vec<&str> = name.split('.').collect();
        let mut current = self.get(scope);
        while let Some(decl) = current {
            if let Some(found) = self.find_child_path(&decl.children, &segments) {
                return Some(found);
            }
            current = decl.parent.and_then(|p| self.get(p));
        }
        self.find_child_path(&self.top_level(), &segments)
    }

    /// Finds a top-level declaration by (possibly dotted) name.
    pub fn find_global(&self, name: &str) -> Option<DeclarationId> {
        let segments: Vec<&str> = name.split('.').collect();
        self.find_child_path(&self.top_level(), &segments)
    }

    fn top_level(&self) -> Vec<DeclarationId> {
        self.declarations
            .iter()
            .filter(|d| d.parent.is_none())
            .map(|d| d.id)
            .collect()
    }

    fn find_child_path(&self, children: &[DeclarationId], segments: &[&str]) -> Option<DeclarationId> {
        let (first, rest) = segments.split_first()?;
        let child = children
            .iter()
            .filter_map(|id| self.get(*id))
            .find(|d| d.name == *first)?;
        if rest.is_empty() {
            Some(child.id)
        } else {
            self.find_child_path(&child.children, rest)
        }
    }
}
