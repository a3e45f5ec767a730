use tracing::debug;

use crate::project::Project;
use crate::types::*;

/// Finalizes every queued declaration once all back-edges are in place.
///
/// For each id, in the given order, sorts `implemented_by` by name and stores
/// the extends chain as the declaration's `hierarchy`. Returns the number of
/// hierarchies built.
pub fn linearize(project: &mut Project, pending: &[DeclarationId]) -> usize {
    let mut built = 0;
    for &id in pending {
        let Some(decl) = project.get_mut(id) else {
            continue;
        };
        sort_implemented_by(decl);
        decl.hierarchy = Some(build_hierarchy(decl));
        built += 1;
        debug!(declaration = %decl.name, "hierarchy built");
    }
    built
}

/// Stable sort of `implemented_by` by reference name, ascending.
///
/// `extended_by` keeps its accumulation order.
pub fn sort_implemented_by(decl: &mut Declaration) {
    decl.implemented_by.sort_by(|a, b| a.name().cmp(&b.name()));
}

/// Builds the ancestors -> self -> descendants chain of a declaration.
///
/// Ancestor and descendant levels are omitted when empty; the self level is
/// always present and is the only one flagged as the target.
pub fn build_hierarchy(decl: &Declaration) -> HierarchyLevel {
    let mut levels = Vec::with_capacity(3);
    if !decl.extended_types.is_empty() {
        levels.push((decl.extended_types.clone(), false));
    }
    levels.push((vec![decl.self_reference()], true));
    if !decl.extended_by.is_empty() {
        levels.push((decl.extended_by.clone(), false));
    }

    let mut chain: Option<HierarchyLevel> = None;
    for (types, is_target) in levels.into_iter().rev() {
        chain = Some(HierarchyLevel {
            types,
            is_target,
            next: chain.map(Box::new),
        });
    }

    chain.unwrap_or_else(|| HierarchyLevel {
        types: vec![decl.self_reference()],
        is_target: true,
        next: None,
    })
}

/// Renders a declaration's hierarchy and implementors as indented text.
///
/// Each level is indented one step deeper than the last; the target level is
/// marked with `*`.
pub fn format_hierarchy(project: &Project, decl: &Declaration) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", decl.name, decl.kind.as_str()));

    match &decl.hierarchy {
        Some(root) => {
            out.push_str("Hierarchy:\n");
            for (depth, level) in root.levels().enumerate() {
                let names: Vec<String> = level
                    .types
                    .iter()
                    .map(|t| display_name(project, t))
                    .collect();
                let marker = if level.is_target { "* " } else { "" };
                out.push_str(&format!(
                    "{}- {}{}\n",
                    "  ".repeat(depth + 1),
                    marker,
                    names.join(", ")
                ));
            }
        }
        None => out.push_str("Hierarchy: none\n"),
    }

    if !decl.implemented_by.is_empty() {
        out.push_str("Implemented by:\n");
        for ty in &decl.implemented_by {
            out.push_str(&format!("  - {}\n", display_name(project, ty)));
        }
    }

    out
}

fn display_name(project: &Project, ty: &TypeNode) -> String {
    match ty {
        TypeNode::Reference(reference) => match reference.target_id().and_then(|id| project.get(id)) {
            Some(target) => target.name.clone(),
            None => format!("{} (external)", reference.name),
        },
        TypeNode::Tuple { elements } => format!("[{} elements]", elements.len()),
        TypeNode::Union { types } => format!("union of {}", types.len()),
        TypeNode::Other { name } => name.clone(),
    }
}
