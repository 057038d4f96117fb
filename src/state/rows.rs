//! Flattening the expanded part of the tree into display rows.

use super::tree_state::{NodePath, PathStep, TreeState};
use crate::inspect::{Attribute, Child, InspectOptions};
use crate::snapshot::{Scope, Snapshot};

/// What a row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// `Locals` / `Globals` section header.
    ScopeHeader,
    /// A variable, item, attribute or band.
    Node,
    /// Informational text such as `(no local variables)`.
    Note,
}

/// One visible line of the variable tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Nesting level; scope headers are 0, top-level variables 1.
    pub depth: usize,
    /// Stable identity of the node.
    pub path: NodePath,
    /// Row role.
    pub kind: RowKind,
    /// Name column.
    pub name: String,
    /// Value column.
    pub summary: String,
    /// Type column.
    pub type_name: String,
    /// Whether the row can be opened.
    pub expandable: bool,
    /// Whether the row is open.
    pub expanded: bool,
}

impl Row {
    /// Whether the row is a band of a segmented value.
    pub fn is_band(&self) -> bool {
        matches!(self.path.steps().last(), Some(PathStep::Band(_)))
    }
}

/// Walk the snapshot depth-first and emit a row for every visible node.
///
/// Children and bands are only computed for expanded nodes, so a collapsed
/// list of a million items costs one row.
pub fn flatten(snapshot: &Snapshot, tree: &TreeState, options: InspectOptions) -> Vec<Row> {
    let mut rows = Vec::new();

    for scope in Scope::ALL {
        let header = NodePath::scope(scope);
        let expanded = tree.is_expanded(&header);
        rows.push(Row {
            depth: 0,
            path: header.clone(),
            kind: RowKind::ScopeHeader,
            name: scope.title().to_string(),
            summary: String::new(),
            type_name: String::new(),
            expandable: true,
            expanded,
        });
        if !expanded {
            continue;
        }

        let variables = snapshot.variables(scope, options.filter);
        if variables.is_empty() {
            rows.push(Row {
                depth: 1,
                path: header.child(PathStep::Child(0)),
                kind: RowKind::Note,
                name: scope.empty_note().to_string(),
                summary: String::new(),
                type_name: String::new(),
                expandable: false,
                expanded: false,
            });
            continue;
        }

        let top_level: Vec<Child<'_>> = variables
            .into_iter()
            .map(|(name, value)| Child::Item(Attribute::public(name, value)))
            .collect();
        push_children(&mut rows, &top_level, &header, 1, tree, options);
    }

    rows
}

fn push_children(
    rows: &mut Vec<Row>,
    children: &[Child<'_>],
    parent: &NodePath,
    depth: usize,
    tree: &TreeState,
    options: InspectOptions,
) {
    for (index, child) in children.iter().enumerate() {
        let step = match child {
            Child::Band(_) => PathStep::Band(index),
            _ => PathStep::Child(index),
        };
        let path = parent.child(step);
        let expandable = child.is_expandable();
        let expanded = expandable && tree.is_expanded(&path);
        let kind = match child {
            Child::Placeholder { .. } => RowKind::Note,
            _ => RowKind::Node,
        };

        rows.push(Row {
            depth,
            path: path.clone(),
            kind,
            name: child.name().into_owned(),
            summary: child.summary(),
            type_name: child.type_name().into_owned(),
            expandable,
            expanded,
        });

        if expanded {
            let grandchildren = child.children(options);
            push_children(rows, &grandchildren, &path, depth + 1, tree, options);
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "rows_tests.rs"]
mod tests;
