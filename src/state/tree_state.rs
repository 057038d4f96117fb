//! Expansion and cursor state of the variable tree.

use crate::snapshot::Scope;
use std::collections::HashSet;
use std::fmt;

/// One step from a node to one of its display children.
///
/// The index is the child's position among its parent's display children.
/// Band steps are distinct from item steps so that re-segmenting with another
/// band size never reopens an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
    /// An item, entry or attribute.
    Child(usize),
    /// A band of a segmented value.
    Band(usize),
}

/// Stable identity of a row in the tree.
///
/// A path with no steps is the scope section header itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath {
    scope: Scope,
    steps: Vec<PathStep>,
}

impl NodePath {
    /// Path of a scope section header.
    pub fn scope(scope: Scope) -> Self {
        Self {
            scope,
            steps: Vec::new(),
        }
    }

    /// Path of a node reached from the scope header through `steps`.
    pub fn new(scope: Scope, steps: Vec<PathStep>) -> Self {
        Self { scope, steps }
    }

    /// Path of a child of this node.
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self {
            scope: self.scope,
            steps,
        }
    }

    /// Path of the parent, `None` for a scope header.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.steps.split_last()?;
        Some(Self {
            scope: self.scope,
            steps: rest.to_vec(),
        })
    }

    /// Scope the node lives in.
    pub fn scope_of(&self) -> Scope {
        self.scope
    }

    /// Steps from the scope header.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Whether this is a scope section header.
    pub fn is_scope_header(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scope)?;
        for step in &self.steps {
            match step {
                PathStep::Child(i) => write!(f, "/{i}")?,
                PathStep::Band(i) => write!(f, "/band{i}")?,
            }
        }
        Ok(())
    }
}

/// Which nodes are open, where the cursor is, and how far the view scrolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeState {
    expanded: HashSet<NodePath>,
    cursor: usize,
    scroll_offset: usize,
}

impl TreeState {
    /// Initial state: Locals open, Globals open only when `show_globals`.
    pub fn new(show_globals: bool) -> Self {
        let mut expanded = HashSet::new();
        expanded.insert(NodePath::scope(Scope::Locals));
        if show_globals {
            expanded.insert(NodePath::scope(Scope::Globals));
        }
        Self {
            expanded,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    /// Whether the node at `path` is open.
    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded.contains(path)
    }

    /// Open the node at `path`.
    pub fn expand(&mut self, path: NodePath) {
        self.expanded.insert(path);
    }

    /// Close the node at `path`. Descendants keep their state and reappear
    /// when it is reopened.
    pub fn collapse(&mut self, path: &NodePath) {
        self.expanded.remove(path);
    }

    /// Flip the node at `path`, returning whether it is now open.
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.clone());
            true
        }
    }

    /// Close everything below the scope headers.
    pub fn collapse_all(&mut self) {
        self.expanded.retain(NodePath::is_scope_header);
    }

    /// Number of open nodes, scope headers included.
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Cursor row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to `row_count`.
    pub fn set_cursor(&mut self, row: usize, row_count: usize) {
        self.cursor = row.min(row_count.saturating_sub(1));
    }

    /// First visible row.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Adjust the scroll offset so the cursor is inside a viewport of
    /// `viewport_height` rows.
    pub fn scroll_to_cursor(&mut self, viewport_height: usize) {
        let height = viewport_height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new(false)
    }
}
