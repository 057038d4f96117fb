//! Non-interactive renderings of a snapshot: indented text and JSON.
//!
//! Both expand every node down to a fixed depth and share the tree the TUI
//! shows, bands included.

use super::constants::{marker, INDENT_WIDTH};
use crate::inspect::{InspectOptions, Variable};
use crate::snapshot::{Scope, Snapshot};
use serde::Serialize;
use std::fmt::Write;

/// Materialise the visible variables of one scope, `depth` levels deep.
pub fn scope_variables(
    snapshot: &Snapshot,
    scope: Scope,
    options: InspectOptions,
    depth: usize,
) -> Vec<Variable> {
    snapshot
        .variables(scope, options.filter)
        .into_iter()
        .map(|(name, value)| Variable::build(name, value, options, depth.saturating_sub(1)))
        .collect()
}

/// Render the snapshot as an indented tree.
///
/// ```text
/// Locals
///   ▾ large_list = [...] (250 items)  (list)
///     ▸ [0-99] = (100 items)  (segment)
/// ```
///
/// `depth` counts variables as level 1; `depth == 1` lists variables without
/// opening any of them.
pub fn render_text(snapshot: &Snapshot, options: InspectOptions, depth: usize) -> String {
    let mut out = String::new();

    if let Some(location) = snapshot.location() {
        let _ = writeln!(out, "# {location}");
    }

    for scope in Scope::ALL {
        let _ = writeln!(out, "{}", scope.title());
        let variables = scope_variables(snapshot, scope, options, depth);
        if variables.is_empty() {
            let _ = writeln!(out, "{}{}", indent(1), scope.empty_note());
            continue;
        }
        for variable in &variables {
            write_variable(&mut out, variable, 1, depth);
        }
    }

    out
}

/// Write `variable` at tree `level`; nodes above `depth` are open even when
/// they turn out to be empty.
fn write_variable(out: &mut String, variable: &Variable, level: usize, depth: usize) {
    let expanded = variable.has_children && level < depth;
    let _ = write!(
        out,
        "{}{} {}",
        indent(level),
        marker(variable.has_children, expanded),
        variable.name
    );
    if !variable.value.is_empty() {
        let _ = write!(out, " = {}", variable.value);
    }
    if !variable.type_name.is_empty() {
        let _ = write!(out, "  ({})", variable.type_name);
    }
    out.push('\n');

    for child in &variable.children {
        write_variable(out, child, level + 1, depth);
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(depth * INDENT_WIDTH)
}

/// JSON document produced by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// `file:line` of the capture, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Visible local variables.
    pub locals: Vec<Variable>,
    /// Visible global variables.
    pub globals: Vec<Variable>,
}

impl JsonReport {
    /// Build the report with the same depth semantics as [`render_text`].
    pub fn build(snapshot: &Snapshot, options: InspectOptions, depth: usize) -> Self {
        Self {
            location: snapshot.location(),
            locals: scope_variables(snapshot, Scope::Locals, options, depth),
            globals: scope_variables(snapshot, Scope::Globals, options, depth),
        }
    }
}

/// Render the snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns the serializer error, which only happens on writer failure.
pub fn render_json(
    snapshot: &Snapshot,
    options: InspectOptions,
    depth: usize,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport::build(snapshot, options, depth))
}

// ===== Tests =====
