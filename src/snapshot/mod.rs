//! Variable snapshots.
//!
//! A [`Snapshot`] is the explicit, immutable capture of the locals and globals
//! visible at one stop location. Nothing in the inspector reads process-wide
//! state; everything it renders comes from a snapshot.
//!
//! Snapshots are stored as JSON documents (object key order is significant):
//!
//! ```json
//! {
//!   "source": "test_segmented_display.py",
//!   "line": 53,
//!   "locals": { "small_list": { "$range": [50] } },
//!   "globals": {}
//! }
//! ```
//!
//! See [`decode`] for the value encoding.

use crate::inspect::{AttributeFilter, Visibility};
use crate::model::{SnapshotError, Value};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Read;
use tracing::debug;

pub mod decode;

/// Which variable table a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Variables of the current frame.
    Locals,
    /// Module-level variables.
    Globals,
}

impl Scope {
    /// Both scopes in display order.
    pub const ALL: [Scope; 2] = [Scope::Locals, Scope::Globals];

    /// Section title.
    pub fn title(self) -> &'static str {
        match self {
            Scope::Locals => "Locals",
            Scope::Globals => "Globals",
        }
    }

    /// Text shown when the scope has no variables.
    pub fn empty_note(self) -> &'static str {
        match self {
            Scope::Locals => "(no local variables)",
            Scope::Globals => "(no global variables)",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Immutable capture of the variables at one stop location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    source: Option<String>,
    line: Option<u32>,
    captured_at: Option<DateTime<Utc>>,
    locals: Vec<(String, Value)>,
    globals: Vec<(String, Value)>,
}

impl Snapshot {
    /// Empty snapshot with no location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source location.
    pub fn with_location(mut self, source: impl Into<String>, line: u32) -> Self {
        self.source = Some(source.into());
        self.line = Some(line);
        self
    }

    /// Append a local variable.
    pub fn with_local(mut self, name: impl Into<String>, value: Value) -> Self {
        self.locals.push((name.into(), value));
        self
    }

    /// Append a global variable.
    pub fn with_global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.push((name.into(), value));
        self
    }

    /// Decode a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] for invalid JSON or an invalid value encoding.
    pub fn from_json_str(text: &str) -> Result<Self, SnapshotError> {
        let document: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json(&document)
    }

    /// Decode a snapshot from a reader producing JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] for invalid JSON or an invalid value encoding.
    pub fn from_reader(reader: impl Read) -> Result<Self, SnapshotError> {
        let document: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json(&document)
    }

    /// Decode a snapshot from an already parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the document does not follow the snapshot format.
    pub fn from_json(document: &serde_json::Value) -> Result<Self, SnapshotError> {
        let root = document.as_object().ok_or(SnapshotError::NotAnObject)?;
        let mut snapshot = Snapshot::new();
        let mut decoder = decode::Decoder::new();

        for (field, value) in root {
            match field.as_str() {
                "source" => snapshot.source = Some(string_field(field, value)?),
                "line" => {
                    let line = value
                        .as_u64()
                        .and_then(|n| u32::try_from(n).ok())
                        .ok_or_else(|| invalid_field(field, "expected a line number"))?;
                    snapshot.line = Some(line);
                }
                "captured_at" => {
                    let raw = string_field(field, value)?;
                    let parsed = DateTime::parse_from_rfc3339(&raw)
                        .map_err(|e| invalid_field(field, &e.to_string()))?;
                    snapshot.captured_at = Some(parsed.with_timezone(&Utc));
                }
                "locals" => snapshot.locals = decoder.scope(value, "/locals")?,
                "globals" => snapshot.globals = decoder.scope(value, "/globals")?,
                other => return Err(invalid_field(other, "unknown field")),
            }
        }

        debug!(
            source = snapshot.source.as_deref().unwrap_or("<unknown>"),
            locals = snapshot.locals.len(),
            globals = snapshot.globals.len(),
            generated = decoder.generated(),
            "decoded snapshot"
        );
        Ok(snapshot)
    }

    /// Source file name, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Line number, if recorded.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Capture time, if recorded.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at
    }

    /// `file:line` location text, or `None` without a source.
    pub fn location(&self) -> Option<String> {
        let source = self.source.as_deref()?;
        Some(match self.line {
            Some(line) => format!("{source}:{line}"),
            None => source.to_string(),
        })
    }

    /// All variables of a scope in capture order, hidden names included.
    pub fn scope(&self, scope: Scope) -> &[(String, Value)] {
        match scope {
            Scope::Locals => &self.locals,
            Scope::Globals => &self.globals,
        }
    }

    /// Variables of a scope that should be displayed.
    ///
    /// Globals whose name starts with `_` (builtins, dunders) are hidden unless the
    /// filter asks for them; locals are always shown.
    pub fn variables(&self, scope: Scope, filter: AttributeFilter) -> Vec<(&str, &Value)> {
        self.scope(scope)
            .iter()
            .filter(|(name, _)| {
                scope == Scope::Locals
                    || filter.show_hidden
                    || Visibility::from_name(name) == Visibility::Public
            })
            .map(|(name, value)| (name.as_str(), value))
            .collect()
    }

    /// Look up a variable by name, locals first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        Scope::ALL
            .iter()
            .flat_map(|scope| self.scope(*scope))
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value)
    }
}

fn string_field(field: &str, value: &serde_json::Value) -> Result<String, SnapshotError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid_field(field, "expected a string"))
}

fn invalid_field(field: &str, reason: &str) -> SnapshotError {
    SnapshotError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
