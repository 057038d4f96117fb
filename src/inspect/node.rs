//! Display children of inspectable values.
//!
//! [`children`] is the single place where the segmentation policy meets the
//! variable tree. Each call looks at one value, counts its visible attributes
//! and either returns them directly or splits their index range into
//! [`BandNode`]s. A band is a window over its parent value: its attributes are
//! only built when the band itself is expanded. Nested values are handled by
//! calling [`children`] again on the child, so every level is segmented
//! independently of its container.

use super::{Attribute, AttributeFilter, ChildUnit, Inspectable};
use crate::model::{BandSize, Value};
use crate::segment::{band_label, band_ranges, needs_segmentation};
use serde::Serialize;
use std::borrow::Cow;
use std::ops::Range;

/// Type name shown for band nodes.
pub const SEGMENT_TYPE_NAME: &str = "segment";

/// Parameters shared by every level of one tree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InspectOptions {
    /// Band size applied at every level.
    pub band_size: BandSize,
    /// Which attributes are displayed.
    pub filter: AttributeFilter,
}

impl InspectOptions {
    /// Options with the given band size and default filtering.
    pub fn with_band_size(band_size: BandSize) -> Self {
        Self {
            band_size,
            ..Self::default()
        }
    }
}

/// A band of a segmented value, displayed as one expandable node.
///
/// Holds the parent value and a range of its visible attributes; nothing is
/// copied out of the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct BandNode<'a> {
    parent: &'a Value,
    range: Range<usize>,
    filter: AttributeFilter,
}

impl<'a> BandNode<'a> {
    /// Label such as `[100-199]`.
    pub fn label(&self) -> String {
        band_label(&self.range)
    }

    /// Covered index range of the parent's visible attributes.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Number of attributes in the band.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the band covers nothing.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The value this band is a window of.
    pub fn parent(&self) -> &'a Value {
        self.parent
    }

    /// Summary such as `(100 items)` or `(50 attributes)`.
    pub fn summary(&self) -> String {
        format!("({} {})", self.len(), self.unit().noun())
    }

    /// The attributes inside this band, with their original names.
    pub fn attributes(&self) -> Vec<Attribute<'a>> {
        self.parent.visible_window(self.filter, self.range.clone())
    }

    fn unit(&self) -> ChildUnit {
        self.parent.child_unit()
    }
}

/// One row-worthy child of an expanded node.
#[derive(Debug, Clone, PartialEq)]
pub enum Child<'a> {
    /// A named attribute (list item, dict entry, module/object attribute).
    Item(Attribute<'a>),
    /// A band grouping consecutive attributes of a large value.
    Band(BandNode<'a>),
    /// Note shown for a module or object with nothing to display.
    Placeholder {
        /// Text for the name column.
        name: &'static str,
        /// Text for the value column.
        detail: &'static str,
    },
}

impl<'a> Child<'a> {
    /// Name column text.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Child::Item(attribute) => Cow::Borrowed(&attribute.name),
            Child::Band(band) => Cow::Owned(band.label()),
            Child::Placeholder { name, .. } => Cow::Borrowed(name),
        }
    }

    /// Value column text.
    pub fn summary(&self) -> String {
        match self {
            Child::Item(attribute) => attribute.value.summary(),
            Child::Band(band) => band.summary(),
            Child::Placeholder { detail, .. } => (*detail).to_string(),
        }
    }

    /// Type column text.
    pub fn type_name(&self) -> Cow<'a, str> {
        match self {
            Child::Item(attribute) => attribute.value.type_name(),
            Child::Band(_) => Cow::Borrowed(SEGMENT_TYPE_NAME),
            Child::Placeholder { .. } => Cow::Borrowed(""),
        }
    }

    /// Whether the child can be expanded.
    pub fn is_expandable(&self) -> bool {
        match self {
            Child::Item(attribute) => attribute.value.is_expandable(),
            Child::Band(_) => true,
            Child::Placeholder { .. } => false,
        }
    }

    /// Children of this child, computed on demand.
    ///
    /// Band contents are returned as items without re-segmenting them: a band
    /// never holds more than `band_size` entries.
    pub fn children(&self, options: InspectOptions) -> Vec<Child<'a>> {
        match self {
            Child::Item(attribute) => children(attribute.value, options),
            Child::Band(band) => band.attributes().into_iter().map(Child::Item).collect(),
            Child::Placeholder { .. } => Vec::new(),
        }
    }
}

/// Display children of `value` after filtering and segmentation.
///
/// - primitives have no children
/// - at most `band_size` visible attributes are returned as items
/// - more are split into bands labelled by original index range; a band's
///   attributes are not built until it is expanded
/// - a module or object with no visible attributes yields one placeholder
pub fn children(value: &Value, options: InspectOptions) -> Vec<Child<'_>> {
    if !value.is_expandable() {
        return Vec::new();
    }

    let len = value.visible_count(options.filter);
    if len == 0 {
        return match value {
            Value::Module { .. } => vec![Child::Placeholder {
                name: "(no public attributes found)",
                detail: "Module has no public attributes",
            }],
            Value::Object { .. } => vec![Child::Placeholder {
                name: "(no attributes)",
                detail: "Object has no accessible attributes",
            }],
            _ => Vec::new(),
        };
    }

    if !needs_segmentation(len, options.band_size) {
        return value
            .visible_window(options.filter, 0..len)
            .into_iter()
            .map(Child::Item)
            .collect();
    }

    band_ranges(len, options.band_size)
        .into_iter()
        .map(|range| {
            Child::Band(BandNode {
                parent: value,
                range,
                filter: options.filter,
            })
        })
        .collect()
}

/// Eagerly materialised variable tree node.
///
/// Used for JSON output and for tests that compare whole trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Name column text.
    pub name: String,
    /// Value column text.
    pub value: String,
    /// Type column text.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the node is expandable.
    pub has_children: bool,
    /// Materialised children; empty beyond the requested depth.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Variable>,
}

impl Variable {
    /// Build the tree for a named top-level value, expanding `depth` levels.
    pub fn build(name: &str, value: &Value, options: InspectOptions, depth: usize) -> Self {
        Self::from_child(&Child::Item(Attribute::public(name, value)), options, depth)
    }

    /// Build the tree for an already computed child, expanding `depth` levels.
    pub fn from_child(child: &Child<'_>, options: InspectOptions, depth: usize) -> Self {
        let children = if depth == 0 {
            Vec::new()
        } else {
            child
                .children(options)
                .iter()
                .map(|grandchild| Self::from_child(grandchild, options, depth - 1))
                .collect()
        };
        Self {
            name: child.name().into_owned(),
            value: child.summary(),
            type_name: child.type_name().into_owned(),
            has_children: child.is_expandable(),
            children,
        }
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Variable> {
        self.children.iter().find(|child| child.name == name)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
