//! Attribute inspection for captured values.
//!
//! [`Inspectable`] is the capability the variable tree is built on: anything that
//! can report a type name, a one-line summary and an ordered list of named
//! attributes can be displayed. [`Value`] implements it following the
//! conventions of a dynamic-language debugger:
//!
//! - list/tuple items are named `[i]`
//! - dict entries are named by their key repr (`'key'` for string keys)
//! - module attributes keep declaration order
//! - object attributes are sorted by name
//!
//! Module and object attributes whose name starts with `_` are [`Visibility::Hidden`]
//! and dropped unless the caller's [`AttributeFilter`] asks for them.

use crate::model::Value;
use std::borrow::Cow;
use std::ops::Range;

pub mod node;

pub use node::{children, BandNode, Child, InspectOptions, Variable};

/// Whether an attribute is shown by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Always displayed.
    Public,
    /// Displayed only when hidden attributes are requested.
    Hidden,
}

impl Visibility {
    /// Classify an attribute name by the leading-underscore convention.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with('_') {
            Visibility::Hidden
        } else {
            Visibility::Public
        }
    }
}

/// Decides which attributes reach the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeFilter {
    /// Include [`Visibility::Hidden`] attributes.
    pub show_hidden: bool,
}

impl AttributeFilter {
    /// Whether `attribute` passes this filter.
    pub fn admits(&self, attribute: &Attribute<'_>) -> bool {
        self.admits_name(&attribute.name)
    }

    /// Whether a module or object attribute called `name` passes this filter.
    pub fn admits_name(&self, name: &str) -> bool {
        self.show_hidden || Visibility::from_name(name) == Visibility::Public
    }
}

/// One named child of an inspectable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    /// Display name (`[3]`, `'key'`, `name`).
    pub name: String,
    /// The attribute's value.
    pub value: &'a Value,
    /// Whether the attribute is shown by default.
    pub visibility: Visibility,
}

impl<'a> Attribute<'a> {
    /// A public attribute.
    pub fn public(name: impl Into<String>, value: &'a Value) -> Self {
        Self {
            name: name.into(),
            value,
            visibility: Visibility::Public,
        }
    }

    /// An attribute whose visibility follows its name.
    pub fn named(name: &str, value: &'a Value) -> Self {
        Self {
            name: name.to_string(),
            value,
            visibility: Visibility::from_name(name),
        }
    }
}

/// Noun used when summarising a band of children, e.g. `(100 items)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildUnit {
    /// Elements of a list, tuple or dict.
    Items,
    /// Attributes of a module or object.
    Attributes,
}

impl ChildUnit {
    /// Plural noun for summaries.
    pub fn noun(self) -> &'static str {
        match self {
            ChildUnit::Items => "items",
            ChildUnit::Attributes => "attributes",
        }
    }
}

/// Capability of exposing a named, ordered set of attributes for display.
pub trait Inspectable {
    /// Type name shown in the type column.
    fn type_name(&self) -> Cow<'_, str>;

    /// One-line summary shown in the value column.
    fn summary(&self) -> String;

    /// Whether the node can be expanded, even if it currently has no children.
    fn is_expandable(&self) -> bool;

    /// Ordered attributes, hidden ones included.
    fn list_attributes(&self) -> Vec<Attribute<'_>>;

    /// Noun for band summaries.
    fn child_unit(&self) -> ChildUnit {
        ChildUnit::Items
    }

    /// Attributes that pass `filter`, in display order.
    fn visible_attributes(&self, filter: AttributeFilter) -> Vec<Attribute<'_>> {
        self.list_attributes()
            .into_iter()
            .filter(|attribute| filter.admits(attribute))
            .collect()
    }

    /// Number of attributes that pass `filter`.
    fn visible_count(&self, filter: AttributeFilter) -> usize {
        self.visible_attributes(filter).len()
    }

    /// The visible attributes at display positions `range`.
    ///
    /// Positions past the end are ignored.
    fn visible_window(&self, filter: AttributeFilter, range: Range<usize>) -> Vec<Attribute<'_>> {
        window(self.visible_attributes(filter), range)
    }
}

fn window(attributes: Vec<Attribute<'_>>, range: Range<usize>) -> Vec<Attribute<'_>> {
    attributes
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect()
}

/// Clamp `range` to a collection of `len` items.
fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let end = range.end.min(len);
    range.start.min(end)..end
}

impl Inspectable for Value {
    fn type_name(&self) -> Cow<'_, str> {
        match self {
            Value::None => Cow::Borrowed("NoneType"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Int(_) => Cow::Borrowed("int"),
            Value::Float(_) => Cow::Borrowed("float"),
            Value::Str(_) => Cow::Borrowed("str"),
            Value::Bytes(_) => Cow::Borrowed("bytes"),
            Value::List(_) => Cow::Borrowed("list"),
            Value::Tuple(_) => Cow::Borrowed("tuple"),
            Value::Dict(_) => Cow::Borrowed("dict"),
            Value::Module { .. } => Cow::Borrowed("module"),
            Value::Object { type_name, .. } => Cow::Borrowed(type_name.as_str()),
            Value::Function(_) => Cow::Borrowed("function"),
            Value::Type(_) => Cow::Borrowed("type"),
        }
    }

    fn summary(&self) -> String {
        self.repr()
    }

    fn is_expandable(&self) -> bool {
        self.kind() != crate::model::ValueKind::Primitive
    }

    fn list_attributes(&self) -> Vec<Attribute<'_>> {
        match self {
            Value::List(items) | Value::Tuple(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Attribute::public(format!("[{i}]"), item))
                .collect(),
            Value::Dict(entries) => entries
                .iter()
                .map(|(key, value)| Attribute::public(key.repr(), value))
                .collect(),
            Value::Module { attrs, .. } => attrs
                .iter()
                .map(|(name, value)| Attribute::named(name, value))
                .collect(),
            Value::Object { attrs, .. } => {
                let mut attributes: Vec<Attribute<'_>> = attrs
                    .iter()
                    .map(|(name, value)| Attribute::named(name, value))
                    .collect();
                attributes.sort_by(|a, b| a.name.cmp(&b.name));
                attributes
            }
            _ => Vec::new(),
        }
    }

    fn child_unit(&self) -> ChildUnit {
        match self {
            Value::Module { .. } | Value::Object { .. } => ChildUnit::Attributes,
            _ => ChildUnit::Items,
        }
    }

    fn visible_count(&self, filter: AttributeFilter) -> usize {
        match self {
            Value::List(items) | Value::Tuple(items) => items.len(),
            Value::Dict(entries) => entries.len(),
            Value::Module { attrs, .. } | Value::Object { attrs, .. } => attrs
                .iter()
                .filter(|(name, _)| filter.admits_name(name))
                .count(),
            _ => 0,
        }
    }

    // Sequences and dicts are indexed directly; only the window gets names.
    fn visible_window(&self, filter: AttributeFilter, range: Range<usize>) -> Vec<Attribute<'_>> {
        match self {
            Value::List(items) | Value::Tuple(items) => {
                let range = clamp(range, items.len());
                let start = range.start;
                items[range]
                    .iter()
                    .enumerate()
                    .map(|(offset, item)| Attribute::public(format!("[{}]", start + offset), item))
                    .collect()
            }
            Value::Dict(entries) => entries[clamp(range, entries.len())]
                .iter()
                .map(|(key, value)| Attribute::public(key.repr(), value))
                .collect(),
            Value::Module { attrs, .. } => attrs
                .iter()
                .filter(|(name, _)| filter.admits_name(name))
                .skip(range.start)
                .take(range.len())
                .map(|(name, value)| Attribute::named(name, value))
                .collect(),
            _ => window(self.visible_attributes(filter), range),
        }
    }
}

// ===== Tests =====
