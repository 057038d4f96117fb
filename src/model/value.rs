//! Captured variable values.
//!
//! A [`Value`] is an immutable snapshot of one variable as seen by the inspector:
//! primitives, ordered collections, and opaque references (modules, custom
//! objects) that expose named attributes.

use std::fmt::Write as _;

/// One captured value.
///
/// Dict entries, module attributes and object attributes keep the order they were
/// captured in; the inspector decides display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    None,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text string.
    Str(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Mutable sequence.
    List(Vec<Value>),
    /// Immutable sequence.
    Tuple(Vec<Value>),
    /// Ordered mapping with arbitrary keys.
    Dict(Vec<(Value, Value)>),
    /// Reference to a module and its attributes.
    Module {
        /// Module name, e.g. `test`.
        name: String,
        /// Module attributes in declaration order.
        attrs: Vec<(String, Value)>,
    },
    /// Instance of a user-defined type.
    Object {
        /// Name of the instance's type, e.g. `Person`.
        type_name: String,
        /// Instance attributes in capture order.
        attrs: Vec<(String, Value)>,
    },
    /// Callable; carries its name.
    Function(String),
    /// Class object; carries its name.
    Type(String),
}

/// Broad classification used for type names and expandability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Leaf values that have no children.
    Primitive,
    /// list, tuple, dict.
    Collection,
    /// Modules and custom objects.
    Reference,
}

impl Value {
    /// Classify this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::List(_) | Value::Tuple(_) | Value::Dict(_) => ValueKind::Collection,
            Value::Module { .. } | Value::Object { .. } => ValueKind::Reference,
            _ => ValueKind::Primitive,
        }
    }

    /// Number of direct children (items, entries or attributes), hidden ones included.
    pub fn len(&self) -> usize {
        match self {
            Value::List(items) | Value::Tuple(items) => items.len(),
            Value::Dict(entries) => entries.len(),
            Value::Module { attrs, .. } | Value::Object { attrs, .. } => attrs.len(),
            _ => 0,
        }
    }

    /// True when [`Value::len`] is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a list of consecutive integers `start..stop`.
    pub fn int_range(start: i64, stop: i64) -> Value {
        Value::List((start..stop).map(Value::Int).collect())
    }

    /// Render a value the way it is written as a dict key or inline literal.
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(x) => float_repr(*x),
            Value::Str(s) => format!("'{s}'"),
            Value::Bytes(b) => bytes_repr(b),
            Value::List(items) => format!("[...] ({} items)", items.len()),
            Value::Tuple(items) => format!("(...) ({} items)", items.len()),
            Value::Dict(entries) => format!("{{...}} ({} items)", entries.len()),
            Value::Module { name, .. } => format!("<module '{name}'>"),
            Value::Object { type_name, .. } => format!("<{type_name} object>"),
            Value::Function(name) => format!("<function {name}>"),
            Value::Type(name) => format!("<class '{name}'>"),
        }
    }
}

/// Shortest round-trip float text that still reads as a float (`1.0`, not `1`).
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    format!("{x:?}")
}

fn bytes_repr(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b'");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push('\'');
    out
}

// ===== Tests =====
