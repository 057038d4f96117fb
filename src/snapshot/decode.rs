//! JSON encoding of captured values.
//!
//! Plain JSON maps onto the obvious values:
//!
//! | JSON | Value |
//! |---|---|
//! | `null` | `None` |
//! | `true` / `false` | `Bool` |
//! | integer | `Int` |
//! | other number | `Float` |
//! | string | `Str` |
//! | array | `List` |
//! | object | `Dict` with string keys |
//!
//! A single-key object whose key starts with `$` is a tagged value instead:
//!
//! | Tag | Payload |
//! |---|---|
//! | `$tuple` | array of values |
//! | `$dict` | array of `[key, value]` pairs |
//! | `$module` | `{"name": str, "attrs": {...}}` |
//! | `$object` | `{"type": str, "attrs": {...}}` |
//! | `$function` | name |
//! | `$type` | name |
//! | `$bytes` | string, stored as its UTF-8 bytes |
//! | `$range` | `[stop]` or `[start, stop]`, a list of ints |
//! | `$repeat` | `{"value": v, "count": n}`, a list of `n` copies |

use crate::model::{SnapshotError, Value};
use serde_json::{Map, Value as Json};

/// Upper bound on the number of values `$range` and `$repeat` may create in
/// one document, nested expansions included.
pub const MAX_GENERATED_ITEMS: u64 = 1_000_000;

/// Decode the variable table of one scope (a JSON object of name → value).
///
/// Uses a fresh generated-item budget; see [`Decoder`] to share one.
pub fn decode_scope(json: &Json, path: &str) -> Result<Vec<(String, Value)>, SnapshotError> {
    Decoder::new().scope(json, path)
}

/// Decode one value.
///
/// `path` is used in error messages only.
pub fn decode_value(json: &Json, path: &str) -> Result<Value, SnapshotError> {
    Decoder::new().value(json, path)
}

/// Value decoder that tracks how many values `$range` and `$repeat` have
/// created so far.
#[derive(Debug, Default)]
pub struct Decoder {
    generated: u64,
}

impl Decoder {
    /// Decoder with an untouched budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values created by expansion tags so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Decode the variable table of one scope.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidValue`] for a non-object table, a bad
    /// value, or an exhausted budget.
    pub fn scope(&mut self, json: &Json, path: &str) -> Result<Vec<(String, Value)>, SnapshotError> {
        let object = json
            .as_object()
            .ok_or_else(|| invalid(path, "expected an object of variables"))?;
        self.attrs(object, path)
    }

    /// Decode one value.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidValue`] for an unknown tag, a malformed
    /// payload, or an exhausted budget.
    pub fn value(&mut self, json: &Json, path: &str) -> Result<Value, SnapshotError> {
        match json {
            Json::Null => Ok(Value::None),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| invalid(path, "unrepresentable number")),
            },
            Json::String(s) => Ok(Value::Str(s.clone())),
            Json::Array(items) => self.items(items, path).map(Value::List),
            Json::Object(object) => match tagged(object) {
                Some((tag, payload)) => self.tagged_value(tag, payload, &format!("{path}/{tag}")),
                None => object
                    .iter()
                    .map(|(key, value)| {
                        self.value(value, &format!("{path}/{key}"))
                            .map(|value| (Value::Str(key.clone()), value))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Dict),
            },
        }
    }

    fn tagged_value(&mut self, tag: &str, payload: &Json, path: &str) -> Result<Value, SnapshotError> {
        match tag {
            "$tuple" => {
                let items = payload
                    .as_array()
                    .ok_or_else(|| invalid(path, "expected an array"))?;
                self.items(items, path).map(Value::Tuple)
            }
            "$dict" => self.pairs(payload, path).map(Value::Dict),
            "$module" => {
                let body = payload
                    .as_object()
                    .ok_or_else(|| invalid(path, "expected an object"))?;
                Ok(Value::Module {
                    name: required_str(body, "name", path)?,
                    attrs: self.optional_attrs(body, path)?,
                })
            }
            "$object" => {
                let body = payload
                    .as_object()
                    .ok_or_else(|| invalid(path, "expected an object"))?;
                Ok(Value::Object {
                    type_name: required_str(body, "type", path)?,
                    attrs: self.optional_attrs(body, path)?,
                })
            }
            "$function" => name_payload(payload, path).map(Value::Function),
            "$type" => name_payload(payload, path).map(Value::Type),
            "$bytes" => name_payload(payload, path).map(|s| Value::Bytes(s.into_bytes())),
            "$range" => self.range(payload, path),
            "$repeat" => self.repeat(payload, path),
            other => Err(invalid(path, &format!("unknown tag '{other}'"))),
        }
    }

    fn items(&mut self, items: &[Json], path: &str) -> Result<Vec<Value>, SnapshotError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.value(item, &format!("{path}/{i}")))
            .collect()
    }

    fn attrs(
        &mut self,
        object: &Map<String, Json>,
        path: &str,
    ) -> Result<Vec<(String, Value)>, SnapshotError> {
        object
            .iter()
            .map(|(name, value)| {
                self.value(value, &format!("{path}/{name}"))
                    .map(|value| (name.clone(), value))
            })
            .collect()
    }

    fn pairs(&mut self, payload: &Json, path: &str) -> Result<Vec<(Value, Value)>, SnapshotError> {
        let pairs = payload
            .as_array()
            .ok_or_else(|| invalid(path, "expected an array of [key, value] pairs"))?;
        pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let entry_path = format!("{path}/{i}");
                match pair.as_array().map(Vec::as_slice) {
                    Some([key, value]) => Ok((
                        self.value(key, &format!("{entry_path}/0"))?,
                        self.value(value, &format!("{entry_path}/1"))?,
                    )),
                    _ => Err(invalid(&entry_path, "expected a [key, value] pair")),
                }
            })
            .collect()
    }

    fn optional_attrs(
        &mut self,
        body: &Map<String, Json>,
        path: &str,
    ) -> Result<Vec<(String, Value)>, SnapshotError> {
        match body.get("attrs") {
            None => Ok(Vec::new()),
            Some(attrs) => self.scope(attrs, &format!("{path}/attrs")),
        }
    }

    fn range(&mut self, payload: &Json, path: &str) -> Result<Value, SnapshotError> {
        let bounds: Vec<i64> = payload
            .as_array()
            .and_then(|items| items.iter().map(Json::as_i64).collect())
            .ok_or_else(|| invalid(path, "expected [stop] or [start, stop] integers"))?;
        let (start, stop) = match bounds.as_slice() {
            [stop] => (0, *stop),
            [start, stop] => (*start, *stop),
            _ => return Err(invalid(path, "expected [stop] or [start, stop] integers")),
        };
        let count = u64::try_from(i128::from(stop) - i128::from(start)).unwrap_or(0);
        self.charge(count, path)?;
        Ok(Value::int_range(start, stop.max(start)))
    }

    /// `count` copies of the value cost `count` times its node count, so nested
    /// repeats multiply.
    fn repeat(&mut self, payload: &Json, path: &str) -> Result<Value, SnapshotError> {
        let body = payload
            .as_object()
            .ok_or_else(|| invalid(path, "expected {\"value\": ..., \"count\": n}"))?;
        let value = body
            .get("value")
            .ok_or_else(|| invalid(path, "missing 'value'"))?;
        let count = body
            .get("count")
            .and_then(Json::as_u64)
            .ok_or_else(|| invalid(path, "missing or negative 'count'"))?;
        let item = self.value(value, &format!("{path}/value"))?;
        self.charge(count.saturating_mul(node_count(&item)), path)?;
        let copies = usize::try_from(count).map_err(|_| invalid(path, "count too large"))?;
        Ok(Value::List(vec![item; copies]))
    }

    fn charge(&mut self, count: u64, path: &str) -> Result<(), SnapshotError> {
        let total = self.generated.saturating_add(count);
        if total > MAX_GENERATED_ITEMS {
            return Err(invalid(
                path,
                &format!("expands to {total} items in total, limit is {MAX_GENERATED_ITEMS}"),
            ));
        }
        self.generated = total;
        Ok(())
    }
}

/// Number of values in `value`, itself included.
fn node_count(value: &Value) -> u64 {
    let nested: u64 = match value {
        Value::List(items) | Value::Tuple(items) => items.iter().map(node_count).sum(),
        Value::Dict(entries) => entries
            .iter()
            .map(|(key, value)| node_count(key) + node_count(value))
            .sum(),
        Value::Module { attrs, .. } | Value::Object { attrs, .. } => {
            attrs.iter().map(|(_, value)| node_count(value)).sum()
        }
        _ => 0,
    };
    1 + nested
}

fn tagged(object: &Map<String, Json>) -> Option<(&str, &Json)> {
    if object.len() != 1 {
        return None;
    }
    object
        .iter()
        .next()
        .filter(|(key, _)| key.starts_with('$'))
        .map(|(key, value)| (key.as_str(), value))
}

fn required_str(body: &Map<String, Json>, key: &str, path: &str) -> Result<String, SnapshotError> {
    body.get(key)
        .and_then(Json::as_str)
        .map(str::to_string)
        .ok_or_else(|| invalid(path, &format!("missing string '{key}'")))
}

fn name_payload(payload: &Json, path: &str) -> Result<String, SnapshotError> {
    payload
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(path, "expected a string"))
}

fn invalid(path: &str, reason: &str) -> SnapshotError {
    SnapshotError::InvalidValue {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(json: Json) -> Value {
        decode_value(&json, "").unwrap()
    }

    #[test]
    fn plain_json_maps_to_values() {
        assert_eq!(decode(json!(null)), Value::None);
        assert_eq!(decode(json!(true)), Value::Bool(true));
        assert_eq!(decode(json!(42)), Value::Int(42));
        assert_eq!(decode(json!(1.5)), Value::Float(1.5));
        assert_eq!(decode(json!("hi")), Value::Str("hi".into()));
        assert_eq!(
            decode(json!([1, "a"])),
            Value::List(vec![Value::Int(1), Value::Str("a".into())])
        );
    }

    #[test]
    fn object_becomes_dict_in_key_order() {
        let value = decode(json!({"name": "Alice", "age": 25, "city": "Beijing"}));
        let Value::Dict(entries) = value else {
            panic!("expected dict");
        };
        let keys: Vec<String> = entries.iter().map(|(k, _)| k.repr()).collect();
        assert_eq!(keys, ["'name'", "'age'", "'city'"]);
    }

    #[test]
    fn tuple_tag() {
        assert_eq!(
            decode(json!({"$tuple": [10, 20]})),
            Value::Tuple(vec![Value::Int(10), Value::Int(20)])
        );
    }

    #[test]
    fn dict_tag_allows_non_string_keys() {
        assert_eq!(
            decode(json!({"$dict": [[1, "one"], [null, 0]]})),
            Value::Dict(vec![
                (Value::Int(1), Value::Str("one".into())),
                (Value::None, Value::Int(0)),
            ])
        );
    }

    #[test]
    fn module_and_object_tags() {
        let module = decode(json!({"$module": {"name": "test", "attrs": {"pi": 3.5}}}));
        assert_eq!(
            module,
            Value::Module {
                name: "test".into(),
                attrs: vec![("pi".into(), Value::Float(3.5))],
            }
        );

        let object = decode(json!({"$object": {"type": "Point"}}));
        assert_eq!(
            object,
            Value::Object {
                type_name: "Point".into(),
                attrs: vec![],
            }
        );
    }

    #[test]
    fn function_type_and_bytes_tags() {
        assert_eq!(decode(json!({"$function": "add"})), Value::Function("add".into()));
        assert_eq!(decode(json!({"$type": "Person"})), Value::Type("Person".into()));
        assert_eq!(decode(json!({"$bytes": "ab"})), Value::Bytes(b"ab".to_vec()));
    }

    #[test]
    fn range_tag_with_stop_only() {
        assert_eq!(decode(json!({"$range": [3]})), Value::int_range(0, 3));
    }

    #[test]
    fn range_tag_with_start_and_stop() {
        assert_eq!(decode(json!({"$range": [5, 8]})), Value::int_range(5, 8));
    }

    #[test]
    fn reversed_range_is_empty() {
        assert_eq!(decode(json!({"$range": [8, 5]})), Value::List(vec![]));
    }

    #[test]
    fn repeat_tag_copies_value() {
        let value = decode(json!({"$repeat": {"value": {"$function": "f"}, "count": 3}}));
        assert_eq!(value, Value::List(vec![Value::Function("f".into()); 3]));
    }

    #[test]
    fn oversized_range_is_rejected() {
        let err = decode_value(&json!({"$range": [2_000_000]}), "/x").unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidValue { ref path, .. } if path == "/x/$range"));
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn range_at_the_limit_is_accepted() {
        let mut decoder = Decoder::new();
        let value = decoder
            .value(&json!({"$range": [5, 1_000_005]}), "")
            .unwrap();
        assert_eq!(value.len(), 1_000_000);
        assert_eq!(decoder.generated(), MAX_GENERATED_ITEMS);
    }

    #[test]
    fn nested_repeat_counts_every_copy() {
        let nested = json!({"$repeat": {"value": {"$repeat": {"value": 1, "count": 1000}}, "count": 5000}});
        let err = decode_value(&nested, "").unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn small_nested_repeat_is_charged_by_node_count() {
        let nested = json!({"$repeat": {"value": {"$repeat": {"value": 1, "count": 10}}, "count": 20}});
        let mut decoder = Decoder::new();
        let value = decoder.value(&nested, "").unwrap();
        assert_eq!(value.len(), 20);
        // 10 for the inner list, then 20 copies of an 11-node list.
        assert_eq!(decoder.generated(), 10 + 20 * 11);
    }

    #[test]
    fn sibling_expansions_share_the_budget() {
        let scope = json!({
            "a": {"$range": [600_000]},
            "b": {"$repeat": {"value": 0, "count": 600_000}},
        });
        let err = decode_scope(&scope, "/locals").unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidValue { ref path, .. } if path == "/locals/b/$repeat"));
    }

    #[test]
    fn oversized_repeat_is_rejected() {
        let err = decode_value(&json!({"$repeat": {"value": 1, "count": 2_000_000}}), "/x")
            .unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn unknown_tag_reports_path() {
        let err = decode_value(&json!({"a": {"$nope": 1}}), "/locals/v").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value at /locals/v/a/$nope: unknown tag '$nope'"
        );
    }

    #[test]
    fn dollar_key_in_larger_object_is_plain_dict() {
        let value = decode(json!({"$tuple": [1], "other": 2}));
        assert!(matches!(value, Value::Dict(entries) if entries.len() == 2));
    }

    #[test]
    fn malformed_dict_pair_is_rejected() {
        let err = decode_value(&json!({"$dict": [[1]]}), "").unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidValue { .. }));
    }

    #[test]
    fn module_requires_name() {
        let err = decode_value(&json!({"$module": {"attrs": {}}}), "").unwrap_err();
        assert!(err.to_string().contains("missing string 'name'"));
    }
}
