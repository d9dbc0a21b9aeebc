//! Structural deep merge over JSON-like prop trees.
//!
//! [`DeepMerger`] merges [`serde_json::Value`] trees key-by-key with the
//! right-most source winning scalar conflicts. Array fields are combined by
//! a pluggable [`ArrayMergeStrategy`]; the built-in [`ConcatFlattenFilter`]
//! concatenates, flattens nested arrays, and drops falsy elements. This is
//! the array analogue of [`cx()`](crate::cx())'s filtering, except element types
//! are preserved instead of being joined into a string.
//!
//! ```
//! use horizon_variance::px;
//! use serde_json::json;
//!
//! let merged = px([json!({ "a": [1, 2] }), json!({ "a": [0, 3] })]);
//! assert_eq!(merged, json!({ "a": [1, 2, 3] }));
//! ```

use serde_json::Value;

/// Truthiness of a JSON value under the general falsy rule: `null`, `false`,
/// numeric zero, and the empty string are falsy; arrays and objects (even
/// empty ones) are truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strategy for combining two array fields during a merge.
pub trait ArrayMergeStrategy {
    /// Combine `target` (earlier source) with `source` (later source).
    fn merge_arrays(&self, target: Vec<Value>, source: Vec<Value>) -> Vec<Value>;
}

/// The built-in strategy: concatenate in argument order, flatten nested
/// arrays to a single level, drop falsy elements. Non-falsy duplicates are
/// kept and element order is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatFlattenFilter;

impl ArrayMergeStrategy for ConcatFlattenFilter {
    fn merge_arrays(&self, target: Vec<Value>, source: Vec<Value>) -> Vec<Value> {
        let mut out = Vec::with_capacity(target.len() + source.len());
        for value in target.into_iter().chain(source) {
            flatten_into(&mut out, value);
        }
        out
    }
}

fn flatten_into(out: &mut Vec<Value>, value: Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(out, item);
            }
        }
        other if is_truthy(&other) => out.push(other),
        _ => {}
    }
}

/// Recursive structural merge with a pluggable array strategy.
///
/// Pure: sources are consumed by value and a fresh tree is returned.
#[derive(Debug, Clone, Default)]
pub struct DeepMerger<S = ConcatFlattenFilter> {
    strategy: S,
}

impl DeepMerger {
    /// Create a merger with the default [`ConcatFlattenFilter`] strategy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ArrayMergeStrategy> DeepMerger<S> {
    /// Create a merger with a custom array strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Merge `source` onto `target`, the source winning scalar conflicts.
    pub fn merge(&self, target: Value, source: Value) -> Value {
        match (target, source) {
            (Value::Object(mut target), Value::Object(source)) => {
                for (key, incoming) in source {
                    let merged = match target.remove(&key) {
                        Some(existing) => self.merge(existing, incoming),
                        None => incoming,
                    };
                    target.insert(key, merged);
                }
                Value::Object(target)
            }
            (Value::Array(target), Value::Array(source)) => {
                Value::Array(self.strategy.merge_arrays(target, source))
            }
            (_, source) => source,
        }
    }

    /// Merge any number of values, left to right.
    pub fn merge_all<I: IntoIterator<Item = Value>>(&self, values: I) -> Value {
        values
            .into_iter()
            .fold(Value::Null, |acc, value| self.merge(acc, value))
    }
}

/// Merge any number of prop trees with the default strategy.
pub fn px<I: IntoIterator<Item = Value>>(values: I) -> Value {
    DeepMerger::new().merge_all(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn right_most_scalar_wins() {
        let merged = px([json!({ "a": 1, "b": 2 }), json!({ "b": 3 })]);
        assert_eq!(merged, json!({ "a": 1, "b": 3 }));
    }

    #[test]
    fn objects_merge_recursively() {
        let merged = px([
            json!({ "style": { "color": "red", "margin": 4 } }),
            json!({ "style": { "color": "blue" } }),
        ]);
        assert_eq!(merged, json!({ "style": { "color": "blue", "margin": 4 } }));
    }

    #[test]
    fn arrays_concat_flatten_and_filter() {
        let merged = px([json!({ "a": [1, 2] }), json!({ "a": [0, 3] })]);
        assert_eq!(merged, json!({ "a": [1, 2, 3] }));
    }

    #[test]
    fn nested_arrays_flatten_fully() {
        let merged = px([json!({ "a": [[1, [2]]] }), json!({ "a": [[3]] })]);
        assert_eq!(merged, json!({ "a": [1, 2, 3] }));
    }

    #[test]
    fn falsy_array_elements_drop_but_duplicates_stay() {
        let merged = px([
            json!({ "a": ["x", "", false] }),
            json!({ "a": [null, "x"] }),
        ]);
        assert_eq!(merged, json!({ "a": ["x", "x"] }));
    }

    #[test]
    fn empty_containers_are_truthy_elements() {
        let merged = px([json!({ "a": [[], {}] }), json!({ "a": [] })]);
        // The inner empty array flattens away; the empty object survives.
        assert_eq!(merged, json!({ "a": [{}] }));
    }

    #[test]
    fn type_conflict_replaces() {
        let merged = px([json!({ "a": { "x": 1 } }), json!({ "a": 5 })]);
        assert_eq!(merged, json!({ "a": 5 }));
    }

    #[test]
    fn non_conflicting_keys_carry_through() {
        let merged = px([json!({ "a": 1 }), json!({ "b": 2 }), json!({ "c": 3 })]);
        assert_eq!(merged, json!({ "a": 1, "b": 2, "c": 3 }));
    }

    #[test]
    fn merge_of_nothing_is_null() {
        assert_eq!(px([]), Value::Null);
    }

    #[test]
    fn custom_strategy_replaces_arrays() {
        struct Replace;
        impl ArrayMergeStrategy for Replace {
            fn merge_arrays(&self, _target: Vec<Value>, source: Vec<Value>) -> Vec<Value> {
                source
            }
        }

        let merger = DeepMerger::with_strategy(Replace);
        let merged = merger.merge(json!({ "a": [1, 2] }), json!({ "a": [3] }));
        assert_eq!(merged, json!({ "a": [3] }));
    }
}
