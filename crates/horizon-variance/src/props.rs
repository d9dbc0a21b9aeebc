//! The prop-tree variant resolver.
//!
//! [`PropVariants`] mirrors [`ClassVariants`](crate::ClassVariants) with
//! structured payloads: variant contributions are [`serde_json::Value`]
//! trees combined by [`DeepMerger`](crate::DeepMerger) instead of strings
//! joined by [`cx()`](crate::cx()).
//!
//! ```
//! use horizon_variance::{PropSelection, PropVariants};
//! use serde_json::json;
//!
//! let field = PropVariants::new(json!({ "spellcheck": false }))
//!     .variant("size", [
//!         ("sm", json!({ "style": { "fontSize": 12 } })),
//!         ("lg", json!({ "style": { "fontSize": 16 } })),
//!     ])
//!     .default_variant("size", "sm");
//!
//! let props = field.resolve(&PropSelection::new().with("size", "lg"));
//! assert_eq!(props, json!({ "spellcheck": false, "style": { "fontSize": 16 } }));
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::merge::DeepMerger;
use crate::selection::{Choice, PropSelection, VariantKey, conditions_met, lookup_key};

#[derive(Debug, Clone)]
struct PropAxis {
    name: String,
    values: HashMap<VariantKey, Value>,
}

/// An override rule emitting a prop tree when several axis choices jointly
/// match.
#[derive(Debug, Clone, Default)]
pub struct CompoundProps {
    conditions: Vec<(String, Choice)>,
    props: Value,
}

impl CompoundProps {
    /// Create a rule with no conditions (such a rule always fires).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an axis to resolve to `key`.
    pub fn when(mut self, axis: impl Into<String>, key: impl Into<VariantKey>) -> Self {
        self.conditions.push((axis.into(), Choice::Key(key.into())));
        self
    }

    /// Require an axis to be explicitly opted out.
    pub fn when_cleared(mut self, axis: impl Into<String>) -> Self {
        self.conditions.push((axis.into(), Choice::Cleared));
        self
    }

    /// The prop tree merged in when the rule fires.
    pub fn props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }
}

/// The variant resolution engine for prop trees.
///
/// Resolution semantics match [`ClassVariants`](crate::ClassVariants); only
/// the combination step differs (deep merge instead of flatten-join).
#[derive(Debug, Clone, Default)]
pub struct PropVariants {
    base: Value,
    variants: Option<Vec<PropAxis>>,
    defaults: HashMap<String, VariantKey>,
    compounds: Vec<CompoundProps>,
}

impl PropVariants {
    /// Create an engine with a base prop tree and no variants.
    ///
    /// Until a variant axis is added the engine is in passthrough mode:
    /// [`resolve`](Self::resolve) returns the base merged with the
    /// selection's extra props.
    pub fn new(base: Value) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Add (or extend) a variant axis of prop payloads.
    pub fn variant<N, I, K>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
        K: Into<VariantKey>,
    {
        let name = name.into();
        let entries = values.into_iter().map(|(k, v)| (k.into(), v));
        let axes = self.variants.get_or_insert_with(Vec::new);
        match axes.iter_mut().find(|axis| axis.name == name) {
            Some(axis) => axis.values.extend(entries),
            None => axes.push(PropAxis {
                name,
                values: entries.collect(),
            }),
        }
        self
    }

    /// Set the default key for an axis, used when the caller omits it.
    pub fn default_variant(mut self, axis: impl Into<String>, key: impl Into<VariantKey>) -> Self {
        self.defaults.insert(axis.into(), key.into());
        self
    }

    /// Append a compound rule.
    pub fn compound(mut self, rule: CompoundProps) -> Self {
        self.compounds.push(rule);
        self
    }

    /// Resolve a selection into one merged prop tree.
    ///
    /// Merge order: base, per-axis contributions in axis order, fired
    /// compound payloads in rule order, then the selection's extra props.
    /// Returns `Value::Null` when nothing contributes. Never fails.
    pub fn resolve(&self, selection: &PropSelection) -> Value {
        let merger = DeepMerger::new();
        let mut out = self.base.clone();

        if let Some(axes) = &self.variants {
            for axis in axes {
                let Some(key) = lookup_key(&axis.name, &selection.choices, &self.defaults) else {
                    continue;
                };
                match axis.values.get(key) {
                    Some(payload) => out = merger.merge(out, payload.clone()),
                    None => tracing::debug!("No '{}' entry for variant '{}'", key, axis.name),
                }
            }

            for rule in &self.compounds {
                if conditions_met(&rule.conditions, &selection.choices, &self.defaults) {
                    out = merger.merge(out, rule.props.clone());
                }
            }
        }

        if let Some(extra) = &selection.props {
            out = merger.merge(out, extra.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_engine() -> PropVariants {
        PropVariants::new(json!({ "role": "textbox", "style": { "margin": 4 } }))
            .variant(
                "size",
                [
                    ("sm", json!({ "style": { "fontSize": 12 } })),
                    ("lg", json!({ "style": { "fontSize": 16 } })),
                ],
            )
            .variant("tone", [("danger", json!({ "aria-invalid": true }))])
            .default_variant("size", "sm")
    }

    #[test]
    fn defaults_apply_when_axis_omitted() {
        let props = field_engine().resolve(&PropSelection::new());
        assert_eq!(
            props,
            json!({ "role": "textbox", "style": { "margin": 4, "fontSize": 12 } })
        );
    }

    #[test]
    fn contributions_merge_in_axis_order() {
        let props = field_engine().resolve(
            &PropSelection::new()
                .with("size", "lg")
                .with("tone", "danger"),
        );
        assert_eq!(
            props,
            json!({
                "role": "textbox",
                "style": { "margin": 4, "fontSize": 16 },
                "aria-invalid": true,
            })
        );
    }

    #[test]
    fn cleared_axis_contributes_nothing() {
        let props = field_engine().resolve(&PropSelection::new().clear("size"));
        assert_eq!(props, json!({ "role": "textbox", "style": { "margin": 4 } }));
    }

    #[test]
    fn compound_props_merge_after_axes() {
        let engine = field_engine().compound(
            CompoundProps::new()
                .when("size", "lg")
                .when("tone", "danger")
                .props(json!({ "style": { "fontWeight": 700 } })),
        );
        let props = engine.resolve(
            &PropSelection::new()
                .with("size", "lg")
                .with("tone", "danger"),
        );
        assert_eq!(props["style"], json!({ "margin": 4, "fontSize": 16, "fontWeight": 700 }));
    }

    #[test]
    fn extra_props_merge_last_and_win() {
        let props = field_engine().resolve(
            &PropSelection::new().props(json!({ "style": { "margin": 8 } })),
        );
        assert_eq!(props["style"], json!({ "margin": 8, "fontSize": 12 }));
    }

    #[test]
    fn passthrough_merges_base_and_extra_props() {
        let engine = PropVariants::new(json!({ "a": [1, 2] }));
        let props = engine.resolve(&PropSelection::new().props(json!({ "a": [0, 3] })));
        assert_eq!(props, json!({ "a": [1, 2, 3] }));
    }

    #[test]
    fn passthrough_of_nothing_is_null() {
        let props = PropVariants::default().resolve(&PropSelection::new());
        assert_eq!(props, Value::Null);
    }

    #[test]
    fn unknown_key_is_silent() {
        let props = field_engine().resolve(&PropSelection::new().with("size", "xl"));
        assert_eq!(props, json!({ "role": "textbox", "style": { "margin": 4 } }));
    }
}
