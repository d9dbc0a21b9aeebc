//! The class-string variant resolver.
//!
//! [`ClassVariants`] holds a base value, named variant axes, per-axis
//! defaults, and compound rules, and resolves a caller's [`Selection`] into
//! one flattened class string:
//!
//! ```
//! use horizon_variance::{ClassVariants, CompoundRule, Selection};
//!
//! let button = ClassVariants::new("btn")
//!     .variant("size", [("sm", "text-sm"), ("lg", "text-lg")])
//!     .variant("color", [("red", "text-red")])
//!     .default_variant("size", "sm")
//!     .compound(
//!         CompoundRule::new()
//!             .when("size", "lg")
//!             .when("color", "red")
//!             .class("shadow-lg"),
//!     );
//!
//! let classes = button.resolve(&Selection::new().with("size", "lg").with("color", "red"));
//! assert_eq!(classes, "btn text-lg text-red shadow-lg");
//! ```

use std::collections::HashMap;

use crate::class_value::ClassValue;
use crate::selection::{Choice, Selection, VariantKey, conditions_met, lookup_key};

/// One named variant axis: a closed set of keys, each mapping to the classes
/// it contributes.
#[derive(Debug, Clone)]
pub(crate) struct Axis {
    pub(crate) name: String,
    pub(crate) values: HashMap<VariantKey, ClassValue>,
}

/// An override rule that fires only when several axis choices jointly match
/// the effective selection.
#[derive(Debug, Clone, Default)]
pub struct CompoundRule {
    conditions: Vec<(String, Choice)>,
    class: ClassValue,
    class_name: ClassValue,
}

impl CompoundRule {
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

    /// Classes emitted when the rule fires.
    pub fn class(mut self, value: impl Into<ClassValue>) -> Self {
        self.class = value.into();
        self
    }

    /// Second payload slot, emitted after `class`.
    pub fn class_name(mut self, value: impl Into<ClassValue>) -> Self {
        self.class_name = value.into();
        self
    }
}

/// The variant resolution engine for class strings.
///
/// Immutable once built; resolution is a pure function of the engine and the
/// selection, so one engine may be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ClassVariants {
    pub(crate) base: ClassValue,
    pub(crate) variants: Option<Vec<Axis>>,
    pub(crate) defaults: HashMap<String, VariantKey>,
    pub(crate) compounds: Vec<CompoundRule>,
}

impl ClassVariants {
    /// Create an engine with a base value and no variants.
    ///
    /// Until a variant axis is added the engine is in passthrough mode:
    /// [`resolve`](Self::resolve) returns the base plus the selection's
    /// `class` / `class_name` values, ignoring defaults and compound rules.
    pub fn new(base: impl Into<ClassValue>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// Add (or extend) a variant axis.
    ///
    /// Axes contribute to the resolved string in the order they were first
    /// added. Adding an axis that already exists extends its value table,
    /// with later entries overwriting earlier ones for the same key.
    pub fn variant<N, I, K, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<VariantKey>,
        V: Into<ClassValue>,
    {
        let name = name.into();
        let entries = values.into_iter().map(|(k, v)| (k.into(), v.into()));
        let axes = self.variants.get_or_insert_with(Vec::new);
        match axes.iter_mut().find(|axis| axis.name == name) {
            Some(axis) => axis.values.extend(entries),
            None => axes.push(Axis {
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

    /// Append a compound rule. Rules are checked in insertion order and
    /// every firing rule contributes its payload.
    pub fn compound(mut self, rule: CompoundRule) -> Self {
        self.compounds.push(rule);
        self
    }

    /// Resolve a selection into a single class string.
    ///
    /// Output order: base, per-axis contributions in axis order, fired
    /// compound payloads in rule order, then the selection's `class` and
    /// `class_name`. Resolution never fails: unknown axes in the selection
    /// are ignored and unknown keys contribute nothing.
    pub fn resolve(&self, selection: &Selection) -> String {
        let mut out = String::new();
        self.base.join_into(&mut out);

        if let Some(axes) = &self.variants {
            for axis in axes {
                let Some(key) = lookup_key(&axis.name, &selection.choices, &self.defaults) else {
                    continue;
                };
                match axis.values.get(key) {
                    Some(classes) => classes.join_into(&mut out),
                    None => tracing::debug!("No '{}' entry for variant '{}'", key, axis.name),
                }
            }

            for rule in &self.compounds {
                if conditions_met(&rule.conditions, &selection.choices, &self.defaults) {
                    rule.class.join_into(&mut out);
                    rule.class_name.join_into(&mut out);
                }
            }
        }

        selection.class.join_into(&mut out);
        selection.class_name.join_into(&mut out);
        out
    }
}
