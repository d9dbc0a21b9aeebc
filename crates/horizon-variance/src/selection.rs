//! Caller selections and canonical variant keys.
//!
//! Selections carry the caller's per-axis choices into a resolver. A choice
//! is either a [`VariantKey`] or an explicit opt-out ([`Choice::Cleared`]),
//! which is deliberately distinct from omitting the axis: omission falls
//! back to the axis default, an opt-out suppresses it.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::class_value::ClassValue;

/// Canonical lookup key for a variant axis.
///
/// Construction canonicalizes the source value so falsy-but-meaningful
/// selections stay distinguishable from "unset": booleans become `"true"` /
/// `"false"` and the number zero becomes `"0"`.
///
/// ```
/// use horizon_variance::VariantKey;
///
/// assert_eq!(VariantKey::from(false).as_str(), "false");
/// assert_eq!(VariantKey::from(0).as_str(), "0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey(String);

impl VariantKey {
    /// The canonical string form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty key counts as unset and falls back to the axis default.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariantKey {
    fn from(key: &str) -> Self {
        VariantKey(key.to_owned())
    }
}

impl From<String> for VariantKey {
    fn from(key: String) -> Self {
        VariantKey(key)
    }
}

impl From<bool> for VariantKey {
    fn from(key: bool) -> Self {
        VariantKey(if key { "true" } else { "false" }.to_owned())
    }
}

macro_rules! variant_key_from_number {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for VariantKey {
                fn from(key: $ty) -> Self {
                    VariantKey(key.to_string())
                }
            }
        )+
    };
}

variant_key_from_number!(i32, i64, u32, u64, f64);

/// An explicit per-axis choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Explicit opt-out: the axis contributes nothing and its default does
    /// not apply.
    Cleared,
    /// A chosen key.
    Key(VariantKey),
}

impl Choice {
    /// The chosen key, if any.
    pub fn key(&self) -> Option<&VariantKey> {
        match self {
            Choice::Key(key) => Some(key),
            Choice::Cleared => None,
        }
    }
}

/// A caller's selection for the class-string resolver.
///
/// Axes absent from the selection use their defaults; cleared axes do not.
/// The `class` / `class_name` passthrough values are appended verbatim at
/// the end of the resolved string, in that order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub(crate) choices: HashMap<String, Choice>,
    pub(crate) class: ClassValue,
    pub(crate) class_name: ClassValue,
}

impl Selection {
    /// Create an empty selection (every axis falls back to its default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a key for an axis.
    pub fn with(mut self, axis: impl Into<String>, key: impl Into<VariantKey>) -> Self {
        self.choices.insert(axis.into(), Choice::Key(key.into()));
        self
    }

    /// Explicitly opt out of an axis, suppressing its default.
    pub fn clear(mut self, axis: impl Into<String>) -> Self {
        self.choices.insert(axis.into(), Choice::Cleared);
        self
    }

    /// Extra classes appended after all variant contributions.
    pub fn class(mut self, value: impl Into<ClassValue>) -> Self {
        self.class = value.into();
        self
    }

    /// Alternate passthrough slot, appended after `class`.
    pub fn class_name(mut self, value: impl Into<ClassValue>) -> Self {
        self.class_name = value.into();
        self
    }
}

/// A caller's selection for the prop-tree resolver.
///
/// Mirrors [`Selection`], with an extra prop tree merged last instead of the
/// `class` / `class_name` passthrough.
#[derive(Debug, Clone, Default)]
pub struct PropSelection {
    pub(crate) choices: HashMap<String, Choice>,
    pub(crate) props: Option<Value>,
}

impl PropSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a key for an axis.
    pub fn with(mut self, axis: impl Into<String>, key: impl Into<VariantKey>) -> Self {
        self.choices.insert(axis.into(), Choice::Key(key.into()));
        self
    }

    /// Explicitly opt out of an axis, suppressing its default.
    pub fn clear(mut self, axis: impl Into<String>) -> Self {
        self.choices.insert(axis.into(), Choice::Cleared);
        self
    }

    /// Extra props merged after all variant contributions.
    pub fn props(mut self, props: Value) -> Self {
        self.props = Some(props);
        self
    }
}

/// Pick the lookup key for one axis: the caller's choice if present and
/// non-empty, otherwise the axis default. A cleared axis yields no key.
pub(crate) fn lookup_key<'a>(
    axis: &str,
    choices: &'a HashMap<String, Choice>,
    defaults: &'a HashMap<String, VariantKey>,
) -> Option<&'a VariantKey> {
    match choices.get(axis) {
        Some(Choice::Cleared) => None,
        Some(Choice::Key(key)) if !key.is_empty() => Some(key),
        _ => defaults.get(axis).filter(|key| !key.is_empty()),
    }
}

/// Check a compound rule's conditions against the effective selection
/// (defaults overlaid by explicit choices). Strict equality: a cleared
/// condition only matches a cleared choice, and an axis that is neither
/// chosen nor defaulted never matches.
pub(crate) fn conditions_met(
    conditions: &[(String, Choice)],
    choices: &HashMap<String, Choice>,
    defaults: &HashMap<String, VariantKey>,
) -> bool {
    conditions.iter().all(|(axis, expected)| match choices.get(axis) {
        Some(choice) => choice == expected,
        None => match (defaults.get(axis), expected) {
            (Some(default), Choice::Key(key)) => default == key,
            _ => false,
        },
    })
}
