//! Declarative JSON configuration for building [`ClassVariants`].
//!
//! The document shape is the one component authors already write by hand:
//!
//! ```json
//! {
//!   "base": "btn",
//!   "variants": {
//!     "size": { "sm": "btn-sm", "lg": ["btn-lg", "font-bold"] }
//!   },
//!   "defaultVariants": { "size": "sm" },
//!   "compoundVariants": [
//!     { "size": "lg", "color": "red", "class": "shadow-lg" }
//!   ]
//! }
//! ```
//!
//! Every entry of a `compoundVariants` rule other than `class` / `className`
//! is a condition; a `null` condition requires an explicit opt-out. Key
//! scalars canonicalize like [`VariantKey`] construction (`true` becomes
//! `"true"`, `0` becomes `"0"`). Axis and rule order follow document order.
//!
//! ```
//! use horizon_variance::{ClassVariants, Selection};
//!
//! let button = ClassVariants::from_json(r##"{
//!     "base": "btn",
//!     "variants": { "size": { "sm": "btn-sm", "lg": "btn-lg" } },
//!     "defaultVariants": { "size": "sm" }
//! }"##)?;
//!
//! assert_eq!(button.resolve(&Selection::new()), "btn btn-sm");
//! # Ok::<(), horizon_variance::Error>(())
//! ```

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::Value;

use crate::class_value::ClassValue;
use crate::error::{Error, Result};
use crate::selection::{Choice, VariantKey};
use crate::variants::{ClassVariants, CompoundRule};

impl ClassVariants {
    /// Build an engine from a JSON config document.
    ///
    /// Fails fast with [`Error::Parse`] on invalid JSON and
    /// [`Error::InvalidConfig`] on structurally malformed documents.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json).map_err(config_error)?;
        Ok(raw.build())
    }

    /// Build an engine from an already-parsed [`Value`].
    ///
    /// `Value` objects do not remember declaration order, so axis order
    /// follows the map's iteration order; prefer [`from_json`](Self::from_json)
    /// when the document text is available.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawConfig = serde_json::from_value(value).map_err(config_error)?;
        Ok(raw.build())
    }

    /// Load an engine from a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }
}

fn config_error(err: serde_json::Error) -> Error {
    match err.classify() {
        serde_json::error::Category::Data => Error::invalid_config(err.to_string()),
        _ => Error::parse(err.to_string()),
    }
}

/// Parsed document, prior to engine construction. Axis and rule order are
/// kept as encountered in the input.
#[derive(Default)]
struct RawConfig {
    base: ClassValue,
    variants: Option<Vec<(String, Vec<(VariantKey, ClassValue)>)>>,
    defaults: Vec<(String, Option<VariantKey>)>,
    compounds: Vec<RawCompound>,
}

impl RawConfig {
    fn build(self) -> ClassVariants {
        let mut engine = ClassVariants::new(self.base);

        if let Some(axes) = self.variants {
            // Materialize the table even when empty: an empty table is not
            // passthrough mode.
            engine.variants = Some(Vec::with_capacity(axes.len()));
            for (name, values) in axes {
                engine = engine.variant(name, values);
            }
        }

        for (axis, key) in self.defaults {
            let Some(key) = key else {
                tracing::warn!("Ignoring null default for variant '{}'", axis);
                continue;
            };
            if let Some(axes) = &engine.variants {
                if !axes.iter().any(|a| a.name == axis) {
                    tracing::warn!("Default for unknown variant '{}'", axis);
                }
            }
            engine = engine.default_variant(axis, key);
        }

        for raw in self.compounds {
            let mut rule = CompoundRule::new();
            for (axis, choice) in raw.conditions {
                rule = match choice {
                    Choice::Cleared => rule.when_cleared(axis),
                    Choice::Key(key) => rule.when(axis, key),
                };
            }
            engine = engine.compound(rule.class(raw.class).class_name(raw.class_name));
        }

        engine
    }
}

impl<'de> Deserialize<'de> for RawConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = RawConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a variant config object")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<RawConfig, A::Error> {
                let mut config = RawConfig::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "base" => config.base = map.next_value()?,
                        "variants" => config.variants = Some(map.next_value::<OrderedAxes>()?.0),
                        "defaultVariants" => {
                            config.defaults = map.next_value::<OrderedDefaults>()?.0;
                        }
                        "compoundVariants" => config.compounds = map.next_value()?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}

/// The `variants` table, in declaration order.
struct OrderedAxes(Vec<(String, Vec<(VariantKey, ClassValue)>)>);

impl<'de> Deserialize<'de> for OrderedAxes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AxesVisitor;

        impl<'de> Visitor<'de> for AxesVisitor {
            type Value = OrderedAxes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping variant names to value tables")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<OrderedAxes, A::Error> {
                let mut axes = Vec::new();
                while let Some(name) = map.next_key::<String>()? {
                    let table = map.next_value::<AxisTable>()?;
                    axes.push((name, table.0));
                }
                Ok(OrderedAxes(axes))
            }
        }

        deserializer.deserialize_map(AxesVisitor)
    }
}

/// One axis's key-to-classes table.
struct AxisTable(Vec<(VariantKey, ClassValue)>);

impl<'de> Deserialize<'de> for AxisTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = AxisTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping variant keys to class values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<AxisTable, A::Error> {
                let mut entries = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    let value = map.next_value::<ClassValue>()?;
                    entries.push((VariantKey::from(key), value));
                }
                Ok(AxisTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// The `defaultVariants` table. Null values are preserved here so the
/// builder can warn about them.
struct OrderedDefaults(Vec<(String, Option<VariantKey>)>);

impl<'de> Deserialize<'de> for OrderedDefaults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DefaultsVisitor;

        impl<'de> Visitor<'de> for DefaultsVisitor {
            type Value = OrderedDefaults;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping variant names to default keys")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<OrderedDefaults, A::Error> {
                let mut defaults = Vec::new();
                while let Some(name) = map.next_key::<String>()? {
                    let key = map.next_value::<DefaultKey>()?;
                    defaults.push((name, key.0));
                }
                Ok(OrderedDefaults(defaults))
            }
        }

        deserializer.deserialize_map(DefaultsVisitor)
    }
}

/// A single default key scalar.
struct DefaultKey(Option<VariantKey>);

impl<'de> Deserialize<'de> for DefaultKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = DefaultKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a variant key (string, boolean, or number) or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<DefaultKey, E> {
                Ok(DefaultKey(Some(VariantKey::from(v))))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<DefaultKey, E> {
                Ok(DefaultKey(Some(VariantKey::from(v))))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<DefaultKey, E> {
                Ok(DefaultKey(Some(VariantKey::from(v))))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<DefaultKey, E> {
                Ok(DefaultKey(Some(VariantKey::from(v))))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<DefaultKey, E> {
                Ok(DefaultKey(Some(VariantKey::from(v))))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<DefaultKey, E> {
                Ok(DefaultKey(None))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// A compound condition scalar: a required key, or null for an explicit
/// opt-out.
struct ConditionValue(Choice);

impl<'de> Deserialize<'de> for ConditionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ConditionVisitor;

        impl<'de> Visitor<'de> for ConditionVisitor {
            type Value = ConditionValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a condition key (string, boolean, or number) or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ConditionValue, E> {
                Ok(ConditionValue(Choice::Key(VariantKey::from(v))))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<ConditionValue, E> {
                Ok(ConditionValue(Choice::Key(VariantKey::from(v))))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ConditionValue, E> {
                Ok(ConditionValue(Choice::Key(VariantKey::from(v))))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ConditionValue, E> {
                Ok(ConditionValue(Choice::Key(VariantKey::from(v))))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<ConditionValue, E> {
                Ok(ConditionValue(Choice::Key(VariantKey::from(v))))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<ConditionValue, E> {
                Ok(ConditionValue(Choice::Cleared))
            }
        }

        deserializer.deserialize_any(ConditionVisitor)
    }
}

/// One `compoundVariants` rule: conditions plus `class` / `className`
/// payloads.
#[derive(Default)]
struct RawCompound {
    conditions: Vec<(String, Choice)>,
    class: ClassValue,
    class_name: ClassValue,
}

impl<'de> Deserialize<'de> for RawCompound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CompoundVisitor;

        impl<'de> Visitor<'de> for CompoundVisitor {
            type Value = RawCompound;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a compound variant rule object")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<RawCompound, A::Error> {
                let mut rule = RawCompound::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "class" => rule.class = map.next_value()?,
                        "className" => rule.class_name = map.next_value()?,
                        _ => {
                            let value = map.next_value::<ConditionValue>()?;
                            rule.conditions.push((key, value.0));
                        }
                    }
                }
                Ok(rule)
            }
        }

        deserializer.deserialize_map(CompoundVisitor)
    }
}

impl<'de> Deserialize<'de> for ClassValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ClassValueVisitor;

        impl<'de> Visitor<'de> for ClassValueVisitor {
            type Value = ClassValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a class value (string, number, boolean, null, or array)")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ClassValue, E> {
                Ok(ClassValue::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<ClassValue, E> {
                Ok(ClassValue::from(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<ClassValue, E> {
                Ok(if v {
                    ClassValue::Text("true".to_owned())
                } else {
                    ClassValue::Null
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ClassValue, E> {
                Ok(ClassValue::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ClassValue, E> {
                Ok(ClassValue::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<ClassValue, E> {
                Ok(ClassValue::from(v))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<ClassValue, E> {
                Ok(ClassValue::Null)
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<ClassValue, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<ClassValue>()? {
                    items.push(item);
                }
                Ok(ClassValue::List(items))
            }
        }

        deserializer.deserialize_any(ClassValueVisitor)
    }
}
