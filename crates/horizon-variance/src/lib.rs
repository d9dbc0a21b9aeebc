//! Variant-driven class name and prop composition.
//!
//! This crate gives UI component authors two small, pure engines:
//!
//! - **Class composition**: [`cx()`] / [`cx!`] flatten conditional class-name
//!   trees into one string, and [`ClassVariants`] resolves a base value plus
//!   named variant axes, defaults, and compound rules against a caller's
//!   [`Selection`].
//! - **Prop composition**: [`DeepMerger`] / [`px`] structurally merge
//!   JSON-like prop trees, and [`PropVariants`] runs the same variant
//!   resolution with merged trees instead of joined strings.
//!
//! Engines can be built programmatically or loaded from a JSON config
//! document (see the [`config`](crate::config) module docs for the format).
//!
//! # Example
//!
//! ```
//! use horizon_variance::prelude::*;
//!
//! let button = ClassVariants::new("btn")
//!     .variant("size", [("sm", "btn-sm"), ("lg", "btn-lg")])
//!     .variant("color", [("red", "btn-red")])
//!     .default_variant("size", "sm")
//!     .compound(
//!         CompoundRule::new()
//!             .when("size", "lg")
//!             .when("color", "red")
//!             .class("shadow-lg"),
//!     );
//!
//! assert_eq!(
//!     button.resolve(&Selection::new().with("color", "red")),
//!     "btn btn-sm btn-red"
//! );
//! assert_eq!(
//!     button.resolve(&Selection::new().with("size", "lg").with("color", "red")),
//!     "btn btn-lg btn-red shadow-lg"
//! );
//! ```
//!
//! Resolution never fails and touches no shared state; engines are immutable
//! once built and may be shared freely across threads.

pub mod class_value;
pub mod config;
pub mod merge;
pub mod props;
pub mod selection;
pub mod variants;

mod error;

pub use class_value::{ClassValue, cx};
pub use error::{Error, Result};
pub use merge::{ArrayMergeStrategy, ConcatFlattenFilter, DeepMerger, px};
pub use props::{CompoundProps, PropVariants};
pub use selection::{Choice, PropSelection, Selection, VariantKey};
pub use variants::{ClassVariants, CompoundRule};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::class_value::{ClassValue, cx};
    pub use crate::error::{Error, Result};
    pub use crate::merge::{ArrayMergeStrategy, ConcatFlattenFilter, DeepMerger, px};
    pub use crate::props::{CompoundProps, PropVariants};
    pub use crate::selection::{Choice, PropSelection, Selection, VariantKey};
    pub use crate::variants::{ClassVariants, CompoundRule};
}
