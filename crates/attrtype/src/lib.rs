//! Tri-state typed attribute values
//!
//! This crate bundles the attribute value layer:
//! - Null / Unknown / Known typed values and their wire encoding
//! - Domain scalars such as ARNs, CIDR blocks, durations and IAM policies
//! - Semantic equality for values that differ only in formatting or order
//! - Collections and nested-record collections
//! - `#[derive(Record)]` record declarations (feature `derive`, on by default)
//!
//! # Example
//!
//! ```ignore
//! use attrtype::{Record, StringValue, ListNestedValue, TypedValue};
//!
//! #[derive(Debug, Clone, PartialEq, Record)]
//! #[attr(crate = "attrtype")]
//! struct Rule {
//!     #[attr(name = "name")]
//!     name: StringValue,
//! }
//!
//! let rules = ListNestedValue::from_records(vec![Rule { name: "test".into() }]);
//! let wire = rules.to_wire();
//! assert_eq!(ListNestedValue::<Rule>::from_wire(&wire)?, rules);
//! ```

pub use attrtype_diagnostics as diagnostics;
pub use attrtype_types as types;

pub use attrtype_types::*;
