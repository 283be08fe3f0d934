//! Tri-state attribute values
//!
//! This crate defines the typed value layer:
//! - Null / Unknown / Known value states and the typed value contract
//! - Primitive values and string-backed domain scalars (ARN, CIDR, durations, policies, ...)
//! - Semantic equality alongside representation equality
//! - List, set, map and multiset collections
//! - Single records and collections of records
//! - Expand/flatten between typed values and plain Rust data
//! - Record type derivation, cached per record type
//! - The wire value model every value encodes to and decodes from

extern crate self as attrtype_types;

pub mod collection;
pub mod descriptor;
pub mod dynamic;
pub mod error;
pub mod flex;
pub mod nested;
pub mod primitive;
pub mod record;
pub mod scalar;
pub mod semantic;
pub mod synth;
pub mod value;
pub mod wire;

pub use collection::*;
pub use descriptor::*;
pub use dynamic::*;
pub use error::*;
pub use flex::*;
pub use nested::*;
pub use primitive::*;
pub use record::*;
pub use scalar::*;
pub use semantic::*;
pub use synth::*;
pub use value::*;
pub use wire::*;

#[cfg(feature = "derive")]
pub use attrtype_derive::Record;
pub use attrtype_diagnostics::{AttributePath, Diagnostic, Diagnostics, ErrorCode};
pub use indexmap::IndexMap;
