//! Attribute value diagnostics
//!
//! This crate provides the error reporting infrastructure shared by the
//! attribute value layer: stable error codes, attribute paths used to
//! attribute a problem to a field, and structured diagnostics collected by
//! validation passes.

mod diagnostic;
mod error_code;
mod path;

pub use diagnostic::*;
pub use error_code::*;
pub use path::*;
