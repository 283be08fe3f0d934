//! Error codes following a structured numbering system
//!
//! Error code ranges:
//! - ATV0001-ATV0099: Decode errors (wire shape mismatch)
//! - ATV0100-ATV0199: Shape errors (element types, cardinality)
//! - ATV0200-ATV0299: Validation errors (invalid domain values)
//! - ATV0300-ATV0399: Definition errors (record declarations)
//! - ATV0400-ATV0499: Internal errors

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a decode error (0001-0099)
    pub const fn is_decode_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a shape error (0100-0199)
    pub const fn is_shape_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a validation error (0200-0299)
    pub const fn is_validation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a definition error (0300-0399)
    pub const fn is_definition_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is an internal error (0400-0499)
    pub const fn is_internal_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ATV{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Decode errors (0001-0099)
    map.insert(1, ErrorInfo::new("Wire type mismatch"));
    map.insert(2, ErrorInfo::new("Missing object attribute"));
    map.insert(3, ErrorInfo::new("Unexpected object attribute"));

    // Shape errors (0100-0199)
    map.insert(100, ErrorInfo::new("Inconsistent element type"));
    map.insert(101, ErrorInfo::new("Duplicate set element"));
    map.insert(
        102,
        ErrorInfo::new("Too many elements")
            .with_help("A nested block converted to a single record holds at most one element"),
    );

    // Validation errors (0200-0299)
    map.insert(
        200,
        ErrorInfo::new("Invalid domain value")
            .with_help("The configured string could not be parsed into its domain representation"),
    );

    // Definition errors (0300-0399)
    map.insert(
        300,
        ErrorInfo::new("Missing field tag")
            .with_help("Annotate the field with #[attr(name = \"...\")], #[attr(skip)] or #[attr(flatten)]"),
    );
    map.insert(301, ErrorInfo::new("Duplicate field tag"));

    // Internal errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("Unsupported value kind"));

    map
});

// Decode errors
pub const ATV0001: ErrorCode = ErrorCode::new(1);
pub const ATV0002: ErrorCode = ErrorCode::new(2);
pub const ATV0003: ErrorCode = ErrorCode::new(3);

// Shape errors
pub const ATV0100: ErrorCode = ErrorCode::new(100);
pub const ATV0101: ErrorCode = ErrorCode::new(101);
pub const ATV0102: ErrorCode = ErrorCode::new(102);

// Validation errors
pub const ATV0200: ErrorCode = ErrorCode::new(200);

// Definition errors
pub const ATV0300: ErrorCode = ErrorCode::new(300);
pub const ATV0301: ErrorCode = ErrorCode::new(301);

// Internal errors
pub const ATV0400: ErrorCode = ErrorCode::new(400);
pub const ATV0401: ErrorCode = ErrorCode::new(401);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ATV0001.to_string(), "ATV0001");
        assert_eq!(ATV0200.to_string(), "ATV0200");
    }

    #[test]
    fn test_error_categories() {
        assert!(ATV0001.is_decode_error());
        assert!(!ATV0001.is_shape_error());

        assert!(ATV0102.is_shape_error());
        assert!(ATV0200.is_validation_error());
        assert!(ATV0300.is_definition_error());
        assert!(ATV0401.is_internal_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(ATV0200.info().description, "Invalid domain value");
        assert!(ATV0300.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
