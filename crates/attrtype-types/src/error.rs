//! Errors raised by the value layer

use attrtype_diagnostics::{
    ATV0001, ATV0002, ATV0003, ATV0100, ATV0101, ATV0102, ATV0300, ATV0301, ATV0401, Diagnostic,
    ErrorCode,
};
use thiserror::Error;

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors that can occur while constructing, decoding or converting values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Wire value shape does not match the declared type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Object wire value lacks a declared attribute
    #[error("Missing attribute \"{name}\"")]
    MissingAttribute { name: String },

    /// Object wire value carries an undeclared attribute
    #[error("Unexpected attribute \"{name}\"")]
    UnexpectedAttribute { name: String },

    /// Collection element does not have the declared element type
    #[error("Inconsistent element type: expected {expected}, found {found}")]
    InconsistentElementType { expected: String, found: String },

    /// Set element equal to an earlier element
    #[error("Duplicate set element at index {index}")]
    DuplicateSetElement { index: usize },

    /// Nested-record collection holds more elements than requested
    #[error("too many elements: want {want}, got {got}")]
    TooManyElements { want: usize, got: usize },

    /// Record declaration is invalid
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// No null value can be synthesized for this kind
    #[error("Unsupported value kind: {kind}")]
    UnsupportedKind { kind: String },
}

impl ValueError {
    pub(crate) fn type_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. } => ATV0001,
            Self::MissingAttribute { .. } => ATV0002,
            Self::UnexpectedAttribute { .. } => ATV0003,
            Self::InconsistentElementType { .. } => ATV0100,
            Self::DuplicateSetElement { .. } => ATV0101,
            Self::TooManyElements { .. } => ATV0102,
            Self::Definition(err) => err.code(),
            Self::UnsupportedKind { .. } => ATV0401,
        }
    }

    /// Check if this is a decode error
    pub fn is_decode_error(&self) -> bool {
        self.code().is_decode_error()
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.code().info().description)
            .with_detail(self.to_string());
        match self.code().info().help {
            Some(help) => diag.with_cause(help),
            None => diag,
        }
    }
}

/// Programming errors in a record declaration.
///
/// These are raised while deriving a record's type descriptor and indicate a
/// broken declaration rather than bad user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Field carries neither a name, a skip marker nor a flatten marker
    #[error("missing field tag on {record}.{field}")]
    MissingFieldTag { record: String, field: String },

    /// Two fields (possibly through flattening) share one name
    #[error("duplicate field tag \"{tag}\" in {record}")]
    DuplicateFieldTag { record: String, tag: String },
}

impl DefinitionError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingFieldTag { .. } => ATV0300,
            Self::DuplicateFieldTag { .. } => ATV0301,
        }
    }
}
