//! Structured diagnostics

use crate::{AttributePath, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the configuration cannot be applied
    Error,
    /// Warning - potential issue but can continue
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message attributed to an attribute path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// One-line summary
    pub summary: String,
    /// Longer explanation
    pub detail: Option<String>,
    /// Attribute the diagnostic belongs to
    pub path: Option<AttributePath>,
    /// Offending raw value
    pub value: Option<String>,
    /// Underlying cause, usually a parser error message
    pub cause: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, summary: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, summary)
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, summary: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, summary)
    }

    fn new(severity: Severity, code: ErrorCode, summary: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            summary: summary.into(),
            detail: None,
            path: None,
            value: None,
            cause: None,
        }
    }

    /// Set the attribute path
    pub fn with_path(mut self, path: AttributePath) -> Self {
        self.path = Some(path);
        self
    }

    /// Set detail text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the offending raw value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the underlying cause
    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render for a terminal, coloured when the `colored` feature is enabled
    pub fn render(&self) -> String {
        #[cfg(feature = "colored")]
        {
            use colored::Colorize;
            let severity = match self.severity {
                Severity::Error => self.severity.to_string().red().bold(),
                Severity::Warning => self.severity.to_string().yellow().bold(),
            };
            let mut out = format!("{}[{}]: {}", severity, self.code, self.summary);
            self.render_tail(&mut out);
            out
        }
        #[cfg(not(feature = "colored"))]
        {
            let mut out = format!("{}[{}]: {}", self.severity, self.code, self.summary);
            self.render_tail(&mut out);
            out
        }
    }

    fn render_tail(&self, out: &mut String) {
        if let Some(path) = &self.path {
            out.push_str(&format!("\n  --> {}", path));
        }
        if let Some(detail) = &self.detail {
            out.push_str(&format!("\n  {}", detail));
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.summary)?;
        if let Some(path) = &self.path {
            write!(f, " at {}", path)?;
        }
        Ok(())
    }
}

/// An ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Check whether any error-severity diagnostic was recorded
    pub fn has_error(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Error-severity diagnostics
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.is_error())
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over diagnostics
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Consume into the underlying vector
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
