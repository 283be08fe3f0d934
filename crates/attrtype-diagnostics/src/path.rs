//! Attribute paths for attributing diagnostics to a field

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// One step of an attribute path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "step", content = "value")]
pub enum PathStep {
    /// Named attribute of an object
    Attribute(String),
    /// Position in a list, set or multiset
    ElementIndex(usize),
    /// Key in a map
    ElementKey(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(name) => write!(f, "{}", name),
            Self::ElementIndex(index) => write!(f, "[{}]", index),
            Self::ElementKey(key) => write!(f, "[{:?}]", key),
        }
    }
}

/// Location of a value inside a configuration tree.
///
/// Paths are cheap to extend: every builder method returns a new path and
/// leaves the receiver untouched, so a validation pass can hand a child path
/// to each element it visits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AttributePath {
    steps: SmallVec<[PathStep; 4]>,
}

impl AttributePath {
    /// Create an empty path
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a path rooted at a top-level attribute
    pub fn root(name: impl Into<String>) -> Self {
        Self::empty().attribute(name)
    }

    /// Extend with a named attribute
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::Attribute(name.into()))
    }

    /// Extend with an element index
    pub fn index(&self, index: usize) -> Self {
        self.with_step(PathStep::ElementIndex(index))
    }

    /// Extend with a map key
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::ElementKey(key.into()))
    }

    /// Steps of this path, outermost first
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Check if this path has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Parent path, or `None` for the empty path
    pub fn parent(&self) -> Option<Self> {
        if self.steps.is_empty() {
            return None;
        }
        let mut steps = self.steps.clone();
        steps.pop();
        Some(Self { steps })
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && matches!(step, PathStep::Attribute(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl From<&str> for AttributePath {
    fn from(name: &str) -> Self {
        Self::root(name)
    }
}
