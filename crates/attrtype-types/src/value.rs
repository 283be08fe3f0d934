//! Tri-state value core
//!
//! Every typed value is exactly one of Null, Unknown or Known. This module
//! defines that state machine and the contracts every typed value satisfies:
//!
//! - [`Value`]: object-safe state queries and wire encoding
//! - [`TypedValue`]: static type descriptor, null/unknown constructors and wire decoding
//! - [`DynValue`]: blanket dynamic surface for `Box<dyn DynValue>` use
//! - [`Validate`]: the explicit validation pass

use crate::descriptor::TypeDescriptor;
use crate::error::ValueResult;
use crate::wire::{WirePayload, WireType, WireValue};
use attrtype_diagnostics::{AttributePath, Diagnostics};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Null / Unknown / Known state with an optional payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "value")]
pub enum ValueState<T> {
    /// Explicitly absent
    Null,
    /// Not yet determined
    Unknown,
    /// Present with a payload
    Known(T),
}

impl<T> ValueState<T> {
    /// Check if this is Null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is Unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Check if this is Known
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Get the payload if Known
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            _ => None,
        }
    }

    /// Take the payload if Known
    pub fn into_known(self) -> Option<T> {
        match self {
            Self::Known(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the payload
    pub fn as_ref(&self) -> ValueState<&T> {
        match self {
            Self::Null => ValueState::Null,
            Self::Unknown => ValueState::Unknown,
            Self::Known(value) => ValueState::Known(value),
        }
    }

    /// Map the payload, keeping the state
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValueState<U> {
        match self {
            Self::Null => ValueState::Null,
            Self::Unknown => ValueState::Unknown,
            Self::Known(value) => ValueState::Known(f(value)),
        }
    }

    /// Map the payload with a fallible function
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<ValueState<U>, E> {
        Ok(match self {
            Self::Null => ValueState::Null,
            Self::Unknown => ValueState::Unknown,
            Self::Known(value) => ValueState::Known(f(value)?),
        })
    }
}

impl<T: fmt::Display> fmt::Display for ValueState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "<null>"),
            Self::Unknown => write!(f, "<unknown>"),
            Self::Known(value) => write!(f, "{}", value),
        }
    }
}

/// Object-safe part of the typed value contract
pub trait Value: fmt::Debug + Send + Sync + 'static {
    /// Check if the value is explicitly absent
    fn is_null(&self) -> bool;

    /// Check if the value is not yet determined
    fn is_unknown(&self) -> bool;

    /// Check if the value carries a payload
    fn is_known(&self) -> bool {
        !self.is_null() && !self.is_unknown()
    }

    /// Encode to the wire value model
    fn to_wire(&self) -> WireValue;
}

/// A typed value with a static declaration.
///
/// `descriptor()` takes no receiver, so a value's type cannot change with its
/// state. Representation equality is `PartialEq`: both Null, both Unknown, or
/// both Known with equal payloads.
pub trait TypedValue: Value + Clone + PartialEq + Sized {
    /// Type descriptor shared by every value of this declaration
    fn descriptor() -> TypeDescriptor;

    /// Null value
    fn null() -> Self;

    /// Unknown value
    fn unknown() -> Self;

    /// Decode from the wire value model.
    ///
    /// Wire null decodes to Null, wire unknown to Unknown; any other value
    /// must match `descriptor().wire_type()`.
    fn from_wire(wire: &WireValue) -> ValueResult<Self>;
}

/// Dynamic surface over any [`TypedValue`]
pub trait DynValue: Value {
    /// Type descriptor of the concrete value
    fn value_type(&self) -> TypeDescriptor;

    /// Representation equality across concrete kinds; differing kinds are never equal
    fn dyn_equal(&self, other: &dyn DynValue) -> bool;

    /// Decode a wire value into the same concrete kind as `self`
    fn decode_like(&self, wire: &WireValue) -> ValueResult<Box<dyn DynValue>>;

    /// Clone into a box
    fn clone_boxed(&self) -> Box<dyn DynValue>;

    /// Upcast for downcasting to the concrete kind
    fn as_any(&self) -> &dyn Any;
}

impl<T: TypedValue> DynValue for T {
    fn value_type(&self) -> TypeDescriptor {
        T::descriptor()
    }

    fn dyn_equal(&self, other: &dyn DynValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn decode_like(&self, wire: &WireValue) -> ValueResult<Box<dyn DynValue>> {
        Ok(Box::new(T::from_wire(wire)?))
    }

    fn clone_boxed(&self) -> Box<dyn DynValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PartialEq for dyn DynValue {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_equal(other)
    }
}

impl Clone for Box<dyn DynValue> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Explicit validation pass
pub trait Validate {
    /// Record a diagnostic for every problem found at `path`
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics);
}

/// Decode the state of a wire value after checking its shape.
///
/// The payload closure only runs for Known values.
pub(crate) fn decode_state<T>(
    wire: &WireValue,
    expected: &WireType,
    decode: impl FnOnce(&WirePayload) -> ValueResult<T>,
) -> ValueResult<ValueState<T>> {
    wire.expect_type(expected)?;
    wire.state().as_ref().try_map(decode)
}
