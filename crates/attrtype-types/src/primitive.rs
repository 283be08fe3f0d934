//! Primitive typed values
//!
//! Plain string, number, int64 and bool values share one generic wrapper,
//! [`Primitive`], parameterized by the Rust type of the payload.

use crate::descriptor::{PrimitiveType, TypeDescriptor};
use crate::error::{ValueError, ValueResult};
use crate::value::{TypedValue, Validate, Value, ValueState, decode_state};
use crate::wire::{WirePayload, WireValue};
use attrtype_diagnostics::{AttributePath, Diagnostics};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt;

/// Rust payload type of a primitive value
pub trait PrimitiveKind: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Primitive kind reported in the type descriptor
    const TYPE: PrimitiveType;

    /// Encode into a wire payload
    fn to_payload(&self) -> WirePayload;

    /// Decode from a wire payload of the matching wire type
    fn from_payload(payload: &WirePayload) -> ValueResult<Self>;
}

impl PrimitiveKind for String {
    const TYPE: PrimitiveType = PrimitiveType::String;

    fn to_payload(&self) -> WirePayload {
        WirePayload::String(self.clone())
    }

    fn from_payload(payload: &WirePayload) -> ValueResult<Self> {
        match payload {
            WirePayload::String(s) => Ok(s.clone()),
            other => Err(ValueError::type_mismatch("String", other.kind())),
        }
    }
}

impl PrimitiveKind for bool {
    const TYPE: PrimitiveType = PrimitiveType::Bool;

    fn to_payload(&self) -> WirePayload {
        WirePayload::Bool(*self)
    }

    fn from_payload(payload: &WirePayload) -> ValueResult<Self> {
        match payload {
            WirePayload::Bool(b) => Ok(*b),
            other => Err(ValueError::type_mismatch("Bool", other.kind())),
        }
    }
}

impl PrimitiveKind for Decimal {
    const TYPE: PrimitiveType = PrimitiveType::Number;

    fn to_payload(&self) -> WirePayload {
        WirePayload::Number(*self)
    }

    fn from_payload(payload: &WirePayload) -> ValueResult<Self> {
        match payload {
            WirePayload::Number(n) => Ok(*n),
            other => Err(ValueError::type_mismatch("Number", other.kind())),
        }
    }
}

impl PrimitiveKind for i64 {
    const TYPE: PrimitiveType = PrimitiveType::Int64;

    fn to_payload(&self) -> WirePayload {
        WirePayload::Number(Decimal::from(*self))
    }

    fn from_payload(payload: &WirePayload) -> ValueResult<Self> {
        match payload {
            WirePayload::Number(n) if n.fract().is_zero() => n
                .to_i64()
                .ok_or_else(|| ValueError::type_mismatch("Int64", n)),
            WirePayload::Number(n) => Err(ValueError::type_mismatch("Int64", n)),
            other => Err(ValueError::type_mismatch("Int64", other.kind())),
        }
    }
}

/// A tri-state primitive value
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<P: PrimitiveKind> {
    state: ValueState<P>,
}

/// Tri-state string
pub type StringValue = Primitive<String>;
/// Tri-state boolean
pub type BoolValue = Primitive<bool>;
/// Tri-state 64-bit integer
pub type Int64Value = Primitive<i64>;
/// Tri-state arbitrary precision number
pub type NumberValue = Primitive<Decimal>;

impl<P: PrimitiveKind> Primitive<P> {
    /// Known value
    pub fn new(value: impl Into<P>) -> Self {
        Self {
            state: ValueState::Known(value.into()),
        }
    }

    /// Payload if Known
    pub fn value(&self) -> Option<&P> {
        self.state.known()
    }

    /// State and payload
    pub fn state(&self) -> &ValueState<P> {
        &self.state
    }
}

impl StringValue {
    /// String payload if Known
    pub fn as_str(&self) -> Option<&str> {
        self.state.known().map(String::as_str)
    }
}

impl<P: PrimitiveKind> Value for Primitive<P> {
    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    fn to_wire(&self) -> WireValue {
        let ty = P::TYPE.wire_type();
        match &self.state {
            ValueState::Null => WireValue::null(ty),
            ValueState::Unknown => WireValue::unknown(ty),
            ValueState::Known(value) => WireValue::known(ty, value.to_payload()),
        }
    }
}

impl<P: PrimitiveKind> TypedValue for Primitive<P> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(P::TYPE)
    }

    fn null() -> Self {
        Self {
            state: ValueState::Null,
        }
    }

    fn unknown() -> Self {
        Self {
            state: ValueState::Unknown,
        }
    }

    fn from_wire(wire: &WireValue) -> ValueResult<Self> {
        let state = decode_state(wire, &P::TYPE.wire_type(), P::from_payload)?;
        Ok(Self { state })
    }
}

impl<P: PrimitiveKind> Default for Primitive<P> {
    fn default() -> Self {
        Self::null()
    }
}

impl<P: PrimitiveKind> Validate for Primitive<P> {
    fn validate(&self, _path: &AttributePath, _diags: &mut Diagnostics) {}
}

impl<P: PrimitiveKind> fmt::Display for Primitive<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}

impl From<String> for StringValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<bool> for BoolValue {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Int64Value {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Decimal> for NumberValue {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}
