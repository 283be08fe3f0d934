use crate::descriptor::TypeDescriptor;
use crate::error::ValueResult;
use crate::value::{TypedValue, Validate, Value, ValueState};
use crate::wire::{WireType, WireValue};
use attrtype_diagnostics::{AttributePath, Diagnostics};
use std::fmt;

/// Tri-state value whose concrete type is only known at runtime.
///
/// A Known dynamic value wraps any Known wire value, carrying that value's
/// own wire type.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    state: ValueState<WireValue>,
}

impl DynamicValue {
    /// Known value wrapping `wire`; absent wire values keep their state
    pub fn new(wire: WireValue) -> Self {
        if wire.is_null() {
            Self::null()
        } else if wire.is_unknown() {
            Self::unknown()
        } else {
            Self {
                state: ValueState::Known(wire),
            }
        }
    }

    /// Wrapped wire value if Known
    pub fn wire(&self) -> Option<&WireValue> {
        self.state.known()
    }

    /// Wire type of the wrapped value; `Dynamic` unless Known
    pub fn underlying_type(&self) -> &WireType {
        self.wire().map_or(&WireType::Dynamic, WireValue::wire_type)
    }
}

impl Value for DynamicValue {
    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    fn to_wire(&self) -> WireValue {
        match &self.state {
            ValueState::Null => WireValue::null(WireType::Dynamic),
            ValueState::Unknown => WireValue::unknown(WireType::Dynamic),
            ValueState::Known(wire) => wire.clone(),
        }
    }
}

impl TypedValue for DynamicValue {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Dynamic
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
        Ok(Self::new(wire.clone()))
    }
}

impl Validate for DynamicValue {
    fn validate(&self, _path: &AttributePath, _diags: &mut Diagnostics) {}
}

impl Default for DynamicValue {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt(f)
    }
}
