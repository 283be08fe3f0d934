use super::{decode_elements, downcast_elements, encode_elements};
use crate::descriptor::TypeDescriptor;
use crate::error::{ValueError, ValueResult};
use crate::semantic::multiset_equal;
use crate::value::{DynValue, TypedValue, Validate, Value, ValueState, decode_state};
use crate::wire::{WirePayload, WireType, WireValue};
use attrtype_diagnostics::{AttributePath, Diagnostics};

/// Tri-state set of unique elements.
///
/// Element order is kept for encoding but is not significant for equality.
#[derive(Debug, Clone)]
pub struct SetValue<T: TypedValue> {
    state: ValueState<Vec<T>>,
}

impl<T: TypedValue> SetValue<T> {
    /// Known set of `elements`; fails if two elements are equal
    pub fn new(elements: Vec<T>) -> ValueResult<Self> {
        check_unique(&elements)?;
        Ok(Self {
            state: ValueState::Known(elements),
        })
    }

    /// Known one-element set
    pub fn from_single(element: T) -> Self {
        Self {
            state: ValueState::Known(vec![element]),
        }
    }

    /// Known set from dynamically typed elements
    pub fn from_values(elements: Vec<Box<dyn DynValue>>) -> ValueResult<Self> {
        Self::new(downcast_elements(elements)?)
    }

    /// Elements if Known, in insertion order
    pub fn elements(&self) -> Option<&[T]> {
        self.state.known().map(Vec::as_slice)
    }

    /// Take the elements if Known
    pub fn into_elements(self) -> Option<Vec<T>> {
        self.state.into_known()
    }

    /// Number of elements; zero unless Known
    pub fn len(&self) -> usize {
        self.elements().map_or(0, <[T]>::len)
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if Known and holding an element equal to `element`
    pub fn contains(&self, element: &T) -> bool {
        self.elements().is_some_and(|elements| elements.contains(element))
    }

    /// State and elements
    pub fn state(&self) -> &ValueState<Vec<T>> {
        &self.state
    }

    pub(crate) fn wire_type() -> WireType {
        WireType::set(T::descriptor().wire_type())
    }
}

/// Known elements must be unique; Null and Unknown elements never collide
fn check_unique<T: TypedValue>(elements: &[T]) -> ValueResult<()> {
    for (index, element) in elements.iter().enumerate() {
        if element.is_known() && elements[..index].contains(element) {
            return Err(ValueError::DuplicateSetElement { index });
        }
    }
    Ok(())
}

impl<T: TypedValue> PartialEq for SetValue<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (ValueState::Null, ValueState::Null) => true,
            (ValueState::Unknown, ValueState::Unknown) => true,
            (ValueState::Known(a), ValueState::Known(b)) => multiset_equal(a, b),
            _ => false,
        }
    }
}

impl<T: TypedValue> Value for SetValue<T> {
    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    fn to_wire(&self) -> WireValue {
        match &self.state {
            ValueState::Null => WireValue::null(Self::wire_type()),
            ValueState::Unknown => WireValue::unknown(Self::wire_type()),
            ValueState::Known(elements) => {
                WireValue::known(Self::wire_type(), WirePayload::Set(encode_elements(elements)))
            }
        }
    }
}

impl<T: TypedValue> TypedValue for SetValue<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
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
        let state = decode_state(wire, &Self::wire_type(), |payload| match payload {
            WirePayload::Set(elements) => {
                let elements = decode_elements(elements)?;
                check_unique(&elements)?;
                Ok(elements)
            }
            other => Err(ValueError::type_mismatch("Set", other.kind())),
        })?;
        Ok(Self { state })
    }
}

impl<T: TypedValue> Default for SetValue<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: TypedValue + Validate> Validate for SetValue<T> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        for (index, element) in self.elements().unwrap_or_default().iter().enumerate() {
            element.validate(&path.index(index), diags);
        }
    }
}
