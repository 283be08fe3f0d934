use super::ListValue;
use crate::descriptor::TypeDescriptor;
use crate::error::ValueResult;
use crate::semantic::{SemanticEquals, multiset_equal};
use crate::value::{DynValue, TypedValue, Validate, Value, ValueState};
use crate::wire::WireValue;
use attrtype_diagnostics::{AttributePath, Diagnostics};

/// Tri-state list whose order is not significant.
///
/// Encodes as a list and is representation-equal only to the same sequence.
/// Under semantic equality two multisets match when they hold the same
/// elements the same number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct MultisetValue<T: TypedValue> {
    list: ListValue<T>,
}

impl<T: TypedValue> MultisetValue<T> {
    /// Known multiset of `elements`
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            list: ListValue::new(elements),
        }
    }

    /// Known multiset from dynamically typed elements
    pub fn from_values(elements: Vec<Box<dyn DynValue>>) -> ValueResult<Self> {
        Ok(Self {
            list: ListValue::from_values(elements)?,
        })
    }

    /// Elements if Known, in stored order
    pub fn elements(&self) -> Option<&[T]> {
        self.list.elements()
    }

    /// Take the elements if Known
    pub fn into_elements(self) -> Option<Vec<T>> {
        self.list.into_elements()
    }

    /// Number of elements; zero unless Known
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// State and elements
    pub fn state(&self) -> &ValueState<Vec<T>> {
        self.list.state()
    }
}

impl<T: TypedValue> Value for MultisetValue<T> {
    fn is_null(&self) -> bool {
        self.list.is_null()
    }

    fn is_unknown(&self) -> bool {
        self.list.is_unknown()
    }

    fn to_wire(&self) -> WireValue {
        self.list.to_wire()
    }
}

impl<T: TypedValue> TypedValue for MultisetValue<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::multiset(T::descriptor())
    }

    fn null() -> Self {
        Self {
            list: ListValue::null(),
        }
    }

    fn unknown() -> Self {
        Self {
            list: ListValue::unknown(),
        }
    }

    fn from_wire(wire: &WireValue) -> ValueResult<Self> {
        Ok(Self {
            list: ListValue::from_wire(wire)?,
        })
    }
}

impl<T: TypedValue> SemanticEquals for MultisetValue<T> {
    fn semantic_equals(&self, other: &Self) -> bool {
        match (self.elements(), other.elements()) {
            (Some(a), Some(b)) => multiset_equal(a, b),
            _ => false,
        }
    }
}

impl<T: TypedValue> Default for MultisetValue<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: TypedValue + Validate> Validate for MultisetValue<T> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        self.list.validate(path, diags);
    }
}

impl<T: TypedValue> FromIterator<T> for MultisetValue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
