//! Collection values
//!
//! Generic tri-state containers over one element value type:
//! - [`ListValue`]: ordered, duplicates allowed
//! - [`SetValue`]: unordered, unique elements
//! - [`MapValue`]: string-keyed
//! - [`MultisetValue`]: a list on the wire, compared without regard to order

mod list;
mod map;
mod multiset;
mod set;

pub use list::ListValue;
pub use map::MapValue;
pub use multiset::MultisetValue;
pub use set::SetValue;

use crate::error::{ValueError, ValueResult};
use crate::value::{DynValue, TypedValue, Value};
use crate::wire::WireValue;

/// Check a dynamically typed element against `T` and take it as `T`
pub(crate) fn downcast_element<T: TypedValue>(element: &dyn DynValue) -> ValueResult<T> {
    let expected = T::descriptor();
    let found = element.value_type();
    if found != expected {
        return Err(inconsistent(&expected, &found));
    }
    element
        .as_any()
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| inconsistent(&expected, &found))
}

pub(crate) fn downcast_elements<T: TypedValue>(
    elements: Vec<Box<dyn DynValue>>,
) -> ValueResult<Vec<T>> {
    elements
        .iter()
        .map(|element| downcast_element(element.as_ref()))
        .collect()
}

pub(crate) fn encode_elements<T: TypedValue>(elements: &[T]) -> Vec<WireValue> {
    elements.iter().map(Value::to_wire).collect()
}

pub(crate) fn decode_elements<T: TypedValue>(elements: &[WireValue]) -> ValueResult<Vec<T>> {
    elements.iter().map(T::from_wire).collect()
}

fn inconsistent(expected: &impl ToString, found: &impl ToString) -> ValueError {
    ValueError::InconsistentElementType {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
