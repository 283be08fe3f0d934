use super::{decode_elements, downcast_elements, encode_elements};
use crate::descriptor::TypeDescriptor;
use crate::error::{ValueError, ValueResult};
use crate::value::{DynValue, TypedValue, Validate, Value, ValueState, decode_state};
use crate::wire::{WirePayload, WireType, WireValue};
use attrtype_diagnostics::{AttributePath, Diagnostics};

/// Tri-state ordered list
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue<T: TypedValue> {
    state: ValueState<Vec<T>>,
}

impl<T: TypedValue> ListValue<T> {
    /// Known list of `elements`
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            state: ValueState::Known(elements),
        }
    }

    /// Known list from dynamically typed elements.
    ///
    /// Fails with an inconsistent element type error unless every element
    /// reports `T`'s descriptor.
    pub fn from_values(elements: Vec<Box<dyn DynValue>>) -> ValueResult<Self> {
        Ok(Self::new(downcast_elements(elements)?))
    }

    /// Elements if Known
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

    /// State and elements
    pub fn state(&self) -> &ValueState<Vec<T>> {
        &self.state
    }

    pub(crate) fn wire_type() -> WireType {
        WireType::list(T::descriptor().wire_type())
    }
}

impl<T: TypedValue> Value for ListValue<T> {
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
                WireValue::known(Self::wire_type(), WirePayload::List(encode_elements(elements)))
            }
        }
    }
}

impl<T: TypedValue> TypedValue for ListValue<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
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
            WirePayload::List(elements) => decode_elements(elements),
            other => Err(ValueError::type_mismatch("List", other.kind())),
        })?;
        Ok(Self { state })
    }
}

impl<T: TypedValue> Default for ListValue<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: TypedValue + Validate> Validate for ListValue<T> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        for (index, element) in self.elements().unwrap_or_default().iter().enumerate() {
            element.validate(&path.index(index), diags);
        }
    }
}

impl<T: TypedValue> FromIterator<T> for ListValue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: TypedValue> From<Vec<T>> for ListValue<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{BoolValue, StringValue};
    use crate::scalar::ArnValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_order_is_significant() {
        let a: ListValue<StringValue> = ["a", "b"].into_iter().map(StringValue::from).collect();
        let b: ListValue<StringValue> = ["b", "a"].into_iter().map(StringValue::from).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_values_rejects_other_element_type() {
        let elements: Vec<Box<dyn DynValue>> = vec![
            Box::new(StringValue::new("a")),
            Box::new(BoolValue::new(true)),
        ];
        let err = ListValue::<StringValue>::from_values(elements).unwrap_err();
        assert_eq!(
            err,
            ValueError::InconsistentElementType {
                expected: "String".into(),
                found: "Bool".into(),
            }
        );
    }

    #[test]
    fn test_from_values_accepts_matching_elements() {
        let elements: Vec<Box<dyn DynValue>> =
            vec![Box::new(StringValue::new("a")), Box::new(StringValue::null())];
        let list = ListValue::<StringValue>::from_values(elements).unwrap();
        assert_eq!(list.elements(), Some(&[StringValue::new("a"), StringValue::null()][..]));
    }

    #[test]
    fn test_round_trip_keeps_element_states() {
        let list = ListValue::new(vec![
            StringValue::new("x"),
            StringValue::null(),
            StringValue::unknown(),
        ]);
        assert_eq!(ListValue::from_wire(&list.to_wire()).unwrap(), list);
    }

    #[test]
    fn test_validate_uses_element_paths() {
        let list = ListValue::new(vec![
            ArnValue::new("arn:aws:s3:::bucket"),
            ArnValue::new("bucket"),
        ]);
        let mut diags = Diagnostics::new();
        list.validate(&AttributePath::root("arns"), &mut diags);
        assert_eq!(diags.len(), 1);
        let path = diags.iter().next().and_then(|d| d.path.clone()).unwrap();
        assert_eq!(path.to_string(), "arns[1]");
    }

    #[test]
    fn test_wire_set_is_rejected() {
        let wire = WireValue::set(WireType::String, vec![]).unwrap();
        assert!(ListValue::<StringValue>::from_wire(&wire).is_err());
    }
}
