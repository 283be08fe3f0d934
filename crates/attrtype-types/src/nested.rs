//! Nested record values
//!
//! [`ObjectValue`] holds one record. [`ListNestedValue`] and
//! [`SetNestedValue`] hold collections of records and convert to and from
//! the shapes record-level code works with: an optional single record or a
//! sequence of records.

use crate::collection::{ListValue, SetValue};
use crate::descriptor::TypeDescriptor;
use crate::error::{ValueError, ValueResult};
use crate::record::{Record, record_type};
use crate::semantic::SemanticEquals;
use crate::value::{DynValue, TypedValue, Validate, Value, ValueState, decode_state};
use crate::wire::{WirePayload, WireType, WireValue};
use attrtype_diagnostics::{AttributePath, Diagnostics};

/// Tri-state single record
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue<R: Record> {
    state: ValueState<R>,
}

impl<R: Record> ObjectValue<R> {
    /// Known value holding `record`
    pub fn new(record: R) -> Self {
        Self {
            state: ValueState::Known(record),
        }
    }

    /// Known value for `Some`, Null for `None`
    pub fn from_ptr(record: Option<R>) -> Self {
        match record {
            Some(record) => Self::new(record),
            None => Self::null(),
        }
    }

    /// Record if Known
    pub fn to_ptr(&self) -> Option<&R> {
        self.state.known()
    }

    /// Take the record if Known
    pub fn into_record(self) -> Option<R> {
        self.state.into_known()
    }

    fn wire_type() -> WireType {
        record_type::<R>().wire_type()
    }
}

impl<R: Record> Value for ObjectValue<R> {
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
            ValueState::Known(record) => {
                WireValue::known(Self::wire_type(), WirePayload::Object(record.to_wire_fields()))
            }
        }
    }
}

impl<R: Record> TypedValue for ObjectValue<R> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Object(record_type::<R>())
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
            WirePayload::Object(fields) => R::from_wire_fields(fields),
            other => Err(ValueError::type_mismatch("Object", other.kind())),
        })?;
        Ok(Self { state })
    }
}

impl<R: Record> Validate for ObjectValue<R> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        if let Some(record) = self.to_ptr() {
            record.validate_fields(path, diags);
        }
    }
}

impl<R: Record> Default for ObjectValue<R> {
    fn default() -> Self {
        Self::null()
    }
}

/// Single record of a zero-or-one element collection
fn single<R: Record>(elements: Option<&[ObjectValue<R>]>) -> ValueResult<Option<&R>> {
    match elements.unwrap_or_default() {
        [] => Ok(None),
        [element] => Ok(element.to_ptr()),
        elements => Err(ValueError::TooManyElements {
            want: 1,
            got: elements.len(),
        }),
    }
}

/// Tri-state list of records
#[derive(Debug, Clone, PartialEq)]
pub struct ListNestedValue<R: Record> {
    list: ListValue<ObjectValue<R>>,
}

impl<R: Record> ListNestedValue<R> {
    /// Known list of `records`, possibly empty
    pub fn new(records: Vec<R>) -> Self {
        Self {
            list: records.into_iter().map(ObjectValue::new).collect(),
        }
    }

    /// Known list of `records`, or Null when there are none
    pub fn from_records(records: Vec<R>) -> Self {
        if records.is_empty() {
            Self::null()
        } else {
            Self::new(records)
        }
    }

    /// One-element list for `Some`, Null for `None`
    pub fn from_ptr(record: Option<R>) -> Self {
        match record {
            Some(record) => Self::new(vec![record]),
            None => Self::null(),
        }
    }

    /// Known list from dynamically typed elements
    pub fn from_values(elements: Vec<Box<dyn DynValue>>) -> ValueResult<Self> {
        Ok(Self {
            list: ListValue::from_values(elements)?,
        })
    }

    /// The only record.
    ///
    /// `None` when the list is empty, Null or Unknown. Fails with
    /// [`ValueError::TooManyElements`] when it holds more than one element.
    pub fn to_ptr(&self) -> ValueResult<Option<&R>> {
        single(self.list.elements())
    }

    /// Every element's record in list order; `None` for non-Known elements
    pub fn to_records(&self) -> Vec<Option<&R>> {
        self.list
            .elements()
            .unwrap_or_default()
            .iter()
            .map(ObjectValue::to_ptr)
            .collect()
    }

    /// Elements if Known
    pub fn elements(&self) -> Option<&[ObjectValue<R>]> {
        self.list.elements()
    }

    /// Number of elements; zero unless Known
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<R: Record> Value for ListNestedValue<R> {
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

impl<R: Record> TypedValue for ListNestedValue<R> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::ListNested(record_type::<R>())
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

impl<R: Record> Validate for ListNestedValue<R> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        self.list.validate(path, diags);
    }
}

impl<R: Record> Default for ListNestedValue<R> {
    fn default() -> Self {
        Self::null()
    }
}

/// Tri-state set of records
#[derive(Debug, Clone, PartialEq)]
pub struct SetNestedValue<R: Record> {
    set: SetValue<ObjectValue<R>>,
}

impl<R: Record> SetNestedValue<R> {
    /// Known set of `records`, possibly empty; fails on duplicates
    pub fn new(records: Vec<R>) -> ValueResult<Self> {
        Ok(Self {
            set: SetValue::new(records.into_iter().map(ObjectValue::new).collect())?,
        })
    }

    /// Known set of `records`, or Null when there are none
    pub fn from_records(records: Vec<R>) -> ValueResult<Self> {
        if records.is_empty() {
            Ok(Self::null())
        } else {
            Self::new(records)
        }
    }

    /// One-element set for `Some`, Null for `None`
    pub fn from_ptr(record: Option<R>) -> Self {
        match record {
            Some(record) => Self {
                set: SetValue::from_single(ObjectValue::new(record)),
            },
            None => Self::null(),
        }
    }

    /// Known set from dynamically typed elements
    pub fn from_values(elements: Vec<Box<dyn DynValue>>) -> ValueResult<Self> {
        Ok(Self {
            set: SetValue::from_values(elements)?,
        })
    }

    /// The only record; see [`ListNestedValue::to_ptr`]
    pub fn to_ptr(&self) -> ValueResult<Option<&R>> {
        single(self.set.elements())
    }

    /// Every element's record; order is not significant
    pub fn to_records(&self) -> Vec<Option<&R>> {
        self.set
            .elements()
            .unwrap_or_default()
            .iter()
            .map(ObjectValue::to_ptr)
            .collect()
    }

    /// Elements if Known
    pub fn elements(&self) -> Option<&[ObjectValue<R>]> {
        self.set.elements()
    }

    /// Number of elements; zero unless Known
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl<R: Record> Value for SetNestedValue<R> {
    fn is_null(&self) -> bool {
        self.set.is_null()
    }

    fn is_unknown(&self) -> bool {
        self.set.is_unknown()
    }

    fn to_wire(&self) -> WireValue {
        self.set.to_wire()
    }
}

impl<R: Record> TypedValue for SetNestedValue<R> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::SetNested(record_type::<R>())
    }

    fn null() -> Self {
        Self {
            set: SetValue::null(),
        }
    }

    fn unknown() -> Self {
        Self {
            set: SetValue::unknown(),
        }
    }

    fn from_wire(wire: &WireValue) -> ValueResult<Self> {
        Ok(Self {
            set: SetValue::from_wire(wire)?,
        })
    }
}

impl<R: Record> SemanticEquals for SetNestedValue<R> {
    fn semantic_equals(&self, other: &Self) -> bool {
        self.is_known() && other.is_known() && self == other
    }
}

impl<R: Record> Validate for SetNestedValue<R> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        self.set.validate(path, diags);
    }
}

impl<R: Record> Default for SetNestedValue<R> {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::StringValue;
    use indexmap::IndexMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        key: StringValue,
    }

    impl Record for Tag {
        fn fields() -> Vec<crate::record::FieldDecl> {
            vec![crate::record::FieldDecl::named("key", "key", StringValue::descriptor)]
        }

        fn to_wire_fields(&self) -> IndexMap<String, WireValue> {
            IndexMap::from([("key".to_string(), self.key.to_wire())])
        }

        fn from_wire_fields(fields: &IndexMap<String, WireValue>) -> ValueResult<Self> {
            Ok(Self {
                key: crate::record::decode_field(fields, "key")?,
            })
        }

        fn validate_fields(&self, _path: &AttributePath, _diags: &mut Diagnostics) {}
    }

    fn tag(key: &str) -> Tag {
        Tag {
            key: StringValue::new(key),
        }
    }

    #[test]
    fn test_single_record_cardinality() {
        let empty = ListNestedValue::<Tag>::new(vec![]);
        assert_eq!(empty.to_ptr().unwrap(), None);

        let one = ListNestedValue::new(vec![tag("a")]);
        assert_eq!(one.to_ptr().unwrap(), Some(&tag("a")));

        let two = ListNestedValue::new(vec![tag("a"), tag("b")]);
        assert_eq!(
            two.to_ptr().unwrap_err(),
            ValueError::TooManyElements { want: 1, got: 2 }
        );
    }

    #[test]
    fn test_from_records_empty_is_null() {
        assert!(ListNestedValue::<Tag>::from_records(vec![]).is_null());
        assert!(SetNestedValue::<Tag>::from_records(vec![]).unwrap().is_null());
        assert!(ListNestedValue::<Tag>::from_ptr(None).is_null());
    }

    #[test]
    fn test_set_semantic_equality_is_representation_equality() {
        let a = SetNestedValue::new(vec![tag("a"), tag("b")]).unwrap();
        let b = SetNestedValue::new(vec![tag("b"), tag("a")]).unwrap();
        let c = SetNestedValue::new(vec![tag("a")]).unwrap();
        assert!(a.semantic_equals(&b));
        assert!(!a.semantic_equals(&c));
        assert!(!SetNestedValue::<Tag>::null().semantic_equals(&SetNestedValue::null()));
    }

    #[test]
    fn test_object_wire_shape_is_checked() {
        let wire = WireValue::object(IndexMap::new(), IndexMap::new()).unwrap();
        let err = ObjectValue::<Tag>::from_wire(&wire).unwrap_err();
        assert!(err.is_decode_error());
    }
}
