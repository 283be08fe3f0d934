use super::downcast_element;
use crate::descriptor::TypeDescriptor;
use crate::error::{ValueError, ValueResult};
use crate::value::{DynValue, TypedValue, Validate, Value, ValueState, decode_state};
use crate::wire::{WirePayload, WireType, WireValue};
use attrtype_diagnostics::{AttributePath, Diagnostics};
use indexmap::IndexMap;

/// Tri-state string-keyed map; key order is not significant for equality
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue<T: TypedValue> {
    state: ValueState<IndexMap<String, T>>,
}

impl<T: TypedValue> MapValue<T> {
    /// Known map of `entries`
    pub fn new(entries: IndexMap<String, T>) -> Self {
        Self {
            state: ValueState::Known(entries),
        }
    }

    /// Known map from dynamically typed values
    pub fn from_values(entries: IndexMap<String, Box<dyn DynValue>>) -> ValueResult<Self> {
        let entries = entries
            .into_iter()
            .map(|(key, value)| -> ValueResult<(String, T)> {
                Ok((key, downcast_element(value.as_ref())?))
            })
            .collect::<ValueResult<IndexMap<_, _>>>()?;
        Ok(Self::new(entries))
    }

    /// Entries if Known
    pub fn entries(&self) -> Option<&IndexMap<String, T>> {
        self.state.known()
    }

    /// Take the entries if Known
    pub fn into_entries(self) -> Option<IndexMap<String, T>> {
        self.state.into_known()
    }

    /// Value under `key` if Known
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries().and_then(|entries| entries.get(key))
    }

    /// Number of entries; zero unless Known
    pub fn len(&self) -> usize {
        self.entries().map_or(0, IndexMap::len)
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// State and entries
    pub fn state(&self) -> &ValueState<IndexMap<String, T>> {
        &self.state
    }

    fn wire_type() -> WireType {
        WireType::map(T::descriptor().wire_type())
    }
}

impl<T: TypedValue> Value for MapValue<T> {
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
            ValueState::Known(entries) => {
                let entries = entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_wire()))
                    .collect();
                WireValue::known(Self::wire_type(), WirePayload::Map(entries))
            }
        }
    }
}

impl<T: TypedValue> TypedValue for MapValue<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(T::descriptor())
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
            WirePayload::Map(entries) => entries
                .iter()
                .map(|(key, value)| -> ValueResult<(String, T)> {
                    Ok((key.clone(), T::from_wire(value)?))
                })
                .collect::<ValueResult<IndexMap<_, _>>>(),
            other => Err(ValueError::type_mismatch("Map", other.kind())),
        })?;
        Ok(Self { state })
    }
}

impl<T: TypedValue> Default for MapValue<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: TypedValue + Validate> Validate for MapValue<T> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        for (key, value) in self.entries().into_iter().flatten() {
            value.validate(&path.key(key.as_str()), diags);
        }
    }
}

impl<T: TypedValue> FromIterator<(String, T)> for MapValue<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
