//! Wire value model
//!
//! This module defines the minimal structural value model used at the external
//! protocol boundary: null and unknown markers, primitive scalars, lists, sets,
//! string-keyed maps and fixed-shape objects. Every wire value carries its
//! declared shape alongside its payload.

use crate::error::{ValueError, ValueResult};
use crate::value::ValueState;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a wire value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireType {
    /// Unicode string
    String,
    /// Arbitrary precision number
    Number,
    /// Boolean
    Bool,
    /// Ordered list
    List(Box<WireType>),
    /// Unordered set
    Set(Box<WireType>),
    /// String-keyed map
    Map(Box<WireType>),
    /// Fixed-shape object
    Object(IndexMap<String, WireType>),
    /// Shape decided by the value itself
    Dynamic,
}

impl WireType {
    /// Create a list type
    pub fn list(element: WireType) -> Self {
        Self::List(Box::new(element))
    }

    /// Create a set type
    pub fn set(element: WireType) -> Self {
        Self::Set(Box::new(element))
    }

    /// Create a map type
    pub fn map(element: WireType) -> Self {
        Self::Map(Box::new(element))
    }

    /// Check if a value of type `other` may stand where `self` is declared.
    ///
    /// Shapes must be structurally equal, except that `Dynamic` accepts
    /// anything at any depth.
    pub fn accepts(&self, other: &WireType) -> bool {
        match (self, other) {
            (Self::Dynamic, _) => true,
            (Self::List(a), Self::List(b))
            | (Self::Set(a), Self::Set(b))
            | (Self::Map(a), Self::Map(b)) => a.accepts(b),
            (Self::Object(a), Self::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(name, ty)| b.get(name).is_some_and(|o| ty.accepts(o)))
            }
            _ => self == other,
        }
    }

    /// Element type of a collection
    pub fn element_type(&self) -> Option<&WireType> {
        match self {
            Self::List(elem) | Self::Set(elem) | Self::Map(elem) => Some(elem),
            _ => None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Number => write!(f, "Number"),
            Self::Bool => write!(f, "Bool"),
            Self::List(elem) => write!(f, "List[{}]", elem),
            Self::Set(elem) => write!(f, "Set[{}]", elem),
            Self::Map(elem) => write!(f, "Map[{}]", elem),
            Self::Object(attrs) => {
                write!(f, "Object[")?;
                for (i, (name, ty)) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}:{}", name, ty)?;
                }
                write!(f, "]")
            }
            Self::Dynamic => write!(f, "Dynamic"),
        }
    }
}

/// Payload of a known wire value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum WirePayload {
    String(String),
    Number(Decimal),
    Bool(bool),
    List(Vec<WireValue>),
    Set(Vec<WireValue>),
    Map(IndexMap<String, WireValue>),
    Object(IndexMap<String, WireValue>),
}

impl WirePayload {
    /// Short kind name, used in mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::Bool(_) => "Bool",
            Self::List(_) => "List",
            Self::Set(_) => "Set",
            Self::Map(_) => "Map",
            Self::Object(_) => "Object",
        }
    }
}

impl PartialEq for WirePayload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => crate::semantic::multiset_equal(a, b),
            (Self::Map(a), Self::Map(b)) | (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// A wire value: declared shape plus Null/Unknown/Known state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireValue {
    ty: WireType,
    state: ValueState<WirePayload>,
}

impl WireValue {
    /// Null value of the given shape
    pub fn null(ty: WireType) -> Self {
        Self {
            ty,
            state: ValueState::Null,
        }
    }

    /// Unknown value of the given shape
    pub fn unknown(ty: WireType) -> Self {
        Self {
            ty,
            state: ValueState::Unknown,
        }
    }

    /// Known string
    pub fn string(value: impl Into<String>) -> Self {
        Self::known(WireType::String, WirePayload::String(value.into()))
    }

    /// Known number
    pub fn number(value: Decimal) -> Self {
        Self::known(WireType::Number, WirePayload::Number(value))
    }

    /// Known bool
    pub fn bool(value: bool) -> Self {
        Self::known(WireType::Bool, WirePayload::Bool(value))
    }

    /// Known list; every element must fit `element`
    pub fn list(element: WireType, elements: Vec<WireValue>) -> ValueResult<Self> {
        check_elements(&element, elements.iter())?;
        Ok(Self::known(WireType::list(element), WirePayload::List(elements)))
    }

    /// Known set; every element must fit `element`
    pub fn set(element: WireType, elements: Vec<WireValue>) -> ValueResult<Self> {
        check_elements(&element, elements.iter())?;
        Ok(Self::known(WireType::set(element), WirePayload::Set(elements)))
    }

    /// Known map; every value must fit `element`
    pub fn map(element: WireType, entries: IndexMap<String, WireValue>) -> ValueResult<Self> {
        check_elements(&element, entries.values())?;
        Ok(Self::known(WireType::map(element), WirePayload::Map(entries)))
    }

    /// Known object; attribute names and types must match exactly
    pub fn object(
        attribute_types: IndexMap<String, WireType>,
        attributes: IndexMap<String, WireValue>,
    ) -> ValueResult<Self> {
        for (name, ty) in &attribute_types {
            let value = attributes
                .get(name)
                .ok_or_else(|| ValueError::MissingAttribute { name: name.clone() })?;
            if !ty.accepts(value.wire_type()) {
                return Err(ValueError::type_mismatch(ty, value.wire_type()));
            }
        }
        if let Some(name) = attributes.keys().find(|k| !attribute_types.contains_key(*k)) {
            return Err(ValueError::UnexpectedAttribute { name: name.clone() });
        }
        Ok(Self::known(
            WireType::Object(attribute_types),
            WirePayload::Object(attributes),
        ))
    }

    /// Assemble a known value whose shape the caller already guarantees
    pub(crate) fn known(ty: WireType, payload: WirePayload) -> Self {
        Self {
            ty,
            state: ValueState::Known(payload),
        }
    }

    // === Accessors ===

    /// Declared shape
    pub fn wire_type(&self) -> &WireType {
        &self.ty
    }

    /// State and payload
    pub fn state(&self) -> &ValueState<WirePayload> {
        &self.state
    }

    /// Check if Null
    pub fn is_null(&self) -> bool {
        self.state.is_null()
    }

    /// Check if Unknown
    pub fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    /// Check if Known
    pub fn is_known(&self) -> bool {
        self.state.is_known()
    }

    /// Payload if Known
    pub fn payload(&self) -> Option<&WirePayload> {
        self.state.known()
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self.payload() {
            Some(WirePayload::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Try to get as number
    pub fn as_number(&self) -> Option<Decimal> {
        match self.payload() {
            Some(WirePayload::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self.payload() {
            Some(WirePayload::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Try to get list or set elements
    pub fn as_elements(&self) -> Option<&[WireValue]> {
        match self.payload() {
            Some(WirePayload::List(elems) | WirePayload::Set(elems)) => Some(elems),
            _ => None,
        }
    }

    /// Try to get map entries or object attributes
    pub fn as_entries(&self) -> Option<&IndexMap<String, WireValue>> {
        match self.payload() {
            Some(WirePayload::Map(entries) | WirePayload::Object(entries)) => Some(entries),
            _ => None,
        }
    }

    /// Fail with a decode error unless this value fits `expected`
    pub fn expect_type(&self, expected: &WireType) -> ValueResult<()> {
        if expected.accepts(&self.ty) {
            Ok(())
        } else {
            Err(ValueError::type_mismatch(expected, &self.ty))
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ValueState::Null => write!(f, "null"),
            ValueState::Unknown => write!(f, "unknown"),
            ValueState::Known(payload) => match payload {
                WirePayload::String(s) => write!(f, "{:?}", s),
                WirePayload::Number(n) => write!(f, "{}", n),
                WirePayload::Bool(b) => write!(f, "{}", b),
                WirePayload::List(elems) | WirePayload::Set(elems) => {
                    write!(f, "[")?;
                    for (i, elem) in elems.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", elem)?;
                    }
                    write!(f, "]")
                }
                WirePayload::Map(entries) | WirePayload::Object(entries) => {
                    write!(f, "{{")?;
                    for (i, (name, value)) in entries.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{:?}: {}", name, value)?;
                    }
                    write!(f, "}}")
                }
            },
        }
    }
}

fn check_elements<'a>(
    element: &WireType,
    values: impl Iterator<Item = &'a WireValue>,
) -> ValueResult<()> {
    for value in values {
        if !element.accepts(value.wire_type()) {
            return Err(ValueError::type_mismatch(element, value.wire_type()));
        }
    }
    Ok(())
}
