//! Type descriptors
//!
//! This module defines the structural type metadata every typed value reports:
//! - TypeDescriptor enum covering primitives, domain scalars, collections and records
//! - RecordType, the ordered field list of a record shape
//! - ValueCategory, the closed set of structural categories used for dispatch

use crate::wire::WireType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Primitive kinds understood by the wire protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    /// Unicode string
    String,
    /// Arbitrary precision number
    Number,
    /// 64-bit signed integer, a number on the wire
    Int64,
    /// Boolean
    Bool,
}

impl PrimitiveType {
    /// Get the simple name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Int64 => "Int64",
            Self::Bool => "Bool",
        }
    }

    /// Wire representation of this primitive
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::String => WireType::String,
            Self::Number | Self::Int64 => WireType::Number,
            Self::Bool => WireType::Bool,
        }
    }
}

/// Structural category of a type, used for exhaustive dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    /// Primitive or domain scalar
    Scalar,
    /// Ordered sequence on the wire (list, multiset, nested list)
    List,
    /// Unordered unique sequence on the wire (set, nested set)
    Set,
    /// String-keyed map
    Map,
    /// Single record
    Record,
    /// Type only known at runtime
    Dynamic,
}

/// Shape of a typed value, independent of its state and payload.
///
/// Two values built from the same static declaration report equal
/// descriptors. Distinct value kinds never do, even when they share a wire
/// representation: a `Multiset` is a list on the wire but not a `List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Plain primitive
    Primitive(PrimitiveType),
    /// String-backed domain scalar
    Custom {
        /// Display name (e.g. "ARN")
        name: Cow<'static, str>,
        /// Fully qualified Rust type of the domain; distinguishes domains sharing a name
        domain: Cow<'static, str>,
        /// Primitive the domain value is stored as
        base: PrimitiveType,
    },
    /// Ordered list
    List(Box<TypeDescriptor>),
    /// Unordered set of unique elements
    Set(Box<TypeDescriptor>),
    /// String-keyed map
    Map(Box<TypeDescriptor>),
    /// Order-insignificant list allowing duplicates
    Multiset(Box<TypeDescriptor>),
    /// Single record
    Object(Arc<RecordType>),
    /// List of records
    ListNested(Arc<RecordType>),
    /// Set of records
    SetNested(Arc<RecordType>),
    /// Any wire value
    Dynamic,
}

impl TypeDescriptor {
    // === Constructors ===

    /// String descriptor
    pub const fn string() -> Self {
        Self::Primitive(PrimitiveType::String)
    }

    /// Number descriptor
    pub const fn number() -> Self {
        Self::Primitive(PrimitiveType::Number)
    }

    /// Int64 descriptor
    pub const fn int64() -> Self {
        Self::Primitive(PrimitiveType::Int64)
    }

    /// Bool descriptor
    pub const fn bool() -> Self {
        Self::Primitive(PrimitiveType::Bool)
    }

    /// Domain scalar stored as a string, identified by its domain type `D`
    pub fn custom_string<D: ?Sized + 'static>(name: &'static str) -> Self {
        Self::Custom {
            name: Cow::Borrowed(name),
            domain: Cow::Borrowed(type_name::<D>()),
            base: PrimitiveType::String,
        }
    }

    /// Create a list descriptor
    pub fn list(element: TypeDescriptor) -> Self {
        Self::List(Box::new(element))
    }

    /// Create a set descriptor
    pub fn set(element: TypeDescriptor) -> Self {
        Self::Set(Box::new(element))
    }

    /// Create a map descriptor
    pub fn map(element: TypeDescriptor) -> Self {
        Self::Map(Box::new(element))
    }

    /// Create a multiset descriptor
    pub fn multiset(element: TypeDescriptor) -> Self {
        Self::Multiset(Box::new(element))
    }

    // === Properties ===

    /// Structural category
    pub fn category(&self) -> ValueCategory {
        match self {
            Self::Primitive(_) | Self::Custom { .. } => ValueCategory::Scalar,
            Self::List(_) | Self::Multiset(_) | Self::ListNested(_) => ValueCategory::List,
            Self::Set(_) | Self::SetNested(_) => ValueCategory::Set,
            Self::Map(_) => ValueCategory::Map,
            Self::Object(_) => ValueCategory::Record,
            Self::Dynamic => ValueCategory::Dynamic,
        }
    }

    /// Check if this is a scalar
    pub fn is_scalar(&self) -> bool {
        self.category() == ValueCategory::Scalar
    }

    /// Check if this is a collection whose elements are records
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::ListNested(_) | Self::SetNested(_))
    }

    /// Element descriptor for collection types
    pub fn element_type(&self) -> Option<TypeDescriptor> {
        match self {
            Self::List(elem) | Self::Set(elem) | Self::Map(elem) | Self::Multiset(elem) => {
                Some(elem.as_ref().clone())
            }
            Self::ListNested(record) | Self::SetNested(record) => {
                Some(Self::Object(Arc::clone(record)))
            }
            _ => None,
        }
    }

    /// Record shape for record and nested-record types
    pub fn record_type(&self) -> Option<&Arc<RecordType>> {
        match self {
            Self::Object(record) | Self::ListNested(record) | Self::SetNested(record) => {
                Some(record)
            }
            _ => None,
        }
    }

    /// Wire shape this type encodes to
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::Primitive(primitive) => primitive.wire_type(),
            Self::Custom { base, .. } => base.wire_type(),
            Self::List(elem) | Self::Multiset(elem) => WireType::list(elem.wire_type()),
            Self::Set(elem) => WireType::set(elem.wire_type()),
            Self::Map(elem) => WireType::map(elem.wire_type()),
            Self::Object(record) => record.wire_type(),
            Self::ListNested(record) => WireType::list(record.wire_type()),
            Self::SetNested(record) => WireType::set(record.wire_type()),
            Self::Dynamic => WireType::Dynamic,
        }
    }

    /// Short kind name
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(primitive) => primitive.name(),
            Self::Custom { name, .. } => name.as_ref(),
            Self::List(_) => "List",
            Self::Set(_) => "Set",
            Self::Map(_) => "Map",
            Self::Multiset(_) => "Multiset",
            Self::Object(_) => "Object",
            Self::ListNested(_) => "ListNested",
            Self::SetNested(_) => "SetNested",
            Self::Dynamic => "Dynamic",
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(_) | Self::Custom { .. } | Self::Dynamic => {
                write!(f, "{}", self.name())
            }
            Self::List(elem) | Self::Set(elem) | Self::Map(elem) | Self::Multiset(elem) => {
                write!(f, "{}<{}>", self.name(), elem)
            }
            Self::Object(record) => write!(f, "{}", record),
            Self::ListNested(record) | Self::SetNested(record) => {
                write!(f, "{}<{}>", self.name(), record)
            }
        }
    }
}

/// Field list of a record shape, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    /// Name of the declaring record
    pub name: String,
    /// Field name to descriptor
    pub fields: IndexMap<String, TypeDescriptor>,
}

impl RecordType {
    /// Create a new record type
    pub fn new(name: impl Into<String>, fields: IndexMap<String, TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Descriptor of one field
    pub fn field(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields.get(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeDescriptor)> {
        self.fields.iter()
    }

    /// Wire attribute types of this record
    pub fn attribute_types(&self) -> IndexMap<String, WireType> {
        self.fields
            .iter()
            .map(|(name, descriptor)| (name.clone(), descriptor.wire_type()))
            .collect()
    }

    /// Wire shape of this record
    pub fn wire_type(&self) -> WireType {
        WireType::Object(self.attribute_types())
    }

    /// Record name without its module path
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.short_name())?;
        for (i, (name, descriptor)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", name, descriptor)?;
        }
        write!(f, " }}")
    }
}
