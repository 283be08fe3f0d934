//! Record declarations and record type derivation
//!
//! A record is a plain struct whose fields are typed values. `#[derive(Record)]`
//! emits one [`FieldDecl`] per field; [`derive_record_type`] walks those
//! declarations in order to build the record's [`RecordType`], flattening
//! embedded records into the parent name space. Derived types are memoized
//! per record type in a process-wide read-mostly cache.

use crate::descriptor::{RecordType, TypeDescriptor};
use crate::error::{DefinitionError, ValueError, ValueResult};
use crate::value::TypedValue;
use crate::wire::WireValue;
use attrtype_diagnostics::{AttributePath, Diagnostics};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A fixed-shape struct of named typed-value fields
pub trait Record: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Field declarations in declaration order
    fn fields() -> Vec<FieldDecl>;

    /// Encode every named field, embedded fields hoisted
    fn to_wire_fields(&self) -> IndexMap<String, WireValue>;

    /// Decode from wire attributes; excluded fields take their default
    fn from_wire_fields(fields: &IndexMap<String, WireValue>) -> ValueResult<Self>;

    /// Validate every named field at `path.<name>`
    fn validate_fields(&self, path: &AttributePath, diags: &mut Diagnostics);
}

/// Declaration of one struct field
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Rust field name
    pub ident: &'static str,
    /// How the field takes part in the record shape
    pub tag: FieldTag,
}

/// Role of a field in its record's shape
#[derive(Debug, Clone)]
pub enum FieldTag {
    /// Typed-value field exposed under `name`
    Named {
        name: &'static str,
        descriptor: fn() -> TypeDescriptor,
    },
    /// Embedded record whose fields join the parent's name space
    Embedded { fields: fn() -> Vec<FieldDecl> },
    /// Field ignored by the record shape
    Excluded,
    /// Field without any tag; a definition error
    Missing,
}

impl FieldDecl {
    pub fn named(ident: &'static str, name: &'static str, descriptor: fn() -> TypeDescriptor) -> Self {
        Self {
            ident,
            tag: FieldTag::Named { name, descriptor },
        }
    }

    pub fn embedded(ident: &'static str, fields: fn() -> Vec<FieldDecl>) -> Self {
        Self {
            ident,
            tag: FieldTag::Embedded { fields },
        }
    }

    pub fn excluded(ident: &'static str) -> Self {
        Self {
            ident,
            tag: FieldTag::Excluded,
        }
    }

    pub fn missing(ident: &'static str) -> Self {
        Self {
            ident,
            tag: FieldTag::Missing,
        }
    }
}

/// Build the record type of `R` from its field declarations, without caching.
///
/// Nested record fields resolve their own types through [`record_type`] as
/// their descriptors are evaluated.
pub fn derive_record_type<R: Record>() -> Result<RecordType, DefinitionError> {
    let record = type_name::<R>();
    let mut fields = IndexMap::new();
    collect_fields(record, R::fields(), &mut fields)?;
    Ok(RecordType::new(record, fields))
}

fn collect_fields(
    record: &str,
    decls: Vec<FieldDecl>,
    out: &mut IndexMap<String, TypeDescriptor>,
) -> Result<(), DefinitionError> {
    for decl in decls {
        match decl.tag {
            FieldTag::Named { name, descriptor } => {
                if out.contains_key(name) {
                    return Err(DefinitionError::DuplicateFieldTag {
                        record: record.to_string(),
                        tag: name.to_string(),
                    });
                }
                out.insert(name.to_string(), descriptor());
            }
            FieldTag::Embedded { fields } => collect_fields(record, fields(), out)?,
            FieldTag::Excluded => {}
            FieldTag::Missing => {
                return Err(DefinitionError::MissingFieldTag {
                    record: record.to_string(),
                    field: decl.ident.to_string(),
                });
            }
        }
    }
    Ok(())
}

static RECORD_TYPES: Lazy<RwLock<HashMap<TypeId, Arc<RecordType>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Cached record type of `R`.
///
/// The type is derived outside the lock so nested records can resolve their
/// own types meanwhile. The first stored result wins.
pub fn try_record_type<R: Record>() -> Result<Arc<RecordType>, DefinitionError> {
    let key = TypeId::of::<R>();
    let cached = RECORD_TYPES.read().get(&key).cloned();
    if let Some(record_type) = cached {
        return Ok(record_type);
    }

    let derived = Arc::new(derive_record_type::<R>()?);
    log::trace!("Derived record type {}", derived);

    let mut cache = RECORD_TYPES.write();
    Ok(Arc::clone(cache.entry(key).or_insert(derived)))
}

/// Cached record type of `R`.
///
/// # Panics
///
/// Panics if the declaration of `R` is invalid. Such a record can never be
/// encoded or decoded, so this is treated as a startup failure.
pub fn record_type<R: Record>() -> Arc<RecordType> {
    try_record_type::<R>().unwrap_or_else(|err| panic!("{}", err))
}

/// Decode the wire attribute `name` as `T`
#[doc(hidden)]
pub fn decode_field<T: TypedValue>(
    fields: &IndexMap<String, WireValue>,
    name: &str,
) -> ValueResult<T> {
    let wire = fields.get(name).ok_or_else(|| ValueError::MissingAttribute {
        name: name.to_string(),
    })?;
    T::from_wire(wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Int64Value, StringValue};
    use crate::value::{Validate, Value};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Port {
        number: Int64Value,
        comment: String,
    }

    // Hand-written equivalent of the derive output
    impl Record for Port {
        fn fields() -> Vec<FieldDecl> {
            vec![
                FieldDecl::named("number", "number", Int64Value::descriptor),
                FieldDecl::excluded("comment"),
            ]
        }

        fn to_wire_fields(&self) -> IndexMap<String, WireValue> {
            let mut fields = IndexMap::new();
            fields.insert("number".to_string(), self.number.to_wire());
            fields
        }

        fn from_wire_fields(fields: &IndexMap<String, WireValue>) -> ValueResult<Self> {
            Ok(Self {
                number: decode_field(fields, "number")?,
                comment: String::new(),
            })
        }

        fn validate_fields(&self, path: &AttributePath, diags: &mut Diagnostics) {
            self.number.validate(&path.attribute("number"), diags);
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Listener {
        port: Port,
        protocol: StringValue,
        number: Int64Value,
    }

    impl Record for Listener {
        fn fields() -> Vec<FieldDecl> {
            vec![
                FieldDecl::embedded("port", Port::fields),
                FieldDecl::named("protocol", "protocol", StringValue::descriptor),
                FieldDecl::named("number", "number", Int64Value::descriptor),
            ]
        }

        fn to_wire_fields(&self) -> IndexMap<String, WireValue> {
            IndexMap::new()
        }

        fn from_wire_fields(_fields: &IndexMap<String, WireValue>) -> ValueResult<Self> {
            Err(ValueError::UnsupportedKind {
                kind: "Listener".into(),
            })
        }

        fn validate_fields(&self, _path: &AttributePath, _diags: &mut Diagnostics) {}
    }

    #[test]
    fn test_excluded_field_is_skipped() {
        let record_type = derive_record_type::<Port>().unwrap();
        assert_eq!(record_type.len(), 1);
        assert_eq!(record_type.field("number"), Some(&TypeDescriptor::int64()));
        assert_eq!(record_type.short_name(), "Port");
    }

    #[test]
    fn test_duplicate_through_embedding() {
        let err = derive_record_type::<Listener>().unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::DuplicateFieldTag { ref tag, .. } if tag == "number"
        ));
        assert!(try_record_type::<Listener>().is_err());
    }

    #[test]
    fn test_cache_returns_shared_type() {
        let a = record_type::<Port>();
        let b = record_type::<Port>();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, derive_record_type::<Port>().unwrap());
    }

    #[test]
    fn test_decode_field_requires_attribute() {
        let err = decode_field::<StringValue>(&IndexMap::new(), "name").unwrap_err();
        assert_eq!(
            err,
            ValueError::MissingAttribute {
                name: "name".into()
            }
        );
    }
}
