//! Conversion between typed values and plain Rust data
//!
//! [`Expand`] turns a typed value into the plain shape an API client works
//! with; [`Flatten`] builds a typed value back from that shape.
//!
//! - Null and Unknown both expand to the plain type's absent form: `None`,
//!   the type's default, or an empty collection
//! - `None` flattens to Null; a plain `Vec` flattens to a Known collection
//! - Nested records flatten from an empty `Vec` to Null, matching
//!   [`ListNestedValue::from_records`]
//! - A single-record target (`Option<S>`) enforces the one-record cardinality
//!
//! Records convert field by field through their own `Expand` and `Flatten`
//! impls, which call into the field values' impls.
//!
//! # Example
//!
//! ```ignore
//! struct ApiRule {
//!     name: String,
//!     cidr_blocks: Vec<String>,
//! }
//!
//! impl Expand<ApiRule> for Rule {
//!     fn expand(&self) -> ValueResult<ApiRule> {
//!         Ok(ApiRule {
//!             name: self.name.expand()?,
//!             cidr_blocks: self.cidr_blocks.expand()?,
//!         })
//!     }
//! }
//!
//! let api: Vec<ApiRule> = rules.expand()?;
//! ```

use crate::collection::{ListValue, MapValue, MultisetValue, SetValue};
use crate::error::ValueResult;
use crate::nested::{ListNestedValue, ObjectValue, SetNestedValue};
use crate::primitive::Primitive;
use crate::record::Record;
use crate::scalar::{Scalar, ScalarDomain, TimestampValue};
use crate::value::TypedValue;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Conversion of a typed value into plain data of type `T`
pub trait Expand<T> {
    /// Expand `self` into `T`
    fn expand(&self) -> ValueResult<T>;
}

/// Construction of a typed value from plain data of type `T`
pub trait Flatten<T>: Sized {
    /// Build a typed value from `from`
    fn flatten(from: T) -> ValueResult<Self>;
}

// === Primitives and scalars ===

macro_rules! primitive_flex {
    ($($kind:ty),* $(,)?) => {$(
        impl Expand<$kind> for Primitive<$kind> {
            fn expand(&self) -> ValueResult<$kind> {
                Ok(self.value().cloned().unwrap_or_default())
            }
        }

        impl Expand<Option<$kind>> for Primitive<$kind> {
            fn expand(&self) -> ValueResult<Option<$kind>> {
                Ok(self.value().cloned())
            }
        }

        impl Flatten<$kind> for Primitive<$kind> {
            fn flatten(from: $kind) -> ValueResult<Self> {
                Ok(Self::new(from))
            }
        }

        impl Flatten<Option<$kind>> for Primitive<$kind> {
            fn flatten(from: Option<$kind>) -> ValueResult<Self> {
                Ok(from.map_or_else(Self::null, Self::new))
            }
        }
    )*};
}

primitive_flex!(String, bool, i64, Decimal);

impl<D: ScalarDomain> Expand<String> for Scalar<D> {
    fn expand(&self) -> ValueResult<String> {
        Ok(self.value_string().unwrap_or_default().to_owned())
    }
}

impl<D: ScalarDomain> Expand<Option<String>> for Scalar<D> {
    fn expand(&self) -> ValueResult<Option<String>> {
        Ok(self.value_string().map(str::to_owned))
    }
}

/// Malformed text flattens fail-soft to Unknown, like any other construction
impl<D: ScalarDomain> Flatten<String> for Scalar<D> {
    fn flatten(from: String) -> ValueResult<Self> {
        Ok(Self::new(from))
    }
}

impl<D: ScalarDomain> Flatten<Option<String>> for Scalar<D> {
    fn flatten(from: Option<String>) -> ValueResult<Self> {
        Ok(from.map_or_else(Self::null, Self::new))
    }
}

impl Expand<Option<DateTime<FixedOffset>>> for TimestampValue {
    fn expand(&self) -> ValueResult<Option<DateTime<FixedOffset>>> {
        Ok(self.value_domain().copied())
    }
}

impl Flatten<DateTime<FixedOffset>> for TimestampValue {
    fn flatten(from: DateTime<FixedOffset>) -> ValueResult<Self> {
        Ok(Self::new(from.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
    }
}

impl Flatten<Option<DateTime<FixedOffset>>> for TimestampValue {
    fn flatten(from: Option<DateTime<FixedOffset>>) -> ValueResult<Self> {
        from.map_or_else(|| Ok(Self::null()), <Self as Flatten<DateTime<FixedOffset>>>::flatten)
    }
}

// === Collections ===

fn expand_all<E: Expand<T>, T>(elements: Option<&[E]>) -> ValueResult<Vec<T>> {
    elements
        .unwrap_or_default()
        .iter()
        .map(Expand::expand)
        .collect()
}

fn flatten_all<E: Flatten<T>, T>(from: Vec<T>) -> ValueResult<Vec<E>> {
    from.into_iter().map(E::flatten).collect()
}

impl<E: TypedValue + Expand<T>, T> Expand<Vec<T>> for ListValue<E> {
    fn expand(&self) -> ValueResult<Vec<T>> {
        expand_all(self.elements())
    }
}

impl<E: TypedValue + Flatten<T>, T> Flatten<Vec<T>> for ListValue<E> {
    fn flatten(from: Vec<T>) -> ValueResult<Self> {
        Ok(Self::new(flatten_all(from)?))
    }
}

impl<E: TypedValue + Flatten<T>, T> Flatten<Option<Vec<T>>> for ListValue<E> {
    fn flatten(from: Option<Vec<T>>) -> ValueResult<Self> {
        from.map_or_else(|| Ok(Self::null()), <Self as Flatten<Vec<T>>>::flatten)
    }
}

impl<E: TypedValue + Expand<T>, T> Expand<Vec<T>> for SetValue<E> {
    fn expand(&self) -> ValueResult<Vec<T>> {
        expand_all(self.elements())
    }
}

/// Fails when two plain values flatten to the same Known element
impl<E: TypedValue + Flatten<T>, T> Flatten<Vec<T>> for SetValue<E> {
    fn flatten(from: Vec<T>) -> ValueResult<Self> {
        Self::new(flatten_all(from)?)
    }
}

impl<E: TypedValue + Flatten<T>, T> Flatten<Option<Vec<T>>> for SetValue<E> {
    fn flatten(from: Option<Vec<T>>) -> ValueResult<Self> {
        from.map_or_else(|| Ok(Self::null()), <Self as Flatten<Vec<T>>>::flatten)
    }
}

impl<E: TypedValue + Expand<T>, T> Expand<Vec<T>> for MultisetValue<E> {
    fn expand(&self) -> ValueResult<Vec<T>> {
        expand_all(self.elements())
    }
}

impl<E: TypedValue + Flatten<T>, T> Flatten<Vec<T>> for MultisetValue<E> {
    fn flatten(from: Vec<T>) -> ValueResult<Self> {
        Ok(Self::new(flatten_all(from)?))
    }
}

impl<E: TypedValue + Expand<T>, T> Expand<IndexMap<String, T>> for MapValue<E> {
    fn expand(&self) -> ValueResult<IndexMap<String, T>> {
        self.entries()
            .into_iter()
            .flatten()
            .map(|(key, value)| Ok((key.clone(), value.expand()?)))
            .collect()
    }
}

impl<E: TypedValue + Flatten<T>, T> Flatten<IndexMap<String, T>> for MapValue<E> {
    fn flatten(from: IndexMap<String, T>) -> ValueResult<Self> {
        let entries = from
            .into_iter()
            .map(|(key, value)| Ok((key, E::flatten(value)?)))
            .collect::<ValueResult<IndexMap<_, _>>>()?;
        Ok(Self::new(entries))
    }
}

impl<E: TypedValue + Flatten<T>, T> Flatten<Option<IndexMap<String, T>>> for MapValue<E> {
    fn flatten(from: Option<IndexMap<String, T>>) -> ValueResult<Self> {
        from.map_or_else(|| Ok(Self::null()), <Self as Flatten<IndexMap<String, T>>>::flatten)
    }
}

// === Nested records ===

impl<R: Record + Expand<S>, S> Expand<Option<S>> for ObjectValue<R> {
    fn expand(&self) -> ValueResult<Option<S>> {
        self.to_ptr().map(R::expand).transpose()
    }
}

impl<R: Record + Flatten<S>, S> Flatten<Option<S>> for ObjectValue<R> {
    fn flatten(from: Option<S>) -> ValueResult<Self> {
        Ok(Self::from_ptr(from.map(R::flatten).transpose()?))
    }
}

fn expand_records<'a, R, S>(records: impl Iterator<Item = Option<&'a R>>) -> ValueResult<Vec<S>>
where
    R: Record + Expand<S> + 'a,
{
    // Absent elements have no plain counterpart
    let expanded = records.flatten().map(R::expand).collect::<ValueResult<Vec<_>>>()?;
    log::trace!("expanded {} nested records", expanded.len());
    Ok(expanded)
}

impl<R: Record + Expand<S>, S> Expand<Vec<S>> for ListNestedValue<R> {
    fn expand(&self) -> ValueResult<Vec<S>> {
        expand_records(self.to_records().into_iter())
    }
}

impl<R: Record + Expand<S>, S> Expand<Option<S>> for ListNestedValue<R> {
    fn expand(&self) -> ValueResult<Option<S>> {
        self.to_ptr()?.map(R::expand).transpose()
    }
}

impl<R: Record + Flatten<S>, S> Flatten<Vec<S>> for ListNestedValue<R> {
    fn flatten(from: Vec<S>) -> ValueResult<Self> {
        Ok(Self::from_records(flatten_all(from)?))
    }
}

impl<R: Record + Flatten<S>, S> Flatten<Option<S>> for ListNestedValue<R> {
    fn flatten(from: Option<S>) -> ValueResult<Self> {
        Ok(Self::from_ptr(from.map(R::flatten).transpose()?))
    }
}

impl<R: Record + Expand<S>, S> Expand<Vec<S>> for SetNestedValue<R> {
    fn expand(&self) -> ValueResult<Vec<S>> {
        expand_records(self.to_records().into_iter())
    }
}

impl<R: Record + Expand<S>, S> Expand<Option<S>> for SetNestedValue<R> {
    fn expand(&self) -> ValueResult<Option<S>> {
        self.to_ptr()?.map(R::expand).transpose()
    }
}

impl<R: Record + Flatten<S>, S> Flatten<Vec<S>> for SetNestedValue<R> {
    fn flatten(from: Vec<S>) -> ValueResult<Self> {
        Self::from_records(flatten_all(from)?)
    }
}

impl<R: Record + Flatten<S>, S> Flatten<Option<S>> for SetNestedValue<R> {
    fn flatten(from: Option<S>) -> ValueResult<Self> {
        Ok(Self::from_ptr(from.map(R::flatten).transpose()?))
    }
}
