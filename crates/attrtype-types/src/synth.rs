//! Null value synthesis
//!
//! Callers holding a value of unknown concrete kind sometimes need a Null of
//! the same declared type. [`null_value_of`] builds the matching wire null
//! for the value's structural category and decodes it through the value's
//! own `from_wire`.

use crate::descriptor::ValueCategory;
use crate::error::{ValueError, ValueResult};
use crate::value::DynValue;
use crate::wire::WireValue;

/// Null value with the same declared type as `example`.
///
/// Fails with [`ValueError::UnsupportedKind`] for categories that have no
/// fixed wire shape.
pub fn null_value_of(example: &dyn DynValue) -> ValueResult<Box<dyn DynValue>> {
    let descriptor = example.value_type();
    match descriptor.category() {
        ValueCategory::Scalar
        | ValueCategory::List
        | ValueCategory::Set
        | ValueCategory::Map
        | ValueCategory::Record => {
            let null = example.decode_like(&WireValue::null(descriptor.wire_type()))?;
            log::trace!("Synthesized null {}", descriptor);
            Ok(null)
        }
        ValueCategory::Dynamic => Err(ValueError::UnsupportedKind {
            kind: descriptor.to_string(),
        }),
    }
}
