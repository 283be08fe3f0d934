//! Semantic equality
//!
//! Representation equality (`PartialEq`) answers whether the stored value
//! changed. Semantic equality answers whether it still denotes the same
//! logical value, tolerating differences in case, formatting or ordering.

use crate::value::TypedValue;

/// Domain equality layered over representation equality.
///
/// Only meaningful between two Known values; implementations return `false`
/// when either side is Null or Unknown.
pub trait SemanticEquals: TypedValue {
    /// Check if both values denote the same logical value
    fn semantic_equals(&self, other: &Self) -> bool;
}

/// Decide whether a proposed value may replace a prior one without a change.
///
/// Representation-equal values are always interchangeable. Otherwise both
/// must be Known and semantically equal.
pub fn interchangeable<T: SemanticEquals>(prior: &T, proposed: &T) -> bool {
    if prior == proposed {
        return true;
    }
    if !prior.is_known() || !proposed.is_known() {
        return false;
    }
    prior.semantic_equals(proposed)
}

/// Order-insensitive comparison allowing duplicates
pub fn multiset_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    multiset_equal_by(a, b, |x, y| x == y)
}

/// Order-insensitive comparison under `eq`.
///
/// Each element of `a` consumes one matching element of `b`; the first
/// element without a match ends the comparison. `eq` must be an equivalence
/// relation for the greedy match to be exact.
pub fn multiset_equal_by<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut pool: Vec<&T> = b.iter().collect();
    for item in a {
        match pool.iter().position(|candidate| eq(item, candidate)) {
            Some(index) => {
                pool.swap_remove(index);
            }
            None => return false,
        }
    }
    true
}
