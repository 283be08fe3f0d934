//! String-backed scalar domain wrappers
//!
//! A [`Scalar`] stores the raw configured string and, when parsing succeeds,
//! the parsed domain representation next to it. The raw string is the source
//! of truth for equality and wire encoding.
//!
//! Parsing never fails construction. A malformed string yields an Unknown
//! value that remembers the rejected text, and the failure is reported later
//! by [`Validate`].

mod arn;
mod cidr;
mod duration;
mod enums;
mod json;
mod policy;
mod regexp;
mod rfc3339;
mod text;
mod window;

pub use arn::{Arn, ArnValue, ParsedArn};
pub use cidr::{CidrBlock, CidrBlockValue, IpNetwork};
pub use duration::{Duration, DurationValue};
pub use enums::{EnumDomain, EnumValues, StringEnum};
pub use json::{JsonString, JsonStringValue};
pub use policy::{IamPolicy, IamPolicyValue, policies_equivalent};
pub use regexp::{Regexp, RegexpValue};
pub use rfc3339::{
    CalendarDuration, CalendarDurationValue, IsoDuration, Timestamp, TimestampValue,
};
pub use text::{CaseInsensitive, CaseInsensitiveString, DnsName, DnsNameValue};
pub use window::{OnceAWeekWindow, OnceAWeekWindowValue, WeeklyTime, WeeklyWindow};

use crate::descriptor::TypeDescriptor;
use crate::error::{ValueError, ValueResult};
use crate::semantic::SemanticEquals;
use crate::value::{TypedValue, Validate, Value, ValueState, decode_state};
use crate::wire::{WirePayload, WireType, WireValue};
use attrtype_diagnostics::{ATV0200, AttributePath, Diagnostic, Diagnostics};
use std::fmt;

/// A string domain: a name and a parser
pub trait ScalarDomain: Send + Sync + 'static {
    /// Display name of the type descriptor; identity comes from the domain type
    const NAME: &'static str;

    /// Parsed representation
    type Parsed: Clone + fmt::Debug + Send + Sync;

    /// Parse failure
    type Error: fmt::Display;

    /// Parse a raw string
    fn parse(raw: &str) -> Result<Self::Parsed, Self::Error>;
}

/// Domain equivalence beyond raw string equality
pub trait SemanticDomain: ScalarDomain {
    /// Check if two raw strings denote the same domain value
    fn equivalent(a: &str, b: &str) -> bool;
}

#[derive(Clone)]
struct KnownScalar<P> {
    raw: String,
    parsed: P,
}

/// A tri-state string-backed domain value
pub struct Scalar<D: ScalarDomain> {
    state: ValueState<KnownScalar<D::Parsed>>,
    rejected: Option<String>,
}

impl<D: ScalarDomain> Scalar<D> {
    /// Build from a raw string.
    ///
    /// Yields Known when `raw` parses, otherwise Unknown holding the rejected
    /// text for [`Validate`].
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match D::parse(&raw) {
            Ok(parsed) => Self {
                state: ValueState::Known(KnownScalar { raw, parsed }),
                rejected: None,
            },
            Err(err) => {
                log::debug!("{} value {:?} treated as unknown: {}", D::NAME, raw, err);
                Self {
                    state: ValueState::Unknown,
                    rejected: Some(raw),
                }
            }
        }
    }

    /// Raw string if Known
    pub fn value_string(&self) -> Option<&str> {
        self.state.known().map(|known| known.raw.as_str())
    }

    /// Parsed domain representation if Known
    pub fn value_domain(&self) -> Option<&D::Parsed> {
        self.state.known().map(|known| &known.parsed)
    }

    /// Text that failed to parse, if this value was downgraded to Unknown
    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }
}

impl<D: ScalarDomain> Clone for Scalar<D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            rejected: self.rejected.clone(),
        }
    }
}

impl<D: ScalarDomain> fmt::Debug for Scalar<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(D::NAME);
        match &self.state {
            ValueState::Null => s.field("state", &"null"),
            ValueState::Unknown => s.field("state", &"unknown"),
            ValueState::Known(known) => s.field("raw", &known.raw),
        };
        if let Some(rejected) = &self.rejected {
            s.field("rejected", rejected);
        }
        s.finish()
    }
}

impl<D: ScalarDomain> PartialEq for Scalar<D> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (ValueState::Null, ValueState::Null) => true,
            (ValueState::Unknown, ValueState::Unknown) => true,
            (ValueState::Known(a), ValueState::Known(b)) => a.raw == b.raw,
            _ => false,
        }
    }
}

impl<D: ScalarDomain> fmt::Display for Scalar<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ValueState::Null => write!(f, "<null>"),
            ValueState::Unknown => write!(f, "<unknown>"),
            ValueState::Known(known) => write!(f, "{}", known.raw),
        }
    }
}

impl<D: ScalarDomain> Value for Scalar<D> {
    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    fn to_wire(&self) -> WireValue {
        match &self.state {
            ValueState::Null => WireValue::null(WireType::String),
            ValueState::Unknown => WireValue::unknown(WireType::String),
            ValueState::Known(known) => WireValue::string(known.raw.clone()),
        }
    }
}

impl<D: ScalarDomain> TypedValue for Scalar<D> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::custom_string::<D>(D::NAME)
    }

    fn null() -> Self {
        Self {
            state: ValueState::Null,
            rejected: None,
        }
    }

    fn unknown() -> Self {
        Self {
            state: ValueState::Unknown,
            rejected: None,
        }
    }

    fn from_wire(wire: &WireValue) -> ValueResult<Self> {
        let state = decode_state(wire, &WireType::String, |payload| match payload {
            WirePayload::String(raw) => Ok(raw.clone()),
            other => Err(ValueError::type_mismatch(D::NAME, other.kind())),
        })?;
        Ok(match state {
            ValueState::Null => Self::null(),
            ValueState::Unknown => Self::unknown(),
            ValueState::Known(raw) => Self::new(raw),
        })
    }
}

impl<D: ScalarDomain> Default for Scalar<D> {
    fn default() -> Self {
        Self::null()
    }
}

impl<D: ScalarDomain> Validate for Scalar<D> {
    fn validate(&self, path: &AttributePath, diags: &mut Diagnostics) {
        let raw = match (&self.state, &self.rejected) {
            (ValueState::Known(known), _) => &known.raw,
            (ValueState::Unknown, Some(rejected)) => rejected,
            _ => return,
        };
        if let Err(err) = D::parse(raw) {
            diags.push(invalid_domain_value(D::NAME, path, raw, err));
        }
    }
}

impl<D: SemanticDomain> SemanticEquals for Scalar<D> {
    fn semantic_equals(&self, other: &Self) -> bool {
        match (self.value_string(), other.value_string()) {
            (Some(a), Some(b)) => a == b || D::equivalent(a, b),
            _ => false,
        }
    }
}

impl<D: ScalarDomain> From<&str> for Scalar<D> {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<D: ScalarDomain> From<String> for Scalar<D> {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

fn invalid_domain_value(
    domain: &str,
    path: &AttributePath,
    raw: &str,
    cause: impl fmt::Display,
) -> Diagnostic {
    Diagnostic::error(ATV0200, format!("Invalid {}", domain))
        .with_detail(format!(
            "Attribute {} value {:?} is not a valid {}",
            path, raw, domain
        ))
        .with_path(path.clone())
        .with_value(raw)
        .with_cause(cause)
}

/// Parse error carrying a message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DomainError(pub(crate) String);

impl DomainError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
