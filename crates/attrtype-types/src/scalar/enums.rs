use super::{DomainError, Scalar, ScalarDomain};
use std::fmt;
use std::marker::PhantomData;

/// A closed set of string values backed by a Rust enum
pub trait EnumValues: Copy + fmt::Debug + Send + Sync + 'static {
    /// Display name of the type descriptor
    const NAME: &'static str;

    /// Every variant
    fn variants() -> &'static [Self];

    /// Wire string of one variant
    fn as_str(&self) -> &'static str;
}

/// String domain of an [`EnumValues`] type
pub struct EnumDomain<E>(PhantomData<E>);

/// Tri-state string restricted to the variants of `E`
pub type StringEnum<E> = Scalar<EnumDomain<E>>;

impl<E: EnumValues> ScalarDomain for EnumDomain<E> {
    const NAME: &'static str = E::NAME;

    type Parsed = E;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<E, DomainError> {
        E::variants()
            .iter()
            .find(|variant| variant.as_str() == raw)
            .copied()
            .ok_or_else(|| {
                let expected: Vec<&str> = E::variants().iter().map(EnumValues::as_str).collect();
                DomainError::new(format!(
                    "expected one of [{}], got {:?}",
                    expected.join(", "),
                    raw
                ))
            })
    }
}

impl<E: EnumValues> StringEnum<E> {
    /// Known value of one variant
    pub fn from_variant(variant: E) -> Self {
        Self::new(variant.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{DynValue, TypedValue, Validate, Value};
    use attrtype_diagnostics::{AttributePath, Diagnostics};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Protocol {
        Tcp,
        Udp,
    }

    impl EnumValues for Protocol {
        const NAME: &'static str = "Protocol";

        fn variants() -> &'static [Self] {
            &[Self::Tcp, Self::Udp]
        }

        fn as_str(&self) -> &'static str {
            match self {
                Self::Tcp => "tcp",
                Self::Udp => "udp",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Transport {
        Tcp,
    }

    impl EnumValues for Transport {
        const NAME: &'static str = "Protocol";

        fn variants() -> &'static [Self] {
            &[Self::Tcp]
        }

        fn as_str(&self) -> &'static str {
            "tcp"
        }
    }

    #[test]
    fn test_enums_sharing_a_name_have_distinct_types() {
        let protocol = StringEnum::<Protocol>::descriptor();
        let transport = StringEnum::<Transport>::descriptor();
        assert_eq!(protocol.to_string(), transport.to_string());
        assert_ne!(protocol, transport);
        assert!(!StringEnum::<Protocol>::new("tcp").dyn_equal(&StringEnum::<Transport>::new("tcp")));
    }

    #[test]
    fn test_known_variant() {
        let value = StringEnum::<Protocol>::new("udp");
        assert_eq!(value.value_domain(), Some(&Protocol::Udp));
        assert_eq!(value, StringEnum::from_variant(Protocol::Udp));
        assert_eq!(
            StringEnum::<Protocol>::descriptor().to_string(),
            "Protocol"
        );
    }

    #[test]
    fn test_unlisted_value() {
        let value = StringEnum::<Protocol>::new("icmp");
        assert!(value.is_unknown());

        let mut diags = Diagnostics::new();
        value.validate(&AttributePath::root("protocol"), &mut diags);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.cause.as_deref(), Some("expected one of [tcp, udp], got \"icmp\""));
    }
}
