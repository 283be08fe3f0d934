use super::{DomainError, Scalar, ScalarDomain, SemanticDomain};
use std::convert::Infallible;

/// Free text compared without regard to case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseInsensitive;

/// Tri-state case-insensitive string
pub type CaseInsensitiveString = Scalar<CaseInsensitive>;

impl ScalarDomain for CaseInsensitive {
    const NAME: &'static str = "CaseInsensitiveString";

    type Parsed = String;
    type Error = Infallible;

    fn parse(raw: &str) -> Result<String, Infallible> {
        Ok(fold_case(raw))
    }
}

impl SemanticDomain for CaseInsensitive {
    fn equivalent(a: &str, b: &str) -> bool {
        fold_case(a) == fold_case(b)
    }
}

/// Domain name; a trailing dot and letter case are not significant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DnsName;

/// Tri-state domain name
pub type DnsNameValue = Scalar<DnsName>;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

impl ScalarDomain for DnsName {
    const NAME: &'static str = "DNSName";

    /// Normalized name
    type Parsed = String;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<String, DomainError> {
        let name = normalize_dns_name(raw);
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(DomainError::new(format!(
                "{:?} must be between 1 and {} characters",
                raw, MAX_NAME_LEN
            )));
        }
        for label in name.split('.') {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(DomainError::new(format!(
                    "{:?} has a label that is empty or longer than {} characters",
                    raw, MAX_LABEL_LEN
                )));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(DomainError::new(format!(
                    "{:?} has a label that starts or ends with a hyphen",
                    raw
                )));
            }
        }
        Ok(name)
    }
}

impl SemanticDomain for DnsName {
    fn equivalent(a: &str, b: &str) -> bool {
        normalize_dns_name(a) == normalize_dns_name(b)
    }
}

/// Unicode simple case fold, one char in and one char out
fn fold_case(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Map a char to the lowercase form of its uppercase form.
///
/// Variants such as final sigma and long s share an uppercase form and so
/// fold together. Mappings that expand to several chars (`ß` to `SS`) are not
/// simple folds and leave the char as it is.
fn fold_char(c: char) -> char {
    let upper = single(c.to_uppercase()).unwrap_or(c);
    single(upper.to_lowercase()).unwrap_or(upper)
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn normalize_dns_name(s: &str) -> String {
    fold_case(s.strip_suffix('.').unwrap_or(s))
}
