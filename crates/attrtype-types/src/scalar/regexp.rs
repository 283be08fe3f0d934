use super::{Scalar, ScalarDomain};
use regex::Regex;

/// Regular expression source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Regexp;

/// Tri-state regular expression
pub type RegexpValue = Scalar<Regexp>;

impl ScalarDomain for Regexp {
    const NAME: &'static str = "Regexp";

    type Parsed = Regex;
    type Error = regex::Error;

    fn parse(raw: &str) -> Result<Regex, regex::Error> {
        Regex::new(raw)
    }
}
