use super::{DomainError, Scalar, ScalarDomain};
use std::fmt;

/// Resource identifier `arn:partition:service:region:account:resource`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arn;

/// Tri-state resource identifier
pub type ArnValue = Scalar<Arn>;

/// Sections of a parsed resource identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedArn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    /// Everything after the fifth separator, separators included
    pub resource: String,
}

const PREFIX: &str = "arn:";

impl ScalarDomain for Arn {
    const NAME: &'static str = "ARN";

    type Parsed = ParsedArn;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<ParsedArn, DomainError> {
        let rest = raw
            .strip_prefix(PREFIX)
            .ok_or_else(|| DomainError::new("arn: invalid prefix"))?;
        let sections: Vec<&str> = rest.splitn(5, ':').collect();
        let [partition, service, region, account_id, resource] = sections[..] else {
            return Err(DomainError::new("arn: not enough sections"));
        };
        if partition.is_empty() {
            return Err(DomainError::new("arn: invalid partition"));
        }
        if service.is_empty() {
            return Err(DomainError::new("arn: invalid service"));
        }
        if resource.is_empty() {
            return Err(DomainError::new("arn: invalid resource"));
        }
        Ok(ParsedArn {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
        })
    }
}

impl fmt::Display for ParsedArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}:{}:{}:{}",
            PREFIX, self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}
