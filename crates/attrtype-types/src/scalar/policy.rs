use super::{DomainError, Scalar, ScalarDomain, SemanticDomain};
use crate::semantic::multiset_equal;
use serde_json::{Map, Value as Json};
use std::collections::{BTreeMap, BTreeSet};

/// Access policy document text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IamPolicy;

/// Tri-state policy document
pub type IamPolicyValue = Scalar<IamPolicy>;

impl ScalarDomain for IamPolicy {
    const NAME: &'static str = "IAMPolicy";

    type Parsed = Json;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<Json, DomainError> {
        if raw.trim().is_empty() {
            return Ok(Json::Object(Map::new()));
        }
        match serde_json::from_str(raw) {
            Ok(doc @ Json::Object(_)) => Ok(doc),
            Ok(_) => Err(DomainError::new("policy document must be a JSON object")),
            Err(err) => Err(DomainError::new(format!("invalid policy document: {}", err))),
        }
    }
}

impl SemanticDomain for IamPolicy {
    fn equivalent(a: &str, b: &str) -> bool {
        policies_equivalent(a, b)
    }
}

/// Check if two policy documents grant the same permissions.
///
/// Statement order, action case and the order of values inside actions,
/// resources, principals and conditions are not significant. A blank
/// document equals `{}`. Malformed documents are never equivalent.
pub fn policies_equivalent(a: &str, b: &str) -> bool {
    match (CanonicalPolicy::parse(a), CanonicalPolicy::parse(b)) {
        (Some(a), Some(b)) => {
            a.version == b.version
                && a.id == b.id
                && a.extra == b.extra
                && multiset_equal(&a.statements, &b.statements)
        }
        _ => false,
    }
}

type StringSet = BTreeSet<String>;
type PrincipalMap = BTreeMap<String, StringSet>;
type ConditionMap = BTreeMap<String, BTreeMap<String, StringSet>>;

#[derive(Debug, Default)]
struct CanonicalPolicy {
    version: Option<String>,
    id: Option<String>,
    statements: Vec<CanonicalStatement>,
    extra: BTreeMap<String, Json>,
}

#[derive(Debug, Default, PartialEq)]
struct CanonicalStatement {
    sid: Option<String>,
    effect: Option<String>,
    principal: Option<PrincipalMap>,
    not_principal: Option<PrincipalMap>,
    action: Option<StringSet>,
    not_action: Option<StringSet>,
    resource: Option<StringSet>,
    not_resource: Option<StringSet>,
    condition: Option<ConditionMap>,
    extra: BTreeMap<String, Json>,
}

impl CanonicalPolicy {
    fn parse(raw: &str) -> Option<Self> {
        let Json::Object(doc) = IamPolicy::parse(raw).ok()? else {
            return None;
        };
        let mut policy = Self::default();
        for (key, value) in &doc {
            match key.as_str() {
                "Version" => policy.version = Some(value.as_str()?.to_string()),
                "Id" => policy.id = Some(value.as_str()?.to_string()),
                "Statement" => {
                    policy.statements = match value {
                        Json::Array(items) => items
                            .iter()
                            .map(CanonicalStatement::parse)
                            .collect::<Option<Vec<_>>>()?,
                        single @ Json::Object(_) => vec![CanonicalStatement::parse(single)?],
                        _ => return None,
                    }
                }
                _ => {
                    policy.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Some(policy)
    }
}

impl CanonicalStatement {
    fn parse(value: &Json) -> Option<Self> {
        let mut statement = Self::default();
        for (key, value) in value.as_object()? {
            match key.as_str() {
                "Sid" => statement.sid = Some(value.as_str()?.to_string()),
                "Effect" => statement.effect = Some(value.as_str()?.to_string()),
                "Principal" => statement.principal = Some(principals(value)?),
                "NotPrincipal" => statement.not_principal = Some(principals(value)?),
                "Action" => statement.action = Some(string_set(value, true)?),
                "NotAction" => statement.not_action = Some(string_set(value, true)?),
                "Resource" => statement.resource = Some(string_set(value, false)?),
                "NotResource" => statement.not_resource = Some(string_set(value, false)?),
                "Condition" => statement.condition = Some(conditions(value)?),
                _ => {
                    statement.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Some(statement)
    }
}

/// `"*"` is shorthand for `{"AWS": "*"}`
fn principals(value: &Json) -> Option<PrincipalMap> {
    match value {
        Json::String(s) if s == "*" => {
            Some(PrincipalMap::from([("AWS".to_string(), StringSet::from(["*".to_string()]))]))
        }
        Json::Object(map) => map
            .iter()
            .map(|(kind, ids)| Some((kind.clone(), string_set(ids, false)?)))
            .collect(),
        _ => None,
    }
}

fn conditions(value: &Json) -> Option<ConditionMap> {
    value
        .as_object()?
        .iter()
        .map(|(operator, entries)| {
            let entries = entries
                .as_object()?
                .iter()
                .map(|(key, values)| Some((key.clone(), string_set(values, false)?)))
                .collect::<Option<BTreeMap<_, _>>>()?;
            Some((operator.clone(), entries))
        })
        .collect()
}

/// A scalar or an array of scalars as a set of strings
fn string_set(value: &Json, fold_case: bool) -> Option<StringSet> {
    let items = match value {
        Json::Array(items) => items.iter().map(scalar_string).collect::<Option<Vec<_>>>()?,
        other => vec![scalar_string(other)?],
    };
    Some(if fold_case {
        items.into_iter().map(|s| s.to_lowercase()).collect()
    } else {
        items.into_iter().collect()
    })
}

fn scalar_string(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Bool(b) => Some(b.to_string()),
        Json::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
