use super::{Scalar, ScalarDomain, SemanticDomain};

/// Structured document text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonString;

/// Tri-state document text
pub type JsonStringValue = Scalar<JsonString>;

impl ScalarDomain for JsonString {
    const NAME: &'static str = "JSONString";

    type Parsed = serde_json::Value;
    type Error = serde_json::Error;

    fn parse(raw: &str) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl SemanticDomain for JsonString {
    fn equivalent(a: &str, b: &str) -> bool {
        matches!((Self::parse(a), Self::parse(b)), (Ok(a), Ok(b)) if a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SemanticEquals;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"a":1,"b":[true,null]}"#, r#"{ "b": [true, null], "a": 1 }"#, true)]
    #[case(r#"{"a":1}"#, r#"{"a":2}"#, false)]
    #[case(r#"[1,2]"#, r#"[2,1]"#, false)]
    #[case(r#""text""#, r#"  "text"  "#, true)]
    fn test_semantic_equality(#[case] a: &str, #[case] b: &str, #[case] equal: bool) {
        let a = JsonStringValue::new(a);
        let b = JsonStringValue::new(b);
        assert_eq!(a.semantic_equals(&b), equal);
    }

    #[test]
    fn test_malformed_is_never_equivalent() {
        assert!(!JsonString::equivalent("{", "{"));
        assert!(!JsonString::equivalent("{", "{}"));
    }
}
