//! Typed value behaviour across the public surface
//!
//! Tests tri-state round trips, fail-soft scalar parsing, semantic equality
//! and the multiset ordering property.

use attrtype_types::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// === Tri-state round trips ===

fn assert_round_trip<T: TypedValue>(value: T) {
    let wire = value.to_wire();
    let decoded = T::from_wire(&wire).unwrap();
    assert_eq!(decoded.is_null(), value.is_null());
    assert_eq!(decoded.is_unknown(), value.is_unknown());
    assert!(decoded == value, "{:?} decoded as {:?}", value, decoded);
}

#[test]
fn test_every_state_survives_the_wire() {
    assert_round_trip(StringValue::null());
    assert_round_trip(StringValue::unknown());
    assert_round_trip(StringValue::new("x"));
    assert_round_trip(ArnValue::null());
    assert_round_trip(ArnValue::unknown());
    assert_round_trip(ArnValue::new("arn:aws:iam::123456789012:role/admin"));
    assert_round_trip(ListValue::<Int64Value>::unknown());
    assert_round_trip(ListValue::new(vec![Int64Value::new(1), Int64Value::null()]));
    assert_round_trip(MultisetValue::<BoolValue>::null());
}

#[test]
fn test_descriptor_does_not_depend_on_state() {
    let values: Vec<Box<dyn DynValue>> = vec![
        Box::new(DurationValue::null()),
        Box::new(DurationValue::unknown()),
        Box::new(DurationValue::new("1h30m")),
        Box::new(DurationValue::new("ninety minutes")),
    ];
    for value in &values {
        assert_eq!(value.value_type(), DurationValue::descriptor());
        assert_eq!(value.value_type().name(), "Duration");
    }
}

#[test]
fn test_wire_shape_mismatch_is_a_decode_error() {
    let err = StringValue::from_wire(&WireValue::bool(true)).unwrap_err();
    assert!(err.is_decode_error());
    assert!(matches!(err, ValueError::TypeMismatch { .. }));
}

// === Fail-soft scalars ===

#[test]
fn test_malformed_scalar_decodes_as_unknown() {
    let value = ArnValue::from_wire(&WireValue::string("not ok")).unwrap();
    assert!(value.is_unknown());
    assert_eq!(value.value_string(), None);

    let mut diags = Diagnostics::new();
    value.validate(&AttributePath::root("role_arn"), &mut diags);
    assert!(diags.has_error());
    assert_eq!(diags.iter().next().unwrap().value.as_deref(), Some("not ok"));
}

#[rstest]
#[case::cidr(CidrBlockValue::new("10.0.0.0/16").is_known(), true)]
#[case::cidr_host_bits(CidrBlockValue::new("10.0.0.1/16").is_known(), false)]
#[case::duration(DurationValue::new("-1.5h").is_known(), true)]
#[case::timestamp(TimestampValue::new("2023-01-02T03:04:05Z").is_known(), true)]
#[case::timestamp_date_only(TimestampValue::new("2023-01-02").is_known(), false)]
#[case::regexp(RegexpValue::new("^a+$").is_known(), true)]
#[case::regexp_unbalanced(RegexpValue::new("(a").is_known(), false)]
#[case::window(OnceAWeekWindowValue::new("sun:04:00-sun:05:00").is_known(), true)]
#[case::json(JsonStringValue::new("{\"a\": 1}").is_known(), true)]
#[case::json_truncated(JsonStringValue::new("{\"a\":").is_known(), false)]
fn test_domain_parsing(#[case] known: bool, #[case] expected: bool) {
    assert_eq!(known, expected);
}

// === Semantic equality ===

#[test]
fn test_case_insensitive_string() {
    let prior = CaseInsensitiveString::new("Hello");
    let proposed = CaseInsensitiveString::new("HELLO");
    assert_ne!(prior, proposed);
    assert!(prior.semantic_equals(&proposed));
    assert!(interchangeable(&prior, &proposed));
    assert!(!interchangeable(&prior, &CaseInsensitiveString::new("Goodbye")));
}

#[test]
fn test_absent_values_are_only_interchangeable_with_themselves() {
    let known = CaseInsensitiveString::new("a");
    assert!(interchangeable(&CaseInsensitiveString::null(), &CaseInsensitiveString::null()));
    assert!(!interchangeable(&known, &CaseInsensitiveString::unknown()));
    assert!(!interchangeable(&CaseInsensitiveString::null(), &known));
}

#[rstest]
#[case("1h", "60m")]
#[case("1h30m", "90m")]
#[case("1000ms", "1s")]
fn test_equivalent_durations(#[case] a: &str, #[case] b: &str) {
    assert!(DurationValue::new(a).semantic_equals(&DurationValue::new(b)));
}

#[test]
fn test_timestamps_compare_instants() {
    let utc = TimestampValue::new("2023-01-02T03:04:05Z");
    let offset = TimestampValue::new("2023-01-02T05:04:05+02:00");
    assert!(utc.semantic_equals(&offset));
    assert!(!utc.semantic_equals(&TimestampValue::new("2023-01-02T03:04:06Z")));
}

#[test]
fn test_policy_formatting_is_not_significant() {
    let compact = IamPolicyValue::new(
        r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":["s3:GetObject","s3:PutObject"],"Resource":"*"}]}"#,
    );
    let reordered = IamPolicyValue::new(
        r#"{
            "Statement": {
                "Resource": ["*"],
                "Action": ["S3:PutObject", "s3:getobject"],
                "Effect": "Allow"
            },
            "Version": "2012-10-17"
        }"#,
    );
    assert!(compact.semantic_equals(&reordered));

    let denied = IamPolicyValue::new(
        r#"{"Version":"2012-10-17","Statement":[{"Effect":"Deny","Action":"s3:GetObject","Resource":"*"}]}"#,
    );
    assert!(!compact.semantic_equals(&denied));
}

// === Multisets ===

fn methods(values: &[&str]) -> MultisetValue<StringValue> {
    values.iter().copied().map(StringValue::from).collect()
}

#[test]
fn test_multiset_ignores_order_but_counts() {
    let a = methods(&["HEAD", "POST", "GET"]);
    assert!(a.semantic_equals(&methods(&["GET", "HEAD", "POST"])));
    assert!(!a.semantic_equals(&methods(&["HEAD", "POST", "GET", "GET"])));
    assert_eq!(
        a.to_wire().as_elements().map(<[WireValue]>::len),
        Some(3)
    );
}

proptest! {
    #[test]
    fn prop_multiset_equal_under_permutation(
        (values, shuffled) in prop::collection::vec("[a-c]{1,2}", 0..8)
            .prop_flat_map(|values| {
                let shuffled = Just(values.clone()).prop_shuffle();
                (Just(values), shuffled)
            })
    ) {
        let a: MultisetValue<StringValue> = values.into_iter().map(StringValue::from).collect();
        let b: MultisetValue<StringValue> = shuffled.into_iter().map(StringValue::from).collect();
        prop_assert!(a.semantic_equals(&b));
        prop_assert!(b.semantic_equals(&a));
    }

    #[test]
    fn prop_multiset_detects_extra_element(
        values in prop::collection::vec("[a-c]", 0..8),
        extra in "[a-c]",
    ) {
        let a: MultisetValue<StringValue> = values.iter().cloned().map(StringValue::from).collect();
        let b: MultisetValue<StringValue> = values
            .into_iter()
            .chain(std::iter::once(extra))
            .map(StringValue::from)
            .collect();
        prop_assert!(!a.semantic_equals(&b));
    }
}

// === Null synthesis ===

#[test]
fn test_null_value_of_keeps_type() {
    let example: Box<dyn DynValue> = Box::new(SetValue::new(vec![DnsNameValue::new("example.com")]).unwrap());
    let null = null_value_of(example.as_ref()).unwrap();
    assert!(null.is_null());
    assert_eq!(null.value_type(), example.value_type());
    assert!(null.dyn_equal(&SetValue::<DnsNameValue>::null()));
}

#[test]
fn test_null_value_of_dynamic_is_unsupported() {
    let example = DynamicValue::new(WireValue::string("anything"));
    assert!(matches!(
        null_value_of(&example),
        Err(ValueError::UnsupportedKind { .. })
    ));
}
