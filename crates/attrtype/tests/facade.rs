//! Records declared against the facade crate

use attrtype::{
    ListNestedValue, MultisetValue, Record, SemanticEquals, StringValue, TypedValue, Value,
    WireValue, diagnostics::AttributePath, diagnostics::Diagnostics,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq, Record)]
#[attr(crate = "attrtype")]
struct Listener {
    #[attr(name = "protocol")]
    protocol: StringValue,

    #[attr(name = "methods")]
    methods: MultisetValue<StringValue>,
}

#[test]
fn test_derive_through_facade() {
    let listener = Listener {
        protocol: StringValue::new("HTTPS"),
        methods: MultisetValue::new(vec![StringValue::new("GET"), StringValue::new("HEAD")]),
    };
    let value = ListNestedValue::from_ptr(Some(listener.clone()));

    let wire: WireValue = value.to_wire();
    let decoded = ListNestedValue::<Listener>::from_wire(&wire).unwrap();
    assert_eq!(decoded.to_ptr().unwrap(), Some(&listener));

    let mut diags = Diagnostics::new();
    listener.validate_fields(&AttributePath::root("listener"), &mut diags);
    assert!(diags.is_empty());
}

#[test]
fn test_reordered_methods_are_equivalent() {
    let prior = MultisetValue::new(vec![StringValue::new("GET"), StringValue::new("HEAD")]);
    let proposed = MultisetValue::new(vec![StringValue::new("HEAD"), StringValue::new("GET")]);
    assert!(prior != proposed);
    assert!(prior.semantic_equals(&proposed));
}
