//! Diagnostics serialize for machine-readable reporting

use attrtype_diagnostics::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_json_round_trip() {
    let diag = Diagnostic::error(ATV0200, "Invalid CIDR Block Value")
        .with_path(AttributePath::root("ingress").index(2).attribute("cidr_block"))
        .with_value("10.0.0.0/33")
        .with_cause("prefix length 33 exceeds 32");

    let json = serde_json::to_string(&diag).unwrap();
    let back: Diagnostic = serde_json::from_str(&json).unwrap();

    assert_eq!(back, diag);
    assert_eq!(back.path.unwrap().to_string(), "ingress[2].cidr_block");
}

#[test]
fn test_error_code_serializes_as_number() {
    let json = serde_json::to_string(&ATV0102).unwrap();
    assert_eq!(json, "102");
}
