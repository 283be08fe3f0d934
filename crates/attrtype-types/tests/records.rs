//! Record declarations through `#[derive(Record)]`
//!
//! Covers record type derivation and caching, flattened and nested records,
//! wire round trips of nested-record collections and record validation.

use attrtype_diagnostics::{ATV0200, ATV0301};
use attrtype_types::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Record)]
struct Named {
    #[attr(name = "name")]
    name: StringValue,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Common {
    #[attr(name = "description")]
    description: StringValue,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Rule {
    #[attr(name = "name")]
    name: StringValue,

    #[attr(name = "cidr_blocks")]
    cidr_blocks: SetValue<CidrBlockValue>,

    #[attr(flatten)]
    common: Common,

    #[attr(skip)]
    note: String,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Owner {
    #[attr(name = "account_id")]
    account_id: StringValue,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Firewall {
    #[attr(name = "rules")]
    rules: ListNestedValue<Rule>,

    #[attr(name = "owner")]
    owner: ObjectValue<Owner>,

    #[attr(name = "tags")]
    tags: MapValue<StringValue>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Untagged {
    #[attr(name = "id")]
    id: StringValue,

    forgotten: StringValue,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Collides {
    #[attr(name = "description")]
    summary: StringValue,

    #[attr(flatten)]
    common: Common,
}

fn rule(name: &str, cidr: &str) -> Rule {
    Rule {
        name: StringValue::new(name),
        cidr_blocks: SetValue::new(vec![CidrBlockValue::new(cidr)]).unwrap(),
        common: Common {
            description: StringValue::null(),
        },
        note: String::new(),
    }
}

fn named_object_type() -> WireType {
    WireType::Object(IndexMap::from([("name".to_string(), WireType::String)]))
}

// === Derivation ===

#[test]
fn test_flattened_fields_join_parent_in_order() {
    let record_type = derive_record_type::<Rule>().unwrap();
    let names: Vec<&str> = record_type.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["name", "cidr_blocks", "description"]);
    assert_eq!(
        record_type.field("cidr_blocks"),
        Some(&TypeDescriptor::set(CidrBlockValue::descriptor()))
    );
    assert_eq!(record_type.field("note"), None);
}

#[test]
fn test_derivation_is_idempotent() {
    let first = record_type::<Firewall>();
    let second = record_type::<Firewall>();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, derive_record_type::<Firewall>().unwrap());
}

#[test]
fn test_nested_records_resolve_three_levels_deep() {
    let firewall = record_type::<Firewall>();
    let rules = firewall.field("rules").unwrap();
    assert!(rules.is_nested());

    let rule_type = rules.record_type().unwrap();
    assert!(Arc::ptr_eq(rule_type, &record_type::<Rule>()));
    assert_eq!(
        rule_type.field("description"),
        Some(&TypeDescriptor::string())
    );
    assert_eq!(
        firewall.field("owner").map(TypeDescriptor::category),
        Some(ValueCategory::Record)
    );
}

#[test]
fn test_untagged_field_is_a_definition_error() {
    let err = try_record_type::<Untagged>().unwrap_err();
    assert!(matches!(
        err,
        DefinitionError::MissingFieldTag { ref field, .. } if field == "forgotten"
    ));
}

#[test]
fn test_duplicate_tag_through_flatten_is_a_definition_error() {
    let err = derive_record_type::<Collides>().unwrap_err();
    assert!(matches!(
        err,
        DefinitionError::DuplicateFieldTag { ref tag, .. } if tag == "description"
    ));
    assert_eq!(ValueError::from(err).code(), ATV0301);
}

#[test]
#[should_panic(expected = "forgotten")]
fn test_record_type_panics_on_invalid_declaration() {
    let _ = record_type::<Untagged>();
}

// === Wire round trips ===

#[test]
fn test_list_nested_end_to_end() {
    let value = ListNestedValue::from_records(vec![Named {
        name: StringValue::new("test"),
    }]);

    let expected = WireValue::list(
        named_object_type(),
        vec![
            WireValue::object(
                IndexMap::from([("name".to_string(), WireType::String)]),
                IndexMap::from([("name".to_string(), WireValue::string("test"))]),
            )
            .unwrap(),
        ],
    )
    .unwrap();

    let wire = value.to_wire();
    assert_eq!(wire, expected);
    assert_eq!(ListNestedValue::<Named>::from_wire(&wire).unwrap(), value);
}

#[test]
fn test_empty_records_encode_as_null() {
    let value = ListNestedValue::<Named>::from_records(vec![]);
    assert_eq!(value.to_wire(), WireValue::null(WireType::list(named_object_type())));
    assert!(ListNestedValue::<Named>::from_wire(&value.to_wire()).unwrap().is_null());

    let set = SetNestedValue::<Named>::from_records(vec![]).unwrap();
    assert!(set.is_null());
    assert!(SetNestedValue::<Named>::from_wire(&set.to_wire()).unwrap().is_null());
}

#[test]
fn test_round_trip_keeps_every_state() {
    let mut ssh = rule("ssh", "10.0.0.0/8");
    ssh.note = "local only".to_string();
    let known = Firewall {
        rules: ListNestedValue::new(vec![ssh]),
        owner: ObjectValue::from_ptr(Some(Owner {
            account_id: StringValue::unknown(),
        })),
        tags: MapValue::null(),
    };
    let wire = ObjectValue::new(known.clone()).to_wire();
    let decoded = ObjectValue::<Firewall>::from_wire(&wire).unwrap();

    let firewall = decoded.to_ptr().unwrap();
    assert_eq!(firewall.rules.len(), 1);
    assert!(firewall.owner.to_ptr().unwrap().account_id.is_unknown());
    assert!(firewall.tags.is_null());
    // Skipped fields are not encoded and come back as their default
    assert_eq!(firewall.rules.to_ptr().unwrap().unwrap().note, "");
}

#[test]
fn test_decode_rejects_missing_attribute() {
    let wire = WireValue::object(IndexMap::new(), IndexMap::new()).unwrap();
    let payload = wire.as_entries().unwrap();
    let err = Named::from_wire_fields(payload).unwrap_err();
    assert_eq!(
        err,
        ValueError::MissingAttribute {
            name: "name".into()
        }
    );
}

// === Cardinality ===

#[test]
fn test_single_record_cardinality() {
    let none = ListNestedValue::<Rule>::null();
    assert_eq!(none.to_ptr().unwrap(), None);
    assert!(none.to_records().is_empty());

    let one = ListNestedValue::from_ptr(Some(rule("ssh", "10.0.0.0/8")));
    assert_eq!(one.to_ptr().unwrap().map(|r| &r.name), Some(&StringValue::new("ssh")));

    let two = ListNestedValue::new(vec![rule("ssh", "10.0.0.0/8"), rule("web", "0.0.0.0/0")]);
    assert_eq!(two.to_records().len(), 2);
    assert!(matches!(
        two.to_ptr(),
        Err(ValueError::TooManyElements { want: 1, got: 2 })
    ));
}

#[test]
fn test_single_record_cardinality_in_sets() {
    let none = SetNestedValue::<Rule>::null();
    assert_eq!(none.to_ptr().unwrap(), None);
    assert!(none.to_records().is_empty());

    let one = SetNestedValue::from_ptr(Some(rule("ssh", "10.0.0.0/8")));
    assert_eq!(one.to_ptr().unwrap().map(|r| &r.name), Some(&StringValue::new("ssh")));
    assert!(SetNestedValue::<Rule>::from_ptr(None).is_null());

    let two = SetNestedValue::from_records(vec![rule("ssh", "10.0.0.0/8"), rule("web", "0.0.0.0/0")])
        .unwrap();
    assert_eq!(two.to_records().len(), 2);
    assert!(matches!(
        two.to_ptr(),
        Err(ValueError::TooManyElements { want: 1, got: 2 })
    ));
}

#[test]
fn test_nested_set_rejects_duplicate_records() {
    let err = SetNestedValue::from_records(vec![rule("ssh", "10.0.0.0/8"), rule("ssh", "10.0.0.0/8")])
        .unwrap_err();
    assert_eq!(err, ValueError::DuplicateSetElement { index: 1 });
}

// === Expand and flatten ===

#[derive(Debug, Clone, PartialEq, Default)]
struct ApiRule {
    name: String,
    cidr_blocks: Vec<String>,
    description: Option<String>,
}

impl Expand<ApiRule> for Rule {
    fn expand(&self) -> ValueResult<ApiRule> {
        Ok(ApiRule {
            name: self.name.expand()?,
            cidr_blocks: self.cidr_blocks.expand()?,
            description: self.common.description.expand()?,
        })
    }
}

impl Flatten<ApiRule> for Rule {
    fn flatten(from: ApiRule) -> ValueResult<Self> {
        Ok(Rule {
            name: StringValue::flatten(from.name)?,
            cidr_blocks: SetValue::flatten(from.cidr_blocks)?,
            common: Common {
                description: StringValue::flatten(from.description)?,
            },
            note: String::new(),
        })
    }
}

fn api_rule(name: &str, cidr: &str) -> ApiRule {
    ApiRule {
        name: name.to_string(),
        cidr_blocks: vec![cidr.to_string()],
        description: None,
    }
}

#[test]
fn test_expand_records_to_plain_structs() {
    let rules = ListNestedValue::new(vec![rule("ssh", "10.0.0.0/8"), rule("web", "0.0.0.0/0")]);
    let plain: Vec<ApiRule> = rules.expand().unwrap();
    assert_eq!(plain, vec![api_rule("ssh", "10.0.0.0/8"), api_rule("web", "0.0.0.0/0")]);

    let single: ValueResult<Option<ApiRule>> = rules.expand();
    assert!(matches!(single, Err(ValueError::TooManyElements { want: 1, got: 2 })));

    let absent: Option<ApiRule> = ListNestedValue::<Rule>::unknown().expand().unwrap();
    assert_eq!(absent, None);
}

#[test]
fn test_flatten_plain_structs_to_records() {
    let rules = ListNestedValue::<Rule>::flatten(vec![api_rule("ssh", "10.0.0.0/8")]).unwrap();
    assert_eq!(rules, ListNestedValue::new(vec![rule("ssh", "10.0.0.0/8")]));
    assert!(ListNestedValue::<Rule>::flatten(Vec::<ApiRule>::new()).unwrap().is_null());

    let owner = ObjectValue::<Rule>::flatten(Some(api_rule("ssh", "10.0.0.0/8"))).unwrap();
    assert_eq!(owner.to_ptr(), Some(&rule("ssh", "10.0.0.0/8")));
    assert!(ObjectValue::<Rule>::flatten(None::<ApiRule>).unwrap().is_null());

    let err = SetNestedValue::<Rule>::flatten(vec![api_rule("ssh", "10.0.0.0/8"); 2]).unwrap_err();
    assert_eq!(err, ValueError::DuplicateSetElement { index: 1 });
}

#[test]
fn test_expand_flatten_keeps_plain_data() {
    let plain = vec![
        ApiRule {
            description: Some("bastion".to_string()),
            ..api_rule("ssh", "10.0.0.0/8")
        },
        api_rule("web", "0.0.0.0/0"),
    ];
    let rules = SetNestedValue::<Rule>::flatten(plain.clone()).unwrap();
    let back: Vec<ApiRule> = rules.expand().unwrap();
    assert_eq!(back, plain);
}

// === Validation ===

#[test]
fn test_validate_fields_reports_nested_paths() {
    let firewall = Firewall {
        rules: ListNestedValue::new(vec![
            rule("ssh", "10.0.0.0/8"),
            rule("web", "10.0.0.1/8"),
        ]),
        owner: ObjectValue::null(),
        tags: MapValue::null(),
    };

    let mut diags = Diagnostics::new();
    firewall.validate_fields(&AttributePath::empty(), &mut diags);

    assert_eq!(diags.len(), 1);
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.code, ATV0200);
    assert_eq!(
        diag.path.as_ref().map(ToString::to_string).as_deref(),
        Some("rules[1].cidr_blocks[0]")
    );
    assert_eq!(diag.value.as_deref(), Some("10.0.0.1/8"));
}
