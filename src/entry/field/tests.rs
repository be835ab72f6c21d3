use std::borrow::Cow;

use chrono::{TimeZone, Utc};
use entry_value::{ObjectMap, Value};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;
use similar_asserts::assert_eq;

use super::*;
use crate::entry::{Entry, Severity};

fn object(json: serde_json::Value) -> ObjectMap {
    Value::from(json).into_object().unwrap()
}

fn field(path: &str) -> Field {
    path.parse().unwrap()
}

fn entry_with_resource(resource: serde_json::Value) -> Entry {
    Entry {
        resource: Some(object(resource)),
        ..Entry::default()
    }
}

#[test]
fn set_adds_sibling_key() {
    let mut entry = entry_with_resource(json!({ "host": "a" }));
    field("resource.region").set(&mut entry, "us-east").unwrap();
    assert_eq!(
        entry.resource,
        Some(object(json!({ "host": "a", "region": "us-east" })))
    );
}

#[test]
fn root_get_on_absent_resource() {
    let mut entry = Entry::default();
    let root = field("resource");
    assert_eq!(root.get(&entry), None);

    root.set(&mut entry, object(json!({ "k": "v" }))).unwrap();
    assert_eq!(entry.resource, Some(object(json!({ "k": "v" }))));
    assert_eq!(
        root.get(&entry).map(Cow::into_owned),
        Some(Value::from(json!({ "k": "v" })))
    );
}

#[test]
fn get_missing_sibling_is_not_found() {
    let entry = entry_with_resource(json!({ "a": { "b": 1 } }));
    assert_eq!(field("resource.a.c").get(&entry), None);
    assert_eq!(
        field("resource.a.b").get(&entry).as_deref(),
        Some(&Value::from(1))
    );
}

#[test]
fn set_through_scalar_overwrites_it() {
    let mut entry = entry_with_resource(json!({ "a": 5 }));
    field("resource.a.b").set(&mut entry, "x").unwrap();
    assert_eq!(entry.resource, Some(object(json!({ "a": { "b": "x" } }))));
}

#[test]
fn get_through_scalar_is_not_found() {
    let entry = entry_with_resource(json!({ "a": 5, "l": [1, 2] }));
    assert_eq!(field("resource.a.b").get(&entry), None);
    assert_eq!(field("resource.l.b").get(&entry), None);
}

#[rstest]
#[case("resource")]
#[case("attributes")]
fn root_set_rejects_non_objects(#[case] path: &str) {
    let mut entry = Entry::default();
    let error = field(path).set(&mut entry, "scalar").unwrap_err();
    assert!(matches!(
        error,
        FieldError::RootAssignment { kind: "string", .. }
    ));
    assert_eq!(entry, Entry::default());
}

#[rstest]
#[case("resource.a", json!({ "b": 1 }))]
#[case("attributes.a", json!({ "b": 1 }))]
#[case("body.a", json!({ "b": 1 }))]
fn set_object_merges(#[case] path: &str, #[case] existing: serde_json::Value) {
    let mut entry = Entry::default();
    let field = field(path);
    field.set(&mut entry, Value::from(existing)).unwrap();
    field
        .set(&mut entry, object(json!({ "c": 2, "b": 3 })))
        .unwrap();

    assert_eq!(
        field.get(&entry).map(Cow::into_owned),
        Some(Value::from(json!({ "b": 3, "c": 2 })))
    );
}

#[test]
fn merge_at_root_creates_namespace() {
    let mut entry = Entry::default();
    field("attributes")
        .merge(&mut entry, object(json!({ "a": 1 })))
        .unwrap();
    field("attributes")
        .merge(&mut entry, object(json!({ "b": 2 })))
        .unwrap();
    assert_eq!(entry.attributes, Some(object(json!({ "a": 1, "b": 2 }))));
}

#[test]
fn merge_creates_nested_path() {
    let mut entry = entry_with_resource(json!({ "a": "scalar", "keep": true }));
    field("resource.a.b")
        .merge(&mut entry, object(json!({ "c": 1 })))
        .unwrap();
    assert_eq!(
        entry.resource,
        Some(object(json!({ "a": { "b": { "c": 1 } }, "keep": true })))
    );
}

#[test]
fn delete_returns_removed_value() {
    let mut entry = entry_with_resource(json!({ "a": { "b": 1, "c": 2 } }));
    assert_eq!(field("resource.a.b").delete(&mut entry), Some(Value::from(1)));
    assert_eq!(field("resource.a.b").delete(&mut entry), None);
    assert_eq!(entry.resource, Some(object(json!({ "a": { "c": 2 } }))));
}

#[test]
fn delete_through_scalar_does_not_modify() {
    let mut entry = entry_with_resource(json!({ "a": 5 }));
    assert_eq!(field("resource.a.b").delete(&mut entry), None);
    assert_eq!(field("resource.x.b").delete(&mut entry), None);
    assert_eq!(entry.resource, Some(object(json!({ "a": 5 }))));

    let mut empty = Entry::default();
    assert_eq!(field("resource.a").delete(&mut empty), None);
    assert_eq!(empty.resource, None);
}

#[test]
fn delete_root_clears_namespace() {
    let mut entry = entry_with_resource(json!({ "a": 1, "b": { "c": 2 } }));
    let root = field("resource");
    assert_eq!(
        root.delete(&mut entry),
        Some(Value::from(json!({ "a": 1, "b": { "c": 2 } })))
    );
    assert_eq!(entry.resource, None);
    assert_eq!(root.get(&entry), None);
    assert_eq!(root.delete(&mut entry), None);
}

#[test]
fn body_root_set_replaces() {
    let mut entry = Entry::with_body(json!({ "old": true }).to_string());
    let root = field("body");

    root.set(&mut entry, object(json!({ "new": 1 }))).unwrap();
    root.set(&mut entry, object(json!({ "newer": 2 }))).unwrap();
    assert_eq!(entry.body, Some(Value::from(json!({ "newer": 2 }))));

    root.set(&mut entry, "plain").unwrap();
    assert_eq!(root.get(&entry).as_deref(), Some(&Value::from("plain")));
}

#[test]
fn body_keyed_access() {
    let mut entry = Entry::with_body("a string body");
    let message = field("body.message");

    assert_eq!(message.get(&entry), None);
    assert_eq!(message.delete(&mut entry), None);
    assert_eq!(entry.body, Some(Value::from("a string body")));

    message.set(&mut entry, "hello").unwrap();
    assert_eq!(entry.body, Some(Value::from(json!({ "message": "hello" }))));

    field("body")
        .merge(&mut entry, object(json!({ "level": "info" })))
        .unwrap();
    assert_eq!(
        entry.body,
        Some(Value::from(json!({ "message": "hello", "level": "info" })))
    );
    assert!(field("body").delete(&mut entry).is_some());
    assert_eq!(entry.body, None);
}

#[test]
fn fixed_fields() {
    let mut entry = Entry::default();
    let ts = Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap();

    assert_eq!(field("timestamp").get(&entry), None);
    field("timestamp").set(&mut entry, ts).unwrap();
    assert_eq!(entry.timestamp, Some(ts));
    assert_eq!(
        field("timestamp").get(&entry).as_deref(),
        Some(&Value::Timestamp(ts))
    );
    assert_eq!(field("timestamp").delete(&mut entry), Some(Value::Timestamp(ts)));
    assert_eq!(entry.timestamp, None);

    field("severity").set(&mut entry, "warn").unwrap();
    assert_eq!(entry.severity, Severity::WARN);
    field("severity").set(&mut entry, 18).unwrap();
    assert_eq!(entry.severity.number(), 18);
    assert_eq!(field("severity").delete(&mut entry), Some(Value::from(18)));
    assert_eq!(entry.severity, Severity::DEFAULT);
    assert_eq!(field("severity").get(&entry), None);
    assert_eq!(field("severity").delete(&mut entry), None);

    field("severity_text").set(&mut entry, "WARNING").unwrap();
    assert_eq!(entry.severity_text.as_deref(), Some("WARNING"));
    field("severity_text").set(&mut entry, Value::Null).unwrap();
    assert_eq!(entry.severity_text, None);

    field("trace_id")
        .set(&mut entry, bytes::Bytes::from_static(&[1, 2, 3]))
        .unwrap();
    assert_eq!(entry.trace_id.as_deref(), Some(&[1_u8, 2, 3][..]));
}

#[test]
fn timestamps_parse_from_rfc3339_text() {
    let mut entry = Entry::default();

    field("timestamp")
        .set(&mut entry, "2022-01-02T03:04:05Z")
        .unwrap();
    assert_eq!(
        entry.timestamp,
        Some(Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap())
    );

    field("observed_timestamp")
        .set(&mut entry, "2022-01-02T05:04:05.250+02:00")
        .unwrap();
    assert_eq!(
        entry.observed_timestamp,
        Some(Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::milliseconds(250))
    );

    assert!(field("timestamp").set(&mut entry, "2022-01-02").is_err());
    assert_eq!(
        entry.timestamp,
        Some(Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap())
    );
}

#[test]
fn fixed_fields_reject_wrong_types() {
    let mut entry = Entry::default();

    let error = field("timestamp").set(&mut entry, "yesterday").unwrap_err();
    assert_eq!(
        error,
        FieldError::InvalidFixedValue {
            field: FixedField::Timestamp,
            expected: "a timestamp",
            found: "string",
        }
    );
    assert!(field("severity").set(&mut entry, 99).is_err());
    assert!(field("severity").set(&mut entry, "loud").is_err());
    assert!(field("scope_name").set(&mut entry, 1).is_err());
    assert_eq!(
        field("severity").merge(&mut entry, ObjectMap::new()),
        Err(FieldError::MergeIntoScalar {
            field: FixedField::Severity
        })
    );
}

#[test]
fn parent_and_child() {
    let f = field(r#"attributes.a["b.c"]"#);
    assert_eq!(f.parent(), field("attributes.a"));
    assert_eq!(f.parent().parent(), field("attributes"));
    assert_eq!(field("attributes").parent(), field("attributes"));
    assert_eq!(field("attributes.a").child("b.c"), f);
    assert_eq!(field("severity").child("x"), field("severity"));
    assert_eq!(field("severity").parent(), field("severity"));
}

#[test]
fn display_is_canonical() {
    assert_eq!(field(r#"attributes["a.b"]"#).to_string(), r#"attributes["a.b"]"#);
    assert_eq!(field(r#"resource["host"]"#).to_string(), "resource.host");
    assert_eq!(field("body").to_string(), "body");
    assert_eq!(field("observed_timestamp").to_string(), "observed_timestamp");
}

#[test]
fn typed_fields_reject_other_namespaces() {
    let error = "attributes.a".parse::<ResourceField>().unwrap_err();
    assert_eq!(
        error,
        FieldError::WrongNamespace {
            path: "attributes.a".into(),
            expected: "resource",
        }
    );
    assert!("body".parse::<AttributeField>().is_err());
    assert!("resource.a".parse::<FixedField>().is_err());
    assert_eq!("body.a".parse::<BodyField>(), Ok(BodyField::new(["a"])));
    assert_eq!("span_id".parse::<FixedField>(), Ok(FixedField::SpanId));

    let error = serde_json::from_str::<ResourceField>(r#""attributes.a""#).unwrap_err();
    assert!(error.to_string().contains("must start with resource"));
}

#[test]
fn malformed_paths_fail_to_parse() {
    assert!(matches!(
        "resource[".parse::<Field>(),
        Err(FieldError::Parse { .. })
    ));
    assert!(matches!(
        "$body.a".parse::<Field>(),
        Err(FieldError::Parse { .. })
    ));
}

#[test]
fn serde_round_trip() {
    let fields = vec![
        field("resource"),
        field(r#"attributes["k8s.pod.name"]"#),
        field("body.a.b"),
        field("severity"),
    ];
    let json = serde_json::to_string(&fields).unwrap();
    assert_eq!(
        json,
        r#"["resource","attributes[\"k8s.pod.name\"]","body.a.b","severity"]"#
    );
    let back: Vec<Field> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, fields);

    let yaml = serde_yaml::to_string(&fields).unwrap();
    let back: Vec<Field> = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, fields);
}

#[test]
fn fields_are_shareable() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<Field>();

    let field = std::sync::Arc::new(field("attributes.worker"));
    std::thread::scope(|scope| {
        for worker in 0..4_i64 {
            let field = &field;
            scope.spawn(move || {
                let mut entry = Entry::default();
                field.set(&mut entry, worker).unwrap();
                assert_eq!(field.get(&entry).as_deref(), Some(&Value::from(worker)));
            });
        }
    });
}

fn keyed_field() -> impl Strategy<Value = Field> {
    let keys = prop::collection::vec("[a-z.]{1,4}", 0..4);
    prop_oneof![
        keys.clone().prop_map(Field::resource),
        keys.clone().prop_map(Field::attribute),
        keys.prop_map(Field::body),
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn scalar_set_then_get(field in keyed_field(), value in scalar()) {
        prop_assume!(!field.is_root() || field.namespace() == entry_path::Namespace::Body);
        let mut entry = Entry::default();
        field.set(&mut entry, value.clone()).unwrap();
        prop_assert_eq!(field.get(&entry).map(Cow::into_owned), Some(value));
    }

    #[test]
    fn object_set_then_child_get(
        field in keyed_field(),
        values in prop::collection::btree_map("[a-z]{1,3}", scalar(), 0..4),
    ) {
        let mut entry = Entry::default();
        field.set(&mut entry, Value::Object(values.clone())).unwrap();
        for (key, value) in values {
            prop_assert_eq!(field.child(key).get(&entry).map(Cow::into_owned), Some(value));
        }
    }

    #[test]
    fn delete_then_get(field in keyed_field(), value in scalar()) {
        prop_assume!(!field.is_root());
        let mut entry = Entry::default();
        field.set(&mut entry, value.clone()).unwrap();
        prop_assert_eq!(field.delete(&mut entry), Some(value));
        prop_assert_eq!(field.get(&entry), None);
    }

    #[test]
    fn parent_child_inverse(field in keyed_field()) {
        if let Some(last) = field.keys().last() {
            prop_assert_eq!(field.parent().child(last.clone()), field.clone());
        }
    }

    #[test]
    fn text_round_trip(field in keyed_field()) {
        prop_assert_eq!(field.to_string().parse::<Field>(), Ok(field));
    }
}
