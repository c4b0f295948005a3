//! End-to-end decode scenarios through `#[derive(Record)]`.

use dross::{CatchAll, DecodeError, Record};
use serde_json::{json, Value};

fn obj(value: Value) -> CatchAll {
    value.as_object().expect("fixture must be an object").clone()
}

#[derive(Debug, Default, PartialEq, Record)]
struct Animal {
    #[dross(rename = "Name")]
    name: String,
    #[dross(rename = "Order")]
    order: String,
    #[dross(catch_all)]
    rest: CatchAll,
}

#[test]
fn test_flat_record_keeps_unclaimed_members() {
    let animal: Animal = dross::from_str(
        r#"{
            "Name": "Platypus",
            "Order": "Monotremata",
            "Beak": "Yellow",
            "IsAGroundhog": false
        }"#,
    )
    .unwrap();

    assert_eq!(animal.name, "Platypus");
    assert_eq!(animal.order, "Monotremata");
    assert_eq!(
        animal.rest,
        obj(json!({"Beak": "Yellow", "IsAGroundhog": false}))
    );
}

#[derive(Debug, Default, PartialEq, Record)]
struct Thing {
    #[dross(rename = "_id")]
    id: String,
    #[dross(rename = "_delete")]
    delete_flag: bool,
    #[dross(catch_all)]
    rest: CatchAll,
}

#[test]
fn test_flat_record_with_structured_leftovers() {
    let thing: Thing = dross::from_str(
        r#"{
            "_id": "abc",
            "_delete": true,
            "tags": ["some", "tags"],
            "stuff": {"some_stuff": 1, "more_stuff": 2}
        }"#,
    )
    .unwrap();

    let expected = Thing {
        id: "abc".to_string(),
        delete_flag: true,
        rest: obj(json!({
            "tags": ["some", "tags"],
            "stuff": {"some_stuff": 1, "more_stuff": 2}
        })),
    };
    assert_eq!(thing, expected);
}

#[derive(Debug, Default, PartialEq, Record)]
struct SubThing {
    #[dross(rename = "_id")]
    id: String,
    #[dross(catch_all)]
    rest: CatchAll,
}

#[derive(Debug, Default, PartialEq, Record)]
struct DeepThing {
    #[dross(rename = "_id")]
    id: String,
    #[dross(rename = "thing", descend)]
    thing: SubThing,
    #[dross(catch_all)]
    rest: CatchAll,
}

#[test]
fn test_descend_keeps_levels_separate() {
    let deep: DeepThing = dross::from_str(
        r#"{
            "_id": "abc",
            "thing": {
                "_id": "def",
                "stuff": ["some", "stuff"]
            },
            "stuff": {"some_stuff": 1, "more_stuff": 2}
        }"#,
    )
    .unwrap();

    let expected = DeepThing {
        id: "abc".to_string(),
        thing: SubThing {
            id: "def".to_string(),
            rest: obj(json!({"stuff": ["some", "stuff"]})),
        },
        rest: obj(json!({"stuff": {"some_stuff": 1, "more_stuff": 2}})),
    };
    assert_eq!(deep, expected);
}

#[test]
fn test_omitted_nested_record_stays_at_default() {
    let deep: DeepThing = dross::from_str("{}").unwrap();

    assert_eq!(deep.thing, SubThing::default());
    assert!(deep.rest.is_empty());
}

#[test]
fn test_null_nested_member_flows_to_catch_all() {
    let deep: DeepThing = dross::from_str(r#"{"_id": "abc", "thing": null}"#).unwrap();

    assert_eq!(deep.thing, SubThing::default());
    assert_eq!(deep.rest, obj(json!({"thing": null})));
}

#[test]
fn test_non_object_nested_member_is_rejected() {
    let err = dross::from_str::<DeepThing>(r#"{"thing": 3}"#).unwrap_err();

    assert!(matches!(
        err,
        DecodeError::MemberShape {
            name: "thing",
            found: "a number"
        }
    ));
}

#[derive(Debug, Default, PartialEq, Record)]
struct Row {
    a: String,
    #[dross(catch_all)]
    rest: CatchAll,
}

#[test]
fn test_sequence_decodes_each_element_independently() {
    let rows: Vec<Row> =
        dross::from_str(r#"[{"a": "1", "b": "2"}, {"a": "4", "prop": "val"}]"#).unwrap();

    assert_eq!(
        rows,
        vec![
            Row {
                a: "1".to_string(),
                rest: obj(json!({"b": "2"})),
            },
            Row {
                a: "4".to_string(),
                rest: obj(json!({"prop": "val"})),
            },
        ]
    );
}

#[test]
fn test_sequence_fails_as_a_whole() {
    let err = dross::from_str::<Vec<Row>>(r#"[{"a": "1"}, "oops", {"a": "2"}]"#).unwrap_err();

    assert!(matches!(
        err,
        DecodeError::ElementShape {
            index: 1,
            found: "a string"
        }
    ));
}

#[test]
fn test_decoding_is_deterministic() {
    let input = r#"{
        "_id": "abc",
        "thing": {"_id": "def", "k": [1, 2]},
        "x": 1, "y": 2, "z": 3
    }"#;

    let first: DeepThing = dross::from_str(input).unwrap();
    let second: DeepThing = dross::from_str(input).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_consumed_and_leftover_keys_partition_the_object() {
    let input = json!({
        "Name": "Kea", "Order": "Psittaciformes",
        "alpine": true, "clever": true
    });
    let keys: Vec<String> = obj(input.clone()).keys().cloned().collect();

    let animal: Animal = dross::from_value(input).unwrap();

    let mut seen: Vec<String> = animal.rest.keys().cloned().collect();
    seen.push("Name".to_string());
    seen.push("Order".to_string());
    seen.sort();
    assert_eq!(seen, keys);
    assert!(!animal.rest.contains_key("Name"));
    assert!(!animal.rest.contains_key("Order"));
}

#[derive(Debug, Default, PartialEq, Record)]
struct NoBucket {
    name: String,
}

#[test]
fn test_leftovers_without_catch_all_are_dropped() {
    let target: NoBucket = dross::from_str(r#"{"name": "x", "extra": [1, 2, 3]}"#).unwrap();

    assert_eq!(target.name, "x");
}

#[derive(Debug, Default, PartialEq, Record)]
struct WithSkip {
    name: String,
    #[dross(skip)]
    cached: u64,
    #[dross(catch_all)]
    rest: CatchAll,
}

#[test]
fn test_skipped_field_member_flows_to_catch_all() {
    let target: WithSkip = dross::from_str(r#"{"name": "x", "cached": 9}"#).unwrap();

    assert_eq!(target.cached, 0);
    assert_eq!(target.rest, obj(json!({"cached": 9})));
}

#[derive(Debug, Default, PartialEq, serde::Deserialize)]
struct Point {
    x: i64,
    y: i64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Shape {
    origin: Point,
    scale: f64,
    label: Option<String>,
    #[dross(catch_all)]
    rest: CatchAll,
}

#[test]
fn test_plain_fields_use_standard_conversion() {
    let shape: Shape = dross::from_str(
        r#"{"origin": {"x": 1, "y": 2}, "scale": 3, "label": "big", "ignored": null}"#,
    )
    .unwrap();

    assert_eq!(shape.origin, Point { x: 1, y: 2 });
    // Numeric widening: an integer decodes into a float field.
    assert_eq!(shape.scale, 3.0);
    assert_eq!(shape.label, Some("big".to_string()));
    assert_eq!(shape.rest, obj(json!({"ignored": null})));
}

#[test]
fn test_absent_and_null_plain_members_leave_defaults() {
    let shape: Shape = dross::from_str(r#"{"label": null}"#).unwrap();

    assert_eq!(shape.origin, Point::default());
    assert_eq!(shape.label, None);
    // An explicit null is consumed and does not reach the catch-all field.
    assert!(shape.rest.is_empty());
}

#[test]
fn test_conversion_failure_names_the_member() {
    let err = dross::from_str::<Shape>(r#"{"scale": "huge"}"#).unwrap_err();

    match err {
        DecodeError::Conversion { name, ty, .. } => {
            assert_eq!(name, "scale");
            assert!(ty.contains("f64"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_catch_all_is_replaced_not_merged() {
    let mut thing = Thing::default();
    dross::decode_into(br#"{"_id": "a", "one": 1}"#, &mut thing).unwrap();
    dross::decode_into(br#"{"_id": "b", "two": 2}"#, &mut thing).unwrap();

    assert_eq!(thing.id, "b");
    assert_eq!(thing.rest, obj(json!({"two": 2})));
}

#[derive(Debug, Default, PartialEq, Record)]
struct OnlyBucket {
    #[dross(catch_all)]
    rest: CatchAll,
}

#[test]
fn test_record_of_only_a_catch_all_field_takes_everything() {
    let target: OnlyBucket = dross::from_str(r#"{"a": 1, "b": [2], "c": {"d": 3}}"#).unwrap();

    assert_eq!(target.rest, obj(json!({"a": 1, "b": [2], "c": {"d": 3}})));
}

#[test]
fn test_empty_object_yields_empty_catch_all() {
    let target: OnlyBucket = dross::from_str("{}").unwrap();

    assert!(target.rest.is_empty());
}
