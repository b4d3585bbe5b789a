//! Derived schemas behave like hand-written ones and never disturb their
//! sources.

use contour_schema::prelude::*;
use contour_schema::{deep_partial, extend, merge, omit, partial, pick};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn base() -> Schema {
    object([
        ("id", string()),
        ("name", string().min(2).unwrap()),
        ("age", number().min(0).unwrap()),
    ])
}

fn keys(schema: &Schema) -> Vec<String> {
    schema.shape().unwrap().keys().map(str::to_owned).collect()
}

#[test]
fn merge_matches_hand_written_object() {
    let extra = object([("email", string()), ("age", number().gt(18).unwrap())]);
    let merged = merge(&base(), &extra).unwrap();

    let by_hand = object([
        ("id", string()),
        ("name", string().min(2).unwrap()),
        ("age", number().gt(18).unwrap()),
        ("email", string()),
    ]);

    for age in [5, 18, 19, 40] {
        let input = Value::object([
            ("id", Value::from("u1")),
            ("name", Value::from("Ada")),
            ("age", Value::from(age)),
            ("email", Value::from("ada@example.com")),
        ]);
        assert_eq!(merged.validate(&input), by_hand.validate(&input), "age {age}");
    }
}

#[test]
fn sources_are_unchanged_after_every_derivation() {
    let source = base();
    let before = keys(&source);

    let _ = merge(&source, &object([("x", boolean())])).unwrap();
    let _ = extend(&source, [("y", boolean())]).unwrap();
    let _ = pick(&source, ["id"]).unwrap();
    let _ = omit(&source, ["id"]).unwrap();
    let _ = partial(&source).unwrap();
    let _ = deep_partial(&source).unwrap();

    assert_eq!(keys(&source), before);
    assert!(source.field("name").unwrap().kind_name() == "string");
    assert!(source.validate(&Value::Object(Default::default())).is_err());
}

#[test]
fn pick_of_partial_commutes() {
    let a = base().partial().unwrap().pick(["name"]).unwrap();
    let b = base().pick(["name"]).unwrap().partial().unwrap();

    for input in [
        Value::Object(Default::default()),
        Value::object([("name", "A")]),
        Value::object([("name", "Ada")]),
    ] {
        assert_eq!(a.validate(&input).is_ok(), b.validate(&input).is_ok());
    }
}

#[test]
fn omit_then_extend_replaces_a_field() {
    let schema = base()
        .omit(["age"])
        .unwrap()
        .extend([("age", string())])
        .unwrap();
    assert_eq!(keys(&schema), ["id", "name", "age"]);

    let input = Value::object([("id", "u1"), ("name", "Ada"), ("age", "forty")]);
    assert!(schema.is_valid(&input));
}

#[rstest]
#[case::merge(merge(&string(), &base()).map(|_| ()))]
#[case::extend(extend(&number(), [("a", string())]).map(|_| ()))]
#[case::pick(pick(&array(string()), ["a"]).map(|_| ()))]
#[case::partial(partial(&boolean()).map(|_| ()))]
fn derivations_need_an_object(#[case] result: Result<(), SchemaError>) {
    let err = result.unwrap_err();
    assert_eq!(err.category(), "kind");
    assert_eq!(err.code(), "SCHEMA_NOT_AN_OBJECT");
    assert!(matches!(err, SchemaError::NotAnObject { .. }));
}

#[test]
fn unknown_keys_in_pick_and_omit() {
    let err = base().pick(["id", "email"]).unwrap_err();
    assert_eq!(err.to_string(), "unknown key `email` in object schema");
    assert!(base().omit(["nope"]).is_err());
}

#[test]
fn deep_partial_reaches_array_elements() {
    let schema = object([(
        "members",
        array(object([("name", string()), ("role", string())])),
    )]);
    let input = Value::object([(
        "members",
        Value::list([Value::object([("name", "Ada")])]),
    )]);

    assert!(schema.validate(&input).is_err());
    assert!(schema.partial().unwrap().validate(&input).is_err());
    assert!(schema.deep_partial().unwrap().validate(&input).is_ok());
}

#[test]
fn strict_policy_survives_pick() {
    let strict = base().strict().unwrap();
    let picked = strict.pick(["id"]).unwrap();
    let errors = picked
        .validate(&Value::object([("id", "u1"), ("name", "Ada")]))
        .unwrap_err();
    assert_eq!(errors.issues()[0].code, IssueCode::UnrecognizedKeys);
}
