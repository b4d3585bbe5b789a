//! End-to-end flow over a realistic user profile schema: built from parts,
//! merged, extended, then derived into partial and selection schemas.

use chrono::{TimeZone, Utc};
use contour_schema::prelude::*;
use contour_schema::{IssuePath, format};
use pretty_assertions::assert_eq;

const HOBBIES: [&str; 3] = ["reading", "writing", "coding"];

fn geo_schema() -> Schema {
    object([("coords", tuple([number(), number(), number()]))])
}

fn tuple_schema() -> Schema {
    object([(
        "custom",
        tuple([date(), string()]).rest(number()).unwrap(),
    )])
    .optional()
}

fn user_schema() -> Schema {
    object([
        ("id", union([string(), number()]).unwrap()),
        ("name", string().min(5).unwrap()),
        ("age", number().gt(18).unwrap()),
        ("birthday", date().optional()),
        ("friends", array(string()).nullish()),
        ("literal", literal("hello").optional()),
        (
            "random",
            number().default_with(|| Value::from(rand::random::<f64>())),
        ),
        ("isNew", boolean().default_value(false)),
        (
            "hobbies",
            array(native_enum(HOBBIES).unwrap())
                .nonempty()
                .and_then(|s| s.min(2))
                .and_then(|s| s.max(3))
                .unwrap(),
        ),
        ("jj", any()),
    ])
    .merge(&geo_schema())
    .unwrap()
    .extend([("tuple", tuple_schema())])
    .unwrap()
}

fn user_with_defaults() -> Value {
    Value::object([
        ("name", Value::from("dddddd")),
        ("age", Value::from(19)),
        ("jj", Value::from(12)),
        ("id", Value::from("123")),
        ("random", Value::from(0.25)),
        ("isNew", Value::from(true)),
        ("hobbies", Value::list(["coding", "reading"])),
        ("coords", Value::list([0, 0, 0])),
    ])
}

fn path(segments: &[&str]) -> IssuePath {
    segments.iter().map(|s| PathSegment::from(*s)).collect()
}

#[test]
fn field_order_follows_merge_then_extend() {
    let schema = user_schema();
    let keys: Vec<&str> = schema.shape().unwrap().keys().collect();
    assert_eq!(
        keys,
        [
            "id", "name", "age", "birthday", "friends", "literal", "random", "isNew", "hobbies",
            "jj", "coords", "tuple",
        ]
    );
}

#[test]
fn complete_user_validates() {
    let output = user_schema().validate(&user_with_defaults()).unwrap();

    assert_eq!(output.get("name"), Some(&Value::from("dddddd")));
    assert_eq!(output.get("isNew"), Some(&Value::Bool(true)));
    assert_eq!(output.get("random"), Some(&Value::from(0.25)));
    // optional fields that were absent stay absent
    assert_eq!(output.get("birthday"), None);
    assert_eq!(output.get("tuple"), None);
}

#[test]
fn defaults_are_filled_when_absent() {
    let mut input = user_with_defaults().as_object().unwrap().clone();
    input.shift_remove("random");
    input.shift_remove("isNew");

    let schema = user_schema();
    let input = Value::Object(input);
    for _ in 0..16 {
        let output = schema.validate(&input).unwrap();
        assert_eq!(output.get("isNew"), Some(&Value::Bool(false)));
        let random = output.get("random").and_then(Value::as_f64).unwrap();
        assert!((0.0..1.0).contains(&random));
    }
}

#[test]
fn short_name_and_young_age_are_both_reported() {
    let selection = user_schema().pick(["name", "age"]).unwrap();
    let input = Value::object([("name", Value::from("John")), ("age", Value::from(13))]);

    let errors = selection.validate(&input).unwrap_err();
    let paths: Vec<_> = errors.iter().map(|issue| issue.path.clone()).collect();
    assert_eq!(paths, [path(&["name"]), path(&["age"])]);
    assert_eq!(
        errors.iter().map(|issue| issue.code).collect::<Vec<_>>(),
        [IssueCode::TooSmall, IssueCode::TooSmall]
    );
    assert_eq!(
        format(&Err(errors)),
        "name: must contain at least 5 character(s)\nage: must be greater than 18"
    );
}

#[test]
fn partial_accepts_the_api_payload() {
    let partial = user_schema().partial().unwrap();
    let api_user = Value::object([
        ("name", Value::from("dddddd")),
        ("age", Value::from(19)),
        ("jj", Value::from(12)),
    ]);

    let output = partial.validate(&api_user).unwrap();
    assert_eq!(output, api_user);
    assert!(partial.validate(&Value::Object(Default::default())).is_ok());
}

#[test]
fn partial_still_checks_present_fields() {
    let partial = user_schema().partial().unwrap();
    let errors = partial
        .validate(&Value::object([("hobbies", Value::list(["coding"]))]))
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.issues()[0].path, path(&["hobbies"]));
    assert_eq!(errors.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn hobbies_report_every_bad_element_and_the_size() {
    let mut input = user_with_defaults().as_object().unwrap().clone();
    input.insert(
        "hobbies".into(),
        Value::list(["coding", "gaming", "reading", "sleeping"]),
    );

    let errors = user_schema().validate(&Value::Object(input)).unwrap_err();
    let rendered: Vec<String> = errors.iter().map(|issue| issue.path_string()).collect();
    assert_eq!(rendered, ["hobbies[1]", "hobbies[3]", "hobbies"]);
    assert_eq!(
        errors.iter().map(|issue| issue.code).collect::<Vec<_>>(),
        [
            IssueCode::InvalidEnumValue,
            IssueCode::InvalidEnumValue,
            IssueCode::TooBig,
        ]
    );
}

#[test]
fn nested_tuple_paths() {
    let mut input = user_with_defaults().as_object().unwrap().clone();
    let birthday = Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap();
    input.insert(
        "tuple".into(),
        Value::object([(
            "custom",
            Value::list([
                Value::from(birthday),
                Value::from("x"),
                Value::from(1),
                Value::from("two"),
            ]),
        )]),
    );

    let errors = user_schema().validate(&Value::Object(input)).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.issues()[0].path_string(), "tuple.custom[3]");
    assert_eq!(errors.issues()[0].message, "expected number, received string");
}

#[test]
fn literal_and_nullish_fields() {
    let mut input = user_with_defaults().as_object().unwrap().clone();
    input.insert("friends".into(), Value::Null);
    input.insert("literal".into(), Value::from("hello"));
    assert!(user_schema().validate(&Value::Object(input.clone())).is_ok());

    input.insert("literal".into(), Value::from("goodbye"));
    let errors = user_schema().validate(&Value::Object(input)).unwrap_err();
    assert_eq!(errors.issues()[0].code, IssueCode::InvalidLiteral);
    assert_eq!(errors.issues()[0].path, path(&["literal"]));
}

#[test]
fn extra_keys_are_stripped_or_rejected() {
    let mut input = user_with_defaults().as_object().unwrap().clone();
    input.insert("extra".into(), Value::from(true));
    let input = Value::Object(input);

    let output = user_schema().validate(&input).unwrap();
    assert_eq!(output.get("extra"), None);

    let strict = Validator::new(ValidateOptions::new().with_unknown_keys(UnknownKeys::Strict));
    let errors = strict.validate(&user_schema(), &input).unwrap_err();
    assert_eq!(errors.issues()[0].code, IssueCode::UnrecognizedKeys);
    assert!(errors.issues()[0].path.is_empty());
}
