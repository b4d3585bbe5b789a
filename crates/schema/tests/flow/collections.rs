//! Tuples, sets, records and maps, plus sharing one schema across threads.

use chrono::{TimeZone, Utc};
use contour_schema::prelude::*;
use contour_schema::{format, validate_at};
use pretty_assertions::assert_eq;

#[test]
fn tuple_with_rest_accepts_trailing_numbers() {
    let schema = tuple([date(), string()]).rest(number()).unwrap();
    let when = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    let input = Value::list([
        Value::from(when),
        Value::from("x"),
        Value::from(1),
        Value::from(2),
    ]);
    assert_eq!(schema.validate(&input), Ok(input.clone()));

    let fixed_only = Value::list([Value::from(when), Value::from("x")]);
    assert!(schema.is_valid(&fixed_only));

    let missing = Value::list([Value::from(when)]);
    let errors = schema.validate(&missing).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn tuple_reports_each_bad_position() {
    let schema = tuple([string(), number(), boolean()]);
    let errors = schema
        .validate(&Value::list([Value::from(1), Value::from(2), Value::from("no")]))
        .unwrap_err();
    let paths: Vec<String> = errors.iter().map(|issue| issue.path_string()).collect();
    assert_eq!(paths, ["[0]", "[2]"]);
}

#[test]
fn set_size_is_a_single_root_issue() {
    let schema = set(union([string(), number()]).unwrap())
        .min(2)
        .and_then(|s| s.max(3))
        .unwrap();

    let errors = schema
        .validate(&Value::set([
            Value::from("a"),
            Value::from(1),
            Value::from("b"),
            Value::from(2),
        ]))
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.issues()[0].code, IssueCode::TooBig);
    assert!(errors.issues()[0].path.is_empty());
    assert_eq!(
        format(&Err(errors)),
        "(root): must contain at most 3 element(s)"
    );

    let ok = Value::set([Value::from("a"), Value::from(1)]);
    assert_eq!(schema.validate(&ok), Ok(ok.clone()));
}

#[test]
fn set_elements_keep_their_index_in_paths() {
    let schema = set(number());
    let errors = schema
        .validate(&Value::set([Value::from(1), Value::from("x")]))
        .unwrap_err();
    assert_eq!(errors.issues()[0].path_string(), "[1]");
}

#[test]
fn record_of_numbers() {
    let schema = record(string(), number());
    let scores = Value::object([("alice", 3), ("bob", 5)]);
    assert_eq!(schema.validate(&scores), Ok(scores.clone()));

    let bad = Value::object([("alice", Value::from(3)), ("bob", Value::from("five"))]);
    let errors = schema.validate(&bad).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.issues()[0].path_string(), "bob");

    // records reject non-objects, and keep every entry when valid
    assert!(!schema.is_valid(&Value::list([1])));
    assert!(schema.is_valid(&Value::Object(Default::default())));
}

#[test]
fn map_paths_point_at_key_or_value() {
    let schema = map(number(), string());
    let input = Value::map([
        (Value::from(1), Value::from("one")),
        (Value::from("two"), Value::from(2)),
    ]);

    let errors = schema.validate(&input).unwrap_err();
    let paths: Vec<String> = errors.iter().map(|issue| issue.path_string()).collect();
    assert_eq!(paths, ["[1].key", "[1].value"]);
}

#[test]
fn arrays_nested_in_objects() {
    let schema = object([("matrix", array(array(number()).nonempty().unwrap()))]);
    let input = Value::object([(
        "matrix",
        Value::list([Value::list([1, 2]), Value::List(Vec::new())]),
    )]);

    let errors = schema.validate(&input).unwrap_err();
    assert_eq!(errors.issues()[0].path_string(), "matrix[1]");
    assert_eq!(errors.issues()[0].message, "must contain at least 1 element(s)");
}

#[test]
fn validation_relative_to_an_enclosing_document() {
    let errors = validate_at(
        &array(number()),
        &Value::list([Value::from("x")]),
        &[PathSegment::from("payload"), PathSegment::from("items")],
    )
    .unwrap_err();
    assert_eq!(errors.issues()[0].path_string(), "payload.items[0]");
}

#[test]
fn one_schema_many_threads() {
    let schema = object([
        ("id", number().min(0).unwrap()),
        ("tags", set(string()).max(2).unwrap()),
    ]);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8usize)
            .map(|i| {
                let schema = &schema;
                scope.spawn(move || {
                    let input = Value::object([
                        ("id", Value::from(i)),
                        ("tags", Value::set(["a", "b", "c"].into_iter().take(i % 4))),
                    ]);
                    (i, schema.validate(&input).is_ok())
                })
            })
            .collect();

        for handle in handles {
            let (i, ok) = handle.join().unwrap();
            assert_eq!(ok, i % 4 <= 2, "thread {i}");
        }
    });
}
