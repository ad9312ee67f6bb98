#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{int_seq, pair, str_int_map};
use deepeq_core::{
    deep_equal, Callable, Divergence, DivergenceKind, DivergenceRecord, Dynamic, Reason, Sequence,
    Type, Value,
};
use std::error::Error;

fn divergence(x: &Value, y: &Value) -> Divergence {
    deep_equal(x, y).unwrap_err()
}

#[test]
fn test_each_reason_maps_to_its_code() {
    let cases = vec![
        (
            divergence(&Value::from(1), &Value::from("1")),
            "DIV_TYPE_MISMATCH",
        ),
        (
            divergence(&Value::from(Sequence::nil(Type::Int)), &int_seq(&[])),
            "DIV_ABSENCE_MISMATCH",
        ),
        (
            divergence(&int_seq(&[1]), &int_seq(&[])),
            "DIV_LENGTH_MISMATCH",
        ),
        (
            divergence(&str_int_map(&[("a", 1)]), &str_int_map(&[("b", 1)])),
            "DIV_KEY_MISSING",
        ),
        (divergence(&pair(1, 2), &pair(1, 3)), "DIV_VALUE_MISMATCH"),
        (
            divergence(&Value::from(f64::NAN), &Value::from(f64::NAN)),
            "DIV_NAN",
        ),
        (
            divergence(
                &Value::from(Callable::new("func()", |_| Value::Nil)),
                &Value::from(Callable::new("func()", |_| Value::Nil)),
            ),
            "DIV_CALLABLE",
        ),
    ];

    for (div, expected_code) in cases {
        assert_eq!(div.code(), expected_code, "for {div}");
        assert_eq!(div.kind().code(), expected_code);
    }
}

#[test]
fn test_reason_carries_structured_fields() {
    let div = divergence(&int_seq(&[1, 2]), &int_seq(&[1]));
    assert_eq!(div.reason(), &Reason::LengthMismatch { x: 2, y: 1 });
}

#[test]
fn test_source_is_the_reason() {
    let div = divergence(&pair(1, 2), &pair(1, 3));
    let source = div.source().expect("divergence should expose its reason");
    assert_eq!(
        source.to_string(),
        "are not equal, where in x is 2 but in y is 3"
    );
}

#[test]
fn test_record_fields() {
    let x = Value::from(Dynamic::new(pair(1, 2)));
    let y = Value::from(Dynamic::new(pair(1, 3)));
    let record = divergence(&x, &y).to_record();

    assert_eq!(record.code, "DIV_VALUE_MISMATCH");
    assert_eq!(record.kind, DivergenceKind::ValueMismatch);
    assert_eq!(record.path, vec!["(Interface)".to_string(), ".B".to_string()]);
    assert_eq!(record.depth, 2);
    assert_eq!(
        record.message,
        "values(Interface).B are not equal, where in x is 2 but in y is 3"
    );
}

#[test]
fn test_record_json_is_machine_readable() {
    let record = divergence(&pair(1, 2), &pair(1, 3)).to_record();
    let json = record.to_json().unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["code"], "DIV_VALUE_MISMATCH");
    assert_eq!(parsed["kind"], "ValueMismatch");
    assert_eq!(parsed["path"][0], ".B");

    let back: DivergenceRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_empty_path_message_has_no_separator_before_root() {
    let div = divergence(&Value::from(true), &Value::from(false));
    assert_eq!(div.path_string(), "");
    assert!(div.to_string().starts_with("values are not equal"));
}
