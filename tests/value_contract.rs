//! Purpose: Lock the observable contract of the numeric value container and its shapes.
//! Exports: Integration tests only (no runtime exports).
//! Role: Exercise the public API the way a downstream consumer would.
//! Invariants: Unknown fields survive a parse/serialize round trip unchanged.
//! Invariants: Single-vector and single-matrix inputs come back in list form.

use pif::api::{
    Error, ErrorKind, Extensible, NumericValue, ParseContext, Record, Scalar, document,
    normalize_matrices, normalize_vectors,
};
use serde_json::{Value, json};

fn raw(node: &Value, _ctx: &ParseContext) -> Result<Value, Error> {
    Ok(node.clone())
}

fn vectors(node: Value) -> Result<Vec<Vec<Value>>, Error> {
    normalize_vectors(&node, &ParseContext::root(), &mut raw)
}

fn matrices(node: Value) -> Result<Vec<Vec<Vec<Value>>>, Error> {
    normalize_matrices(&node, &ParseContext::root(), &mut raw)
}

#[test]
fn flat_and_wrapped_vector_are_equivalent() {
    let cases = [json!([1, "2", {"value": 3}]), json!([0.5]), json!(["a", "b"])];
    for flat in cases {
        let items = flat.as_array().cloned().expect("array");
        let wrapped = Value::Array(vec![flat.clone()]);
        assert_eq!(vectors(flat).unwrap(), vec![items.clone()]);
        assert_eq!(vectors(wrapped).unwrap(), vec![items]);
    }
}

#[test]
fn list_of_vectors_keeps_count_and_order() {
    let input = json!([[1, 2, 3], [4], [5, 6]]);
    let parsed = vectors(input).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0], vec![json!(1), json!(2), json!(3)]);
    assert_eq!(parsed[1], vec![json!(4)]);
    assert_eq!(parsed[2], vec![json!(5), json!(6)]);
}

#[test]
fn empty_vector_field_is_not_an_error() {
    assert_eq!(vectors(json!([])).unwrap().len(), 0);
}

#[test]
fn matrix_depths() {
    assert_eq!(matrices(json!([[[1], [2]]])).unwrap().len(), 1);
    assert_eq!(matrices(json!([[[1], [2]], [[3], [4]]])).unwrap().len(), 2);
    let err = matrices(json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn container_round_trip_preserves_vectors() {
    let value = NumericValue::new()
        .with_name("x")
        .with_units("m")
        .with_vector(vec![Scalar::new(1), Scalar::new(2)])
        .with_vector(vec![Scalar::new(3), Scalar::new(4)]);

    let text = document::to_string(&value).unwrap();
    let out: Value = serde_json::from_str(&text).unwrap();
    assert!(out.get("scalars").is_none());
    assert!(out.get("matrices").is_none());

    let back: NumericValue = document::from_str(&text).unwrap();
    assert_eq!(back.name(), Some("x"));
    assert_eq!(back.units(), Some("m"));
    assert_eq!(back.vector_count(), 2);
    assert_eq!(back.vector(1).unwrap(), &vec![Scalar::new(3), Scalar::new(4)]);
    assert!(back.scalar_list().is_none());
    assert!(back.matrix_list().is_none());
    assert_eq!(back, value);
}

#[test]
fn unknown_fields_round_trip_verbatim() {
    let input = r#"{"name":"x","futureField":{"a":1}}"#;
    let value: NumericValue = document::from_str(input).unwrap();
    assert_eq!(value.extra_fields().count(), 1);
    assert_eq!(value.extra_fields().get("futureField"), Some(&json!({"a": 1})));
    assert!(!value.extra_fields().has("name"));

    let out = document::to_value(&value);
    assert_eq!(out, json!({"name": "x", "futureField": {"a": 1}}));
}

#[test]
fn unknown_fields_inside_leaves_survive_too() {
    let input = json!({
        "scalars": [{"value": 1, "calibration": {"run": 7}}],
        "matrices": [[[1, 2], [3, 4]], [[5]]],
        "schemaVersion": "2.1"
    });
    let value = NumericValue::<Scalar>::from_json(&input).unwrap();
    let scalar = value.scalar(0).unwrap();
    assert_eq!(scalar.extra_fields().get("calibration"), Some(&json!({"run": 7})));
    assert_eq!(value.to_json(), input);
}

#[test]
fn index_access_outside_range_always_fails() {
    let empty = NumericValue::<Scalar>::new();
    for index in [0, 1, usize::MAX] {
        assert_eq!(empty.scalar(index).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(empty.vector(index).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(empty.matrix(index).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    }

    let populated = NumericValue::new()
        .with_scalar(Scalar::new(1))
        .with_scalar(Scalar::new(2));
    let count = populated.scalar_count();
    for index in [count, usize::MAX] {
        let err = populated.scalar(index).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(err.index(), Some(index));
        assert_eq!(err.count(), Some(count));
    }
}

#[test]
fn count_equals_iteration_length() {
    let states = [
        NumericValue::<Scalar>::new(),
        NumericValue::new().with_scalar(Scalar::new(1)),
        NumericValue::new()
            .with_vector(vec![])
            .with_matrix(vec![vec![Scalar::new(1)]])
            .with_matrix(vec![]),
    ];
    for value in &states {
        assert_eq!(value.scalars().count(), value.scalar_count());
        assert_eq!(value.vectors().count(), value.vector_count());
        assert_eq!(value.matrices().count(), value.matrix_count());
    }
}

#[test]
fn errors_abort_the_whole_document() {
    let err = document::from_str::<NumericValue>(
        r#"{"name":"x","vectors":[[1,2],[3,true]]}"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Leaf);
    assert_eq!(err.pointer(), Some("/vectors/1/1"));

    let err = document::from_str::<NumericValue>(r#"{"matrices":[1,2,3]}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert_eq!(err.pointer(), Some("/matrices"));
}

#[test]
fn nests_inside_serde_models() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Property {
        label: String,
        value: NumericValue,
    }

    let input = json!({"label": "density", "value": {"scalars": [2.7], "units": "g/cm^3"}});
    let property: Property = serde_json::from_value(input.clone()).unwrap();
    assert_eq!(property.value.units(), Some("g/cm^3"));
    assert_eq!(serde_json::to_value(&property).unwrap(), input);

    let bad = json!({"label": "density", "value": {"vectors": "nope"}});
    let err = serde_json::from_value::<Property>(bad).err().expect("shape error");
    assert!(err.to_string().contains("expected array for vectors"));
}

#[test]
fn integers_beyond_u64_keep_every_digit() {
    let digits = "123456789012345678901234567890";

    let input = format!(r#"{{"name":"x","sampleId":{digits}}}"#);
    let value = document::from_str::<NumericValue>(&input).unwrap();
    let out = document::to_string(&value).unwrap();
    assert_eq!(out, format!(r#"{{"name":"x","sampleId":{digits}}}"#));

    let input = format!(r#"{{"scalars":[{digits}]}}"#);
    let value = document::from_str::<NumericValue>(&input).unwrap();
    assert_eq!(value.scalar_count(), 1);
    let out = document::to_string(&value).unwrap();
    assert_eq!(out, format!(r#"{{"scalars":[{digits}]}}"#));
}
