use chrono::TimeZone;
use chrono::Utc;
use mero_lib::error::FieldError;
use mero_lib::model::Fields;
use mero_lib::model::Record;
use mero_lib::model::Value;

#[test]
fn test_deserialize_record_from_json() {
    let json = r#"{
        "name": "Alpha",
        "age": 30,
        "score": 4.5,
        "active": true,
        "note": null,
        "created": "2024-06-10T12:00:00Z"
    }"#;
    let record: Record = serde_json::from_str(json).unwrap();

    assert_eq!(record.len(), 6);
    assert_eq!(record.get_string("name").unwrap(), Some("Alpha"));
    assert_eq!(record.get_int("age").unwrap(), Some(30));
    assert_eq!(record.get_float("score").unwrap(), Some(4.5));
    assert_eq!(record.get_bool("active").unwrap(), Some(true));
    assert_eq!(record.get_string("note").unwrap(), None);
    assert_eq!(
        record.get_datetime("created").unwrap(),
        Some(Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap())
    );
}

#[test]
fn test_timestamp_text_round_trips() {
    let json = r#"{"ts":"2024-06-10T01:00:00+02:00"}"#;
    let record: Record = serde_json::from_str(json).unwrap();
    assert_eq!(serde_json::to_string(&record).unwrap(), json);
    assert_eq!(
        record.get_datetime("ts").unwrap(),
        Some(Utc.with_ymd_and_hms(2024, 6, 9, 23, 0, 0).unwrap())
    );

    let record = Record::new().set("ts", "tomorrow");
    assert_eq!(
        record.get_datetime("ts"),
        Err(FieldError::type_mismatch("ts", "datetime", "string"))
    );
}

#[test]
fn test_serialize_record_keeps_key_order() {
    let record = Record::new().set("b", 2i64).set("a", "x");
    assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"a":"x","b":2}"#);
}

#[test]
fn test_typed_getter_errors() {
    let record = Record::new().set("name", "Alpha").set("age", 30i64);

    assert_eq!(record.get_string("missing"), Err(FieldError::missing("missing")));
    assert_eq!(
        record.get_int("name"),
        Err(FieldError::type_mismatch("name", "int", "string"))
    );
    // Integers widen to floats.
    assert_eq!(record.get_float("age").unwrap(), Some(30.0));
}

#[test]
fn test_field_error_messages() {
    assert_eq!(
        FieldError::missing("age").to_string(),
        "Field 'age' not found in record"
    );
    assert_eq!(
        FieldError::type_mismatch("age", "int", "string").to_string(),
        "Field 'age' type mismatch: expected int, got string"
    );
}

#[test]
fn test_insert_and_remove() {
    let mut record = Record::new();
    record.insert("k", 1i64);
    assert!(record.contains("k"));
    assert_eq!(record.remove("k"), Some(Value::Int(1)));
    assert!(record.is_empty());
}

#[test]
fn test_collect_record_from_pairs() {
    let record: Record = [("a", 1i64), ("b", 2i64)].into_iter().collect();
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_json_map_implements_fields() {
    let json = serde_json::json!({
        "title": "Report",
        "count": 3,
        "at": "2024-05-01T00:00:00Z",
        "tags": ["a", "b"]
    });
    let map = json.as_object().unwrap();

    assert_eq!(map.field("title").as_deref(), Some(&Value::from("Report")));
    assert_eq!(map.field("count").as_deref(), Some(&Value::Int(3)));
    // Timestamps keep their text and parse on demand.
    let at = map.field("at").unwrap();
    assert_eq!(*at, Value::from("2024-05-01T00:00:00Z"));
    assert_eq!(
        at.as_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        map.field("tags").as_deref(),
        Some(&Value::from(r#"["a","b"]"#))
    );
    assert!(map.field("missing").is_none());
}

#[test]
fn test_value_readings() {
    assert_eq!(Value::from(" 42 ").as_number(), Some(42.0));
    assert_eq!(Value::from("NaN").as_number(), None);
    assert_eq!(Value::Bool(true).as_number(), None);
    assert_eq!(
        Value::Int(0).as_datetime(),
        Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(Value::Null.as_text(), "");
    assert_eq!(Value::Float(1.5).as_text(), "1.5");
}
