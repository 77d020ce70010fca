use crate::contract::FieldType;
use crate::error::ContractError;
use crate::inference::engine::{
    infer_fields, InferenceEngine, InferenceOptions, SampleHints, SourceType,
};
use crate::inference::{json_sample, tabular};
use serde_json::json;

fn no_hints() -> SampleHints {
    SampleHints::default()
}

// --- JSON sample analysis ---

#[test]
fn json_object_inference_matches_runtime_types() {
    let sample = r#"{"id":1,"name":"John Doe","email":"john.doe@example.com","created_at":"2023-01-01T12:00:00Z"}"#;
    let fields = infer_fields(SourceType::Api, sample, &no_hints()).unwrap();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].field_type, FieldType::Integer);
    assert_eq!(fields[1].name, "name");
    assert_eq!(fields[1].field_type, FieldType::String);
    assert_eq!(fields[2].name, "email");
    assert_eq!(fields[2].field_type, FieldType::String);
    assert_eq!(fields[3].name, "created_at");
    assert_eq!(fields[3].field_type, FieldType::Timestamp);
    assert!(fields.iter().all(|f| f.required));
}

#[test]
fn json_null_value_is_optional_conservative_string() {
    let fields =
        infer_fields(SourceType::Api, r#"{"nickname":null,"age":30}"#, &no_hints()).unwrap();
    assert_eq!(fields[0].name, "nickname");
    assert_eq!(fields[0].field_type, FieldType::String);
    assert!(!fields[0].required);
    assert!(fields[1].required);
}

#[test]
fn json_fractional_numbers_resolve_float() {
    let fields =
        infer_fields(SourceType::Api, r#"{"count":7,"ratio":0.5}"#, &no_hints()).unwrap();
    assert_eq!(fields[0].field_type, FieldType::Integer);
    assert_eq!(fields[1].field_type, FieldType::Float);
}

#[test]
fn json_nested_values_are_not_flattened_by_default() {
    let sample = r#"{"id":1,"address":{"city":"Oslo","zip":"0150"},"tags":["a","b"]}"#;
    let fields = infer_fields(SourceType::Api, sample, &no_hints()).unwrap();

    assert_eq!(fields.len(), 3);
    assert_eq!(fields[1].name, "address");
    assert_eq!(fields[1].field_type, FieldType::Object);
    assert_eq!(fields[2].name, "tags");
    assert_eq!(fields[2].field_type, FieldType::Array);
}

#[test]
fn json_flattening_emits_dotted_descriptors() {
    let engine = InferenceEngine::with_options(InferenceOptions {
        flatten_nested: true,
    });
    let sample = r#"{"address":{"city":"Oslo","geo":{"lat":59.9}},"orders":[{"total":10}]}"#;
    let fields = engine
        .infer(SourceType::Api, sample, &no_hints())
        .unwrap();

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "address",
            "address.city",
            "address.geo",
            "address.geo.lat",
            "orders",
            "orders_0.total",
        ]
    );
    assert_eq!(fields[3].field_type, FieldType::Float);
    assert_eq!(fields[5].field_type, FieldType::Integer);
}

#[test]
fn json_array_merges_keys_across_all_elements() {
    let sample = r#"[{"id":1,"name":"a"},{"id":2,"phone":"555"},{"id":null,"name":"c"}]"#;
    let fields = infer_fields(SourceType::Api, sample, &no_hints()).unwrap();

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "phone"]);

    // id is null in one element, name and phone are missing in one element
    assert!(fields.iter().all(|f| !f.required));
    assert_eq!(fields[0].field_type, FieldType::Integer);
}

#[test]
fn json_array_of_primitives_collapses_to_items_field() {
    let fields = infer_fields(SourceType::Api, "[1,2,3]", &no_hints()).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "items");
    assert_eq!(fields[0].field_type, FieldType::Array);
}

#[test]
fn json_scalar_sample_is_malformed() {
    for sample in ["42", "\"hello\"", "null", "true"] {
        let err = infer_fields(SourceType::Api, sample, &no_hints()).unwrap_err();
        assert!(matches!(err, ContractError::MalformedSchema(_)), "{}", sample);
    }
}

#[test]
fn json_empty_array_is_malformed() {
    let err = infer_fields(SourceType::Api, "[]", &no_hints()).unwrap_err();
    assert!(matches!(err, ContractError::MalformedSchema(_)));
}

#[test]
fn undecodable_json_is_malformed() {
    let err = infer_fields(SourceType::Api, "{not json", &no_hints()).unwrap_err();
    assert!(matches!(err, ContractError::MalformedSchema(_)));
}

#[test]
fn json_keys_are_sanitized() {
    let fields =
        infer_fields(SourceType::Api, r#"{"user (name)":"x"}"#, &no_hints()).unwrap();
    assert_eq!(fields[0].name, "user _name_");
}

#[test]
fn mixed_object_and_primitive_array_is_malformed() {
    let value = json!([{"a": 1}, 2]);
    let err = json_sample::analyze_value(&value, false).unwrap_err();
    assert!(matches!(err, ContractError::MalformedSchema(_)));
}

// --- Tabular analysis ---

#[test]
fn csv_empty_cell_marks_column_optional() {
    let sample = "id,name,age\n1,John,30\n2,Jane,";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();

    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].field_type, FieldType::Integer);
    assert!(fields[0].required);
    assert_eq!(fields[1].field_type, FieldType::String);
    assert!(fields[1].required);
    assert_eq!(fields[2].name, "age");
    assert_eq!(fields[2].field_type, FieldType::Integer);
    assert!(!fields[2].required);
}

#[test]
fn csv_scans_all_rows_not_just_the_first() {
    let sample = "code\n100\n200\nN/A";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    assert_eq!(fields[0].field_type, FieldType::String);
}

#[test]
fn csv_type_ladder_prefers_integer_over_boolean_for_numeric_tokens() {
    let sample = "flag\n1\n0\n1";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    assert_eq!(fields[0].field_type, FieldType::Integer);
}

#[test]
fn csv_recognizes_boolean_tokens() {
    let sample = "active,confirmed\ntrue,yes\nFalse,no";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    assert_eq!(fields[0].field_type, FieldType::Boolean);
    assert_eq!(fields[1].field_type, FieldType::Boolean);
}

#[test]
fn csv_recognizes_float_and_timestamp_columns() {
    let sample = "price,day\n9.99,2023-01-01\n12.50,2023-06-30";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    assert_eq!(fields[0].field_type, FieldType::Float);
    assert_eq!(fields[1].field_type, FieldType::Timestamp);
}

#[test]
fn csv_strips_quotes_and_whitespace() {
    let sample = "\"id\", \"label\"\n\"1\", \"alpha\"\n\"2\", \"beta\"";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].field_type, FieldType::Integer);
    assert_eq!(fields[1].name, "label");
}

#[test]
fn csv_short_rows_mark_missing_columns_optional() {
    let sample = "a,b,c\n1,2,3\n4,5";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    assert!(fields[0].required);
    assert!(fields[1].required);
    assert!(!fields[2].required);
}

#[test]
fn csv_header_only_sample_defaults_to_required_strings() {
    let fields = infer_fields(SourceType::File, "id,name", &no_hints()).unwrap();
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.required));
    assert!(fields
        .iter()
        .all(|f| f.field_type == FieldType::String));
}

#[test]
fn csv_empty_headers_are_skipped() {
    let sample = "id,,name\n1,x,John";
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name"]);
}

#[test]
fn file_source_detects_json_array_of_rows() {
    let sample = r#"[{"id":1,"score":9.5},{"id":2,"score":8}]"#;
    let fields = infer_fields(SourceType::File, sample, &no_hints()).unwrap();
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].field_type, FieldType::Integer);
    // 9.5 and 8 widen to float
    assert_eq!(fields[1].field_type, FieldType::Float);
}

#[test]
fn file_source_detects_single_json_object() {
    let fields =
        infer_fields(SourceType::File, r#"{"id":1,"name":"x"}"#, &no_hints()).unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].field_type, FieldType::Integer);
}

#[test]
fn file_source_falls_back_to_csv() {
    let fields = infer_fields(SourceType::File, "id,name\n1,x", &no_hints()).unwrap();
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].field_type, FieldType::Integer);
}

#[test]
fn json_rows_with_string_timestamps_resolve_timestamp() {
    let items = vec![
        json!({"seen": "2023-01-01T10:00:00Z"}),
        json!({"seen": "2023-01-02"}),
    ];
    let observations = tabular::analyze_json_rows(&items).unwrap();
    assert_eq!(observations[0].field_type, FieldType::Timestamp);
}

#[test]
fn json_rows_numeric_strings_stay_strings() {
    // typed sources are not re-sniffed: "123" is a string, not an integer
    let items = vec![json!({"zip": "0150"}), json!({"zip": "123"})];
    let observations = tabular::analyze_json_rows(&items).unwrap();
    assert_eq!(observations[0].field_type, FieldType::String);
}

#[test]
fn json_rows_missing_key_marks_optional() {
    let items = vec![json!({"a": 1, "b": 2}), json!({"a": 3})];
    let observations = tabular::analyze_json_rows(&items).unwrap();
    assert!(observations[0].required);
    assert!(!observations[1].required);
}

// --- DDL through the engine ---

#[test]
fn ddl_round_trip_through_engine() {
    let ddl = "CREATE TABLE customers (id INT PRIMARY KEY, name VARCHAR(255) NOT NULL, \
               email VARCHAR(255) UNIQUE, created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP);";
    let hints = SampleHints {
        table_name: Some("customers".to_string()),
        ..SampleHints::default()
    };
    let fields = infer_fields(SourceType::Database, ddl, &hints).unwrap();

    assert_eq!(fields.len(), 4);
    assert_eq!(
        (fields[0].name.as_str(), fields[0].field_type, fields[0].required),
        ("id", FieldType::Integer, true)
    );
    assert_eq!(
        (fields[1].name.as_str(), fields[1].field_type, fields[1].required),
        ("name", FieldType::String, true)
    );
    assert_eq!(
        (fields[2].name.as_str(), fields[2].field_type, fields[2].required),
        ("email", FieldType::String, false)
    );
    assert_eq!(
        (fields[3].name.as_str(), fields[3].field_type, fields[3].required),
        ("created_at", FieldType::Timestamp, false)
    );
}

#[test]
fn ddl_unknown_type_falls_back_to_string() {
    let fields = infer_fields(
        SourceType::Database,
        "CREATE TABLE t (location GEOGRAPHY NOT NULL)",
        &no_hints(),
    )
    .unwrap();
    assert_eq!(fields[0].field_type, FieldType::String);
    assert!(fields[0].required);
}

#[test]
fn ddl_without_parens_is_malformed() {
    let err =
        infer_fields(SourceType::Database, "DROP TABLE customers;", &no_hints()).unwrap_err();
    assert!(matches!(err, ContractError::MalformedSchema(_)));
}

#[test]
fn ddl_colliding_sanitized_names_are_disambiguated() {
    let ddl = "CREATE TABLE t (`a|` INT, `a/` VARCHAR(10))";
    let fields = infer_fields(SourceType::Database, ddl, &no_hints()).unwrap();
    assert_eq!(fields[0].name, "a_");
    assert_eq!(fields[1].name, "a__2");
}

// --- Engine-level behavior ---

#[test]
fn empty_sample_is_malformed_for_every_source() {
    for source in [SourceType::Database, SourceType::Api, SourceType::File] {
        let err = infer_fields(source, "   \n ", &no_hints()).unwrap_err();
        assert!(matches!(err, ContractError::MalformedSchema(_)));
    }
}

#[test]
fn source_type_round_trips_through_strings() {
    for source in [SourceType::Database, SourceType::Api, SourceType::File] {
        let parsed: SourceType = source.as_str().parse().unwrap();
        assert_eq!(parsed, source);
    }
    assert!("spreadsheet".parse::<SourceType>().is_err());
}

#[test]
fn inference_is_deterministic() {
    let samples = [
        (
            SourceType::Database,
            "CREATE TABLE t (id INT PRIMARY KEY, v DECIMAL(10,2))",
        ),
        (SourceType::Api, r#"{"b":1,"a":"x","c":null}"#),
        (SourceType::File, "id,name\n1,a\n2,b"),
    ];
    for (source, sample) in samples {
        let first = infer_fields(source, sample, &no_hints()).unwrap();
        let second = infer_fields(source, sample, &no_hints()).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn api_object_key_order_is_preserved() {
    let fields =
        infer_fields(SourceType::Api, r#"{"b":1,"a":2,"z":3,"m":4}"#, &no_hints()).unwrap();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "z", "m"]);
}

#[test]
fn ddl_constraints_survive_assembly() {
    let fields = infer_fields(
        SourceType::Database,
        "CREATE TABLE t (name VARCHAR(100) NOT NULL, price DECIMAL(8,2))",
        &no_hints(),
    )
    .unwrap();
    assert_eq!(fields[0].constraints["max_length"], json!(100));
    assert_eq!(fields[1].constraints["precision"], json!(8));
    assert_eq!(fields[1].constraints["scale"], json!(2));
}
