//! Encode/decode behavior across the three payload shapes.

use chrono::{FixedOffset, TimeZone};
use enumviz_payload::{
    Cell, ColumnDef, DecodedModel, EncoderOptions, ErrorPolicy, PayloadDecoder, PayloadEncoder,
    SequenceSource, Shape, SourceObject, SourceValue, Table, ValueKind, DEFAULT_MAX_ELEMENTS,
    MAX_DECODED_ENTRIES,
};
use serde_json::json;

fn roundtrip<S: SourceObject + ?Sized>(source: &S) -> DecodedModel {
    let report = PayloadEncoder::new().encode(source).expect("encode");
    PayloadDecoder::new()
        .decode(report.payload.as_bytes())
        .expect("decode")
}

fn texts(model: &DecodedModel) -> Vec<String> {
    match model {
        DecodedModel::Sequential(seq) => seq.items.iter().map(|c| c.text.clone()).collect(),
        other => panic!("expected sequential, got {:?}", other.shape()),
    }
}

// ---------------------------------------------------------------------------
// Sequential
// ---------------------------------------------------------------------------

#[test]
fn integer_list_is_sequential() {
    let model = roundtrip(&vec![1, 2, 3]);
    assert_eq!(model.shape(), Shape::Sequential);
    assert_eq!(texts(&model), ["1", "2", "3"]);
    assert!(!model.truncated());
}

#[test]
fn mixed_items_keep_their_kinds() {
    let dt = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2023, 5, 1, 8, 30, 0)
        .unwrap();
    let items = vec![
        SourceValue::Null,
        SourceValue::Bool(false),
        SourceValue::Float(2.5),
        SourceValue::from(dt),
        SourceValue::Json(json!({"k": [1, 2]})),
    ];
    let DecodedModel::Sequential(seq) = roundtrip(&items) else {
        panic!("expected sequential");
    };
    assert_eq!(
        seq.items,
        vec![
            Cell::new(ValueKind::Null, "null"),
            Cell::new(ValueKind::Boolean, "false"),
            Cell::new(ValueKind::Float, "2.5"),
            Cell::new(ValueKind::DateTime, "2023-05-01T08:30:00+01:00"),
            Cell::new(ValueKind::Json, r#"{"k":[1,2]}"#),
        ]
    );
}

#[test]
fn empty_sequence() {
    let model = roundtrip(&Vec::<i32>::new());
    assert_eq!(model.shape(), Shape::Sequential);
    assert!(model.is_empty());
}

#[test]
fn sequence_at_the_bound_is_not_truncated() {
    let items: Vec<u32> = (0..DEFAULT_MAX_ELEMENTS as u32).collect();
    let model = roundtrip(&items);
    assert_eq!(model.len(), DEFAULT_MAX_ELEMENTS);
    assert!(!model.truncated());
}

#[test]
fn sequence_past_the_bound_is_truncated() {
    let items: Vec<u32> = (0..DEFAULT_MAX_ELEMENTS as u32 + 1).collect();
    let model = roundtrip(&items);
    assert_eq!(model.len(), DEFAULT_MAX_ELEMENTS);
    assert!(model.truncated());
    assert_eq!(texts(&model).last().map(String::as_str), Some("999"));
}

#[test]
fn unbounded_generator_terminates() {
    let evens = SequenceSource::new("Evens", || (0i64..).step_by(2).map(SourceValue::from));
    let opts = EncoderOptions::default().with_max_elements(4);
    let report = PayloadEncoder::with_options(opts).encode(&evens).unwrap();
    let model = PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap();
    assert_eq!(texts(&model), ["0", "2", "4", "6"]);
    assert!(model.truncated());
}

#[test]
fn oversized_element_bound_still_decodes() {
    let naturals = SequenceSource::new("Naturals", || (0u64..).map(SourceValue::from));
    let opts = EncoderOptions::default().with_max_elements(2_000_000);
    let report = PayloadEncoder::with_options(opts).encode(&naturals).unwrap();
    let model = PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap();
    assert_eq!(model.len(), MAX_DECODED_ENTRIES);
    assert!(model.truncated());
}

#[test]
fn long_element_decodes_as_placeholder() {
    let items = vec![SourceValue::from("short"), SourceValue::from("x".repeat(64))];
    let opts = EncoderOptions::default().with_max_text_bytes(16);
    let report = PayloadEncoder::with_options(opts).encode(&items).unwrap();
    let DecodedModel::Sequential(seq) =
        PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap()
    else {
        panic!("expected sequential");
    };
    assert_eq!(seq.items[0], Cell::new(ValueKind::Text, "short"));
    assert!(seq.items[1].is_placeholder());
}

#[test]
fn placeholders_survive_the_trip() {
    let items = vec![
        SourceValue::Text("ok".into()),
        SourceValue::Float(f64::NAN),
        SourceValue::Handle("FileStream".into()),
    ];
    let report = PayloadEncoder::new().encode(&items).unwrap();
    assert_eq!(report.degraded.iter().map(|(i, _)| *i).collect::<Vec<_>>(), [1, 2]);
    let DecodedModel::Sequential(seq) =
        PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap()
    else {
        panic!("expected sequential");
    };
    assert!(!seq.items[0].is_placeholder());
    assert!(seq.items[1].is_placeholder());
    assert_eq!(
        seq.items[2].text,
        "<unrepresentable: resource handle `FileStream` cannot leave the debuggee process>"
    );
}

// ---------------------------------------------------------------------------
// Tabular
// ---------------------------------------------------------------------------

fn people() -> Table {
    Table::new(
        "People",
        vec![
            ColumnDef::new("Id", ValueKind::Integer),
            ColumnDef::new("Name", ValueKind::Text),
        ],
    )
    .with_row([SourceValue::from(1), SourceValue::from("Alice")])
    .with_row([SourceValue::from(2), SourceValue::from("Bob")])
}

#[test]
fn two_by_two_table() {
    let DecodedModel::Tabular(table) = roundtrip(&people()) else {
        panic!("expected tabular");
    };
    let names: Vec<_> = table.columns().iter().map(|c| (c.name.as_str(), c.kind)).collect();
    assert_eq!(names, [("Id", ValueKind::Integer), ("Name", ValueKind::Text)]);
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.rows()[0][0].as_i64(), Some(1));
    assert_eq!(table.rows()[0][1].text, "Alice");
    assert_eq!(table.rows()[1][0].as_i64(), Some(2));
    assert_eq!(table.rows()[1][1].text, "Bob");
}

#[test]
fn short_and_long_rows_are_squared_up() {
    let mut table = people();
    table.rows.push(vec![SourceValue::from(3)]);
    table
        .rows
        .push(vec![SourceValue::from(4), SourceValue::from("Dan"), SourceValue::from("extra")]);
    let report = PayloadEncoder::new().encode(&table).unwrap();
    assert_eq!(report.degraded.len(), 2);
    let DecodedModel::Tabular(decoded) =
        PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap()
    else {
        panic!("expected tabular");
    };
    assert!(decoded.rows().iter().all(|r| r.len() == 2));
    assert!(decoded.rows()[2][1].is_placeholder());
    assert_eq!(decoded.rows()[3][1].text, "Dan");
}

#[test]
fn ragged_row_aborts_under_abort_policy() {
    let mut table = people();
    table.rows.push(vec![SourceValue::from(3)]);
    let opts = EncoderOptions::default().with_error_policy(ErrorPolicy::Abort);
    let err = PayloadEncoder::with_options(opts).encode(&table).unwrap_err();
    assert_eq!(
        err.to_string(),
        "element 2 cannot be serialized: row has 1 cells but the table declares 2 columns"
    );
}

#[test]
fn table_rows_are_bounded() {
    let mut table = Table::new("Big", vec![ColumnDef::new("n", ValueKind::Integer)]);
    for i in 0..10 {
        table.push_row([i]);
    }
    let opts = EncoderOptions::default().with_max_elements(3);
    let report = PayloadEncoder::with_options(opts).encode(&table).unwrap();
    assert!(report.truncated);
    let model = PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap();
    assert_eq!(model.len(), 3);
    assert!(model.truncated());
}

#[test]
fn json_records_become_a_table() {
    let value = json!([
        {"Id": 1, "Name": "Alice"},
        {"Id": 2, "Name": "Bob", "Tags": ["x"]},
    ]);
    let DecodedModel::Tabular(table) = roundtrip(&value) else {
        panic!("expected tabular");
    };
    assert_eq!(table.columns().len(), 3);
    assert_eq!(table.rows()[0][2].kind, ValueKind::Null);
    assert_eq!(table.rows()[1][2].as_json(), Some(json!(["x"])));
}

#[test]
fn records_past_the_bound_contribute_no_columns() {
    let source = json!([{"a": 0}, {"a": 1}, {"a": 2}, {"secret": "x"}]);
    let opts = EncoderOptions::default().with_max_elements(3);
    let report = PayloadEncoder::with_options(opts).encode(&source).unwrap();
    let DecodedModel::Tabular(table) =
        PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap()
    else {
        panic!("expected tabular");
    };
    let names: Vec<_> = table.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a"]);
    assert_eq!(table.rows().len(), 3);
    assert!(table.truncated());
}

// ---------------------------------------------------------------------------
// Textual
// ---------------------------------------------------------------------------

#[test]
fn plain_string_is_textual_without_hint() {
    let DecodedModel::Textual(text) = roundtrip("hello") else {
        panic!("expected textual");
    };
    assert_eq!(text.text, "hello");
    assert_eq!(text.language, None);
}

#[test]
fn language_hint_travels_with_text() {
    let opts = EncoderOptions::default().with_language_hint("JSON");
    let report = PayloadEncoder::with_options(opts)
        .encode(&String::from("{\"a\": 1}"))
        .unwrap();
    let DecodedModel::Textual(text) =
        PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap()
    else {
        panic!("expected textual");
    };
    assert_eq!(text.language.as_deref(), Some("JSON"));
}

#[test]
fn multiline_unicode_text() {
    let s = "línea 1\nline 2\t— 日本\r\n";
    let DecodedModel::Textual(text) = roundtrip(s) else {
        panic!("expected textual");
    };
    assert_eq!(text.text, s);
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn encoding_twice_decodes_equal() {
    let value = json!([{"a": 1.25, "b": null}, {"a": -3, "b": "x"}]);
    assert_eq!(roundtrip(&value), roundtrip(&value));
    let table = people();
    assert_eq!(roundtrip(&table), roundtrip(&table));
}
