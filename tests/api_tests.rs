//! Integration tests for the public Rust API.
//!
//! These tests drive `decode_csv()`, `resolve_columns()` and `decode_batch()`
//! the way a host would: resolve a schema once, then decode whole batches.

use csvpick::{
    decode_batch, decode_csv, resolve_columns, Column, ColumnType, ConfigError, ConversionError,
    DecodeCsvError, DecodeOptions, FormatError, Scalar,
};

fn no_defaults(n: usize) -> Vec<Vec<Scalar>> {
    vec![Vec::new(); n]
}

// =============================================================================
// decode_csv() Tests
// =============================================================================

#[test]
fn test_decode_all_columns_in_order() {
    let batch = decode_csv(
        &["1,2.5,x", "3,4.5,y"],
        &no_defaults(3),
        &[],
        &[ColumnType::Int32, ColumnType::Float32, ColumnType::String],
        &DecodeOptions::default(),
    )
    .expect("well-formed batch should decode");

    assert_eq!(batch.num_records(), 2);
    assert_eq!(batch.column(0), Some(&Column::Int32(vec![1, 3])));
    assert_eq!(batch.column(1), Some(&Column::Float32(vec![2.5, 4.5])));
    assert_eq!(
        batch.column(2),
        Some(&Column::String(vec!["x".to_string(), "y".to_string()]))
    );
}

#[test]
fn test_default_fills_empty_field() {
    let batch = decode_csv(
        &["5,,z"],
        &[Vec::new(), vec![Scalar::Float32(9.0)], Vec::new()],
        &[],
        &[ColumnType::Int32, ColumnType::Float32, ColumnType::String],
        &DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(batch.column(1).unwrap().as_float32(), Some(&[9.0f32][..]));
}

#[test]
fn test_record_shorter_than_bound() {
    let err = decode_csv(
        &["1,2"],
        &no_defaults(1),
        &[2],
        &[ColumnType::Int32],
        &DecodeOptions::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        DecodeCsvError::Format {
            record_index: 0,
            source: FormatError::TooFewFields {
                expected: 3,
                actual: 2,
            },
        }
    );
}

#[test]
fn test_malformed_record_is_identified() {
    let err = decode_csv(
        &["\"fine\",1", "\"unterminated,x"],
        &no_defaults(2),
        &[],
        &[ColumnType::String, ColumnType::String],
        &DecodeOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.record_index(), Some(1));
    assert!(matches!(
        err,
        DecodeCsvError::Format {
            source: FormatError::UnterminatedQuote { .. },
            ..
        }
    ));
}

#[test]
fn test_required_field_missing_names_record_and_column() {
    let err = decode_csv(
        &["a,1", "b,2", "c,"],
        &no_defaults(2),
        &[],
        &[ColumnType::String, ColumnType::Int64],
        &DecodeOptions::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        DecodeCsvError::Conversion {
            record_index: 2,
            source: ConversionError::MissingRequired { column: 1 },
        }
    );
    let msg = err.to_string();
    assert!(msg.contains("record 2"), "message was: {msg}");
    assert!(msg.contains("Field 1"), "message was: {msg}");
}

#[test]
fn test_invalid_number_reports_text() {
    let err = decode_csv(
        &["1", "two"],
        &no_defaults(1),
        &[],
        &[ColumnType::Int32],
        &DecodeOptions::default(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("two"));
    assert_eq!(err.record_index(), Some(1));
}

#[test]
fn test_tab_delimited_with_selection() {
    let batch = decode_csv(
        &["id\tname\tscore", "7\t\"x\ty\"\t0.5"],
        &[vec![Scalar::String("?".into())], Vec::new()],
        &[1, 2],
        &[ColumnType::String, ColumnType::String],
        &DecodeOptions::from_delimiter_str("\t").unwrap(),
    )
    .unwrap();

    assert_eq!(
        batch.column(0),
        Some(&Column::String(vec!["name".into(), "x\ty".into()]))
    );
    assert_eq!(
        batch.column(1),
        Some(&Column::String(vec!["score".into(), "0.5".into()]))
    );
}

#[test]
fn test_same_field_selected_twice_with_different_types() {
    let batch = decode_csv(
        &["x,42"],
        &no_defaults(2),
        &[1, 1],
        &[ColumnType::String, ColumnType::Int64],
        &DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(batch.column(0), Some(&Column::String(vec!["42".into()])));
    assert_eq!(batch.column(1), Some(&Column::Int64(vec![42])));
}

#[test]
fn test_owned_and_borrowed_record_types() {
    let owned: Vec<String> = vec!["1".to_string(), "2".to_string()];
    let borrowed: Vec<&str> = owned.iter().map(String::as_str).collect();
    let types = [ColumnType::Int32];

    let a = decode_csv(&owned, &no_defaults(1), &[], &types, &DecodeOptions::default()).unwrap();
    let b = decode_csv(&borrowed, &no_defaults(1), &[], &types, &DecodeOptions::default()).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn test_configuration_errors() {
    let opts = DecodeOptions::default();
    let int = ColumnType::Int32;

    let cases: Vec<(DecodeCsvError, ConfigError)> = vec![
        (
            decode_csv(&["1"], &no_defaults(2), &[], &[int], &opts).unwrap_err(),
            ConfigError::DefaultsLengthMismatch {
                defaults: 2,
                output_types: 1,
            },
        ),
        (
            decode_csv(
                &["1"],
                &[vec![Scalar::Int32(1), Scalar::Int32(2)]],
                &[],
                &[int],
                &opts,
            )
            .unwrap_err(),
            ConfigError::TooManyDefaults {
                column: 0,
                count: 2,
            },
        ),
        (
            decode_csv(&["1"], &no_defaults(1), &[0, 1], &[int], &opts).unwrap_err(),
            ConfigError::FieldIndicesLength {
                expected: 1,
                actual: 2,
            },
        ),
        (
            decode_csv(&["1"], &no_defaults(1), &[-2], &[int], &opts).unwrap_err(),
            ConfigError::NegativeFieldIndex {
                column: 0,
                index: -2,
            },
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err, DecodeCsvError::Configuration(expected));
        assert_eq!(err.record_index(), None);
    }
}

#[test]
fn test_unsupported_type_name() {
    let err = "float64".parse::<ColumnType>().unwrap_err();
    assert_eq!(err, ConfigError::UnsupportedType("float64".to_string()));
}

// =============================================================================
// resolve_columns() + decode_batch() Tests
// =============================================================================

#[test]
fn test_schema_reused_across_batches() {
    let schema = resolve_columns(
        &[2, 0],
        &[vec![Scalar::Int64(0)], Vec::new()],
        &[ColumnType::Int64, ColumnType::String],
    )
    .unwrap();
    let opts = DecodeOptions::default();

    let first = decode_batch(&["a,b,1", "c,d,"], &schema, &opts).unwrap();
    let second = decode_batch(&["e,f,3"], &schema, &opts).unwrap();

    assert_eq!(first.column(0), Some(&Column::Int64(vec![1, 0])));
    assert_eq!(second.column(0), Some(&Column::Int64(vec![3])));
    assert_eq!(
        second.column(1),
        Some(&Column::String(vec!["e".to_string()]))
    );
}

#[test]
fn test_large_batch_decodes_in_parallel_chunks() {
    let records: Vec<String> = (0..10_000)
        .map(|i| format!("{},\"name {}\",{}", i, i, i as f32 / 4.0))
        .collect();
    let schema = resolve_columns(
        &[0, 2],
        &no_defaults(2),
        &[ColumnType::Int64, ColumnType::Float32],
    )
    .unwrap();

    let batch = decode_batch(
        &records,
        &schema,
        &DecodeOptions::new()
            .with_parallel_threshold(1000)
            .with_chunk_size(333),
    )
    .unwrap();

    let ids = batch.column(0).unwrap().as_int64().unwrap();
    assert_eq!(ids.len(), 10_000);
    assert!(ids.iter().enumerate().all(|(i, &v)| v == i as i64));
    let scores = batch.column(1).unwrap().as_float32().unwrap();
    assert_eq!(scores[9], 2.25);
}

#[test]
fn test_large_batch_reports_first_bad_record() {
    let mut records: Vec<String> = (0..5000).map(|i| i.to_string()).collect();
    records[4000] = "bad".to_string();
    records[2500] = String::new();
    let schema = resolve_columns(&[], &no_defaults(1), &[ColumnType::Int32]).unwrap();

    let err = decode_batch(
        &records,
        &schema,
        &DecodeOptions::new()
            .with_parallel_threshold(0)
            .with_chunk_size(100),
    )
    .unwrap_err();

    assert_eq!(
        err,
        DecodeCsvError::Format {
            record_index: 2500,
            source: FormatError::TooFewFields {
                expected: 1,
                actual: 0,
            },
        }
    );
}

#[test]
fn test_non_utf8_bytes_decoded_lossily_by_caller() {
    let raw: &[u8] = b"caf\xe9,1";
    let record = String::from_utf8_lossy(raw);

    let batch = decode_csv(
        &[record.as_ref()],
        &no_defaults(2),
        &[],
        &[ColumnType::String, ColumnType::Int32],
        &DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(
        batch.column(0),
        Some(&Column::String(vec!["caf\u{FFFD}".to_string()]))
    );
    assert_eq!(batch.column(1), Some(&Column::Int32(vec![1])));
}

#[test]
fn test_float_fields_allow_surrounding_spaces() {
    let batch = decode_csv(
        &[" 1.5 ,x", "2.5,y"],
        &no_defaults(1),
        &[0],
        &[ColumnType::Float32],
        &DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(batch.column(0), Some(&Column::Float32(vec![1.5, 2.5])));
}
