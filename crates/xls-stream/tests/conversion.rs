//! End-to-end conversion of record streams

use pretty_assertions::assert_eq;
use xls_stream::prelude::*;
use xls_stream::{EngineResult, MISSING_TABLE_PLACEHOLDER};

/// Split output into lines and each line into fields
fn grid(output: &str) -> Vec<Vec<String>> {
    output
        .split_terminator('\n')
        .map(|line| {
            if line.is_empty() {
                return vec![String::new()];
            }
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(line.as_bytes());
            let record = reader.records().next().unwrap().unwrap();
            record.iter().map(str::to_string).collect()
        })
        .collect()
}

fn boundary(name: &str, offset: u32) -> Record {
    Record::SheetBoundary {
        name: name.into(),
        offset,
    }
}

fn label(row: u32, col: u16, text: &str) -> Record {
    Record::LabelCell {
        row,
        col,
        text: text.into(),
    }
}

fn run(records: Vec<Record>, options: EngineOptions) -> EngineResult<String> {
    convert_to_string(records, options)
}

#[test]
fn test_sheets_numbered_by_offset() {
    let records = vec![
        boundary("Sheet2", 500),
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        label(0, 0, "first"),
        Record::SheetEnd,
        Record::worksheet_begin(),
        label(0, 0, "second"),
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default()).unwrap();
    assert_eq!(
        out,
        "\nSheet1 [1]:\n\"first\"\n\nSheet2 [2]:\n\"second\"\n"
    );
}

#[test]
fn test_row_padding_to_min_columns() {
    let records = vec![
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        label(0, 0, "a"),
        label(0, 2, "c"),
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default().with_min_columns(5)).unwrap();
    let rows = grid(&out);
    assert_eq!(rows[2], vec!["a", "", "c", "", ""]);
    assert_eq!(out.lines().last(), Some("\"a\",,\"c\",,"));
}

#[test]
fn test_deferred_string_routed_to_formula_cell() {
    let records = vec![
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        Record::FormulaCell {
            row: 3,
            col: 1,
            result: f64::NAN,
            format: NumberFormat::General,
            expression: vec![],
        },
        Record::DeferredStringResult {
            text: "TOTAL".into(),
        },
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default()).unwrap();
    let rows = grid(&out);
    // Blank line and header, then rows 0..=3
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[5], vec!["", "TOTAL"]);
    assert!(out.ends_with(",\"TOTAL\"\n"));
}

#[test]
fn test_formula_string_result_never_arrives() {
    let string_formula = |row, col| Record::FormulaCell {
        row,
        col,
        result: f64::NAN,
        format: NumberFormat::General,
        expression: vec![],
    };
    let records = vec![
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        string_formula(0, 0),
        label(0, 1, "x"),
        string_formula(1, 0),
        Record::NumericCell {
            row: 2,
            col: 0,
            value: 2.5,
            format: NumberFormat::from_id(1),
        },
        Record::NumericCell {
            row: 2,
            col: 1,
            value: 1.25,
            format: NumberFormat::from_id(12),
        },
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default()).unwrap();
    assert_eq!(out, "\nSheet1 [1]:\n,\"x\"\n\n3,1 1/4\n");
}

#[test]
fn test_shared_string_before_table_loads() {
    let records = vec![
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        Record::IndexedLabelCell {
            row: 0,
            col: 0,
            index: 4,
        },
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default()).unwrap();
    assert_eq!(grid(&out)[2], vec![MISSING_TABLE_PLACEHOLDER]);
}

#[test]
fn test_shared_string_lookups_are_stable() {
    let records = vec![
        Record::StringTable {
            strings: vec!["x".into(), "repeat".into()],
        },
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        Record::IndexedLabelCell {
            row: 0,
            col: 0,
            index: 1,
        },
        Record::IndexedLabelCell {
            row: 0,
            col: 1,
            index: 1,
        },
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default()).unwrap();
    assert_eq!(grid(&out)[2], vec!["repeat", "repeat"]);
}

#[test]
fn test_empty_document() {
    assert_eq!(run(vec![], EngineOptions::default()).unwrap(), "");

    // Globals only
    let records = vec![
        Record::SheetBegin {
            kind: SubstreamKind::Globals,
        },
        boundary("Sheet1", 100),
        Record::SheetEnd,
    ];
    assert_eq!(run(records, EngineOptions::default()).unwrap(), "");
}

#[test]
fn test_chart_substream_has_no_header() {
    let records = vec![
        boundary("Sheet1", 100),
        Record::SheetBegin {
            kind: SubstreamKind::Chart,
        },
        Record::SheetEnd,
        Record::worksheet_begin(),
        label(0, 0, "a"),
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default()).unwrap();
    assert_eq!(out, "\nSheet1 [1]:\n\"a\"\n");
}

#[test]
fn test_numbers_and_dates() {
    let records = vec![
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        Record::NumericCell {
            row: 0,
            col: 0,
            value: 45000.0,
            format: NumberFormat::from_id(14),
        },
        Record::NumericCell {
            row: 0,
            col: 1,
            value: 0.256,
            format: NumberFormat::from_id(10),
        },
        Record::NumericCell {
            row: 0,
            col: 2,
            value: 1234567.0,
            format: NumberFormat::from_id(3),
        },
        Record::FormulaCell {
            row: 0,
            col: 3,
            result: 7.0,
            format: NumberFormat::General,
            expression: vec![Ptg::Int(3), Ptg::Int(4), Ptg::Add],
        },
        Record::SheetEnd,
    ];
    let out = run(records, EngineOptions::default()).unwrap();
    assert_eq!(out.lines().last(), Some("3/15/23,25.60%,\"1,234,567\",7"));
}

#[test]
fn test_expression_mode_cross_sheet() {
    let records = vec![
        boundary("Summary", 100),
        boundary("Q1 Data", 900),
        Record::ExternSheet {
            refs: vec![xls_stream::ExternSheetRef {
                supbook: 0,
                first_sheet: 1,
                last_sheet: 1,
            }],
        },
        Record::worksheet_begin(),
        Record::FormulaCell {
            row: 0,
            col: 0,
            result: f64::NAN,
            format: NumberFormat::General,
            expression: vec![
                Ptg::Area3d {
                    ixti: 0,
                    area: xls_stream::CellRange::from_indices(0, 0, 9, 0),
                },
                Ptg::FuncVar { index: 4, argc: 1 },
            ],
        },
        Record::DeferredStringResult {
            text: "ignored".into(),
        },
        Record::SheetEnd,
    ];
    let options = EngineOptions::default().with_render_mode(RenderMode::Expression);
    let out = run(records, options).unwrap();
    assert_eq!(out, "\nSummary [1]:\n\"SUM('Q1 Data'!A1:A10)\"\n");
}

#[test]
fn test_corrupt_index_abort() {
    let records = vec![
        Record::StringTable { strings: vec![] },
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        Record::IndexedLabelCell {
            row: 2,
            col: 3,
            index: 0,
        },
    ];
    let options = EngineOptions::default().with_corrupt_index(CorruptIndexPolicy::Abort);
    let err = run(records, options).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Record {
            position: Some((2, 3)),
            ..
        }
    ));
}

#[test]
fn test_crlf_and_semicolon_dialect() {
    let records = vec![
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        label(0, 0, "a"),
        Record::NumericCell {
            row: 0,
            col: 1,
            value: 1.5,
            format: NumberFormat::General,
        },
        Record::SheetEnd,
    ];
    let options = EngineOptions::default()
        .with_delimiter(b';')
        .with_line_terminator(LineTerminator::CRLF)
        .with_locale(Locale::de_de());
    let out = run(records, options).unwrap();
    assert_eq!(out, "\r\nSheet1 [1]:\r\n\"a\";1,5\r\n");
}

#[test]
fn test_convert_into_writer() {
    let records = vec![
        boundary("Sheet1", 100),
        Record::worksheet_begin(),
        label(0, 0, "a"),
    ];
    let buffer = convert(records, Vec::new(), EngineOptions::default()).unwrap();
    assert_eq!(buffer, b"\nSheet1 [1]:\n\"a\"\n");
}
