//! Property tests: emitted CSV parses back into the original grid

use proptest::prelude::*;
use xls_stream::prelude::*;

fn parse_line(line: &str) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    record.iter().map(str::to_string).collect()
}

fn grid_strategy() -> impl Strategy<Value = (usize, Vec<Vec<Option<String>>>)> {
    (1usize..6).prop_flat_map(|cols| {
        let cell = proptest::option::of("[a-z ,\"]{0,8}");
        let row = proptest::collection::vec(cell, cols);
        proptest::collection::vec(row, 0..8).prop_map(move |rows| (cols, rows))
    })
}

proptest! {
    #[test]
    fn prop_grid_round_trip((cols, rows) in grid_strategy()) {
        let mut records = vec![
            Record::SheetBoundary { name: "Grid".into(), offset: 100 },
            Record::worksheet_begin(),
        ];
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(text) = cell {
                    records.push(Record::LabelCell {
                        row: r as u32,
                        col: c as u16,
                        text: text.clone(),
                    });
                }
            }
        }
        records.push(Record::SheetEnd);

        let options = EngineOptions::default().with_min_columns(cols as i32);
        let out = convert_to_string(records, options).unwrap();
        let lines: Vec<&str> = out.split_terminator('\n').collect();

        prop_assert_eq!(lines[0], "");
        prop_assert_eq!(lines[1], "Grid [1]:");

        // Rows after the last present cell are never emitted
        let emitted = rows
            .iter()
            .rposition(|row| row.iter().any(Option::is_some))
            .map_or(0, |last| last + 1);
        prop_assert_eq!(lines.len(), 2 + emitted);

        for (line, row) in lines[2..].iter().zip(&rows) {
            let expected: Vec<String> = row
                .iter()
                .map(|cell| cell.clone().unwrap_or_default())
                .collect();
            prop_assert_eq!(parse_line(line), expected);
        }
    }
}
