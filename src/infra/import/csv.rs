use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::domain::entities::dataset::{Dataset, Record};
use crate::domain::error::MalformedInput;

// Quote characters are ordinary data here: a field ends at every comma.
fn raw_rows(text: &str) -> impl Iterator<Item = StringRecord> + '_ {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes())
        .into_records()
        .filter_map(Result::ok)
}

// The reader's own line counter skips blank lines, so count newlines up to the
// record's byte offset instead.
fn line_of(text: &str, record: &StringRecord, fallback: usize) -> u64 {
    record
        .position()
        .and_then(|pos| usize::try_from(pos.byte()).ok())
        .and_then(|byte| text.get(..byte))
        .map(|before| before.matches('\n').count() as u64 + 1)
        .unwrap_or(fallback as u64 + 1)
}

/// Checks that `text` has a header and data rows that all match the header width.
pub fn validate(text: &str) -> Result<(), MalformedInput> {
    let rows: Vec<StringRecord> = raw_rows(text).collect();
    if rows.len() < 2 {
        return Err(MalformedInput::TooFewLines { lines: rows.len() });
    }

    let expected = rows[0].len();
    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.len() != expected {
            return Err(MalformedInput::ColumnCount {
                row: line_of(text, row, idx),
                found: row.len(),
                expected,
            });
        }
    }
    Ok(())
}

/// Splits `text` into headers and records. Headers and values are trimmed. Short rows
/// are padded with empty values, long rows are truncated.
pub fn parse(text: &str) -> Dataset {
    let mut rows = raw_rows(text);
    let Some(header_row) = rows.next() else {
        return Dataset::default();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|name| name.trim().to_string())
        .collect();

    let records: Vec<Record> = rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    (header.clone(), row.get(idx).unwrap_or("").trim().to_string())
                })
                .collect()
        })
        .collect();

    debug!(
        columns = headers.len(),
        rows = records.len(),
        "parsed csv text"
    );
    Dataset::new(headers, records)
}

/// Validates then parses.
pub fn load(text: &str) -> Result<Dataset, MalformedInput> {
    validate(text)?;
    Ok(parse(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_headers_and_values() {
        let dataset = parse(" name , age\nBob , 30\n");

        assert_eq!(dataset.headers, vec!["name", "age"]);
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].get("name"), Some("Bob"));
        assert_eq!(dataset.records[0].get("age"), Some("30"));
    }

    #[test]
    fn every_record_has_header_width() {
        let dataset = parse("a,b,c\n1\n1,2,3,4\n");

        for record in &dataset.records {
            assert_eq!(record.len(), 3);
        }
        assert_eq!(dataset.records[0].get("b"), Some(""));
        assert_eq!(dataset.records[1].get("c"), Some("3"));
    }

    #[test]
    fn quotes_are_not_special() {
        let dataset = parse("a,b\n\"x,y\",z\n");
        assert_eq!(dataset.records[0].get("a"), Some("\"x"));
        assert_eq!(dataset.records[0].get("b"), Some("y\""));
    }

    #[test]
    fn validate_reports_line_of_wide_row() {
        let err = validate("a,b\n1,2,3").expect_err("row should be rejected");
        assert_eq!(
            err,
            MalformedInput::ColumnCount {
                row: 2,
                found: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn validate_counts_original_lines() {
        let err = validate("a,b\n1,2\n3,4\n5\n").expect_err("row should be rejected");
        assert!(matches!(err, MalformedInput::ColumnCount { row: 4, found: 1, .. }));
    }

    #[test]
    fn validate_reports_original_line_after_blank_lines() {
        let err = validate("a,b\n\n1,2,3").expect_err("row should be rejected");
        assert!(matches!(err, MalformedInput::ColumnCount { row: 3, found: 3, .. }));

        let err = validate("a,b\n1,2\n\n\n3").expect_err("row should be rejected");
        assert!(matches!(err, MalformedInput::ColumnCount { row: 5, found: 1, .. }));

        let err = validate("a,b\r\n\r\n1,2\r\n3,4,5\r\n").expect_err("row should be rejected");
        assert!(matches!(err, MalformedInput::ColumnCount { row: 4, found: 3, .. }));
    }

    #[test]
    fn validate_needs_header_and_data() {
        assert_eq!(
            validate("a,b\n"),
            Err(MalformedInput::TooFewLines { lines: 1 })
        );
        assert_eq!(validate(""), Err(MalformedInput::TooFewLines { lines: 0 }));
    }

    #[test]
    fn crlf_and_trailing_blank_lines_are_accepted() {
        let dataset = load("a,b\r\n1,2\r\n\r\n").expect("csv should load");
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].get("b"), Some("2"));
    }
}
