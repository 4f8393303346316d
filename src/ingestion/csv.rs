//! CSV parsing.

use std::io::Read;
use std::path::Path;

use crate::error::{DashboardError, DashboardResult};
use crate::types::{CellValue, RawRow};

/// Reader configuration used for every CSV source.
///
/// Rules:
///
/// - the first non-blank line is the header row (names trimmed)
/// - blank lines are dropped
/// - values map positionally onto the headers; missing trailing values become empty, values past
///   the last header are ignored
/// - no quoting: `"` is ordinary data and every comma splits (a literal comma inside a value is
///   not supported)
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Parse CSV bytes into raw rows.
///
/// Fails with "empty file" when the buffer is empty or holds no non-blank line.
pub fn parse_csv_bytes(bytes: &[u8]) -> DashboardResult<Vec<RawRow>> {
    if bytes.is_empty() {
        return Err(DashboardError::empty_file());
    }
    let mut rdr = reader_builder().from_reader(bytes);
    parse_csv_from_reader(&mut rdr)
}

/// Parse a CSV file into raw rows.
pub fn parse_csv_from_path(path: impl AsRef<Path>) -> DashboardResult<Vec<RawRow>> {
    let bytes = std::fs::read(path)?;
    parse_csv_bytes(&bytes)
}

/// Parse CSV data from an existing reader.
///
/// The reader should come from [`reader_builder`]; a reader that consumes its own header row
/// would lose the column names.
pub fn parse_csv_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> DashboardResult<Vec<RawRow>> {
    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<RawRow> = Vec::new();

    for result in rdr.byte_records() {
        let record = result?;
        if is_blank_record(&record) {
            continue;
        }

        let Some(header) = headers.as_ref() else {
            headers = Some(record.iter().map(decode).collect());
            continue;
        };

        let row = header
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = record.get(idx).map(decode).unwrap_or_default();
                (name.clone(), CellValue::text(value))
            })
            .collect();
        rows.push(row);
    }

    match headers {
        Some(_) => Ok(rows),
        None => Err(DashboardError::empty_file()),
    }
}

fn is_blank_record(record: &csv::ByteRecord) -> bool {
    record.iter().all(|f| f.is_empty()) && record.len() <= 1
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::parse_csv_bytes;
    use crate::error::DashboardError;
    use crate::types::CellValue;

    #[test]
    fn maps_values_onto_trimmed_headers() {
        let rows = parse_csv_bytes(b" student_id , name ,class\n1, Alice ,X\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].keys().collect::<Vec<_>>(),
            vec!["student_id", "name", "class"]
        );
        assert_eq!(rows[0].get("name"), Some(&CellValue::from("Alice")));
    }

    #[test]
    fn short_rows_get_empty_trailing_values_and_long_rows_are_cut() {
        let rows = parse_csv_bytes(b"a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("b"), Some(&CellValue::Empty));
        assert_eq!(rows[0].get("c"), Some(&CellValue::Empty));
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1].get("c"), Some(&CellValue::from("3")));
    }

    #[test]
    fn blank_lines_are_dropped() {
        let rows = parse_csv_bytes(b"\n  \na,b\n\n1,2\n   \n3,4\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("a"), Some(&CellValue::from("3")));
    }

    #[test]
    fn quotes_are_data_and_commas_always_split() {
        let rows = parse_csv_bytes(b"name,class\n\"Lee, Ann\",X\n").unwrap();
        assert_eq!(rows[0].get("name"), Some(&CellValue::from("\"Lee")));
        assert_eq!(rows[0].get("class"), Some(&CellValue::from("Ann\"")));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let rows = parse_csv_bytes(b"a,b\r\n1,2\r\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("b"), Some(&CellValue::from("2")));
    }

    #[test]
    fn empty_and_whitespace_only_inputs_fail() {
        for input in [&b""[..], &b"\n\n  \n"[..]] {
            let err = parse_csv_bytes(input).unwrap_err();
            assert!(matches!(err, DashboardError::Parse { .. }));
            assert_eq!(err.to_string(), "parse error: empty file");
        }
    }

    #[test]
    fn header_only_input_yields_no_rows() {
        let rows = parse_csv_bytes(b"a,b\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let rows = parse_csv_bytes(b"name\nA\xffB\n").unwrap();
        assert_eq!(rows[0].get("name"), Some(&CellValue::from("A\u{FFFD}B")));
    }
}
