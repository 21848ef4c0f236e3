//! CSV payload parsing

use crate::error::{ExtractError, ExtractResult};
use csv::ReaderBuilder;
use evwh_core::RawTable;
use std::io::Read;
use std::path::Path;

/// Parse a headed CSV payload into a raw string table.
///
/// Rows may be ragged; ingestion pads short rows with nulls.
pub fn parse_csv<R: Read>(reader: R) -> ExtractResult<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if let Some(first) = headers.first_mut() {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ExtractError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    log::debug!("Parsed CSV: {} columns, {} rows", headers.len(), rows.len());
    Ok(RawTable { headers, rows })
}

/// Read and parse a CSV file.
pub fn read_csv_file(path: &Path) -> ExtractResult<RawTable> {
    let file = std::fs::File::open(path).map_err(|e| ExtractError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_csv(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_quoted_fields() {
        let payload = "VIN (1-10),Make,Vehicle Location\n\
                       5YJ3E1EA7K,TESLA,\"POINT (-122.3, 47.6)\"\n";
        let table = parse_csv(payload.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["VIN (1-10)", "Make", "Vehicle Location"]);
        assert_eq!(table.rows[0][2], "POINT (-122.3, 47.6)");
    }

    #[test]
    fn test_parse_strips_bom_and_allows_ragged_rows() {
        let payload = "\u{feff}Make,Model\nKIA\nFORD,F-150\n";
        let table = parse_csv(payload.as_bytes()).unwrap();
        assert_eq!(table.headers[0], "Make");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["KIA"]);
    }

    #[test]
    fn test_empty_payload_has_no_header() {
        let err = parse_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, ExtractError::MissingHeader));
    }

    #[test]
    fn test_read_csv_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ev.csv");
        std::fs::write(&path, "Make,Model\nNISSAN,LEAF\n").unwrap();
        let table = read_csv_file(&path).unwrap();
        assert_eq!(table.rows, vec![vec!["NISSAN".to_string(), "LEAF".to_string()]]);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_csv_file(Path::new("/nonexistent/ev.csv")).unwrap_err();
        assert!(matches!(err, ExtractError::IoWithPath { .. }));
    }
}
