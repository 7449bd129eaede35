//! CSV export of result rows and lenient parsing of CSV bodies returned by
//! the export endpoint.

use thiserror::Error;

use crate::normalize::ProductStatusRow;

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV has no header columns")]
    NoColumns,

    #[error("CSV record on line {line} has {fields} fields, header has {expected}")]
    RaggedRecord {
        line: u64,
        fields: usize,
        expected: usize,
    },
}

/// A CSV body parsed into a header row and string records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    /// Each record has exactly `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

/// Serializes rows to CSV with the fixed column set.
///
/// The header row is always written, even when `rows` is empty.
///
/// # Errors
///
/// Returns [`CsvExportError`] if the writer fails, which only happens on
/// internal buffer errors.
pub fn rows_to_csv(rows: &[ProductStatusRow]) -> Result<String, CsvExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(ProductStatusRow::HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Parses a CSV body with a header row.
///
/// Records shorter than the header are padded with empty cells; longer ones
/// are rejected. A leading UTF-8 BOM is ignored.
///
/// # Errors
///
/// - [`CsvExportError::NoColumns`] when the text has no header.
/// - [`CsvExportError::RaggedRecord`] when a record has more fields than the header.
/// - [`CsvExportError::Csv`] on malformed CSV.
pub fn parse_csv_table(text: &str) -> Result<CsvTable, CsvExportError> {
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(CsvExportError::NoColumns);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(CsvExportError::RaggedRecord {
                line: record.position().map_or(0, csv::Position::line),
                fields: record.len(),
                expected: headers.len(),
            });
        }
        let mut cells: Vec<String> = record.iter().map(ToOwned::to_owned).collect();
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ProductStatusRow {
        ProductStatusRow {
            sku: Some("SKU-1".to_string()),
            ean: None,
            status: Some("NOT_LIVE".to_string()),
            errors_count: 2,
            errors: "E1: bad; E2: worse".to_string(),
            warnings_count: 0,
            warnings: String::new(),
        }
    }

    #[test]
    fn rows_to_csv_writes_header_and_rows() {
        let csv = rows_to_csv(&[sample_row()]).expect("csv");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("SKU,EAN,Status,Errors count,Errors,Warnings count,Warnings")
        );
        assert_eq!(lines.next(), Some("SKU-1,,NOT_LIVE,2,E1: bad; E2: worse,0,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn rows_to_csv_quotes_commas() {
        let row = ProductStatusRow {
            errors: "E1: a, b".to_string(),
            ..ProductStatusRow::default()
        };
        let csv = rows_to_csv(&[row]).expect("csv");
        assert!(csv.contains("\"E1: a, b\""), "got: {csv}");
    }

    #[test]
    fn rows_to_csv_keeps_header_when_empty() {
        let csv = rows_to_csv(&[]).expect("csv");
        assert_eq!(
            csv,
            "SKU,EAN,Status,Errors count,Errors,Warnings count,Warnings\n"
        );
    }

    #[test]
    fn parse_csv_table_reads_header_and_records() {
        let table = parse_csv_table("sku;status\n").expect("single column");
        assert_eq!(table.headers, vec!["sku;status"]);

        let table = parse_csv_table("sku,status\nA1,LIVE\nA2,NOT_LIVE\n").expect("table");
        assert_eq!(table.headers, vec!["sku", "status"]);
        assert_eq!(
            table.rows,
            vec![vec!["A1", "LIVE"], vec!["A2", "NOT_LIVE"]]
        );
    }

    #[test]
    fn parse_csv_table_pads_short_records() {
        let table = parse_csv_table("a,b,c\n1\n").expect("table");
        assert_eq!(table.rows, vec![vec!["1", "", ""]]);
    }

    #[test]
    fn parse_csv_table_rejects_long_records() {
        let err = parse_csv_table("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            CsvExportError::RaggedRecord {
                fields: 3,
                expected: 2,
                ..
            }
        ));
    }

    #[test]
    fn parse_csv_table_rejects_empty_text() {
        assert!(matches!(parse_csv_table(""), Err(CsvExportError::NoColumns)));
        assert!(matches!(
            parse_csv_table("\u{FEFF}"),
            Err(CsvExportError::NoColumns)
        ));
    }

    #[test]
    fn parse_csv_table_strips_bom() {
        let table = parse_csv_table("\u{FEFF}sku\nA1\n").expect("table");
        assert_eq!(table.headers, vec!["sku"]);
    }
}
