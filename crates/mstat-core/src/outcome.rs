use serde_json::Value;

use crate::export::{parse_csv_table, CsvTable};
use crate::normalize::{normalize_row, sort_rows, ProductStatusRow};

/// Characters of an unreadable body kept for display.
pub const UNREADABLE_PREVIEW_CHARS: usize = 1500;

/// What a successful (2xx) export response turned out to contain.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// A JSON product list, normalized and sorted. May be empty.
    Products(Vec<ProductStatusRow>),
    /// Not JSON, but readable as CSV. `raw` is the original body for download.
    Csv { table: CsvTable, raw: String },
    /// Valid JSON that is neither `{"data": [...]}` nor a list.
    Unexpected(Value),
    /// Neither JSON nor CSV; the body truncated for display.
    Unreadable(String),
}

/// Interprets a 2xx response body.
///
/// JSON is tried first; `{"data": [...]}` and bare lists become
/// [`ExportOutcome::Products`]. Anything that is not JSON falls back to CSV.
#[must_use]
pub fn interpret_body(body: &str) -> ExportOutcome {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => interpret_json(json),
        Err(_) => match parse_csv_table(body) {
            Ok(table) => ExportOutcome::Csv {
                table,
                raw: body.to_string(),
            },
            Err(e) => {
                tracing::debug!(error = %e, "export body is neither JSON nor CSV");
                ExportOutcome::Unreadable(truncate_chars(body, UNREADABLE_PREVIEW_CHARS))
            }
        },
    }
}

fn interpret_json(json: Value) -> ExportOutcome {
    let items = match json {
        Value::Array(items) => items,
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_array) => {
            match map.remove("data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        other => return ExportOutcome::Unexpected(other),
    };

    let mut rows: Vec<ProductStatusRow> = items.iter().map(normalize_row).collect();
    sort_rows(&mut rows);
    ExportOutcome::Products(rows)
}

/// Returns at most the first `max` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn products(outcome: ExportOutcome) -> Vec<ProductStatusRow> {
        match outcome {
            ExportOutcome::Products(rows) => rows,
            other => panic!("expected Products, got {other:?}"),
        }
    }

    #[test]
    fn data_envelope_is_normalized_and_sorted() {
        let body = json!({
            "data": [
                { "provider_unique_identifier": "ok", "status": "LIVE" },
                { "provider_unique_identifier": "bad", "status": "NOT_LIVE",
                  "errors": [{ "code": "E1", "message": "broken" }] }
            ]
        })
        .to_string();
        let rows = products(interpret_body(&body));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku.as_deref(), Some("bad"));
        assert_eq!(rows[1].sku.as_deref(), Some("ok"));
    }

    #[test]
    fn bare_list_is_accepted() {
        let rows = products(interpret_body(r#"[{"provider_unique_identifier":"A1"}]"#));
        assert_eq!(rows[0].sku.as_deref(), Some("A1"));
    }

    #[test]
    fn empty_list_yields_no_rows() {
        assert!(products(interpret_body(r#"{"data": []}"#)).is_empty());
    }

    #[test]
    fn data_that_is_not_a_list_is_unexpected() {
        let outcome = interpret_body(r#"{"data": {"x": 1}}"#);
        assert_eq!(outcome, ExportOutcome::Unexpected(json!({"data": {"x": 1}})));
    }

    #[test]
    fn scalar_json_is_unexpected() {
        assert_eq!(interpret_body("42"), ExportOutcome::Unexpected(json!(42)));
    }

    #[test]
    fn csv_body_falls_back_to_table() {
        let body = "provider_unique_identifier;status\nA1;LIVE\n";
        match interpret_body(body) {
            ExportOutcome::Csv { table, raw } => {
                assert_eq!(table.headers.len(), 1);
                assert_eq!(table.rows.len(), 1);
                assert_eq!(raw, body);
            }
            other => panic!("expected Csv, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_body_is_truncated() {
        let body = format!("a,b\n{}", "x,".repeat(2000));
        match interpret_body(&body) {
            ExportOutcome::Unreadable(text) => {
                assert_eq!(text.chars().count(), UNREADABLE_PREVIEW_CHARS);
            }
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_is_unreadable() {
        assert_eq!(interpret_body(""), ExportOutcome::Unreadable(String::new()));
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
