//! Flattening of Mirakl product status records into display/export rows.
//!
//! Input records are taken as raw JSON so that a missing or oddly typed field
//! never fails a whole export: it simply shows up as an empty cell.

use std::cmp::{Ordering, Reverse};

use serde_json::Value;

/// One product in the results table and the CSV download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductStatusRow {
    pub sku: Option<String>,
    pub ean: Option<String>,
    pub status: Option<String>,
    pub errors_count: usize,
    /// `"code: message"` entries joined with `"; "`.
    pub errors: String,
    pub warnings_count: usize,
    pub warnings: String,
}

impl ProductStatusRow {
    pub const HEADERS: [&'static str; 7] = [
        "SKU",
        "EAN",
        "Status",
        "Errors count",
        "Errors",
        "Warnings count",
        "Warnings",
    ];

    /// Cell values in [`Self::HEADERS`] order, `None` rendered as empty.
    #[must_use]
    pub fn cells(&self) -> [String; 7] {
        [
            self.sku.clone().unwrap_or_default(),
            self.ean.clone().unwrap_or_default(),
            self.status.clone().unwrap_or_default(),
            self.errors_count.to_string(),
            self.errors.clone(),
            self.warnings_count.to_string(),
            self.warnings.clone(),
        ]
    }
}

/// Normalizes a single product status record.
///
/// Never fails: anything missing yields `None`, zero, or an empty string.
#[must_use]
pub fn normalize_row(product: &Value) -> ProductStatusRow {
    let sku = product.get("provider_unique_identifier").and_then(scalar_text);
    let ean = product
        .get("unique_identifiers")
        .and_then(Value::as_array)
        .and_then(|ids| {
            ids.iter()
                .find(|id| id.get("code").and_then(Value::as_str) == Some("EAN"))
        })
        .and_then(|id| id.get("value"))
        .and_then(scalar_text);
    let status = product.get("status").and_then(scalar_text);

    let errors = entries(product, "errors");
    let warnings = entries(product, "warnings");

    ProductStatusRow {
        sku,
        ean,
        status,
        errors_count: errors.len(),
        errors: join_messages(errors),
        warnings_count: warnings.len(),
        warnings: join_messages(warnings),
    }
}

/// Orders rows by errors count (desc), warnings count (desc), then status (asc).
///
/// Rows without a status sort after every row that has one. The sort is stable.
pub fn sort_rows(rows: &mut [ProductStatusRow]) {
    rows.sort_by(|a, b| {
        Reverse(a.errors_count)
            .cmp(&Reverse(b.errors_count))
            .then_with(|| Reverse(a.warnings_count).cmp(&Reverse(b.warnings_count)))
            .then_with(|| match (&a.status, &b.status) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn entries<'a>(product: &'a Value, key: &str) -> &'a [Value] {
    product
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn join_messages(items: &[Value]) -> String {
    items
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Renders `code: message`, dropping the separator when either side is empty.
fn render_message(item: &Value) -> String {
    let (code, message) = match item {
        Value::Object(_) => (
            item.get("code").and_then(scalar_text).unwrap_or_default(),
            item.get("message").and_then(scalar_text).unwrap_or_default(),
        ),
        Value::String(s) => (String::new(), s.clone()),
        Value::Null => (String::new(), String::new()),
        other => (String::new(), other.to_string()),
    };
    format!("{code}: {message}")
        .trim_matches(|c: char| c == ':' || c == ' ')
        .to_string()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
