//! Server-side HTML for the single status-check page.
//!
//! Everything user- or API-provided goes through [`escape_html`]. Downloads
//! are inlined as `data:` URIs so the server keeps no state between requests.

use std::fmt::Write as _;

use base64::{engine::general_purpose, Engine as _};
use mstat_core::{rows_to_csv, ExportOutcome, FormInput, ProductStatusRow, SalesChannel, StatusFilter};

pub const RESULTS_FILE_NAME: &str = "mirakl_product_status_results.csv";
pub const RAW_CSV_FILE_NAME: &str = "mirakl_products_export.csv";

/// What to show under the form after a submission.
#[derive(Debug)]
pub enum Results {
    Error(String),
    Outcome(ExportOutcome),
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#1f2933}\
fieldset{border:1px solid #d2d6dc;border-radius:8px;padding:1rem 1.5rem;margin-bottom:1.5rem}\
.row{display:flex;gap:1.5rem;flex-wrap:wrap}.row>div{flex:1;min-width:14rem}\
label{display:block;font-size:.85rem;color:#52606d;margin:.4rem 0 .2rem}\
input,select,textarea{width:100%;box-sizing:border-box;padding:.35rem}\
.radios label{display:inline;margin-right:1rem}.radios input{width:auto}\
.actions{text-align:right}.actions button{padding:.4rem 1.6rem;margin-left:.5rem}\
table{border-collapse:collapse;width:100%;font-size:.9rem}\
th,td{border:1px solid #e4e7eb;padding:.3rem .5rem;text-align:left;vertical-align:top}\
th{background:#f5f7fa}.msg{padding:.6rem 1rem;border-radius:6px;white-space:pre-wrap}\
.error{background:#fde8e8}.info{background:#e6f0ff}.warning{background:#fff4d6}\
.caption{color:#52606d;font-size:.85rem}";

/// Renders the full page: the form pre-filled from `form`, then `results`.
pub fn page(channels: &[SalesChannel], form: &FormInput, results: Option<&Results>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Mirakl Product Status Checker</title>");
    let _ = write!(html, "<style>{STYLE}</style></head><body>");
    html.push_str("<h1>MIRAKL PRODUCT STATUS CHECKER</h1>");

    render_form(&mut html, channels, form);

    if let Some(results) = results {
        html.push_str("<fieldset><legend>Results</legend>");
        render_results(&mut html, results);
        html.push_str("</fieldset>");
    }

    html.push_str("</body></html>");
    html
}

fn render_form(html: &mut String, channels: &[SalesChannel], form: &FormInput) {
    let selected = channels
        .iter()
        .find(|c| c.url == form.sales_channel.trim())
        .or_else(|| channels.first())
        .map(|c| c.url.as_str());
    let status = form.status.parse::<StatusFilter>().unwrap_or_default();

    html.push_str("<form method=\"post\" action=\"/check\"><fieldset><legend>Identification</legend><div class=\"row\">");

    html.push_str("<div><label for=\"sales_channel\">Sales channel</label><select id=\"sales_channel\" name=\"sales_channel\">");
    for channel in channels {
        let sel = if Some(channel.url.as_str()) == selected {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<option value=\"{}\"{sel}>{}</option>",
            escape_html(&channel.url),
            escape_html(&channel.label)
        );
    }
    html.push_str("</select></div>");

    let _ = write!(
        html,
        "<div><label for=\"shop_id\">Seller shop ID</label>\
         <input id=\"shop_id\" name=\"shop_id\" value=\"{}\" placeholder=\"e.g. 12345\"></div>",
        escape_html(&form.shop_id)
    );
    let _ = write!(
        html,
        "<div><label for=\"api_key\">Seller API key</label>\
         <input id=\"api_key\" name=\"api_key\" type=\"password\" value=\"{}\" \
         placeholder=\"********-****-****-****-********\" autocomplete=\"off\"></div>",
        escape_html(&form.api_key)
    );
    html.push_str("</div></fieldset><fieldset><legend>Filters</legend><div class=\"row\">");

    html.push_str("<div class=\"radios\"><label>Status</label>");
    for option in StatusFilter::ALL_VARIANTS {
        let checked = if option == status { " checked" } else { "" };
        let _ = write!(
            html,
            "<label><input type=\"radio\" name=\"status\" value=\"{0}\"{checked}> {0}</label>",
            option.as_str()
        );
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        "<div><label>Update period (optional)</label>\
         <label for=\"date_since\">Since</label><input id=\"date_since\" name=\"date_since\" type=\"date\" value=\"{}\">\
         <label for=\"date_to\">Before</label><input id=\"date_to\" name=\"date_to\" type=\"date\" value=\"{}\"></div>",
        escape_html(&form.date_since),
        escape_html(&form.date_to)
    );
    let _ = write!(
        html,
        "<div><label for=\"skus_raw\">SKUs (optional)</label>\
         <textarea id=\"skus_raw\" name=\"skus_raw\" rows=\"5\" \
         placeholder=\"One per line or separated by , ; or space\">{}</textarea></div>",
        escape_html(&form.skus_raw)
    );

    html.push_str(
        "</div><div class=\"actions\">\
         <button type=\"submit\" formaction=\"/check\">Check</button>\
         <button type=\"submit\" formaction=\"/reset\">Clear</button>\
         </div></fieldset></form>",
    );
}

fn render_results(html: &mut String, results: &Results) {
    match results {
        Results::Error(message) => message_box(html, "error", message),
        Results::Outcome(ExportOutcome::Products(rows)) if rows.is_empty() => {
            message_box(html, "info", "No results for these filters.");
        }
        Results::Outcome(ExportOutcome::Products(rows)) => render_products(html, rows),
        Results::Outcome(ExportOutcome::Csv { table, raw }) => {
            message_box(html, "info", "Response interpreted as CSV (not JSON).");
            render_table(html, &table.headers, &table.rows);
            download_link(html, raw, RAW_CSV_FILE_NAME, "Download CSV");
        }
        Results::Outcome(ExportOutcome::Unexpected(json)) => {
            message_box(html, "warning", "Unexpected JSON format. Raw content below.");
            let pretty = serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string());
            let _ = write!(html, "<pre>{}</pre>", escape_html(&pretty));
        }
        Results::Outcome(ExportOutcome::Unreadable(text)) => {
            message_box(html, "error", "Response is neither JSON nor readable CSV.");
            let _ = write!(html, "<pre>{}</pre>", escape_html(text));
        }
    }
}

fn render_products(html: &mut String, rows: &[ProductStatusRow]) {
    let _ = write!(
        html,
        "<p class=\"caption\">{} product(s) found</p>",
        rows.len()
    );
    let headers: Vec<String> = ProductStatusRow::HEADERS
        .iter()
        .map(|h| (*h).to_string())
        .collect();
    let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells().to_vec()).collect();
    render_table(html, &headers, &cells);

    match rows_to_csv(rows) {
        Ok(csv) => download_link(html, &csv, RESULTS_FILE_NAME, "Download results as CSV"),
        Err(e) => {
            tracing::error!(error = %e, "failed to build CSV export");
            message_box(html, "error", "CSV export failed.");
        }
    }
}

fn render_table(html: &mut String, headers: &[String], rows: &[Vec<String>]) {
    html.push_str("<table><thead><tr>");
    for header in headers {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
}

fn message_box(html: &mut String, class: &str, message: &str) {
    let _ = write!(
        html,
        "<div class=\"msg {class}\">{}</div>",
        escape_html(message)
    );
}

fn download_link(html: &mut String, csv: &str, file_name: &str, label: &str) {
    let _ = write!(
        html,
        "<p><a href=\"{}\" download=\"{file_name}\">{label}</a></p>",
        csv_data_uri(csv)
    );
}

/// Inlines CSV text as a base64 `data:` URI (4/3 of the CSV size, and
/// nothing in it needs HTML escaping inside an attribute).
pub fn csv_data_uri(csv: &str) -> String {
    format!(
        "data:text/csv;charset=utf-8;base64,{}",
        general_purpose::STANDARD.encode(csv.as_bytes())
    )
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
