use std::path::Path;

use anyhow::Context;
use mstat_client::MiraklClient;
use mstat_core::{
    rows_to_csv, AppConfig, ExportOutcome, FormInput, ProductStatusRow, SalesChannel,
};

use crate::CheckArgs;

/// Runs one status check and prints the outcome.
///
/// Error outcomes (validation, network, HTTP, unreadable body) are returned
/// as errors so the process exits non-zero.
pub(crate) async fn run(
    config: &AppConfig,
    channels: &[SalesChannel],
    args: &CheckArgs,
) -> anyhow::Result<()> {
    let form = form_from_args(channels, args)?;
    let submission = form.validate()?;

    let client = MiraklClient::new(config.request_timeout_secs, &config.user_agent)?;
    let outcome = client.check(&submission).await.inspect_err(|e| {
        tracing::error!(channel = %submission.channel_url, error = %e, "status check failed");
    })?;

    match outcome {
        ExportOutcome::Products(rows) if rows.is_empty() => {
            println!("No results for these filters.");
        }
        ExportOutcome::Products(rows) => {
            println!("{} product(s) found", rows.len());
            let headers = ProductStatusRow::HEADERS.map(str::to_string);
            let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells().to_vec()).collect();
            print!("{}", format_table(&headers, &cells));
            if let Some(path) = &args.output {
                write_output(path, &rows_to_csv(&rows)?)?;
            }
        }
        ExportOutcome::Csv { table, raw } => {
            eprintln!("Response interpreted as CSV (not JSON).");
            print!("{}", format_table(&table.headers, &table.rows));
            if let Some(path) = &args.output {
                write_output(path, &raw)?;
            }
        }
        ExportOutcome::Unexpected(json) => {
            tracing::warn!(channel = %submission.channel_url, "unexpected JSON shape in status export");
            eprintln!("Unexpected JSON format. Raw content below.");
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        ExportOutcome::Unreadable(text) => {
            tracing::warn!(
                channel = %submission.channel_url,
                preview_chars = text.chars().count(),
                "status export body is neither JSON nor CSV"
            );
            anyhow::bail!("Response is neither JSON nor readable CSV.\n\n{text}");
        }
    }

    Ok(())
}

/// Maps CLI flags onto the same form the web UI submits.
pub(crate) fn form_from_args(
    channels: &[SalesChannel],
    args: &CheckArgs,
) -> anyhow::Result<FormInput> {
    let sales_channel = match args.channel.as_deref() {
        Some(wanted) => resolve_channel(channels, wanted)
            .with_context(|| format!("unknown sales channel '{wanted}'"))?,
        None => channels
            .first()
            .map(|c| c.url.clone())
            .unwrap_or_default(),
    };

    Ok(FormInput {
        sales_channel,
        shop_id: args.shop_id.clone().unwrap_or_default(),
        api_key: args.api_key.clone().unwrap_or_default(),
        status: args.status.clone(),
        date_since: args.since.clone().unwrap_or_default(),
        date_to: args.to.clone().unwrap_or_default(),
        skus_raw: args.skus.clone().unwrap_or_default(),
    })
}

/// Finds a channel by exact URL (trailing slash ignored) or case-insensitive label.
fn resolve_channel(channels: &[SalesChannel], wanted: &str) -> Option<String> {
    let wanted = wanted.trim();
    channels
        .iter()
        .find(|c| {
            c.url.trim_end_matches('/') == wanted.trim_end_matches('/')
                || c.label.eq_ignore_ascii_case(wanted)
        })
        .map(|c| c.url.clone())
}

pub(crate) fn write_output(path: &Path, csv: &str) -> anyhow::Result<()> {
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = csv.len(), "CSV export written");
    eprintln!("CSV written to {}", path.display());
    Ok(())
}

/// Formats a plain-text table with left-aligned, space-padded columns.
pub(crate) fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(&rule));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}
