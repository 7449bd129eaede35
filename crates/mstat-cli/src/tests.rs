use clap::Parser;
use mstat_core::builtin_channels;

use super::*;
use crate::check::{form_from_args, format_table, write_output};

fn check_args(argv: &[&str]) -> CheckArgs {
    let cli = Cli::try_parse_from(argv).expect("expected valid cli args");
    match cli.command {
        Some(Commands::Check(args)) => args,
        other => panic!("expected check command, got {other:?}"),
    }
}

#[test]
fn parses_channels_command() {
    let cli = Cli::try_parse_from(["mstat-cli", "channels"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Channels)));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mstat-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn check_defaults_status_to_all() {
    let args = check_args(&["mstat-cli", "check", "--api-key", "k"]);
    assert_eq!(args.status, "ALL");
    assert!(args.output.is_none());
}

#[test]
fn check_parses_all_filters() {
    let args = check_args(&[
        "mstat-cli",
        "check",
        "--channel",
        "Worten",
        "--api-key",
        "k",
        "--shop-id",
        "2001",
        "--status",
        "NOT_LIVE",
        "--since",
        "2025-01-01",
        "--to",
        "2025-01-31",
        "--skus",
        "A1,A2",
        "-o",
        "out.csv",
    ]);
    assert_eq!(args.channel.as_deref(), Some("Worten"));
    assert_eq!(args.status, "NOT_LIVE");
    assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.csv")));
}

#[test]
fn form_resolves_channel_label_case_insensitively() {
    let args = check_args(&["mstat-cli", "check", "--channel", "worten", "--api-key", "k"]);
    let form = form_from_args(&builtin_channels(), &args).expect("form");
    assert_eq!(form.sales_channel, "https://marketplace.worten.pt");
}

#[test]
fn form_resolves_channel_url_with_trailing_slash() {
    let args = check_args(&[
        "mstat-cli",
        "check",
        "--channel",
        "https://marketplace.empik.com/",
        "--api-key",
        "k",
    ]);
    let form = form_from_args(&builtin_channels(), &args).expect("form");
    assert_eq!(form.sales_channel, "https://marketplace.empik.com");
}

#[test]
fn form_defaults_to_first_channel() {
    let args = check_args(&["mstat-cli", "check", "--api-key", "k"]);
    let form = form_from_args(&builtin_channels(), &args).expect("form");
    assert_eq!(form.sales_channel, "https://alltricks-prod.mirakl.net");
}

#[test]
fn unknown_channel_is_an_error() {
    let args = check_args(&["mstat-cli", "check", "--channel", "Nowhere", "--api-key", "k"]);
    let err = form_from_args(&builtin_channels(), &args).unwrap_err();
    assert!(err.to_string().contains("unknown sales channel 'Nowhere'"));
}

#[test]
fn form_without_api_key_fails_validation() {
    let args = Cli::try_parse_from(["mstat-cli", "check", "--api-key", ""])
        .map(|cli| match cli.command {
            Some(Commands::Check(args)) => args,
            _ => unreachable!(),
        })
        .expect("expected valid cli args");
    let form = form_from_args(&builtin_channels(), &args).expect("form");
    assert!(form.validate().is_err());
}

#[test]
fn format_table_pads_columns() {
    let headers = vec!["SKU".to_string(), "Status".to_string()];
    let rows = vec![
        vec!["LONG-SKU-1".to_string(), "LIVE".to_string()],
        vec!["A".to_string(), String::new()],
    ];
    let table = format_table(&headers, &rows);
    assert_eq!(
        table,
        "SKU         Status\n\
         ----------  ------\n\
         LONG-SKU-1  LIVE\n\
         A\n"
    );
}

#[test]
fn write_output_writes_csv_file() {
    let path = std::env::temp_dir().join(format!("mstat-cli-export-{}.csv", std::process::id()));
    write_output(&path, "SKU,Status\nA1,LIVE\n").expect("write csv");
    let written = std::fs::read_to_string(&path).expect("read back");
    std::fs::remove_file(&path).ok();
    assert_eq!(written, "SKU,Status\nA1,LIVE\n");
}

#[test]
fn write_output_reports_unwritable_path() {
    let path = std::env::temp_dir()
        .join("mstat-cli-missing-dir")
        .join("nested")
        .join("out.csv");
    let err = write_output(&path, "x").unwrap_err();
    assert!(err.to_string().starts_with("failed to write"));
}
