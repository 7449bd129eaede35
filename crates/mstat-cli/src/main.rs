mod check;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mstat-cli")]
#[command(about = "Check Mirakl product publication status from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the configured sales channels
    Channels,
    /// Query the status export endpoint and print the results
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    /// Channel base URL or label; defaults to the first configured channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Seller API key, sent as the raw Authorization header
    #[arg(long, env = "MIRAKL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub shop_id: Option<String>,

    /// ALL, LIVE or NOT_LIVE
    #[arg(long, default_value = "ALL")]
    pub status: String,

    /// Only products updated on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,

    /// Only products updated on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// SKUs separated by commas, semicolons, spaces or newlines
    #[arg(long)]
    pub skus: Option<String>,

    /// Write the CSV export to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mstat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let channels = match &config.channels_path {
        Some(path) => mstat_core::load_channels(path)?,
        None => mstat_core::builtin_channels(),
    };

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Channels) => {
            for channel in &channels {
                println!("{}\t{}", channel.label, channel.url);
            }
        }
        Some(Commands::Check(args)) => check::run(&config, &channels, &args).await?,
        None => println!("mstat-cli: use `channels` or `check` (see --help)"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
