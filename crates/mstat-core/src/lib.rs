pub mod app_config;
pub mod channels;
pub mod config;
pub mod criteria;
pub mod export;
pub mod identifiers;
pub mod normalize;
pub mod outcome;
pub mod params;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use channels::{builtin_channels, load_channels, SalesChannel};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{CriteriaError, FilterCriteria, FormInput, StatusFilter, Submission};
pub use export::{parse_csv_table, rows_to_csv, CsvExportError, CsvTable};
pub use identifiers::parse_identifiers;
pub use normalize::{normalize_row, sort_rows, ProductStatusRow};
pub use outcome::{interpret_body, truncate_chars, ExportOutcome};
pub use params::build_params;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read channels file {path}: {source}")]
    ChannelsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse channels file: {0}")]
    ChannelsFileParse(#[from] serde_yaml::Error),

    #[error("channel validation failed: {0}")]
    Validation(String),
}
