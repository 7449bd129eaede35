use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A Mirakl marketplace instance the seller can query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesChannel {
    /// Base URL of the channel, e.g. `"https://marketplace.worten.pt"`.
    pub url: String,
    pub label: String,
}

impl SalesChannel {
    fn new(url: &str, label: &str) -> Self {
        Self {
            url: url.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChannelsFile {
    pub channels: Vec<SalesChannel>,
}

/// The default channel catalog. The first entry is the default selection.
#[must_use]
pub fn builtin_channels() -> Vec<SalesChannel> {
    vec![
        SalesChannel::new("https://alltricks-prod.mirakl.net", "Alltricks"),
        SalesChannel::new("https://maxedanl-prod.mirakl.net", "Maxeda BE & NL"),
        SalesChannel::new("https://marketplace.bricodepot.es", "Brico Dépôt ES & PT"),
        SalesChannel::new("https://marketplace.castorama.fr", "Castorama"),
        SalesChannel::new("https://marketplace.empik.com", "Empik"),
        SalesChannel::new("https://marketplace.kingfisher.com", "Kingfisher"),
        SalesChannel::new(
            "https://mirakl-web.groupe-rueducommerce.fr",
            "Rue du Commerce",
        ),
        SalesChannel::new("https://marketplace.worten.pt", "Worten"),
    ]
}

/// Load and validate a channel catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_channels(path: &Path) -> Result<Vec<SalesChannel>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ChannelsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_channels(&content)
}

fn parse_channels(content: &str) -> Result<Vec<SalesChannel>, ConfigError> {
    let file: ChannelsFile = serde_yaml::from_str(content)?;
    validate_channels(&file.channels)?;
    Ok(file.channels)
}

fn validate_channels(channels: &[SalesChannel]) -> Result<(), ConfigError> {
    if channels.is_empty() {
        return Err(ConfigError::Validation(
            "at least one channel is required".to_string(),
        ));
    }

    let mut seen_urls = HashSet::new();
    for channel in channels {
        if channel.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "channel '{}' has an empty label",
                channel.url
            )));
        }

        let url = channel.url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "channel '{}' must have an http(s) URL, got '{}'",
                channel.label, channel.url
            )));
        }

        if !seen_urls.insert(url.trim_end_matches('/').to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate channel URL: '{}'",
                channel.url
            )));
        }
    }

    Ok(())
}
