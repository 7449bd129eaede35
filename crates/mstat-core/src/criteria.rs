//! Form input, validation, and the filter criteria for one export request.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::parse_identifiers;

/// Publication status filter accepted by the status export endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    #[default]
    All,
    Live,
    NotLive,
}

impl StatusFilter {
    pub const ALL_VARIANTS: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Live, StatusFilter::NotLive];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "ALL",
            StatusFilter::Live => "LIVE",
            StatusFilter::NotLive => "NOT_LIVE",
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "ALL" => Ok(StatusFilter::All),
            "LIVE" => Ok(StatusFilter::Live),
            "NOT_LIVE" => Ok(StatusFilter::NotLive),
            _ => Err(CriteriaError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("Please provide: {}.", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid {field} date '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid status '{0}': expected ALL, LIVE or NOT_LIVE")]
    InvalidStatus(String),
}

/// Filters for a single status export request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub since: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Unique SKUs in first-seen order.
    pub identifiers: Vec<String>,
    pub shop_id: Option<String>,
}

/// A validated submission: where to send the request and what to ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub channel_url: String,
    pub api_key: String,
    pub criteria: FilterCriteria,
}

/// Raw form fields as typed by the user.
///
/// Every field defaults to empty so partially filled forms still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub sales_channel: String,
    pub shop_id: String,
    pub api_key: String,
    pub status: String,
    pub date_since: String,
    pub date_to: String,
    pub skus_raw: String,
}

impl FormInput {
    /// Form state after the "clear" action: filters go back to their defaults,
    /// identification (channel, shop, key) is kept.
    #[must_use]
    pub fn reset_filters(&self) -> Self {
        Self {
            sales_channel: self.sales_channel.clone(),
            shop_id: self.shop_id.clone(),
            api_key: self.api_key.clone(),
            ..Self::default()
        }
    }

    /// Validates the form and builds the [`Submission`].
    ///
    /// # Errors
    ///
    /// - [`CriteriaError::MissingFields`] when the channel or API key is blank,
    ///   listing every missing field.
    /// - [`CriteriaError::InvalidStatus`] for an unknown status value.
    /// - [`CriteriaError::InvalidDate`] when a non-empty date does not parse.
    pub fn validate(&self) -> Result<Submission, CriteriaError> {
        let mut missing = Vec::new();
        if self.sales_channel.trim().is_empty() {
            missing.push("sales channel");
        }
        if self.api_key.trim().is_empty() {
            missing.push("API key");
        }
        if !missing.is_empty() {
            return Err(CriteriaError::MissingFields(missing));
        }

        let status = self.status.parse::<StatusFilter>()?;
        let since = parse_optional_date("since", &self.date_since)?;
        let to = parse_optional_date("to", &self.date_to)?;
        let shop_id = Some(self.shop_id.trim())
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);

        Ok(Submission {
            channel_url: self.sales_channel.trim().to_string(),
            api_key: self.api_key.trim().to_string(),
            criteria: FilterCriteria {
                status,
                since,
                to,
                identifiers: parse_identifiers(&self.skus_raw),
                shop_id,
            },
        })
    }
}

fn parse_optional_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, CriteriaError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CriteriaError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}
