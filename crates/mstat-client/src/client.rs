//! HTTP client for the Mirakl product status export endpoint.
//!
//! Issues exactly one GET per check. There is no retry, paging, or caching:
//! every failure is returned to the caller as a [`ClientError`].

use std::time::{Duration, Instant};

use mstat_core::{build_params, interpret_body, truncate_chars, ExportOutcome, Submission};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};

use crate::error::ClientError;

/// Path of the status export endpoint, relative to the channel base URL.
pub const EXPORT_PATH: &str = "/api/mcm/products/sources/status/export";

/// Characters of a non-2xx body kept in [`ClientError::Api`].
const ERROR_BODY_CHARS: usize = 1000;

/// Client for the Mirakl status export endpoint.
///
/// Holds one `reqwest::Client` with the configured timeout; safe to share
/// between requests.
pub struct MiraklClient {
    client: Client,
}

impl MiraklClient {
    /// Creates a client with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Runs one status check: builds the parameters, fetches the export and
    /// interprets the body.
    ///
    /// # Errors
    ///
    /// See [`MiraklClient::fetch_status_export`].
    pub async fn check(&self, submission: &Submission) -> Result<ExportOutcome, ClientError> {
        let params = build_params(&submission.criteria);
        let body = self
            .fetch_status_export(&submission.channel_url, &submission.api_key, &params)
            .await?;
        Ok(interpret_body(&body))
    }

    /// Sends the export GET and returns the raw body of a 2xx response.
    ///
    /// The API key is sent verbatim as the `Authorization` header value.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidChannelUrl`] if `channel_base` is not a URL.
    /// - [`ClientError::InvalidApiKey`] if the key is not a valid header value.
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::Api`] on any non-2xx status, with the body truncated.
    pub async fn fetch_status_export(
        &self,
        channel_base: &str,
        api_key: &str,
        params: &[(&str, String)],
    ) -> Result<String, ClientError> {
        let url = build_url(channel_base, params)?;
        let mut auth = HeaderValue::from_str(api_key).map_err(|_| ClientError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .inspect_err(|e| {
                tracing::warn!(channel = %channel_base, error = %e, "status export request failed");
            })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::info!(
            channel = %channel_base,
            params = params.len(),
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "status export response received"
        );

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .map_or_else(|| status.as_str().to_string(), str::to_string),
                body: truncate_chars(&body, ERROR_BODY_CHARS),
            });
        }

        Ok(body)
    }
}

/// Builds the export URL with percent-encoded, repeated query parameters.
///
/// Trailing slashes on the channel base are dropped before appending
/// [`EXPORT_PATH`].
fn build_url(channel_base: &str, params: &[(&str, String)]) -> Result<Url, ClientError> {
    let base = channel_base.trim().trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}{EXPORT_PATH}")).map_err(|e| {
        ClientError::InvalidChannelUrl {
            url: channel_base.to_owned(),
            reason: e.to_string(),
        }
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidChannelUrl {
            url: channel_base.to_owned(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }

    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
