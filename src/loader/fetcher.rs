//! HTTP source for the live report
//!
//! The endpoint serves the latest report as one JSON object. There is no
//! retry loop here: a failed fetch falls back to archive-only mode and the
//! next run simply tries again.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client, Url,
};
use std::time::Duration;

use super::LiveSource;
use crate::models::Report;
use crate::utils::error::FetchError;

const AGENT: &str = concat!("stratum/", env!("CARGO_PKG_VERSION"));

/// Fetches the live report over HTTP
pub struct HttpLiveSource {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Report endpoint
    url: Url,
}

impl HttpLiveSource {
    /// Create a source for a report endpoint
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for an unparsable or non-HTTP URL and
    /// `FetchError::Http` if the HTTP client cannot be created.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .default_headers(Self::build_headers())
            .build()?;

        Ok(Self { client, url })
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl LiveSource for HttpLiveSource {
    fn name(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_latest(&self) -> Result<Report, FetchError> {
        let response = self.client.get(self.url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e)
            }
        })?;

        let report: Report =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::debug!(url = %self.url, date = %report.date, "Fetched live report");
        Ok(report)
    }
}
