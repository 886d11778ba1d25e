//! HTTP client for a running CASPER Studio backend, with a bundled fallback.

use crate::core::{Mode, ParseResult, RawResultDocument};
use crate::error::{Error, Result};
use crate::parsing::result_parser::aggregate;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where a fetched result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// The backend's `/api/results` endpoint
    Remote,
    /// The fixture bundled for the requested mode
    Fixture,
}

#[derive(Debug, Clone)]
pub struct FetchedResult {
    pub source: ResultSource,
    pub result: ParseResult,
}

/// Raw JSON of the fixture bundled for `mode`.
pub fn fixture_json(mode: Mode) -> &'static str {
    match mode {
        Mode::Naive => include_str!("../../fixtures/naive.json"),
        Mode::Consistent => include_str!("../../fixtures/consistent.json"),
        Mode::Preferred => include_str!("../../fixtures/preferred.json"),
        Mode::Cautious => include_str!("../../fixtures/cautious.json"),
    }
}

pub fn load_fixture(mode: Mode) -> Result<RawResultDocument> {
    Ok(RawResultDocument::from_json(fixture_json(mode))?)
}

/// Fetches result documents from a backend.
pub struct ResultFetcher {
    base_url: String,
    client: Client,
}

impl ResultFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self { base_url: base_url.into(), client })
    }

    fn results_endpoint(&self) -> String {
        format!("{}/api/results", self.base_url.trim_end_matches('/'))
    }

    /// Fetch the latest raw document of `app`/`mode` from the backend.
    pub async fn fetch_remote(&self, mode: Mode, app: &str) -> Result<RawResultDocument> {
        let response = self
            .client
            .get(self.results_endpoint())
            .query(&[("mode", mode.as_str()), ("app", app)])
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Fetch(format!(
                "Failed to fetch CASPER results with status {}: {}",
                status, error_body
            )));
        }

        response.json::<RawResultDocument>().await.map_err(|e| Error::Fetch(e.to_string()))
    }

    /// Fetch and aggregate results for `app`/`mode`.
    ///
    /// Exactly one request is made. If it fails for any reason the bundled fixture
    /// for `mode` is used instead; that failure is logged, not returned.
    pub async fn fetch(&self, mode: Mode, app: &str) -> Result<FetchedResult> {
        match self.fetch_remote(mode, app).await {
            Ok(doc) => {
                debug!(%mode, app, "Fetched CASPER results from backend");
                Ok(FetchedResult { source: ResultSource::Remote, result: aggregate(mode, &doc) })
            }
            Err(err) => {
                warn!(%mode, error = %err, "Falling back to bundled data for mode");
                let doc = load_fixture(mode)?;
                Ok(FetchedResult { source: ResultSource::Fixture, result: aggregate(mode, &doc) })
            }
        }
    }
}
