//! OpenF1 HTTP provider

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::parse_collection;
use crate::config::OpenF1Config;
use crate::provider::{Collection, Provider};
use crate::types::{Driver, IntervalSample, LapSample, OfficialResult, PositionSample, Session};
use crate::{Result, ResultsError};

/// Provider backed by the public OpenF1 API
///
/// One GET per collection, no retries, no pagination. A 404 is treated as an
/// empty collection since OpenF1 answers "No results found" that way.
#[derive(Debug, Clone)]
pub struct OpenF1Provider {
    /// Shared HTTP client
    client: reqwest::Client,

    /// API root without trailing slash
    base_url: String,
}

impl OpenF1Provider {
    /// Create a provider for the default OpenF1 endpoint
    pub fn new() -> Result<Self> {
        Self::with_config(&OpenF1Config::default())
    }

    /// Create a provider from explicit client settings
    pub fn with_config(config: &OpenF1Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ResultsError::config(format!("failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        info!(%base_url, "OpenF1 provider ready");

        Ok(Self { client, base_url })
    }

    /// API root this provider queries
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.endpoint())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: Collection,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.url(collection);
        debug!(%url, ?query, "Fetching {}", collection);

        let response = self.client.get(&url).query(query).send().await.map_err(|e| {
            ResultsError::upstream_unavailable_with_source(
                collection,
                format!("request to {url} failed"),
                Box::new(e),
            )
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "No {} published", collection);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(ResultsError::upstream_unavailable(
                collection,
                format!("{url} answered {status}"),
            ));
        }

        let body = response.text().await.map_err(|e| {
            ResultsError::upstream_unavailable_with_source(
                collection,
                format!("reading body from {url} failed"),
                Box::new(e),
            )
        })?;

        let rows: Vec<T> = parse_collection(collection, &body)?;
        debug!(rows = rows.len(), bytes = body.len(), "Fetched {}", collection);
        Ok(rows)
    }

    async fn fetch_session<T: DeserializeOwned>(
        &self,
        collection: Collection,
        session_key: u32,
    ) -> Result<Vec<T>> {
        self.fetch(collection, &[("session_key", session_key.to_string())]).await
    }
}

#[async_trait::async_trait]
impl Provider for OpenF1Provider {
    async fn sessions(&self, year: i32) -> Result<Vec<Session>> {
        self.fetch(Collection::Sessions, &[("year", year.to_string())]).await
    }

    async fn positions(&self, session_key: u32) -> Result<Vec<PositionSample>> {
        self.fetch_session(Collection::Positions, session_key).await
    }

    async fn drivers(&self, session_key: u32) -> Result<Vec<Driver>> {
        self.fetch_session(Collection::Drivers, session_key).await
    }

    async fn laps(&self, session_key: u32) -> Result<Vec<LapSample>> {
        self.fetch_session(Collection::Laps, session_key).await
    }

    async fn intervals(&self, session_key: u32) -> Result<Vec<IntervalSample>> {
        self.fetch_session(Collection::Intervals, session_key).await
    }

    async fn official_results(&self, session_key: u32) -> Result<Vec<OfficialResult>> {
        self.fetch_session(Collection::OfficialResults, session_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalised() {
        let config = OpenF1Config {
            base_url: " http://localhost:9000/v1/ ".to_string(),
            ..OpenF1Config::default()
        };
        let provider = OpenF1Provider::with_config(&config).unwrap();
        assert_eq!(provider.base_url(), "http://localhost:9000/v1");
        assert_eq!(provider.url(Collection::Positions), "http://localhost:9000/v1/position");
    }

    #[tokio::test]
    async fn unreachable_host_is_upstream_unavailable() {
        let _ = tracing_subscriber::fmt::try_init();

        // Port 9 (discard) on loopback is closed on test machines.
        let config =
            OpenF1Config { base_url: "http://127.0.0.1:9/v1".to_string(), ..OpenF1Config::default() };
        let provider = OpenF1Provider::with_config(&config).unwrap();

        let error = provider.sessions(2025).await.unwrap_err();
        assert!(matches!(
            error,
            ResultsError::UpstreamUnavailable { collection: Collection::Sessions, .. }
        ));
        assert!(error.is_retryable());
    }
}
