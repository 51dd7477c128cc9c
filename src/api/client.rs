//! HTTP client for the extraction backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::models::{
    AutopilotRequest, AutopilotResponse, ExtractionResult, SummaryResponse,
};
use crate::core::config::Config;
use crate::error::{Result, ScoutError};

/// How much of an error body to keep in the message
const ERROR_BODY_SNIPPET: usize = 200;

/// The three operations the backend exposes
///
/// The UI talks only to this trait so it can be exercised against a mock
/// without a live server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch a page and return its extracted content
    async fn fetch_extract(&self, url: &str) -> Result<ExtractionResult>;

    /// Fetch and summarize a page in a single server-side operation
    async fn autopilot(&self, url: &str) -> Result<AutopilotResponse>;

    /// Summarize free text (sent as a raw body, no JSON envelope)
    async fn summarize(&self, text: &str) -> Result<SummaryResponse>;
}

/// reqwest-based implementation of [`Backend`]
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client for the configured server
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.server_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ScoutError::from)
    }

    /// Check the status, then parse the body as JSON.
    ///
    /// Status and parse failures are kept distinct: a non-2xx response maps
    /// to [`ScoutError::HttpStatus`] with a body snippet, a 2xx response
    /// with an unexpected body maps to [`ScoutError::Parse`].
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.chars().count() > ERROR_BODY_SNIPPET {
                let snippet: String = body.chars().take(ERROR_BODY_SNIPPET).collect();
                format!("{snippet}…")
            } else {
                body
            };
            return Err(ScoutError::HttpStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_extract(&self, url: &str) -> Result<ExtractionResult> {
        let endpoint = self.endpoint("/api/fetch")?;
        tracing::debug!(%endpoint, page = url, "fetching extraction");

        // reqwest percent-encodes the query parameter
        let response = self
            .client
            .get(endpoint)
            .query(&[("url", url)])
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn autopilot(&self, url: &str) -> Result<AutopilotResponse> {
        let endpoint = self.endpoint("/api/autopilot")?;
        tracing::debug!(%endpoint, page = url, "running autopilot");

        let response = self
            .client
            .post(endpoint)
            .json(&AutopilotRequest {
                url: url.to_string(),
            })
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn summarize(&self, text: &str) -> Result<SummaryResponse> {
        let endpoint = self.endpoint("/api/summarize")?;
        tracing::debug!(%endpoint, chars = text.len(), "summarizing text");

        // Raw text body, no content-type header - the wire contract
        let response = self
            .client
            .post(endpoint)
            .body(text.to_string())
            .send()
            .await?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_for(server_url: &str) -> Result<HttpBackend> {
        let config = Config {
            server_url: server_url.to_string(),
            ..Config::default()
        };
        HttpBackend::new(&config)
    }

    #[test]
    fn endpoints_join_against_base_url() {
        let backend = backend_for("http://127.0.0.1:8787").unwrap();
        assert_eq!(
            backend.endpoint("/api/fetch").unwrap().as_str(),
            "http://127.0.0.1:8787/api/fetch"
        );
        assert_eq!(
            backend.endpoint("/api/summarize").unwrap().as_str(),
            "http://127.0.0.1:8787/api/summarize"
        );
    }

    #[test]
    fn invalid_server_url_is_a_config_error() {
        let err = backend_for("not a url").unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
    }
}
