//! HTTP transport used by remote note sources.

use async_trait::async_trait;
use thiserror::Error;

/// Errors while fetching a document over the network.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Fetches text documents by URL.
///
/// Remote sources talk to the network only through this trait so tests can
/// substitute an in-memory implementation.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns the response body as text.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// `Fetch` implementation backed by a shared `reqwest::Client`.
///
/// Non-success statuses are reported as errors; timeouts are left to the
/// client configuration.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client, e.g. one built with custom timeouts.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "fetching");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}
