use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to content source failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Content source answered {status} for {url}")]
    Status { url: Url, status: StatusCode },
    #[error("Response from {url} is not valid JSON: {source}")]
    Decode { url: Url, source: reqwest::Error },
}

/// Retrieves a JSON document from the content source.
///
/// Retry, caching and timeouts belong to the implementation; the resolution
/// pipeline calls `fetch` once per page and propagates any error.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Value, FetchError>;
}

/// [`ContentFetcher`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Value, FetchError> {
        log::debug!("GET {url}");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        response.json().await.map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })
    }
}
