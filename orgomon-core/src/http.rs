//! HTTP client abstraction used by the remote desktop integration.
//!
//! Platform code talks to [`HttpClient`] instead of `reqwest` directly so
//! that tests can hand it canned responses without touching the network.
//!
//! # Example Usage:
//! ``
//! use orgomon_core::http::{HttpClient, DefaultHttpClient};
//!
//! let client: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
//! let body = client.get(url, headers).await?;
//! ``

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest;

use crate::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A generic trait for making HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Performs a GET and returns the body. Non-2xx statuses are errors.
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for DefaultHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<String, Error> {
        let mut request = self.client.get(&url);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => Error::Auth(format!("HTTP {} (check API key)", status.as_u16())),
                404 => Error::NotFound(format!("HTTP 404 for {url}")),
                code => Error::Remote(format!("HTTP {code}")),
            });
        }
        Ok(response.text().await?)
    }
}
