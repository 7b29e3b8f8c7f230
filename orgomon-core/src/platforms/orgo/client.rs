// File: src/platforms/orgo/client.rs

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;
use crate::Error;

/// Thin wrapper over the Orgo REST API for a single API key.
#[derive(Clone)]
pub struct OrgoClient {
    http: Arc<dyn HttpClient>,
    api_base: Url,
    api_key: String,
}

/// JSON shape for `GET /computers/{id}`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OrgoComputerJson {
    pub id: String,
    pub status: Option<String>,
}

/// JSON shape for `GET /computers/{id}/screenshot`.
#[derive(Debug, Deserialize)]
struct OrgoScreenshotJson {
    #[serde(alias = "screenshot")]
    image: String,
}

impl OrgoClient {
    pub fn new(http: Arc<dyn HttpClient>, api_base: &str, api_key: impl Into<String>) -> Result<Self, Error> {
        // Url::join drops the last path segment unless the base ends in '/'.
        let mut base = api_base.trim_end_matches('/').to_string();
        base.push('/');
        Ok(Self {
            http,
            api_base: Url::parse(&base)?,
            api_key: api_key.into(),
        })
    }

    fn auth_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.api_key));
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    fn endpoint(&self, path: &str) -> Result<String, Error> {
        Ok(self.api_base.join(path)?.to_string())
    }

    /// Looks the computer up; fails when the key is rejected or the id is unknown.
    pub async fn get_computer(&self, computer_id: &str) -> Result<OrgoComputerJson, Error> {
        let url = self.endpoint(&format!("computers/{computer_id}"))?;
        let body = self.http.get(url, self.auth_headers()).await?;
        let computer: OrgoComputerJson = serde_json::from_str(&body)?;
        debug!("Orgo computer {} status={:?}", computer_id, computer.status);
        Ok(computer)
    }

    /// Returns the raw base64 payload of the current screen.
    pub async fn screenshot(&self, computer_id: &str) -> Result<String, Error> {
        let url = self.endpoint(&format!("computers/{computer_id}/screenshot"))?;
        let body = self.http.get(url, self.auth_headers()).await?;
        let shot: OrgoScreenshotJson = serde_json::from_str(&body)?;
        if shot.image.is_empty() {
            return Err(Error::Remote("empty screenshot".into()));
        }
        Ok(shot.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requested URLs and replies with a fixed body.
    struct CannedHttp {
        body: String,
        seen: Mutex<Vec<(String, HashMap<String, String>)>>,
    }

    #[async_trait]
    impl HttpClient for CannedHttp {
        async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<String, Error> {
            self.seen.lock().unwrap().push((url, headers));
            Ok(self.body.clone())
        }
    }

    fn canned(body: &str) -> Arc<CannedHttp> {
        Arc::new(CannedHttp {
            body: body.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn screenshot_hits_computer_endpoint_with_bearer_key() -> Result<(), Error> {
        let http = canned(r#"{"image":"aGVsbG8="}"#);
        let client = OrgoClient::new(http.clone(), "https://example.test/api", "sk-1")?;

        let payload = client.screenshot("comp-9").await?;
        assert_eq!(payload, "aGVsbG8=");

        let seen = http.seen.lock().unwrap();
        assert_eq!(seen[0].0, "https://example.test/api/computers/comp-9/screenshot");
        assert_eq!(seen[0].1.get("Authorization").map(String::as_str), Some("Bearer sk-1"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_screenshot_is_an_error() -> Result<(), Error> {
        let client = OrgoClient::new(canned(r#"{"image":""}"#), "https://example.test/api/", "k")?;
        assert!(client.screenshot("c").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn computer_lookup_parses_status() -> Result<(), Error> {
        let client = OrgoClient::new(
            canned(r#"{"id":"c1","status":"running","extra":1}"#),
            "https://example.test/api",
            "k",
        )?;
        let computer = client.get_computer("c1").await?;
        assert_eq!(computer.id, "c1");
        assert_eq!(computer.status.as_deref(), Some("running"));
        Ok(())
    }
}
