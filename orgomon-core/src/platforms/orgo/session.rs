// File: src/platforms/orgo/session.rs

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::http::HttpClient;
use crate::platforms::orgo::client::OrgoClient;
use crate::traits::{RemoteSession, SessionConnector};
use crate::Error;

/// A session bound to one Orgo computer and the key that owns it.
pub struct OrgoSession {
    client: OrgoClient,
    computer_id: String,
}

#[async_trait]
impl RemoteSession for OrgoSession {
    fn computer_id(&self) -> &str {
        &self.computer_id
    }

    async fn screenshot(&self) -> Result<String, Error> {
        self.client.screenshot(&self.computer_id).await
    }
}

/// Opens [`OrgoSession`]s. Each session carries its own key, so accounts
/// under different API keys never share auth state.
pub struct OrgoConnector {
    http: Arc<dyn HttpClient>,
    api_base: String,
}

impl OrgoConnector {
    pub fn new(http: Arc<dyn HttpClient>, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl SessionConnector for OrgoConnector {
    async fn connect(
        &self,
        computer_id: &str,
        credential_key: &str,
    ) -> Result<Arc<dyn RemoteSession>, Error> {
        let client = OrgoClient::new(self.http.clone(), &self.api_base, credential_key)?;
        client.get_computer(computer_id).await?;
        info!("[Orgo] Connected to computer {}", computer_id);
        Ok(Arc::new(OrgoSession {
            client,
            computer_id: computer_id.to_string(),
        }))
    }
}
