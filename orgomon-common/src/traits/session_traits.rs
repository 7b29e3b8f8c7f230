// ================================================================
// File: orgomon-common/src/traits/session_traits.rs
// ================================================================

use std::sync::Arc;

use async_trait::async_trait;

use crate::Error;

/// A live handle to one remote machine.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    fn computer_id(&self) -> &str;

    /// Captures the current screen; returns the base64 image payload.
    async fn screenshot(&self) -> Result<String, Error>;
}

/// Authenticates against the remote desktop API and opens sessions.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(
        &self,
        computer_id: &str,
        credential_key: &str,
    ) -> Result<Arc<dyn RemoteSession>, Error>;
}
