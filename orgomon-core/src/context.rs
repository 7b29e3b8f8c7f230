//! src/context.rs
//!
//! The state the monitor owns for its whole run: the fixed account list,
//! the session pool, the shared OCR worker and the scratch directory.

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::AccountDescriptor;
use crate::pool::ConnectionPool;
use crate::scratch::ScratchDir;
use crate::traits::{SessionConnector, TextRecognizer};

pub struct MonitorContext {
    pub accounts: Arc<[AccountDescriptor]>,
    pub pool: Arc<ConnectionPool>,
    pub recognizer: Arc<dyn TextRecognizer>,
    pub scratch: ScratchDir,
}

impl MonitorContext {
    pub fn new(
        accounts: Vec<AccountDescriptor>,
        connector: Arc<dyn SessionConnector>,
        recognizer: Arc<dyn TextRecognizer>,
        scratch: ScratchDir,
    ) -> Self {
        Self {
            accounts: accounts.into(),
            pool: Arc::new(ConnectionPool::new(connector)),
            recognizer,
            scratch,
        }
    }

    /// Tears everything down: OCR worker, scratch directory, then the pool.
    /// Each step is attempted even if an earlier one failed.
    pub async fn shutdown(self) {
        if let Err(e) = self.recognizer.terminate().await {
            warn!("Failed to terminate OCR worker: {:?}", e);
        }
        if let Err(e) = self.scratch.remove_all().await {
            warn!("Failed to remove scratch dir {}: {:?}", self.scratch.root().display(), e);
        }
        self.pool.clear();
        info!("Monitor context released.");
    }
}
