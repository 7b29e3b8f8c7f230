// ================================================================
// File: orgomon-common/src/traits/recognition_traits.rs
// ================================================================

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::Error;

/// A ready-to-use OCR worker. Expensive to build, so one is shared across cycles.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Returns the text found in the image stored at `image_path`.
    async fn recognize(&self, image_path: &Path) -> Result<String, Error>;

    /// Releases the worker. Later `recognize` calls fail.
    async fn terminate(&self) -> Result<(), Error>;
}

#[async_trait]
pub trait RecognizerFactory: Send + Sync {
    async fn create_worker(&self, language: &str) -> Result<Arc<dyn TextRecognizer>, Error>;
}
