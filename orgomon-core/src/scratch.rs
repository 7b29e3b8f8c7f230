// File: orgomon-core/src/scratch.rs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::Error;

/// Directory holding the short-lived screenshot files fed to OCR.
///
/// Each account writes to its own file name, so concurrent accounts never
/// collide. Once [`ScratchDir::remove_all`] has run, writes are refused so a
/// late account task cannot bring the directory back.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
    // true once removed; writers hold the read side while touching the disk
    closed: Arc<RwLock<bool>>,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            closed: Arc::new(RwLock::new(false)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, account_index: u32) -> PathBuf {
        self.root.join(format!("temp_{account_index}.jpg"))
    }

    /// Writes `bytes` to the account's scratch file, creating the directory if needed.
    pub async fn write(&self, account_index: u32, bytes: &[u8]) -> Result<PathBuf, Error> {
        let closed = self.closed.read().await;
        if *closed {
            return Err(Error::NotFound(format!(
                "scratch dir {} already removed",
                self.root.display()
            )));
        }
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(account_index);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Deletes one scratch file. A file that is already gone is fine.
    pub async fn discard(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!("Removed scratch file {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove scratch file {}: {}", path.display(), e),
        }
    }

    /// Removes the whole directory and refuses any later write.
    pub async fn remove_all(&self) -> Result<(), Error> {
        let mut closed = self.closed.write().await;
        *closed = true;
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_discard_leaves_nothing() -> Result<(), Error> {
        let tmp = tempfile::tempdir()?;
        let scratch = ScratchDir::new(tmp.path().join("shots"));

        let path = scratch.write(4, b"jpeg").await?;
        assert_eq!(path, scratch.path_for(4));
        assert!(path.exists());

        scratch.discard(&path).await;
        scratch.discard(&path).await;
        assert!(!path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn remove_all_tolerates_missing_dir() -> Result<(), Error> {
        let tmp = tempfile::tempdir()?;
        let scratch = ScratchDir::new(tmp.path().join("never-created"));
        scratch.remove_all().await?;
        Ok(())
    }

    #[tokio::test]
    async fn writes_after_removal_do_not_recreate_dir() -> Result<(), Error> {
        let tmp = tempfile::tempdir()?;
        let scratch = ScratchDir::new(tmp.path().join("shots"));
        let late_task = scratch.clone();

        scratch.write(1, b"jpeg").await?;
        scratch.remove_all().await?;

        assert!(late_task.write(2, b"jpeg").await.is_err());
        assert!(!scratch.root().exists());
        Ok(())
    }
}
