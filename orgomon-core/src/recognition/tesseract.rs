// File: src/recognition/tesseract.rs

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::traits::{RecognizerFactory, TextRecognizer};
use crate::Error;

/// Builds [`TesseractWorker`]s backed by the `tesseract` executable.
pub struct TesseractFactory {
    binary: String,
}

impl TesseractFactory {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }
}

#[async_trait]
impl RecognizerFactory for TesseractFactory {
    /// Checks that the binary runs and has every requested language pack.
    async fn create_worker(&self, language: &str) -> Result<Arc<dyn TextRecognizer>, Error> {
        let output = Command::new(&self.binary)
            .arg("--list-langs")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::Recognition(format!("cannot run '{}': {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(Error::Recognition(format!(
                "'{} --list-langs' exited with {}",
                self.binary, output.status
            )));
        }

        // Older releases print the list on stderr.
        let mut listing = String::from_utf8_lossy(&output.stdout).into_owned();
        listing.push_str(&String::from_utf8_lossy(&output.stderr));
        let installed = installed_languages(&listing);

        for wanted in language.split('+').filter(|l| !l.is_empty()) {
            if !installed.iter().any(|l| l == wanted) {
                return Err(Error::Recognition(format!(
                    "language '{wanted}' is not installed for {}",
                    self.binary
                )));
            }
        }

        info!("Tesseract worker ready (lang={})", language);
        Ok(Arc::new(TesseractWorker {
            binary: self.binary.clone(),
            language: language.to_string(),
            terminated: AtomicBool::new(false),
        }))
    }
}

/// Language codes from `tesseract --list-langs` output (header line skipped).
fn installed_languages(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of"))
        .map(str::to_string)
        .collect()
}

pub struct TesseractWorker {
    binary: String,
    language: String,
    terminated: AtomicBool,
}

#[async_trait]
impl TextRecognizer for TesseractWorker {
    async fn recognize(&self, image_path: &Path) -> Result<String, Error> {
        if self.terminated.load(Ordering::SeqCst) {
            return Err(Error::Recognition("worker terminated".into()));
        }

        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.lines().next().unwrap_or("tesseract failed").trim().to_string();
            return Err(Error::Recognition(reason));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Recognized {} chars from {}", text.len(), image_path.display());
        Ok(text)
    }

    async fn terminate(&self) -> Result<(), Error> {
        self.terminated.store(true, Ordering::SeqCst);
        info!("Tesseract worker terminated");
        Ok(())
    }
}
