// File: orgomon-core/src/test_utils/fakes.rs
//
// In-memory collaborators for exercising the pool, the cycle and the
// scheduler without a network or an OCR engine.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::models::{AccountDescriptor, CycleReport, MonitorSummary};
use crate::shutdown::ShutdownSignal;
use crate::traits::{CycleReporter, RecognizerFactory, RemoteSession, SessionConnector, TextRecognizer};
use crate::Error;

/// Base64 of a tiny fake image; the fake recognizer never decodes it.
pub fn fake_screenshot() -> String {
    STANDARD.encode(b"\xFF\xD8fake-jpeg")
}

pub struct FakeSession {
    computer_id: String,
    fail_screenshot: bool,
    pub screenshots: AtomicUsize,
}

#[async_trait]
impl RemoteSession for FakeSession {
    fn computer_id(&self) -> &str {
        &self.computer_id
    }

    async fn screenshot(&self) -> Result<String, Error> {
        self.screenshots.fetch_add(1, Ordering::SeqCst);
        if self.fail_screenshot {
            return Err(Error::Remote(format!("screenshot failed for {}", self.computer_id)));
        }
        Ok(fake_screenshot())
    }
}

/// Counts `connect` calls; can refuse or slow down chosen computers.
#[derive(Default)]
pub struct FakeConnector {
    pub connects: AtomicUsize,
    connect_delay: Duration,
    refuse: HashSet<String>,
    broken_screens: HashSet<String>,
    sessions: Mutex<HashMap<String, Arc<FakeSession>>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    /// `connect` fails for this computer.
    pub fn refusing(mut self, computer_id: &str) -> Self {
        self.refuse.insert(computer_id.to_string());
        self
    }

    /// `connect` works but every screenshot fails for this computer.
    pub fn with_broken_screen(mut self, computer_id: &str) -> Self {
        self.broken_screens.insert(computer_id.to_string());
        self
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn session(&self, computer_id: &str) -> Option<Arc<FakeSession>> {
        self.sessions.lock().unwrap().get(computer_id).cloned()
    }
}

#[async_trait]
impl SessionConnector for FakeConnector {
    async fn connect(
        &self,
        computer_id: &str,
        _credential_key: &str,
    ) -> Result<Arc<dyn RemoteSession>, Error> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.connect_delay.is_zero() {
            tokio::time::sleep(self.connect_delay).await;
        }
        if self.refuse.contains(computer_id) {
            return Err(Error::Auth(format!("refused {computer_id}")));
        }
        let session = Arc::new(FakeSession {
            computer_id: computer_id.to_string(),
            fail_screenshot: self.broken_screens.contains(computer_id),
            screenshots: AtomicUsize::new(0),
        });
        self.sessions
            .lock()
            .unwrap()
            .insert(computer_id.to_string(), Arc::clone(&session));
        Ok(session)
    }
}

/// Returns canned text, optionally per scratch file name (`temp_<N>.jpg`).
#[derive(Default)]
pub struct FakeRecognizer {
    default_text: String,
    per_file: HashMap<String, String>,
    failing_files: HashSet<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    /// Highest number of recognitions that were running at the same time.
    pub max_in_flight: AtomicUsize,
    pub seen: Mutex<Vec<PathBuf>>,
    pub terminated: AtomicBool,
}

impl FakeRecognizer {
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            default_text: default_text.into(),
            ..Default::default()
        }
    }

    pub fn with_text_for(mut self, account_index: u32, text: impl Into<String>) -> Self {
        self.per_file.insert(format!("temp_{account_index}.jpg"), text.into());
        self
    }

    pub fn failing_for(mut self, account_index: u32) -> Self {
        self.failing_files.insert(format!("temp_{account_index}.jpg"));
        self
    }

    /// Every recognition takes `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    pub fn peak_concurrency(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<String, Error> {
        if !image_path.exists() {
            return Err(Error::Recognition(format!("{} missing", image_path.display())));
        }
        self.seen.lock().unwrap().push(image_path.to_path_buf());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing_files.contains(&name) {
            return Err(Error::Recognition("unreadable image".into()));
        }
        Ok(self
            .per_file
            .get(&name)
            .cloned()
            .unwrap_or_else(|| self.default_text.clone()))
    }

    async fn terminate(&self) -> Result<(), Error> {
        self.terminated.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out one shared [`FakeRecognizer`], or fails like a missing engine.
pub struct FakeRecognizerFactory {
    pub worker: Arc<FakeRecognizer>,
    fail: bool,
    pub created: AtomicUsize,
}

impl FakeRecognizerFactory {
    pub fn new(worker: FakeRecognizer) -> Self {
        Self {
            worker: Arc::new(worker),
            fail: false,
            created: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        Self {
            worker: Arc::new(FakeRecognizer::default()),
            fail: true,
            created: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecognizerFactory for FakeRecognizerFactory {
    async fn create_worker(&self, _language: &str) -> Result<Arc<dyn TextRecognizer>, Error> {
        if self.fail {
            return Err(Error::Recognition("engine failed to load".into()));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(self.worker.clone())
    }
}

/// Keeps every notification; can pull the shutdown signal after N cycles.
#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Mutex<Vec<CycleReport>>,
    pub warmed: Mutex<Vec<(u32, bool)>>,
    pub loaded: Mutex<Option<usize>>,
    pub stopped: Mutex<Option<MonitorSummary>>,
    stop_after: Option<(u64, ShutdownSignal)>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_after(cycles: u64, shutdown: ShutdownSignal) -> Self {
        Self {
            stop_after: Some((cycles, shutdown)),
            ..Default::default()
        }
    }

    pub fn cycle_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

impl CycleReporter for RecordingReporter {
    fn on_accounts_loaded(&self, accounts: &[AccountDescriptor], _start_index: u32) {
        *self.loaded.lock().unwrap() = Some(accounts.len());
    }

    fn on_session_warmed(&self, account: &AccountDescriptor, outcome: Result<(), &Error>) {
        self.warmed.lock().unwrap().push((account.index, outcome.is_ok()));
    }

    fn on_cycle(&self, report: &CycleReport) {
        self.reports.lock().unwrap().push(report.clone());
        if let Some((limit, shutdown)) = &self.stop_after {
            if report.run >= *limit {
                shutdown.trigger();
            }
        }
    }

    fn on_stopped(&self, summary: &MonitorSummary) {
        *self.stopped.lock().unwrap() = Some(summary.clone());
    }
}
