//! orgomon-server/src/context.rs
//!
//! Wires the concrete collaborators (Orgo HTTP API, Tesseract, console
//! dashboard) behind the traits the monitor expects.

use std::sync::Arc;

use orgomon_common::traits::{CycleReporter, RecognizerFactory, SessionConnector};
use orgomon_core::config::MonitorConfig;
use orgomon_core::http::{DefaultHttpClient, HttpClient};
use orgomon_core::platforms::orgo::OrgoConnector;
use orgomon_core::recognition::TesseractFactory;
use orgomon_tui::ConsoleDashboard;

pub struct AppContext {
    pub config: MonitorConfig,
    pub connector: Arc<dyn SessionConnector>,
    pub recognizers: Arc<dyn RecognizerFactory>,
    pub dashboard: Arc<dyn CycleReporter>,
}

impl AppContext {
    pub fn new(config: MonitorConfig) -> Self {
        let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
        let connector = Arc::new(OrgoConnector::new(http, config.api_base.clone()));
        let recognizers = Arc::new(TesseractFactory::new(config.tesseract_bin.clone()));
        let dashboard = Arc::new(ConsoleDashboard::new(config.refresh_seconds, config.color));

        Self {
            config,
            connector,
            recognizers,
            dashboard,
        }
    }
}
