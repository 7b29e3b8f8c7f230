// src/lib.rs

pub mod accounts;
pub mod config;
pub mod context;
pub mod http;
pub mod platforms;
pub mod pool;
pub mod recognition;
pub mod scratch;
pub mod shutdown;
pub mod stats;
pub mod tasks;
pub mod test_utils;

pub use orgomon_common::error::Error;
pub use orgomon_common::models;
pub use orgomon_common::traits;

pub use config::MonitorConfig;
pub use context::MonitorContext;
pub use http::{DefaultHttpClient, HttpClient};
pub use pool::ConnectionPool;
pub use shutdown::ShutdownSignal;
pub use tasks::scheduler::{Monitor, MonitorState};
