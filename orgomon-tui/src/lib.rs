//! Terminal presentation for the monitor: the startup log, the per-cycle
//! dashboard and the stop banner.

pub mod dashboard;

pub use dashboard::{render_dashboard, render_stopped, ConsoleDashboard, ERROR_DISPLAY_CHARS};
