// ================================================================
// File: orgomon-common/src/traits/reporter_traits.rs
// ================================================================

use crate::models::{AccountDescriptor, CycleReport, MonitorSummary};
use crate::Error;

/// Receives the monitor's lifecycle notifications, typically to draw them.
///
/// Everything except `on_cycle` has a no-op default.
pub trait CycleReporter: Send + Sync {
    fn on_starting(&self) {}

    fn on_recognizer_ready(&self) {}

    fn on_accounts_loaded(&self, _accounts: &[AccountDescriptor], _start_index: u32) {}

    fn on_session_warmed(&self, _account: &AccountDescriptor, _outcome: Result<(), &Error>) {}

    fn on_first_cycle_pending(&self, _delay_secs: f64) {}

    fn on_cycle(&self, report: &CycleReport);

    fn on_stopped(&self, _summary: &MonitorSummary) {}
}
