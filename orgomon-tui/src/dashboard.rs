// File: orgomon-tui/src/dashboard.rs

use std::io::Write;

use colored::Colorize;
use tracing::warn;

use orgomon_common::models::{AccountDescriptor, CycleReport, MonitorSummary, PollResult};
use orgomon_common::traits::CycleReporter;
use orgomon_common::Error;

/// Error text is cut to this many characters in the dashboard.
pub const ERROR_DISPLAY_CHARS: usize = 20;

const FRAME_WIDTH: usize = 118;
const RULE_WIDTH: usize = 120;
const TITLE: &str = "ORGO NODE MONITOR";

const ID_W: usize = 18;
const STATUS_W: usize = 10;
const TASKS_W: usize = 8;
const COMPLETED_W: usize = 12;
const SUCCESS_W: usize = 10;
const RUNTIME_W: usize = 20;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Prints everything to stdout, redrawing the whole screen every cycle.
pub struct ConsoleDashboard {
    refresh_seconds: i64,
    color: bool,
}

impl ConsoleDashboard {
    pub fn new(refresh_seconds: i64, color: bool) -> Self {
        Self { refresh_seconds, color }
    }

    fn emit(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn ok(&self, text: &str) -> String {
        if self.color { text.green().to_string() } else { text.to_string() }
    }

    fn bad(&self, text: &str) -> String {
        if self.color { text.red().to_string() } else { text.to_string() }
    }
}

impl CycleReporter for ConsoleDashboard {
    fn on_starting(&self) {
        self.emit(&format!("{CLEAR_SCREEN}Starting ORGO Monitor...\n\nInitializing...\n"));
    }

    fn on_recognizer_ready(&self) {
        self.emit(&format!("{}\n", self.ok("OCR engine ready!")));
    }

    fn on_accounts_loaded(&self, accounts: &[AccountDescriptor], start_index: u32) {
        let cadence = if self.refresh_seconds > 0 {
            format!("Auto-refresh every {} seconds", self.refresh_seconds)
        } else {
            "Auto-refresh disabled (single run)".to_string()
        };
        self.emit(&format!(
            "Found {} accounts (starting from #{})\n{}\n\nConnecting to all VPS...\n",
            accounts.len(),
            start_index,
            cadence
        ));
    }

    fn on_session_warmed(&self, account: &AccountDescriptor, outcome: Result<(), &Error>) {
        let line = match outcome {
            Ok(()) => self.ok(&format!("   Connected to account #{}", account.index)),
            Err(e) => self.bad(&format!("   Failed to connect account #{}: {}", account.index, e)),
        };
        self.emit(&format!("{line}\n"));
    }

    fn on_first_cycle_pending(&self, delay_secs: f64) {
        self.emit(&format!(
            "\nConnections ready.\nStarting monitoring in {delay_secs:.0} seconds...\n"
        ));
    }

    fn on_cycle(&self, report: &CycleReport) {
        let body = render_dashboard(report, self.refresh_seconds, self.color);
        self.emit(&format!("{CLEAR_SCREEN}{body}"));
    }

    fn on_stopped(&self, summary: &MonitorSummary) {
        self.emit(&format!("{CLEAR_SCREEN}{}", render_stopped(summary)));
    }
}

/// Full dashboard text for one cycle.
pub fn render_dashboard(report: &CycleReport, refresh_seconds: i64, color: bool) -> String {
    let mut out = String::new();
    push_title(&mut out);

    let refresh = if refresh_seconds > 0 {
        format!("{refresh_seconds}s")
    } else {
        "off".to_string()
    };
    out.push_str(&format!(
        "  Last Update: {}  │  Run: #{}  │  Refresh: {}\n\n",
        report.finished_at.format("%Y-%m-%d %H:%M:%S"),
        report.run,
        refresh
    ));

    if report.results.is_empty() {
        out.push_str("  No accounts found in the environment.\n\n");
        push_footer(&mut out, refresh_seconds);
        return out;
    }

    out.push_str(&format!(
        "  Total: {}  │  Online: {}  │  Offline: {}\n\n",
        report.total(),
        report.online(),
        report.offline()
    ));
    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push_str("\n\n  ACCOUNT STATUS\n\n");

    out.push_str(&format!(
        " No. │ {:<ID_W$} │ {:<STATUS_W$} │ {:<TASKS_W$} │ {:<COMPLETED_W$} │ {:<SUCCESS_W$} │ {:<RUNTIME_W$}\n",
        "Computer ID", "Status", "Tasks", "Completed", "Success", "Runtime"
    ));
    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push('\n');

    for result in &report.results {
        out.push_str(&render_row(result, color));
        out.push('\n');
    }
    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    let failures: Vec<&PollResult> = report.results.iter().filter(|r| !r.success).collect();
    if !failures.is_empty() {
        out.push_str("  Errors:\n");
        for r in failures {
            let msg = r.short_error(ERROR_DISPLAY_CHARS).unwrap_or_default();
            out.push_str(&format!("  {:>3}. {}\n", r.account_index, msg));
        }
        out.push('\n');
    }

    push_footer(&mut out, refresh_seconds);
    out
}

fn render_row(r: &PollResult, color: bool) -> String {
    // Pad before colouring so escape codes don't count toward the width.
    let status = if r.success {
        let s = format!("{:<STATUS_W$}", "ONLINE");
        if color { s.green().to_string() } else { s }
    } else {
        let s = format!("{:<STATUS_W$}", "OFFLINE");
        if color { s.red().to_string() } else { s }
    };
    format!(
        "{:>3}. │ {:<ID_W$} │ {} │ {:<TASKS_W$} │ {:<COMPLETED_W$} │ {:<SUCCESS_W$} │ {:<RUNTIME_W$}",
        r.account_index,
        r.short_id,
        status,
        r.stats.tasks_or_unknown(),
        r.stats.completed_or_unknown(),
        r.stats.success_rate_or_unknown(),
        r.stats.runtime_or_unknown(),
    )
}

fn push_title(out: &mut String) {
    let left = (FRAME_WIDTH - TITLE.len()) / 2;
    let right = FRAME_WIDTH - TITLE.len() - left;
    out.push_str(&format!("┌{}┐\n", "─".repeat(FRAME_WIDTH)));
    out.push_str(&format!("│{}{}{}│\n", " ".repeat(left), TITLE, " ".repeat(right)));
    out.push_str(&format!("└{}┘\n\n", "─".repeat(FRAME_WIDTH)));
}

fn push_footer(out: &mut String, refresh_seconds: i64) {
    if refresh_seconds > 0 {
        out.push_str(&format!(
            "  Next refresh in {refresh_seconds} seconds. Press Ctrl+C to stop.\n\n"
        ));
    } else {
        out.push_str("  Single run complete. Press Ctrl+C to stop.\n\n");
    }
}

/// Banner shown once the monitor has shut down.
pub fn render_stopped(summary: &MonitorSummary) -> String {
    format!(
        "\n┌{rule}┐\n│{pad_l}MONITOR STOPPED{pad_r}│\n└{rule}┘\n\n  Total runs completed: {}\n  Stopped at: {}\n\n",
        summary.cycles_completed,
        summary.stopped_at.format("%Y-%m-%d %H:%M:%S"),
        rule = "─".repeat(50),
        pad_l = " ".repeat(15),
        pad_r = " ".repeat(20),
    )
}
