// File: orgomon-common/src/models/poll.rs

use chrono::{DateTime, Local};

use crate::models::account::AccountDescriptor;
use crate::models::stats::StatBlock;

/// Outcome of polling one account during one cycle.
///
/// Built fresh every cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResult {
    pub account_index: u32,
    pub short_id: String,
    pub success: bool,
    pub stats: StatBlock,
    /// Full error text; display code truncates it.
    pub error_message: Option<String>,
}

impl PollResult {
    pub fn online(account: &AccountDescriptor, stats: StatBlock) -> Self {
        Self {
            account_index: account.index,
            short_id: account.short_id(),
            success: true,
            stats,
            error_message: None,
        }
    }

    pub fn offline(account: &AccountDescriptor, error: impl ToString) -> Self {
        Self {
            account_index: account.index,
            short_id: account.short_id(),
            success: false,
            stats: StatBlock::unknown(),
            error_message: Some(error.to_string()),
        }
    }

    /// Error text cut to `max_chars` characters.
    pub fn short_error(&self, max_chars: usize) -> Option<String> {
        self.error_message
            .as_ref()
            .map(|msg| msg.chars().take(max_chars).collect())
    }
}

/// Aggregated results of one cycle, in account order.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based run number.
    pub run: u64,
    pub finished_at: DateTime<Local>,
    pub results: Vec<PollResult>,
}

impl CycleReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn online(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn offline(&self) -> usize {
        self.total() - self.online()
    }
}

/// What the scheduler reports once it has stopped.
#[derive(Debug, Clone)]
pub struct MonitorSummary {
    pub cycles_completed: u64,
    pub stopped_at: DateTime<Local>,
}
