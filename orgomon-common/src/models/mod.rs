pub mod account;
pub mod poll;
pub mod stats;

pub use account::AccountDescriptor;
pub use poll::{CycleReport, MonitorSummary, PollResult};
pub use stats::{StatBlock, UNKNOWN_STAT};
