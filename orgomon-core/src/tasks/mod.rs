pub mod poll_cycle;
pub mod scheduler;
