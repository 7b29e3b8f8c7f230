pub mod client;
pub mod session;

pub use client::OrgoClient;
pub use session::{OrgoConnector, OrgoSession};
