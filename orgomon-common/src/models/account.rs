// File: orgomon-common/src/models/account.rs

use std::fmt;

/// Number of leading characters of the computer id shown in the dashboard.
const SHORT_ID_LEN: usize = 12;

/// One monitored remote machine, as loaded from the numbered env pairs.
///
/// The set of descriptors is fixed for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountDescriptor {
    pub index: u32,
    pub credential_key: String,
    pub computer_id: String,
}

impl AccountDescriptor {
    pub fn new(index: u32, credential_key: impl Into<String>, computer_id: impl Into<String>) -> Self {
        Self {
            index,
            credential_key: credential_key.into(),
            computer_id: computer_id.into(),
        }
    }

    /// First twelve characters of the computer id followed by `...`.
    pub fn short_id(&self) -> String {
        let head: String = self.computer_id.chars().take(SHORT_ID_LEN).collect();
        format!("{head}...")
    }
}

// The credential never ends up in logs.
impl fmt::Debug for AccountDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountDescriptor")
            .field("index", &self.index)
            .field("credential_key", &"<redacted>")
            .field("computer_id", &self.computer_id)
            .finish()
    }
}
