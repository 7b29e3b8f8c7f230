// File: orgomon-common/src/models/stats.rs

/// Marker rendered for a stat that could not be read from the screen.
pub const UNKNOWN_STAT: &str = "-";

/// The four status fields read off a node's screen.
///
/// Each field is independent: `None` means "unknown", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatBlock {
    pub tasks: Option<String>,
    /// Stored as `"<done>/<total>"`.
    pub completed: Option<String>,
    /// Stored with the `%` suffix.
    pub success_rate: Option<String>,
    pub runtime: Option<String>,
}

impl StatBlock {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.tasks.is_none()
            && self.completed.is_none()
            && self.success_rate.is_none()
            && self.runtime.is_none()
    }

    pub fn tasks_or_unknown(&self) -> &str {
        self.tasks.as_deref().unwrap_or(UNKNOWN_STAT)
    }

    pub fn completed_or_unknown(&self) -> &str {
        self.completed.as_deref().unwrap_or(UNKNOWN_STAT)
    }

    pub fn success_rate_or_unknown(&self) -> &str {
        self.success_rate.as_deref().unwrap_or(UNKNOWN_STAT)
    }

    pub fn runtime_or_unknown(&self) -> &str {
        self.runtime.as_deref().unwrap_or(UNKNOWN_STAT)
    }
}
