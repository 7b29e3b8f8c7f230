//! src/stats.rs
//!
//! Pulls the node's status fields out of OCR text. Every field is searched
//! on its own; a miss leaves that field unknown and never fails the rest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::StatBlock;

static TASKS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Tasks[:\s]+(\d+)").unwrap());

static COMPLETED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Completed[:\s]+(\d+)\s*/\s*(\d+)").unwrap());

static SUCCESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Success[:\s]+(\d+(?:\.\d+)?)%").unwrap());

// One or more `<digits><unit>` tokens (any case, any whitespace between them),
// each closed off by a word boundary so the next label ("Success", "Status")
// is never taken for an `s` unit. A bare number is accepted as a last resort.
static RUNTIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Runtime[:\s]+(\d+\s*[hms](?:\s*\d+\s*[hms])*\b|\d+)").unwrap()
});

static UPTIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Uptime[:\s]+(\d+\s*[hms](?:\s*\d+\s*[hms])*\b|\d+)").unwrap()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extracts a [`StatBlock`] from free-form recognized text. Total: any input works.
pub fn extract_stats(text: &str) -> StatBlock {
    StatBlock {
        tasks: first_capture(&TASKS_RE, text),
        completed: COMPLETED_RE
            .captures(text)
            .map(|caps| format!("{}/{}", &caps[1], &caps[2])),
        success_rate: first_capture(&SUCCESS_RE, text).map(|rate| format!("{rate}%")),
        runtime: duration_after(&RUNTIME_RE, text).or_else(|| duration_after(&UPTIME_RE, text)),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// A label followed only by whitespace reads as absent.
fn duration_after(re: &Regex, text: &str) -> Option<String> {
    let raw = first_capture(re, text)?;
    let collapsed = WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned();
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runtime_whitespace() {
        let stats = extract_stats("Runtime:   3h \t 12m   4s  ");
        assert_eq!(stats.runtime.as_deref(), Some("3h 12m 4s"));
    }

    #[test]
    fn runtime_stops_before_next_label() {
        let stats = extract_stats("Runtime: 1h 2m 3s Success: 50%\nStatus: ok");
        assert_eq!(stats.runtime.as_deref(), Some("1h 2m 3s"));
        assert_eq!(stats.success_rate.as_deref(), Some("50%"));
    }

    #[test]
    fn blank_runtime_falls_through_to_uptime() {
        let stats = extract_stats("Runtime: \nUptime: 5m");
        assert_eq!(stats.runtime.as_deref(), Some("5m"));
    }

    #[test]
    fn uppercase_units_are_kept_whole() {
        assert_eq!(extract_stats("Runtime: 1H 2M 3S").runtime.as_deref(), Some("1H 2M 3S"));
        assert_eq!(extract_stats("UPTIME: 2H 10M").runtime.as_deref(), Some("2H 10M"));
    }

    #[test]
    fn runtime_continues_on_next_line() {
        let stats = extract_stats("Runtime: 1h\n2m 3s\nTasks: 4");
        assert_eq!(stats.runtime.as_deref(), Some("1h 2m 3s"));
        assert_eq!(stats.tasks.as_deref(), Some("4"));
    }

    #[test]
    fn compact_runtime_without_spaces() {
        assert_eq!(extract_stats("Runtime: 12h30m").runtime.as_deref(), Some("12h30m"));
    }

    #[test]
    fn labels_are_case_insensitive() {
        let stats = extract_stats("TASKS 9 completed 1 / 2 success: 100%");
        assert_eq!(stats.tasks.as_deref(), Some("9"));
        assert_eq!(stats.completed.as_deref(), Some("1/2"));
        assert_eq!(stats.success_rate.as_deref(), Some("100%"));
    }
}
