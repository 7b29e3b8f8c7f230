//! src/config.rs
//!
//! Runtime settings for the monitor, read from the process environment
//! (after `.env` has been loaded by the binary).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::Error;

pub const DEFAULT_ENV_PREFIX: &str = "ORGO";
pub const DEFAULT_START_INDEX: u32 = 3;
pub const DEFAULT_REFRESH_SECONDS: i64 = 60;
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 3000;
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
pub const DEFAULT_API_BASE: &str = "https://www.orgo.ai/api";
pub const DEFAULT_TESSERACT_BIN: &str = "tesseract";

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Prefix of every variable, e.g. `ORGO` for `ORGO_KEY_3`.
    pub env_prefix: String,
    pub start_index: u32,
    /// Zero or negative means "poll once, then idle until interrupted".
    pub refresh_seconds: i64,
    pub scratch_dir: PathBuf,
    pub startup_delay: Duration,
    pub ocr_language: String,
    pub api_base: String,
    pub tesseract_bin: String,
    pub color: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            start_index: DEFAULT_START_INDEX,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
            scratch_dir: PathBuf::from("temp"),
            startup_delay: Duration::from_millis(DEFAULT_STARTUP_DELAY_MS),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            tesseract_bin: DEFAULT_TESSERACT_BIN.to_string(),
            color: true,
        }
    }
}

impl MonitorConfig {
    /// Reads the config from the real process environment.
    pub fn from_env(prefix: &str) -> Result<Self, Error> {
        Self::from_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Reads the config through `lookup`. Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            lookup(&format!("{prefix}_{suffix}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut cfg = MonitorConfig {
            env_prefix: prefix.to_string(),
            ..Default::default()
        };

        if let Some(v) = var("START_INDEX") {
            cfg.start_index = parse_number(&format!("{prefix}_START_INDEX"), &v)?;
        }
        if let Some(v) = var("REFRESH_SECONDS") {
            cfg.refresh_seconds = parse_number(&format!("{prefix}_REFRESH_SECONDS"), &v)?;
        }
        if let Some(v) = var("STARTUP_DELAY_MS") {
            let ms: u64 = parse_number(&format!("{prefix}_STARTUP_DELAY_MS"), &v)?;
            cfg.startup_delay = Duration::from_millis(ms);
        }
        if let Some(v) = var("TEMP_DIR") {
            cfg.scratch_dir = PathBuf::from(v);
        }
        if let Some(v) = var("OCR_LANG") {
            cfg.ocr_language = v;
        }
        if let Some(v) = var("API_BASE") {
            cfg.api_base = v;
        }
        if let Some(v) = var("TESSERACT_BIN") {
            cfg.tesseract_bin = v;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            cfg.color = false;
        }

        Ok(cfg)
    }

    /// The fixed cadence between cycles, or `None` for single-shot mode.
    pub fn refresh_interval(&self) -> Option<Duration> {
        u64::try_from(self.refresh_seconds)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> Result<T, Error> {
    raw.parse::<T>()
        .map_err(|_| Error::Config(format!("{name} must be a number, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = MonitorConfig::from_lookup("ORGO", |_| None).unwrap();
        assert_eq!(cfg.start_index, 3);
        assert_eq!(cfg.refresh_interval(), Some(Duration::from_secs(60)));
        assert_eq!(cfg.scratch_dir, PathBuf::from("temp"));
        assert!(cfg.color);
    }

    #[test]
    fn overrides_are_read_with_prefix() {
        let cfg = MonitorConfig::from_lookup(
            "VM",
            lookup_from(&[
                ("VM_START_INDEX", "1"),
                ("VM_REFRESH_SECONDS", "15"),
                ("VM_TEMP_DIR", "/tmp/ocr"),
                ("VM_STARTUP_DELAY_MS", "0"),
                ("VM_OCR_LANG", "deu"),
                ("NO_COLOR", "1"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.env_prefix, "VM");
        assert_eq!(cfg.start_index, 1);
        assert_eq!(cfg.refresh_interval(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.scratch_dir, PathBuf::from("/tmp/ocr"));
        assert_eq!(cfg.startup_delay, Duration::ZERO);
        assert_eq!(cfg.ocr_language, "deu");
        assert!(!cfg.color);
    }

    #[test]
    fn non_positive_refresh_means_single_cycle() {
        for raw in ["0", "-5"] {
            let cfg = MonitorConfig::from_lookup(
                "ORGO",
                lookup_from(&[("ORGO_REFRESH_SECONDS", raw)]),
            )
            .unwrap();
            assert_eq!(cfg.refresh_interval(), None);
        }
    }

    #[test]
    fn garbage_numbers_are_config_errors() {
        let err = MonitorConfig::from_lookup(
            "ORGO",
            lookup_from(&[("ORGO_START_INDEX", "three")]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
