//! Per-session tunables
//!
//! Rule tables (scores, speed curve, kicks) are fixed constants; these are
//! the knobs a collaborator may set when creating a session, typically from
//! a JSON settings file. Missing fields take the standard values.

use serde::{Deserialize, Serialize};

use crate::types::{Mode, EVENT_LOG_CAPACITY, LOCK_DELAY_MS, LOCK_RESET_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub mode: Mode,
    pub lock_delay_ms: u32,
    pub lock_reset_limit: u8,
    pub event_log_capacity: usize,
}

impl EngineConfig {
    /// Parse from JSON, e.g. `{"mode": "empire", "lockDelayMs": 400}`
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Standard,
            lock_delay_ms: LOCK_DELAY_MS,
            lock_reset_limit: LOCK_RESET_LIMIT,
            event_log_capacity: EVENT_LOG_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(r#"{"mode":"empire","lockDelayMs":300}"#).unwrap();
        assert_eq!(config.mode, Mode::Empire);
        assert_eq!(config.lock_delay_ms, 300);
        assert_eq!(config.lock_reset_limit, LOCK_RESET_LIMIT);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(EngineConfig::from_json(r#"{"mode":"rebel"}"#).is_err());
        assert!(EngineConfig::from_json("not json").is_err());
    }
}
