//! Core configuration for vizij-motion-core.

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Configuration shared by motions and the motion queue.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fade-in used by motions that never had one set explicitly.
    pub default_fade_in_seconds: f32,
    /// Fade-out used by motions that never had one set explicitly.
    pub default_fade_out_seconds: f32,

    /// When true, a fade weight outside [0, 1] is reported as
    /// `MotionError::ContractViolation`. When false it is clamped and logged.
    pub strict_contracts: bool,

    /// Maximum queue events to retain per tick before overflow is dropped.
    pub max_events_per_tick: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_fade_in_seconds: 1.0,
            default_fade_out_seconds: 1.0,
            strict_contracts: cfg!(debug_assertions),
            max_events_per_tick: 1024,
        }
    }
}

impl MotionConfig {
    /// Parse a config document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, MotionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style toggle for contract strictness.
    pub fn with_strict_contracts(mut self, strict: bool) -> Self {
        self.strict_contracts = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = MotionConfig::from_json_str(r#"{ "default_fade_in_seconds": 0.25 }"#).unwrap();
        assert_eq!(cfg.default_fade_in_seconds, 0.25);
        assert_eq!(cfg.default_fade_out_seconds, 1.0);
        assert_eq!(cfg.max_events_per_tick, 1024);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = MotionConfig::from_json_str("{ nope").unwrap_err();
        assert_eq!(err.category(), "config");
    }
}
