//! Precondition violations
//!
//! The simulation itself never fails once running. These errors only come out
//! of constructors and configuration loading, so a bad parameter is reported
//! at setup instead of producing degenerate entities.

use thiserror::Error;

/// Errors raised when building a world or its entities
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Asteroid size ordinal outside 0..=2
    #[error("invalid asteroid size index {0} (expected 0..=2)")]
    InvalidSize(u8),

    /// Player count outside 1..=max
    #[error("invalid player count {got} (expected 1..={max})")]
    InvalidPlayerCount { got: usize, max: usize },

    /// Ship player index has no key binding
    #[error("invalid player index {0}")]
    InvalidPlayerIndex(usize),

    /// Body-shape variant outside the catalog for this size
    #[error("invalid asteroid body variant {0}")]
    InvalidBody(usize),

    /// Difficulty must be at least 1
    #[error("invalid difficulty {0} (expected >= 1)")]
    InvalidDifficulty(u32),

    /// A tuning value is out of range
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: &'static str,
    },

    /// Settings JSON could not be parsed
    #[error("failed to parse settings: {0}")]
    SettingsParse(String),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::SettingsParse(err.to_string())
    }
}
