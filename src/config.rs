//! Session configuration with per-field defaults and fatal validation.

use crate::constants::{
    DEFAULT_CODE_HINT, DEFAULT_COMPUTER_PASSWORD, DEFAULT_COUNTDOWN_SECS, DEFAULT_LOCATIONS,
    DEFAULT_UNLOCK_CODE, SLOT_COUNT, START_LOCK_ATTEMPTS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when configuration invariants are violated. All of these are
/// fatal at session construction: the placement invariants cannot be
/// guaranteed, so the engine refuses to start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("question pool holds {pool} entries, need at least {slots}")]
    NotEnoughQuestions { pool: usize, slots: usize },
    #[error("location set holds {available} entries, need at least {slots}")]
    NotEnoughLocations { available: usize, slots: usize },
    #[error("duplicate location name '{name}'")]
    DuplicateLocation { name: String },
    #[error("unlock code must be {expected} decimal digits (got '{code}')")]
    BadUnlockCode { code: String, expected: usize },
    #[error("slot count must be at least 1")]
    NoSlots,
    #[error("lock attempts must be at least 1")]
    NoAttempts,
}

/// Fixed inputs consumed by the puzzle engine, specified once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of concurrently active clue slots.
    #[serde(default = "GameConfig::default_slot_count")]
    pub slot_count: usize,
    /// Attempts granted to each lock before a security lockout.
    #[serde(default = "GameConfig::default_lock_attempts")]
    pub lock_attempts: u8,
    /// Keypad code unlocking the safe (classic) or the door (code_door).
    #[serde(default = "GameConfig::default_unlock_code")]
    pub unlock_code: String,
    /// Hint surfaced on the keypad once attempts run low.
    #[serde(default = "GameConfig::default_code_hint")]
    pub code_hint: String,
    /// Password accepted by the computer terminal.
    #[serde(default = "GameConfig::default_computer_password")]
    pub computer_password: String,
    /// Superset of clue-carrying world-object names.
    #[serde(default = "GameConfig::default_locations")]
    pub locations: Vec<String>,
    /// Countdown duration, consumed only by the victory directive.
    #[serde(default = "GameConfig::default_countdown_secs")]
    pub countdown_secs: u32,
}

impl GameConfig {
    const fn default_slot_count() -> usize {
        SLOT_COUNT
    }

    const fn default_lock_attempts() -> u8 {
        START_LOCK_ATTEMPTS
    }

    fn default_unlock_code() -> String {
        DEFAULT_UNLOCK_CODE.to_string()
    }

    fn default_code_hint() -> String {
        DEFAULT_CODE_HINT.to_string()
    }

    fn default_computer_password() -> String {
        DEFAULT_COMPUTER_PASSWORD.to_string()
    }

    fn default_locations() -> Vec<String> {
        DEFAULT_LOCATIONS.iter().map(|s| (*s).to_string()).collect()
    }

    const fn default_countdown_secs() -> u32 {
        DEFAULT_COUNTDOWN_SECS
    }

    /// Validate the configuration against a question pool of `pool_len`
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self, pool_len: usize) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.lock_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.unlock_code.len() != self.slot_count
            || !self.unlock_code.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ConfigError::BadUnlockCode {
                code: self.unlock_code.clone(),
                expected: self.slot_count,
            });
        }
        if pool_len < self.slot_count {
            return Err(ConfigError::NotEnoughQuestions {
                pool: pool_len,
                slots: self.slot_count,
            });
        }
        if self.locations.len() < self.slot_count {
            return Err(ConfigError::NotEnoughLocations {
                available: self.locations.len(),
                slots: self.slot_count,
            });
        }
        for (i, name) in self.locations.iter().enumerate() {
            if self.locations[..i].iter().any(|other| other == name) {
                return Err(ConfigError::DuplicateLocation { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Digits of the unlock code in slot order. Valid only after `validate`.
    #[must_use]
    pub fn code_digits(&self) -> Vec<u8> {
        self.unlock_code.bytes().map(|b| b - b'0').collect()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            slot_count: Self::default_slot_count(),
            lock_attempts: Self::default_lock_attempts(),
            unlock_code: Self::default_unlock_code(),
            code_hint: Self::default_code_hint(),
            computer_password: Self::default_computer_password(),
            locations: Self::default_locations(),
            countdown_secs: Self::default_countdown_secs(),
        }
    }
}
