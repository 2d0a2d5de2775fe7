//! Northstar Escape Engine
//!
//! Platform-agnostic puzzle logic for the Northstar office escape game.
//! This crate provides clue placement, mode rules, lock verification, and the
//! interaction mediator without UI or platform-specific dependencies.

pub mod config;
pub mod constants;
pub mod directive;
pub mod flavor;
pub mod inventory;
pub mod lock;
pub mod modes;
pub mod placement;
pub mod questions;
pub mod rng;
pub mod seed;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use directive::UiDirective;
pub use flavor::{FlavorTable, display_name};
pub use inventory::{Inventory, Item};
pub use lock::{CodeLock, LockTarget, SubmitOutcome};
pub use modes::{GameMode, SessionFlags, TrailGate, exit_unlockable, trail_gate};
pub use placement::{ClueSlot, Placement, SlotSet};
pub use questions::{Question, QuestionBank, QuestionError};
pub use rng::RngBundle;
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use session::{InputError, InteractableKind, PuzzleSession};

/// Trait for abstracting content loading operations
/// Platform-specific implementations should provide this
pub trait ContentLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the question bank from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the question data cannot be loaded.
    fn load_question_bank(&self) -> Result<QuestionBank, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Main engine for creating puzzle sessions from loaded content
pub struct GameEngine<L>
where
    L: ContentLoader,
{
    loader: L,
}

impl<L> GameEngine<L>
where
    L: ContentLoader,
    L::Error: Into<anyhow::Error>,
{
    /// Create a new engine with the provided content loader
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Construct a new puzzle session for the given seed and mode.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be loaded or if the loaded
    /// configuration cannot satisfy the placement invariants.
    pub fn create_session(&self, seed: u64, mode: GameMode) -> Result<PuzzleSession, anyhow::Error> {
        let bank = self.loader.load_question_bank().map_err(Into::into)?;
        let cfg: GameConfig = self.loader.load_config("game").map_err(Into::into)?;
        Ok(PuzzleSession::new(cfg, mode, seed, bank)?)
    }

    /// Construct a session from a friendly share code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code does not decode or content loading fails.
    pub fn create_session_from_code(&self, code: &str) -> Result<PuzzleSession, anyhow::Error> {
        let (mode, seed) =
            decode_to_seed(code).ok_or_else(|| anyhow::anyhow!("unrecognized share code"))?;
        self.create_session(seed, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl ContentLoader for FixtureLoader {
        type Error = Infallible;

        fn load_question_bank(&self) -> Result<QuestionBank, Self::Error> {
            Ok(QuestionBank::builtin())
        }

        fn load_config<T>(&self, _config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            let parsed = serde_json::from_str("{}")
                .or_else(|_| serde_json::from_str("null"))
                .unwrap();
            Ok(parsed)
        }
    }

    #[test]
    fn engine_builds_a_playable_session() {
        let engine = GameEngine::new(FixtureLoader);
        let session = engine.create_session(0xABCD, GameMode::Classic).unwrap();
        assert_eq!(session.mode(), GameMode::Classic);
        assert_eq!(session.placement().slot_count(), 4);
        assert!(!session.exit_unlockable());
    }

    #[test]
    fn engine_rebuilds_identical_sessions_from_share_codes() {
        let engine = GameEngine::new(FixtureLoader);
        let code = generate_code_from_entropy(GameMode::CodeDoor, 0x5EED);
        let original = engine.create_session_from_code(&code).unwrap();
        let replay = engine.create_session_from_code(&code).unwrap();
        assert_eq!(replay.mode(), GameMode::CodeDoor);
        assert_eq!(original.share_code(), code);
        for slot_index in 0..4 {
            assert_eq!(
                original.placement().location_of(slot_index),
                replay.placement().location_of(slot_index)
            );
        }
    }

    #[test]
    fn engine_rejects_garbage_share_codes() {
        let engine = GameEngine::new(FixtureLoader);
        assert!(engine.create_session_from_code("not-a-code").is_err());
    }
}
