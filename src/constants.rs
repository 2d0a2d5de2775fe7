//! Centralized tuning constants for the Northstar puzzle engine.
//!
//! These values define the deterministic behavior of the core puzzle loop.
//! Keeping them together ensures gameplay can only be adjusted via code
//! changes reviewed in version control; the configuration layer may override
//! a subset of them per session.

// Logging keys -------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "NORTHSTAR_DEBUG_LOGS";
pub(crate) const LOG_CLUE_SOLVED: &str = "log.clue.solved";
pub(crate) const LOG_CLUE_RELOCATED: &str = "log.clue.relocated";
pub(crate) const LOG_CLUE_RELOCATE_EXHAUSTED: &str = "log.clue.relocate-exhausted";
pub(crate) const LOG_KEY_TAKEN: &str = "log.key.taken";
pub(crate) const LOG_KEEP_LOOKING: &str = "log.key.keep-looking";
pub(crate) const LOG_TRAIL_ADVANCE: &str = "log.trail.advance";
pub(crate) const LOG_LOCK_UNLOCKED: &str = "log.lock.unlocked";
pub(crate) const LOG_LOCK_REJECTED: &str = "log.lock.rejected";
pub(crate) const LOG_LOCKOUT_RESET: &str = "log.lock.lockout-reset";
pub(crate) const LOG_COMPUTER_UNLOCKED: &str = "log.computer.unlocked";
pub(crate) const LOG_VICTORY: &str = "log.victory";

// Puzzle tuning ------------------------------------------------------------
/// Number of concurrently active clue slots.
pub const SLOT_COUNT: usize = 4;

/// Attempts granted to each lock before a security lockout.
pub const START_LOCK_ATTEMPTS: u8 = 3;

/// Remaining-attempt threshold at or below which the keypad shows its hint.
pub const HINT_ATTEMPT_THRESHOLD: u8 = 1;

/// Default unlock code (the year Minnesota entered the Union).
pub const DEFAULT_UNLOCK_CODE: &str = "1858";

/// Default hint surfaced on the keypad once attempts run low.
pub const DEFAULT_CODE_HINT: &str = "A year of beginning.";

/// Default computer terminal password.
pub const DEFAULT_COMPUTER_PASSWORD: &str = "gopher";

/// Default countdown duration, consumed only by the victory directive.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 600;

/// Player inventory capacity.
pub const INVENTORY_SIZE: usize = 3;

/// Default superset of clue-carrying world objects. The door, safe, and
/// computer are special interactables resolved ahead of clue lookup and are
/// deliberately absent so a clue can never land somewhere unreachable.
pub const DEFAULT_LOCATIONS: [&str; 28] = [
    "filing_cabinet_1",
    "filing_cabinet_2",
    "filing_cabinet_3",
    "papers",
    "briefcase",
    "mug",
    "hat",
    "lamp",
    "globe",
    "radio",
    "typewriter",
    "plant",
    "trophy",
    "clock",
    "trash",
    "lunchbox",
    "picture",
    "desk_lamp",
    "cardboard_box",
    "fire_extinguisher",
    "book_cluster_1",
    "book_cluster_2",
    "book_cluster_3",
    "book_cluster_4",
    "keyboard",
    "mouse",
    "open_book",
    "notepad",
];
