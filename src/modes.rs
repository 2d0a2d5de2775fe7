//! Game mode controller: per-mode win conditions and interaction gating.

use crate::lock::LockTarget;
use crate::placement::ClueSlot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Win-condition policy, selected once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Collect four digits, open the safe, take the skeleton key.
    #[default]
    Classic,
    /// Every solved clue is an access card; four cards open the door.
    AccessCards,
    /// Clues must be solved in slot order; step four opens the door.
    Trail,
    /// One fixed object hides the key; answering correctly there wins it.
    HiddenKey,
    /// The safe is dead and the keypad code opens the door directly.
    CodeDoor,
}

impl GameMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::AccessCards => "access_cards",
            Self::Trail => "trail",
            Self::HiddenKey => "hidden_key",
            Self::CodeDoor => "code_door",
        }
    }

    /// Which lock the mode's keypad drives, if the mode has one.
    #[must_use]
    pub const fn keypad_target(self) -> Option<LockTarget> {
        match self {
            Self::Classic => Some(LockTarget::Safe),
            Self::CodeDoor => Some(LockTarget::Door),
            Self::AccessCards | Self::Trail | Self::HiddenKey => None,
        }
    }

    /// Whether solved clues reveal code digits in this mode.
    #[must_use]
    pub const fn collects_digits(self) -> bool {
        matches!(self, Self::Classic | Self::CodeDoor)
    }

    /// Whether a wrong answer relocates the clue. The hidden key stays put so
    /// the winning object remains reachable.
    #[must_use]
    pub const fn relocates_on_miss(self) -> bool {
        !matches!(self, Self::HiddenKey)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "access_cards" => Ok(Self::AccessCards),
            "trail" => Ok(Self::Trail),
            "hidden_key" => Ok(Self::HiddenKey),
            "code_door" => Ok(Self::CodeDoor),
            _ => Err(()),
        }
    }
}

/// Session-wide boolean and counter state owned by the mediator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionFlags {
    pub has_skeleton_key: bool,
    pub game_won: bool,
    /// Next trail slot to solve. Meaningful only in `trail` mode.
    pub trail_step: usize,
    /// Fixed winning object. Meaningful only in `hidden_key` mode.
    pub winning_object: Option<String>,
    pub computer_unlocked: bool,
}

/// The single exit predicate: can the door open right now.
#[must_use]
pub fn exit_unlockable(mode: GameMode, flags: &SessionFlags, slots: &[ClueSlot]) -> bool {
    match mode {
        GameMode::Classic | GameMode::HiddenKey => flags.has_skeleton_key,
        GameMode::AccessCards => slots.iter().filter(|slot| slot.solved).count() == slots.len(),
        GameMode::Trail => flags.trail_step >= slots.len(),
        // The door keypad itself sets game_won on a correct entry.
        GameMode::CodeDoor => flags.game_won,
    }
}

/// Trail-mode gate for a clue-carrying object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailGate {
    /// The slot the player must solve next.
    Ready,
    /// Ahead of the current step; earlier steps must be solved first.
    Locked,
    /// Behind the current step; already completed.
    Completed,
}

#[must_use]
pub const fn trail_gate(slot_index: usize, trail_step: usize) -> TrailGate {
    if slot_index > trail_step {
        TrailGate::Locked
    } else if slot_index < trail_step {
        TrailGate::Completed
    } else {
        TrailGate::Ready
    }
}
