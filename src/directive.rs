//! Declarative UI directives.
//!
//! The core never touches presentation. Every interaction entry point returns
//! one of these values; the external modal renderer displays it and routes
//! the player's choice back through the session's entry points.

use crate::lock::LockTarget;
use serde::{Deserialize, Serialize};

/// Instruction for the external modal renderer. The renderer is a dumb
/// consumer: it shows titles, bodies, and options, and never makes puzzle
/// decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiDirective {
    /// Descriptive text for an object holding no clue.
    Flavor { title: String, body: String },
    /// An unsolved clue: render the question and its four options. The
    /// renderer reports the chosen option index via `submit_answer`.
    Question {
        slot_index: usize,
        location: String,
        topic: String,
        prompt: String,
        options: [String; 4],
    },
    /// A previously solved clue.
    AlreadySolved {
        body: String,
        /// Revealed digit, present in digit-collecting modes.
        digit: Option<u8>,
    },
    /// Feedback after an answer submission.
    AnswerFeedback {
        correct: bool,
        body: String,
        /// Revealed digit on success in digit-collecting modes.
        digit: Option<u8>,
        /// Whether the clue moved to a new location.
        relocated: bool,
    },
    /// Interaction refused: body explains what must happen first.
    LockedMessage { title: String, body: String },
    /// Keypad state for the safe or door lock.
    Keypad {
        target: LockTarget,
        /// Buffer padded for display, e.g. `18__`.
        buffer: String,
        attempts_remaining: u8,
        /// Digits collected so far, sorted ascending.
        collected_digits: Vec<u8>,
        /// False until every slot is solved; digit entry is refused before.
        enabled: bool,
        /// Configured hint, present once attempts run low.
        hint: Option<String>,
        /// Set after a rejected code.
        message: Option<String>,
    },
    /// Computer login prompt.
    PasswordPrompt {
        attempts_remaining: u8,
        /// Set after a rejected password.
        denied: bool,
    },
    /// Terminal win screen.
    Victory { countdown_secs: u32 },
    /// Security lockout: clues relocated, codes reset.
    Reset { body: String },
}

impl UiDirective {
    /// Short tag for ledger entries and debug output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Flavor { .. } => "flavor",
            Self::Question { .. } => "question",
            Self::AlreadySolved { .. } => "already_solved",
            Self::AnswerFeedback { .. } => "answer_feedback",
            Self::LockedMessage { .. } => "locked_message",
            Self::Keypad { .. } => "keypad",
            Self::PasswordPrompt { .. } => "password_prompt",
            Self::Victory { .. } => "victory",
            Self::Reset { .. } => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_serialize_with_kind_tag() {
        let directive = UiDirective::Keypad {
            target: LockTarget::Safe,
            buffer: "18__".to_string(),
            attempts_remaining: 3,
            collected_digits: vec![1, 5, 8, 8],
            enabled: true,
            hint: None,
            message: None,
        };
        let json = serde_json::to_string(&directive).unwrap();
        assert!(json.contains(r#""kind":"keypad""#));
        assert!(json.contains(r#""target":"safe""#));
        assert_eq!(directive.kind(), "keypad");
    }
}
