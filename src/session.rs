//! Interaction mediator.
//!
//! `PuzzleSession` owns all mutable puzzle state for one playthrough and
//! mediates between the input/render layer and the placement engine, mode
//! controller, and locks. Every entry point runs synchronously on the calling
//! thread and returns a declarative [`UiDirective`] for the external modal
//! renderer.

use crate::config::{ConfigError, GameConfig};
use crate::constants::{
    HINT_ATTEMPT_THRESHOLD, LOG_CLUE_RELOCATED, LOG_CLUE_RELOCATE_EXHAUSTED,
    LOG_CLUE_SOLVED, LOG_COMPUTER_UNLOCKED, LOG_KEEP_LOOKING, LOG_KEY_TAKEN, LOG_LOCKOUT_RESET,
    LOG_LOCK_REJECTED, LOG_LOCK_UNLOCKED, LOG_TRAIL_ADVANCE, LOG_VICTORY,
};
use crate::directive::UiDirective;
use crate::flavor::{FlavorTable, display_name};
use crate::inventory::{Inventory, Item};
use crate::lock::{CodeLock, LockTarget, SubmitOutcome};
use crate::modes::{GameMode, SessionFlags, TrailGate, exit_unlockable, trail_gate};
use crate::placement::Placement;
use crate::questions::{QuestionBank, QuestionError};
use crate::rng::RngBundle;
use crate::seed::encode_friendly;
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;

const DOOR_NAME: &str = "door";
const SAFE_NAME: &str = "safe";
const COMPUTER_NAME: &str = "computer";

/// How a world object resolves, decided once at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractableKind {
    Door,
    Safe,
    Computer,
    /// Anything else: clue lookup, then flavor text.
    Generic,
}

/// Player input rejected at the mediator boundary. No state was mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("answer option {index} out of range, must be 0..=3")]
    AnswerOutOfRange { index: usize },
    #[error("clue slot {index} out of range")]
    SlotOutOfRange { index: usize },
    #[error("location '{location}' does not carry slot {slot_index}")]
    LocationMismatch { location: String, slot_index: usize },
    #[error("keypad digit {digit} out of range, must be 0..=9")]
    InvalidDigit { digit: u8 },
    #[error("code buffer holds {len} of {expected} digits")]
    IncompleteCode { len: usize, expected: usize },
    #[error("mode {mode} has no keypad")]
    KeypadUnavailable { mode: GameMode },
    #[error(transparent)]
    Question(#[from] QuestionError),
}

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(crate::constants::DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// One playthrough's worth of puzzle state.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    cfg: GameConfig,
    mode: GameMode,
    seed: u64,
    bank: QuestionBank,
    placement: Placement,
    flags: SessionFlags,
    safe_lock: CodeLock,
    door_lock: CodeLock,
    computer_lock: CodeLock,
    kinds: HashMap<String, InteractableKind>,
    flavor: FlavorTable,
    inventory: Inventory,
    rng: RngBundle,
    interacting: bool,
    logs: Vec<String>,
}

impl PuzzleSession {
    /// Construct and initialize a session. This is the only place
    /// configuration errors surface; afterwards the placement invariants are
    /// guaranteed for every reachable state.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the location set, question pool, or unlock
    /// code cannot uphold the placement invariants.
    pub fn new(
        cfg: GameConfig,
        mode: GameMode,
        seed: u64,
        bank: QuestionBank,
    ) -> Result<Self, ConfigError> {
        cfg.validate(bank.len())?;
        let rng = RngBundle::from_user_seed(seed);
        let digits = cfg.code_digits();
        let placement = Placement::new(
            cfg.locations.clone(),
            &digits,
            bank.len(),
            &mut *rng.placement(),
        )?;

        let mut kinds: HashMap<String, InteractableKind> = cfg
            .locations
            .iter()
            .map(|loc| (loc.clone(), InteractableKind::Generic))
            .collect();
        kinds.insert(DOOR_NAME.to_string(), InteractableKind::Door);
        kinds.insert(SAFE_NAME.to_string(), InteractableKind::Safe);
        kinds.insert(COMPUTER_NAME.to_string(), InteractableKind::Computer);

        let attempts = cfg.lock_attempts;
        let code_len = cfg.unlock_code.len();
        let mut session = Self {
            safe_lock: CodeLock::new(LockTarget::Safe, attempts, code_len),
            door_lock: CodeLock::new(LockTarget::Door, attempts, code_len),
            computer_lock: CodeLock::new(LockTarget::Computer, attempts, code_len),
            cfg,
            mode,
            seed,
            bank,
            placement,
            flags: SessionFlags::default(),
            kinds,
            flavor: FlavorTable::new(),
            inventory: Inventory::new(),
            rng,
            interacting: false,
            logs: Vec::new(),
        };
        session.roll_winning_object();
        Ok(session)
    }

    /// Entry point for a world-object activation. Returns `None` while a
    /// modal is open or after victory; the input layer must not dispatch
    /// then, and this guard makes re-entry harmless if it does.
    pub fn on_interact(&mut self, name: &str) -> Option<UiDirective> {
        if self.interacting || self.flags.game_won {
            return None;
        }
        let directive = match self.kind_of(name) {
            InteractableKind::Door => self.interact_door(),
            InteractableKind::Safe => self.interact_safe(),
            InteractableKind::Computer => self.interact_computer(),
            InteractableKind::Generic => self.interact_object(name),
        };
        self.interacting = true;
        Some(directive)
    }

    /// The renderer closed the modal; interaction may resume.
    pub fn close_modal(&mut self) {
        self.interacting = false;
    }

    /// Judge an answer to the question carried by `location`.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range options and slots, and locations that do not
    /// carry the named slot, without mutating any state.
    pub fn submit_answer(
        &mut self,
        slot_index: usize,
        option_index: usize,
        location: &str,
    ) -> Result<UiDirective, InputError> {
        if option_index > 3 {
            return Err(InputError::AnswerOutOfRange {
                index: option_index,
            });
        }
        let slot = *self
            .placement
            .slot(slot_index)
            .ok_or(InputError::SlotOutOfRange { index: slot_index })?;
        if self.placement.slot_at(location) != Some(slot_index) {
            return Err(InputError::LocationMismatch {
                location: location.to_string(),
                slot_index,
            });
        }
        // A stale directive must not skip the trail order; the gate holds at
        // the submission boundary, not just at interaction time.
        if self.mode == GameMode::Trail {
            match trail_gate(slot_index, self.flags.trail_step) {
                TrailGate::Locked => {
                    return Ok(UiDirective::LockedMessage {
                        title: display_name(location),
                        body: "Locked. Solve the earlier steps of the trail first.".to_string(),
                    });
                }
                TrailGate::Completed => {
                    return Ok(UiDirective::AlreadySolved {
                        body: "Already completed.".to_string(),
                        digit: None,
                    });
                }
                TrailGate::Ready => {}
            }
        }
        let correct_index = self.bank.get(slot.question_index)?.correct_index;

        if option_index == correct_index {
            Ok(self.answer_correct(slot_index, slot.digit, location))
        } else {
            Ok(self.answer_wrong(slot_index, location))
        }
    }

    /// Press a keypad digit. Refused (without error) until every clue is
    /// solved in digit-collecting modes.
    ///
    /// # Errors
    ///
    /// Rejects non-decimal digits and modes without a keypad.
    pub fn keypad_press(&mut self, digit: u8) -> Result<UiDirective, InputError> {
        if digit > 9 {
            return Err(InputError::InvalidDigit { digit });
        }
        let target = self.keypad_target()?;
        if self.placement.all_solved() {
            self.lock_mut(target).push_digit(digit);
        }
        Ok(self.keypad_directive(target, None))
    }

    /// Clear the keypad buffer.
    ///
    /// # Errors
    ///
    /// Rejects modes without a keypad.
    pub fn keypad_clear(&mut self) -> Result<UiDirective, InputError> {
        let target = self.keypad_target()?;
        self.lock_mut(target).clear();
        Ok(self.keypad_directive(target, None))
    }

    /// Submit the buffered keypad code.
    ///
    /// # Errors
    ///
    /// Rejects incomplete buffers (re-prompt, no attempt consumed) and modes
    /// without a keypad.
    pub fn keypad_submit(&mut self) -> Result<UiDirective, InputError> {
        let target = self.keypad_target()?;
        if !self.placement.all_solved() {
            return Ok(
                self.keypad_directive(target, Some("LOCK DISABLED. MISSING DATA.".to_string()))
            );
        }
        let lock = self.lock(target);
        if !lock.is_complete() {
            return Err(InputError::IncompleteCode {
                len: lock.buffer().len(),
                expected: self.cfg.unlock_code.len(),
            });
        }
        let expected = self.cfg.unlock_code.clone();
        match self.lock_mut(target).submit(&expected) {
            SubmitOutcome::Unlocked => {
                self.log(LOG_LOCK_UNLOCKED);
                match target {
                    LockTarget::Safe => {
                        self.grant_skeleton_key();
                        Ok(UiDirective::Flavor {
                            title: "SAFE UNLOCKED".to_string(),
                            body: "The safe opens. Inside, you find an old skeleton key."
                                .to_string(),
                        })
                    }
                    LockTarget::Door | LockTarget::Computer => Ok(self.victory()),
                }
            }
            SubmitOutcome::Rejected { .. } => {
                self.log(LOG_LOCK_REJECTED);
                Ok(self.keypad_directive(target, Some("INVALID CODE".to_string())))
            }
            SubmitOutcome::LockedOut => Ok(self.lockout_reset()),
        }
    }

    /// Attempt the computer login. Success surfaces the topics of the live
    /// questions as a hint; lockout triggers the full session reset.
    pub fn submit_password(&mut self, candidate: &str) -> UiDirective {
        if self.computer_lock.is_unlocked() {
            return self.terminal_hint();
        }
        let expected = self.cfg.computer_password.clone();
        match self.computer_lock.submit_password(candidate, &expected) {
            SubmitOutcome::Unlocked => {
                self.flags.computer_unlocked = true;
                self.log(LOG_COMPUTER_UNLOCKED);
                self.terminal_hint()
            }
            SubmitOutcome::Rejected { attempts_remaining } => {
                self.log(LOG_LOCK_REJECTED);
                UiDirective::PasswordPrompt {
                    attempts_remaining,
                    denied: true,
                }
            }
            SubmitOutcome::LockedOut => self.lockout_reset(),
        }
    }

    /// Whether the exit door can open right now.
    #[must_use]
    pub fn exit_unlockable(&self) -> bool {
        exit_unlockable(self.mode, &self.flags, self.placement.slots())
    }

    /// Full session reset: fresh placement, locks, flags, and inventory.
    /// Atomic with respect to the single-threaded event model; state is fully
    /// re-initialized before control returns to the caller.
    pub fn reset(&mut self) {
        self.placement.initialize(&mut *self.rng.placement());
        self.flags = SessionFlags::default();
        let attempts = self.cfg.lock_attempts;
        self.safe_lock.reset(attempts);
        self.door_lock.reset(attempts);
        self.computer_lock.reset(attempts);
        self.inventory.clear();
        self.roll_winning_object();
        self.log(LOG_LOCKOUT_RESET);
    }

    /// Friendly share code reproducing this session's mode and seed.
    #[must_use]
    pub fn share_code(&self) -> String {
        encode_friendly(self.mode, self.seed)
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn flags(&self) -> &SessionFlags {
        &self.flags
    }

    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }

    #[must_use]
    pub const fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub const fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    #[must_use]
    pub const fn is_interacting(&self) -> bool {
        self.interacting
    }

    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Kind assigned to a world object at registration; unknown names resolve
    /// as generic (flavor-only) objects, never a hard failure.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> InteractableKind {
        self.kinds
            .get(name)
            .copied()
            .unwrap_or(InteractableKind::Generic)
    }

    fn interact_door(&mut self) -> UiDirective {
        if self.exit_unlockable() {
            return self.victory();
        }
        match self.mode {
            GameMode::CodeDoor => {
                self.door_lock.clear();
                self.keypad_directive(LockTarget::Door, None)
            }
            GameMode::AccessCards => UiDirective::LockedMessage {
                title: "ACCESS DENIED".to_string(),
                body: format!(
                    "{} of {} access cards scanned.",
                    self.placement.solved_count(),
                    self.placement.slot_count()
                ),
            },
            GameMode::Trail => UiDirective::LockedMessage {
                title: "SEALED".to_string(),
                body: format!(
                    "The trail is incomplete. Step {} of {}.",
                    self.flags.trail_step,
                    self.placement.slot_count()
                ),
            },
            GameMode::Classic | GameMode::HiddenKey => UiDirective::LockedMessage {
                title: "LOCKED".to_string(),
                body: "The door is locked tight. It requires a specific key.".to_string(),
            },
        }
    }

    fn interact_safe(&mut self) -> UiDirective {
        match self.mode {
            GameMode::Classic => {
                self.safe_lock.clear();
                self.keypad_directive(LockTarget::Safe, None)
            }
            GameMode::CodeDoor => UiDirective::Flavor {
                title: "SAFE".to_string(),
                body: "It's locked. The keypad seems broken or disabled. \
                       Maybe the code is for the door?"
                    .to_string(),
            },
            GameMode::AccessCards | GameMode::Trail | GameMode::HiddenKey => UiDirective::Flavor {
                title: display_name(SAFE_NAME),
                body: self.flavor.next(SAFE_NAME),
            },
        }
    }

    fn interact_computer(&mut self) -> UiDirective {
        if self.computer_lock.is_unlocked() {
            self.terminal_hint()
        } else {
            UiDirective::PasswordPrompt {
                attempts_remaining: self.computer_lock.attempts_remaining(),
                denied: false,
            }
        }
    }

    fn interact_object(&mut self, name: &str) -> UiDirective {
        let Some(slot_index) = self.placement.slot_at(name) else {
            return UiDirective::Flavor {
                title: display_name(name),
                body: self.flavor.next(name),
            };
        };

        if self.mode == GameMode::Trail {
            match trail_gate(slot_index, self.flags.trail_step) {
                TrailGate::Locked => {
                    return UiDirective::LockedMessage {
                        title: display_name(name),
                        body: "Locked. Solve the earlier steps of the trail first.".to_string(),
                    };
                }
                TrailGate::Completed => {
                    return UiDirective::AlreadySolved {
                        body: "Already completed.".to_string(),
                        digit: None,
                    };
                }
                TrailGate::Ready => {}
            }
        }

        let Some(slot) = self.placement.slot(slot_index).copied() else {
            return UiDirective::Flavor {
                title: display_name(name),
                body: self.flavor.next(name),
            };
        };

        if slot.solved {
            let digit = self.mode.collects_digits().then_some(slot.digit);
            let body = match self.mode {
                GameMode::AccessCards => "Access card already collected here.".to_string(),
                _ => match self.bank.get(slot.question_index) {
                    Ok(question) => question.prompt.clone(),
                    Err(_) => "Already solved.".to_string(),
                },
            };
            return UiDirective::AlreadySolved { body, digit };
        }

        match self.bank.get(slot.question_index) {
            Ok(question) => UiDirective::Question {
                slot_index,
                location: name.to_string(),
                topic: question.topic.clone(),
                prompt: question.prompt.clone(),
                options: question.options.clone(),
            },
            // The bank cannot shrink mid-session, but an inconsistency here
            // must degrade to flavor rather than crash the input layer.
            Err(_) => UiDirective::Flavor {
                title: display_name(name),
                body: self.flavor.next(name),
            },
        }
    }

    fn answer_correct(&mut self, slot_index: usize, digit: u8, location: &str) -> UiDirective {
        match self.mode {
            GameMode::HiddenKey => {
                if self.flags.winning_object.as_deref() == Some(location) {
                    self.grant_skeleton_key();
                    UiDirective::AnswerFeedback {
                        correct: true,
                        body: "Correct! Taped behind it you find an old skeleton key."
                            .to_string(),
                        digit: None,
                        relocated: false,
                    }
                } else {
                    self.log(LOG_KEEP_LOOKING);
                    UiDirective::AnswerFeedback {
                        correct: true,
                        body: "Correct, but there's no key here. Keep looking.".to_string(),
                        digit: None,
                        relocated: false,
                    }
                }
            }
            GameMode::Trail => {
                self.placement.mark_solved(slot_index);
                self.flags.trail_step += 1;
                self.log(LOG_TRAIL_ADVANCE);
                let body = if self.flags.trail_step == self.placement.slot_count() {
                    "Correct! The trail is complete. The exit will open.".to_string()
                } else {
                    format!(
                        "Correct! The trail continues. Step {} of {}.",
                        self.flags.trail_step,
                        self.placement.slot_count()
                    )
                };
                UiDirective::AnswerFeedback {
                    correct: true,
                    body,
                    digit: None,
                    relocated: false,
                }
            }
            GameMode::AccessCards => {
                self.placement.mark_solved(slot_index);
                self.log(LOG_CLUE_SOLVED);
                UiDirective::AnswerFeedback {
                    correct: true,
                    body: format!(
                        "Correct! Access card acquired ({} of {}).",
                        self.placement.solved_count(),
                        self.placement.slot_count()
                    ),
                    digit: None,
                    relocated: false,
                }
            }
            GameMode::Classic | GameMode::CodeDoor => {
                self.placement.mark_solved(slot_index);
                self.log(LOG_CLUE_SOLVED);
                UiDirective::AnswerFeedback {
                    correct: true,
                    body: format!("Correct! You found a number: {digit}"),
                    digit: Some(digit),
                    relocated: false,
                }
            }
        }
    }

    fn answer_wrong(&mut self, slot_index: usize, location: &str) -> UiDirective {
        if !self.mode.relocates_on_miss() {
            return UiDirective::AnswerFeedback {
                correct: false,
                body: "Wrong. The object sits unchanged.".to_string(),
                digit: None,
                relocated: false,
            };
        }
        let moved = self
            .placement
            .relocate(slot_index, location, &mut *self.rng.placement());
        if moved.is_some() {
            self.log(LOG_CLUE_RELOCATED);
            UiDirective::AnswerFeedback {
                correct: false,
                body: "Wrong! The clue has vanished. You must find it again elsewhere."
                    .to_string(),
                digit: None,
                relocated: true,
            }
        } else {
            self.log(LOG_CLUE_RELOCATE_EXHAUSTED);
            UiDirective::AnswerFeedback {
                correct: false,
                body: "Wrong! The clue rattles but stays where it is.".to_string(),
                digit: None,
                relocated: false,
            }
        }
    }

    fn keypad_target(&self) -> Result<LockTarget, InputError> {
        self.mode
            .keypad_target()
            .ok_or(InputError::KeypadUnavailable { mode: self.mode })
    }

    fn lock(&self, target: LockTarget) -> &CodeLock {
        match target {
            LockTarget::Safe => &self.safe_lock,
            LockTarget::Door => &self.door_lock,
            LockTarget::Computer => &self.computer_lock,
        }
    }

    fn lock_mut(&mut self, target: LockTarget) -> &mut CodeLock {
        match target {
            LockTarget::Safe => &mut self.safe_lock,
            LockTarget::Door => &mut self.door_lock,
            LockTarget::Computer => &mut self.computer_lock,
        }
    }

    fn keypad_directive(&self, target: LockTarget, message: Option<String>) -> UiDirective {
        let lock = self.lock(target);
        let enabled = self.placement.all_solved();
        let hint = (enabled && lock.attempts_remaining() <= HINT_ATTEMPT_THRESHOLD)
            .then(|| self.cfg.code_hint.clone());
        UiDirective::Keypad {
            target,
            buffer: lock.display(),
            attempts_remaining: lock.attempts_remaining(),
            collected_digits: self.placement.collected_digits(),
            enabled,
            hint,
            message,
        }
    }

    fn terminal_hint(&self) -> UiDirective {
        let topics: Vec<&str> = self
            .placement
            .slots()
            .iter()
            .filter(|slot| !slot.solved)
            .filter_map(|slot| self.bank.get(slot.question_index).ok())
            .map(|question| question.topic.as_str())
            .collect();
        let body = if topics.is_empty() {
            "ARCHIVE TERMINAL. All dossiers closed.".to_string()
        } else {
            format!("ARCHIVE TERMINAL. Active dossiers: {}.", topics.join(", "))
        };
        UiDirective::Flavor {
            title: "TERMINAL".to_string(),
            body,
        }
    }

    fn grant_skeleton_key(&mut self) {
        self.flags.has_skeleton_key = true;
        self.inventory.add(Item::skeleton_key());
        self.log(LOG_KEY_TAKEN);
    }

    fn victory(&mut self) -> UiDirective {
        self.flags.game_won = true;
        self.log(LOG_VICTORY);
        UiDirective::Victory {
            countdown_secs: self.cfg.countdown_secs,
        }
    }

    fn lockout_reset(&mut self) -> UiDirective {
        self.reset();
        UiDirective::Reset {
            body: "SECURITY LOCKOUT. Too many failed attempts. \
                   Clues have been relocated. Codes reset."
                .to_string(),
        }
    }

    fn roll_winning_object(&mut self) {
        if self.mode != GameMode::HiddenKey {
            return;
        }
        let slot_count = self.placement.slot_count();
        let pick = self.rng.winning().gen_range(0..slot_count);
        self.flags.winning_object = self
            .placement
            .location_of(pick)
            .map(str::to_string);
    }

    fn log(&mut self, key: &str) {
        if debug_log_enabled() {
            println!("puzzle event | mode:{} {key}", self.mode);
        }
        self.logs.push(key.to_string());
    }
}
