//! Generic N-attempt code/password verification, reused by the safe keypad,
//! the door keypad, and the computer login.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a lock instance guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockTarget {
    Safe,
    Door,
    Computer,
}

impl LockTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Door => "door",
            Self::Computer => "computer",
        }
    }
}

impl fmt::Display for LockTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a code submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Code matched; the lock is open (terminal).
    Unlocked,
    /// Code mismatched; attempts remain and the buffer was cleared.
    Rejected { attempts_remaining: u8 },
    /// Code mismatched and attempts ran out; caller must perform a full
    /// session reset (terminal until reset).
    LockedOut,
}

/// Per-lock verification state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLock {
    target: LockTarget,
    buffer: String,
    attempts_remaining: u8,
    max_len: usize,
    unlocked: bool,
}

impl CodeLock {
    #[must_use]
    pub const fn new(target: LockTarget, attempts: u8, max_len: usize) -> Self {
        Self {
            target,
            buffer: String::new(),
            attempts_remaining: attempts,
            max_len,
            unlocked: false,
        }
    }

    /// Append a digit to the code buffer. No-op once the buffer is at full
    /// length, once unlocked, or for non-decimal input.
    pub fn push_digit(&mut self, digit: u8) {
        if digit > 9 || self.unlocked || self.buffer.len() >= self.max_len {
            return;
        }
        self.buffer.push((b'0' + digit) as char);
    }

    /// Empty the code buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Compare the buffered code against `expected`. Exact string equality;
    /// no numeric normalization beyond the fixed width.
    pub fn submit(&mut self, expected: &str) -> SubmitOutcome {
        let candidate = std::mem::take(&mut self.buffer);
        self.verify(&candidate, expected)
    }

    /// Compare a free-form password against `expected`, bypassing the digit
    /// buffer. Used by the computer login.
    pub fn submit_password(&mut self, candidate: &str, expected: &str) -> SubmitOutcome {
        self.buffer.clear();
        self.verify(candidate, expected)
    }

    fn verify(&mut self, candidate: &str, expected: &str) -> SubmitOutcome {
        if candidate == expected {
            self.unlocked = true;
            return SubmitOutcome::Unlocked;
        }
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        if self.attempts_remaining == 0 {
            SubmitOutcome::LockedOut
        } else {
            SubmitOutcome::Rejected {
                attempts_remaining: self.attempts_remaining,
            }
        }
    }

    /// Restore the lock to its starting state with a fresh attempt count.
    pub fn reset(&mut self, attempts: u8) {
        self.buffer.clear();
        self.attempts_remaining = attempts;
        self.unlocked = false;
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Buffer padded to full length for display, e.g. `18__`.
    #[must_use]
    pub fn display(&self) -> String {
        let mut out = self.buffer.clone();
        while out.len() < self.max_len {
            out.push('_');
        }
        out
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.buffer.len() == self.max_len
    }

    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    #[must_use]
    pub const fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    #[must_use]
    pub const fn target(&self) -> LockTarget {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_caps_at_max_length_and_rejects_non_digits() {
        let mut lock = CodeLock::new(LockTarget::Safe, 3, 4);
        for digit in [1, 8, 5, 8, 9] {
            lock.push_digit(digit);
        }
        lock.push_digit(12);
        assert_eq!(lock.buffer(), "1858");
        assert!(lock.is_complete());
        lock.clear();
        assert_eq!(lock.display(), "____");
    }

    #[test]
    fn correct_code_unlocks() {
        let mut lock = CodeLock::new(LockTarget::Safe, 3, 4);
        for digit in [1, 8, 5, 8] {
            lock.push_digit(digit);
        }
        assert_eq!(lock.submit("1858"), SubmitOutcome::Unlocked);
        assert!(lock.is_unlocked());
        assert_eq!(lock.attempts_remaining(), 3);
    }

    #[test]
    fn attempts_decrease_monotonically_until_lockout() {
        let mut lock = CodeLock::new(LockTarget::Door, 3, 4);
        for expected_remaining in [2, 1] {
            for digit in [0, 0, 0, 0] {
                lock.push_digit(digit);
            }
            assert_eq!(
                lock.submit("1858"),
                SubmitOutcome::Rejected {
                    attempts_remaining: expected_remaining
                }
            );
            assert_eq!(lock.buffer(), "");
        }
        for digit in [0, 0, 0, 0] {
            lock.push_digit(digit);
        }
        assert_eq!(lock.submit("1858"), SubmitOutcome::LockedOut);

        lock.reset(3);
        assert_eq!(lock.attempts_remaining(), 3);
        assert_eq!(lock.buffer(), "");
        assert!(!lock.is_unlocked());
    }

    #[test]
    fn password_submission_shares_attempt_semantics() {
        let mut lock = CodeLock::new(LockTarget::Computer, 2, 4);
        assert_eq!(
            lock.submit_password("letmein", "gopher"),
            SubmitOutcome::Rejected {
                attempts_remaining: 1
            }
        );
        assert_eq!(lock.submit_password("gopher", "gopher"), SubmitOutcome::Unlocked);
    }

    #[test]
    fn unlocked_lock_ignores_further_digits() {
        let mut lock = CodeLock::new(LockTarget::Safe, 3, 4);
        for digit in [1, 8, 5, 8] {
            lock.push_digit(digit);
        }
        lock.submit("1858");
        lock.push_digit(7);
        assert_eq!(lock.buffer(), "");
    }
}
