//! Clue placement engine.
//!
//! Maps the active clue slots onto randomly chosen world-object locations and
//! keeps two invariants at all times: every slot index appears at exactly one
//! location, and no two slots share a question index. Wrong answers relocate
//! a single slot to a fresh empty location with a fresh unused question.

use crate::config::ConfigError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// One active clue slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueSlot {
    /// Digit revealed when the slot's question is answered correctly.
    pub digit: u8,
    /// Index into the question bank. Unique across live slots.
    pub question_index: usize,
    pub solved: bool,
}

/// Inline storage for the four concurrent slots.
pub type SlotSet = SmallVec<[ClueSlot; 4]>;

/// Location map plus slot ledger, owned by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    locations: Vec<String>,
    map: HashMap<String, Option<usize>>,
    slots: SlotSet,
    digits: SmallVec<[u8; 4]>,
    pool_len: usize,
}

impl Placement {
    /// Build and initialize a placement.
    ///
    /// `digits` carries one revealed digit per slot, so `digits.len()` fixes
    /// the slot count. `pool_len` is the question bank size.
    ///
    /// # Errors
    ///
    /// Fails when the location set or question pool is too small to uphold
    /// the placement invariants, or when location names collide.
    pub fn new<R: Rng>(
        locations: Vec<String>,
        digits: &[u8],
        pool_len: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let slot_count = digits.len();
        if slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        if pool_len < slot_count {
            return Err(ConfigError::NotEnoughQuestions {
                pool: pool_len,
                slots: slot_count,
            });
        }
        if locations.len() < slot_count {
            return Err(ConfigError::NotEnoughLocations {
                available: locations.len(),
                slots: slot_count,
            });
        }
        for (i, name) in locations.iter().enumerate() {
            if locations[..i].iter().any(|other| other == name) {
                return Err(ConfigError::DuplicateLocation { name: name.clone() });
            }
        }

        let mut placement = Self {
            map: locations.iter().map(|loc| (loc.clone(), None)).collect(),
            locations,
            slots: SlotSet::new(),
            digits: SmallVec::from_slice(digits),
            pool_len,
        };
        placement.initialize(rng);
        Ok(placement)
    }

    /// Re-shuffle every slot onto a fresh location with a fresh question and
    /// clear all solved flags. Called at construction and on lockout reset.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) {
        for value in self.map.values_mut() {
            *value = None;
        }

        let mut shuffled = self.locations.clone();
        shuffled.shuffle(rng);

        let slot_count = self.digits.len();
        let chosen = rand::seq::index::sample(rng, self.pool_len, slot_count);
        self.slots = self
            .digits
            .iter()
            .zip(chosen.iter())
            .map(|(digit, question_index)| ClueSlot {
                digit: *digit,
                question_index,
                solved: false,
            })
            .collect();

        for (slot_index, location) in shuffled.iter().take(slot_count).enumerate() {
            if let Some(entry) = self.map.get_mut(location) {
                *entry = Some(slot_index);
            }
        }
    }

    /// Move a slot out of `vacated` into a uniformly chosen empty location
    /// and swap its question for an unused one. Returns the new location, or
    /// `None` when every other location is occupied (degraded mode: the clue
    /// stays put).
    pub fn relocate<R: Rng>(
        &mut self,
        slot_index: usize,
        vacated: &str,
        rng: &mut R,
    ) -> Option<String> {
        if slot_index >= self.slots.len() {
            return None;
        }
        let empty: Vec<&String> = self
            .locations
            .iter()
            .filter(|loc| loc.as_str() != vacated && self.map.get(*loc) == Some(&None))
            .collect();
        if empty.is_empty() {
            return None;
        }
        let new_location = empty[rng.gen_range(0..empty.len())].clone();

        if let Some(entry) = self.map.get_mut(&new_location) {
            *entry = Some(slot_index);
        }
        if let Some(entry) = self.map.get_mut(vacated) {
            *entry = None;
        }

        // Fresh question, never one already live on a slot. When the pool is
        // exhausted the slot keeps its previous question.
        let unused: Vec<usize> = (0..self.pool_len)
            .filter(|idx| self.slots.iter().all(|slot| slot.question_index != *idx))
            .collect();
        if !unused.is_empty() {
            self.slots[slot_index].question_index = unused[rng.gen_range(0..unused.len())];
        }

        Some(new_location)
    }

    /// Mark a slot solved. Idempotent; returns true when the flag flipped.
    pub fn mark_solved(&mut self, slot_index: usize) -> bool {
        match self.slots.get_mut(slot_index) {
            Some(slot) if !slot.solved => {
                slot.solved = true;
                true
            }
            _ => false,
        }
    }

    /// Slot index carried by a location, if any.
    #[must_use]
    pub fn slot_at(&self, location: &str) -> Option<usize> {
        self.map.get(location).copied().flatten()
    }

    /// Current location of a slot.
    #[must_use]
    pub fn location_of(&self, slot_index: usize) -> Option<&str> {
        self.map
            .iter()
            .find(|(_, value)| **value == Some(slot_index))
            .map(|(location, _)| location.as_str())
    }

    #[must_use]
    pub fn slot(&self, slot_index: usize) -> Option<&ClueSlot> {
        self.slots.get(slot_index)
    }

    #[must_use]
    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.solved).count()
    }

    #[must_use]
    pub fn all_solved(&self) -> bool {
        self.slots.iter().all(|slot| slot.solved)
    }

    /// Digits revealed so far, sorted ascending so display order leaks
    /// nothing about slot order.
    #[must_use]
    pub fn collected_digits(&self) -> Vec<u8> {
        let mut digits: Vec<u8> = self
            .slots
            .iter()
            .filter(|slot| slot.solved)
            .map(|slot| slot.digit)
            .collect();
        digits.sort_unstable();
        digits
    }

    #[must_use]
    pub fn is_location(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of locations currently holding no clue.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.map.values().filter(|value| value.is_none()).count()
    }
}
