//! Fixed-capacity player inventory.

use crate::constants::INVENTORY_SIZE;
use serde::{Deserialize, Serialize};

/// A carried item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl Item {
    /// The skeleton key granted by the safe or the hidden-key object.
    #[must_use]
    pub fn skeleton_key() -> Self {
        Self {
            id: "skeleton_key".to_string(),
            name: "Skeleton Key".to_string(),
            icon: "key".to_string(),
            description: "An old iron key. It should fit the exit door.".to_string(),
        }
    }
}

/// Three-slot inventory with single selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: [Option<Item>; INVENTORY_SIZE],
    selected: Option<usize>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: [const { None }; INVENTORY_SIZE],
            selected: None,
        }
    }
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an item in the first free slot. Returns false when full.
    pub fn add(&mut self, item: Item) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                true
            }
            None => false,
        }
    }

    /// Remove the item in a slot, deselecting it if selected.
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        let item = self.slots.get_mut(index)?.take();
        if item.is_some() && self.selected == Some(index) {
            self.selected = None;
        }
        item
    }

    /// Whether any slot holds an item with the given id.
    #[must_use]
    pub fn has(&self, item_id: &str) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|item| item.id == item_id)
    }

    /// Select a slot; selecting it again deselects. Empty slots are ignored.
    pub fn select(&mut self, index: usize) {
        if self.selected == Some(index) {
            self.selected = None;
        } else if self.slots.get(index).is_some_and(Option::is_some) {
            self.selected = Some(index);
        }
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index)?.as_ref()
    }

    /// Drop everything (lockout reset).
    pub fn clear(&mut self) {
        self.slots = [const { None }; INVENTORY_SIZE];
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: "box".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn add_fills_first_free_slot_and_caps_at_capacity() {
        let mut inv = Inventory::new();
        assert!(inv.add(item("a")));
        assert!(inv.add(item("b")));
        assert!(inv.add(item("c")));
        assert!(!inv.add(item("d")));
        assert!(inv.has("a"));
        assert!(!inv.has("d"));

        inv.remove(1);
        assert!(inv.add(item("d")));
        assert_eq!(inv.get(1).unwrap().id, "d");
    }

    #[test]
    fn select_toggles_and_skips_empty_slots() {
        let mut inv = Inventory::new();
        inv.add(item("a"));
        inv.select(0);
        assert_eq!(inv.selected(), Some(0));
        inv.select(0);
        assert_eq!(inv.selected(), None);
        inv.select(2);
        assert_eq!(inv.selected(), None);
    }

    #[test]
    fn remove_deselects_the_removed_slot() {
        let mut inv = Inventory::new();
        inv.add(Item::skeleton_key());
        inv.select(0);
        let removed = inv.remove(0).unwrap();
        assert_eq!(removed.id, "skeleton_key");
        assert_eq!(inv.selected(), None);
        assert!(!inv.has("skeleton_key"));
    }
}
