//! Saved color slots.

use crate::types::{SlotId, SLOT_COUNT};
use crate::{Rgb, COLOR_BLACK};

/// Storage for the four saved colors.
///
/// Slots start black and are only ever overwritten, never deleted; an
/// unwritten slot is indistinguishable from one saved as black, which is
/// exactly how the device treats it. Slots are independent: writing one
/// never affects another. The visual echo of a save (indicator circle, slot
/// pixel) belongs to the render sink, which repaints from this store within
/// the same render tick as the write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStore {
    slots: [Rgb; SLOT_COUNT],
}

impl SlotStore {
    /// Creates a store with all slots black.
    pub fn new() -> Self {
        Self {
            slots: [COLOR_BLACK; SLOT_COUNT],
        }
    }

    /// Overwrites a slot unconditionally. No confirmation, no undo.
    pub fn save(&mut self, slot: SlotId, color: Rgb) {
        self.slots[slot.index()] = color;
    }

    /// Reads a slot's color. Black if never written.
    pub fn read(&self, slot: SlotId) -> Rgb {
        self.slots[slot.index()]
    }

    /// Iterates over all slots in order with their colors.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, Rgb)> + '_ {
        SlotId::all().map(|slot| (slot, self.read(slot)))
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}
