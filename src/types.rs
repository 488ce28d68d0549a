//! Core types shared across the crate.

use crate::Rgb;

/// Number of color memory slots. The hardware has exactly four save buttons.
pub const SLOT_COUNT: usize = 4;

/// An identifier for one of the four color memory slots.
///
/// A simple wrapper around a zero-based index that is guaranteed to be in
/// range, so slot lookups never need to fail. User-facing numbering (labels,
/// logs) is 1-based, matching the buttons on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotId(usize);

impl SlotId {
    /// Creates a slot id from a zero-based index.
    ///
    /// Returns `None` if `index` is not below [`SLOT_COUNT`].
    pub fn new(index: usize) -> Option<Self> {
        (index < SLOT_COUNT).then_some(SlotId(index))
    }

    /// Zero-based index, for array addressing.
    pub fn index(self) -> usize {
        self.0
    }

    /// One-based slot number, as printed on the device.
    pub fn number(self) -> usize {
        self.0 + 1
    }

    /// Iterates over all slot ids in order.
    pub fn all() -> impl Iterator<Item = SlotId> {
        (0..SLOT_COUNT).map(SlotId)
    }
}

/// Classification of a completed button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Held for less than the long-press threshold. Recalls a slot.
    Short,
    /// Held for at least the long-press threshold. Saves into a slot.
    Long,
}

/// Channel order expected by the pixel hardware.
///
/// Most WS2812-style strips take green first on the wire. The core reorders
/// channels before handing colors to the [`PixelStrip`](crate::PixelStrip)
/// so that implementations can pass bytes straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    /// Red, green, blue.
    Rgb,
    /// Green, red, blue.
    Grb,
}

impl ColorOrder {
    /// Reorders a color's channels into wire order.
    pub fn apply(self, color: Rgb) -> Rgb {
        match self {
            ColorOrder::Rgb => color,
            ColorOrder::Grb => Rgb::new(color.green, color.red, color.blue),
        }
    }
}
