//! Color packing and the startup rainbow wheel.
//!
//! The display capability takes packed 24-bit colors for circle fills and
//! outlines; [`pack`] produces them from the crate's [`Rgb`] triples. The
//! [`wheel`] function generates the classic r-to-g-to-b rainbow used by the
//! startup animation.

use crate::Rgb;

/// White, used for idle slot indicator outlines.
pub const DISPLAY_WHITE: u32 = 0xFFFFFF;
/// Yellow, used for the held-button indicator outline and the hex readout.
pub const DISPLAY_YELLOW: u32 = 0xFFFF00;
/// Black, the fill of unwritten slot indicators.
pub const DISPLAY_BLACK: u32 = 0x000000;
/// Red, for the red channel readout.
pub const DISPLAY_RED: u32 = 0xFF0000;
/// Green, for the green channel readout.
pub const DISPLAY_GREEN: u32 = 0x00FF00;
/// Off-blue, for the blue channel readout (pure blue is hard to read on the TFT).
pub const DISPLAY_BLUE: u32 = 0x7480FF;

/// Packs a color into a 24-bit `0xRRGGBB` integer.
#[inline]
pub fn pack(color: Rgb) -> u32 {
    (color.red as u32) << 16 | (color.green as u32) << 8 | color.blue as u32
}

/// Maps a position on a 256-step color wheel to a color.
///
/// The colors transition red to green to blue and back to red, in thirds of
/// the wheel. Wheel positions wrap naturally with `u8` arithmetic.
pub fn wheel(pos: u8) -> Rgb {
    let pos = pos as u16;
    if pos < 85 {
        Rgb::new((255 - pos * 3) as u8, (pos * 3) as u8, 0)
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb::new(0, (255 - pos * 3) as u8, (pos * 3) as u8)
    } else {
        let pos = pos - 170;
        Rgb::new((pos * 3) as u8, 0, (255 - pos * 3) as u8)
    }
}
