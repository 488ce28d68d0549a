//! Output composition for the pixel strip and the TFT panel.
//!
//! [`RenderSink`] turns the current mode and color state into device writes.
//! All pixel writes for a tick are staged first and flushed with a single
//! `show()`, and all display updates with a single `present()`, so the two
//! devices never show a half-applied state.

use core::fmt::Write;

use heapless::String;

use crate::colors::{pack, wheel, DISPLAY_BLACK, DISPLAY_WHITE, DISPLAY_YELLOW};
use crate::config::FinderConfig;
use crate::store::SlotStore;
use crate::types::SlotId;
use crate::{Rgb, COLOR_BLACK};

/// Trait for abstracting an addressable pixel strip.
///
/// Implement this for your LED driver. Writes are staged per index and
/// flushed by [`show`](PixelStrip::show); the global brightness scale
/// (0.2 on the reference hardware) is the implementation's concern, not the
/// core's. Colors arrive already reordered for the wire (see
/// [`ColorOrder`](crate::ColorOrder)).
pub trait PixelStrip {
    /// Stages a color write for one pixel.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Flushes all staged writes to the strip.
    fn show(&mut self);
}

/// The four text readouts on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LabelId {
    /// Red channel decimal value.
    Red,
    /// Green channel decimal value.
    Green,
    /// Blue channel decimal value.
    Blue,
    /// Packed hex value of the whole color.
    Hex,
}

impl LabelId {
    /// Horizontal center of the label's column, in unscaled panel
    /// coordinates (the panel renders text at 2x scale).
    fn center(self) -> i32 {
        match self {
            LabelId::Red => 15,
            LabelId::Green => 40,
            LabelId::Blue => 65,
            LabelId::Hex => 40,
        }
    }
}

/// The circle indicators on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CircleId {
    /// The big swatch showing the current color.
    Current,
    /// One of the four slot indicators.
    Slot(SlotId),
}

/// Trait for abstracting the graphical display.
///
/// Implement this for your panel driver. The implementation owns shape
/// positions, fonts, label colors, and the splash image; the core only
/// addresses primitives by id. Updates are staged and flushed by
/// [`present`](DisplayPanel::present).
pub trait DisplayPanel {
    /// Stages a fill color for a circle indicator.
    fn set_circle_fill(&mut self, circle: CircleId, color: u32);

    /// Stages an outline color for a circle indicator.
    fn set_circle_outline(&mut self, circle: CircleId, color: u32);

    /// Stages new text for a label at the given x position.
    fn set_label(&mut self, label: LabelId, text: &str, x: i32);

    /// Width in unscaled pixels the given text renders at.
    fn text_width(&self, text: &str) -> u32;

    /// Removes the startup splash image. Called once, on startup exit.
    fn hide_splash(&mut self);

    /// Flushes all staged display updates.
    fn present(&mut self);
}

/// Composes mode and color state into pixel and display writes.
pub struct RenderSink<P: PixelStrip, D: DisplayPanel> {
    pixels: P,
    panel: D,
}

impl<P: PixelStrip, D: DisplayPanel> RenderSink<P, D> {
    /// Wraps the two output capabilities.
    pub fn new(pixels: P, panel: D) -> Self {
        Self { pixels, panel }
    }

    /// Renders one frame of the startup rainbow.
    ///
    /// Each pixel gets a wheel position offset by its place on the strip,
    /// and the whole pattern rotates by 10 wheel steps per frame. The panel
    /// is untouched; it is still showing the splash.
    pub fn startup_frame(&mut self, config: &FinderConfig, frame: u32) {
        for index in 0..config.pixel_count {
            let pos = (index * 256 / config.pixel_count) as u32 + frame * 10;
            let color = wheel((pos & 0xff) as u8);
            self.pixels.set_pixel(index, config.color_order.apply(color));
        }
        self.pixels.show();
    }

    /// Tears down the splash and draws the idle main screen.
    ///
    /// Blacks out every pixel, removes the splash image, and draws the
    /// indicator circles empty with white outlines. The first live render
    /// fills everything in.
    pub fn begin_main_screen(&mut self, config: &FinderConfig) {
        for index in 0..config.pixel_count {
            self.pixels.set_pixel(index, COLOR_BLACK);
        }
        self.pixels.show();

        self.panel.hide_splash();
        self.panel.set_circle_fill(CircleId::Current, DISPLAY_BLACK);
        self.panel.set_circle_outline(CircleId::Current, DISPLAY_WHITE);
        for slot in SlotId::all() {
            self.panel.set_circle_fill(CircleId::Slot(slot), DISPLAY_BLACK);
            self.panel.set_circle_outline(CircleId::Slot(slot), DISPLAY_WHITE);
        }
        self.panel.present();
    }

    /// Renders the live-knobs view.
    ///
    /// Readouts and the big swatch follow the live color, live pixels track
    /// it on the strip, and slot pixels and indicators repaint from the
    /// store, which is what makes a save and its visual echo land in the
    /// same tick.
    pub fn render_live(&mut self, config: &FinderConfig, live: Rgb, store: &SlotStore) {
        self.write_readouts(live);
        self.panel.set_circle_fill(CircleId::Current, pack(live));
        self.paint_slot_indicators(store);

        for &index in config.live_pixels {
            self.pixels.set_pixel(index, config.color_order.apply(live));
        }
        for ((_, color), &index) in store.iter().zip(config.slot_pixels) {
            self.pixels.set_pixel(index, config.color_order.apply(color));
        }

        self.pixels.show();
        self.panel.present();
    }

    /// Renders a recalled slot: its color takes over every output.
    pub fn render_recalled(&mut self, config: &FinderConfig, color: Rgb, store: &SlotStore) {
        self.write_readouts(color);
        self.panel.set_circle_fill(CircleId::Current, pack(color));
        self.paint_slot_indicators(store);

        for index in 0..config.pixel_count {
            self.pixels.set_pixel(index, config.color_order.apply(color));
        }

        self.pixels.show();
        self.panel.present();
    }

    /// Echoes a button's debounced state on its slot indicator outline:
    /// yellow while held, back to white on release.
    pub fn slot_edge(&mut self, slot: SlotId, held: bool) {
        let color = if held { DISPLAY_YELLOW } else { DISPLAY_WHITE };
        self.panel.set_circle_outline(CircleId::Slot(slot), color);
        self.panel.present();
    }

    fn paint_slot_indicators(&mut self, store: &SlotStore) {
        for (slot, color) in store.iter() {
            self.panel.set_circle_fill(CircleId::Slot(slot), pack(color));
        }
    }

    fn write_readouts(&mut self, color: Rgb) {
        self.place_label(LabelId::Red, &decimal(color.red));
        self.place_label(LabelId::Green, &decimal(color.green));
        self.place_label(LabelId::Blue, &decimal(color.blue));

        let mut text: String<12> = String::new();
        let _ = write!(text, "{:#x}", pack(color));
        self.place_label(LabelId::Hex, &text);
    }

    /// Centers a label on its column and stages the text.
    ///
    /// The panel draws text at 2x scale, so the x position is
    /// `2 * (center - textwidth / 2)`, computed as `2 * center - width` to
    /// stay exact for odd widths.
    fn place_label(&mut self, label: LabelId, text: &str) {
        let width = self.panel.text_width(text) as i32;
        let x = 2 * label.center() - width;
        self.panel.set_label(label, text, x);
    }
}

fn decimal(value: u8) -> String<12> {
    let mut text = String::new();
    let _ = write!(text, "{}", value);
    text
}
