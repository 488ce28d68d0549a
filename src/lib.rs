#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ColorFinder`**: the control core; owns all state and is driven by one `tick()` per ~10 ms
//! - **`FinderConfig`**: hardware variant and every timing/threshold constant in one place
//! - **`Knob`**: denoises raw ADC readings into stable 0-255 channel values
//! - **`Button` / `Debouncer`**: raw pin levels to debounced edges and short/long press events
//! - **`SlotStore`**: the four saved colors
//! - **`RenderSink`**: composes state into pixel and display writes, one flush per tick
//! - **`AnalogInput` / `DigitalInput` / `PixelStrip` / `DisplayPanel` / `TimeSource`**: traits to
//!   implement for your hardware
//!
//! Colors are `Srgb<u8>` triples (the [`Rgb`] alias); the display works with
//! the same values packed as 24-bit `0xRRGGBB` integers.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod button;
pub mod colors;
pub mod config;
pub mod controller;
pub mod knob;
pub mod render;
pub mod store;
pub mod time;
pub mod types;

pub use button::{Button, Debouncer, DigitalInput, Edge};
pub use config::{ConfigError, FinderConfig, SamplerConfig};
pub use controller::{ColorFinder, Mode};
pub use knob::{AnalogInput, Knob};
pub use render::{CircleId, DisplayPanel, LabelId, PixelStrip, RenderSink};
pub use store::SlotStore;
pub use time::{TimeInstant, TimeSource};
pub use types::{ColorOrder, PressKind, SlotId, SLOT_COUNT};

/// The crate-wide RGB triple: one 8-bit value per channel.
pub type Rgb = Srgb<u8>;

/// Black: the color of an unwritten slot and of a blanked pixel.
pub const COLOR_BLACK: Rgb = Rgb::new(0, 0, 0);
