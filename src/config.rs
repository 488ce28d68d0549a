//! Configuration for the color finder core.
//!
//! The hardware exists in several near-identical builds differing only in
//! pixel count, channel order, and whether short presses recall slots. All
//! of that variation, along with every timing and threshold constant, lives
//! here so the control logic itself has a single shape.

use crate::types::{ColorOrder, SLOT_COUNT};

/// Analog sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Raw reads averaged per sample.
    pub samples: usize,
    /// Raw reading mapped to channel value 0. Readings below saturate.
    pub raw_low: u16,
    /// Raw reading mapped to channel value 255. Readings above saturate.
    pub raw_high: u16,
}

/// Complete configuration for a [`ColorFinder`](crate::ColorFinder).
///
/// Timing fields are expressed in fast ticks where noted; the embedding
/// firmware is expected to call `tick()` every ~10 ms.
#[derive(Debug, Clone, Copy)]
pub struct FinderConfig {
    /// Number of pixels in the strip.
    pub pixel_count: usize,
    /// Channel order the pixel hardware expects.
    pub color_order: ColorOrder,
    /// Whether short presses recall slots. When disabled, a short press is a
    /// logged no-op.
    pub recall_enabled: bool,
    /// Pixel indices that track the live knob color.
    pub live_pixels: &'static [usize],
    /// Pixel index echoing each slot's saved color, one per slot in slot
    /// order. Empty when the strip has no pixels to spare for slot echoes.
    pub slot_pixels: &'static [usize],
    /// Analog sampling parameters.
    pub sampler: SamplerConfig,
    /// Press duration at or above which a press is classified long.
    pub long_press_ms: u64,
    /// Channel delta that counts as deliberate knob motion, used to leave
    /// the startup animation and to cancel a recalled slot. Anything smaller
    /// is treated as sensor noise.
    pub motion_threshold: u8,
    /// Fast ticks per slow tick (knob sampling and rendering).
    pub slow_tick_divider: u32,
    /// Fast ticks per startup animation frame.
    pub startup_frame_divider: u32,
    /// Startup animation frames before giving up on knob motion and
    /// entering live mode anyway.
    pub startup_frame_budget: u32,
}

impl FinderConfig {
    /// The primary build: a 7-pixel NeoPixel jewel and a TFT panel.
    ///
    /// The jewel's center column (pixels 0, 1, 4) tracks the live color and
    /// the four outriggers echo the slots. Recall is enabled.
    pub fn jewel() -> Self {
        Self {
            pixel_count: 7,
            color_order: ColorOrder::Grb,
            recall_enabled: true,
            live_pixels: &[0, 1, 4],
            slot_pixels: &[6, 5, 2, 3],
            sampler: SamplerConfig {
                samples: 8,
                raw_low: 1000,
                raw_high: 64000,
            },
            long_press_ms: 750,
            motion_threshold: 5,
            slow_tick_divider: 25,
            startup_frame_divider: 5,
            startup_frame_budget: 5000,
        }
    }

    /// The simpler build: a 2-pixel strip, no slot echo pixels, no recall.
    ///
    /// Renders faster (10 fast ticks per slow tick) and averages fewer
    /// samples; saves still update the on-screen slot indicators.
    pub fn duo() -> Self {
        Self {
            pixel_count: 2,
            color_order: ColorOrder::Grb,
            recall_enabled: false,
            live_pixels: &[0, 1],
            slot_pixels: &[],
            sampler: SamplerConfig {
                samples: 5,
                raw_low: 1000,
                raw_high: 64000,
            },
            slow_tick_divider: 10,
            ..Self::jewel()
        }
    }

    /// Validates the configuration.
    ///
    /// Checks pixel indices against the strip length, slot pixel arity, the
    /// sampling window, and that no divider or sample count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &index in self.live_pixels.iter().chain(self.slot_pixels) {
            if index >= self.pixel_count {
                return Err(ConfigError::PixelIndexOutOfRange {
                    index,
                    pixel_count: self.pixel_count,
                });
            }
        }
        if !self.slot_pixels.is_empty() && self.slot_pixels.len() != SLOT_COUNT {
            return Err(ConfigError::SlotPixelArity {
                found: self.slot_pixels.len(),
            });
        }
        if self.sampler.raw_low >= self.sampler.raw_high {
            return Err(ConfigError::EmptySampleWindow);
        }
        if self.sampler.samples == 0
            || self.slow_tick_divider == 0
            || self.startup_frame_divider == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A live or slot pixel index does not exist on the strip.
    PixelIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Pixels available on the strip.
        pixel_count: usize,
    },

    /// `slot_pixels` must be empty or name one pixel per slot.
    SlotPixelArity {
        /// Number of slot pixels found.
        found: usize,
    },

    /// The sampling window's low bound is not below its high bound.
    EmptySampleWindow,

    /// A sample count or tick divider is zero.
    ZeroInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::PixelIndexOutOfRange { index, pixel_count } => {
                write!(
                    f,
                    "pixel index {} out of range for a {}-pixel strip",
                    index, pixel_count
                )
            }
            ConfigError::SlotPixelArity { found } => {
                write!(
                    f,
                    "expected 0 or {} slot pixels, found {}",
                    SLOT_COUNT, found
                )
            }
            ConfigError::EmptySampleWindow => {
                write!(f, "sampling window low bound must be below high bound")
            }
            ConfigError::ZeroInterval => {
                write!(f, "sample counts and tick dividers must be nonzero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert_eq!(FinderConfig::jewel().validate(), Ok(()));
        assert_eq!(FinderConfig::duo().validate(), Ok(()));
    }

    #[test]
    fn rejects_pixel_index_beyond_strip() {
        let config = FinderConfig {
            live_pixels: &[0, 7],
            ..FinderConfig::jewel()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PixelIndexOutOfRange {
                index: 7,
                pixel_count: 7,
            })
        );
    }

    #[test]
    fn rejects_partial_slot_pixel_map() {
        let config = FinderConfig {
            slot_pixels: &[2, 3],
            ..FinderConfig::jewel()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SlotPixelArity { found: 2 })
        );
    }

    #[test]
    fn rejects_inverted_sample_window() {
        let mut config = FinderConfig::jewel();
        config.sampler.raw_low = 64000;
        config.sampler.raw_high = 1000;
        assert_eq!(config.validate(), Err(ConfigError::EmptySampleWindow));
    }

    #[test]
    fn rejects_zero_divider() {
        let mut config = FinderConfig::duo();
        config.slow_tick_divider = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }
}
