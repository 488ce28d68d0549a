//! Analog knob sampling.
//!
//! A single instantaneous ADC read of a potentiometer is noisy. [`Knob`]
//! takes several raw reads per sample, maps each onto the 0-255 channel
//! range, and averages the mapped values, which smooths jitter without
//! flattening the response near the ends of the travel.

use crate::config::SamplerConfig;

/// Trait for abstracting a single analog input channel.
///
/// Implement this for your ADC. Readings are full-scale raw values
/// (typically 0-65535); the sampler handles mapping and denoising, so
/// implementations should return conversions unmodified.
pub trait AnalogInput {
    /// Reads one raw conversion from the channel.
    fn read_raw(&mut self) -> u16;
}

/// One potentiometer mapped onto a color channel.
pub struct Knob<A: AnalogInput> {
    input: A,
}

impl<A: AnalogInput> Knob<A> {
    /// Wraps an analog input channel.
    pub fn new(input: A) -> Self {
        Self { input }
    }

    /// Samples the knob position as a channel value.
    ///
    /// Performs `config.samples` raw reads, maps each linearly from the
    /// `[raw_low, raw_high]` window onto `[0, 255]`, averages the mapped
    /// values, and truncates. Raw readings outside the window saturate at
    /// the corresponding end, so a reading at the hardware rails yields 0
    /// or 255 rather than wrapping. The result is always in range and
    /// non-decreasing in the raw input.
    pub fn sample(&mut self, config: &SamplerConfig) -> u8 {
        let mut sum = 0.0f32;
        for _ in 0..config.samples {
            sum += map_raw(self.input.read_raw(), config);
        }
        (sum / config.samples as f32) as u8
    }
}

/// Maps one raw reading onto the channel range, saturating at the window edges.
fn map_raw(raw: u16, config: &SamplerConfig) -> f32 {
    let span = (config.raw_high - config.raw_low) as f32;
    let offset = (raw.clamp(config.raw_low, config.raw_high) - config.raw_low) as f32;
    offset * 255.0 / span
}
