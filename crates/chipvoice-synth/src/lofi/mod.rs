//! Lo-fi post-processing chain.
//!
//! Turns the clean synthesis output into chip-sounding audio. The stage order
//! is fixed and matters:
//!
//! 1. one-pole anti-alias lowpass
//! 2. optional ring modulation ([`ring_mod`])
//! 3. bit-depth quantization
//! 4. single-tap cabinet echo
//! 5. hard clip at ±0.98
//! 6. nearest-neighbour decimation to the output rate

pub mod ring_mod;

#[cfg(test)]
mod tests;

use chipvoice_spec::VoiceConfig;
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::error::{SynthError, SynthResult};
use crate::filter::OnePoleFilter;

/// Anti-alias ceiling in Hz.
pub const CUTOFF_CEILING_HZ: f64 = 4200.0;

/// Anti-alias ceiling in Hz when bright consonants are enabled.
pub const BRIGHT_CUTOFF_CEILING_HZ: f64 = 4500.0;

/// Distance kept below the output Nyquist frequency in Hz.
pub const NYQUIST_MARGIN_HZ: f64 = 100.0;

/// Lowest anti-alias cutoff in Hz.
pub const MIN_CUTOFF_HZ: f64 = 50.0;

/// Echo tap gain.
pub const ECHO_GAIN: f64 = 0.25;

/// Delays of this many samples or fewer disable the echo.
pub const MIN_ECHO_DELAY_SAMPLES: usize = 4;

/// Hard clip level.
pub const CLIP_LEVEL: f64 = 0.98;

/// Lowest quantization depth in bits.
pub const MIN_BIT_DEPTH: u8 = 3;

/// Highest quantization depth in bits.
pub const MAX_BIT_DEPTH: u8 = 8;

/// Longest cabinet delay in seconds.
pub const MAX_CABINET_DELAY: f64 = 0.08;

/// Parameters for [`post_process`].
#[derive(Debug, Clone, PartialEq)]
pub struct LofiParams {
    /// Target sample rate in Hz; capped at the input rate.
    pub output_rate: u32,
    /// Quantization depth in bits, clamped to 3-8.
    pub bit_depth: u8,
    /// Echo delay in seconds, clamped to 0-0.08.
    pub cabinet_delay: f64,
    /// Raises the anti-alias ceiling.
    pub bright_consonant: bool,
    /// Enables the ring-modulation pass.
    pub vocoder: bool,
}

impl Default for LofiParams {
    fn default() -> Self {
        Self::from(&VoiceConfig::default())
    }
}

impl From<&VoiceConfig> for LofiParams {
    fn from(config: &VoiceConfig) -> Self {
        Self {
            output_rate: config.output_rate,
            bit_depth: config.bit_depth,
            cabinet_delay: config.cabinet_delay,
            bright_consonant: config.bright_consonant,
            vocoder: config.vocoder,
        }
    }
}

/// Anti-alias cutoff for an output rate: `min(ceiling, out/2 - 100)`, at least 50 Hz.
pub fn anti_alias_cutoff(output_rate: u32, bright_consonant: bool) -> f64 {
    let ceiling = if bright_consonant {
        BRIGHT_CUTOFF_CEILING_HZ
    } else {
        CUTOFF_CEILING_HZ
    };
    ceiling
        .min(output_rate as f64 / 2.0 - NYQUIST_MARGIN_HZ)
        .max(MIN_CUTOFF_HZ)
}

/// Number of distinct levels a quantized sample can take.
pub fn quantization_levels(bit_depth: u8) -> u32 {
    1 << bit_depth.clamp(MIN_BIT_DEPTH, MAX_BIT_DEPTH)
}

/// Snaps a sample to the nearest of `2^bit_depth` evenly spaced levels in `[-1, 1]`.
#[inline]
pub fn quantize(sample: f64, bit_depth: u8) -> f64 {
    let step = (quantization_levels(bit_depth) - 1) as f64;
    let x = sample.clamp(-1.0, 1.0);
    ((x + 1.0) / 2.0 * step).round() / step * 2.0 - 1.0
}

/// Adds a single delayed tap of the unmodified input.
///
/// Does nothing when `delay_samples` is at most [`MIN_ECHO_DELAY_SAMPLES`].
pub fn cabinet_echo(samples: &mut [f64], delay_samples: usize) {
    if delay_samples <= MIN_ECHO_DELAY_SAMPLES || delay_samples >= samples.len() {
        return;
    }
    let dry = samples.to_vec();
    for (sample, tap) in samples[delay_samples..].iter_mut().zip(&dry) {
        *sample += ECHO_GAIN * tap;
    }
}

/// Decimation ratio: `max(1, floor(sample_rate / output_rate))`.
pub fn decimation_ratio(sample_rate: u32, output_rate: u32) -> usize {
    if output_rate == 0 {
        return 1;
    }
    ((sample_rate / output_rate) as usize).max(1)
}

/// Keeps every `ratio`-th sample; the length is `floor(len / ratio)`.
pub fn decimate(samples: &[f64], ratio: usize) -> Vec<f64> {
    let ratio = ratio.max(1);
    let len = samples.len() / ratio;
    samples.iter().step_by(ratio).take(len).copied().collect()
}

/// Runs the full chain on a raw synthesis buffer.
///
/// The returned buffer is labelled with the (capped) output rate and has
/// `floor(len / max(1, floor(sr / output_rate)))` samples.
///
/// # Errors
/// Returns an error if either rate is zero or the cabinet delay is not finite.
pub fn post_process(buffer: &AudioBuffer, params: &LofiParams) -> SynthResult<AudioBuffer> {
    let sample_rate = buffer.sample_rate;
    if sample_rate == 0 {
        return Err(SynthError::InvalidSampleRate { rate: sample_rate });
    }
    if params.output_rate == 0 {
        return Err(SynthError::InvalidSampleRate {
            rate: params.output_rate,
        });
    }
    if !params.cabinet_delay.is_finite() {
        return Err(SynthError::invalid_param(
            "cabinet_delay",
            format!("must be finite, got {}", params.cabinet_delay),
        ));
    }

    let output_rate = params.output_rate.min(sample_rate);
    let bit_depth = params.bit_depth.clamp(MIN_BIT_DEPTH, MAX_BIT_DEPTH);
    let cabinet_delay = params.cabinet_delay.clamp(0.0, MAX_CABINET_DELAY);
    let sr = sample_rate as f64;

    let cutoff = anti_alias_cutoff(output_rate, params.bright_consonant);
    let mut lowpass = OnePoleFilter::new(cutoff, sr);
    let mut samples: Vec<f64> = buffer
        .samples
        .iter()
        .map(|&s| lowpass.process(s as f64))
        .collect();

    if params.vocoder {
        ring_mod::apply(&mut samples, ring_mod::CARRIER_HZ, sr)?;
    }

    for sample in samples.iter_mut() {
        *sample = quantize(*sample, bit_depth);
    }

    let delay_samples = (sr * cabinet_delay).floor() as usize;
    cabinet_echo(&mut samples, delay_samples);

    for sample in samples.iter_mut() {
        *sample = sample.clamp(-CLIP_LEVEL, CLIP_LEVEL);
    }

    let ratio = decimation_ratio(sample_rate, output_rate);
    let decimated = decimate(&samples, ratio);

    debug!(
        cutoff,
        bit_depth,
        delay_samples,
        ratio,
        input = samples.len(),
        output = decimated.len(),
        output_rate,
        "post-processed"
    );

    Ok(AudioBuffer::new(
        decimated.into_iter().map(|s| s as f32).collect(),
        output_rate,
    ))
}
