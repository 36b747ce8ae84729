//! Source-filter synthesis of syllable units.
//!
//! Each unit is rendered in fixed 10 ms frames. The excitation is a narrow
//! pulse train for voiced units and white noise for unvoiced ones, always
//! mixed with a little extra noise. It is shaped by a short fade envelope and
//! fed through a three-band formant bank whose state persists across every
//! unit of the call. A 20 ms silence follows each unit.

mod bank;


pub use bank::{FormantBank, BAND_GAINS, MAX_CENTER_RATIO};

use chipvoice_spec::VoiceConfig;
use rand::Rng;
use tracing::{debug, trace};

use crate::buffer::AudioBuffer;
use crate::error::{SynthError, SynthResult};
use crate::rng::bipolar;
use crate::tables::{self, FormantTargets};
use crate::unit::SyllableUnit;

/// Output gain applied to the summed bands before clamping.
pub const GAIN: f64 = 1.6;

/// Frame length in milliseconds.
pub const FRAME_MS: f64 = 10.0;

/// Silence appended after each unit in milliseconds.
pub const GAP_MS: f64 = 20.0;

/// Silence reserved after the last unit in milliseconds.
pub const TAIL_MS: f64 = 300.0;

/// Fade-in and fade-out length at unit boundaries in milliseconds.
pub const FADE_MS: f64 = 5.0;

/// Length of the formant glide from the previous unit in milliseconds.
pub const TRANSITION_MS: f64 = 20.0;

/// Longest render accepted, in seconds.
pub const MAX_DURATION_SECONDS: f64 = 600.0;

/// Per-frame pitch jitter bound in Hz.
const PITCH_JITTER_HZ: f64 = 2.0;

/// Fraction of each pitch period the pulse stays high.
const PULSE_DUTY: f64 = 0.05;

/// Extra noise mixed into voiced excitation.
const VOICED_NOISE_MIX: f64 = 0.05;

/// Floor on the noise mixed into unvoiced excitation.
const MIN_NOISE_MIX: f64 = 0.02;

const BURST_AMPLITUDE: f64 = 1.1;
const BURST_DECAY_SAMPLES: f64 = 100.0;
const BURST_SAMPLES: usize = 40;

/// Relative center jitter for units without a vowel.
const CONSONANT_JITTER: (f64, f64) = (0.06, 0.12);

/// Third-band boost for bright consonants: base plus a random spread.
const BRIGHT_BOOST: (f64, f64) = (0.10, 0.05);

/// Synthesis parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthParams {
    /// Synthesis sample rate in Hz.
    pub sample_rate: u32,
    /// Base pitch in Hz.
    pub base_pitch: f64,
    /// Speaking-rate multiplier; higher is faster.
    pub speaking_rate: f64,
    /// Noise mixed into unvoiced excitation.
    pub noise_amount: f64,
    /// Gain on the summed formant bands.
    pub formant_gain: f64,
    /// Boost the third band of consonants.
    pub bright_consonant: bool,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::from(&VoiceConfig::default())
    }
}

impl From<&VoiceConfig> for SynthParams {
    fn from(config: &VoiceConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            base_pitch: config.base_pitch,
            speaking_rate: config.speaking_rate,
            noise_amount: config.noise_amount,
            formant_gain: config.formant_gain,
            bright_consonant: config.bright_consonant,
        }
    }
}

impl SynthParams {
    /// Rejects parameters that would produce corrupt audio.
    ///
    /// Values inside the finite range are not clamped here; that is the
    /// configuration layer's job.
    pub fn validate(&self) -> SynthResult<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if !self.speaking_rate.is_finite() || self.speaking_rate <= 0.0 {
            return Err(SynthError::invalid_param(
                "speaking_rate",
                format!("must be finite and positive, got {}", self.speaking_rate),
            ));
        }
        if !self.base_pitch.is_finite() || self.base_pitch <= 0.0 {
            return Err(SynthError::invalid_param(
                "base_pitch",
                format!("must be finite and positive, got {}", self.base_pitch),
            ));
        }
        if !self.noise_amount.is_finite() {
            return Err(SynthError::invalid_param("noise_amount", "must be finite"));
        }
        if !self.formant_gain.is_finite() {
            return Err(SynthError::invalid_param("formant_gain", "must be finite"));
        }
        Ok(())
    }
}

/// Number of frames a unit occupies at a speaking rate.
pub fn frame_count(duration_ms: u32, speaking_rate: f64) -> usize {
    ((duration_ms as f64 / speaking_rate / FRAME_MS).floor() as usize).max(1)
}

/// Linear fade at both ends of a unit, capped at half its length.
fn fade_gain(pos: usize, len: usize, fade: usize) -> f64 {
    if fade == 0 {
        return 1.0;
    }
    let rise = pos as f64 / fade as f64;
    let fall = (len - pos) as f64 / fade as f64;
    rise.min(fall).min(1.0)
}

/// Formant targets for one sample of a unit.
///
/// Centers glide linearly from `start` over the first `ramp_len` samples.
/// Vowelless units then get every center shifted by a random ±6-12%, and with
/// `bright_consonant` the third band is raised a further 10-15%.
fn sample_targets<R: Rng + ?Sized>(
    start: &FormantTargets,
    target: &FormantTargets,
    pos: usize,
    ramp_len: usize,
    vowelless: bool,
    bright_consonant: bool,
    rng: &mut R,
) -> FormantTargets {
    let mut targets = if pos < ramp_len {
        start.lerp_centers(target, pos as f64 / ramp_len as f64)
    } else {
        *target
    };
    if vowelless {
        let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
        let amount = rng.gen_range(CONSONANT_JITTER.0..=CONSONANT_JITTER.1);
        let shift = 1.0 + sign * amount;
        for center in &mut targets.centers {
            *center *= shift;
        }
        if bright_consonant {
            let boost = BRIGHT_BOOST.0 + rng.gen::<f64>() * BRIGHT_BOOST.1;
            targets.centers[2] *= 1.0 + boost;
        }
    }
    targets
}

/// Renders syllable units to a raw waveform at `params.sample_rate`.
///
/// One filter bank is created per call and carried across every unit; its
/// state is never cleared between units.
/// All randomness comes from `rng`, so a seeded source gives bit-identical
/// output.
///
/// # Errors
/// Returns an error if the sample rate is zero, the speaking rate or pitch is
/// not finite and positive, or the implied duration is not finite or exceeds
/// [`MAX_DURATION_SECONDS`].
pub fn synthesize<R: Rng + ?Sized>(
    units: &[SyllableUnit],
    params: &SynthParams,
    rng: &mut R,
) -> SynthResult<AudioBuffer> {
    params.validate()?;

    let sr = params.sample_rate as f64;
    let rate = params.speaking_rate;
    let total_ms = units.iter().map(|u| u.duration_ms as f64).sum::<f64>() / rate;
    if !total_ms.is_finite() || total_ms < 0.0 || total_ms / 1000.0 > MAX_DURATION_SECONDS {
        return Err(SynthError::InvalidDuration { duration: total_ms });
    }

    let frame_len = ((sr * FRAME_MS / 1000.0).floor() as usize).max(1);
    let gap_len = (sr * GAP_MS / 1000.0).floor() as usize;
    let fade_len = (sr * FADE_MS / 1000.0).floor() as usize;
    let ramp_len = ((sr * TRANSITION_MS / 1000.0).floor() as usize).max(1);

    let frames: Vec<usize> = units
        .iter()
        .map(|u| frame_count(u.duration_ms, rate))
        .collect();
    let rendered: usize = frames.iter().map(|f| f * frame_len + gap_len).sum();
    let estimated = (sr * (total_ms + TAIL_MS) / 1000.0).ceil() as usize;
    let mut out = vec![0.0_f32; estimated.max(rendered)];

    debug!(
        units = units.len(),
        samples = out.len(),
        sample_rate = params.sample_rate,
        "synthesizing"
    );

    let mut bank = FormantBank::new(sr);

    let noise_mix = params.noise_amount.max(MIN_NOISE_MIX);
    let mut previous: Option<FormantTargets> = None;
    let mut t = 0;

    for (unit, &unit_frames) in units.iter().zip(&frames) {
        let voiced = unit.nucleus.is_some() || tables::is_voiced_onset(unit.onset_str());
        let target = FormantTargets::for_unit(unit);
        let start = previous.unwrap_or(target);
        let mix = if voiced { VOICED_NOISE_MIX } else { noise_mix };
        let unit_len = unit_frames * frame_len;
        let fade = fade_len.min(unit_len / 2);

        trace!(
            unit = %unit.label(),
            voiced,
            frames = unit_frames,
            offset = t,
            "rendering unit"
        );

        for k in 0..unit_frames {
            let jitter = rng.gen_range(-PITCH_JITTER_HZ..=PITCH_JITTER_HZ);
            let period = ((sr / (params.base_pitch + jitter)).floor() as usize).max(1);
            let pulse_width = ((period as f64 * PULSE_DUTY).round() as usize).max(1);

            for n in 0..frame_len {
                let pos = k * frame_len + n;
                let idx = t + pos;

                let source = if voiced {
                    if idx % period < pulse_width {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    bipolar(rng)
                };
                let mut excitation =
                    (source * (1.0 - mix) + bipolar(rng) * mix) * fade_gain(pos, unit_len, fade);
                if unit.has_burst && k == 0 && n < BURST_SAMPLES.min(frame_len) {
                    excitation += BURST_AMPLITUDE * (-(n as f64) / BURST_DECAY_SAMPLES).exp();
                }

                let targets = sample_targets(
                    &start,
                    &target,
                    pos,
                    ramp_len,
                    unit.nucleus.is_none(),
                    params.bright_consonant,
                    rng,
                );

                let y = bank.process(excitation, &targets);
                out[idx] += (y * GAIN * params.formant_gain).clamp(-1.0, 1.0) as f32;
            }
        }

        previous = Some(target);
        t += unit_len + gap_len;
    }

    Ok(AudioBuffer::new(out, params.sample_rate))
}
