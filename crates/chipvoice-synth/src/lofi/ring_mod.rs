//! Ring modulator ("vocoder") pass.
//!
//! Multiplies the signal with a bipolar sawtooth carrier, which adds the
//! buzzy, robotic sidebands of a channel vocoder without its filter bank.
//! The result is rescaled to the input's RMS level and softly saturated.

use crate::buffer::rms;
use crate::error::{SynthError, SynthResult};

/// Default carrier frequency in Hz.
pub const CARRIER_HZ: f64 = 150.0;

/// Applies ring modulation in place.
///
/// # Arguments
/// * `samples` - Mono audio to process in-place
/// * `frequency` - Carrier frequency in Hz
/// * `sample_rate` - Sample rate in Hz
///
/// # Algorithm
/// ```text
/// carrier  = 2 * phase - 1            (sawtooth, phase in [0, 1))
/// y        = x * carrier
/// y        = y * rms(x) / rms(y)      (skipped when rms(y) is zero)
/// output   = tanh(y)
/// ```
pub fn apply(samples: &mut [f64], frequency: f64, sample_rate: f64) -> SynthResult<()> {
    if !(1.0..=20000.0).contains(&frequency) {
        return Err(SynthError::invalid_param(
            "ring_modulator.frequency",
            format!("must be 1.0-20000.0 Hz, got {}", frequency),
        ));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(SynthError::invalid_param(
            "ring_modulator.sample_rate",
            format!("must be positive, got {}", sample_rate),
        ));
    }

    if samples.is_empty() {
        return Ok(());
    }

    let rms_in = rms(samples.iter().copied());

    let mut phase = 0.0;
    let phase_increment = frequency / sample_rate;
    for sample in samples.iter_mut() {
        let carrier = 2.0 * phase - 1.0;
        *sample *= carrier;

        phase += phase_increment;
        if phase >= 1.0 {
            phase -= 1.0;
        }
    }

    let rms_out = rms(samples.iter().copied());
    let scale = if rms_out > 0.0 { rms_in / rms_out } else { 1.0 };

    for sample in samples.iter_mut() {
        *sample = (*sample * scale).tanh();
    }

    Ok(())
}
