//! Filter primitives.
//!
//! The formant bank is built from biquad band-pass sections using the Audio
//! EQ Cookbook "constant skirt gain" form, whose peak gain equals Q. The
//! anti-alias stage of the lo-fi chain is a one-pole RC lowpass.

use std::f64::consts::PI;

/// Lowest Q accepted by [`BiquadCoeffs::bandpass_skirt`].
pub const MIN_Q: f64 = 0.707;

/// Biquad filter coefficients, normalized by `a0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Creates band-pass coefficients with constant skirt gain (peak gain = Q).
    ///
    /// # Arguments
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor, clamped to at least [`MIN_Q`]
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn bandpass_skirt(center: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(MIN_Q);
        let omega = 2.0 * PI * center / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = q * alpha;
        let b1 = 0.0;
        let b2 = -q * alpha;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Biquad filter state.
///
/// Coefficients may be swapped per sample with [`BiquadFilter::set_coeffs`];
/// the delay lines are kept, so a moving center frequency does not click.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    // Delay line for input samples
    x1: f64,
    x2: f64,
    // Delay line for output samples
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a new biquad filter with the given coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a constant-skirt-gain band-pass filter.
    pub fn bandpass_skirt(center: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::bandpass_skirt(center, q, sample_rate))
    }

    /// Updates the filter coefficients, keeping the delay lines.
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.coeffs.b0 * input + self.coeffs.b1 * self.x1 + self.coeffs.b2 * self.x2
            - self.coeffs.a1 * self.y1
            - self.coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}

/// One-pole lowpass filter (simple RC filter).
#[derive(Debug, Clone)]
pub struct OnePoleFilter {
    a0: f64,
    b1: f64,
    y1: f64,
}

impl OnePoleFilter {
    /// Creates a new one-pole lowpass filter.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(cutoff: f64, sample_rate: f64) -> Self {
        let b1 = (-2.0 * PI * cutoff / sample_rate).exp();
        Self {
            a0: 1.0 - b1,
            b1,
            y1: 0.0,
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.y1 = self.a0 * input + self.b1 * self.y1;
        self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, sample_rate: f64, len: usize) -> impl Iterator<Item = f64> {
        (0..len).map(move |i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
    }

    fn peak(coeffs: BiquadCoeffs, freq: f64, sample_rate: f64) -> f64 {
        let mut filter = BiquadFilter::new(coeffs);
        sine(freq, sample_rate, 8000)
            .map(|s| filter.process(s))
            .skip(4000)
            .fold(0.0, |acc, s| acc.max(s.abs()))
    }

    #[test]
    fn test_bandpass_skirt_peak_gain_is_q() {
        let sample_rate = 16000.0;
        let q = 4.0;
        let coeffs = BiquadCoeffs::bandpass_skirt(1000.0, q, sample_rate);

        let at_center = peak(coeffs, 1000.0, sample_rate);
        assert!((at_center - q).abs() < 0.1, "peak gain {}", at_center);

        let off_center = peak(coeffs, 4000.0, sample_rate);
        assert!(off_center < at_center / 4.0);
    }

    #[test]
    fn test_bandpass_blocks_dc() {
        let mut filter = BiquadFilter::bandpass_skirt(700.0, 3.0, 16000.0);
        let mut last = 0.0;
        for _ in 0..4000 {
            last = filter.process(1.0);
        }
        assert!(last.abs() < 1e-3);
    }

    #[test]
    fn test_q_is_floored() {
        let low = BiquadCoeffs::bandpass_skirt(1000.0, 0.1, 16000.0);
        let floor = BiquadCoeffs::bandpass_skirt(1000.0, MIN_Q, 16000.0);
        assert_eq!(low, floor);
    }

    #[test]
    fn test_set_coeffs_keeps_state() {
        let mut filter = BiquadFilter::bandpass_skirt(500.0, 2.0, 8000.0);
        filter.process(1.0);
        let before = filter.clone();
        filter.set_coeffs(BiquadCoeffs::bandpass_skirt(600.0, 2.0, 8000.0));
        assert_eq!(filter.x1, before.x1);
        assert_eq!(filter.y1, before.y1);
    }

    #[test]
    fn test_one_pole_filter() {
        let mut filter = OnePoleFilter::new(100.0, 44100.0);

        let mut output = Vec::new();
        for _ in 0..1000 {
            output.push(filter.process(1.0));
        }

        // Should approach 1.0 (passes DC)
        assert!((output[999] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_one_pole_attenuates_high_frequencies() {
        let sample_rate = 16000.0;
        let mut filter = OnePoleFilter::new(500.0, sample_rate);
        let high = sine(6000.0, sample_rate, 4000)
            .map(|s| filter.process(s))
            .skip(2000)
            .fold(0.0_f64, |acc, s| acc.max(s.abs()));
        assert!(high < 0.2, "high-frequency peak {}", high);
    }
}
