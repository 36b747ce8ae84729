//! Parallel three-band formant filter bank.

use crate::filter::{BiquadCoeffs, BiquadFilter, MIN_Q};
use crate::tables::FormantTargets;

/// Output gain of each band before summing.
pub const BAND_GAINS: [f64; 3] = [1.0, 0.9, 0.6];

/// Highest center frequency as a fraction of the sample rate.
pub const MAX_CENTER_RATIO: f64 = 0.45;

/// Lowest center frequency in Hz.
const MIN_CENTER_HZ: f64 = 20.0;

/// Three band-pass sections fed the same excitation sample.
///
/// The delay lines live for the whole synthesis call. Coefficients are
/// recomputed every sample so centers can glide and jitter.
#[derive(Debug, Clone)]
pub struct FormantBank {
    bands: [BiquadFilter; 3],
    sample_rate: f64,
}

impl FormantBank {
    /// Creates a bank with cleared state.
    pub fn new(sample_rate: f64) -> Self {
        let idle = BiquadCoeffs::bandpass_skirt(1000.0, MIN_Q, sample_rate);
        Self {
            bands: std::array::from_fn(|_| BiquadFilter::new(idle)),
            sample_rate,
        }
    }

    /// Filters one excitation sample and returns the weighted band sum.
    pub fn process(&mut self, excitation: f64, targets: &FormantTargets) -> f64 {
        let max_center = self.sample_rate * MAX_CENTER_RATIO;
        let mut sum = 0.0;

        for (b, band) in self.bands.iter_mut().enumerate() {
            let center = targets.centers[b].clamp(MIN_CENTER_HZ, max_center);
            let q = center / (2.0 * targets.bandwidths[b]);
            band.set_coeffs(BiquadCoeffs::bandpass_skirt(center, q, self.sample_rate));
            sum += BAND_GAINS[b] * band.process(excitation);
        }

        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{SyllableUnit, Vowel};

    #[test]
    fn test_silence_in_silence_out() {
        let mut bank = FormantBank::new(16000.0);
        let targets = FormantTargets::for_unit(&SyllableUnit::syllable(None, Some(Vowel::A)));
        for _ in 0..100 {
            assert_eq!(bank.process(0.0, &targets), 0.0);
        }
    }

    #[test]
    fn test_centers_above_nyquist_are_clamped() {
        let mut bank = FormantBank::new(4000.0);
        let targets = FormantTargets {
            centers: [5000.0, 9000.0, 12000.0],
            bandwidths: [1000.0, 1000.0, 1000.0],
        };
        let mut peak: f64 = 0.0;
        for n in 0..4000 {
            let x = if n % 40 == 0 { 1.0 } else { 0.0 };
            peak = peak.max(bank.process(x, &targets).abs());
        }
        assert!(peak.is_finite());
    }

    #[test]
    fn test_bank_rings_after_impulse() {
        let mut bank = FormantBank::new(16000.0);
        let targets = FormantTargets::for_unit(&SyllableUnit::syllable(None, Some(Vowel::O)));
        bank.process(1.0, &targets);
        assert_ne!(bank.process(0.0, &targets), 0.0);
    }
}
