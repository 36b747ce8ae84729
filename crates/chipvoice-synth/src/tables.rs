//! Formant and consonant lookup tables.
//!
//! Vowels carry three fixed formant centers with fixed bandwidths. Units
//! without a vowel derive their three bands from a single consonant noise
//! band: the second and third centers sit at 1.6x and 2.3x the base, with
//! bandwidths widened by 1.3x and 1.6x.

use crate::unit::{SyllableUnit, Vowel};

/// Formant bandwidths in Hz shared by every vowel.
pub const VOWEL_BANDWIDTHS: [f64; 3] = [90.0, 120.0, 160.0];

/// Center multipliers for the second and third consonant bands.
pub const CONSONANT_CENTER_RATIOS: [f64; 3] = [1.0, 1.6, 2.3];

/// Bandwidth multipliers for the second and third consonant bands.
pub const CONSONANT_BANDWIDTH_RATIOS: [f64; 3] = [1.0, 1.3, 1.6];

/// Onsets rendered with a voiced (pulse) excitation when no vowel is present.
pub const VOICED_ONSETS: [&str; 11] = ["B", "D", "G", "Z", "J", "R", "M", "N", "L", "Y", "W"];

/// A consonant noise band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseBand {
    /// Center frequency in Hz.
    pub center: f64,
    /// Bandwidth in Hz.
    pub bandwidth: f64,
}

impl NoiseBand {
    const fn new(center: f64, bandwidth: f64) -> Self {
        Self { center, bandwidth }
    }
}

/// Band used for onsets missing from [`CONSONANT_BANDS`].
pub const DEFAULT_NOISE_BAND: NoiseBand = NoiseBand::new(2000.0, 900.0);

/// Unvoiced consonant noise bands.
pub const CONSONANT_BANDS: [(&str, NoiseBand); 9] = [
    ("S", NoiseBand::new(5000.0, 1200.0)),
    ("SH", NoiseBand::new(3000.0, 800.0)),
    ("TS", NoiseBand::new(4500.0, 1000.0)),
    ("CH", NoiseBand::new(3500.0, 900.0)),
    ("F", NoiseBand::new(2000.0, 700.0)),
    ("H", NoiseBand::new(1600.0, 600.0)),
    ("K", NoiseBand::new(2500.0, 900.0)),
    ("T", NoiseBand::new(4000.0, 1200.0)),
    ("P", NoiseBand::new(1500.0, 600.0)),
];

/// First three formant centers in Hz for a vowel.
pub fn vowel_formants(vowel: Vowel) -> [f64; 3] {
    match vowel {
        Vowel::A => [700.0, 1100.0, 2450.0],
        Vowel::I => [300.0, 2400.0, 3000.0],
        Vowel::U => [350.0, 1100.0, 2250.0],
        Vowel::E => [500.0, 1700.0, 2500.0],
        Vowel::O => [450.0, 800.0, 2600.0],
    }
}

/// Looks up the noise band for an onset.
///
/// Tries the whole label, then its first letter, then falls back to
/// [`DEFAULT_NOISE_BAND`].
pub fn consonant_band(onset: &str) -> NoiseBand {
    let lookup = |key: &str| {
        CONSONANT_BANDS
            .iter()
            .find(|(label, _)| *label == key)
            .map(|(_, band)| *band)
    };

    lookup(onset)
        .or_else(|| onset.get(..1).and_then(lookup))
        .unwrap_or(DEFAULT_NOISE_BAND)
}

/// True if an onset is voiced on its own.
pub fn is_voiced_onset(onset: &str) -> bool {
    VOICED_ONSETS.contains(&onset)
}

/// Center frequencies and bandwidths for the three formant bands of a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormantTargets {
    /// Center frequencies in Hz.
    pub centers: [f64; 3],
    /// Bandwidths in Hz.
    pub bandwidths: [f64; 3],
}

impl FormantTargets {
    /// Targets for a unit: the vowel table when a nucleus is present,
    /// otherwise the derived consonant bands.
    pub fn for_unit(unit: &SyllableUnit) -> Self {
        match unit.nucleus {
            Some(vowel) => Self {
                centers: vowel_formants(vowel),
                bandwidths: VOWEL_BANDWIDTHS,
            },
            None => {
                let band = consonant_band(unit.onset_str());
                Self {
                    centers: CONSONANT_CENTER_RATIOS.map(|r| band.center * r),
                    bandwidths: CONSONANT_BANDWIDTH_RATIOS.map(|r| band.bandwidth * r),
                }
            }
        }
    }

    /// Linear interpolation of centers toward `other`; bandwidths follow `other`.
    pub fn lerp_centers(&self, other: &FormantTargets, t: f64) -> FormantTargets {
        let t = t.clamp(0.0, 1.0);
        let mut centers = [0.0; 3];
        for (band, center) in centers.iter_mut().enumerate() {
            *center = self.centers[band] + (other.centers[band] - self.centers[band]) * t;
        }
        FormantTargets {
            centers,
            bandwidths: other.bandwidths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_targets() {
        let unit = SyllableUnit::syllable(Some("K"), Some(Vowel::A));
        let targets = FormantTargets::for_unit(&unit);
        assert_eq!(targets.centers, [700.0, 1100.0, 2450.0]);
        assert_eq!(targets.bandwidths, VOWEL_BANDWIDTHS);
    }

    #[test]
    fn test_consonant_targets_are_derived() {
        let unit = SyllableUnit::syllable(Some("SH"), None);
        let targets = FormantTargets::for_unit(&unit);
        for (got, want) in targets.centers.iter().zip([3000.0, 4800.0, 6900.0]) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
        assert!((targets.bandwidths[1] - 1040.0).abs() < 1e-9);
        assert!((targets.bandwidths[2] - 1280.0).abs() < 1e-9);
    }

    #[test]
    fn test_consonant_lookup_fallbacks() {
        assert_eq!(consonant_band("TS").center, 4500.0);
        assert_eq!(consonant_band("STR").center, 5000.0);
        assert_eq!(consonant_band("N"), DEFAULT_NOISE_BAND);
        assert_eq!(consonant_band(""), DEFAULT_NOISE_BAND);
    }

    #[test]
    fn test_voicing() {
        assert!(is_voiced_onset("N"));
        assert!(is_voiced_onset("W"));
        assert!(!is_voiced_onset("S"));
        assert!(!is_voiced_onset("NY"));
    }

    #[test]
    fn test_lerp_centers() {
        let a = FormantTargets::for_unit(&SyllableUnit::syllable(None, Some(Vowel::A)));
        let i = FormantTargets::for_unit(&SyllableUnit::syllable(None, Some(Vowel::I)));
        let mid = a.lerp_centers(&i, 0.5);
        assert_eq!(mid.centers, [500.0, 1750.0, 2725.0]);
        assert_eq!(a.lerp_centers(&i, 2.0).centers, i.centers);
    }
}
