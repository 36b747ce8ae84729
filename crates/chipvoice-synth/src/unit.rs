//! Syllable units, the currency between the phonemizer and the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Duration of an onset+nucleus unit in milliseconds.
pub const SYLLABLE_DURATION_MS: u32 = 140;

/// Duration of a moraic nasal unit in milliseconds.
pub const MORAIC_NASAL_DURATION_MS: u32 = 60;

/// Onset label of the moraic nasal.
pub const MORAIC_NASAL: &str = "N";

/// One of the five vowels the chip can voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vowel {
    A,
    I,
    U,
    E,
    O,
}

impl Vowel {
    /// All vowels in table order.
    pub const ALL: [Vowel; 5] = [Vowel::A, Vowel::I, Vowel::U, Vowel::E, Vowel::O];

    /// Parses an uppercase vowel letter.
    pub fn from_char(c: char) -> Option<Vowel> {
        match c {
            'A' => Some(Vowel::A),
            'I' => Some(Vowel::I),
            'U' => Some(Vowel::U),
            'E' => Some(Vowel::E),
            'O' => Some(Vowel::O),
            _ => None,
        }
    }

    /// The uppercase letter for this vowel.
    pub fn as_char(&self) -> char {
        match self {
            Vowel::A => 'A',
            Vowel::I => 'I',
            Vowel::U => 'U',
            Vowel::E => 'E',
            Vowel::O => 'O',
        }
    }
}

impl fmt::Display for Vowel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A syllable-sized unit of speech.
///
/// Order within a sequence is temporal. After geminate folding every unit
/// has a positive duration or is a moraic nasal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllableUnit {
    /// Consonant cluster before the vowel, up to three letters.
    pub onset: Option<String>,
    /// The vowel, if any.
    pub nucleus: Option<Vowel>,
    /// Nominal duration at speaking rate 1.0.
    pub duration_ms: u32,
    /// Zero-length placeholder for a held consonant.
    pub is_geminate: bool,
    /// Reinforce the start of this unit with a decaying burst.
    pub has_burst: bool,
}

impl SyllableUnit {
    /// Creates an onset+nucleus unit of the canonical duration.
    pub fn syllable(onset: Option<&str>, nucleus: Option<Vowel>) -> Self {
        Self {
            onset: onset.filter(|o| !o.is_empty()).map(str::to_string),
            nucleus,
            duration_ms: SYLLABLE_DURATION_MS,
            is_geminate: false,
            has_burst: false,
        }
    }

    /// Creates a standalone moraic nasal.
    pub fn moraic_nasal() -> Self {
        Self {
            onset: Some(MORAIC_NASAL.to_string()),
            nucleus: None,
            duration_ms: MORAIC_NASAL_DURATION_MS,
            is_geminate: false,
            has_burst: false,
        }
    }

    /// Creates the zero-length geminate placeholder.
    pub fn geminate() -> Self {
        Self {
            onset: None,
            nucleus: None,
            duration_ms: 0,
            is_geminate: true,
            has_burst: false,
        }
    }

    /// Sets the burst flag.
    pub fn with_burst(mut self) -> Self {
        self.has_burst = true;
        self
    }

    /// Overrides the duration.
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Onset label, or the empty string.
    pub fn onset_str(&self) -> &str {
        self.onset.as_deref().unwrap_or("")
    }

    /// True for a vowelless `N` unit.
    pub fn is_moraic_nasal(&self) -> bool {
        self.nucleus.is_none() && self.onset_str() == MORAIC_NASAL
    }

    /// Diagnostic label: onset, nucleus, and `*` for burst units.
    pub fn label(&self) -> String {
        let mut label = self.onset_str().to_string();
        if let Some(v) = self.nucleus {
            label.push(v.as_char());
        }
        if self.has_burst {
            label.push('*');
        }
        label
    }
}

/// Joins unit labels with spaces, e.g. `KYA TO*`.
pub fn format_units(units: &[SyllableUnit]) -> String {
    units
        .iter()
        .map(SyllableUnit::label)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_chars_roundtrip() {
        for v in Vowel::ALL {
            assert_eq!(Vowel::from_char(v.as_char()), Some(v));
        }
        assert_eq!(Vowel::from_char('Y'), None);
        assert_eq!(Vowel::from_char('a'), None);
    }

    #[test]
    fn test_empty_onset_is_none() {
        let unit = SyllableUnit::syllable(Some(""), Some(Vowel::A));
        assert_eq!(unit.onset, None);
        assert_eq!(unit.duration_ms, SYLLABLE_DURATION_MS);
    }

    #[test]
    fn test_moraic_nasal() {
        let unit = SyllableUnit::moraic_nasal();
        assert!(unit.is_moraic_nasal());
        assert_eq!(unit.duration_ms, 60);
        assert!(!SyllableUnit::syllable(Some("N"), Some(Vowel::A)).is_moraic_nasal());
    }

    #[test]
    fn test_labels() {
        let units = vec![
            SyllableUnit::syllable(Some("KY"), Some(Vowel::A)),
            SyllableUnit::syllable(Some("T"), Some(Vowel::O)).with_burst(),
            SyllableUnit::moraic_nasal(),
        ];
        assert_eq!(format_units(&units), "KYA TO* N");
    }
}
