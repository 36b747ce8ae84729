//! Text to syllable-unit conversion.
//!
//! The phonemizer is a heuristic grapheme-to-phoneme front end. It accepts
//! Latin transliteration and the Japanese syllabaries, and never fails: any
//! character it cannot place is skipped.
//!
//! ```
//! use chipvoice_synth::phonemize::phonemize;
//! use chipvoice_synth::unit::format_units;
//!
//! assert_eq!(format_units(&phonemize("キャット")), "KYA TO*");
//! assert_eq!(phonemize("FIRE"), phonemize("FAI YA"));
//! ```

pub mod dictionary;
pub mod kana;
pub mod segment;


use std::sync::OnceLock;

use regex::Regex;

use crate::unit::SyllableUnit;

/// Sentence punctuation treated as a word break.
const SENTENCE_PUNCTUATION: [char; 8] = ['!', '?', '.', '、', '。', '！', '？', '．'];

static ELONGATION_REGEX: OnceLock<Regex> = OnceLock::new();

fn elongation_regex() -> &'static Regex {
    ELONGATION_REGEX.get_or_init(|| Regex::new(r"([AIUEO])-+").expect("invalid regex pattern"))
}

/// Trims, turns sentence punctuation into spaces, collapses whitespace, uppercases.
pub fn normalize(text: &str) -> String {
    text.trim()
        .replace(&SENTENCE_PUNCTUATION[..], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Doubles the vowel before each run of elongation marks.
fn fold_elongation(word: &str) -> String {
    elongation_regex().replace_all(word, "$1$1").into_owned()
}

/// Resolves geminate placeholders.
///
/// Each placeholder gives the next unit a burst; zero-length units are then
/// dropped unless they are moraic nasals.
pub fn fold_geminates(units: &mut Vec<SyllableUnit>) {
    for j in 1..units.len() {
        if units[j - 1].is_geminate {
            units[j - 1].duration_ms = 0;
            units[j].has_burst = true;
        }
    }
    units.retain(|unit| unit.duration_ms > 0 || unit.is_moraic_nasal());
}

/// Converts text to an ordered sequence of syllable units.
///
/// Pure and total: identical input always yields the same sequence, and
/// empty or whitespace-only input yields an empty one.
pub fn phonemize(text: &str) -> Vec<SyllableUnit> {
    let normalized = normalize(text);
    let romanized = dictionary::substitute(&kana::transliterate(&normalized));

    let mut units = Vec::new();
    for word in romanized.split_whitespace() {
        segment::segment_word(&fold_elongation(word), &mut units);
    }
    fold_geminates(&mut units);

    tracing::debug!(units = units.len(), text = %romanized, "phonemized");
    units
}
