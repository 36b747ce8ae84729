//! Loanword substitution dictionary.
//!
//! Whole words are rewritten into syllables the chip pronounces well. Matching
//! is case-insensitive and anchored on word boundaries, so `DESTROYED` never
//! matches the shorter `DESTROY` entry.

use std::sync::OnceLock;

use regex::{Captures, Regex};

const ENTRIES: [(&str, &str); 22] = [
    ("FIRE", "FAI YA"),
    ("DESTROY", "DES TROI"),
    ("ALL", "AUL"),
    ("THEM", "ZEM"),
    ("ATTACK", "A TAK"),
    ("MISSION", "MI SHON"),
    ("START", "STAAT"),
    ("LASER", "LEI ZER"),
    ("LAUNCH", "LON CH"),
    ("MISSILE", "MI SAIL"),
    ("WARNING", "WOA NING"),
    ("ENERGY", "E NE JI"),
    ("BOSS", "BOS"),
    ("OPTION", "OP SHON"),
    ("POWER", "PAU A"),
    ("UP", "AP"),
    ("READY", "RE DI"),
    ("GO", "GO"),
    ("PLAYER", "PLEI YA"),
    ("TARGET", "TAA GET"),
    ("COMPLETE", "KON PLIIT"),
    ("DESTROYED", "DES TROID"),
];

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| {
        let mut words: Vec<&str> = ENTRIES.iter().map(|(word, _)| *word).collect();
        // Longest first so alternation never stops at a prefix.
        words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).expect("invalid regex pattern")
    })
}

/// All `(word, phonetic)` pairs.
pub fn entries() -> &'static [(&'static str, &'static str)] {
    &ENTRIES
}

/// Phonetic spelling for a word, ignoring case.
pub fn lookup(word: &str) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(word))
        .map(|(_, phonetic)| *phonetic)
}

/// Rewrites every dictionary word in `text`.
pub fn substitute(text: &str) -> String {
    word_regex()
        .replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            lookup(word).unwrap_or(word).to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_words_only() {
        assert_eq!(substitute("FIRE"), "FAI YA");
        assert_eq!(substitute("FIREWORK"), "FIREWORK");
        assert_eq!(substitute("GO UP"), "GO AP");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(substitute("Ready Player"), "RE DI PLEI YA");
    }

    #[test]
    fn test_longer_word_wins() {
        assert_eq!(substitute("DESTROYED"), "DES TROID");
        assert_eq!(substitute("DESTROY ALL"), "DES TROI AUL");
    }

    #[test]
    fn test_phonetic_forms_are_stable() {
        for (_, phonetic) in entries() {
            assert_eq!(substitute(phonetic), *phonetic, "{}", phonetic);
        }
    }
}
