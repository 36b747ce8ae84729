//! Greedy onset/nucleus segmentation of a single word.

use crate::unit::{SyllableUnit, Vowel};

use super::kana::GEMINATE_MARK;

/// Letters that may start an onset.
const ONSET_CONSONANTS: &str = "BCDFGHJKLMNPRSTVWXZ";

/// Fixed two-letter onsets, tried first.
const DIGRAPH_ONSETS: [&str; 3] = ["CH", "SH", "TS"];

/// Stops allowed between `S` and `R` in a three-letter cluster.
const S_CLUSTER_STOPS: &str = "PTK";

/// Letters that extend a single consonant onset.
const LIQUIDS: &str = "RLY";

/// Longest onset that still takes a `Y` glide.
const MAX_GLIDE_BASE: usize = 2;

fn vowel_at(chars: &[char], i: usize) -> Option<Vowel> {
    chars.get(i).copied().and_then(Vowel::from_char)
}

fn is_consonant(c: char) -> bool {
    ONSET_CONSONANTS.contains(c)
}

/// `N` that closes a syllable rather than opening one.
fn is_moraic_nasal_at(chars: &[char], i: usize) -> bool {
    chars.get(i) == Some(&'N')
        && vowel_at(chars, i + 1).is_none()
        && !(chars.get(i + 1) == Some(&'Y') && vowel_at(chars, i + 2).is_some())
}

/// Matches the longest onset starting at `i`, returning it and the next index.
fn match_onset(chars: &[char], i: usize) -> (String, usize) {
    for digraph in DIGRAPH_ONSETS {
        if digraph
            .chars()
            .enumerate()
            .all(|(k, c)| chars.get(i + k) == Some(&c))
        {
            return (digraph.to_string(), i + 2);
        }
    }

    if chars.get(i) == Some(&'S')
        && chars.get(i + 1).is_some_and(|&c| S_CLUSTER_STOPS.contains(c))
        && chars.get(i + 2) == Some(&'R')
    {
        return (chars[i..i + 3].iter().collect(), i + 3);
    }

    let Some(&first) = chars.get(i).filter(|&&c| is_consonant(c)) else {
        return (String::new(), i);
    };

    let mut onset = String::from(first);
    let mut next = i + 1;
    if let Some(&liquid) = chars.get(next).filter(|&&c| LIQUIDS.contains(c)) {
        onset.push(liquid);
        next += 1;
    }
    if let Some(&extra) = chars.get(next).filter(|&&c| is_consonant(c)) {
        if !is_moraic_nasal_at(chars, next) {
            onset.push(extra);
            next += 1;
        }
    }

    (onset, next)
}

/// Segments one whitespace-free word into units.
///
/// Letters that fit no rule are skipped. `Q` emits a geminate placeholder,
/// folded later by [`super::fold_geminates`].
pub fn segment_word(word: &str, units: &mut Vec<SyllableUnit>) {
    let chars: Vec<char> = word.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == GEMINATE_MARK {
            units.push(SyllableUnit::geminate());
            i += 1;
            continue;
        }
        if is_moraic_nasal_at(&chars, i) {
            units.push(SyllableUnit::moraic_nasal());
            i += 1;
            continue;
        }

        let (mut onset, next) = match_onset(&chars, i);
        i = next;

        if let Some(vowel) = vowel_at(&chars, i) {
            units.push(SyllableUnit::syllable(Some(&onset), Some(vowel)));
            i += 1;
        } else if let (Some('Y'), Some(vowel)) = (chars.get(i).copied(), vowel_at(&chars, i + 1)) {
            if onset.len() <= MAX_GLIDE_BASE {
                onset.push('Y');
            }
            units.push(SyllableUnit::syllable(Some(&onset), Some(vowel)));
            i += 2;
        } else if is_moraic_nasal_at(&chars, i) {
            units.push(SyllableUnit::moraic_nasal());
            i += 1;
        } else if onset.is_empty() {
            i += 1;
        }
        // A dangling onset is dropped; the letter after it is retried.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(word: &str) -> Vec<String> {
        let mut units = Vec::new();
        segment_word(word, &mut units);
        units.iter().map(SyllableUnit::label).collect()
    }

    #[test]
    fn test_digraph_onsets() {
        assert_eq!(labels("CHISHATSU"), ["CHI", "SHA", "TSU"]);
    }

    #[test]
    fn test_s_stop_r_cluster() {
        assert_eq!(labels("STRI")[0], "STRI");
        assert_eq!(labels("SPRI")[0], "SPRI");
        assert_eq!(labels("SKRA")[0], "SKRA");
    }

    #[test]
    fn test_liquid_extension() {
        assert_eq!(labels("PLIIT"), ["PLI", "I"]);
        assert_eq!(labels("KYA"), ["KYA"]);
        assert_eq!(labels("STA"), ["STA"]);
    }

    #[test]
    fn test_glide() {
        assert_eq!(labels("YA"), ["YA"]);
        assert_eq!(labels("SHYO"), ["SHYO"]);
    }

    #[test]
    fn test_glide_needs_room_in_onset() {
        assert_eq!(labels("KYO"), ["KYO"]);
        assert_eq!(labels("STRYA"), ["STRA"]);
    }

    #[test]
    fn test_dangling_onset_retries_next_letter() {
        // SH has no vowel, so R starts over and takes the I.
        assert_eq!(labels("SHRIMP"), ["RI"]);
    }

    #[test]
    fn test_moraic_nasal() {
        assert_eq!(labels("KON"), ["KO", "N"]);
        assert_eq!(labels("KONPA"), ["KO", "N", "PA"]);
        assert_eq!(labels("NA"), ["NA"]);
        assert_eq!(labels("NYA"), ["NYA"]);
        assert_eq!(labels("NN"), ["N", "N"]);
    }

    #[test]
    fn test_unmatched_letters_are_skipped() {
        assert_eq!(labels("T"), Vec::<String>::new());
        assert_eq!(labels("123"), Vec::<String>::new());
        assert_eq!(labels("-A"), ["A"]);
        assert_eq!(labels("TAK"), ["TA"]);
    }

    #[test]
    fn test_geminate_placeholder() {
        let mut units = Vec::new();
        segment_word("KAQTO", &mut units);
        assert_eq!(units.len(), 3);
        assert!(units[1].is_geminate);
        assert_eq!(units[1].duration_ms, 0);
    }

    #[test]
    fn test_dangling_onset_before_geminate() {
        let mut units = Vec::new();
        segment_word("KQTA", &mut units);
        assert!(units[0].is_geminate);
        assert_eq!(units[1].label(), "TA");
    }
}
