//! Japanese syllabary transliteration.
//!
//! Hiragana is folded onto katakana first, then two-character palatalized
//! digraphs are replaced before single symbols. The small tsu becomes the
//! geminate marker `Q`; the long-vowel mark becomes `-`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Geminate marker emitted for the small tsu.
pub const GEMINATE_MARK: char = 'Q';

/// Elongation marker emitted for the long-vowel mark.
pub const ELONGATION_MARK: char = '-';

/// Digraphs, matched before single symbols.
const DIGRAPHS: &[(&str, &str)] = &[
    ("キャ", "KYA"),
    ("キュ", "KYU"),
    ("キョ", "KYO"),
    ("ギャ", "GYA"),
    ("ギュ", "GYU"),
    ("ギョ", "GYO"),
    ("シャ", "SHA"),
    ("シュ", "SHU"),
    ("ショ", "SHO"),
    ("シェ", "SHE"),
    ("ジャ", "JA"),
    ("ジュ", "JU"),
    ("ジョ", "JO"),
    ("ジェ", "JE"),
    ("チャ", "CHA"),
    ("チュ", "CHU"),
    ("チョ", "CHO"),
    ("チェ", "CHE"),
    ("ニャ", "NYA"),
    ("ニュ", "NYU"),
    ("ニョ", "NYO"),
    ("ヒャ", "HYA"),
    ("ヒュ", "HYU"),
    ("ヒョ", "HYO"),
    ("ビャ", "BYA"),
    ("ビュ", "BYU"),
    ("ビョ", "BYO"),
    ("ピャ", "PYA"),
    ("ピュ", "PYU"),
    ("ピョ", "PYO"),
    ("ミャ", "MYA"),
    ("ミュ", "MYU"),
    ("ミョ", "MYO"),
    ("リャ", "RYA"),
    ("リュ", "RYU"),
    ("リョ", "RYO"),
    ("ティ", "TI"),
    ("ディ", "DI"),
    ("ファ", "FA"),
    ("フィ", "FI"),
    ("フェ", "FE"),
    ("フォ", "FO"),
    ("ウィ", "WI"),
    ("ウェ", "WE"),
    ("ウォ", "WO"),
    ("ヴァ", "VA"),
];

/// Single symbols.
const SINGLES: &[(char, &str)] = &[
    ('ァ', "A"),
    ('ィ', "I"),
    ('ゥ', "U"),
    ('ェ', "E"),
    ('ォ', "O"),
    ('ア', "A"),
    ('イ', "I"),
    ('ウ', "U"),
    ('エ', "E"),
    ('オ', "O"),
    ('カ', "KA"),
    ('キ', "KI"),
    ('ク', "KU"),
    ('ケ', "KE"),
    ('コ', "KO"),
    ('サ', "SA"),
    ('シ', "SHI"),
    ('ス', "SU"),
    ('セ', "SE"),
    ('ソ', "SO"),
    ('タ', "TA"),
    ('チ', "CHI"),
    ('ツ', "TSU"),
    ('テ', "TE"),
    ('ト', "TO"),
    ('ナ', "NA"),
    ('ニ', "NI"),
    ('ヌ', "NU"),
    ('ネ', "NE"),
    ('ノ', "NO"),
    ('ハ', "HA"),
    ('ヒ', "HI"),
    ('フ', "FU"),
    ('ヘ', "HE"),
    ('ホ', "HO"),
    ('マ', "MA"),
    ('ミ', "MI"),
    ('ム', "MU"),
    ('メ', "ME"),
    ('モ', "MO"),
    ('ャ', "YA"),
    ('ュ', "YU"),
    ('ョ', "YO"),
    ('ヤ', "YA"),
    ('ユ', "YU"),
    ('ヨ', "YO"),
    ('ラ', "RA"),
    ('リ', "RI"),
    ('ル', "RU"),
    ('レ', "RE"),
    ('ロ', "RO"),
    ('ヮ', "WA"),
    ('ワ', "WA"),
    ('ヲ', "O"),
    ('ン', "N"),
    ('ガ', "GA"),
    ('ギ', "GI"),
    ('グ', "GU"),
    ('ゲ', "GE"),
    ('ゴ', "GO"),
    ('ザ', "ZA"),
    ('ジ', "JI"),
    ('ズ', "ZU"),
    ('ゼ', "ZE"),
    ('ゾ', "ZO"),
    ('ダ', "DA"),
    ('ヂ', "JI"),
    ('ヅ', "ZU"),
    ('デ', "DE"),
    ('ド', "DO"),
    ('バ', "BA"),
    ('ビ', "BI"),
    ('ブ', "BU"),
    ('ベ', "BE"),
    ('ボ', "BO"),
    ('パ', "PA"),
    ('ピ', "PI"),
    ('プ', "PU"),
    ('ペ', "PE"),
    ('ポ', "PO"),
    ('ヴ', "VU"),
    ('ッ', "Q"),
    ('ー', "-"),
];

struct KanaTables {
    digraphs: HashMap<(char, char), &'static str>,
    singles: HashMap<char, &'static str>,
}

static TABLES: OnceLock<KanaTables> = OnceLock::new();

fn tables() -> &'static KanaTables {
    TABLES.get_or_init(|| {
        let digraphs = DIGRAPHS
            .iter()
            .filter_map(|(kana, roman)| {
                let mut chars = kana.chars();
                Some(((chars.next()?, chars.next()?), *roman))
            })
            .collect();
        let singles = SINGLES.iter().copied().collect();
        KanaTables { digraphs, singles }
    })
}

/// Number of syllabary entries known to the transliterator.
pub fn table_len() -> usize {
    DIGRAPHS.len() + SINGLES.len()
}

/// Folds a hiragana code point onto its katakana counterpart.
fn fold_hiragana(c: char) -> char {
    match c {
        '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
        _ => c,
    }
}

/// Replaces syllabary symbols with Latin letters; other characters pass through.
pub fn transliterate(text: &str) -> String {
    let tables = tables();
    let chars: Vec<char> = text.chars().map(fold_hiragana).collect();
    let mut out = String::with_capacity(text.len());

    let mut i = 0;
    while i < chars.len() {
        if let Some(next) = chars.get(i + 1) {
            if let Some(roman) = tables.digraphs.get(&(chars[i], *next)) {
                out.push_str(roman);
                i += 2;
                continue;
            }
        }
        match tables.singles.get(&chars[i]) {
            Some(roman) => out.push_str(roman),
            None => out.push(chars[i]),
        }
        i += 1;
    }

    out
}
