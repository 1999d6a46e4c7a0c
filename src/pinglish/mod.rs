//! Pinglish to diacritized Persian transliteration.
//!
//! Pinglish is a Latin phonemic transcription of Persian. Besides ASCII
//! letters it uses `S` (ش), `C` (چ), `;` (ژ) and `?` (glottal stop). Each
//! word is checked against a table of known words, then scanned letter by
//! letter; ambiguous consonants are resolved against an optional
//! undiacritized reference word.

mod postprocess;
mod scanner;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::utils::remove_diacritics;
pub use postprocess::fix_diacritics;
use postprocess::{align_with_reference, join_mi_prefix};
use scanner::Scanner;

/// Known words, keyed by the lowercased Pinglish spelling.
const COMMON_WORDS: &[(&str, &str)] = &[
    ("sa?di", "سَعدی"),
    ("hafez", "حافِظْ"),
    ("qand", "قَندْ"),
    ("sekar", "شِکَر"),
    ("mixorand", "میخورَندْ"),
    ("xoda", "خُدا"),
    ("ra", "را"),
    ("sokr", "شُکْرْ"),
    ("mikonand", "میکُنَندْ"),
    ("?ali", "عَلی"),
    ("be", "بِه"),
    ("madrese", "مَدْرِسِه"),
    ("miravad", "می‌رَوَدْ"),
    ("kas", "کاشْ"),
    ("to", "تو"),
    ("ham", "هَمْ"),
    ("miamadi", "می‌آمَدی"),
    ("dar", "دَرْ"),
    ("?in", "اِینْ"),
    ("bazi", "بازیْ"),
    ("leme", "لِـمِ"),
    ("xasi", "خاصّیْ"),
    ("darad", "دارَدْ"),
    ("va", "وَ"),
];

static COMMON_WORD_TABLE: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| COMMON_WORDS.iter().copied().collect());

/// Returns `true` if every character of `token` can appear in Pinglish and
/// at least one is a letter, so stray `?` and `;` stay punctuation.
pub fn is_pinglish_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_alphabetic())
        && token
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '?' || c == ';')
}

/// Transliterates a single Pinglish word.
///
/// `reference` is the same word in Persian script; its diacritics are
/// ignored. Without it every ambiguous consonant takes its default letter.
///
/// ```
/// use parsinorm::pinglish::convert_word;
/// assert_eq!(convert_word("KAS", None), "کاشْ");
/// assert!(convert_word("tArikh", Some("طاریخ")).starts_with('ط'));
/// ```
pub fn convert_word(word: &str, reference: Option<&str>) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(known) = COMMON_WORD_TABLE.get(word.to_lowercase().as_str()) {
        return known.to_string();
    }

    let reference = reference.map(remove_diacritics);
    let rendered = Scanner::new(word, reference.as_deref()).run();
    fix_diacritics(&join_mi_prefix(&rendered, word))
}

/// Transliterates a whitespace-separated Pinglish sentence.
///
/// The words of `reference` are paired by position with the Pinglish words.
/// When both sentences have the same number of words, a rendered word whose
/// letters differ from its reference word at equal length is replaced by the
/// reference word.
pub fn pinglish_to_persian(pinglish: &str, reference: Option<&str>) -> String {
    let reference_words: Vec<&str> = reference
        .map(|r| r.split_whitespace().collect())
        .unwrap_or_default();

    let mut words: Vec<String> = pinglish
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| convert_word(word, reference_words.get(i).copied()))
        .collect();

    if !reference_words.is_empty() {
        align_with_reference(&mut words, &reference_words);
    }
    words.join(" ")
}
