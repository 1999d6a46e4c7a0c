//! Shared constants and small text helpers used across the pipeline passes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Zero-width non-joiner, the Persian half-space.
pub const ZWNJ: char = '\u{200c}';
/// Zero-width joiner.
pub const ZWJ: char = '\u{200d}';

pub const FATHA: char = '\u{064e}';
pub const DAMMA: char = '\u{064f}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';

/// Conjunction used when spelling out numbers and clock times.
pub const CONJUNCTION: &str = " وَ ";

/// Returns `true` for the three short-vowel marks (fatha, damma, kasra).
#[inline]
pub fn is_short_vowel_mark(c: char) -> bool {
    matches!(c, FATHA | DAMMA | KASRA)
}

/// Returns `true` for every combining mark stripped by [`remove_diacritics`].
#[inline]
pub fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064b}'..='\u{0652}' | '\u{0670}' | '\u{0654}' | '\u{0655}')
}

/// Strips diacritics together with ZWNJ/ZWJ, leaving only base letters.
///
/// Used to compare a diacritized rendering against an undiacritized reference.
///
/// ```
/// use parsinorm::utils::remove_diacritics;
/// assert_eq!(remove_diacritics("می‌آمَدی"), "میآمدی");
/// ```
pub fn remove_diacritics(text: &str) -> String {
    text.chars()
        .filter(|&c| c != ZWNJ && c != ZWJ && !is_diacritic(c))
        .collect()
}

/// Looks for any of `keywords` among the whitespace tokens around `start..end`.
///
/// For a `span` of `n`, the `n - 1` tokens immediately before `start` and the
/// `n - 1` tokens immediately after `end` are inspected. A span below 2
/// inspects nothing.
pub fn keyword_window<S: AsRef<str>>(
    text: &str,
    start: usize,
    end: usize,
    keywords: &[S],
    span: usize,
) -> bool {
    if span < 2 {
        return false;
    }
    let width = span - 1;
    let is_keyword = |token: &str| keywords.iter().any(|k| k.as_ref() == token);

    text[..start]
        .split_whitespace()
        .rev()
        .take(width)
        .chain(text[end..].split_whitespace().take(width))
        .any(is_keyword)
}

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0b-\x1f\x7f\u{200e}\u{200f}\u{feff}]").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Generic whitespace and control-character cleanup.
///
/// Control characters (other than newline and tab) become spaces, runs of
/// spaces collapse, and newlines either collapse to one or, with
/// `new_line_elimination`, turn into spaces. The result is trimmed.
pub fn clean_text(text: &str, new_line_elimination: bool) -> String {
    let text = CONTROL_CHARS.replace_all(text, " ");
    let text = NEWLINE_RUNS.replace_all(&text, if new_line_elimination { " " } else { "\n" });
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

static DIGIT_THEN_OTHER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])([^0-9\s])").unwrap());
static OTHER_THEN_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^0-9\s])([0-9])").unwrap());

/// Inserts a space at every boundary between a digit and a non-digit.
///
/// ```
/// use parsinorm::utils::split_digit_from_alphabet;
/// assert_eq!(split_digit_from_alphabet("ساعت10"), "ساعت 10");
/// assert_eq!(split_digit_from_alphabet("1401/05/12"), "1401 / 05 / 12");
/// ```
pub fn split_digit_from_alphabet(text: &str) -> String {
    let text = DIGIT_THEN_OTHER.replace_all(text, "$1 $2");
    OTHER_THEN_DIGIT.replace_all(&text, "$1 $2").into_owned()
}

static PERSIAN_THEN_OTHER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\u{0622}-\u{06f0}])([^\u{0622}-\u{06f0}\s\u{200c}\u{200d}])").unwrap()
});
static LATIN_THEN_OTHER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z])([^a-zA-Z\s\u{200c}])").unwrap());
static LATIN_THEN_OTHER_PINGLISH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z])([^a-zA-Z\s\u{200c}?;])").unwrap());

/// Separates Persian-script runs and Latin runs from whatever follows them.
///
/// When `keep_pinglish` is set, the glottal-stop and zheh stand-ins (`?`, `;`)
/// stay attached to the Latin run so Pinglish tokens survive intact.
pub fn split_script_from_latin(text: &str, keep_pinglish: bool) -> String {
    let text = PERSIAN_THEN_OTHER.replace_all(text, "$1 $2");
    let latin = if keep_pinglish {
        &*LATIN_THEN_OTHER_PINGLISH
    } else {
        &*LATIN_THEN_OTHER
    };
    latin.replace_all(&text, "$1 $2").into_owned()
}

/// Builds a regex alternation from `words`, longest first, so that no shorter
/// entry can shadow a longer one at the same position.
pub fn longest_first_alternation(words: &[&str]) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    sorted.dedup();
    sorted
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_window_respects_span() {
        let text = "مورخ الف ب 5/6 پ";
        let start = text.find("5/6").unwrap();
        let end = start + "5/6".len();
        let keywords = ["مورخ"];
        assert!(!keyword_window(text, start, end, &keywords, 3));
        assert!(keyword_window(text, start, end, &keywords, 4));
        assert!(!keyword_window(text, start, end, &keywords, 1));
    }

    #[test]
    fn keyword_window_looks_after_match() {
        let text = "5:30 وقت";
        let keywords = ["وقت"];
        assert!(keyword_window(text, 0, 4, &keywords, 2));
    }

    #[test]
    fn clean_text_collapses_and_trims() {
        assert_eq!(clean_text("  الف\u{7}  ب \n\n ج ", false), "الف ب\nج");
        assert_eq!(clean_text("الف\n\nب", true), "الف ب");
    }

    #[test]
    fn split_script_keeps_pinglish_markers() {
        assert_eq!(split_script_from_latin("sa?di", true), "sa?di");
        assert_eq!(split_script_from_latin("sa?di", false), "sa ?di");
        assert_eq!(split_script_from_latin("سلام،", false), "سلام ،");
    }

    #[test]
    fn alternation_orders_longest_first() {
        assert_eq!(longest_first_alternation(&["ها", "هایی", "های"]), "هایی|های|ها");
    }
}
