use crate::utils::{is_short_vowel_mark, remove_diacritics, SHADDA, SUKUN, ZWNJ};

const MI: &str = "می";

/// Separates the imperfective prefix `می` from the stem with a ZWNJ.
///
/// Applies only when the Pinglish word starts with `mi` and the rendering
/// starts with `می` followed by more of the word. A short-vowel mark written
/// on the prefix is dropped.
pub(crate) fn join_mi_prefix(rendered: &str, pinglish: &str) -> String {
    if !pinglish.to_ascii_lowercase().starts_with("mi") {
        return rendered.to_string();
    }
    let Some(rest) = rendered.strip_prefix(MI) else {
        return rendered.to_string();
    };
    let rest = rest.strip_prefix(is_short_vowel_mark).unwrap_or(rest);

    match rest.chars().next() {
        Some(c) if c != ZWNJ && !c.is_whitespace() && c != SHADDA && c != SUKUN => {
            format!("{MI}{ZWNJ}{rest}")
        }
        _ => rendered.to_string(),
    }
}

/// Cleans up mark sequences the scanner can produce.
///
/// A sukun directly before a short-vowel mark is removed, repeated identical
/// short-vowel marks collapse to one, repeated sukuns collapse, and a sukun
/// next to a shadda is dropped.
pub fn fix_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match (out.chars().next_back(), c) {
            (Some(SUKUN), v) if is_short_vowel_mark(v) => {
                out.pop();
                if !out.ends_with(v) {
                    out.push(v);
                }
            }
            (Some(SUKUN), SHADDA) => {
                out.pop();
                out.push(SHADDA);
            }
            (Some(SUKUN | SHADDA), SUKUN) => {}
            (Some(prev), v) if prev == v && is_short_vowel_mark(v) => {}
            _ => out.push(c),
        }
    }
    out
}

/// Replaces each transliterated word with its reference word when the two
/// differ but have the same number of base letters.
///
/// Runs only when both sentences have the same number of words.
pub(crate) fn align_with_reference(words: &mut [String], reference: &[&str]) {
    if words.len() != reference.len() {
        return;
    }
    for (word, reference) in words.iter_mut().zip(reference) {
        let ours = remove_diacritics(word);
        let theirs = remove_diacritics(reference);
        if ours != theirs && ours.chars().count() == theirs.chars().count() {
            *word = reference.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mi_prefix_gets_zwnj() {
        assert_eq!(join_mi_prefix("میرَوی", "miravi"), "می\u{200c}رَوی");
        assert_eq!(join_mi_prefix("میآمَدی", "miAmadi"), "می\u{200c}آمَدی");
        assert_eq!(join_mi_prefix("می", "mi"), "می");
        assert_eq!(join_mi_prefix("میرَوی", "ravi"), "میرَوی");
    }

    #[test]
    fn diacritic_cleanup() {
        assert_eq!(fix_diacritics("ب\u{0652}\u{064e}"), "ب\u{064e}");
        assert_eq!(fix_diacritics("ب\u{064e}\u{064e}"), "ب\u{064e}");
        assert_eq!(fix_diacritics("ب\u{0652}\u{0652}"), "ب\u{0652}");
        assert_eq!(fix_diacritics("ن\u{0651}\u{0652}"), "ن\u{0651}");
        assert_eq!(fix_diacritics("ن\u{0652}\u{0651}"), "ن\u{0651}");
        assert_eq!(fix_diacritics("ب\u{064e}\u{0652}\u{064e}"), "ب\u{064e}");
    }

    #[test]
    fn alignment_substitutes_same_length_words() {
        let mut words = vec!["کارْ".to_string(), "تو".to_string()];
        align_with_reference(&mut words, &["گار", "تو"]);
        assert_eq!(words, vec!["گار", "تو"]);

        let mut words = vec!["خُبْ".to_string()];
        align_with_reference(&mut words, &["خوب"]);
        assert_eq!(words, vec!["خُبْ"]);
    }

    #[test]
    fn alignment_skipped_on_word_count_mismatch() {
        let mut words = vec!["کارْ".to_string()];
        align_with_reference(&mut words, &["گار", "تو"]);
        assert_eq!(words, vec!["کارْ"]);
    }
}
