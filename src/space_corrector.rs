//! Rule-based word-boundary correction.
//!
//! The corrector runs the trigram, bigram and unigram dictionary passes (in
//! that order) and finishes with regex prefix/suffix joins.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dictionary_lib::{Lexicon, PhraseTable};
use crate::utils::longest_first_alternation;

const INFLECTIONAL_SUFFIXES: &[&str] = &[
    "هایی", "ها", "های", "ایی", "هایم", "هایت", "هایش", "هایمان", "هایتان", "هایشان", "ات", "ان", "ین",
    "انی", "بان", "ام", "ای", "یم", "ید", "اید", "اند", "بودم", "بودی", "بود", "بودیم", "بودید",
    "بودند", "ست",
];

const DERIVATIONAL_SUFFIXES: &[&str] = &[
    "طلبان", "طلب", "گرایی", "گرایان", "شناس", "شناسی", "گذاری", "گذار", "گذاران", "شناسان", "گیری",
    "پذیری", "بندی", "آوری", "سازی", "کننده", "کنندگان", "پرداز", "پردازی", "پردازان", "آمیز", "سنجی",
    "ریزی", "داری", "دهنده", "پذیر", "پذیران", "گر", "ریز", "رسانی", "یاب", "یابی", "گانه",
    "گانه\u{200c}ای", "انگاری", "گا", "بند", "دهندگان", "دار",
];

/// `(pattern, replacement)` pairs applied in order by [`regex_pass`].
///
/// Suffix rules capture the trailing space so adjacent suffixes can be
/// joined in separate passes of the loop.
static RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    let inflectional = longest_first_alternation(INFLECTIONAL_SUFFIXES);
    let derivational = longest_first_alternation(DERIVATIONAL_SUFFIXES);
    vec![
        (Regex::new(r"^(نمی|بی|می) ").unwrap(), "${1}\u{200c}".to_string()),
        (Regex::new(r"( )(نمی|بی|می)( )").unwrap(), "${1}${2}\u{200c}".to_string()),
        (
            Regex::new(&format!("( )({})( )", inflectional)).unwrap(),
            "\u{200c}${2}${3}".to_string(),
        ),
        (Regex::new(r"( )(نشده|شده)( )").unwrap(), "\u{200c}${2}\u{200c}".to_string()),
        (
            Regex::new(&format!("( )({})( )", derivational)).unwrap(),
            "\u{200c}${2}${3}".to_string(),
        ),
    ]
});

/// Applies the prefix, suffix, `شده` and derivational-suffix joins.
///
/// ```
/// use parsinorm::space_corrector::regex_pass;
/// assert_eq!(regex_pass("می روم"), "می\u{200c}روم");
/// assert_eq!(regex_pass("کتاب ها را"), "کتاب\u{200c}ها را");
/// ```
pub fn regex_pass(text: &str) -> String {
    RULES.iter().fold(text.to_string(), |acc, (re, replacement)| {
        re.replace_all(&acc, replacement.as_str()).into_owned()
    })
}

fn tokens(text: &str) -> Vec<&str> {
    text.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Greedy left-to-right pass with a window of `width` tokens.
///
/// When the concatenation of the window is a key in `table`, its value is
/// emitted and the whole window is consumed; otherwise one token is emitted
/// unchanged. Inputs shorter than the window are returned as-is.
fn ngram_pass(text: &str, table: &PhraseTable, width: usize) -> String {
    let words = tokens(text);
    if words.len() < width {
        return text.to_string();
    }

    let mut out: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if i + width <= words.len() {
            let key = words[i..i + width].concat();
            if let Some(value) = table.get(&key) {
                out.push(value);
                i += width;
                continue;
            }
        }
        out.push(words[i]);
        i += 1;
    }
    out.join(" ")
}

/// Dictionary and regex based space corrector.
#[derive(Debug, Clone)]
pub struct SpaceCorrector {
    lexicon: Arc<Lexicon>,
}

impl SpaceCorrector {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn unigram(&self, text: &str) -> String {
        ngram_pass(text, &self.lexicon.dic1, 1)
    }

    pub fn bigram(&self, text: &str) -> String {
        ngram_pass(text, &self.lexicon.dic2, 2)
    }

    pub fn trigram(&self, text: &str) -> String {
        ngram_pass(text, &self.lexicon.dic3, 3)
    }

    /// `regex_pass(unigram(bigram(trigram(text))))`, trimmed.
    pub fn correct(&self, text: &str) -> String {
        let text = self.trigram(text);
        let text = self.bigram(&text);
        let text = self.unigram(&text);
        regex_pass(&text).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> SpaceCorrector {
        SpaceCorrector::new(Arc::new(Lexicon::new()))
    }

    #[test]
    fn trigram_joins_three_tokens() {
        let c = corrector();
        assert_eq!(c.trigram("ما گفت و گو کردیم"), "ما گفت\u{200c}وگو کردیم");
        assert_eq!(c.trigram("گفت و"), "گفت و");
    }

    #[test]
    fn bigram_keeps_trailing_token() {
        let c = corrector();
        assert_eq!(c.bigram("گفت وگو کردیم"), "گفت\u{200c}وگو کردیم");
        assert_eq!(c.bigram("الف ب ج"), "الف ب ج");
        assert_eq!(c.bigram("تنها"), "تنها");
    }

    #[test]
    fn unigram_replaces_known_tokens() {
        let c = corrector();
        assert_eq!(c.unigram("آنها آمدند"), "آن\u{200c}ها آمدند");
    }

    #[test]
    fn suffix_rules_prefer_longest() {
        assert_eq!(regex_pass("الف کتاب هایشان ب"), "الف کتاب\u{200c}هایشان ب");
        assert_eq!(regex_pass("الف کار شده است"), "الف کار\u{200c}شده\u{200c}است");
        assert_eq!(regex_pass("الف نمی دانم"), "الف نمی\u{200c}دانم");
    }

    #[test]
    fn correction_is_deterministic() {
        let c = corrector();
        let input = "آنها گفت و گو می کنند";
        let first = c.correct(input);
        assert_eq!(first, c.correct(input));
        assert_eq!(first, "آن\u{200c}ها گفت\u{200c}وگو می\u{200c}کنند");
    }
}
