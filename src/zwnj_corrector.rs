//! Final half-space (ZWNJ) correction chain.
//!
//! [`ZwnjCorrector::correct`] runs, in order: [`remove_extra_space_zwnj`],
//! connectivity-table joins, compound correction and half-space group
//! joining.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::delimiter_set::is_punctuation;
use crate::dictionary_lib::{ConnectionType, Lexicon};
use crate::utils::ZWNJ;

const HALF_SPACE_SUFFIXES: &[&str] = &[
    "ام", "ات", "اش", "مان", "شان", "تان", "ایم", "اید", "اند", "ای", "ها", "های", "هایی", "هایم",
    "هایشان", "هایتان", "هایمان", "هایت", "هایش", "هائی", "تر", "ترین", "ی", "یی",
];

const HALF_SPACE_PREFIXES: &[&str] = &["می", "نمی", "برنمی", "درمی", "درنمی"];

static CLEANUP_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(
                "([\u{0648}\u{0624}\u{062f}\u{0630}\u{0631}\u{0632}\u{0698}\u{0627}\u{0622}\u{0654}\u{0621}\u{0623}\u{0625}`][\u{0627}\u{064b}][\u{0621}\u{064b}])\u{200c}",
            )
            .unwrap(),
            "$1",
        ),
        (Regex::new(r"([0-9])\x{200c}").unwrap(), "$1"),
        (Regex::new(r"\x{200c}([0-9])").unwrap(), "$1"),
        (Regex::new(r"([a-zA-Z])\x{200c}").unwrap(), "$1"),
        (Regex::new(r"\x{200c}([a-zA-Z])").unwrap(), "$1"),
        (Regex::new(r"\s{2,}").unwrap(), " "),
        (Regex::new(r"\x{200c}{2,}").unwrap(), "\u{200c}"),
        (Regex::new(r"\x{200c}\s").unwrap(), " "),
        (Regex::new(r"\s\x{200c}").unwrap(), " "),
    ]
});

/// Removes ZWNJs that cannot be right and collapses whitespace runs.
///
/// A ZWNJ next to a digit or a Latin letter, after a word-final hamza
/// cluster, or touching whitespace is dropped. Runs of whitespace become one
/// space and runs of ZWNJ become one ZWNJ.
///
/// ```
/// use parsinorm::zwnj_corrector::remove_extra_space_zwnj;
/// assert_eq!(remove_extra_space_zwnj("سلام\u{200c} دنیا"), "سلام دنیا");
/// ```
pub fn remove_extra_space_zwnj(text: &str) -> String {
    CLEANUP_RULES.iter().fold(text.to_string(), |acc, (re, replacement)| {
        re.replace_all(&acc, *replacement).into_owned()
    })
}

fn is_english_word(word: &str) -> bool {
    word.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
}

fn starts_with_punctuation(word: &str) -> bool {
    word.chars().next().map_or(false, is_punctuation)
}

fn ends_with_punctuation(word: &str) -> bool {
    word.chars().next_back().map_or(false, is_punctuation)
}

#[derive(Debug, Clone)]
pub struct ZwnjCorrector {
    lexicon: Arc<Lexicon>,
}

impl ZwnjCorrector {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Runs the whole chain with a compound window of `neighborhood` words.
    pub fn correct(&self, text: &str, neighborhood: usize) -> String {
        let text = remove_extra_space_zwnj(text);
        let text = self.join_words_without_rules(&text);
        let text = self.correct_compound(&text, neighborhood);
        self.half_space_corrector(&text)
    }

    /// Rewrites words found in the ZWNJ connectivity table.
    ///
    /// Standalone entries are replaced in place. Attach-previous entries are
    /// glued to the previous word with a ZWNJ, and attach-next entries to the
    /// next word, unless that neighbour is English or punctuation.
    pub fn join_words_without_rules(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut out: Vec<String> = Vec::with_capacity(words.len());

        let mut i = 0;
        while i < words.len() {
            let word = words[i];
            i += 1;

            let Some(entry) = self.lexicon.zwnj_table.get(word) else {
                out.push(word.to_string());
                continue;
            };
            let replacement = entry.decoded();

            match entry.connection {
                ConnectionType::Standalone => out.push(replacement),
                ConnectionType::AttachPrevious => match out.last_mut() {
                    Some(prev) if !is_english_word(prev) && !ends_with_punctuation(prev) => {
                        prev.push(ZWNJ);
                        prev.push_str(&replacement);
                    }
                    _ => out.push(replacement),
                },
                ConnectionType::AttachNext => match words.get(i) {
                    Some(next) if !is_english_word(next) && !starts_with_punctuation(next) => {
                        out.push(format!("{}{}{}", replacement, ZWNJ, next));
                        i += 1;
                    }
                    _ => out.push(replacement),
                },
            }
        }
        out.join(" ")
    }

    /// Replaces known wrong compounds, trying the longest window first.
    ///
    /// The window starts at `neighborhood` words (capped by the longest key
    /// in the table) and shrinks to one.
    pub fn correct_compound(&self, text: &str, neighborhood: usize) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let table = &self.lexicon.compound_table;
        let window = neighborhood.min(words.len()).min(table.max_words);

        let mut out: Vec<String> = Vec::with_capacity(words.len());
        let mut i = 0;
        'words: while i < words.len() {
            for j in (1..=window).rev() {
                let end = (i + j).min(words.len());
                if let Some(value) = table.get(&words[i..end].join(" ")) {
                    out.push(value.to_string());
                    i = end;
                    continue 'words;
                }
            }
            out.push(words[i].to_string());
            i += 1;
        }
        out.join(" ")
    }

    /// Joins adjacent words that form a known half-space group.
    ///
    /// - A word whose concatenated form is in the joined map (and that is not
    ///   itself a listed word) is replaced by its ZWNJ-joined form.
    /// - Otherwise the longest group chain starting at the word is joined.
    /// - Without a group, the word is joined to a following suffix (`ها`,
    ///   `تر`, ...) or, if it is a prefix (`می`, `نمی`, ...), to the next word.
    pub fn half_space_corrector(&self, text: &str) -> String {
        let half_space = &self.lexicon.half_space;
        let mut words: Vec<String> = text
            .split_whitespace()
            .map(|w| w.trim_matches(ZWNJ).to_string())
            .filter(|w| !w.is_empty())
            .collect();

        let mut result: Vec<String> = Vec::with_capacity(words.len());
        let mut idx = 0;
        while idx < words.len() {
            if !self.lexicon.is_listed(&words[idx]) {
                if let Some(joined) = half_space.joined.get(&words[idx]) {
                    words[idx] = joined.clone();
                }
            }

            let current = &words[idx];
            let next = words.get(idx + 1);
            let mut best: &[String] = std::slice::from_ref(current);
            let mut max_match = 0;

            let mut chains = half_space
                .starting_with(current)
                .filter(|group| next.map_or(false, |n| group.get(1) == Some(n)))
                .peekable();

            if chains.peek().is_some() {
                for group in chains {
                    let matched = group
                        .iter()
                        .zip(&words[idx..])
                        .take_while(|(g, w)| g == w)
                        .count();
                    if matched > 0 && max_match < matched - 1 {
                        max_match = matched - 1;
                        best = &group[..matched];
                    }
                }
            } else if let Some(next) = next {
                let joins = !starts_with_punctuation(next)
                    && (HALF_SPACE_SUFFIXES.contains(&next.as_str())
                        || HALF_SPACE_PREFIXES.contains(&current.as_str()));
                if joins {
                    best = &words[idx..idx + 2];
                    max_match = 1;
                }
            }

            result.push(best.join(&ZWNJ.to_string()));
            idx += max_match + 1;
        }
        result.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> ZwnjCorrector {
        ZwnjCorrector::new(Arc::new(Lexicon::new()))
    }

    #[test]
    fn removes_misplaced_zwnj() {
        assert_eq!(remove_extra_space_zwnj("abc\u{200c}def"), "abcdef");
        assert_eq!(remove_extra_space_zwnj("12\u{200c}3"), "123");
        assert_eq!(remove_extra_space_zwnj("الف  ب"), "الف ب");
        assert_eq!(remove_extra_space_zwnj("می\u{200c}\u{200c}روم"), "می\u{200c}روم");
        assert_eq!(remove_extra_space_zwnj("داء\u{200c}ب"), "داءب");
        assert_eq!(remove_extra_space_zwnj("الف \u{200c}ب"), "الف ب");
    }

    #[test]
    fn connectivity_table_joins() {
        let c = corrector();
        assert_eq!(c.join_words_without_rules("علیرغم تلاش"), "علی\u{200c}رغم تلاش");
        assert_eq!(c.join_words_without_rules("درحالیکه او"), "در حالی که او");
        assert_eq!(c.join_words_without_rules("کتاب هایی"), "کتاب\u{200c}هایی");
        assert_eq!(c.join_words_without_rules("| هایی"), "| هایی");
        assert_eq!(c.join_words_without_rules("book هایی"), "book هایی");
        assert_eq!(c.join_words_without_rules("نمی روم"), "نمی\u{200c}روم");
        assert_eq!(c.join_words_without_rules("نمی |"), "نمی |");
    }

    #[test]
    fn compound_prefers_longest_match() {
        let c = corrector();
        assert_eq!(c.correct_compound("او بازی کن است", 5), "او بازی\u{200c}کن است");
        assert_eq!(c.correct_compound("به روز رسانی شد", 5), "به\u{200c}روزرسانی شد");
        assert_eq!(c.correct_compound("به روز رسانی شد", 2), "به\u{200c}روز رسانی شد");
        assert_eq!(c.correct_compound("", 5), "");
    }

    #[test]
    fn half_space_groups_and_affixes() {
        let c = corrector();
        assert_eq!(c.half_space_corrector("کتاب ها"), "کتاب\u{200c}ها");
        assert_eq!(c.half_space_corrector("تو می آمدی"), "تو می\u{200c}آمدی");
        assert_eq!(c.half_space_corrector("کتابخانه"), "کتاب\u{200c}خانه");
        assert_eq!(
            c.half_space_corrector("نرم افزار ها"),
            "نرم\u{200c}افزار\u{200c}ها"
        );
        assert_eq!(c.half_space_corrector("شیر"), "شیر");
        assert_eq!(c.half_space_corrector("می |"), "می |");
    }
}
