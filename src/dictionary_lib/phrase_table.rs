//! Exact-match phrase tables.
//!
//! A [`PhraseTable`] maps a key to its canonical replacement. It backs the
//! unigram/bigram/trigram space-correction dictionaries (keys are the
//! concatenation of adjacent raw tokens) and the wrong-compound table (keys
//! are space-joined word sequences).
//!
//! ## Example
//! ```
//! use parsinorm::dictionary_lib::PhraseTable;
//!
//! let table = PhraseTable::build_from_pairs(vec![
//!     ("گفتوگو".to_string(), "گفت‌وگو".to_string()),
//!     ("بازی کن".to_string(), "بازی‌کن".to_string()),
//! ]);
//!
//! assert_eq!(table.get("گفتوگو"), Some("گفت‌وگو"));
//! assert_eq!(table.max_words, 2);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A key/value table with the longest key length tracked in words.
///
/// `max_words` is the largest number of whitespace-separated words in any
/// key. Compound lookups use it to avoid probing windows no key can fill.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PhraseTable {
    pub map: FxHashMap<String, String>,
    pub max_words: usize,
}

impl PhraseTable {
    /// Builds a table from `(key, value)` pairs.
    ///
    /// ### Duplicates
    /// If the iterator yields duplicate **keys**, **first-wins**:
    /// - An identical duplicate is ignored silently.
    /// - A conflicting duplicate keeps the first value and emits a
    ///   `debug!` event.
    ///
    /// Empty keys are dropped.
    pub fn build_from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        use std::collections::hash_map::Entry;

        let it = pairs.into_iter();
        let (lower, _) = it.size_hint();

        let mut map: FxHashMap<String, String> = FxHashMap::default();
        if lower > 0 {
            map.reserve(lower);
        }
        let mut max_words = 0usize;

        for (k, v) in it {
            if k.is_empty() {
                continue;
            }
            max_words = max_words.max(k.split_whitespace().count());

            match map.entry(k) {
                Entry::Vacant(e) => {
                    e.insert(v);
                }
                Entry::Occupied(e) => {
                    if e.get() != &v {
                        debug!(
                            key = %e.key(),
                            kept = %e.get(),
                            ignored = %v,
                            "duplicate key ignored (first-wins)"
                        );
                    }
                }
            }
        }

        Self { map, max_words }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Parses `key value` lines (whitespace separated, first two fields).
///
/// Blank lines are skipped; lines with fewer than two fields are skipped
/// with a debug event.
pub fn parse_space_delimited(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
                _ => {
                    debug!("Invalid line format: {}", line);
                    None
                }
            }
        })
        .collect()
}

/// Parses `key<TAB>value` lines. Keys may contain spaces; runs of
/// whitespace inside a key collapse to one space and both columns are trimmed.
pub fn parse_tab_delimited(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match line.split_once('\t') {
            Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => Some((
                key.split_whitespace().collect::<Vec<_>>().join(" "),
                value.trim().to_string(),
            )),
            _ => {
                debug!("Invalid line format: {}", line);
                None
            }
        })
        .collect()
}
