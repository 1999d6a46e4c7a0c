//! Statistical space correction.
//!
//! A [`TokenMerger`] decides which adjacent tokens belong to one word and
//! joins them with a half-space. [`PairFrequencyMerger`] learns that from a
//! corpus in which correctly written words already carry their ZWNJs: every
//! ZWNJ inside a token is a vote for joining its two sides, every space
//! between tokens a vote for keeping them apart.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dictionary_lib::DictionaryError;
use crate::utils::ZWNJ;

/// Strategy for merging whitespace tokens into half-spaced words.
pub trait TokenMerger: Send + Sync {
    /// Returns `tokens` with every pair judged to be one word joined by
    /// `joiner`. Order is preserved.
    fn merge_tokens(&self, tokens: &[String], joiner: char) -> Vec<String>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairCounts {
    pub joined: u32,
    pub split: u32,
}

/// Pair model: counts of each adjacent pair seen joined and seen split.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PairFrequencyMerger {
    pairs: FxHashMap<String, PairCounts>,
    /// Minimum joined count before a pair is merged.
    pub min_count: u32,
}

impl Default for PairFrequencyMerger {
    fn default() -> Self {
        Self {
            pairs: FxHashMap::default(),
            min_count: 2,
        }
    }
}

fn pair_key(left: &str, right: &str) -> String {
    format!("{} {}", left, right)
}

impl PairFrequencyMerger {
    pub fn new(min_count: u32) -> Self {
        Self {
            min_count,
            ..Self::default()
        }
    }

    /// Counts joined and split pairs in `corpus`.
    pub fn train_from_str(&mut self, corpus: &str) {
        for line in corpus.lines() {
            let tokens: Vec<&str> = line
                .split_whitespace()
                .map(|t| t.trim_matches(ZWNJ))
                .filter(|t| !t.is_empty())
                .collect();

            for token in &tokens {
                let parts: Vec<&str> = token.split(ZWNJ).filter(|p| !p.is_empty()).collect();
                for pair in parts.windows(2) {
                    self.pairs.entry(pair_key(pair[0], pair[1])).or_default().joined += 1;
                }
            }

            for pair in tokens.windows(2) {
                let left = pair[0].rsplit(ZWNJ).next().unwrap_or(pair[0]);
                let right = pair[1].split(ZWNJ).next().unwrap_or(pair[1]);
                self.pairs.entry(pair_key(left, right)).or_default().split += 1;
            }
        }
        debug!(pairs = self.pairs.len(), "trained pair model");
    }

    pub fn train_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DictionaryError> {
        let corpus = fs::read_to_string(&path).map_err(|e| {
            DictionaryError::IoError(format!(
                "Failed to read corpus {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        self.train_from_str(&corpus);
        Ok(())
    }

    pub fn counts(&self, left: &str, right: &str) -> PairCounts {
        self.pairs.get(&pair_key(left, right)).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn should_join(&self, left: &str, right: &str) -> bool {
        let counts = self.counts(left, right);
        counts.joined >= self.min_count && counts.joined > counts.split
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let file = File::create(&path).map_err(|e| DictionaryError::IoError(e.to_string()))?;
        serde_cbor::to_writer(BufWriter::new(file), self)
            .map_err(|e| DictionaryError::ParseError(e.to_string()))?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(&path).map_err(|e| DictionaryError::IoError(e.to_string()))?;
        serde_cbor::from_reader(BufReader::new(file)).map_err(|e| DictionaryError::ParseError(e.to_string()))
    }

    /// Loads the model at `model`, or trains one from `corpus` and saves it
    /// at `model`.
    ///
    /// Returns `None` (with a warning) when neither file is usable; callers
    /// then fall back to rule-based correction.
    pub fn load_or_train<P, Q>(model: P, corpus: Option<Q>) -> Option<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let model = model.as_ref();
        if model.is_file() {
            match Self::load(model) {
                Ok(merger) => {
                    info!(pairs = merger.len(), path = %model.display(), "loaded token merger");
                    return Some(merger);
                }
                Err(err) => warn!("ignoring unreadable token merger {}: {}", model.display(), err),
            }
        }

        let Some(corpus) = corpus.filter(|c| c.as_ref().is_file()) else {
            warn!("no token merger model or corpus; statistical space correction disabled");
            return None;
        };

        let mut merger = Self::default();
        if let Err(err) = merger.train_from_file(&corpus) {
            warn!("{}", err);
            return None;
        }
        info!(pairs = merger.len(), corpus = %corpus.as_ref().display(), "trained token merger");
        if let Err(err) = merger.save(model) {
            warn!("could not save token merger to {}: {}", model.display(), err);
        }
        Some(merger)
    }
}

impl TokenMerger for PairFrequencyMerger {
    fn merge_tokens(&self, tokens: &[String], joiner: char) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let joins = out.last().map_or(false, |prev: &String| {
                let left = prev.rsplit(joiner).next().unwrap_or(prev);
                self.should_join(left, token)
            });
            match out.last_mut() {
                Some(prev) if joins => {
                    prev.push(joiner);
                    prev.push_str(token);
                }
                _ => out.push(token.clone()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CORPUS: &str = "کتاب‌ها روی میز است\nکتاب‌ها را بخوان\nمی‌روم خانه\nمی‌روم کتاب\n";

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn training_counts_both_sides() {
        let mut merger = PairFrequencyMerger::default();
        merger.train_from_str(CORPUS);
        assert_eq!(merger.counts("کتاب", "ها"), PairCounts { joined: 2, split: 0 });
        assert_eq!(merger.counts("ها", "روی"), PairCounts { joined: 0, split: 1 });
        assert_eq!(merger.counts("روم", "کتاب").split, 1);
    }

    #[test]
    fn merges_frequent_pairs_only() {
        let mut merger = PairFrequencyMerger::default();
        merger.train_from_str(CORPUS);
        let merged = merger.merge_tokens(&tokens("کتاب ها می روم به خانه"), ZWNJ);
        assert_eq!(merged, tokens("کتاب\u{200c}ها می\u{200c}روم به خانه"));
    }

    #[test]
    fn min_count_gates_merging() {
        let mut merger = PairFrequencyMerger::new(3);
        merger.train_from_str(CORPUS);
        assert_eq!(merger.merge_tokens(&tokens("کتاب ها"), ZWNJ), tokens("کتاب ها"));
    }

    #[test]
    fn load_or_train_saves_model() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("corpus.txt");
        let model = dir.path().join("merger.cbor");
        fs::write(&corpus, CORPUS).unwrap();

        let trained = PairFrequencyMerger::load_or_train(&model, Some(&corpus)).unwrap();
        assert!(model.is_file());

        let loaded = PairFrequencyMerger::load_or_train(&model, None::<&Path>).unwrap();
        assert_eq!(loaded.len(), trained.len());
        assert_eq!(loaded.counts("کتاب", "ها"), trained.counts("کتاب", "ها"));
    }

    #[test]
    fn load_or_train_without_inputs_disables() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.cbor");
        assert!(PairFrequencyMerger::load_or_train(&missing, Some(dir.path().join("nope.txt"))).is_none());
    }
}
