//! The read-only lexical resources used by the normalizer.
//!
//! A [`Lexicon`] can be built three ways:
//!
//! - [`Lexicon::new`] parses the seed resources embedded in the crate.
//! - [`Lexicon::from_dir`] parses the text resources of a directory.
//! - [`Lexicon::deserialize_from_cbor`] / [`Lexicon::load_cbor_compressed`]
//!   read a bundle produced by [`Lexicon::serialize_to_cbor`] /
//!   [`Lexicon::save_cbor_compressed`] (see the `dict-generate` tool).
//!
//! The half-space group index is not serialized; it is rebuilt from the
//! lookup-word and homograph lists after every load.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zstd::{Decoder, Encoder};

use super::half_space::HalfSpaceGroups;
use super::phrase_table::{parse_space_delimited, parse_tab_delimited, PhraseTable};
use super::zwnj_table::ZwnjTable;
use super::DictionaryError;

pub const DIC1_FILE: &str = "dic1.txt";
pub const DIC2_FILE: &str = "dic2.txt";
pub const DIC3_FILE: &str = "dic3.txt";
pub const ZWNJ_TABLE_FILE: &str = "zwnj_table.tsv";
pub const COMPOUND_TABLE_FILE: &str = "wrong_compound.tsv";
pub const LOOKUP_WORDS_FILE: &str = "lookup_words.txt";
pub const HOMOGRAPHS_FILE: &str = "homographs.txt";

/// Which resources must exist when loading from a directory.
///
/// A missing mandatory resource fails the load with
/// [`DictionaryError::IoError`]; a missing optional one loads as empty and
/// logs a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePolicy {
    pub require_phrase_tables: bool,
    pub require_zwnj_table: bool,
    pub require_compound_table: bool,
    pub require_word_lists: bool,
}

impl Default for ResourcePolicy {
    fn default() -> Self {
        Self {
            require_phrase_tables: true,
            require_zwnj_table: false,
            require_compound_table: false,
            require_word_lists: false,
        }
    }
}

impl ResourcePolicy {
    pub fn strict() -> Self {
        Self {
            require_phrase_tables: true,
            require_zwnj_table: true,
            require_compound_table: true,
            require_word_lists: true,
        }
    }

    pub fn lenient() -> Self {
        Self {
            require_phrase_tables: false,
            require_zwnj_table: false,
            require_compound_table: false,
            require_word_lists: false,
        }
    }
}

/// Raw text of every resource, borrowed from wherever it was read.
struct RawResources<'a> {
    dic1: &'a str,
    dic2: &'a str,
    dic3: &'a str,
    zwnj_table: &'a str,
    compound_table: &'a str,
    lookup_words: &'a str,
    homographs: &'a str,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Lexicon {
    pub dic1: PhraseTable,
    pub dic2: PhraseTable,
    pub dic3: PhraseTable,
    pub zwnj_table: ZwnjTable,
    pub compound_table: PhraseTable,
    pub lookup_words: FxHashSet<String>,
    pub homographs: FxHashSet<String>,
    #[serde(skip)]
    pub half_space: HalfSpaceGroups,
}

impl Lexicon {
    /// Builds the lexicon from the seed resources compiled into the crate.
    pub fn new() -> Self {
        Self::from_raw(&RawResources {
            dic1: include_str!("../dicts/dic1.txt"),
            dic2: include_str!("../dicts/dic2.txt"),
            dic3: include_str!("../dicts/dic3.txt"),
            zwnj_table: include_str!("../dicts/zwnj_table.tsv"),
            compound_table: include_str!("../dicts/wrong_compound.tsv"),
            lookup_words: include_str!("../dicts/lookup_words.txt"),
            homographs: include_str!("../dicts/homographs.txt"),
        })
    }

    /// Loads the text resources found in `dir`.
    ///
    /// # Errors
    /// [`DictionaryError::IoError`] when a resource that `policy` marks as
    /// mandatory cannot be read.
    pub fn from_dir<P: AsRef<Path>>(dir: P, policy: ResourcePolicy) -> Result<Self, DictionaryError> {
        let dir = dir.as_ref();

        let read = |name: &str, required: bool| -> Result<String, DictionaryError> {
            let path = dir.join(name);
            match fs::read_to_string(&path) {
                Ok(content) => Ok(content),
                Err(err) if required => Err(DictionaryError::IoError(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    err
                ))),
                Err(err) => {
                    warn!("Optional resource {} not loaded ({}); using empty table", path.display(), err);
                    Ok(String::new())
                }
            }
        };

        let dic1 = read(DIC1_FILE, policy.require_phrase_tables)?;
        let dic2 = read(DIC2_FILE, policy.require_phrase_tables)?;
        let dic3 = read(DIC3_FILE, policy.require_phrase_tables)?;
        let zwnj_table = read(ZWNJ_TABLE_FILE, policy.require_zwnj_table)?;
        let compound_table = read(COMPOUND_TABLE_FILE, policy.require_compound_table)?;
        let lookup_words = read(LOOKUP_WORDS_FILE, policy.require_word_lists)?;
        let homographs = read(HOMOGRAPHS_FILE, policy.require_word_lists)?;

        Ok(Self::from_raw(&RawResources {
            dic1: &dic1,
            dic2: &dic2,
            dic3: &dic3,
            zwnj_table: &zwnj_table,
            compound_table: &compound_table,
            lookup_words: &lookup_words,
            homographs: &homographs,
        }))
    }

    fn from_raw(raw: &RawResources<'_>) -> Self {
        fn word_list(content: &str) -> FxHashSet<String> {
            content
                .lines()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect()
        }

        let mut lexicon = Self {
            dic1: PhraseTable::build_from_pairs(parse_space_delimited(raw.dic1)),
            dic2: PhraseTable::build_from_pairs(parse_space_delimited(raw.dic2)),
            dic3: PhraseTable::build_from_pairs(parse_space_delimited(raw.dic3)),
            zwnj_table: ZwnjTable::parse(raw.zwnj_table),
            compound_table: PhraseTable::build_from_pairs(parse_tab_delimited(raw.compound_table)),
            lookup_words: word_list(raw.lookup_words),
            homographs: word_list(raw.homographs),
            half_space: HalfSpaceGroups::default(),
        };
        lexicon.populate_half_space();
        lexicon.log_sizes();
        lexicon
    }

    /// Rebuilds the half-space group index from the word lists.
    pub fn populate_half_space(&mut self) {
        let mut words: Vec<&str> = self
            .lookup_words
            .iter()
            .chain(self.homographs.iter())
            .map(String::as_str)
            .collect();
        words.sort_unstable();
        self.half_space = HalfSpaceGroups::build(words);
    }

    fn log_sizes(&self) {
        info!(
            dic1 = self.dic1.len(),
            dic2 = self.dic2.len(),
            dic3 = self.dic3.len(),
            zwnj = self.zwnj_table.len(),
            compound = self.compound_table.len(),
            lookup_words = self.lookup_words.len(),
            homographs = self.homographs.len(),
            half_space_groups = self.half_space.groups.len(),
            "lexicon loaded"
        );
    }

    /// Serialize the lexicon to a CBOR file.
    pub fn serialize_to_cbor<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let cbor_data = serde_cbor::to_vec(self)
            .map_err(|e| DictionaryError::ParseError(format!("Failed to serialize to CBOR: {}", e)))?;
        fs::write(&path, cbor_data)
            .map_err(|e| DictionaryError::IoError(format!("Failed to write CBOR file: {}", e)))?;
        debug!("wrote CBOR lexicon to {}", path.as_ref().display());
        Ok(())
    }

    /// Deserialize a lexicon from a CBOR file.
    pub fn deserialize_from_cbor<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let cbor_data = fs::read(&path)
            .map_err(|e| DictionaryError::IoError(format!("Failed to read CBOR file: {}", e)))?;
        let mut lexicon: Self = serde_cbor::from_slice(&cbor_data)
            .map_err(|e| DictionaryError::ParseError(format!("Failed to deserialize CBOR: {}", e)))?;
        lexicon.populate_half_space();
        lexicon.log_sizes();
        Ok(lexicon)
    }

    /// Save as zstd-compressed CBOR (level 3).
    pub fn save_cbor_compressed<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let file = File::create(&path).map_err(|e| DictionaryError::IoError(e.to_string()))?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, 3).map_err(|e| DictionaryError::IoError(e.to_string()))?;
        serde_cbor::to_writer(&mut encoder, self).map_err(|e| DictionaryError::ParseError(e.to_string()))?;
        encoder.finish().map_err(|e| DictionaryError::IoError(e.to_string()))?;
        Ok(())
    }

    pub fn load_cbor_compressed<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(&path).map_err(|e| DictionaryError::IoError(e.to_string()))?;
        let reader = BufReader::new(file);
        let mut decoder = Decoder::new(reader).map_err(|e| DictionaryError::IoError(e.to_string()))?;
        let mut lexicon: Self =
            serde_cbor::from_reader(&mut decoder).map_err(|e| DictionaryError::ParseError(e.to_string()))?;
        lexicon.populate_half_space();
        lexicon.log_sizes();
        Ok(lexicon)
    }

    /// `true` if `word` is a known lookup word or homograph.
    pub fn is_listed(&self, word: &str) -> bool {
        self.lookup_words.contains(word) || self.homographs.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seeds_load() {
        let lexicon = Lexicon::new();
        assert!(!lexicon.dic1.is_empty());
        assert!(!lexicon.dic2.is_empty());
        assert!(!lexicon.dic3.is_empty());
        assert!(!lexicon.zwnj_table.is_empty());
        assert_eq!(lexicon.compound_table.get("بازی کن"), Some("بازی\u{200c}کن"));
        assert!(!lexicon.half_space.is_empty());
    }

    #[test]
    fn default_is_empty() {
        let lexicon = Lexicon::default();
        assert!(lexicon.dic1.is_empty());
        assert!(lexicon.half_space.is_empty());
    }
}
