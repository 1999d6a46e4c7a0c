use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::ZWNJ;

/// Placeholder that stands in for ZWNJ inside table keys.
pub const ZWNJ_PLACEHOLDER: &str = "^";

/// How a corrected word connects to its neighbours.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    /// `مجزا`: the word stands on its own.
    Standalone,
    /// `به قبلی`: the word attaches to the previous word with a ZWNJ.
    AttachPrevious,
    /// `به بعدی`: the word attaches to the next word with a ZWNJ.
    AttachNext,
}

impl ConnectionType {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "مجزا" => Some(ConnectionType::Standalone),
            "به قبلی" => Some(ConnectionType::AttachPrevious),
            "به بعدی" => Some(ConnectionType::AttachNext),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ZwnjEntry {
    /// Corrected form; spaces are encoded as `_`.
    pub replacement: String,
    pub connection: ConnectionType,
}

impl ZwnjEntry {
    /// The corrected form with `_` decoded back to spaces.
    pub fn decoded(&self) -> String {
        self.replacement.replace('_', " ")
    }
}

/// Word-level ZWNJ connectivity table, keyed by the incorrect form with every
/// ZWNJ replaced by [`ZWNJ_PLACEHOLDER`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ZwnjTable {
    pub entries: FxHashMap<String, ZwnjEntry>,
}

pub fn table_key(word: &str) -> String {
    word.replace(ZWNJ, ZWNJ_PLACEHOLDER)
}

impl ZwnjTable {
    /// Parses `connection-type<TAB>incorrect<TAB>correct` lines.
    ///
    /// Lines with fewer than three columns or an unknown connection type are
    /// skipped. Duplicate keys keep the first entry.
    pub fn parse(content: &str) -> Self {
        let mut entries: FxHashMap<String, ZwnjEntry> = FxHashMap::default();

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 3 {
                debug!("Invalid line format: {}", line);
                continue;
            }
            let Some(connection) = ConnectionType::from_label(cols[0]) else {
                debug!("Unknown connection type {:?}: {}", cols[0], line);
                continue;
            };
            let key = table_key(cols[1].trim());
            let entry = ZwnjEntry {
                replacement: cols[2].trim().replace(' ', "_"),
                connection,
            };

            if let Some(prev) = entries.get(&key) {
                if prev != &entry {
                    debug!(key = %key, "duplicate key ignored (first-wins)");
                }
                continue;
            }
            entries.insert(key, entry);
        }

        Self { entries }
    }

    /// Looks up `word` as written (with real ZWNJs).
    pub fn get(&self, word: &str) -> Option<&ZwnjEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(&table_key(word))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_types_and_encodes_spaces() {
        let table = ZwnjTable::parse(
            "مجزا\tدرحالیکه\tدر حالی که\nبه قبلی\tهایی\tهایی\nنامعلوم\tالف\tب\nبه بعدی\tمی\n",
        );
        assert_eq!(table.len(), 2);

        let entry = table.get("درحالیکه").unwrap();
        assert_eq!(entry.connection, ConnectionType::Standalone);
        assert_eq!(entry.replacement, "در_حالی_که");
        assert_eq!(entry.decoded(), "در حالی که");

        assert_eq!(
            table.get("هایی").map(|e| e.connection),
            Some(ConnectionType::AttachPrevious)
        );
    }

    #[test]
    fn keys_use_placeholder_for_zwnj() {
        let table = ZwnjTable::parse("مجزا\tعلی\u{200c}رغم\tعلی\u{200c}رغم\n");
        assert!(table.entries.contains_key("علی^رغم"));
        assert!(table.get("علی\u{200c}رغم").is_some());
        assert!(table.get("علیرغم").is_none());
    }
}
