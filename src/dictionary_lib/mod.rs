//! Lexical resources: phrase tables, the ZWNJ connectivity table, the
//! wrong-compound table and half-space word groups.

use thiserror::Error;

mod half_space;
mod lexicon;
mod phrase_table;
mod zwnj_table;

pub use half_space::HalfSpaceGroups;
pub use lexicon::{
    Lexicon, ResourcePolicy, COMPOUND_TABLE_FILE, DIC1_FILE, DIC2_FILE, DIC3_FILE, HOMOGRAPHS_FILE,
    LOOKUP_WORDS_FILE, ZWNJ_TABLE_FILE,
};
pub use phrase_table::{parse_space_delimited, parse_tab_delimited, PhraseTable};
pub use zwnj_table::{table_key, ConnectionType, ZwnjEntry, ZwnjTable, ZWNJ_PLACEHOLDER};

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("I/O Error: {0}")]
    IoError(String),
    #[error("Parse Error: {0}")]
    ParseError(String),
}
