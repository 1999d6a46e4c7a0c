//! Persian text normalization and Pinglish transliteration.
//!
//! [`Normalizer`] runs a fixed sequence of passes over a text: ZWNJ cleanup,
//! character unification, abbreviation and symbol expansion, whitespace
//! cleanup, digit and script splitting, date, time and number spelling,
//! space correction, optional Pinglish transliteration, clause segmentation
//! and the final half-space correction chain. Each pass is also available
//! on its own from the module that implements it.
//!
//! ```
//! use parsinorm::Normalizer;
//!
//! let normalizer = Normalizer::new();
//! assert_eq!(normalizer.normalize("كتاب ها"), "کتاب‌ها");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub mod char_unifier;
pub mod date_time;
pub mod delimiter_set;
pub mod dictionary_lib;
pub mod number;
pub mod pinglish;
pub mod space_corrector;
pub mod symbols;
pub mod token_merger;
pub mod utils;
pub mod zwnj_corrector;

pub use dictionary_lib::{DictionaryError, Lexicon, ResourcePolicy};
pub use number::{NormalizeError, NumberNormalizer};
pub use token_merger::{PairFrequencyMerger, TokenMerger};

use crate::char_unifier::unify;
use crate::date_time::{DateNormalizer, TimeNormalizer};
use crate::delimiter_set::segment_clauses;
use crate::space_corrector::SpaceCorrector;
use crate::symbols::{replace_abbreviations, replace_special_symbols};
use crate::utils::{clean_text, split_digit_from_alphabet, split_script_from_latin, ZWNJ};
use crate::zwnj_corrector::{remove_extra_space_zwnj, ZwnjCorrector};

/// Pass toggles and tuning for [`Normalizer`].
///
/// Missing fields take their defaults when deserialized, so a JSON config
/// only needs to name what it changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Use the trained token merger instead of the dictionary/regex corrector.
    pub statistical_space_correction: bool,
    pub date_normalizing: bool,
    pub time_normalizing: bool,
    pub pinglish_conversion: bool,
    pub number_to_text: bool,
    pub half_space_correction: bool,
    pub new_line_elimination: bool,
    /// Widest word window tried by compound correction.
    pub compound_neighborhood: usize,
    pub time_keyword_span: usize,
    pub date_keyword_span: usize,
    /// Words that reject a yearless month/day match; the confirming
    /// keywords when unset.
    pub date_veto_keywords: Option<Vec<String>>,
    /// Normalize batches on the rayon pool.
    pub parallel: bool,
    /// Directory of text resources; the embedded seeds are used when unset.
    pub resource_dir: Option<PathBuf>,
    pub token_merger_model: Option<PathBuf>,
    pub token_merger_corpus: Option<PathBuf>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            statistical_space_correction: false,
            date_normalizing: true,
            time_normalizing: true,
            pinglish_conversion: false,
            number_to_text: true,
            half_space_correction: true,
            new_line_elimination: false,
            compound_neighborhood: 5,
            time_keyword_span: 2,
            date_keyword_span: 3,
            date_veto_keywords: None,
            parallel: true,
            resource_dir: None,
            token_merger_model: None,
            token_merger_corpus: None,
        }
    }
}

impl NormalizerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(&path).map_err(|e| {
            DictionaryError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| DictionaryError::ParseError(e.to_string()))
    }

    pub fn with_statistical_space_correction(mut self, enabled: bool) -> Self {
        self.statistical_space_correction = enabled;
        self
    }

    pub fn with_date_normalizing(mut self, enabled: bool) -> Self {
        self.date_normalizing = enabled;
        self
    }

    pub fn with_time_normalizing(mut self, enabled: bool) -> Self {
        self.time_normalizing = enabled;
        self
    }

    pub fn with_pinglish_conversion(mut self, enabled: bool) -> Self {
        self.pinglish_conversion = enabled;
        self
    }

    pub fn with_number_to_text(mut self, enabled: bool) -> Self {
        self.number_to_text = enabled;
        self
    }

    pub fn with_half_space_correction(mut self, enabled: bool) -> Self {
        self.half_space_correction = enabled;
        self
    }

    pub fn with_new_line_elimination(mut self, enabled: bool) -> Self {
        self.new_line_elimination = enabled;
        self
    }

    pub fn with_compound_neighborhood(mut self, words: usize) -> Self {
        self.compound_neighborhood = words;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_resource_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    pub fn with_token_merger<P: Into<PathBuf>>(mut self, model: P, corpus: Option<P>) -> Self {
        self.token_merger_model = Some(model.into());
        self.token_merger_corpus = corpus.map(Into::into);
        self
    }
}

/// Grapheme-to-phoneme model producing Pinglish transcriptions.
///
/// No model ships with the crate; implement this to feed
/// [`Normalizer::diacritize`].
pub trait G2p {
    /// One Pinglish transcription per input text, in order.
    fn generate(&self, texts: &[String]) -> Vec<String>;
}

pub struct Normalizer {
    config: NormalizerConfig,
    lexicon: Arc<Lexicon>,
    space_corrector: SpaceCorrector,
    zwnj_corrector: ZwnjCorrector,
    dates: DateNormalizer,
    times: TimeNormalizer,
    numbers: NumberNormalizer,
    token_merger: Option<Box<dyn TokenMerger>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Default configuration over the embedded lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(NormalizerConfig::default(), Arc::new(Lexicon::new()))
    }

    /// Builds a normalizer from `config`, loading `resource_dir` if set.
    ///
    /// # Errors
    /// Fails when a mandatory resource in `resource_dir` cannot be read.
    pub fn with_config(config: NormalizerConfig) -> Result<Self, DictionaryError> {
        let lexicon = match &config.resource_dir {
            Some(dir) => Lexicon::from_dir(dir, ResourcePolicy::default())?,
            None => Lexicon::new(),
        };
        Ok(Self::with_lexicon(config, Arc::new(lexicon)))
    }

    /// Builds a normalizer over an already loaded lexicon; `resource_dir` is
    /// ignored.
    pub fn with_lexicon(config: NormalizerConfig, lexicon: Arc<Lexicon>) -> Self {
        let mut dates = DateNormalizer::new().with_keyword_span(config.date_keyword_span);
        if let Some(veto) = &config.date_veto_keywords {
            dates = dates.with_veto_keywords(veto.as_slice());
        }

        let token_merger = if config.statistical_space_correction {
            Self::load_token_merger(&config)
        } else {
            None
        };

        info!(
            statistical = token_merger.is_some(),
            dates = config.date_normalizing,
            times = config.time_normalizing,
            pinglish = config.pinglish_conversion,
            half_space = config.half_space_correction,
            "normalizer ready"
        );

        Self {
            space_corrector: SpaceCorrector::new(Arc::clone(&lexicon)),
            zwnj_corrector: ZwnjCorrector::new(Arc::clone(&lexicon)),
            dates,
            times: TimeNormalizer::new().with_keyword_span(config.time_keyword_span),
            numbers: NumberNormalizer::new(),
            token_merger,
            lexicon,
            config,
        }
    }

    fn load_token_merger(config: &NormalizerConfig) -> Option<Box<dyn TokenMerger>> {
        let merger = match (&config.token_merger_model, &config.token_merger_corpus) {
            (Some(model), corpus) => PairFrequencyMerger::load_or_train(model, corpus.as_ref()),
            (None, Some(corpus)) => {
                let mut merger = PairFrequencyMerger::default();
                match merger.train_from_file(corpus) {
                    Ok(()) => Some(merger),
                    Err(err) => {
                        warn!("{}; statistical space correction disabled", err);
                        None
                    }
                }
            }
            (None, None) => {
                warn!("no token merger model or corpus configured; statistical space correction disabled");
                None
            }
        };
        merger.map(|m| Box::new(m) as Box<dyn TokenMerger>)
    }

    /// Replaces the space-correction strategy. `None` restores the
    /// dictionary/regex corrector.
    pub fn set_token_merger(&mut self, merger: Option<Box<dyn TokenMerger>>) {
        self.token_merger = merger;
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn set_parallel(&mut self, is_parallel: bool) {
        self.config.parallel = is_parallel;
    }

    pub fn get_parallel(&self) -> bool {
        self.config.parallel
    }

    pub fn normalize(&self, text: &str) -> String {
        let config = &self.config;

        let mut text = remove_extra_space_zwnj(text);
        text = unify(&text);
        text = replace_abbreviations(&text);
        text = replace_special_symbols(&text);
        text = clean_text(&text, config.new_line_elimination);
        text = split_digit_from_alphabet(&text);
        text = split_script_from_latin(&text, config.pinglish_conversion);

        if config.date_normalizing {
            text = self.dates.normalize_dates(&text);
        }
        if config.time_normalizing {
            text = self.times.normalize_time(&text);
        }
        if config.number_to_text {
            text = self.numbers.replace_digit_runs(&text);
        }

        text = match &self.token_merger {
            Some(merger) => self.merge_tokens(merger.as_ref(), &text),
            None => self.space_corrector.correct(&text),
        };

        if config.pinglish_conversion {
            text = Self::convert_pinglish_tokens(&text);
        }

        text = segment_clauses(&text);

        if config.half_space_correction {
            text = self.zwnj_corrector.correct(&text, config.compound_neighborhood);
        }
        text
    }

    fn merge_tokens(&self, merger: &dyn TokenMerger, text: &str) -> String {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|t| t.trim_matches(ZWNJ))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let merged = merger.merge_tokens(&tokens, ZWNJ);
        clean_text(&merged.join(" "), self.config.new_line_elimination)
    }

    fn convert_pinglish_tokens(text: &str) -> String {
        text.split_whitespace()
            .map(|token| {
                if pinglish::is_pinglish_token(token) {
                    pinglish::convert_word(token, None)
                } else {
                    token.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalizes every text, on the rayon pool when parallel mode is on.
    /// Output order matches input order.
    pub fn normalize_batch<S>(&self, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        if self.config.parallel {
            texts.par_iter().map(|t| self.normalize(t.as_ref())).collect()
        } else {
            texts.iter().map(|t| self.normalize(t.as_ref())).collect()
        }
    }

    /// See [`pinglish::pinglish_to_persian`].
    pub fn pinglish_to_persian(&self, pinglish: &str, reference: Option<&str>) -> String {
        pinglish::pinglish_to_persian(pinglish, reference)
    }

    /// Normalizes `texts`, transcribes them with `g2p` and transliterates the
    /// transcriptions back to diacritized script, using each normalized text
    /// as the reference sentence.
    pub fn diacritize<S>(&self, g2p: &dyn G2p, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        let normalized = self.normalize_batch(texts);
        let phonemes = g2p.generate(&normalized);
        phonemes
            .iter()
            .zip(&normalized)
            .map(|(p, reference)| pinglish::pinglish_to_persian(p, Some(reference)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoG2p;

    impl G2p for EchoG2p {
        fn generate(&self, texts: &[String]) -> Vec<String> {
            texts.iter().map(|_| "kAS to".to_string()).collect()
        }
    }

    #[test]
    fn default_config_values() {
        let config = NormalizerConfig::default();
        assert!(!config.statistical_space_correction);
        assert!(config.date_normalizing && config.time_normalizing && config.number_to_text);
        assert!(!config.pinglish_conversion);
        assert_eq!(config.compound_neighborhood, 5);
        assert_eq!(config.time_keyword_span, 2);
        assert_eq!(config.date_keyword_span, 3);
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let config: NormalizerConfig =
            serde_json::from_str(r#"{ "pinglish_conversion": true, "compound_neighborhood": 3 }"#).unwrap();
        assert!(config.pinglish_conversion);
        assert_eq!(config.compound_neighborhood, 3);
        assert!(config.half_space_correction);
    }

    #[test]
    fn parallel_toggle() {
        let mut normalizer = Normalizer::new();
        assert!(normalizer.get_parallel());
        normalizer.set_parallel(false);
        assert!(!normalizer.get_parallel());
    }

    #[test]
    fn statistical_without_inputs_falls_back() {
        let config = NormalizerConfig::default().with_statistical_space_correction(true);
        let normalizer = Normalizer::with_config(config).unwrap();
        assert!(normalizer.token_merger.is_none());
        assert_eq!(normalizer.normalize("کتاب ها"), "کتاب\u{200c}ها");
    }

    #[test]
    fn pinglish_tokens_converted_in_pipeline() {
        let config = NormalizerConfig::default()
            .with_pinglish_conversion(true)
            .with_half_space_correction(false);
        let normalizer = Normalizer::with_config(config).unwrap();
        assert_eq!(normalizer.normalize("kAS"), "کاشْ");
    }

    #[test]
    fn detached_question_mark_stays_punctuation_with_pinglish() {
        let config = NormalizerConfig::default()
            .with_pinglish_conversion(true)
            .with_half_space_correction(false);
        let normalizer = Normalizer::with_config(config).unwrap();
        assert_eq!(normalizer.normalize("چطوری?"), "چطوری");
        assert_eq!(normalizer.normalize("salAm ? xoob"), "سَلامْ | خوبْ");
        assert!(!normalizer.normalize("چطوری ? خوبم").contains('ع'));
    }

    #[test]
    fn diacritize_uses_g2p_output() {
        let normalizer = Normalizer::new();
        let out = normalizer.diacritize(&EchoG2p, &["کاش تو"]);
        assert_eq!(out, vec!["کاشْ تو".to_string()]);
    }
}
