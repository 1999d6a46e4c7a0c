//! Persian number words: cardinals and ordinals.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::utils::{CONJUNCTION, ZWNJ};

/// Longest digit string [`NumberNormalizer::convert`] will spell out.
pub const MAX_DIGITS: usize = 36;

const MAGNITUDES: [&str; 4] = ["یک", "هزار", "میلیون", "میلیارد"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
    #[error("Number too large: {0} digits")]
    NumberTooLarge(usize),
}

/// Argument accepted by [`NumberNormalizer::convert_ordinary`].
#[derive(Debug, Clone, Copy)]
pub enum NumberArg<'a> {
    Int(u64),
    Digits(&'a str),
}

impl From<u64> for NumberArg<'_> {
    fn from(n: u64) -> Self {
        NumberArg::Int(n)
    }
}

impl<'a> From<&'a str> for NumberArg<'a> {
    fn from(s: &'a str) -> Self {
        NumberArg::Digits(s)
    }
}

impl<'a> From<&'a String> for NumberArg<'a> {
    fn from(s: &'a String) -> Self {
        NumberArg::Digits(s.as_str())
    }
}

fn base_word(n: u16) -> Option<&'static str> {
    let word = match n {
        1 => "یک",
        2 => "دو",
        3 => "سه",
        4 => "چهار",
        5 => "پنج",
        6 => "شِش",
        7 => "هفت",
        8 => "هشت",
        9 => "نُه",
        10 => "دَه",
        11 => "یازده",
        12 => "دوازده",
        13 => "سیزده",
        14 => "چهارده",
        15 => "پانزده",
        16 => "شانزده",
        17 => "هفده",
        18 => "هجده",
        19 => "نوزده",
        20 => "بیست",
        30 => "سی",
        40 => "چهل",
        50 => "پنجاه",
        60 => "شصت",
        70 => "هفتاد",
        80 => "هشتاد",
        90 => "نود",
        100 => "صد",
        200 => "دویست",
        300 => "سیصد",
        500 => "پانصد",
        _ => return None,
    };
    Some(word)
}

/// Spells `n` in `1..=999`.
fn three_digits(n: u16) -> String {
    if let Some(word) = base_word(n) {
        return word.to_string();
    }
    let units = n % 10;
    let tens = (n % 100) / 10;
    let hundreds = n / 100;
    let below_hundred = n % 100;

    let mut fa = String::new();
    if hundreds != 0 {
        match base_word(hundreds * 100) {
            Some(word) => fa.push_str(word),
            None => {
                fa.push_str(base_word(hundreds).unwrap_or_default());
                fa.push_str("صد");
            }
        }
        if below_hundred != 0 {
            fa.push_str(CONJUNCTION);
        }
    }
    if tens != 0 {
        if let Some(word) = base_word(below_hundred) {
            fa.push_str(word);
            return fa;
        }
        fa.push_str(base_word(tens * 10).unwrap_or_default());
        if units != 0 {
            fa.push_str(CONJUNCTION);
        }
    }
    if units != 0 {
        fa.push_str(base_word(units).unwrap_or_default());
    }
    fa
}

/// Magnitude word for the base-1000 group at `index` (0 = units).
///
/// Beyond billions the word is composed: index 4 is `هزار‌میلیارد`,
/// index 6 is `میلیارد‌میلیارد`, and so on.
fn magnitude(index: usize) -> String {
    if index < MAGNITUDES.len() {
        return MAGNITUDES[index].to_string();
    }
    let (repeats, rest) = (index / 3, index % 3);
    let billions = vec![MAGNITUDES[3]; repeats].join(&ZWNJ.to_string());
    if rest == 0 {
        billions
    } else {
        format!("{}{}{}", MAGNITUDES[rest], ZWNJ, billions)
    }
}

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Converts digit strings to Persian number words.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberNormalizer;

impl NumberNormalizer {
    pub fn new() -> Self {
        NumberNormalizer
    }

    /// Spells an ASCII digit string as a Persian cardinal.
    ///
    /// Leading zeros are ignored; an all-zero input is `صفر`.
    ///
    /// ```
    /// use parsinorm::number::NumberNormalizer;
    /// let n = NumberNormalizer::new();
    /// assert_eq!(n.convert("1000").unwrap(), "هزار");
    /// assert_eq!(n.convert("25").unwrap(), "بیست وَ پنج");
    /// ```
    ///
    /// # Errors
    /// [`NormalizeError::InvalidNumber`] if `digits` is empty or contains
    /// anything but `0-9`, and [`NormalizeError::NumberTooLarge`] past
    /// [`MAX_DIGITS`] significant digits.
    pub fn convert(&self, digits: &str) -> Result<String, NormalizeError> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NormalizeError::InvalidNumber(digits.to_string()));
        }
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok("صفر".to_string());
        }
        if significant.len() > MAX_DIGITS {
            return Err(NormalizeError::NumberTooLarge(significant.len()));
        }

        // Groups of three digits, least significant first.
        let bytes = significant.as_bytes();
        let groups: Vec<u16> = bytes
            .rchunks(3)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
            })
            .collect();

        if groups.len() == 1 {
            return Ok(three_digits(groups[0]));
        }

        let parts: Vec<String> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| **group != 0)
            .map(|(i, &group)| match i {
                0 => three_digits(group),
                1 if group == 1 => magnitude(1),
                _ => format!("{} {}", three_digits(group), magnitude(i)),
            })
            .collect();

        Ok(parts
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join(CONJUNCTION))
    }

    /// Spells `n` as a Persian cardinal.
    pub fn cardinal(&self, n: u64) -> String {
        // A u64 never exceeds MAX_DIGITS.
        self.convert(&n.to_string()).unwrap_or_default()
    }

    /// Spells a number as a Persian ordinal (`اول`, `دوم`, `سوم`, ...).
    ///
    /// ```
    /// use parsinorm::number::NumberNormalizer;
    /// let n = NumberNormalizer::new();
    /// assert_eq!(n.convert_ordinary(3u64).unwrap(), "سوم");
    /// assert_eq!(n.convert_ordinary("30").unwrap(), "سی‌ام");
    /// ```
    pub fn convert_ordinary<'a, A>(&self, arg: A) -> Result<String, NormalizeError>
    where
        A: Into<NumberArg<'a>>,
    {
        let digits = match arg.into() {
            NumberArg::Int(n) => n.to_string(),
            NumberArg::Digits(s) => s.to_string(),
        };
        let cardinal = self.convert(&digits)?;
        let significant = digits.trim_start_matches('0');
        if significant == "1" {
            return Ok("اول".to_string());
        }
        if significant == "10" {
            return Ok("دهم".to_string());
        }

        let mut ordinal = cardinal;
        if ordinal.ends_with('ی') {
            ordinal.push(ZWNJ);
            ordinal.push_str("ام");
        } else if ordinal.ends_with("سه") {
            ordinal.pop();
            ordinal.push_str("وم");
        } else {
            ordinal.push('م');
        }
        Ok(ordinal)
    }

    pub fn ordinal(&self, n: u64) -> String {
        self.convert_ordinary(n).unwrap_or_default()
    }

    /// Replaces every run of ASCII digits in `text` with its cardinal words.
    ///
    /// Runs that cannot be spelled (too long) are left as digits.
    pub fn replace_digit_runs(&self, text: &str) -> String {
        DIGIT_RUN
            .replace_all(text, |caps: &Captures| {
                self.convert(&caps[0])
                    .unwrap_or_else(|_| caps[0].to_string())
            })
            .into_owned()
    }
}
