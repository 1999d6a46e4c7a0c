use once_cell::sync::Lazy;

/// Punctuation marks that end a clause during segmentation.
///
/// The full stop is not listed: a single `.` splits, `..` does not, and a
/// run of three or more dots splits as one ellipsis. See [`segment_clauses`].
pub const CLAUSE_DELIMITERS: &str = "_،,():?!<>-;[]{}»«^'\\¡~©؟؛\"";

/// Characters treated as punctuation when deciding whether a half-space
/// join may cross a token boundary.
pub const PUNCTUATION: &str =
    "-=~!@#$%^&*()_+[{]}:;'\",<.>/?|\\÷٬٫٪×،»«؛؟…”ˈ";

/// Compact, hot-path friendly character set optimized for per-character
/// membership tests.
///
/// * **ASCII fast path**: code points `U+0000..=U+007F` live in a single
///   [`u128`] mask.
/// * **BMP path**: code points `U+0000..=U+FFFF` live in a 65,536-bit table
///   (`[u64; 1024]`, ~8 KB).
/// * **Astral characters** are never members.
#[derive(Copy, Clone)]
pub struct DelimiterSet {
    ascii_mask: u128,      // bits 0..=127
    bmp_bits: [u64; 1024], // 0x0000..=0xFFFF
}

impl DelimiterSet {
    /// Builds a set from every character of `chars`.
    pub fn from_chars(chars: &str) -> Self {
        let mut ascii: u128 = 0;
        let mut bmp = [0u64; 1024];

        for ch in chars.chars() {
            let u = ch as u32;
            if u <= 0x7F {
                ascii |= 1u128 << u;
            }
            if u <= 0xFFFF {
                let i = (u >> 6) as usize;
                let b = u & 63;
                bmp[i] |= 1u64 << b;
            }
        }

        DelimiterSet {
            ascii_mask: ascii,
            bmp_bits: bmp,
        }
    }

    /// Tests whether the given [`char`] belongs to this set.
    ///
    /// ```
    /// use parsinorm::delimiter_set::is_punctuation;
    /// assert!(is_punctuation('؟'));
    /// assert!(!is_punctuation('ب'));
    /// ```
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        let u = c as u32;
        if u <= 0x7F {
            return ((self.ascii_mask >> u) & 1) == 1;
        }
        if u <= 0xFFFF {
            let i = (u >> 6) as usize;
            let b = u & 63;
            return ((self.bmp_bits[i] >> b) & 1) == 1;
        }
        false
    }
}

pub static CLAUSE_DELIMITER_SET: Lazy<DelimiterSet> =
    Lazy::new(|| DelimiterSet::from_chars(CLAUSE_DELIMITERS));

pub static PUNCTUATION_SET: Lazy<DelimiterSet> =
    Lazy::new(|| DelimiterSet::from_chars(PUNCTUATION));

#[inline]
pub fn is_clause_delimiter(c: char) -> bool {
    CLAUSE_DELIMITER_SET.contains(c)
}

#[inline]
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION_SET.contains(c)
}

/// Splits `text` into clauses at punctuation and joins them with `" | "`.
///
/// Clauses are trimmed and empty clauses are dropped, so runs of repeated
/// punctuation produce a single boundary.
///
/// ```
/// use parsinorm::delimiter_set::segment_clauses;
/// assert_eq!(segment_clauses("سلام، خوبی؟ بله..."), "سلام | خوبی | بله");
/// assert_eq!(segment_clauses("الف..ب"), "الف..ب");
/// ```
pub fn segment_clauses(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut clauses: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '.' {
            let run = chars[i..].iter().take_while(|&&d| d == '.').count();
            if run == 2 {
                current.push_str("..");
            } else {
                clauses.push(std::mem::take(&mut current));
            }
            i += run;
            continue;
        }
        if is_clause_delimiter(c) {
            clauses.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
        i += 1;
    }
    clauses.push(current);

    clauses
        .iter()
        .map(|clause| clause.trim())
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
