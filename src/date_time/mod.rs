//! Recognition and spelling-out of numeric dates and clock times.
//!
//! Dates are found in one scan, recorded as [`FoundDate`]s, and rewritten
//! left to right by [`apply_rewrites`], which carries the length delta of
//! each replacement forward to the records after it. Times are rewritten by
//! re-scanning the live string (see [`TimeNormalizer::normalize_time`]).

mod date;
mod time;

pub use date::{Calendar, DateNormalizer, FoundDate, DATE_KEYWORDS, GREGORIAN_MONTHS, PERSIAN_MONTHS};
pub use time::{FoundTime, TimeKind, TimeNormalizer, CLOCK_WORDS, DURATION_WORDS};

/// A pending replacement of `start..end` (byte offsets into the original
/// text) with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Applies non-overlapping rewrites in ascending order of `start`.
///
/// Offsets refer to the original `text`; each applied rewrite shifts the
/// offsets of every later rewrite by `replacement.len() - (end - start)`.
///
/// ```
/// use parsinorm::date_time::{apply_rewrites, Rewrite};
///
/// let text = "a 11 b 22 c";
/// let out = apply_rewrites(text, vec![
///     Rewrite { start: 7, end: 9, replacement: "twenty-two".into() },
///     Rewrite { start: 2, end: 4, replacement: "eleven".into() },
/// ]);
/// assert_eq!(out, "a eleven b twenty-two c");
/// ```
pub fn apply_rewrites(text: &str, mut rewrites: Vec<Rewrite>) -> String {
    rewrites.sort_by_key(|r| r.start);

    let (out, _) = rewrites
        .into_iter()
        .fold((text.to_string(), 0isize), |(mut out, delta), r| {
            let start = (r.start as isize + delta) as usize;
            let end = (r.end as isize + delta) as usize;
            let shift = r.replacement.len() as isize - (r.end - r.start) as isize;
            out.replace_range(start..end, &r.replacement);
            (out, delta + shift)
        });
    out
}

#[inline]
pub(crate) fn overlaps(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0.max(b.0) < a.1.min(b.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrinking_and_growing_rewrites() {
        let text = "xx 1234 yy 5 zz";
        let out = apply_rewrites(
            text,
            vec![
                Rewrite {
                    start: 3,
                    end: 7,
                    replacement: "n".into(),
                },
                Rewrite {
                    start: 11,
                    end: 12,
                    replacement: "five".into(),
                },
            ],
        );
        assert_eq!(out, "xx n yy five zz");
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(overlaps((0, 5), (4, 8)));
        assert!(!overlaps((0, 5), (5, 8)));
    }
}
