use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::number::NumberNormalizer;
use crate::utils::keyword_window;

/// Words that make a nearby `H:MM` a duration.
pub const DURATION_WORDS: [&str; 3] = ["وقت", "مدت", "زمان"];
/// Words that make a nearby `H:MM` a time of day, overriding [`DURATION_WORDS`].
pub const CLOCK_WORDS: [&str; 7] = ["عصر", "شب", "غروب", "ظهر", "صبح", "ساعت", "بامداد"];

static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(1[0-9]|2[0-4]|0[0-9]|[0-9])\s*([:\-])\s*([0-5][0-9]|60)'?\s*(([:\-])\s*([0-5][0-9]|60)"?)?"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeKind {
    Duration,
    Clock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundTime {
    pub start: usize,
    pub end: usize,
    pub hour: u32,
    pub minute: u32,
    pub second: Option<u32>,
    pub kind: TimeKind,
}

/// Recognizes `H:MM[:SS]` (or `-`-separated) times and spells them out.
#[derive(Debug, Clone)]
pub struct TimeNormalizer {
    numbers: NumberNormalizer,
    keyword_span: usize,
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeNormalizer {
    pub fn new() -> Self {
        Self {
            numbers: NumberNormalizer::new(),
            keyword_span: 2,
        }
    }

    pub fn with_keyword_span(mut self, span: usize) -> Self {
        self.keyword_span = span;
        self
    }

    fn classify(&self, text: &str, caps: &Captures) -> Option<FoundTime> {
        let m = caps.get(0)?;
        let number = |i: usize| caps.get(i).and_then(|g| g.as_str().parse::<u32>().ok());

        let duration = keyword_window(text, m.start(), m.end(), &DURATION_WORDS, self.keyword_span)
            && !keyword_window(text, m.start(), m.end(), &CLOCK_WORDS, self.keyword_span);

        Some(FoundTime {
            start: m.start(),
            end: m.end(),
            hour: number(1)?,
            minute: number(3)?,
            second: number(6),
            kind: if duration {
                TimeKind::Duration
            } else {
                TimeKind::Clock
            },
        })
    }

    /// Finds the first time in `text`.
    pub fn find_time(&self, text: &str) -> Option<FoundTime> {
        let caps = TIME.captures(text)?;
        self.classify(text, &caps)
    }

    pub fn render(&self, time: &FoundTime) -> String {
        let n = |v: u32| self.numbers.cardinal(u64::from(v));
        match (time.kind, time.second) {
            (TimeKind::Duration, Some(s)) => format!(
                "{} ساعت وَ {} دقیقه وَ {} ثانیه",
                n(time.hour),
                n(time.minute),
                n(s)
            ),
            (TimeKind::Duration, None) => {
                format!("{} ساعت وَ {} دقیقه ", n(time.hour), n(time.minute))
            }
            (TimeKind::Clock, Some(s)) => {
                format!("{} وَ {} وَ {} ثانیه ", n(time.hour), n(time.minute), n(s))
            }
            (TimeKind::Clock, None) => format!("{} وَ {} دقیقه ", n(time.hour), n(time.minute)),
        }
    }

    /// Rewrites times one at a time, re-scanning the updated text after each
    /// rewrite, until none remain.
    ///
    /// Replacements contain no digits, so the number of iterations is
    /// bounded by the number of matches in the input.
    ///
    /// ```
    /// use parsinorm::date_time::TimeNormalizer;
    /// let times = TimeNormalizer::new();
    /// assert_eq!(times.normalize_time("ساعت 12:30 است"), "ساعت دوازده وَ سی دقیقه است");
    /// ```
    pub fn normalize_time(&self, text: &str) -> String {
        let budget = TIME.find_iter(text).count();
        let mut out = text.to_string();

        for _ in 0..budget {
            let Some(found) = self.find_time(&out) else {
                break;
            };
            let replacement = self.render(&found);
            out.replace_range(found.start..found.end, &replacement);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_near_clock_word() {
        let times = TimeNormalizer::new();
        assert_eq!(
            times.normalize_time("صبح 7:05 رفتم"),
            "صبح هفت وَ پنج دقیقه رفتم"
        );
    }

    #[test]
    fn duration_near_duration_word() {
        let times = TimeNormalizer::new();
        assert_eq!(
            times.normalize_time("مدت 2:15 طول کشید"),
            "مدت دو ساعت وَ پانزده دقیقه طول کشید"
        );
    }

    #[test]
    fn clock_word_overrides_duration_word() {
        let times = TimeNormalizer::new();
        let found = times.find_time("زمان 2:15 ساعت").unwrap();
        assert_eq!(found.kind, TimeKind::Clock);
    }

    #[test]
    fn seconds_and_multiple_matches() {
        let times = TimeNormalizer::new();
        assert_eq!(
            times.normalize_time("از 1:02:03 تا 4:05"),
            "از یک وَ دو وَ سه ثانیه  تا چهار وَ پنج دقیقه "
        );
    }

    #[test]
    fn duration_with_seconds() {
        let times = TimeNormalizer::new();
        let found = times.find_time("وقت 0:10:20").unwrap();
        assert_eq!(found.kind, TimeKind::Duration);
        assert_eq!(found.second, Some(20));
        assert_eq!(
            times.render(&found),
            "صفر ساعت وَ دَه دقیقه وَ بیست ثانیه"
        );
    }

    #[test]
    fn no_match_leaves_text() {
        let times = TimeNormalizer::new();
        assert_eq!(times.normalize_time("بدون زمان"), "بدون زمان");
    }
}
