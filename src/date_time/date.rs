use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{apply_rewrites, overlaps, Rewrite};
use crate::number::NumberNormalizer;
use crate::utils::keyword_window;

pub const PERSIAN_MONTHS: [&str; 12] = [
    "فروردین", "اردیبهشت", "خرداد", "تیر", "مرداد", "شهریور", "مهر", "آبان", "آذر", "دی", "بهمن",
    "اسفند",
];

pub const GREGORIAN_MONTHS: [&str; 12] = [
    "ژانویه", "فوریه", "مارس", "آپریل", "می", "ژوئن", "جولای", "آگوست", "سپتامبر", "اکتبر", "نوامبر",
    "دسامبر",
];

/// Words that mark a nearby number pair as a date.
pub const DATE_KEYWORDS: [&str; 7] = ["مورخ", "مورخه", "تاریخ", "شمسی", "میلادی", "قمری", "هجری"];

const SEP: &str = r"\s*[/.\-]\s*";
const DAY: &str = r"(0[1-9]|[12][0-9]|3[01]|[1-9])";
const MONTH: &str = r"(0[1-9]|1[0-2]|[1-9])";
const PERSIAN_YEAR: &str = r"(1[0-4][0-9][0-9]|[3-9][2-9])";
const GREGORIAN_YEAR: &str = r"(1[5-9][0-9][0-9]|20[0-9][0-9])";

static PERSIAN_YMD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b{PERSIAN_YEAR}{SEP}{MONTH}{SEP}{DAY}\b")).unwrap()
});

static PERSIAN_DMY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b{DAY}{SEP}{MONTH}{SEP}{PERSIAN_YEAR}\b")).unwrap()
});

static GREGORIAN: Lazy<Regex> = Lazy::new(|| {
    let dmy = format!(
        r"(?P<d1>{d}){SEP}(?P<m1>{m}){SEP}(?P<y1>{y})",
        d = DAY, m = MONTH, y = GREGORIAN_YEAR
    );
    let mdy = format!(
        r"(?P<m2>{m}){SEP}(?P<d2>{d}){SEP}(?P<y2>{y})",
        d = DAY, m = MONTH, y = GREGORIAN_YEAR
    );
    let ymd = format!(
        r"(?P<y3>{y}){SEP}(?P<m3>{m}){SEP}(?P<d3>{d})",
        d = DAY, m = MONTH, y = GREGORIAN_YEAR
    );
    Regex::new(&format!(r"\b(?:{dmy}|{mdy}|{ymd})\b")).unwrap()
});

/// Month/day with no year. Checked for neighbouring separators by hand.
static AMBIGUOUS_MD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{MONTH}{SEP}{DAY}\s*")).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    Persian,
    Gregorian,
}

/// A recognized date; `start..end` are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundDate {
    pub start: usize,
    pub end: usize,
    pub day: u32,
    pub month: u32,
    pub year: Option<u32>,
    pub calendar: Calendar,
}

impl FoundDate {
    fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

fn field(caps: &Captures, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn group(caps: &Captures, i: usize) -> u32 {
    caps.get(i).and_then(|m| m.as_str().parse().ok()).unwrap_or(0)
}

fn is_date_separator(c: char) -> bool {
    matches!(c, '/' | '.' | '-')
}

/// Recognizes numeric dates and spells them out.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    numbers: NumberNormalizer,
    keywords: Vec<String>,
    veto_keywords: Vec<String>,
    keyword_span: usize,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DateNormalizer {
    /// Default keyword lists and a keyword window of 3.
    ///
    /// The veto list defaults to the confirming list, so month/day pairs
    /// without a year are never rewritten unless a distinct veto list is
    /// configured with [`DateNormalizer::with_veto_keywords`].
    pub fn new() -> Self {
        let keywords: Vec<String> = DATE_KEYWORDS.iter().map(|s| s.to_string()).collect();
        Self {
            numbers: NumberNormalizer::new(),
            veto_keywords: keywords.clone(),
            keywords,
            keyword_span: 3,
        }
    }

    pub fn with_keyword_span(mut self, span: usize) -> Self {
        self.keyword_span = span;
        self
    }

    pub fn with_veto_keywords<S: AsRef<str>>(mut self, veto: &[S]) -> Self {
        self.veto_keywords = veto.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Finds every date in `text`, sorted by start offset.
    ///
    /// Persian year-first matches are collected first, then Persian
    /// day-first, Gregorian and finally yearless month/day matches; a match
    /// overlapping an earlier accepted one is dropped.
    pub fn find_dates(&self, text: &str) -> Vec<FoundDate> {
        let mut found: Vec<FoundDate> = Vec::new();
        let is_free = |found: &[FoundDate], span: (usize, usize)| {
            !found.iter().any(|d| overlaps(d.span(), span))
        };

        for caps in PERSIAN_YMD.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            found.push(FoundDate {
                start: m.start(),
                end: m.end(),
                day: group(&caps, 3),
                month: group(&caps, 2),
                year: Some(group(&caps, 1)),
                calendar: Calendar::Persian,
            });
        }

        for caps in PERSIAN_DMY.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            if !is_free(&found, (m.start(), m.end())) {
                continue;
            }
            found.push(FoundDate {
                start: m.start(),
                end: m.end(),
                day: group(&caps, 1),
                month: group(&caps, 2),
                year: Some(group(&caps, 3)),
                calendar: Calendar::Persian,
            });
        }

        for caps in GREGORIAN.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            if !is_free(&found, (m.start(), m.end())) {
                continue;
            }
            let fields = ["1", "2", "3"].iter().find_map(|i| {
                Some((
                    field(&caps, &format!("d{}", i))?,
                    field(&caps, &format!("m{}", i))?,
                    field(&caps, &format!("y{}", i))?,
                ))
            });
            if let Some((day, month, year)) = fields {
                found.push(FoundDate {
                    start: m.start(),
                    end: m.end(),
                    day,
                    month,
                    year: Some(year),
                    calendar: Calendar::Gregorian,
                });
            }
        }

        for caps in AMBIGUOUS_MD.captures_iter(text) {
            let (Some(m), Some(day_match)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let before = text[..m.start()].trim_end().chars().next_back();
            let after = text[day_match.end()..].trim_start().chars().next();
            if before.map_or(false, is_date_separator) || after.map_or(false, is_date_separator) {
                continue;
            }

            let confirmed =
                keyword_window(text, m.start(), m.end(), self.keywords.as_slice(), self.keyword_span);
            let vetoed =
                keyword_window(text, m.start(), m.end(), self.veto_keywords.as_slice(), self.keyword_span);
            if !(confirmed && !vetoed) || !is_free(&found, (m.start(), m.end())) {
                continue;
            }
            found.push(FoundDate {
                start: m.start(),
                end: m.end(),
                day: group(&caps, 2),
                month: group(&caps, 1),
                year: None,
                calendar: Calendar::Persian,
            });
        }

        found.sort_by_key(|d| d.start);
        found
    }

    /// Spelled-out form: `ordinal(day) month [cardinal(year)] `.
    pub fn render(&self, date: &FoundDate) -> String {
        let months = match date.calendar {
            Calendar::Persian => &PERSIAN_MONTHS,
            Calendar::Gregorian => &GREGORIAN_MONTHS,
        };
        let month = months
            .get((date.month as usize).wrapping_sub(1))
            .copied()
            .unwrap_or_default();

        let mut out = format!("{} {} ", self.numbers.ordinal(u64::from(date.day)), month);
        if let Some(year) = date.year {
            out.push_str(&self.numbers.cardinal(u64::from(year)));
            out.push(' ');
        }
        out
    }

    /// Replaces every date found in `text` with its spelled-out form.
    ///
    /// ```
    /// use parsinorm::date_time::DateNormalizer;
    /// let dates = DateNormalizer::new();
    /// assert_eq!(dates.normalize_dates("1402/01/01"), "اول فروردین هزار وَ چهارصد وَ دو ");
    /// ```
    pub fn normalize_dates(&self, text: &str) -> String {
        let rewrites = self
            .find_dates(text)
            .iter()
            .map(|d| Rewrite {
                start: d.start,
                end: d.end,
                replacement: self.render(d),
            })
            .collect();
        apply_rewrites(text, rewrites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_persian_dates_both_expand() {
        let dates = DateNormalizer::new();
        assert_eq!(
            dates.normalize_dates("تاریخ 1401/05/12 و 1402/01/01"),
            "تاریخ دوازدهم مرداد هزار وَ چهارصد وَ یک  و اول فروردین هزار وَ چهارصد وَ دو "
        );
    }

    #[test]
    fn persian_day_first_and_spaced_separators() {
        let dates = DateNormalizer::new();
        let found = dates.find_dates("روز 12 / 5 / 1401 بود");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].day, found[0].month, found[0].year), (12, 5, Some(1401)));
        assert_eq!(found[0].calendar, Calendar::Persian);
    }

    #[test]
    fn gregorian_field_orders() {
        let dates = DateNormalizer::new();

        let dmy = dates.find_dates("25/12/2020");
        assert_eq!((dmy[0].day, dmy[0].month, dmy[0].year), (25, 12, Some(2020)));
        assert_eq!(dmy[0].calendar, Calendar::Gregorian);

        let ymd = dates.find_dates("2020-12-25");
        assert_eq!((ymd[0].day, ymd[0].month, ymd[0].year), (25, 12, Some(2020)));

        assert_eq!(
            dates.normalize_dates("2020-12-25"),
            "بیست وَ پنجم دسامبر دو هزار وَ بیست "
        );
    }

    #[test]
    fn yearless_date_needs_a_distinct_veto_list() {
        let text = "مورخ 5/6 رسید";
        assert_eq!(DateNormalizer::new().normalize_dates(text), text);

        let relaxed = DateNormalizer::new().with_veto_keywords(&["میلادی"]);
        assert_eq!(relaxed.normalize_dates(text), "مورخ شِشم مرداد رسید");
    }

    #[test]
    fn yearless_date_without_keyword_is_ignored() {
        let relaxed = DateNormalizer::new().with_veto_keywords::<&str>(&[]);
        let text = "نسبت 5/6 است";
        assert_eq!(relaxed.normalize_dates(text), text);
    }

    #[test]
    fn no_dates_is_not_an_error() {
        let dates = DateNormalizer::new();
        assert!(dates.find_dates("متن بدون تاریخ").is_empty());
        assert_eq!(dates.normalize_dates(""), "");
    }
}
