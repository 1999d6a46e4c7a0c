//! Code point unification for Persian text.
//!
//! Persian text in the wild mixes Arabic letters, Arabic Presentation Forms,
//! and regional variants of the same letter. [`unify`] folds each family onto
//! one canonical Persian letter, unifies punctuation and digits, and collapses
//! whitespace and ZWNJ runs.
//!
//! Canonical kaf is `ک` (U+06A9) and canonical yeh is `ی` (U+06CC).

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered `(character class, replacement)` table. Each class is matched as
/// a single code point.
const LETTER_FAMILIES: &[(&str, &str)] = &[
    ("ﺁﺂ", "آ"),
    ("ٲٱإﺍﺎأﺃﺄﺇﺈ", "ا"),
    ("ﺐﺏﺑﺒ", "ب"),
    ("ﭖﭗﭙﭘ", "پ"),
    ("ﭡٺٹﭞٿټﺕﺗﺖﺘ", "ت"),
    ("ﺙﺛﺚﺜ", "ث"),
    ("ﺝﺠﺟﺞ", "ج"),
    ("ڃﭽﭼﭻﭺ", "چ"),
    ("ﺢﺤڅځﺣﺡ", "ح"),
    ("ﺥﺦﺨﺧ", "خ"),
    ("ڏډﺪﺩ", "د"),
    ("ﺫﺬ", "ذ"),
    ("ڙڗڒڑڕﺭﺮ", "ر"),
    ("ﺰﺯ", "ز"),
    ("ﮊﮋ", "ژ"),
    ("ݭݜﺱﺲښﺴﺳ", "س"),
    ("ﺵﺶﺸﺷ", "ش"),
    ("ﺺﺼﺻﺹ", "ص"),
    ("ﺽﺾﺿﻀ", "ض"),
    ("ﻁﻂﻃﻄ", "ط"),
    ("ﻅﻆﻇﻈ", "ظ"),
    ("ڠﻉﻊﻋﻌ", "ع"),
    ("ﻎۼﻍﻐﻏ", "غ"),
    ("ﻒﻑﻔﻓ", "ف"),
    ("ﻕڤﻖﻗﻘ", "ق"),
    ("ڭﻚﮎﻜﮏګﻛﮑﮐڪﻙك", "ک"),
    ("ﮚﮒﮓﮕﮔ", "گ"),
    ("ﻝﻞﻠڵﻟ", "ل"),
    ("ﻡﻤﻢﻣ", "م"),
    ("ڼﻦﻥﻨﻧ", "ن"),
    ("ވﯙۈۋﺆۊۇۏۅۉﻭﻮؤ", "و"),
    ("ﺔﻬھﻩﻫﻪۀەةہ\u{06c1}", "ه"),
    ("ﭛﻯۍﻰﻱﻲںﻳﻴﯼېﯽﯾﯿێےىي", "ی"),
];

const PUNCTUATION_FAMILIES: &[(&str, &str)] = &[
    ("•·●・∙｡ⴰ", "."),
    (",٬‚，", "،"),
    ("ʕ", "؟"),
    ("٪", "%"),
];

fn class_rule(chars: &str, replacement: &'static str) -> (Regex, &'static str) {
    let pattern = format!("[{}]", regex::escape(chars));
    (Regex::new(&pattern).unwrap(), replacement)
}

static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

    let mut rules = Vec::with_capacity(LETTER_FAMILIES.len() + PUNCTUATION_FAMILIES.len() + 16);
    rules.push(class_rule("\u{200e}\u{200f}\u{00a0}", " "));
    rules.push(class_rule("¬", "\u{200c}"));
    rules.extend(LETTER_FAMILIES.iter().map(|&(c, r)| class_rule(c, r)));
    rules.extend(PUNCTUATION_FAMILIES.iter().map(|&(c, r)| class_rule(c, r)));

    for (d, ascii) in DIGITS.iter().enumerate() {
        let persian = char::from_u32(0x06f0 + d as u32).unwrap_or('0');
        let arabic = char::from_u32(0x0660 + d as u32).unwrap_or('0');
        rules.push(class_rule(&format!("{}{}", persian, arabic), ascii));
    }

    // Run collapsing goes last so a second pass is a no-op.
    rules.push((Regex::new(r" {2,}").unwrap(), " "));
    rules.push((Regex::new(r"\n{2,}").unwrap(), "\n"));
    rules.push((Regex::new(r"\u{200c}{2,}").unwrap(), "\u{200c}"));
    rules
});

/// Applies every unification rule in order and returns the unified text.
///
/// Diacritics are left in place.
///
/// ```
/// use parsinorm::char_unifier::unify;
/// assert_eq!(unify("يك كتاب ۱۲"), "یک کتاب 12");
/// ```
pub fn unify(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_arabic_letters_to_persian() {
        assert_eq!(unify("علي"), "علی");
        assert_eq!(unify("ﻛﺘﺎﺏ"), "کتاب");
        assert_eq!(unify("مدرسة"), "مدرسه");
        assert_eq!(unify("ﻧان"), "نان");
    }

    #[test]
    fn unifies_punctuation_and_digits() {
        assert_eq!(unify("الف, ب"), "الف، ب");
        assert_eq!(unify("٪۵"), "%5");
        assert_eq!(unify("١٢٣"), "123");
        assert_eq!(unify("ʕ"), "؟");
    }

    #[test]
    fn collapses_runs_and_keeps_diacritics() {
        assert_eq!(unify("الف   ب"), "الف ب");
        assert_eq!(unify("می\u{200c}\u{200c}روم"), "می\u{200c}روم");
        assert_eq!(unify("الف\n\n\nب"), "الف\nب");
        assert_eq!(unify("هَم"), "هَم");
        assert_eq!(unify("می¬روم"), "می\u{200c}روم");
    }

    #[test]
    fn unify_is_idempotent() {
        let samples = [
            "ﻛﺘﺎﺏ  \u{00a0} ي\u{200c}¬\u{200c}ك",
            "۱۴۰۱/۰۵/۱۲ \u{200e}\u{200e} تاريخ",
            "•• ,, \n \n\n",
            "",
        ];
        for s in samples {
            let once = unify(s);
            assert_eq!(unify(&once), once, "not idempotent for {:?}", s);
        }
    }
}
