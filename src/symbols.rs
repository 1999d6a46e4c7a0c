//! Expansion of common abbreviations and Arabic ligature symbols.

/// Religious and legal abbreviations, matched as literal substrings.
///
/// Multi-letter forms are padded with spaces so they only match whole tokens.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("( ص )", "( صلی‌الله‌علیه‌وآله )"),
    ("( ع )", "( علیه‌السلام )"),
    ("( س )", "( سلام‌الله )"),
    ("( ره )", "( رحمه‌الله‌علیه )"),
    ("( قده )", "( قدس‌سره )"),
    ("( رض )", "( رضی‌الله‌عنه )"),
    (" ج ا ا ", " جمهوری اسلامی ایران "),
    (" ج اا ", " جمهوری اسلامی ایران "),
    (" ج‌اا ", " جمهوری اسلامی ایران "),
    (" ج ا ایران ", " جمهوری اسلامی ایران "),
    (" ج اایران ", " جمهوری اسلامی ایران "),
    (" ج‌اایران ", " جمهوری اسلامی ایران "),
    (" صص ", " صفحات "),
    (" ه ق ", " هجری قمری "),
    (" ه ش ", " هجری شمسی "),
    (" ق م ", " قبل از میلاد "),
    (" الخ ", " الی‌آخر "),
];

/// Arabic Presentation Forms ligatures and their spelled-out words.
pub const SPECIAL_SYMBOLS: &[(char, &str)] = &[
    ('﷼', " ریال "),
    ('ﷴ', " محمد "),
    ('ﷺ', " صلی‌الله‌علیه‌وآله‌وسلم "),
    ('ﷲ', " الله "),
    ('ﷻ', " جَل جلاله "),
    ('ﷱ', " قلی "),
    ('ﷳ', " صلی "),
    ('ﷰ', " اکبر "),
    ('ﷵ', " صلی‌الله‌علیه‌وآله‌وسلم "),
    ('ﷶ', " رسول "),
    ('ﷷ', " علیه‌السلام "),
    ('ﷸ', " و سلم "),
    ('﷽', " بسم‌الله‌الرحمن‌الرحیم "),
];

pub fn replace_abbreviations(text: &str) -> String {
    ABBREVIATIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

/// Replaces each ligature symbol with its words, padded with spaces.
///
/// ```
/// use parsinorm::symbols::replace_special_symbols;
/// assert_eq!(replace_special_symbols("100﷼"), "100 ریال ");
/// ```
pub fn replace_special_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match SPECIAL_SYMBOLS.iter().find(|(symbol, _)| *symbol == c) {
            Some((_, words)) => out.push_str(words),
            None => out.push(c),
        }
    }
    out
}
