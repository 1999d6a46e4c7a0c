use crate::utils::{DAMMA, FATHA, KASRA, SHADDA, SUKUN};

/// Ambiguous Pinglish letters: the letters a reference may select, and the
/// letter used when it does not.
const HOMOGRAPHS: &[(char, &[char], char)] = &[
    ('z', &['ذ', 'ض', 'ظ'], 'ز'),
    ('s', &['ث', 'ص'], 'س'),
    ('t', &['ط'], 'ت'),
    ('q', &['غ'], 'ق'),
    ('h', &['ح'], 'ه'),
];

/// Letters skipped when walking a reference word for its consonants.
const REFERENCE_VOWEL_LETTERS: [char; 4] = ['ا', 'و', 'ی', 'آ'];

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

#[inline]
fn lower_is(c: Option<char>, expected: char) -> bool {
    c.map_or(false, |c| c.to_ascii_lowercase() == expected)
}

fn vowel_mark(vowel: char) -> Option<char> {
    match vowel.to_ascii_lowercase() {
        'a' => Some(FATHA),
        'e' | 'i' => Some(KASRA),
        'o' | 'u' => Some(DAMMA),
        _ => None,
    }
}

/// `S`, `C` and `;` stand in for ش, چ and ژ; matched case-sensitively.
fn stand_in(c: char) -> Option<char> {
    match c {
        'S' => Some('ش'),
        'C' => Some('چ'),
        ';' => Some('ژ'),
        _ => None,
    }
}

/// Lowercase consonants with a single rendering.
fn fixed_letter(c: char) -> Option<char> {
    let letter = match c.to_ascii_lowercase() {
        'b' => 'ب',
        'p' => 'پ',
        'j' => 'ج',
        'x' => 'خ',
        'd' => 'د',
        'r' => 'ر',
        'f' => 'ف',
        'k' => 'ک',
        'g' => 'گ',
        'l' => 'ل',
        'm' => 'م',
        'n' => 'ن',
        'v' | 'w' => 'و',
        'y' => 'ی',
        _ => return None,
    };
    Some(letter)
}

/// Doubled letter check; `S` and `C` never pair with `s` and `c`.
fn same_letter(a: char, b: char) -> bool {
    match (a, b) {
        ('S' | 'C', _) | (_, 'S' | 'C') => a == b,
        _ => a.eq_ignore_ascii_case(&b),
    }
}

/// `y`, `v` and `w` render as vowel letters, which the reference walk skips.
#[inline]
fn counts_as_consonant(c: char) -> bool {
    !matches!(c.to_ascii_lowercase(), 'y' | 'v' | 'w')
}

/// Single-word Pinglish scanner.
///
/// Walks the word left to right, writing Persian letters and diacritics into
/// `out`. `base_pos` counts the consonants consumed so far and indexes the
/// consonant skeleton of the reference word.
pub(crate) struct Scanner {
    chars: Vec<char>,
    skeleton: Vec<char>,
    out: String,
    pos: usize,
    base_pos: usize,
}

impl Scanner {
    /// `reference` is expected without diacritics.
    pub(crate) fn new(word: &str, reference: Option<&str>) -> Self {
        let skeleton = reference
            .map(|r| {
                r.chars()
                    .filter(|c| !c.is_whitespace() && !REFERENCE_VOWEL_LETTERS.contains(c))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            chars: word.chars().collect(),
            skeleton,
            out: String::with_capacity(word.len() * 4),
            pos: 0,
            base_pos: 0,
        }
    }

    pub(crate) fn run(mut self) -> String {
        while self.pos < self.chars.len() {
            self.step();
        }
        self.out
    }

    #[inline]
    fn at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn step(&mut self) {
        let Some(c) = self.at(0) else { return };
        let next = self.at(1);

        // glottal stop carrying a vowel
        if c == '?' {
            let carried = match next.map(|n| n.to_ascii_lowercase()) {
                Some('a') => Some("اَ"),
                Some('o') => Some("اُ"),
                Some('e') => Some("اِ"),
                Some('i') => Some("ای"),
                _ => None,
            };
            if let Some(carried) = carried {
                self.out.push_str(carried);
                self.pos += 2;
                return;
            }
        }

        if let Some(long) = self.long_vowel() {
            self.out.push(long);
            self.pos += 2;
            return;
        }

        if let Some(letter) = stand_in(c) {
            self.out.push(letter);
            self.base_pos += 1;
            self.pos += 1;
            self.mark_following_vowel();
            return;
        }

        if c == '?' {
            self.out.push('ع');
            self.base_pos += 1;
            self.pos += 1;
            self.mark_following_vowel();
            return;
        }

        if c.is_ascii_alphabetic() && !is_vowel(c) {
            self.consonant(c);
            return;
        }

        if c == 'A' {
            self.out.push('آ');
            self.pos += if lower_is(next, 'a') { 2 } else { 1 };
            return;
        }

        if is_vowel(c) {
            let prev = self.pos.checked_sub(1).and_then(|p| self.chars.get(p));
            if !prev.map_or(false, |p| p.is_ascii_alphabetic()) {
                self.out.push_str(match c.to_ascii_lowercase() {
                    'a' => "اَ",
                    'e' => "اِ",
                    'o' | 'u' => "اُ",
                    _ => "ای",
                });
            }
            self.pos += 1;
            return;
        }

        self.out.push(c);
        self.pos += 1;
    }

    /// `aa`, `ee` and `oo` in any case.
    fn long_vowel(&self) -> Option<char> {
        let first = self.at(0)?.to_ascii_lowercase();
        if !lower_is(self.at(1), first) {
            return None;
        }
        match first {
            'a' => Some('آ'),
            'e' => Some('ی'),
            'o' => Some('و'),
            _ => None,
        }
    }

    fn consonant(&mut self, c: char) {
        let letter = match fixed_letter(c) {
            Some(letter) => letter,
            None if HOMOGRAPHS.iter().any(|(p, _, _)| *p == c.to_ascii_lowercase()) => {
                self.disambiguate(c)
            }
            None => {
                self.out.push(c);
                self.pos += 1;
                return;
            }
        };

        self.out.push(letter);
        if counts_as_consonant(c) {
            self.base_pos += 1;
        }

        if self.at(1).map_or(false, |n| same_letter(n, c)) {
            self.out.push(SHADDA);
            self.pos += 2;
            self.mark_following_vowel();
            return;
        }

        self.pos += 1;
        let Some(v) = self.at(0) else {
            self.out.push(SUKUN);
            return;
        };

        if v == 'A' {
            let madda = lower_is(self.at(1), 'a');
            self.out.push(if madda { 'آ' } else { 'ا' });
            self.pos += if madda { 2 } else { 1 };
            return;
        }

        match v.to_ascii_lowercase() {
            'a' if lower_is(self.at(1), 'a') => {
                self.out.push('آ');
                self.pos += 2;
            }
            'o' if lower_is(self.at(1), 'o') => {
                self.out.push('و');
                self.pos += 2;
            }
            'e' if lower_is(self.at(1), 'e') => {
                self.out.push('ی');
                self.pos += 2;
            }
            'i' => {
                self.out.push('ی');
                self.pos += 1;
            }
            'a' | 'e' | 'o' | 'u' => {
                self.out.extend(vowel_mark(v));
                self.pos += 1;
            }
            _ => self.out.push(SUKUN),
        }
    }

    /// Writes the mark of a short vowel at the scan position (consuming it),
    /// or a sukun when there is none.
    fn mark_following_vowel(&mut self) {
        match self.at(0).and_then(vowel_mark) {
            Some(mark) => {
                self.out.push(mark);
                self.pos += 1;
            }
            None => self.out.push(SUKUN),
        }
    }

    /// Picks the letter for an ambiguous Pinglish letter, using the reference
    /// consonant at `base_pos` when it is one of the alternatives.
    fn disambiguate(&self, c: char) -> char {
        let key = c.to_ascii_lowercase();
        let Some((_, alternatives, default)) = HOMOGRAPHS.iter().find(|(p, _, _)| *p == key) else {
            return c;
        };
        match self.skeleton.get(self.base_pos) {
            Some(found) if alternatives.contains(found) => *found,
            _ => *default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(word: &str, reference: Option<&str>) -> String {
        Scanner::new(word, reference).run()
    }

    #[test]
    fn consonant_vowel_handling() {
        assert_eq!(scan("ketAb", None), "کِتابْ");
        assert_eq!(scan("xoob", None), "خوبْ");
    }

    #[test]
    fn stand_ins_take_one_vowel_mark() {
        assert_eq!(scan("Sir", None), "شِرْ");
        assert_eq!(scan("Si", None), "شِ");
        assert_eq!(scan("SA", None), "شَ");
        assert_eq!(scan("SAh", None), "شَهْ");
        assert_eq!(scan("Cub", None), "چُبْ");
        assert_eq!(scan("mi;e", None), "می\u{0698}\u{0650}");
        assert_eq!(scan("SS", None), "شْشْ");
    }

    #[test]
    fn gemination_takes_shadda_then_vowel() {
        assert_eq!(scan("tanni", None), "تَن\u{0651}\u{0650}");
        assert_eq!(scan("tann", None), "تَن\u{0651}\u{0652}");
    }

    #[test]
    fn vowel_at_word_start() {
        assert_eq!(scan("ab", None), "اَبْ");
        assert_eq!(scan("u", None), "اُ");
        assert_eq!(scan("ut", None), "اُتْ");
        assert_eq!(scan("Ab", None), "آبْ");
        assert_eq!(scan("?ab", None), "اَبْ");
    }

    #[test]
    fn homograph_defaults_and_reference() {
        assert!(scan("tArikh", None).starts_with('ت'));
        assert!(scan("tArikh", Some("طاریخ")).starts_with('ط'));
        assert_eq!(scan("zohr", Some("ظهر")), "ظُهْرْ");
        assert_eq!(scan("sa?d", Some("سعد")), "سَعْدْ");
        assert_eq!(scan("sa?d", Some("سئد")), "سَعْدْ");
        assert_eq!(scan("sa?di", Some("سعدی")), "سَعْدی");
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(scan("salAm!", None), "سَلامْ!");
        assert_eq!(scan("#", None), "#");
    }
}
