use rustc_hash::FxHashMap;

use crate::utils::ZWNJ;

/// Word groups whose ZWNJ-joined form is legitimate, with derived lookups.
///
/// Built from every lookup word and homograph that contains a ZWNJ. For a
/// group `[a, b, c]`, `joined` maps `ab`, `bc` and `abc` to `a‌b`, `b‌c` and
/// `a‌b‌c`.
#[derive(Debug, Clone, Default)]
pub struct HalfSpaceGroups {
    pub groups: Vec<Vec<String>>,
    pub joined: FxHashMap<String, String>,
    by_first: FxHashMap<String, Vec<usize>>,
}

impl HalfSpaceGroups {
    pub fn build<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut groups: Vec<Vec<String>> = words
            .into_iter()
            .filter(|w| w.contains(ZWNJ))
            .map(|w| {
                w.split(ZWNJ)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|parts| parts.len() >= 2)
            .collect();
        groups.sort();
        groups.dedup();

        let mut joined: FxHashMap<String, String> = FxHashMap::default();
        let mut by_first: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let zwnj = ZWNJ.to_string();

        for (gi, group) in groups.iter().enumerate() {
            by_first.entry(group[0].clone()).or_default().push(gi);
            for start in 0..group.len() {
                for end in start + 2..=group.len() {
                    let run = &group[start..end];
                    joined
                        .entry(run.concat())
                        .or_insert_with(|| run.join(&zwnj));
                }
            }
        }

        Self {
            groups,
            joined,
            by_first,
        }
    }

    /// Groups whose first word is `first`.
    pub fn starting_with(&self, first: &str) -> impl Iterator<Item = &[String]> {
        self.by_first
            .get(first)
            .into_iter()
            .flatten()
            .map(move |&gi| self.groups[gi].as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_covers_every_sub_run() {
        let groups = HalfSpaceGroups::build(["الف\u{200c}ب\u{200c}ج", "بدون", "د\u{200c}ه"]);
        assert_eq!(groups.groups.len(), 2);
        assert_eq!(groups.joined.get("الفب").map(String::as_str), Some("الف\u{200c}ب"));
        assert_eq!(groups.joined.get("بج").map(String::as_str), Some("ب\u{200c}ج"));
        assert_eq!(
            groups.joined.get("الفبج").map(String::as_str),
            Some("الف\u{200c}ب\u{200c}ج")
        );
        assert_eq!(groups.joined.len(), 4);
        assert_eq!(groups.starting_with("الف").count(), 1);
        assert_eq!(groups.starting_with("ب").count(), 0);
    }
}
