//! Keyword sets.
//!
//! A [`WordList`] is built once from a whitespace-separated string when a language is
//! activated and is read-only while styling. Besides exact membership it supports:
//!
//! - case-insensitive lookup,
//! - prefix entries written `^prefix` (match any word starting with `prefix`),
//! - abbreviation entries such as `end~if`, matching `end`, `endi`, and `endif` through
//!   [`WordList::contains_abbreviated`].

/// A sorted, de-duplicated set of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
    folded: Vec<String>,
    prefixes: Vec<String>,
    lower: bool,
}

impl WordList {
    /// Build a list from whitespace-separated words.
    pub fn new(text: &str) -> Self {
        Self::build(text, false)
    }

    /// Build a list, lower-casing every entry.
    pub fn lowered(text: &str) -> Self {
        Self::build(text, true)
    }

    fn build(text: &str, lower: bool) -> Self {
        let mut words: Vec<String> = text
            .split([' ', '\t', '\r', '\n'])
            .filter(|w| !w.is_empty())
            .map(|w| {
                if lower {
                    w.to_ascii_lowercase()
                } else {
                    w.to_string()
                }
            })
            .collect();
        words.sort_unstable();
        words.dedup();

        let mut folded: Vec<String> = words.iter().map(|w| w.to_ascii_lowercase()).collect();
        folded.sort_unstable();
        folded.dedup();

        let prefixes = words
            .iter()
            .filter_map(|w| w.strip_prefix('^'))
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            words,
            folded,
            prefixes,
            lower,
        }
    }

    /// Replace the contents, returning `true` if the set of words changed.
    ///
    /// A list built with [`WordList::lowered`] keeps lower-casing its entries.
    pub fn set(&mut self, text: &str) -> bool {
        let next = Self::build(text, self.lower);
        if next.words == self.words {
            return false;
        }
        *self = next;
        true
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list has no words; an empty list matches nothing.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at sorted index `index`.
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Iterate the words in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Membership test, optionally ignoring ASCII case.
    pub fn contains(&self, word: &str, case_insensitive: bool) -> bool {
        if word.is_empty() || self.words.is_empty() {
            return false;
        }
        let found = if case_insensitive {
            let lowered = word.to_ascii_lowercase();
            self.folded.binary_search(&lowered).is_ok()
        } else {
            self.words.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
        };
        found || self.matches_prefix(word, case_insensitive)
    }

    fn matches_prefix(&self, word: &str, case_insensitive: bool) -> bool {
        self.prefixes.iter().any(|prefix| {
            word.len() >= prefix.len()
                && if case_insensitive {
                    word.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
                } else {
                    word.as_bytes().starts_with(prefix.as_bytes())
                }
        })
    }

    /// Abbreviation-aware membership.
    ///
    /// An entry `head<marker>tail` matches `head` followed by any prefix of `tail`. Entries
    /// without a marker, or whose marker is the first or last byte, match literally.
    pub fn contains_abbreviated(&self, word: &str, marker: char) -> bool {
        if word.is_empty() || self.words.is_empty() {
            return false;
        }
        if self.contains(word, false) {
            return true;
        }
        let mut buf = [0u8; 4];
        let marker = marker.encode_utf8(&mut buf);
        for split in 1..=word.len() {
            if !word.is_char_boundary(split) {
                continue;
            }
            let (head, rest) = word.split_at(split);
            let key = format!("{head}{marker}");
            let first = self.words.partition_point(|w| w.as_str() < key.as_str());
            let candidates = self.words[first..]
                .iter()
                .take_while(|w| w.starts_with(key.as_str()));
            for entry in candidates {
                let tail = &entry[key.len()..];
                if !tail.is_empty() && tail.starts_with(rest) {
                    return true;
                }
            }
        }
        false
    }
}

impl From<&str> for WordList {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
