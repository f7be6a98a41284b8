//! Grouping of words into anagram equivalence classes
//!
//! Two words are anagrams of one another when they are made of the same
//! characters, ignoring case. Each equivalence class is identified by a
//! canonical key, which is the lowercase form of its words with characters
//! sorted in increasing order.

use crate::{
    config::InputConfig,
    progress::{ProgressReport, Work},
    Word,
};
use rayon::prelude::*;
use std::{
    collections::{hash_map, HashMap},
    num::NonZeroUsize,
};
use unicase::UniCase;

/// Canonical form shared by all anagrams of a word
pub type Key = Box<str>;

/// Compute the canonical key of a word
pub fn canonical_key(word: &str) -> Key {
    let mut chars = word.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    chars.sort_unstable();
    chars.into_iter().collect::<String>().into()
}

/// Words which are anagrams of one another
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnagramGroup {
    /// Canonical key shared by all words of the group
    key: Key,

    /// Words of the group, in order of first appearance in the word list
    words: Vec<Word>,
}
//
impl AnagramGroup {
    /// Start a group from its first word
    fn new(key: Key, word: Word) -> Self {
        Self {
            key,
            words: vec![word],
        }
    }

    /// Canonical key shared by all words of the group
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Words of the group
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words in the group
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Length of the words of the group, in characters
    pub fn word_len(&self) -> usize {
        self.key.chars().count()
    }

    /// Add a word to the group, unless it is a duplicate
    ///
    /// Words which only differ by case are duplicates unless
    /// `keep_case_variants` is set. Returns truth that the word was added.
    fn add(&mut self, word: Word, keep_case_variants: bool) -> bool {
        let duplicate = if keep_case_variants {
            self.words.contains(&word)
        } else {
            let folded = UniCase::new(&*word);
            self.words.iter().any(|known| UniCase::new(&**known) == folded)
        };
        if duplicate {
            log::trace!("Ignored duplicate {word:?} of anagram group {:?}", self.words);
            return false;
        }
        self.words.push(word);
        true
    }
}

/// Anagram groups from a word list
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnagramGroups {
    /// Groups, in order of first appearance of their key in the word list
    groups: Vec<AnagramGroup>,

    /// Number of distinct words across all groups
    num_words: usize,
}
//
impl AnagramGroups {
    /// Group a word list by canonical key
    pub fn build(words: Vec<Word>, config: InputConfig, report: &ProgressReport) -> Self {
        // Canonicalize words in parallel, that's where most of the work is
        const CHUNK: usize = 4096;
        let progress = report.add("Grouping anagrams", Work::Steps(words.len()));
        let keys = words
            .par_chunks(CHUNK)
            .flat_map_iter(|chunk| {
                let keys = chunk
                    .iter()
                    .map(|word| canonical_key(word))
                    .collect::<Vec<_>>();
                progress.make_progress(chunk.len() as u64);
                keys
            })
            .collect::<Vec<_>>();
        progress.finish();

        // Bucket words by key, keeping track of first appearance order
        let mut result = Self::default();
        let mut group_indices = HashMap::<Key, usize>::new();
        for (key, word) in keys.into_iter().zip(words) {
            match group_indices.entry(key) {
                hash_map::Entry::Occupied(o) => {
                    if result.groups[*o.get()].add(word, config.keep_case_variants) {
                        result.num_words += 1;
                    }
                }
                hash_map::Entry::Vacant(v) => {
                    let group = AnagramGroup::new(v.key().clone(), word);
                    v.insert(result.groups.len());
                    result.groups.push(group);
                    result.num_words += 1;
                }
            }
        }
        log::info!(
            "Sorted {} distinct words into {} anagram groups",
            result.num_words,
            result.groups.len()
        );
        result
    }

    /// Drop groups that have fewer than `min_size` words
    pub fn retain_min_size(&mut self, min_size: NonZeroUsize) {
        let before = self.groups.len();
        self.groups.retain(|group| group.len() >= min_size.get());
        log::debug!(
            "Dropped {} anagram groups with fewer than {min_size} words",
            before - self.groups.len()
        );
    }

    /// Anagram groups
    pub fn groups(&self) -> &[AnagramGroup] {
        &self.groups
    }

    /// Number of distinct words that were grouped
    pub fn num_words(&self) -> usize {
        self.num_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[&str], config: InputConfig) -> AnagramGroups {
        AnagramGroups::build(
            words.iter().copied().map(Word::from).collect(),
            config,
            &ProgressReport::hidden(),
        )
    }

    fn group_words<'a>(groups: &'a AnagramGroups, key: &str) -> Vec<&'a str> {
        let group = groups
            .groups()
            .iter()
            .find(|group| group.key() == key)
            .unwrap_or_else(|| panic!("no group with key {key:?}"));
        group.words().iter().map(|word| &**word).collect()
    }

    #[test]
    fn canonical_keys() {
        assert_eq!(&*canonical_key("listen"), "eilnst");
        assert_eq!(canonical_key("silent"), canonical_key("Listen"));
        assert_eq!(&*canonical_key("Dormitory"), "dimoorrty");
        assert_eq!(&*canonical_key(""), "");
        assert_ne!(canonical_key("abc"), canonical_key("abcc"));
    }

    #[test]
    fn words_are_bucketed_in_order() {
        let groups = build(
            &["listen", "dog", "silent", "cat", "God", "enlist", "act"],
            InputConfig::default(),
        );
        assert_eq!(groups.groups().len(), 3);
        assert_eq!(groups.num_words(), 7);
        assert_eq!(groups.groups()[0].key(), "eilnst");
        assert_eq!(group_words(&groups, "eilnst"), ["listen", "silent", "enlist"]);
        assert_eq!(group_words(&groups, "dgo"), ["dog", "God"]);
        assert_eq!(group_words(&groups, "act"), ["cat", "act"]);
        assert_eq!(groups.groups()[0].word_len(), 6);
    }

    #[test]
    fn case_variants_collapse_by_default() {
        let words = ["dog", "Dog", "god", "dog", "DOG"];
        let groups = build(&words, InputConfig::default());
        assert_eq!(group_words(&groups, "dgo"), ["dog", "god"]);
        assert_eq!(groups.num_words(), 2);

        let config = InputConfig {
            keep_case_variants: true,
            ..InputConfig::default()
        };
        let groups = build(&words, config);
        assert_eq!(group_words(&groups, "dgo"), ["dog", "Dog", "god", "DOG"]);
        assert_eq!(groups.num_words(), 4);
    }

    #[test]
    fn small_groups_are_dropped() {
        let mut groups = build(
            &["a", "pots", "stop", "tops", "opts", "dog", "god", "cat"],
            InputConfig::default(),
        );
        groups.retain_min_size(NonZeroUsize::new(2).unwrap());
        let keys = groups.groups().iter().map(AnagramGroup::key).collect::<Vec<_>>();
        assert_eq!(keys, ["opst", "dgo"]);

        groups.retain_min_size(NonZeroUsize::new(3).unwrap());
        let keys = groups.groups().iter().map(AnagramGroup::key).collect::<Vec<_>>();
        assert_eq!(keys, ["opst"]);
    }

    #[test]
    fn many_words_span_several_chunks() {
        let words = (0..10_000)
            .map(|i| if i % 2 == 0 { "stop" } else { "pots" })
            .chain(["tops"])
            .map(Word::from)
            .collect::<Vec<_>>();
        let config = InputConfig {
            keep_case_variants: true,
            ..InputConfig::default()
        };
        let groups = AnagramGroups::build(words, config, &ProgressReport::hidden());
        assert_eq!(groups.groups().len(), 1);
        assert_eq!(group_words(&groups, "opst"), ["stop", "pots", "tops"]);
    }

    #[test]
    fn empty_word_list() {
        let mut groups = build(&[], InputConfig::default());
        groups.retain_min_size(NonZeroUsize::new(2).unwrap());
        assert!(groups.groups().is_empty());
        assert_eq!(groups.num_words(), 0);
    }
}
