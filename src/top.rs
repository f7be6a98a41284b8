//! Select the top anagram groups

use crate::anagrams::AnagramGroup;

/// Pick the groups with the largest number of words
pub fn most_members(groups: &[AnagramGroup]) -> Vec<&AnagramGroup> {
    top_by_key(groups, AnagramGroup::len)
}

/// Pick the groups with the longest words
pub fn longest_words(groups: &[AnagramGroup]) -> Vec<&AnagramGroup> {
    top_by_key(groups, AnagramGroup::word_len)
}

/// Pick every group that reaches the maximal value of `metric`, sorted by key
fn top_by_key(
    groups: &[AnagramGroup],
    metric: impl Fn(&AnagramGroup) -> usize,
) -> Vec<&AnagramGroup> {
    let Some(max) = groups.iter().map(&metric).max() else {
        return Vec::new();
    };
    let mut top = groups
        .iter()
        .filter(|group| metric(*group) == max)
        .collect::<Vec<_>>();
    top.sort_unstable_by(|a, b| a.key().cmp(b.key()));
    top
}
