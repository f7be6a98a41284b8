//! Well-known word lists that can be fetched without spelling out a URL

use crate::Result;
use anyhow::Context;

/// Get information about a word list
pub fn get(short_name: &str) -> Result<SourceInfo> {
    SOURCES
        .iter()
        .find(|source| source.short_name == short_name)
        .copied()
        .with_context(|| {
            let known = SOURCES
                .iter()
                .map(|source| source.short_name)
                .collect::<Vec<_>>()
                .join(", ");
            format!("Failed to find user-requested word list {short_name} (known lists: {known})")
        })
}

/// What we know about a word list
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SourceInfo {
    /// Short name, as used on the command line and for cache file names
    pub short_name: &'static str,

    /// Human-readable description
    pub description: &'static str,

    /// Where the word list can be downloaded from
    pub url: &'static str,
}

/// Short name of the word list that is used when none is specified
pub const DEFAULT_SOURCE: &str = "words";

/// Every word list supported out of the box
const SOURCES: &[SourceInfo] = &[
    SourceInfo {
        short_name: "words",
        description: "English words, including proper nouns, abbreviations and symbols",
        url: "https://raw.githubusercontent.com/dwyl/english-words/master/words.txt",
    },
    SourceInfo {
        short_name: "words-alpha",
        description: "English words made only of letters",
        url: "https://raw.githubusercontent.com/dwyl/english-words/master/words_alpha.txt",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_exists() {
        let source = get(DEFAULT_SOURCE).unwrap();
        assert_eq!(source.short_name, "words");
        assert!(source.url.ends_with("/words.txt"));
    }

    #[test]
    fn unknown_source_lists_alternatives() {
        let message = format!("{:#}", get("klingon").unwrap_err());
        assert!(message.contains("klingon"));
        assert!(message.contains("words-alpha"));
    }
}
