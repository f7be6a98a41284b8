//! Loading of the word list

use crate::{config::InputConfig, Result, Word};
use anyhow::Context;
use std::path::Path;

/// Load the word list at `path`
pub async fn load(path: &Path, config: InputConfig) -> Result<Vec<Word>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading word list {}", path.display()))?;
    let words = parse(&text, config);
    log::info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Extract the words from the contents of a word list, one word per line
///
/// Surrounding whitespace is stripped and blank lines are ignored.
pub fn parse(text: &str, config: InputConfig) -> Vec<Word> {
    let mut accept = make_filter(config);
    text.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .filter(|word| accept(*word))
        .map(Word::from)
        .collect()
}

/// Build the word filter
///
/// Words go through this filter before any other processing, so that words
/// which we know to be inappropriate are not canonicalized for nothing.
fn make_filter(config: InputConfig) -> impl FnMut(&str) -> bool {
    move |word| {
        if config.letters_only && !word.chars().all(char::is_alphabetic) {
            log::trace!("Rejected {word:?} because it's not only made of letters");
            return false;
        }
        true
    }
}
