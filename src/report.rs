//! Final report of the anagram search

use crate::{
    anagrams::{AnagramGroup, AnagramGroups},
    config::OutputFormat,
    top, Result, Word,
};
use anyhow::Context;
use serde::Serialize;
use std::{fmt, num::NonZeroUsize};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Line that separates anagram groups in text reports
const SEPARATOR: &str = "############";

/// Outcome of the anagram search
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Report<'groups> {
    /// Number of distinct words in the word list
    pub total_words: usize,

    /// Number of anagram groups that have enough words
    pub total_groups: usize,

    /// Minimal number of words of reported anagram groups
    pub min_group_size: usize,

    /// Groups with the largest number of words
    pub most_members: Vec<GroupReport<'groups>>,

    /// Groups with the longest words
    pub longest_words: Vec<GroupReport<'groups>>,
}
//
impl<'groups> Report<'groups> {
    /// Rank anagram groups, which should already be filtered by size
    pub fn new(groups: &'groups AnagramGroups, min_group_size: NonZeroUsize) -> Self {
        let summarize = |top: Vec<&'groups AnagramGroup>| {
            top.into_iter().map(GroupReport::from).collect::<Vec<_>>()
        };
        Self {
            total_words: groups.num_words(),
            total_groups: groups.groups().len(),
            min_group_size: min_group_size.get(),
            most_members: summarize(top::most_members(groups.groups())),
            longest_words: summarize(top::longest_words(groups.groups())),
        }
    }

    /// Format the report
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(self).context("converting report to JSON")?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Print the report on stdout
    pub async fn print(&self, format: OutputFormat) -> Result<()> {
        let rendered = self.render(format)?;
        let mut stdout = BufWriter::new(tokio::io::stdout());
        stdout
            .write_all(rendered.as_bytes())
            .await
            .context("printing the report")?;
        stdout.flush().await.context("printing the report")?;
        Ok(())
    }

    /// Human-readable version of the report
    fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out)
            .expect("writing to a String cannot fail");
        out
    }

    /// Write the human-readable version of the report
    fn write_text(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(
            out,
            "{} anagram groups of at least {} words among {} words",
            self.total_groups, self.min_group_size, self.total_words
        )?;
        let sections = [
            ("Anagram groups with the most words", &self.most_members),
            ("Anagram groups with the longest words", &self.longest_words),
        ];
        for (title, groups) in sections {
            writeln!(out, "\n{title}:")?;
            if groups.is_empty() {
                writeln!(out, "no anagram groups found")?;
                continue;
            }
            for group in groups {
                writeln!(out, "{}", group.key)?;
                writeln!(out, "{}", group.words.join(" "))?;
                writeln!(out, "{}", group.members)?;
                writeln!(out, "{SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

/// Reported anagram group
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct GroupReport<'groups> {
    /// Canonical key of the group
    pub key: &'groups str,

    /// Words of the group
    pub words: &'groups [Word],

    /// Number of words in the group
    pub members: usize,

    /// Length of the words, in characters
    pub word_length: usize,
}
//
impl<'groups> From<&'groups AnagramGroup> for GroupReport<'groups> {
    fn from(group: &'groups AnagramGroup) -> Self {
        Self {
            key: group.key(),
            words: group.words(),
            members: group.len(),
            word_length: group.word_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::InputConfig, progress::ProgressReport};

    fn groups(words: &[&str]) -> AnagramGroups {
        let mut groups = AnagramGroups::build(
            words.iter().copied().map(Word::from).collect(),
            InputConfig::default(),
            &ProgressReport::hidden(),
        );
        groups.retain_min_size(NonZeroUsize::new(2).unwrap());
        groups
    }

    #[test]
    fn text_report() {
        let groups = groups(&["stop", "pots", "tops", "dog", "god", "listen", "silent", "x"]);
        let report = Report::new(&groups, NonZeroUsize::new(2).unwrap());
        assert_eq!(report.total_words, 8);
        assert_eq!(report.total_groups, 3);
        let text = report.render(OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "3 anagram groups of at least 2 words among 8 words\n\
             \n\
             Anagram groups with the most words:\n\
             opst\n\
             stop pots tops\n\
             3\n\
             ############\n\
             \n\
             Anagram groups with the longest words:\n\
             eilnst\n\
             listen silent\n\
             2\n\
             ############\n"
        );
    }

    #[test]
    fn empty_text_report() {
        let groups = groups(&["a", "b"]);
        let report = Report::new(&groups, NonZeroUsize::new(2).unwrap());
        let text = report.render(OutputFormat::Text).unwrap();
        assert_eq!(text.matches("no anagram groups found").count(), 2);
    }

    #[test]
    fn json_report() {
        let groups = groups(&["dog", "god", "act", "cat"]);
        let report = Report::new(&groups, NonZeroUsize::new(2).unwrap());
        let json = report.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_groups"], 2);
        assert_eq!(value["most_members"].as_array().unwrap().len(), 2);
        assert_eq!(value["longest_words"][0]["key"], "act");
        assert_eq!(value["longest_words"][1]["words"][1], "god");
        assert_eq!(value["longest_words"][1]["word_length"], 3);
    }
}
