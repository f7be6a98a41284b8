//! This program looks for anagrams in a word list, by default the English word
//! list from <https://github.com/dwyl/english-words>.

mod anagrams;
mod cache;
mod config;
mod download;
mod progress;
mod report;
mod sources;
mod top;
mod words;

use crate::{
    anagrams::AnagramGroups,
    config::{Config, OutputFormat},
    progress::ProgressReport,
    report::Report,
};
use clap::Parser;
use log::LevelFilter;
use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

/// Find the largest anagram groups and the longest anagrams of a word list
///
/// The word list is downloaded once, then cached on disk and only downloaded
/// again once the cached copy gets too old.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Short name of a well-known word list, e.g. "words-alpha"
    ///
    /// Ignored if an explicit URL is specified with --url.
    #[arg(short, long, default_value = sources::DEFAULT_SOURCE)]
    source: Box<str>,

    /// URL of the word list, one word per line
    ///
    /// Word lists whose URL ends in ".gz" are decompressed after download.
    #[arg(long)]
    url: Option<Box<str>>,

    /// Location of the word list cache
    ///
    /// By default, the word list is cached in the user's cache directory.
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Age in days beyond which the cached word list is downloaded again
    #[arg(long, default_value = "7")]
    max_age_days: NonZeroUsize,

    /// Download the word list again even if the cached copy is recent
    ///
    /// The cached copy is still used if the download fails.
    #[arg(long, default_value_t = false)]
    refresh: bool,

    /// Minimum number of words in a reported anagram group
    #[arg(short, long, default_value = "2")]
    min_group_size: NonZeroUsize,

    /// Ignore words that contain anything else than letters
    ///
    /// Many word lists contain abbreviations, numbers or compound words with
    /// punctuation, which are not very interesting anagrams.
    #[arg(long, default_value_t = false)]
    letters_only: bool,

    /// Count words which only differ by case as distinct anagrams
    ///
    /// By default, "Dog" and "dog" are considered to be the same word, and
    /// only the first spelling that appears in the word list is kept.
    #[arg(long, default_value_t = false)]
    keep_case_variants: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        if let Some(url) = &args.url {
            anyhow::ensure!(
                url.starts_with("http://") || url.starts_with("https://"),
                "word list URL {url} should use the http or https scheme"
            );
        }
        Ok(args)
    }

    /// Maximal age of the cached word list
    pub fn max_age(&self) -> Duration {
        let days = u64::try_from(self.max_age_days.get()).unwrap_or(u64::MAX);
        Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY))
    }
}
//
#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let args = Args::parse_and_check()?;

    // Pick a word list
    let config = Config::new(args)?;
    log::debug!("Running with {config:#?}");

    // Set up progress reporting
    let report = ProgressReport::new();

    // Make sure that a recent word list is available, then load it
    let client = reqwest::Client::new();
    let path = cache::ensure(&config.cache, &client, &report).await?;
    let words = words::load(&path, config.input).await?;

    // Group words by anagram equivalence class
    let mut groups = AnagramGroups::build(words, config.input, &report);
    groups.retain_min_size(config.min_group_size);

    // Display the top anagram groups
    Report::new(&groups, config.min_group_size)
        .print(config.format)
        .await
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Case-sensitive word from the word list
pub type Word = Box<str>;

/// Number of seconds in a day
const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["rusty-anagrams"]).unwrap();
        assert_eq!(&*args.source, sources::DEFAULT_SOURCE);
        assert_eq!(args.max_age(), Duration::from_secs(7 * SECONDS_PER_DAY));
        assert_eq!(args.min_group_size.get(), 2);
        assert_eq!(args.format, OutputFormat::Text);

        let config = Config::new(args).unwrap();
        assert_eq!(&*config.cache.url, sources::get(sources::DEFAULT_SOURCE).unwrap().url);
        assert_eq!(&*config.cache.source_name, "words");
        assert!(!config.cache.refresh);
        assert!(!config.input.letters_only);
        assert!(!config.input.keep_case_variants);
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "rusty-anagrams",
            "--url",
            "https://example.com/list.txt",
            "--cache-file",
            "/tmp/list.txt",
            "--max-age-days",
            "1",
            "-m",
            "5",
            "--letters-only",
            "--format",
            "json",
        ])
        .unwrap();
        let config = Config::new(args).unwrap();
        assert_eq!(&*config.cache.url, "https://example.com/list.txt");
        assert_eq!(&*config.cache.source_name, "custom");
        assert_eq!(config.cache.cache_file, Some(PathBuf::from("/tmp/list.txt")));
        assert_eq!(config.cache.max_age, Duration::from_secs(SECONDS_PER_DAY));
        assert_eq!(config.min_group_size.get(), 5);
        assert!(config.input.letters_only);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn url_bypasses_the_catalog() {
        let args = Args::try_parse_from([
            "rusty-anagrams",
            "--url",
            "https://example.com/list.txt",
            "--source",
            "klingon",
        ])
        .unwrap();
        let config = Config::new(args).unwrap();
        assert_eq!(&*config.cache.url, "https://example.com/list.txt");
        assert_eq!(&*config.cache.source_name, "custom");

        let args = Args::try_parse_from(["rusty-anagrams", "--source", "klingon"]).unwrap();
        assert!(Config::new(args).is_err());
    }

    #[test]
    fn huge_max_age_saturates() {
        let args =
            Args::try_parse_from(["rusty-anagrams", "--max-age-days", "300000000000000"]).unwrap();
        assert_eq!(args.max_age(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn zero_min_group_size_is_rejected() {
        assert!(Args::try_parse_from(["rusty-anagrams", "-m", "0"]).is_err());
    }
}
