//! Processing pipeline configuration

use crate::{sources, Args, Result};
use clap::ValueEnum;
use std::{
    num::NonZeroUsize,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

/// Final process configuration
///
/// This is the result of combining digested [`Args`] with the selected word
/// list. Please refer to [`Args`] to know more about common fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Subset of the configuration that affects where the word list comes from
    pub cache: CacheConfig,

    /// Subset of the configuration that affects which words are kept and how
    /// they are grouped
    pub input: InputConfig,

    // Other fields have the same meaning as in Args
    pub min_group_size: NonZeroUsize,
    pub format: OutputFormat,
}
//
impl Config {
    /// Determine process configuration from initialization products
    ///
    /// The well-known word list named by `--source` is only looked up when no
    /// explicit URL is specified.
    pub(crate) fn new(args: Args) -> Result<Arc<Self>> {
        let max_age = args.max_age();
        let Args {
            source,
            url,
            cache_file,
            max_age_days: _,
            refresh,
            min_group_size,
            letters_only,
            keep_case_variants,
            format,
        } = args;
        let (source_name, url): (Box<str>, Box<str>) = match url {
            Some(url) => (CUSTOM_SOURCE_NAME.into(), url),
            None => {
                let source = sources::get(&source)?;
                log::info!("Using word list {} ({})", source.short_name, source.description);
                (source.short_name.into(), source.url.into())
            }
        };
        Ok(Arc::new(Self {
            cache: CacheConfig {
                source_name,
                url,
                cache_file,
                max_age,
                refresh,
            },
            input: InputConfig {
                letters_only,
                keep_case_variants,
            },
            min_group_size,
            format,
        }))
    }
}

/// Name under which word lists from user-provided URLs are cached
const CUSTOM_SOURCE_NAME: &str = "custom";

/// Subset of the configuration that affects where the word list comes from
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CacheConfig {
    /// Short name of the word list, used to name the default cache file
    pub source_name: Box<str>,

    /// Where the word list is downloaded from
    pub url: Box<str>,

    /// Explicit cache file location, overriding the default one
    pub cache_file: Option<PathBuf>,

    /// Age beyond which the cached word list is downloaded again
    pub max_age: Duration,

    /// Truth that the word list should be downloaded even if the cache is fresh
    pub refresh: bool,
}

/// Subset of the configuration that affects which words are kept and how
/// they are grouped
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct InputConfig {
    /// Truth that words with non-alphabetic characters should be ignored
    pub letters_only: bool,

    /// Truth that words which only differ by case count as distinct anagrams
    pub keep_case_variants: bool,
}

/// Report output format
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,

    /// Pretty-printed JSON document
    Json,
}
