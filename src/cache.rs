//! Disk cache of the word list
//!
//! The word list is kept as a plain text file, next to a small JSON sidecar
//! recording where it was downloaded from. The cached copy is downloaded
//! again when it is missing, when it is older than the configured maximum age,
//! or when it was downloaded from a different URL.

use crate::{config::CacheConfig, download, progress::ProgressReport, Result};
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsStr,
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::fs;

/// Make sure that an up-to-date word list is available on disk, and tell
/// where it is
pub async fn ensure(
    config: &CacheConfig,
    client: &reqwest::Client,
    report: &ProgressReport,
) -> Result<PathBuf> {
    let path = cache_path(config).context("looking up the cache location")?;
    let freshness = check(&path, config).await?;
    if !config.refresh && !freshness.needs_download() {
        log::info!("Using cached word list {} ({freshness})", path.display());
        return Ok(path);
    }
    if config.refresh {
        log::info!("Refreshing {} as requested ({freshness})", path.display());
    } else {
        log::info!("Downloading {} into {} ({freshness})", config.url, path.display());
    }

    // Usable copies are only used as a fallback if the download fails
    match refresh(config, client, &path, report).await {
        Ok(()) => Ok(path),
        Err(e) if freshness.has_usable_copy() => {
            log::warn!(
                "Failed to refresh the word list, using the cached copy {} instead: {e:#}",
                path.display()
            );
            Ok(path)
        }
        Err(e) => Err(e),
    }
}

/// State of the cached word list
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Freshness {
    /// There is no cached word list
    Missing,

    /// The cached word list was downloaded from another URL
    WrongSource,

    /// The cached word list is older than the configured maximum age
    Stale { age: Duration },

    /// The cached word list can be used as-is
    Fresh { age: Duration },
}
//
impl Freshness {
    /// Truth that the word list must be downloaded again
    pub fn needs_download(&self) -> bool {
        !matches!(self, Self::Fresh { .. })
    }

    /// Truth that the cached copy may stand in for a failed download
    pub fn has_usable_copy(&self) -> bool {
        matches!(self, Self::Stale { .. } | Self::Fresh { .. })
    }
}
//
impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no cached copy"),
            Self::WrongSource => write!(f, "cached copy comes from another URL"),
            Self::Stale { age } => write!(f, "cached copy is stale, {} days old", age_days(*age)),
            Self::Fresh { age } => write!(f, "cached copy is {} days old", age_days(*age)),
        }
    }
}

/// Check the state of the cached word list at `path`
pub async fn check(path: &Path, config: &CacheConfig) -> Result<Freshness> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Freshness::Missing),
        Err(e) => return Err(e).with_context(|| format!("checking {}", path.display())),
    };
    if !source_matches(path, &config.url).await? {
        return Ok(Freshness::WrongSource);
    }

    // A modification date in the future is treated as brand new
    let modified = metadata
        .modified()
        .with_context(|| format!("querying the modification date of {}", path.display()))?;
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    Ok(if age > config.max_age {
        Freshness::Stale { age }
    } else {
        Freshness::Fresh { age }
    })
}

/// Determine where the word list should be cached, creating the enclosing
/// directory if it doesn't exist
pub fn cache_path(config: &CacheConfig) -> Result<PathBuf> {
    if let Some(cache_file) = &config.cache_file {
        if let Some(parent) = cache_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("setting up {}", parent.display()))?;
        }
        return Ok(cache_file.clone());
    }
    let dirs = ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
        .context("determining the cache's location")?;
    let cache_dir = dirs.cache_dir();
    std::fs::create_dir_all(cache_dir).context("setting up the cache directory")?;
    Ok(cache_dir.join(format!("{}.txt", config.source_name)))
}

/// What is recorded next to the cached word list
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct CacheMetadata {
    /// Where the word list was downloaded from
    url: Box<str>,
}

/// Download the word list and replace the cached copy with it
async fn refresh(
    config: &CacheConfig,
    client: &reqwest::Client,
    path: &Path,
    report: &ProgressReport,
) -> Result<()> {
    // Download next to the cache, then move the result in place, so that a
    // failed download never leaves a truncated word list behind
    let partial = sibling(path, ".part");
    if let Err(e) = download::download(client, &config.url, &partial, report).await {
        if let Err(cleanup) = fs::remove_file(&partial).await {
            if cleanup.kind() != ErrorKind::NotFound {
                log::debug!("Failed to remove {}: {cleanup}", partial.display());
            }
        }
        return Err(e);
    }

    // Drop the previous metadata first, a word list without metadata is
    // trusted while one with outdated metadata would be downloaded again
    let metadata_path = metadata_path(path);
    if let Err(e) = fs::remove_file(&metadata_path).await {
        if e.kind() != ErrorKind::NotFound {
            log::warn!("Failed to remove outdated {}: {e}", metadata_path.display());
        }
    }
    fs::rename(&partial, path)
        .await
        .with_context(|| format!("moving the downloaded word list to {}", path.display()))?;

    // Record where the word list comes from. The new word list is usable
    // even if this fails.
    let metadata = CacheMetadata {
        url: config.url.clone(),
    };
    let save_metadata = async {
        let metadata_json =
            serde_json::to_vec_pretty(&metadata).context("converting cache metadata to JSON")?;
        fs::write(&metadata_path, &metadata_json)
            .await
            .context("saving cache metadata to disk")
    };
    if let Err(e) = save_metadata.await {
        log::warn!("Failed to save cache metadata {}: {e:#}", metadata_path.display());
    }
    Ok(())
}

/// Truth that the cached word list at `path` was downloaded from `url`
///
/// Word lists without metadata (e.g. put there by hand) are assumed to match.
async fn source_matches(path: &Path, url: &str) -> Result<bool> {
    let metadata_path = metadata_path(path);
    let metadata_json = match fs::read(&metadata_path).await {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
        Err(e) => {
            return Err(e).with_context(|| format!("reading {}", metadata_path.display()))
        }
    };
    match serde_json::from_slice::<CacheMetadata>(&metadata_json) {
        Ok(metadata) => Ok(&*metadata.url == url),
        Err(e) => {
            log::warn!("Ignoring corrupted cache metadata {}: {e}", metadata_path.display());
            Ok(false)
        }
    }
}

/// Location of the metadata sidecar of the cached word list at `path`
fn metadata_path(path: &Path) -> PathBuf {
    sibling(path, ".meta.json")
}

/// File next to `path`, whose name is that of `path` plus `suffix`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or(OsStr::new("words")).to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

/// Age in whole days
fn age_days(age: Duration) -> u64 {
    age.as_secs() / (24 * 3600)
}
