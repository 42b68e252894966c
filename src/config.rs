use std::path::PathBuf;
use std::time::Duration;

use crate::data::cache::DatasetCache;
use crate::data::source::{ArchiveSource, FileSource, HttpSource, SSA_NAMES_URL};

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const ENV_URL: &str = "BABY_NAMES_URL";
const ENV_ARCHIVE: &str = "BABY_NAMES_ARCHIVE";
const ENV_TIMEOUT: &str = "BABY_NAMES_TIMEOUT_SECS";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Where to get the name archive from. Read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source_url: String,
    /// Local archive; takes precedence over `source_url` when set.
    pub archive_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: SSA_NAMES_URL.to_string(),
            archive_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            config.source_url = url.trim().to_string();
        }
        if let Some(path) = lookup(ENV_ARCHIVE).filter(|v| !v.trim().is_empty()) {
            config.archive_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => log::warn!(
                    "Ignoring {ENV_TIMEOUT}={raw:?}; using {DEFAULT_TIMEOUT_SECS}s"
                ),
            }
        }
        config
    }

    pub fn archive_source(&self) -> Box<dyn ArchiveSource> {
        match &self.archive_path {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(HttpSource::new(&self.source_url, self.timeout)),
        }
    }

    pub fn dataset_cache(&self) -> DatasetCache {
        DatasetCache::new(self.archive_source())
    }
}
