use std::path::PathBuf;
use std::time::Duration;

use crate::error::{NamesError, Result};

/// Where the SSA publishes the national baby-name archive.
pub const SSA_NAMES_URL: &str = "https://www.ssa.gov/oact/babynames/names.zip";

/// Something that can hand over the raw bytes of a name archive.
pub trait ArchiveSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable location, used in logs and the status bar.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// Remote archive over HTTP
// ---------------------------------------------------------------------------

pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl ArchiveSource for HttpSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        log::info!("Fetching name archive from {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let resp = client.get(&self.url).send()?.error_for_status()?;
        let bytes = resp.bytes()?;
        log::info!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ---------------------------------------------------------------------------
// Local copy of the archive
// ---------------------------------------------------------------------------

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArchiveSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        log::info!("Reading name archive from {}", self.path.display());
        std::fs::read(&self.path).map_err(|e| {
            NamesError::SourceUnavailable(format!("reading {}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
