use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};
use std::time::Duration;

use super::loader::load_from;
use super::model::{Dataset, NameRecord};
use super::source::{ArchiveSource, HttpSource, SSA_NAMES_URL};
use super::wonders::extract_one_hit_wonders;
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Dataset cache – single slot, single-flight
// ---------------------------------------------------------------------------

/// Memoizes the loaded [`Dataset`].
///
/// The slot's lock is held for the whole fetch-and-parse, so concurrent
/// callers block until the first load finishes and then share its result.
/// A failed load leaves the slot empty.
pub struct DatasetCache {
    source: Box<dyn ArchiveSource>,
    slot: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new(source: Box<dyn ArchiveSource>) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached dataset, loading it on first use.
    pub fn get(&self) -> Result<Arc<Dataset>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dataset) = slot.as_ref() {
            log::debug!("Dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let dataset = match load_from(self.source.as_ref()) {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.source.describe());
                return Err(e);
            }
        };
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset; the next [`get`](Self::get) refetches.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            log::info!("Dataset cache cleared");
        }
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }
}

// ---------------------------------------------------------------------------
// One-hit-wonder memo – keyed by dataset instance
// ---------------------------------------------------------------------------

/// Memoizes [`extract_one_hit_wonders`] for the most recent dataset.
///
/// Holds only a weak handle on the dataset, which keeps its allocation
/// (and therefore its address) reserved while the entry is alive.
#[derive(Default)]
pub struct OneHitWonderCache {
    slot: Mutex<Option<(Weak<Dataset>, Arc<Vec<NameRecord>>)>>,
}

impl OneHitWonderCache {
    pub fn get(&self, dataset: &Arc<Dataset>) -> Arc<Vec<NameRecord>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((key, wonders)) = slot.as_ref() {
            if Weak::ptr_eq(key, &Arc::downgrade(dataset)) {
                return Arc::clone(wonders);
            }
        }

        let wonders = Arc::new(extract_one_hit_wonders(dataset));
        log::info!(
            "{} one-hit wonders among {} records",
            wonders.len(),
            dataset.len()
        );
        *slot = Some((Arc::downgrade(dataset), Arc::clone(&wonders)));
        wonders
    }
}

// ---------------------------------------------------------------------------
// Process-wide instances
// ---------------------------------------------------------------------------

static DATASET_CACHE: OnceLock<DatasetCache> = OnceLock::new();
static WONDER_CACHE: OnceLock<OneHitWonderCache> = OnceLock::new();

/// Install the process-wide dataset cache. Returns `false` if one was
/// already installed (the existing cache is kept).
pub fn install(cache: DatasetCache) -> bool {
    DATASET_CACHE.set(cache).is_ok()
}

/// The process-wide dataset cache, defaulting to the SSA archive.
pub fn global() -> &'static DatasetCache {
    DATASET_CACHE.get_or_init(|| {
        DatasetCache::new(Box::new(HttpSource::new(
            SSA_NAMES_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )))
    })
}

/// Load (or reuse) the process-wide dataset.
pub fn load() -> Result<Arc<Dataset>> {
    global().get()
}

/// One-hit wonders of `dataset`, memoized process-wide.
pub fn one_hit_wonders(dataset: &Arc<Dataset>) -> Arc<Vec<NameRecord>> {
    WONDER_CACHE.get_or_init(OneHitWonderCache::default).get(dataset)
}
