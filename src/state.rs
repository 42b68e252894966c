use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::data::cache;
use crate::data::filter::{FilterState, SexFilter};
use crate::data::model::{Dataset, NameRecord};
use crate::data::summary::{NameTotal, most_common_names, name_trend, sample_records};
use crate::error::{NamesError, Result};

pub const DEFAULT_NAME_QUERY: &str = "Emma";
pub const TOP_NAMES: usize = 10;
pub const WONDER_SAMPLE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Trends,
    Summary,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the first load finishes).
    pub dataset: Option<Arc<Dataset>>,

    /// One-hit wonders of the full dataset (memoized per dataset).
    pub one_hit_wonders: Arc<Vec<NameRecord>>,

    /// Random selection of one-hit wonders shown in the summary tab.
    pub wonder_sample: Vec<NameRecord>,

    /// Gender and year-range selection.
    pub filters: FilterState,

    /// Dataset restricted to the current filters (cached).
    pub view: Dataset,

    /// Free-text name lookup.
    pub name_query: String,

    /// Records of `name_query` within `view`.
    pub name_trend: Vec<NameRecord>,

    /// Most common names within `view`.
    pub top_names: Vec<NameTotal>,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is running in the background.
    pub loading: bool,

    pending: Option<Receiver<Result<Arc<Dataset>>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            one_hit_wonders: Arc::new(Vec::new()),
            wonder_sample: Vec::new(),
            filters: FilterState::default(),
            view: Dataset::default(),
            name_query: DEFAULT_NAME_QUERY.to_string(),
            name_trend: Vec::new(),
            top_names: Vec::new(),
            active_tab: Tab::default(),
            status_message: None,
            loading: false,
            pending: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset filters and derived views.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.filters = FilterState::for_dataset(&dataset);
        self.one_hit_wonders = cache::one_hit_wonders(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.resample_wonders();
        self.refilter();
    }

    /// Recompute `view` and everything derived from it after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match self.filters.apply(ds) {
            Ok(view) => {
                if self.status_message.as_deref().is_some_and(|m| m.starts_with("Error")) {
                    self.status_message = None;
                }
                self.view = view;
                self.top_names = most_common_names(&self.view, TOP_NAMES);
                self.refresh_name_trend();
            }
            Err(e) => {
                log::warn!("Filter rejected: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn refresh_name_trend(&mut self) {
        self.name_trend = name_trend(&self.view, &self.name_query);
    }

    pub fn set_sex(&mut self, sex: SexFilter) {
        if self.filters.selected_sex != sex {
            self.filters.selected_sex = sex;
            self.refilter();
        }
    }

    /// Set the year range; a start after the end is surfaced as an error and
    /// leaves the previous range and view in place.
    pub fn set_year_range(&mut self, start: i32, end: i32) {
        if start > end {
            let e = NamesError::InvalidRange { start, end };
            log::warn!("Filter rejected: {e}");
            self.status_message = Some(format!("Error: {e}"));
            return;
        }
        if self.filters.year_range != (start, end) {
            self.filters.year_range = (start, end);
            self.refilter();
        }
    }

    pub fn reset_sex(&mut self) {
        self.filters.reset_sex();
        self.refilter();
    }

    pub fn reset_year_range(&mut self) {
        self.filters.reset_year_range();
        self.refilter();
    }

    pub fn resample_wonders(&mut self) {
        self.wonder_sample = sample_records(
            &self.one_hit_wonders,
            WONDER_SAMPLE_SIZE,
            &mut rand::thread_rng(),
        );
    }

    // -- background loading --

    /// Run `job` on a worker thread; its result is picked up by
    /// [`poll_load`](Self::poll_load).
    pub fn start_load<F>(&mut self, job: F)
    where
        F: FnOnce() -> Result<Arc<Dataset>> + Send + 'static,
    {
        if self.loading {
            log::debug!("Load already in progress, ignoring request");
            return;
        }
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver is gone only if the app shut down.
            let _ = tx.send(job());
        });
        self.pending = Some(rx);
        self.loading = true;
        self.status_message = Some("Loading name data…".to_string());
    }

    /// Apply a finished background load. Returns `true` when state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.loading = false;
                self.status_message = Some("Error: loader thread stopped unexpectedly".to_string());
                return true;
            }
        };
        self.pending = None;
        match outcome {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load name data: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::data::model::{Sex, record};

    fn dataset() -> Arc<Dataset> {
        Arc::new(
            Dataset::from_counts(vec![
                record("Emma", Sex::F, 1990, 100),
                record("Emma", Sex::F, 1991, 50),
                record("Liam", Sex::M, 1990, 10),
                record("Noah", Sex::M, 1991, 70),
            ])
            .unwrap(),
        )
    }

    fn wait_for_load(state: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !state.poll_load() {
            assert!(Instant::now() < deadline, "load did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn new_dataset_resets_filters_and_views() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.filters.year_range, (1990, 1991));
        assert_eq!(state.view.len(), 4);
        assert_eq!(state.name_trend.len(), 2);
        assert_eq!(state.top_names[0].name, "Emma");
        assert_eq!(state.one_hit_wonders.len(), 2);
        assert_eq!(state.wonder_sample.len(), 2);
    }

    #[test]
    fn filter_changes_recompute_derived_views() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_sex(SexFilter::M);
        assert!(state.view.iter().all(|r| r.sex == Sex::M));
        assert!(state.name_trend.is_empty());
        assert_eq!(state.top_names[0].name, "Noah");

        state.set_year_range(1990, 1990);
        assert_eq!(state.view.len(), 1);

        state.reset_sex();
        state.reset_year_range();
        assert!(state.filters.is_default());
        assert_eq!(state.view.len(), 4);
    }

    #[test]
    fn inverted_range_keeps_previous_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_year_range(1991, 1990);

        assert_eq!(state.view.len(), 4);
        assert_eq!(state.filters.year_range, (1990, 1991));
        assert!(state.status_message.as_deref().unwrap().contains("Invalid year range"));
    }

    #[test]
    fn valid_range_after_rejection_clears_the_error() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_year_range(1991, 1990);
        state.set_year_range(1990, 1990);

        assert_eq!(state.filters.year_range, (1990, 1990));
        assert_eq!(state.view.len(), 2);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn background_load_success_sets_dataset() {
        let mut state = AppState::default();
        state.start_load(|| Ok(dataset()));
        assert!(state.loading);
        wait_for_load(&mut state);

        assert!(!state.loading);
        assert!(state.status_message.is_none());
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(4));
    }

    #[test]
    fn background_load_failure_is_reported() {
        let mut state = AppState::default();
        state.start_load(|| Err(NamesError::SourceUnavailable("HTTP 404".to_string())));
        wait_for_load(&mut state);

        assert!(!state.loading);
        assert!(state.dataset.is_none());
        assert!(state.status_message.unwrap().contains("HTTP 404"));
    }
}
