use std::fmt;

use super::model::{Dataset, Sex};
use crate::error::{NamesError, Result};

/// Year bounds offered when no dataset is loaded yet.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (1880, 2022);

// ---------------------------------------------------------------------------
// Sex selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SexFilter {
    M,
    F,
    #[default]
    Both,
}

impl SexFilter {
    pub const ALL: [SexFilter; 3] = [SexFilter::M, SexFilter::F, SexFilter::Both];

    pub fn matches(self, sex: Sex) -> bool {
        match self {
            SexFilter::M => sex == Sex::M,
            SexFilter::F => sex == Sex::F,
            SexFilter::Both => true,
        }
    }
}

impl fmt::Display for SexFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SexFilter::M => f.write_str("M"),
            SexFilter::F => f.write_str("F"),
            SexFilter::Both => f.write_str("Both"),
        }
    }
}

/// Records of `dataset` matching `sex` whose year lies in
/// `[year_start, year_end]`.
///
/// Records keep their original `pct`, i.e. the share of their full
/// `(year, sex)` group rather than of the filtered subset.
pub fn filter_by_gender_and_year_range(
    dataset: &Dataset,
    sex: SexFilter,
    year_start: i32,
    year_end: i32,
) -> Result<Dataset> {
    if year_start > year_end {
        return Err(NamesError::InvalidRange {
            start: year_start,
            end: year_end,
        });
    }
    let records = dataset
        .iter()
        .filter(|r| sex.matches(r.sex) && (year_start..=year_end).contains(&r.year))
        .cloned()
        .collect();
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Filter state owned by the view layer
// ---------------------------------------------------------------------------

/// Gender and year-range selection, with the defaults each reset returns to.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub selected_sex: SexFilter,
    pub year_range: (i32, i32),
    default_year_range: (i32, i32),
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_sex: SexFilter::default(),
            year_range: DEFAULT_YEAR_RANGE,
            default_year_range: DEFAULT_YEAR_RANGE,
        }
    }
}

impl FilterState {
    /// Defaults for `dataset`: both sexes, its full year span.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let span = dataset.year_span().unwrap_or(DEFAULT_YEAR_RANGE);
        Self {
            selected_sex: SexFilter::default(),
            year_range: span,
            default_year_range: span,
        }
    }

    /// The bounds a year-range widget should offer.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.default_year_range
    }

    pub fn reset_sex(&mut self) {
        self.selected_sex = SexFilter::default();
    }

    pub fn reset_year_range(&mut self) {
        self.year_range = self.default_year_range;
    }

    pub fn reset(&mut self) {
        self.reset_sex();
        self.reset_year_range();
    }

    pub fn is_default(&self) -> bool {
        self.selected_sex == SexFilter::default() && self.year_range == self.default_year_range
    }

    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        let (start, end) = self.year_range;
        filter_by_gender_and_year_range(dataset, self.selected_sex, start, end)
    }
}
