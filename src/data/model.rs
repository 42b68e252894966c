use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NamesError, Result};

// ---------------------------------------------------------------------------
// Sex – the two values published by the source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::M, Sex::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::M => "M",
            Sex::F => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::M),
            "F" => Ok(Sex::F),
            other => Err(format!("'{other}' is not a sex (expected M or F)")),
        }
    }
}

// ---------------------------------------------------------------------------
// NameRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// Births for one `(name, sex, year)` combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Given name, case as published.
    pub name: String,
    pub sex: Sex,
    /// Number of births with this name and sex in `year`.
    pub count: u64,
    pub year: i32,
    /// Share of all births of the same `(year, sex)` group, in [0, 1].
    pub pct: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Immutable collection of [`NameRecord`]s. Shared as `Arc<Dataset>` once
/// built; filtering produces new instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<NameRecord>,
}

impl Dataset {
    /// Build a dataset from raw counts, deriving `pct` for every record.
    ///
    /// The share is grouped by `(year, sex)`. A group whose counts sum to
    /// zero has no meaningful share and is reported as
    /// [`NamesError::DivideByZero`].
    pub fn from_counts(mut records: Vec<NameRecord>) -> Result<Self> {
        let mut totals: HashMap<(i32, Sex), u64> = HashMap::new();
        for rec in &records {
            let total = totals.entry((rec.year, rec.sex)).or_insert(0);
            *total = total.checked_add(rec.count).ok_or_else(|| {
                NamesError::MalformedSource(format!(
                    "total births for sex {} in {} overflow",
                    rec.sex, rec.year
                ))
            })?;
        }

        for rec in &mut records {
            let total = totals.get(&(rec.year, rec.sex)).copied().unwrap_or(0);
            if total == 0 {
                return Err(NamesError::DivideByZero {
                    year: rec.year,
                    sex: rec.sex,
                });
            }
            rec.pct = rec.count as f64 / total as f64;
        }

        Ok(Dataset { records })
    }

    /// Wrap records whose `pct` is already final (e.g. a filtered subset).
    pub(crate) fn from_records(records: Vec<NameRecord>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest year present, `None` for an empty dataset.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a NameRecord;
    type IntoIter = std::slice::Iter<'a, NameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) fn record(name: &str, sex: Sex, year: i32, count: u64) -> NameRecord {
    NameRecord {
        name: name.to_string(),
        sex,
        count,
        year,
        pct: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_sum_to_one_per_year_and_sex() {
        let ds = Dataset::from_counts(vec![
            record("Emma", Sex::F, 1990, 100),
            record("Olivia", Sex::F, 1990, 300),
            record("Ava", Sex::F, 1990, 7),
            record("Liam", Sex::M, 1990, 10),
            record("Noah", Sex::M, 1990, 33),
            record("Emma", Sex::F, 1991, 50),
        ])
        .unwrap();

        let mut sums: HashMap<(i32, Sex), f64> = HashMap::new();
        for r in &ds {
            assert!((0.0..=1.0).contains(&r.pct));
            *sums.entry((r.year, r.sex)).or_insert(0.0) += r.pct;
        }
        assert_eq!(sums.len(), 3);
        for total in sums.values() {
            assert!((total - 1.0).abs() < 1e-9, "group sums to {total}");
        }
    }

    #[test]
    fn single_record_groups_get_full_share() {
        let ds = Dataset::from_counts(vec![
            record("Emma", Sex::F, 1990, 100),
            record("Emma", Sex::F, 1991, 50),
            record("Liam", Sex::M, 1990, 10),
        ])
        .unwrap();
        assert!(ds.iter().all(|r| (r.pct - 1.0).abs() < 1e-12));
    }

    #[test]
    fn zero_total_group_is_an_error() {
        let err = Dataset::from_counts(vec![
            record("Emma", Sex::F, 1990, 100),
            record("Liam", Sex::M, 1990, 0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            NamesError::DivideByZero {
                year: 1990,
                sex: Sex::M
            }
        );
    }

    #[test]
    fn overflowing_group_total_is_malformed() {
        let err = Dataset::from_counts(vec![
            record("Emma", Sex::F, 1990, u64::MAX),
            record("Ava", Sex::F, 1990, 1),
        ])
        .unwrap_err();
        assert!(matches!(err, NamesError::MalformedSource(_)), "{err:?}");
    }

    #[test]
    fn year_span_covers_all_records() {
        let ds = Dataset::from_counts(vec![
            record("A", Sex::F, 1901, 1),
            record("B", Sex::M, 1880, 1),
            record("C", Sex::F, 2022, 1),
        ])
        .unwrap();
        assert_eq!(ds.year_span(), Some((1880, 2022)));
        assert_eq!(Dataset::default().year_span(), None);
    }

    #[test]
    fn sex_parses_only_source_tokens() {
        assert_eq!("M".parse::<Sex>(), Ok(Sex::M));
        assert_eq!("F".parse::<Sex>(), Ok(Sex::F));
        assert!("m".parse::<Sex>().is_err());
        assert!("X".parse::<Sex>().is_err());
    }
}
