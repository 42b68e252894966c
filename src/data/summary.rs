use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::model::{Dataset, NameRecord};

/// Total births for one name across both sexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTotal {
    pub name: String,
    pub count: u64,
}

/// Every record of `name` (case-insensitive), ordered by sex then year.
pub fn name_trend(dataset: &Dataset, name: &str) -> Vec<NameRecord> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut rows: Vec<NameRecord> = dataset
        .iter()
        .filter(|r| r.name.to_lowercase() == needle)
        .cloned()
        .collect();
    rows.sort_by_key(|r| (r.sex, r.year));
    rows
}

/// The `n` names with the most births, largest first. Ties are broken
/// alphabetically so the ranking is stable.
pub fn most_common_names(dataset: &Dataset, n: usize) -> Vec<NameTotal> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for rec in dataset {
        *totals.entry(rec.name.as_str()).or_insert(0) += rec.count;
    }

    let mut ranked: Vec<NameTotal> = totals
        .into_iter()
        .map(|(name, count)| NameTotal {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(n);
    ranked
}

/// Up to `n` records drawn without replacement.
pub fn sample_records<R: Rng + ?Sized>(records: &[NameRecord], n: usize, rng: &mut R) -> Vec<NameRecord> {
    records.choose_multiple(rng, n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::model::{record, Sex};

    fn sample() -> Dataset {
        Dataset::from_counts(vec![
            record("Emma", Sex::F, 1991, 50),
            record("Emma", Sex::F, 1990, 100),
            record("Emma", Sex::M, 1990, 5),
            record("Liam", Sex::M, 1990, 10),
            record("Noah", Sex::M, 1991, 155),
            record("Ava", Sex::F, 1991, 155),
        ])
        .unwrap()
    }

    #[test]
    fn trend_lookup_ignores_case_and_orders_rows() {
        let rows = name_trend(&sample(), "  eMMa ");
        let keys: Vec<(Sex, i32)> = rows.iter().map(|r| (r.sex, r.year)).collect();
        assert_eq!(keys, [(Sex::M, 1990), (Sex::F, 1990), (Sex::F, 1991)]);
        assert!(name_trend(&sample(), "").is_empty());
        assert!(name_trend(&sample(), "Zed").is_empty());
    }

    #[test]
    fn top_names_sum_both_sexes_and_break_ties_by_name() {
        let top = most_common_names(&sample(), 3);
        let got: Vec<(&str, u64)> = top.iter().map(|t| (t.name.as_str(), t.count)).collect();
        assert_eq!(got, [("Ava", 155), ("Emma", 155), ("Noah", 155)]);

        let all = most_common_names(&sample(), 10);
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].name, "Liam");
    }

    #[test]
    fn sample_is_bounded_and_without_replacement() {
        let ds = sample();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = sample_records(ds.records(), 4, &mut rng);
        assert_eq!(picked.len(), 4);
        let distinct: HashSet<(String, Sex, i32)> =
            picked.iter().map(|r| (r.name.clone(), r.sex, r.year)).collect();
        assert_eq!(distinct.len(), 4);

        assert_eq!(sample_records(ds.records(), 50, &mut rng).len(), ds.len());
        assert!(sample_records(&[], 10, &mut rng).is_empty());
    }
}
