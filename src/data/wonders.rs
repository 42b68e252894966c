use std::collections::HashMap;

use super::model::{Dataset, NameRecord, Sex};

/// Years seen so far for one `(name, sex)` pair.
#[derive(Clone, Copy, PartialEq)]
enum YearSpread {
    Single(i32),
    Many,
}

/// Records of every `(name, sex)` pair that appears in exactly one distinct
/// year, in dataset order.
pub fn extract_one_hit_wonders(dataset: &Dataset) -> Vec<NameRecord> {
    let mut spread: HashMap<(&str, Sex), YearSpread> = HashMap::new();
    for rec in dataset {
        spread
            .entry((rec.name.as_str(), rec.sex))
            .and_modify(|s| {
                if *s != YearSpread::Single(rec.year) {
                    *s = YearSpread::Many;
                }
            })
            .or_insert(YearSpread::Single(rec.year));
    }

    dataset
        .iter()
        .filter(|rec| matches!(spread.get(&(rec.name.as_str(), rec.sex)), Some(YearSpread::Single(_))))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::record;

    fn sample() -> Dataset {
        Dataset::from_counts(vec![
            record("Emma", Sex::F, 1990, 100),
            record("Emma", Sex::F, 1991, 50),
            record("Liam", Sex::M, 1990, 10),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_only_single_year_pairs() {
        let wonders = extract_one_hit_wonders(&sample());
        assert_eq!(wonders.len(), 1);
        let liam = &wonders[0];
        assert_eq!((liam.name.as_str(), liam.sex, liam.year, liam.count), ("Liam", Sex::M, 1990, 10));
        assert!(wonders.iter().all(|r| r.name != "Emma"));
    }

    #[test]
    fn sex_is_part_of_the_key() {
        let ds = Dataset::from_counts(vec![
            record("Jordan", Sex::M, 1990, 10),
            record("Jordan", Sex::F, 1991, 4),
            record("Jordan", Sex::F, 1992, 6),
        ])
        .unwrap();
        let wonders = extract_one_hit_wonders(&ds);
        assert_eq!(wonders.len(), 1);
        assert_eq!(wonders[0].sex, Sex::M);
    }

    #[test]
    fn every_output_pair_has_exactly_one_year() {
        let ds = Dataset::from_counts(vec![
            record("Ada", Sex::F, 1900, 3),
            record("Ada", Sex::F, 1950, 9),
            record("Ada", Sex::F, 1990, 2),
            record("Bo", Sex::M, 1950, 5),
            record("Cy", Sex::M, 1950, 5),
            record("Cy", Sex::M, 1951, 5),
            record("Di", Sex::F, 2001, 7),
        ])
        .unwrap();
        let wonders = extract_one_hit_wonders(&ds);

        let pairs: BTreeSet<(&str, Sex)> = wonders.iter().map(|r| (r.name.as_str(), r.sex)).collect();
        assert_eq!(pairs, BTreeSet::from([("Bo", Sex::M), ("Di", Sex::F)]));
        for (name, sex) in pairs {
            let years: BTreeSet<i32> = ds
                .iter()
                .filter(|r| r.name == name && r.sex == sex)
                .map(|r| r.year)
                .collect();
            assert_eq!(years.len(), 1);
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let ds = sample();
        assert_eq!(extract_one_hit_wonders(&ds), extract_one_hit_wonders(&ds));
    }

    #[test]
    fn empty_dataset_yields_nothing() {
        assert!(extract_one_hit_wonders(&Dataset::default()).is_empty());
    }
}
