use crate::db::Measurement;
use crate::key::GroupKey;
use color_eyre::Report;
use std::collections::btree_map::{self, BTreeMap};

/// Throughput samples (in kbps) grouped by key.
///
/// Samples within a group keep the order in which they were pushed; groups are
/// iterated in ascending key order. A key is only present if it has at least
/// one sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Throughputs {
    groups: BTreeMap<GroupKey, Vec<f64>>,
}

impl Throughputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups the throughput of each measurement by its window size.
    pub fn from_measurements<I>(measurements: I) -> Result<Self, Report>
    where
        I: IntoIterator<Item = Measurement>,
    {
        let mut throughputs = Self::new();
        for measurement in measurements {
            let throughput = measurement.throughput()?;
            throughputs.push(measurement.window_key(), throughput);
        }
        Ok(throughputs)
    }

    pub fn push(&mut self, key: impl Into<GroupKey>, throughput: f64) {
        self.groups
            .entry(key.into())
            .or_insert_with(Vec::new)
            .push(throughput);
    }

    pub fn get(&self, key: &GroupKey) -> Option<&Vec<f64>> {
        self.groups.get(key)
    }

    /// Sorted keys.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, GroupKey, Vec<f64>> {
        self.groups.iter()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of samples across all groups.
    pub fn sample_count(&self) -> usize {
        self.groups.values().map(|samples| samples.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Throughputs {
    type Item = (&'a GroupKey, &'a Vec<f64>);
    type IntoIter = btree_map::Iter<'a, GroupKey, Vec<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use std::collections::BTreeSet;

    // (elapsed ms, bytes, window); elapsed is shifted by one so that it's
    // never zero
    type Row = (u16, u32, u8);

    fn measurements(rows: &[Row]) -> Vec<Measurement> {
        rows.iter()
            .map(|&(elapsed_ms, bytes, window)| {
                Measurement::new(
                    elapsed_ms as f64 + 1f64,
                    bytes as f64,
                    window as f64,
                )
            })
            .collect()
    }

    #[test]
    fn group_lazily() {
        let mut throughputs = Throughputs::new();
        assert!(throughputs.is_empty());
        assert_eq!(throughputs.get(&1f64.into()), None);

        throughputs.push(1f64, 8f64);
        throughputs.push(4f64, 16f64);
        throughputs.push(1f64, 2f64);
        assert_eq!(throughputs.len(), 2);
        assert_eq!(throughputs.sample_count(), 3);
        // insertion order is kept within a group
        assert_eq!(throughputs.get(&1f64.into()), Some(&vec![8f64, 2f64]));
        assert_eq!(throughputs.get(&4f64.into()), Some(&vec![16f64]));
        // keys never pushed are absent
        assert_eq!(throughputs.get(&2f64.into()), None);
    }

    #[test]
    fn sorted_keys() {
        let mut throughputs = Throughputs::new();
        for window in [5f64, 1f64, 10f64] {
            throughputs.push(window, 1f64);
        }
        let keys: Vec<_> = throughputs.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["1", "5", "10"]);
    }

    #[test]
    fn zero_elapsed_time_fails() {
        let result = Throughputs::from_measurements(vec![
            Measurement::new(10f64, 10f64, 1f64),
            Measurement::new(0f64, 10f64, 1f64),
        ]);
        assert!(result.is_err());
    }

    #[quickcheck]
    fn keys_are_the_distinct_windows(rows: Vec<Row>) -> bool {
        let throughputs = Throughputs::from_measurements(measurements(&rows))
            .expect("rows have non-zero elapsed time");

        let expected: BTreeSet<GroupKey> = rows
            .iter()
            .map(|&(_, _, window)| GroupKey::from(window as f64))
            .collect();
        let keys: BTreeSet<GroupKey> = throughputs.keys().cloned().collect();
        keys == expected && throughputs.sample_count() == rows.len()
    }

    #[quickcheck]
    fn grouping_ignores_row_order(rows: Vec<Row>) -> bool {
        let mut reversed = rows.clone();
        reversed.reverse();

        let sorted_groups = |rows: &[Row]| {
            let throughputs =
                Throughputs::from_measurements(measurements(rows))
                    .expect("rows have non-zero elapsed time");
            throughputs
                .iter()
                .map(|(key, samples)| {
                    let mut samples = samples.clone();
                    samples.sort_by(f64::total_cmp);
                    (key.clone(), samples)
                })
                .collect::<Vec<_>>()
        };
        sorted_groups(&rows) == sorted_groups(&reversed)
    }
}
