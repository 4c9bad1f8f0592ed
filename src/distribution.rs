//! Distribution utilities:
//! pointwise merging, bin compaction,
//! and the grouped distribution of a vote.
use serde::{Serialize, Deserialize};

use std::collections::HashMap;

use crate::{
    Prediction,
    Vote,
};


/// An ordered sequence of `(value, count)` pairs.
/// Serialized as `[[value, count], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(Vec<(Prediction, f64)>);


/// The unit of a grouped distribution.
/// Once a distribution has been compacted, its buckets are `Bins`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionUnit {
    /// Each bucket counts the instances of a value.
    #[default]
    Counts,
    /// Buckets are merged bins.
    Bins,
}


impl Distribution {
    /// Returns the number of buckets.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if there is no bucket.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns an iterator over the buckets.
    pub fn iter(&self) -> impl Iterator<Item = &(Prediction, f64)> {
        self.0.iter()
    }


    /// Returns the first bucket.
    pub fn first(&self) -> Option<&(Prediction, f64)> {
        self.0.first()
    }


    /// Returns the count of `value`, if present.
    pub fn get(&self, value: &Prediction) -> Option<f64> {
        self.0.iter()
            .find(|(v, _)| v == value)
            .map(|(_, c)| *c)
    }


    /// Returns the sum of counts.
    pub fn total(&self) -> f64 {
        self.0.iter()
            .map(|(_, c)| c)
            .sum::<f64>()
    }


    /// Add `count` to the bucket of `value`,
    /// appending a new bucket when `value` is not present yet.
    pub fn add(&mut self, value: Prediction, count: f64) {
        match self.0.iter_mut().find(|(v, _)| *v == value) {
            Some((_, c)) => { *c += count; },
            None => { self.0.push((value, count)); },
        }
    }


    /// Sort the buckets by value in ascending order.
    pub fn sort(&mut self) {
        self.0.sort_by(|(a, _), (b, _)| a.cmp(b));
    }


    /// Merge the buckets down to at most `limit` bins.
    /// See [`merge_bins`].
    /// Categorical buckets have no mean, so a distribution
    /// that holds a category is left untouched.
    /// Returns `false` in that case.
    pub fn compact(&mut self, limit: usize) -> bool {
        let numeric = self.0.iter()
            .map(|(v, c)| v.as_f64().map(|v| (v, *c)))
            .collect::<Option<Vec<_>>>();

        match numeric {
            Some(bins) => {
                self.0 = merge_bins(&bins[..], limit)
                    .into_iter()
                    .map(|(v, c)| (Prediction::Numeric(v), c))
                    .collect();
                true
            },
            None => false,
        }
    }}


impl From<Vec<(Prediction, f64)>> for Distribution {
    fn from(pairs: Vec<(Prediction, f64)>) -> Self {
        Self(pairs)
    }
}


impl<P: Into<Prediction>> FromIterator<(P, f64)> for Distribution {
    fn from_iter<I>(iter: I) -> Self
        where I: IntoIterator<Item = (P, f64)>
    {
        let pairs = iter.into_iter()
            .map(|(v, c)| (v.into(), c))
            .collect();
        Self(pairs)
    }
}


/// Adds `addition` to `base` pointwise and returns `base`.
/// Values absent from `base` are appended in the order of `addition`.
pub fn merge_distributions(mut base: Distribution, addition: &Distribution)
    -> Distribution
{
    addition.iter()
        .cloned()
        .for_each(|(value, count)| base.add(value, count));
    base
}


/// Merges the bins of a value-ascending regression distribution
/// until it has at most `limit` bins.
///
/// Each step merges the adjacent pair with the smallest gap
/// (the leftmost one on ties) into a bin placed at
/// the count-weighted mean of the two.
/// The total count is preserved.
/// `limit < 1` leaves the distribution as is.
pub fn merge_bins(bins: &[(f64, f64)], limit: usize) -> Vec<(f64, f64)> {
    let mut bins = bins.to_vec();
    if limit < 1 { return bins; }

    while bins.len() > limit && bins.len() > 1 {
        let (ix, _) = (1..bins.len())
            .fold((1, f64::INFINITY), |(best, shortest), i| {
                let gap = bins[i].0 - bins[i - 1].0;
                if gap < shortest { (i, gap) } else { (best, shortest) }
            });

        let (lv, lc) = bins[ix - 1];
        let (rv, rc) = bins.remove(ix);
        let count = lc + rc;
        bins[ix - 1] = ((lv * lc + rv * rc) / count, count);
    }
    bins
}


/// Returns the distribution formed by grouping
/// the first bucket of each record's distribution,
/// compacted to `limit` bins after every record.
///
/// The unit switches to [`DistributionUnit::Bins`]
/// the first time the running distribution exceeds `limit` buckets
/// and gets merged, and never switches back.
/// Categorical distributions are never merged and stay in counts.
/// Records without a distribution are skipped.
pub fn grouped_distribution(vote: &Vote, limit: usize)
    -> (Distribution, DistributionUnit)
{
    let mut unit = DistributionUnit::Counts;
    let mut joined: HashMap<Prediction, f64> = HashMap::new();
    let mut dist = Distribution::default();

    let firsts = vote.records()
        .iter()
        .filter_map(|r| r.distribution.as_ref().and_then(|d| d.first()));

    for (value, count) in firsts {
        *joined.entry(value.clone()).or_insert(0.0) += count;

        dist = joined.iter()
            .map(|(v, c)| (v.clone(), *c))
            .collect::<Distribution>();
        dist.sort();

        let exceeded = dist.len() > limit;
        // `joined` keeps the raw buckets, only the output is compacted.
        if dist.compact(limit) && exceeded {
            unit = DistributionUnit::Bins;
        }
    }
    (dist, unit)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::PredictionRecord;

    #[test]
    fn merge_bins_closest_pair() {
        let bins = vec![(1.0, 1.0), (2.0, 1.0), (2.5, 3.0), (10.0, 2.0)];
        let merged = merge_bins(&bins[..], 3);
        assert_eq!(merged, vec![(1.0, 1.0), (2.375, 4.0), (10.0, 2.0)]);
    }

    #[test]
    fn merge_bins_leftmost_tie() {
        let bins = vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)];
        let merged = merge_bins(&bins[..], 2);
        assert_eq!(merged, vec![(0.5, 2.0), (2.0, 1.0)]);
    }

    #[test]
    fn merge_bins_zero_limit_is_noop() {
        let bins = vec![(0.0, 1.0), (1.0, 1.0)];
        assert_eq!(merge_bins(&bins[..], 0), bins);
    }

    #[test]
    fn merge_distributions_sums_pointwise() {
        let base = Distribution::from_iter([("a", 1.0), ("b", 2.0)]);
        let addition = Distribution::from_iter([("b", 3.0), ("c", 1.0)]);
        let merged = merge_distributions(base, &addition);
        assert_eq!(
            merged,
            Distribution::from_iter([("a", 1.0), ("b", 5.0), ("c", 1.0)])
        );
    }

    #[test]
    fn grouped_distribution_uses_first_bucket() {
        let records = vec![
            PredictionRecord::new(3.0)
                .with_distribution(Distribution::from_iter([(3.0, 2.0), (4.0, 8.0)])),
            PredictionRecord::new(1.0)
                .with_distribution(Distribution::from_iter([(1.0, 5.0)])),
            PredictionRecord::new(3.0)
                .with_distribution(Distribution::from_iter([(3.0, 1.0)])),
        ];
        let vote = Vote::new(records);
        let (dist, unit) = grouped_distribution(&vote, 32);
        assert_eq!(dist, Distribution::from_iter([(1.0, 5.0), (3.0, 3.0)]));
        assert_eq!(unit, DistributionUnit::Counts);
    }

    #[test]
    fn grouped_distribution_switches_to_bins() {
        let records = (0..5)
            .map(|i| {
                let v = i as f64;
                PredictionRecord::new(v)
                    .with_distribution(Distribution::from_iter([(v, 1.0)]))
            })
            .collect::<Vec<_>>();
        let vote = Vote::new(records);
        let (dist, unit) = grouped_distribution(&vote, 3);
        assert_eq!(unit, DistributionUnit::Bins);
        assert_eq!(dist.len(), 3);
        assert_eq!(dist.total(), 5.0);
    }

    #[test]
    fn grouped_distribution_categories_stay_counts() {
        let records = ["a", "b", "c", "d"].into_iter()
            .map(|c| {
                PredictionRecord::new(c)
                    .with_distribution(Distribution::from_iter([(c, 1.0)]))
            })
            .collect::<Vec<_>>();
        let vote = Vote::new(records);
        let (dist, unit) = grouped_distribution(&vote, 2);
        assert_eq!(unit, DistributionUnit::Counts);
        assert_eq!(dist.len(), 4);
    }
}
