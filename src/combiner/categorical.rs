//! Classification combiners:
//! plurality, confidence weighted, probability weighted, and threshold.
use std::collections::BTreeMap;

use crate::{
    Combination,
    CombinedPrediction,
    CombineOptions,
    Distribution,
    Field,
    Prediction,
    PredictionRecord,
    Vote,
    VoteError,
    common::{
        checker,
        statistics::{self, round},
    },
    distribution::grouped_distribution,
    error::Result,
};


impl Vote {
    /// Returns the category with the largest sum of votes.
    ///
    /// `weight_field` sets the vote of each record:
    /// - `None`: one vote per record (plurality),
    /// - `Some(Field::Confidence)`: confidence weighted,
    /// - `Some(Field::Probability)`: probability weighted.
    ///
    /// Ties go to the category seen first (lowest order),
    /// then to the lowest label.
    ///
    /// If `full` is `true`, also returns the combined confidence,
    /// the probability of the winner, the grouped distribution,
    /// and the total count.
    pub fn combine_categorical(
        &self,
        weight_field: Option<Field>,
        options: &CombineOptions,
        full: bool,
    ) -> Result<Combination>
    {
        if let Some(field) = weight_field {
            checker::weight_field(field)?;
            checker::required_fields(&self.records, &[field])?;
        }
        checker::non_empty(&self.records)?;

        // category -> (sum of votes, first order)
        let mut mode: BTreeMap<&Prediction, (f64, usize)> = BTreeMap::new();
        for record in self.records.iter() {
            let weight = weight_field
                .and_then(|field| record.value_of(field))
                .unwrap_or(1f64);
            mode.entry(&record.prediction)
                .and_modify(|(votes, _)| { *votes += weight; })
                .or_insert((weight, record.order()));
        }

        // `mode` iterates labels in ascending order,
        // so a strict improvement keeps the lowest label on full ties.
        let mut winner: Option<(&Prediction, f64, usize)> = None;
        for (category, (votes, order)) in mode {
            let better = match winner {
                None => true,
                Some((_, best_votes, best_order)) => {
                    votes > best_votes
                        || (votes == best_votes && order < best_order)
                },
            };
            if better {
                winner = Some((category, votes, order));
            }
        }
        let prediction = winner.map(|(c, _, _)| c.clone())
            .ok_or(VoteError::EmptyVote)?;

        if !full {
            return Ok(Combination::Prediction(prediction));
        }

        let first = &self.records[0];
        let mut output = CombinedPrediction::new(prediction.clone());

        if first.confidence.is_some() {
            let confidence = self.weighted_confidence(&prediction, weight_field)?;
            output.confidence = Some(round(confidence));
        } else if first.probability.is_some() {
            let (distribution, total) = self.combine_distribution(Field::Probability)?;
            let confidence = statistics::ws_confidence(
                &prediction, &distribution, options.ws_z, Some(total),
            )?;
            output.confidence = Some(confidence);
        }

        if first.probability.is_some() {
            output.probability = self.records.iter()
                .filter(|r| r.prediction == prediction)
                .filter_map(|r| r.probability)
                .last();
        }

        if first.distribution.is_some() {
            let (distribution, unit) = grouped_distribution(self, options.bins_limit);
            output.distribution = Some(distribution);
            output.distribution_unit = Some(unit);
        }

        output.count = Some(
            self.records.iter()
                .map(|r| r.count.unwrap_or(0f64))
                .sum::<f64>()
        );
        Ok(output.into())
    }


    /// Returns the mean confidence of the records that predict `category`,
    /// weighted by `weight_field` (`1` per record if `None`).
    /// A zero total weight yields `f64::INFINITY`.
    ///
    /// Fails if a matching record lacks `confidence` or `weight_field`.
    pub fn weighted_confidence(
        &self,
        category: &Prediction,
        weight_field: Option<Field>,
    ) -> Result<f64>
    {
        let matches = self.records.iter()
            .filter(|r| r.prediction == *category)
            .cloned()
            .collect::<Vec<PredictionRecord>>();

        let mut required = vec![Field::Confidence];
        required.extend(weight_field);
        checker::required_fields(&matches[..], &required[..])?;

        let (confidence, total) = matches.iter()
            .fold((0f64, 0f64), |(confidence, total), r| {
                let w = weight_field
                    .and_then(|field| r.value_of(field))
                    .unwrap_or(1f64);
                let c = r.confidence.unwrap_or(0f64);
                (confidence + w * c, total + w)
            });

        if total > 0f64 {
            Ok(confidence / total)
        } else {
            Ok(f64::INFINITY)
        }
    }


    /// Builds the distribution of the predicted categories,
    /// each weighted by the sum of its `weight_field` values,
    /// together with the total count of instances.
    /// The distribution is empty when the total is `0`.
    pub fn combine_distribution(&self, weight_field: Field)
        -> Result<(Distribution, f64)>
    {
        checker::required_fields(&self.records, &[weight_field])?;

        let mut distribution = Distribution::default();
        let mut total = 0f64;
        for record in self.records.iter() {
            let weight = record.value_of(weight_field).unwrap_or(0f64);
            distribution.add(record.prediction.clone(), weight);
            total += record.count.unwrap_or(0f64);
        }

        if total <= 0f64 {
            distribution = Distribution::default();
        }
        Ok((distribution, total))
    }


    /// Expands each record into one record per bucket
    /// of its node distribution, with
    /// ```txt
    /// probability = instances / count
    /// ```
    /// The source order is kept, so the expansion of a record
    /// shares its tie-break rank.
    ///
    /// Fails if a record lacks its distribution
    /// or its count is not a positive integer.
    pub fn probability_weight(&self) -> Result<Vec<PredictionRecord>> {
        checker::required_fields(
            &self.records,
            &[Field::Distribution, Field::Count],
        )?;

        let mut records = Vec::new();
        for record in self.records.iter() {
            let total = checker::instance_count(record.count.unwrap_or(0f64))?;
            let order = record.order();

            let distribution = record.distribution.iter()
                .flat_map(|d| d.iter());
            for (category, instances) in distribution {
                let expanded = PredictionRecord::new(category.clone())
                    .with_probability(round(instances / total))
                    .with_count(*instances)
                    .with_order(order);
                records.push(expanded);
            }
        }
        Ok(records)
    }


    /// Singles out the votes for `options.category`.
    /// Returns a vote holding only those records when there are at least
    /// `options.threshold` of them, or a vote holding the rest otherwise.
    ///
    /// Fails if the options lack `threshold` or `category`,
    /// or if `threshold` lies outside `[1, n_records]`.
    pub fn single_out_category(&self, options: &CombineOptions) -> Result<Vote> {
        let (threshold, category) = match (options.threshold, &options.category) {
            (Some(t), Some(c)) => (t, c),
            _ => return Err(VoteError::MissingThresholdOptions),
        };
        checker::threshold(threshold, self.len())?;

        let (matches, rest): (Vec<_>, Vec<_>) = self.records.iter()
            .cloned()
            .partition(|r| r.prediction == *category);

        if matches.len() >= threshold {
            Ok(Vote::new(matches))
        } else {
            Ok(Vote::new(rest))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn iris() -> Vote {
        Vote::new(vec![
            PredictionRecord::new("setosa").with_confidence(0.9),
            PredictionRecord::new("setosa").with_confidence(0.8),
            PredictionRecord::new("versicolor").with_confidence(0.95),
        ])
    }

    #[test]
    fn plurality_tie_goes_to_first_seen() {
        let vote = Vote::new(vec![
            PredictionRecord::new("B").with_order(1).with_weight(1.0),
            PredictionRecord::new("A").with_order(0).with_weight(1.0),
        ]);
        let combined = vote.combine_categorical(None, &CombineOptions::default(), false)
            .unwrap();
        assert_eq!(combined.prediction(), &Prediction::from("A"));
    }

    #[test]
    fn full_tie_goes_to_lowest_label() {
        let vote = Vote::new(vec![
            PredictionRecord::new("b").with_order(0),
            PredictionRecord::new("a").with_order(0),
        ]);
        let combined = vote.combine_categorical(None, &CombineOptions::default(), false)
            .unwrap();
        assert_eq!(combined.prediction(), &Prediction::from("a"));
    }

    #[test]
    fn confidence_weighted_full() {
        let combined = iris()
            .combine_categorical(Some(Field::Confidence), &CombineOptions::default(), true)
            .unwrap();
        let full = combined.full().unwrap();
        assert_eq!(full.prediction, Prediction::from("setosa"));
        // (0.9 * 0.9 + 0.8 * 0.8) / 1.7
        assert_eq!(full.confidence, Some(0.85294));
        assert_eq!(full.count, Some(0.0));
        assert!(full.distribution.is_none());
    }

    #[test]
    fn invalid_weight_field() {
        let err = iris()
            .combine_categorical(Some(Field::Median), &CombineOptions::default(), false);
        assert!(matches!(err, Err(VoteError::InvalidWeightField { .. })));
    }

    #[test]
    fn weighted_confidence_plain_mean() {
        let c = iris().weighted_confidence(&"setosa".into(), None).unwrap();
        assert!((c - 0.85).abs() < 1e-12);
    }

    #[test]
    fn weighted_confidence_zero_weight_is_infinite() {
        let vote = Vote::new(vec![
            PredictionRecord::new("a").with_confidence(0.5).with_probability(0.0),
        ]);
        let c = vote.weighted_confidence(&"a".into(), Some(Field::Probability))
            .unwrap();
        assert_eq!(c, f64::INFINITY);
    }

    #[test]
    fn weighted_confidence_missing_confidence() {
        let vote = Vote::new(vec![
            PredictionRecord::new("a").with_confidence(0.5),
            PredictionRecord::new("a"),
        ]);
        let c = vote.weighted_confidence(&"a".into(), None);
        assert!(matches!(c, Err(VoteError::MissingField { .. })));
    }

    #[test]
    fn combine_distribution_sums_probabilities() {
        let vote = Vote::new(vec![
            PredictionRecord::new("a").with_probability(0.5).with_count(2.0),
            PredictionRecord::new("b").with_probability(0.25).with_count(1.0),
            PredictionRecord::new("a").with_probability(0.25).with_count(1.0),
        ]);
        let (dist, total) = vote.combine_distribution(Field::Probability).unwrap();
        assert_eq!(dist, Distribution::from_iter([("a", 0.75), ("b", 0.25)]));
        assert_eq!(total, 4.0);
    }

    #[test]
    fn probability_weight_expands_distribution() {
        let vote = Vote::new(vec![
            PredictionRecord::new("a")
                .with_distribution(Distribution::from_iter([("a", 2.0), ("b", 1.0)]))
                .with_count(3.0),
            PredictionRecord::new("b")
                .with_distribution(Distribution::from_iter([("b", 4.0)]))
                .with_count(4.0),
        ]);
        let records = vote.probability_weight().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].probability, Some(0.66667));
        assert_eq!(records[1].probability, Some(0.33333));
        assert_eq!(records[1].order, Some(0));
        assert_eq!(records[2].probability, Some(1.0));
        assert_eq!(records[2].order, Some(1));
    }

    #[test]
    fn probability_weight_rejects_fractional_count() {
        let vote = Vote::new(vec![
            PredictionRecord::new("a")
                .with_distribution(Distribution::from_iter([("a", 2.0)]))
                .with_count(2.5),
        ]);
        assert!(matches!(
            vote.probability_weight(),
            Err(VoteError::InvalidCount { .. })
        ));
    }

    #[test]
    fn single_out_category_threshold_too_large() {
        let options = CombineOptions::default().threshold(4).category("setosa");
        assert!(matches!(
            iris().single_out_category(&options),
            Err(VoteError::ThresholdOutOfRange { threshold: 4, n_records: 3 })
        ));
    }

    #[test]
    fn single_out_category_single_match() {
        let options = CombineOptions::default().threshold(1).category("versicolor");
        let vote = iris().single_out_category(&options).unwrap();
        assert_eq!(vote.len(), 1);
        assert_eq!(vote.records()[0].prediction, Prediction::from("versicolor"));
        assert_eq!(vote.records()[0].order, Some(2));
    }

    #[test]
    fn single_out_category_falls_back_to_rest() {
        let options = CombineOptions::default().threshold(2).category("versicolor");
        let vote = iris().single_out_category(&options).unwrap();
        assert_eq!(vote.len(), 2);
        assert!(vote.records().iter().all(|r| r.prediction == Prediction::from("setosa")));
    }

    #[test]
    fn single_out_category_missing_options() {
        let options = CombineOptions::default().threshold(1);
        assert!(matches!(
            iris().single_out_category(&options),
            Err(VoteError::MissingThresholdOptions)
        ));
    }
}
