//! Boosting combiners.
//! A boosted regression sums the weighted gradients of its models;
//! a boosted classification does so per class and applies softmax.
use std::collections::HashMap;

use crate::{
    BoostingOffsets,
    CategoryProbability,
    Combination,
    CombinedPrediction,
    CombineOptions,
    Field,
    Prediction,
    PredictionRecord,
    Vote,
    VoteError,
    common::statistics::{self, round},
    error::Result,
};


impl Vote {
    /// Returns the sum of `prediction * weight` over the records
    /// plus the scalar boosting offset.
    /// Missing weights count as `0`.
    pub fn regression_boosting_combiner(&self, full: bool)
        -> Result<Combination>
    {
        let offset = match &self.boosting_offsets {
            Some(BoostingOffsets::Scalar(offset)) => *offset,
            None => 0f64,
            Some(BoostingOffsets::PerClass(_)) => {
                return Err(VoteError::InvalidBoostingOffsets {
                    expected: "a scalar for a boosted regression",
                });
            },
        };

        let prediction = statistics::weighted_sum(&self.records, Field::Weight)?
            + offset;

        if full {
            Ok(CombinedPrediction::new(prediction).into())
        } else {
            Ok(Combination::Prediction(prediction.into()))
        }
    }


    /// Combines the predictions of a boosted classification.
    ///
    /// Per class, the score is the weighted sum of the gradients
    /// of the models targeting that class plus its boosting offset.
    /// Softmax turns the scores into probabilities.
    /// The most probable class wins, ties going to the class
    /// listed first in `options.categories`
    /// (classes absent from it come last).
    ///
    /// If `full` is `true`, also returns the rounded probability
    /// of the winner and the sorted list of class probabilities.
    pub fn classification_boosting_combiner(
        &self,
        options: &CombineOptions,
        full: bool,
    ) -> Result<Combination>
    {
        let offsets = match &self.boosting_offsets {
            Some(BoostingOffsets::PerClass(offsets)) => Some(offsets),
            None => None,
            Some(BoostingOffsets::Scalar(_)) => {
                return Err(VoteError::InvalidBoostingOffsets {
                    expected: "a class -> offset map for a boosted classification",
                });
            },
        };

        // Classes in order of first appearance.
        let mut classes: Vec<&Prediction> = Vec::new();
        let mut grouped: HashMap<&Prediction, Vec<&PredictionRecord>> = HashMap::new();
        for record in self.records.iter() {
            if let Some(class) = record.class.as_ref() {
                grouped.entry(class)
                    .or_insert_with(|| { classes.push(class); Vec::new() })
                    .push(record);
            }
        }
        if classes.is_empty() {
            return Err(VoteError::MissingField {
                field: Field::Class,
                order: self.records.first().map(|r| r.order()).unwrap_or(0),
            });
        }

        let scores = classes.iter()
            .map(|class| -> Result<f64> {
                let records = grouped.get(class)
                    .into_iter()
                    .flatten()
                    .copied();
                let sum = statistics::weighted_sum(records, Field::Weight)?;
                let offset = offsets
                    .and_then(|o| o.get(*class))
                    .copied()
                    .unwrap_or(0f64);
                Ok(sum + offset)
            })
            .collect::<Result<Vec<f64>>>()?;

        let probabilities = statistics::softmax(&scores[..]);

        let rank = |class: &Prediction| {
            options.categories.iter()
                .position(|c| c == class)
                .unwrap_or(usize::MAX)
        };

        let mut ranked = classes.into_iter()
            .zip(probabilities)
            .map(|(class, p)| (class, p, rank(class)))
            .collect::<Vec<_>>();
        ranked.sort_by(|(_, p1, r1), (_, p2, r2)| {
            p2.total_cmp(p1).then(r1.cmp(r2))
        });

        let (winner, probability, _) = ranked[0];
        let prediction = winner.clone();

        if !full {
            return Ok(Combination::Prediction(prediction));
        }

        let mut output = CombinedPrediction::new(prediction);
        output.probability = Some(round(probability));
        output.probabilities = Some(
            ranked.into_iter()
                .map(|(class, p, _)| CategoryProbability {
                    category: class.clone(),
                    probability: round(p),
                })
                .collect()
        );
        Ok(output.into())
    }
}
