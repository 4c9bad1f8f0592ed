//! Regression combiners: the mean and the error-weighted mean.
use rayon::prelude::*;

use crate::{
    Combination,
    CombinedPrediction,
    CombineOptions,
    Vote,
    common::statistics::round,
    distribution::grouped_distribution,
    error::Result,
};


impl Vote {
    /// Returns the mean of the predictions,
    /// or `f64::INFINITY` for an empty vote.
    ///
    /// If `full` is `true`, also returns
    /// - the mean confidence over the records reporting a positive one,
    /// - the grouped distribution,
    /// - the total count,
    /// - the mean median (when a record reports one),
    /// - the min/max over the records.
    pub fn average(&self, options: &CombineOptions, full: bool)
        -> Result<Combination>
    {
        let predictions = self.numeric_predictions()?;
        let total = predictions.len() as f64;
        let prediction = if total > 0f64 {
            predictions.iter().sum::<f64>() / total
        } else {
            f64::INFINITY
        };

        if !full {
            return Ok(Combination::Prediction(prediction.into()));
        }

        let mut output = CombinedPrediction::new(prediction);

        // Some models report no confidence at all.
        let confidences = self.records.iter()
            .filter_map(|r| r.confidence)
            .filter(|c| *c > 0f64)
            .collect::<Vec<_>>();
        if !confidences.is_empty() {
            let mean = confidences.iter().sum::<f64>()
                / confidences.len() as f64;
            output.confidence = Some(round(mean));
        }

        let weights = vec![1f64; predictions.len()];
        self.attach_node_statistics(&mut output, &weights[..], total, options);
        Ok(output.into())
    }


    /// Returns the mean of the predictions weighted by their error,
    /// where the weights come from [`Vote::normalize_error`].
    /// A zero normalization factor yields `f64::INFINITY`.
    ///
    /// If `full` is `true`, the confidence and the median
    /// are weighted the same way; the other statistics
    /// are the ones of [`Vote::average`].
    pub fn error_weighted(&self, options: &CombineOptions, full: bool)
        -> Result<Combination>
    {
        let predictions = self.numeric_predictions()?;
        let (weights, normalizer) = self.normalize_error(options.top_range);

        if normalizer == 0f64 {
            let prediction = f64::INFINITY;
            if !full {
                return Ok(Combination::Prediction(prediction.into()));
            }
            let mut output = CombinedPrediction::new(prediction);
            output.confidence = Some(0f64);
            return Ok(output.into());
        }

        let prediction = predictions.iter()
            .zip(&weights[..])
            .map(|(p, w)| p * w)
            .sum::<f64>() / normalizer;

        if !full {
            return Ok(Combination::Prediction(prediction.into()));
        }

        let mut output = CombinedPrediction::new(prediction);
        let combined_error = self.records.iter()
            .zip(&weights[..])
            .map(|(r, w)| r.confidence.unwrap_or(0f64) * w)
            .sum::<f64>();
        output.confidence = Some(round(combined_error / normalizer));

        self.attach_node_statistics(&mut output, &weights[..], normalizer, options);
        Ok(output.into())
    }


    /// Rescales the errors (the `confidence` of each record)
    /// to `[0, top_range]` and returns the weights
    /// ```txt
    /// w_i = exp( (min_e - e_i) / (max_e - min_e) * top_range )
    /// ```
    /// with their sum as normalization factor.
    /// Without spread in the errors, every weight is `1`.
    ///
    /// The weights are indexed by record position;
    /// the records are left untouched.
    pub fn normalize_error(&self, top_range: f64) -> (Vec<f64>, f64) {
        let errors = self.records.iter()
            .map(|r| r.confidence.unwrap_or(0f64))
            .collect::<Vec<f64>>();

        let min = errors.iter().copied().fold(f64::INFINITY, f64::min);
        let max = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        if range > 0f64 {
            let weights = errors.into_par_iter()
                .map(|e| ((min - e) / range * top_range).exp())
                .collect::<Vec<f64>>();
            let normalizer = weights.iter().sum::<f64>();
            (weights, normalizer)
        } else {
            let n = errors.len();
            (vec![1f64; n], n as f64)
        }
    }


    fn numeric_predictions(&self) -> Result<Vec<f64>> {
        self.records.iter()
            .map(|r| r.numeric_prediction())
            .collect()
    }


    /// Attach the node statistics shared by the regression combiners:
    /// grouped distribution, count, median, min, and max.
    fn attach_node_statistics(
        &self,
        output: &mut CombinedPrediction,
        weights: &[f64],
        normalizer: f64,
        options: &CombineOptions,
    )
    {
        let (distribution, unit) = grouped_distribution(self, options.bins_limit);
        output.distribution = Some(distribution);
        output.distribution_unit = Some(unit);

        output.count = Some(
            self.records.iter()
                .map(|r| r.count.unwrap_or(0f64))
                .sum::<f64>()
        );

        if self.records.iter().any(|r| r.median.is_some()) {
            let median = self.records.iter()
                .zip(weights)
                .filter_map(|(r, w)| r.median.map(|m| m * w))
                .sum::<f64>();
            output.median = Some(median / normalizer);
        }

        output.min = self.records.iter()
            .filter_map(|r| r.min)
            .reduce(f64::min);
        output.max = self.records.iter()
            .filter_map(|r| r.max)
            .reduce(f64::max);
    }
}
