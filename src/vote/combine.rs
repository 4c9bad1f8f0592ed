use tracing::debug;

use crate::{
    Combination,
    CombinationMethod,
    CombineOptions,
    Field,
    Vote,
    common::checker,
    error::Result,
};


impl Vote {
    /// Reduces the predictions by voting for classifications
    /// and by averaging for regressions.
    ///
    /// - `method` selects the combiner, see [`CombinationMethod`].
    /// - `options` carries the threshold settings,
    ///   the category order of boosted classifications,
    ///   and the numeric parameters of the combiners.
    /// - `full` asks for the combined statistics
    ///   (confidence, distribution, count, ...) along with the prediction.
    ///
    /// Fails, before any aggregation, on an empty vote
    /// or when a record lacks a field required by `method`.
    pub fn combine(
        &self,
        method: CombinationMethod,
        options: &CombineOptions,
        full: bool,
    ) -> Result<Combination>
    {
        checker::non_empty(&self.records)?;
        checker::required_fields(&self.records, method.required_fields())?;

        let task = self.task();
        debug!(
            %method,
            ?task,
            boosting = self.is_boosting(),
            n_records = self.len(),
            "combining predictions"
        );

        if self.is_boosting() {
            // Missing weights count as `0` in the weighted sums.
            return if self.is_regression() {
                self.regression_boosting_combiner(full)
            } else {
                self.classification_boosting_combiner(options, full)
            };
        }

        if self.is_regression() {
            // Missing confidences count as `0` in the numeric combiners.
            return match method {
                CombinationMethod::ConfidenceWeighted => {
                    self.error_weighted(options, full)
                },
                _ => self.average(options, full),
            };
        }

        match method {
            CombinationMethod::Threshold => {
                self.single_out_category(options)?
                    .combine_categorical(None, options, full)
            },
            CombinationMethod::ProbabilityWeighted => {
                Vote::new(self.probability_weight()?)
                    .combine_categorical(Some(Field::Probability), options, full)
            },
            _ => {
                self.combine_categorical(method.weight_field(), options, full)
            },
        }
    }
}
