//! This file defines some functions that check the pre-conditions
//! of the combiners. Every check runs before any aggregation.

use crate::{
    Field,
    PredictionRecord,
    VoteError,
    error::Result,
};


/// Check whether the vote has a prediction to combine.
#[inline(always)]
pub(crate) fn non_empty(records: &[PredictionRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(VoteError::EmptyVote);
    }
    Ok(())
}


/// Check whether every record carries every field in `fields`.
#[inline(always)]
pub(crate) fn required_fields(records: &[PredictionRecord], fields: &[Field])
    -> Result<()>
{
    for field in fields.iter().copied() {
        let missing = records.iter().find(|r| !r.has(field));
        if let Some(record) = missing {
            let order = record.order();
            return Err(VoteError::MissingField { field, order });
        }
    }
    Ok(())
}


/// Check whether `field` may weigh the votes of a category.
#[inline(always)]
pub(crate) fn weight_field(field: Field) -> Result<()> {
    match field {
        Field::Confidence | Field::Probability | Field::Weight => Ok(()),
        _ => Err(VoteError::InvalidWeightField { field }),
    }
}


/// Check whether the threshold lies in `[1, n_records]`.
#[inline(always)]
pub(crate) fn threshold(threshold: usize, n_records: usize) -> Result<()> {
    if !(1..=n_records).contains(&threshold) {
        return Err(VoteError::ThresholdOutOfRange { threshold, n_records });
    }
    Ok(())
}


/// Check whether `count` is a positive integer and return it.
#[inline(always)]
pub(crate) fn instance_count(count: f64) -> Result<f64> {
    if count < 1f64 || count.fract() != 0f64 || !count.is_finite() {
        return Err(VoteError::InvalidCount { count });
    }
    Ok(count)
}
