//! This file provides the statistics used by the combiners:
//! weighted sums, softmax, and the Wilson score.
use rayon::prelude::*;

use crate::{
    Distribution,
    Field,
    Prediction,
    PredictionRecord,
    VoteError,
    error::Result,
};
use super::constants::PRECISION;


/// Round `x` to `PRECISION` decimals.
/// Non-finite values are returned as is.
#[inline(always)]
pub fn round(x: f64) -> f64 {
    round_to(x, PRECISION)
}


/// Round `x` to `decimals` decimals.
#[inline(always)]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    if !x.is_finite() { return x; }
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}


/// Returns the sum of `prediction * weight` over `records`,
/// where `weight` is the value of `field` (`0` when absent).
/// ```txt
/// sum_i ( p_i * w_i )
/// ```
/// Fails if a prediction is not numeric.
pub fn weighted_sum<'a, I>(records: I, field: Field) -> Result<f64>
    where I: IntoIterator<Item = &'a PredictionRecord>,
{
    records.into_iter()
        .try_fold(0f64, |acc, r| {
            let p = r.numeric_prediction()?;
            let w = r.value_of(field).unwrap_or(0f64);
            Ok(acc + p * w)
        })
}


/// Returns the softmax of `scores`:
/// ```txt
/// exp(s_i) / sum_j exp(s_j)
/// ```
/// If the total is exactly `0`, every entry is `f64::NAN`.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let exps = scores.par_iter()
        .map(|s| s.exp())
        .collect::<Vec<f64>>();
    let total = exps.iter().sum::<f64>();

    if total == 0f64 {
        return vec![f64::NAN; scores.len()];
    }

    exps.into_par_iter()
        .map(|e| e / total)
        .collect()
}


/// Wilson score interval lower bound of the proportion of `prediction`
/// in `distribution`, used as the confidence of a combined prediction.
///
/// - `z` is the percentile of the standard normal distribution
///   (`1.96` for 95%).
/// - `n` is the total number of instances.
///   If `None`, the sum of the weights in `distribution` is used.
///
/// A value absent from `distribution` has weight `0`.
/// Fails on a negative weight or when the total is below `1`.
pub fn ws_confidence(
    prediction: &Prediction,
    distribution: &Distribution,
    z: f64,
    n: Option<f64>,
) -> Result<f64>
{
    if let Some((_, weight)) = distribution.iter().find(|(_, w)| *w < 0f64) {
        return Err(VoteError::NegativeWeight { weight: *weight });
    }

    let mut p = distribution.get(prediction).unwrap_or(0f64);

    let norm = distribution.total();
    if norm != 1f64 {
        p /= norm;
    }

    let n = n.unwrap_or(norm);
    if n.is_nan() || n < 1f64 {
        return Err(VoteError::InvalidTotal { total: n });
    }

    let z2 = z * z;
    let factor = z2 / n;
    let sqrt = ((p * (1f64 - p) + factor / 4f64) / n).sqrt();

    Ok(round((p + factor / 2f64 - z * sqrt) / (1f64 + factor)))
}
