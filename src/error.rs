//! Defines the error type returned by the combiners.
use crate::prediction::Field;


/// Errors raised while validating or combining a [`Vote`](crate::Vote).
///
/// Arithmetic edge cases are not errors:
/// a zero normalization factor yields `f64::INFINITY`
/// and a zero softmax total yields `f64::NAN`.
#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    /// The vote holds no prediction.
    #[error("no predictions to be combined")]
    EmptyVote,

    /// A record lacks a field required by the method.
    #[error(
        "not enough data to use the selected prediction method: \
        prediction #{order} lacks `{field}`"
    )]
    MissingField { field: Field, order: usize },

    /// The field cannot weigh votes.
    #[error("`{field}` cannot be used as a combination weight")]
    InvalidWeightField { field: Field },

    /// The threshold method lacks its threshold or category.
    #[error(
        "no category and threshold information was found, \
        e.g. {{\"threshold\": 6, \"category\": \"Iris-virginica\"}}"
    )]
    MissingThresholdOptions,

    /// The threshold lies outside `[1, n_records]`.
    #[error("threshold must lie in [1, {n_records}], got {threshold}")]
    ThresholdOutOfRange { threshold: usize, n_records: usize },

    /// A node count is not a positive integer.
    #[error(
        "probability weighting is not available \
        because a node reports {count} instances"
    )]
    InvalidCount { count: f64 },

    /// A distribution weight is negative.
    #[error("the distribution weight must be non-negative, got {weight}")]
    NegativeWeight { weight: f64 },

    /// The Wilson score total is below `1`.
    #[error(
        "the total of instances in the distribution \
        must be a positive integer, got {total}"
    )]
    InvalidTotal { total: f64 },

    /// A field name is not known.
    #[error("unknown prediction field `{0}`")]
    UnknownField(String),

    /// A method name is not known.
    #[error("unknown combination method `{0}`")]
    UnknownMethod(String),

    /// A prediction is not a number where arithmetic is required.
    #[error("prediction #{order} is not numeric")]
    NonNumericPrediction { order: usize },

    /// The boosting offsets do not match the task.
    #[error("boosting offsets must be {expected}")]
    InvalidBoostingOffsets { expected: &'static str },

    /// A JSON input could not be read.
    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}


/// A `Result` alias used throughout this crate.
pub type Result<T> = std::result::Result<T, VoteError>;
