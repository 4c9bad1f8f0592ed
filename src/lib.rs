#![warn(missing_docs)]

//! 
//! A crate that combines the predictions of the members
//! of a model ensemble into a single prediction.
//! 
//! Each ensemble member (a decision tree, a boosted tree, ...)
//! scores the same input independently.
//! The resulting [`PredictionRecord`]s are collected in a [`Vote`],
//! and [`Vote::combine`] reduces them with one of the
//! [`CombinationMethod`]s:
//! 
//! - Regression
//!     The predictions are averaged,
//!     optionally weighted by their error.
//! 
//! - Classification
//!     The categories are voted by plurality,
//!     by confidence, by node probability,
//!     or by a threshold on a singled-out category.
//! 
//! - Boosting
//!     The gradients of the boosted models are summed
//!     (per class for classifications, followed by softmax).
//! 
//! ```
//! use multivote::prelude::*;
//!
//! let vote = Vote::new(vec![
//!     PredictionRecord::new("setosa").with_confidence(0.9),
//!     PredictionRecord::new("setosa").with_confidence(0.8),
//!     PredictionRecord::new("versicolor").with_confidence(0.95),
//! ]);
//! let combined = vote.combine(
//!     CombinationMethod::ConfidenceWeighted,
//!     &CombineOptions::default(),
//!     true,
//! ).unwrap();
//! assert_eq!(combined.prediction(), &Prediction::from("setosa"));
//! ```

pub mod common;
pub mod error;
pub mod prediction;
pub mod distribution;
pub mod vote;
pub mod combiner;
pub mod combination;
pub mod logger;
pub mod prelude;


pub use error::VoteError;

pub use prediction::{
    Field,
    Prediction,
    PredictionRecord,
    PREDICTION_HEADERS,
};

pub use distribution::{
    Distribution,
    DistributionUnit,
    grouped_distribution,
    merge_bins,
    merge_distributions,
};

pub use vote::{
    BoostingOffsets,
    CombinationMethod,
    CombineOptions,
    Vote,
};

pub use combination::{
    CategoryProbability,
    Combination,
    CombinedPrediction,
};

pub use common::Task;
pub use common::statistics::{
    softmax,
    weighted_sum,
    ws_confidence,
};

pub use logger::CombineLogger;
