//! Exports the vote container, the combination methods, and their output.
//! 
pub use crate::vote::{
    // Container
    Vote,
    BoostingOffsets,


    // Dispatch ---------------------------------
    CombinationMethod,
    CombineOptions,
};


pub use crate::prediction::{
    Field,
    Prediction,
    PredictionRecord,
    PREDICTION_HEADERS,
};


pub use crate::combination::{
    Combination,
    CombinedPrediction,
    CategoryProbability,
};


pub use crate::distribution::{
    Distribution,
    DistributionUnit,
};


pub use crate::logger::CombineLogger;
pub use crate::error::VoteError;
