//! Defines the per-submodel prediction record
//! and the value it predicts.

pub(crate) mod value;
pub(crate) mod record;


pub use value::Prediction;
pub use record::{
    Field,
    PredictionRecord,
    PREDICTION_HEADERS,
};
