//! The output of a combination.
use serde::{Serialize, Deserialize};

use crate::{
    Distribution,
    DistributionUnit,
    Prediction,
};


/// The probability of a class in a boosted classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProbability {
    /// The class.
    pub category: Prediction,
    /// Its probability, rounded.
    pub probability: f64,
}


/// A combined prediction with the statistics gathered on the way.
/// Which fields are set depends on the method and the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPrediction {
    /// The combined category or value.
    pub prediction: Prediction,
    /// Combined confidence (classification) or error (regression).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Probability of the combined category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Class probabilities of a boosted classification, most probable first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<CategoryProbability>>,
    /// Grouped distribution of the records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
    /// Unit of `distribution`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_unit: Option<DistributionUnit>,
    /// Total number of instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    /// Combined median.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    /// Minimum over the records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum over the records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}


impl CombinedPrediction {
    /// Construct a new `CombinedPrediction` that only holds `prediction`.
    pub fn new<P: Into<Prediction>>(prediction: P) -> Self {
        Self {
            prediction: prediction.into(),
            confidence: None,
            probability: None,
            probabilities: None,
            distribution: None,
            distribution_unit: None,
            count: None,
            median: None,
            min: None,
            max: None,
        }
    }
}


/// The result of [`Vote::combine`](crate::Vote::combine):
/// a bare prediction, or the full output when asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Combination {
    /// The combined category or value.
    Prediction(Prediction),
    /// The combined prediction and its statistics.
    Full(Box<CombinedPrediction>),
}


impl Combination {
    /// Returns the combined prediction.
    pub fn prediction(&self) -> &Prediction {
        match self {
            Self::Prediction(p) => p,
            Self::Full(full) => &full.prediction,
        }
    }


    /// Returns the full output, if any.
    pub fn full(&self) -> Option<&CombinedPrediction> {
        match self {
            Self::Prediction(_) => None,
            Self::Full(full) => Some(full),
        }
    }


    /// Returns the combined confidence, if any.
    pub fn confidence(&self) -> Option<f64> {
        self.full().and_then(|f| f.confidence)
    }


    /// Returns the probability of the combined category, if any.
    pub fn probability(&self) -> Option<f64> {
        self.full().and_then(|f| f.probability)
    }
}


impl From<CombinedPrediction> for Combination {
    fn from(full: CombinedPrediction) -> Self {
        Self::Full(Box::new(full))
    }
}


impl From<Prediction> for Combination {
    fn from(prediction: Prediction) -> Self {
        Self::Prediction(prediction)
    }
}
