use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::{
    Distribution,
    Prediction,
    VoteError,
    error::Result,
};


/// Default labels of the values in a prediction row.
/// See [`Vote::append_row`](crate::Vote::append_row).
pub const PREDICTION_HEADERS: [Field; 5] = [
    Field::Prediction,
    Field::Confidence,
    Field::Order,
    Field::Distribution,
    Field::Count,
];


/// Names of the fields a [`PredictionRecord`] may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The predicted category or value.
    Prediction,
    /// Confidence (classification) or error (regression).
    Confidence,
    /// Probability of the predicted category.
    Probability,
    /// Leaf/node distribution.
    Distribution,
    /// Number of training instances backing the prediction.
    Count,
    /// Insertion order, used to break ties.
    Order,
    /// Median of the node (regression).
    Median,
    /// Minimum of the node (regression).
    Min,
    /// Maximum of the node (regression).
    Max,
    /// Contribution weight of a boosted model.
    Weight,
    /// Target class of a boosted model.
    Class,
}


impl Field {
    /// Returns the key used for this field in JSON records and row headers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prediction => "prediction",
            Self::Confidence => "confidence",
            Self::Probability => "probability",
            Self::Distribution => "distribution",
            Self::Count => "count",
            Self::Order => "order",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
            Self::Weight => "weight",
            Self::Class => "class",
        }
    }
}


impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


impl FromStr for Field {
    type Err = VoteError;
    fn from_str(s: &str) -> Result<Self> {
        let field = match s {
            "prediction" => Self::Prediction,
            "confidence" => Self::Confidence,
            "probability" => Self::Probability,
            "distribution" => Self::Distribution,
            "count" => Self::Count,
            "order" => Self::Order,
            "median" => Self::Median,
            "min" => Self::Min,
            "max" => Self::Max,
            "weight" => Self::Weight,
            "class" => Self::Class,
            _ => return Err(VoteError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}


/// The output of a single ensemble member for a single input.
///
/// Only `prediction` is compulsory.
/// A JSON `null` is read as an absent field.
/// ```
/// use multivote::PredictionRecord;
/// let record = PredictionRecord::new("Iris-setosa")
///     .with_confidence(0.7)
///     .with_count(10.0);
/// assert_eq!(record.confidence, Some(0.7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// The predicted category or value.
    pub prediction: Prediction,

    /// Confidence in `[0, 1]` for classifications,
    /// an unbounded error measure for regressions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Probability of the predicted category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,

    /// `(value, instances)` pairs at the prediction node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,

    /// Total number of training instances at the prediction node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,

    /// Insertion order. Assigned by [`Vote`](crate::Vote).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,

    /// Median of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,

    /// Minimum of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Maximum of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Contribution weight of a boosted model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Target class of a boosted classification model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<Prediction>,
}


impl PredictionRecord {
    /// Construct a new record that only holds `prediction`.
    pub fn new<P: Into<Prediction>>(prediction: P) -> Self {
        Self {
            prediction: prediction.into(),
            confidence: None,
            probability: None,
            distribution: None,
            count: None,
            order: None,
            median: None,
            min: None,
            max: None,
            weight: None,
            class: None,
        }
    }


    /// Set the confidence (or error).
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }


    /// Set the probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }


    /// Set the node distribution.
    pub fn with_distribution<D: Into<Distribution>>(mut self, dist: D)
        -> Self
    {
        self.distribution = Some(dist.into());
        self
    }


    /// Set the number of instances.
    pub fn with_count(mut self, count: f64) -> Self {
        self.count = Some(count);
        self
    }


    /// Set the order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }


    /// Set the median, min, and max extras of a regression node.
    pub fn with_extras(mut self, median: f64, min: f64, max: f64) -> Self {
        self.median = Some(median);
        self.min = Some(min);
        self.max = Some(max);
        self
    }


    /// Set the boosting weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }


    /// Set the boosting class.
    pub fn with_class<P: Into<Prediction>>(mut self, class: P) -> Self {
        self.class = Some(class.into());
        self
    }


    /// Returns `true` if the record carries `field`.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Prediction => true,
            Field::Confidence => self.confidence.is_some(),
            Field::Probability => self.probability.is_some(),
            Field::Distribution => self.distribution.is_some(),
            Field::Count => self.count.is_some(),
            Field::Order => self.order.is_some(),
            Field::Median => self.median.is_some(),
            Field::Min => self.min.is_some(),
            Field::Max => self.max.is_some(),
            Field::Weight => self.weight.is_some(),
            Field::Class => self.class.is_some(),
        }
    }


    /// Returns the value of a numeric `field`.
    /// `prediction` is returned only when it is a number.
    pub fn value_of(&self, field: Field) -> Option<f64> {
        match field {
            Field::Prediction => self.prediction.as_f64(),
            Field::Confidence => self.confidence,
            Field::Probability => self.probability,
            Field::Count => self.count,
            Field::Order => self.order.map(|o| o as f64),
            Field::Median => self.median,
            Field::Min => self.min,
            Field::Max => self.max,
            Field::Weight => self.weight,
            Field::Distribution | Field::Class => None,
        }
    }


    /// Returns the numeric prediction,
    /// or an error naming the record otherwise.
    pub fn numeric_prediction(&self) -> Result<f64> {
        self.prediction.as_f64()
            .ok_or(VoteError::NonNumericPrediction { order: self.order() })
    }


    /// Returns the order of this record (`0` if not assigned yet).
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.order.unwrap_or_default()
    }
}
