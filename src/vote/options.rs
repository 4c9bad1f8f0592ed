use serde::{Serialize, Deserialize};

use crate::{
    Prediction,
    error::Result,
    common::constants::{
        BINS_LIMIT,
        DEFAULT_TOP_RANGE,
        DEFAULT_WS_Z,
    },
};


/// Options of [`Vote::combine`](crate::Vote::combine).
///
/// Every field has a default, so a partial JSON object
/// such as `{"threshold": 6, "category": "Iris-virginica"}` is valid.
/// ```
/// use multivote::CombineOptions;
/// let options = CombineOptions::default()
///     .threshold(2)
///     .category("Iris-virginica");
/// assert_eq!(options.threshold, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineOptions {
    /// Minimum number of votes for `category` to win outright
    /// (threshold method).
    pub threshold: Option<usize>,
    /// The singled-out category (threshold method).
    pub category: Option<Prediction>,
    /// Category order of the ensemble summary.
    /// Breaks ties of boosted classifications.
    pub categories: Vec<Prediction>,
    /// Percentile of the standard normal distribution
    /// used by the Wilson score.
    pub ws_z: f64,
    /// Maximum number of bins of a grouped distribution.
    pub bins_limit: usize,
    /// Range errors are rescaled to in the error-weighted mean.
    pub top_range: f64,
}


impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            threshold: None,
            category: None,
            categories: Vec::new(),
            ws_z: DEFAULT_WS_Z,
            bins_limit: BINS_LIMIT,
            top_range: DEFAULT_TOP_RANGE,
        }
    }
}


impl CombineOptions {
    /// Read the options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }


    /// Set the threshold of the threshold method.
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = Some(threshold);
        self
    }


    /// Set the singled-out category of the threshold method.
    pub fn category<P: Into<Prediction>>(mut self, category: P) -> Self {
        self.category = Some(category.into());
        self
    }


    /// Set the category order used by boosted classifications.
    pub fn categories<I, P>(mut self, categories: I) -> Self
        where I: IntoIterator<Item = P>,
              P: Into<Prediction>,
    {
        self.categories = categories.into_iter()
            .map(|c| c.into())
            .collect();
        self
    }


    /// Set the percentile of the Wilson score. Default is `1.96`.
    pub fn ws_z(mut self, z: f64) -> Self {
        self.ws_z = z;
        self
    }


    /// Set the maximum number of bins. Default is `32`.
    pub fn bins_limit(mut self, limit: usize) -> Self {
        self.bins_limit = limit;
        self
    }


    /// Set the error range of the error-weighted mean. Default is `10`.
    pub fn top_range(mut self, top_range: f64) -> Self {
        self.top_range = top_range;
        self
    }
}
