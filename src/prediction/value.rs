use serde::{Serialize, Deserialize};

use std::fmt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};


/// The value predicted by a submodel.
/// Regression models predict a number,
/// classification models predict a category label.
///
/// `Prediction` is totally ordered:
/// numbers compare by [`f64::total_cmp`] and precede every category,
/// categories compare lexicographically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    /// A numeric prediction.
    Numeric(f64),
    /// A category label.
    Category(String),
}


impl Prediction {
    /// Returns `true` if `self` is a number.
    #[inline(always)]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }


    /// Returns the numeric value, if any.
    #[inline(always)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Category(_) => None,
        }
    }
}


impl PartialEq for Prediction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Prediction {}


impl PartialOrd for Prediction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


impl Ord for Prediction {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => normalize_zero(*a)
                .total_cmp(&normalize_zero(*b)),
            (Self::Numeric(_), Self::Category(_)) => Ordering::Less,
            (Self::Category(_), Self::Numeric(_)) => Ordering::Greater,
            (Self::Category(a), Self::Category(b)) => a.cmp(b),
        }
    }
}


impl Hash for Prediction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Numeric(v) => {
                0u8.hash(state);
                normalize_zero(*v).to_bits().hash(state);
            },
            Self::Category(c) => {
                1u8.hash(state);
                c.hash(state);
            },
        }
    }
}


// `-0.0` and `0.0` are the same prediction.
#[inline(always)]
fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}


impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Category(c) => write!(f, "{c}"),
        }
    }
}


impl From<f64> for Prediction {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}

impl From<&str> for Prediction {
    fn from(c: &str) -> Self {
        Self::Category(c.to_string())
    }
}

impl From<String> for Prediction {
    fn from(c: String) -> Self {
        Self::Category(c)
    }
}
