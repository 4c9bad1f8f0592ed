use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::{
    Field,
    VoteError,
    error::Result,
};


/// The methods that combine the predictions of a [`Vote`](crate::Vote).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CombinationMethod {
    /// One vote per prediction. Averages regressions.
    #[default]
    Plurality,
    /// Confidence as the vote weight.
    /// Error-weighted mean for regressions.
    ConfidenceWeighted,
    /// Per-category probability of each node distribution
    /// as the vote weight.
    ProbabilityWeighted,
    /// A category wins outright when enough predictions name it.
    Threshold,
    /// Weighted sum of the gradients of a boosted ensemble.
    Boosting,
}


/// Static description of a combination method.
struct MethodEntry {
    code: i32,
    name: &'static str,
    required: &'static [Field],
    weight: Option<Field>,
}


/// Indexed by `CombinationMethod as usize`.
const REGISTRY: [MethodEntry; 5] = [
    MethodEntry {
        code: 0,
        name: "plurality",
        required: &[],
        weight: None,
    },
    MethodEntry {
        code: 1,
        name: "confidence weighted",
        required: &[Field::Confidence],
        weight: Some(Field::Confidence),
    },
    MethodEntry {
        code: 2,
        name: "probability weighted",
        required: &[Field::Distribution, Field::Count],
        weight: Some(Field::Probability),
    },
    MethodEntry {
        code: 3,
        name: "threshold",
        required: &[],
        weight: None,
    },
    MethodEntry {
        code: -1,
        name: "boosting",
        required: &[Field::Weight],
        weight: Some(Field::Weight),
    },
];


impl CombinationMethod {
    /// Every method, in registry order.
    pub const ALL: [Self; 5] = [
        Self::Plurality,
        Self::ConfidenceWeighted,
        Self::ProbabilityWeighted,
        Self::Threshold,
        Self::Boosting,
    ];


    #[inline(always)]
    fn entry(self) -> &'static MethodEntry {
        &REGISTRY[self as usize]
    }


    /// Returns the method with the given numeric code.
    /// Unknown codes fall back to [`CombinationMethod::Plurality`].
    pub fn from_code(code: i32) -> Self {
        Self::ALL.into_iter()
            .find(|m| m.code() == code)
            .unwrap_or_default()
    }


    /// Returns the numeric code of this method.
    pub fn code(self) -> i32 {
        self.entry().code
    }


    /// Returns the name of this method.
    pub fn name(self) -> &'static str {
        self.entry().name
    }


    /// Returns the fields every record must carry for this method.
    pub fn required_fields(self) -> &'static [Field] {
        self.entry().required
    }


    /// Returns the field used as vote weight for categories.
    pub fn weight_field(self) -> Option<Field> {
        self.entry().weight
    }
}


impl fmt::Display for CombinationMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


impl FromStr for CombinationMethod {
    type Err = VoteError;
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| VoteError::UnknownMethod(s.to_string()))
    }
}


impl TryFrom<String> for CombinationMethod {
    type Error = VoteError;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}


impl From<CombinationMethod> for String {
    fn from(method: CombinationMethod) -> Self {
        method.name().to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_matches_variants() {
        for (i, method) in CombinationMethod::ALL.into_iter().enumerate() {
            assert_eq!(method as usize, i);
            assert_eq!(CombinationMethod::from_code(method.code()), method);
            assert_eq!(method.name().parse::<CombinationMethod>().unwrap(), method);
        }
    }

    #[test]
    fn unknown_code_is_plurality() {
        assert_eq!(CombinationMethod::from_code(42), CombinationMethod::Plurality);
        assert_eq!(CombinationMethod::from_code(-3), CombinationMethod::Plurality);
    }

    #[test]
    fn unknown_name_fails() {
        assert!("majority".parse::<CombinationMethod>().is_err());
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            CombinationMethod::ProbabilityWeighted.required_fields(),
            &[Field::Distribution, Field::Count]
        );
        assert!(CombinationMethod::Threshold.required_fields().is_empty());
    }
}
