use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use tracing::warn;

use std::collections::HashMap;

use crate::{
    Field,
    Prediction,
    PredictionRecord,
    Task,
};


/// Offsets of the base model of a boosted ensemble.
/// Boosted regressions carry a single scalar,
/// boosted classifications carry one offset per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoostingOffsets {
    /// Offset of a boosted regression.
    Scalar(f64),
    /// Per-class offsets of a boosted classification.
    PerClass(HashMap<Prediction, f64>),
}


/// A multiple vote prediction.
/// Holds the predictions of the ensemble members for a single input,
/// in arrival order.
///
/// The order of the records breaks ties in classification,
/// so `Vote` assigns it and callers never reuse an existing value.
/// ```
/// use multivote::prelude::*;
///
/// let mut vote = Vote::default();
/// vote.append(PredictionRecord::new("Iris-setosa").with_confidence(0.7));
/// vote.append(PredictionRecord::new("Iris-setosa").with_confidence(0.6));
/// vote.append(PredictionRecord::new("Iris-virginica").with_confidence(0.9));
///
/// let combined = vote.combine(
///     CombinationMethod::Plurality,
///     &CombineOptions::default(),
///     false,
/// ).unwrap();
/// assert_eq!(combined.prediction(), &Prediction::from("Iris-setosa"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vote {
    pub(crate) records: Vec<PredictionRecord>,
    pub(crate) boosting_offsets: Option<BoostingOffsets>,
}


impl Vote {
    /// Construct a new `Vote` from `records`.
    /// If every record carries an order, the given orders are kept.
    /// Otherwise each record gets its position as order.
    pub fn new(mut records: Vec<PredictionRecord>) -> Self {
        if !records.iter().all(|r| r.order.is_some()) {
            records.iter_mut()
                .enumerate()
                .for_each(|(i, r)| { r.order = Some(i); });
        }
        Self { records, boosting_offsets: None }
    }


    /// Construct a new `Vote` from the predictions of a boosted ensemble.
    pub fn with_boosting(
        records: Vec<PredictionRecord>,
        offsets: BoostingOffsets,
    ) -> Self
    {
        let mut vote = Self::new(records);
        vote.boosting_offsets = Some(offsets);
        vote
    }


    /// Returns the records in order.
    #[inline(always)]
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records[..]
    }


    /// Returns the number of records.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }


    /// Returns `true` if the vote holds no record.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }


    /// Returns `true` if the records come from a boosted ensemble.
    #[inline(always)]
    pub fn is_boosting(&self) -> bool {
        self.boosting_offsets.is_some()
    }


    /// Returns the boosting offsets, if any.
    #[inline(always)]
    pub fn boosting_offsets(&self) -> Option<&BoostingOffsets> {
        self.boosting_offsets.as_ref()
    }


    /// Returns the order to be assigned to the next record:
    /// the last order plus one, or `0` for an empty vote.
    pub fn next_order(&self) -> usize {
        self.records.last()
            .map(|r| r.order().saturating_add(1))
            .unwrap_or(0)
    }


    /// Returns `true` if the predictions are to be averaged.
    ///
    /// - Boosted: no record carries a target class.
    /// - Otherwise: every prediction is a number.
    pub fn is_regression(&self) -> bool {
        if self.is_boosting() {
            return self.records.iter().all(|r| r.class.is_none());
        }
        self.records.iter().all(|r| r.prediction.is_numeric())
    }


    /// Returns the task implied by the records.
    pub fn task(&self) -> Task {
        if self.is_regression() {
            Task::Regression
        } else {
            Task::Classification
        }
    }


    /// Append `record`, assigning the next order.
    pub fn append(&mut self, mut record: PredictionRecord) {
        record.order = Some(self.next_order());
        self.records.push(record);
    }


    /// Append a raw JSON record.
    /// The minimal record is `{"prediction": "Iris-virginica"}`.
    /// A malformed record is reported and not inserted.
    /// Returns `true` if the record was inserted.
    pub fn append_json(&mut self, value: &Value) -> bool {
        let has_prediction = value.as_object()
            .is_some_and(|obj| obj.contains_key(Field::Prediction.name()));
        if !has_prediction {
            warn!(
                "failed to add the prediction: \
                the minimal key for a prediction is `prediction`"
            );
            return false;
        }

        match serde_json::from_value::<PredictionRecord>(value.clone()) {
            Ok(record) => {
                self.append(record);
                true
            },
            Err(err) => {
                warn!("failed to add the prediction: {err}");
                false
            },
        }
    }


    /// Append a prediction row whose values are labeled by `headers`,
    /// e.g. `["Iris-virginica", 0.3]` with `[Prediction, Confidence]`.
    /// The `order` slot is set to the next order
    /// (and added when `headers` has none).
    /// A row that does not match `headers`, or headers without
    /// `prediction`, are reported and not inserted.
    /// Returns `true` if the row was inserted.
    pub fn append_row(&mut self, row: &[Value], headers: &[Field]) -> bool {
        if row.len() != headers.len()
            || !headers.contains(&Field::Prediction)
        {
            warn!(
                "failed to add the prediction: \
                the row must have label `prediction` at least"
            );
            return false;
        }

        let order = Value::from(self.next_order());
        let mut obj = headers.iter()
            .zip(row)
            .map(|(h, v)| (h.name().to_string(), v.clone()))
            .collect::<Map<String, Value>>();
        obj.insert(Field::Order.name().to_string(), order);

        self.append_json(&Value::Object(obj))
    }


    /// Extend the vote with `records`, preserving their relative order.
    pub fn extend<I>(&mut self, records: I)
        where I: IntoIterator<Item = PredictionRecord>
    {
        records.into_iter()
            .for_each(|record| self.append(record));
    }


    /// Extend the vote with raw JSON records.
    /// Returns the number of inserted records.
    pub fn extend_json(&mut self, values: &[Value]) -> usize {
        values.iter()
            .filter(|value| self.append_json(value))
            .count()
    }


    /// Extend the vote with prediction rows labeled by `headers`.
    /// Returns the number of inserted rows.
    pub fn extend_rows<R>(&mut self, rows: &[R], headers: &[Field]) -> usize
        where R: AsRef<[Value]>
    {
        rows.iter()
            .filter(|row| self.append_row(row.as_ref(), headers))
            .count()
    }
}
