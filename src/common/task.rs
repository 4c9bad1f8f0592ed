/// The task solved by the ensemble whose predictions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Category labels are combined by voting.
    Classification,
    /// Numeric predictions are combined by averaging.
    Regression,
}
