/// Number of decimals kept by rounded outputs
/// (confidences, probabilities).
pub const PRECISION:         i32 = 5;

/// Maximum number of bins in a grouped distribution.
pub const BINS_LIMIT:      usize = 32;

/// Errors are rescaled into `[0, DEFAULT_TOP_RANGE]`
/// before exponentiation in the error-weighted mean.
pub const DEFAULT_TOP_RANGE: f64 = 10.0;

/// Percentile of the standard normal distribution
/// used by the Wilson score (95%).
pub const DEFAULT_WS_Z:      f64 = 1.96;
