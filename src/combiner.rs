//! The combiners of a [`Vote`](crate::Vote).
//!
//! - [`numeric`] averages regressions,
//! - [`categorical`] votes for classifications,
//! - [`boosting`] sums the gradients of boosted ensembles.

pub mod numeric;
pub mod categorical;
pub mod boosting;
