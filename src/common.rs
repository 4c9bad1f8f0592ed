//! Defines some common functions used in this library.

/// Defines the constants shared by the combiners.
pub mod constants;

/// Defines statistical functions such as the Wilson score and softmax.
pub mod statistics;

/// Defines some checker functions.
pub(crate) mod checker;

/// Defines machine learning tasks.
pub mod task;

pub use task::Task;
