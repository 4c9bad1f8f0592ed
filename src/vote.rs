//! The vote container and the dispatcher that combines it.

pub(crate) mod vote_struct;
pub(crate) mod method;
pub(crate) mod options;
pub(crate) mod combine;


pub use vote_struct::{
    Vote,
    BoostingOffsets,
};
pub use method::CombinationMethod;
pub use options::CombineOptions;
