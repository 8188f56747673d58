//! This directory provides features for evaluating a learner.
//! - Leave-one-out cross validation

/// Defines leave-one-out cross validation.
pub mod cross_validation;

pub use cross_validation::{LeaveOneOut, LoocvReport};
