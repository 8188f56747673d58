//! Chi-square post-pruning of grown trees.

pub mod chi_square;
pub(crate) mod pruner;

pub use chi_square::chi_square_cdf;
pub use pruner::Pruner;
