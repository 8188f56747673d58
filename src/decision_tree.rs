//! The ID3 decision tree algorithm.

pub mod statistics;
pub mod split_by;
pub mod node;
pub(crate) mod tree;
pub(crate) mod id3;
pub(crate) mod builder;

pub use builder::{Id3Builder, DEFAULT_SIGNIFICANCE};
pub use id3::Id3;
pub use node::{Branch, Node, NodeId, Split, SplitRule};
pub use statistics::{AttributeStatistics, Counts};
pub use tree::DecisionTree;
