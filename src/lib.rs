#![warn(missing_docs)]

//!
//! A crate that provides the ID3 decision tree algorithm
//! for binary outcomes.
//!
//! - Induction
//!     [`Id3`] grows a tree by information gain.
//!     Categorical attributes split into one branch per value,
//!     numeric attributes split at the threshold with maximal gain.
//!     Each attribute is used at most once per root-to-leaf path.
//!
//!
//! - Pruning
//!     [`Pruner`] collapses splits whose children do not differ
//!     significantly (chi-square test) from what the parent predicts,
//!     repeating until nothing changes.
//!
//!
//! - Evaluation
//!     [`LeaveOneOut`] estimates the accuracy of a learner
//!     by leave-one-out cross validation.
//!
//! ```no_run
//! use minitree::prelude::*;
//!
//! let dataset = DatasetReader::default()
//!     .file("/path/to/data.tsv")
//!     .read()
//!     .unwrap();
//!
//! let id3 = Id3Builder::new().build().unwrap();
//! let report = LeaveOneOut::new(&dataset, &id3).run().unwrap();
//!
//! let mut tree = id3.fit(&dataset).unwrap();
//! Pruner::new().prune(&mut tree).unwrap();
//! println!("{tree}");
//! println!("LOOCV accuracy: {report}");
//! ```

pub mod error;
pub mod sample;
pub(crate) mod common;
pub mod decision_tree;
pub mod pruning;
pub mod research;
pub mod prelude;


pub use error::{Result, TreeError};

pub use sample::{
    Attribute,
    AttributeKind,
    Dataset,
    DatasetReader,
    Outcome,
    Row,
    Schema,
    Value,
};

pub use decision_tree::{
    DecisionTree,
    Id3,
    Id3Builder,
    Node,
    NodeId,
};

pub use pruning::Pruner;
pub use research::{LeaveOneOut, LoocvReport};
