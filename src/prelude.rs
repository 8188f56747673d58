//! Exports the learner, the pruner, and the evaluator.
//!
pub use crate::sample::{
    Attribute,
    AttributeKind,
    Dataset,
    DatasetReader,
    Outcome,
    Row,
    Schema,
    Value,
};


pub use crate::decision_tree::{
    Branch,
    DecisionTree,
    Id3,
    Id3Builder,
    Node,
    NodeId,
    Split,
    SplitRule,
};


pub use crate::pruning::Pruner;


pub use crate::research::{
    LeaveOneOut,
    LoocvReport,
};


pub use crate::error::{Result, TreeError};
