//! A node struct used in the decision tree algorithm.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::sample::{Outcome, Value};
use super::statistics::Counts;


/// The name reported by a leaf node.
pub const LEAF_NAME: &str = "Outcome";


/// Index of a node in the arena of a [`DecisionTree`](super::DecisionTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub(crate) usize);


impl NodeId {
    /// Returns the position of this node in the arena.
    pub fn index(&self) -> usize {
        self.0
    }
}


/// How the rows reaching an internal node are partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitRule {
    /// One child per distinct value.
    Categorical,
    /// Two children, `value <= t` and `value > t`.
    Threshold(i64),
}


/// The test performed by an internal node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub(crate) feature: String,
    pub(crate) column: usize,
    pub(crate) rule: SplitRule,
}


impl Split {
    #[inline]
    pub(crate) fn new(feature: &str, column: usize, rule: SplitRule) -> Self {
        Self { feature: feature.to_string(), column, rule, }
    }


    /// Returns the name of the attribute tested.
    pub fn feature(&self) -> &str {
        &self.feature
    }


    /// Returns the column of the attribute tested.
    pub fn column(&self) -> usize {
        self.column
    }


    /// Returns the splitting rule.
    pub fn rule(&self) -> SplitRule {
        self.rule
    }
}


/// The label of the edge leading into a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    /// The child taken when the value equals this one.
    Category(String),
    /// The child taken when the value is `<= t`.
    AtMost(i64),
    /// The child taken when the value is `> t`.
    Above(i64),
}


impl Branch {
    /// Returns `true` if a row holding `value` follows this branch.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Category(c), Value::Category(v)) => c == v,
            (Self::AtMost(t), Value::Number(x)) => x <= t,
            (Self::Above(t), Value::Number(x)) => x > t,
            _ => false,
        }
    }
}


impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(c) => write!(f, "{c}"),
            Self::AtMost(t) => write!(f, "<= {t}"),
            Self::Above(t) => write!(f, "> {t}"),
        }
    }
}


/// A node of the decision tree.
///
/// An internal node carries a [`Split`] and at least two children;
/// a leaf carries an [`Outcome`] and no children.
/// `parent` is a back-reference into the same arena
/// and never owns anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) split: Option<Split>,
    pub(crate) branch: Option<Branch>,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) counts: Counts,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}


impl Node {
    #[inline]
    pub(crate) fn leaf(
        outcome: Outcome,
        counts:  Counts,
        branch:  Option<Branch>,
        parent:  Option<NodeId>,
    ) -> Self
    {
        Self {
            split: None,
            branch,
            outcome: Some(outcome),
            counts,
            children: Vec::new(),
            parent,
        }
    }


    #[inline]
    pub(crate) fn branch(
        split:  Split,
        counts: Counts,
        branch: Option<Branch>,
        parent: Option<NodeId>,
    ) -> Self
    {
        Self {
            split: Some(split),
            branch,
            outcome: None,
            counts,
            children: Vec::new(),
            parent,
        }
    }


    /// Turns this node into a leaf predicting `outcome`.
    /// The children are detached but stay in the arena.
    #[inline]
    pub(crate) fn collapse(&mut self, outcome: Outcome) {
        self.split = None;
        self.outcome = Some(outcome);
        self.children.clear();
    }


    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.outcome.is_some()
    }


    /// Returns the split attribute, or `"Outcome"` for a leaf.
    pub fn name(&self) -> &str {
        self.split.as_ref()
            .map(|split| split.feature())
            .unwrap_or(LEAF_NAME)
    }


    /// Returns the test of an internal node.
    pub fn split(&self) -> Option<&Split> {
        self.split.as_ref()
    }


    /// Returns the threshold of a numeric split.
    pub fn threshold(&self) -> Option<i64> {
        match self.split.as_ref().map(|split| split.rule) {
            Some(SplitRule::Threshold(t)) => Some(t),
            _ => None,
        }
    }


    /// Returns the incoming branch label. `None` at the root.
    pub fn branch_label(&self) -> Option<&Branch> {
        self.branch.as_ref()
    }


    /// Returns the outcome of a leaf.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }


    /// Returns the label counts of the rows reaching this node.
    pub fn counts(&self) -> Counts {
        self.counts
    }


    /// Returns the number of rows reaching this node.
    pub fn num_items(&self) -> usize {
        self.counts.items()
    }


    /// Returns the number of `yes` rows reaching this node.
    pub fn num_yes(&self) -> usize {
        self.counts.yes
    }


    /// Returns the number of `no` rows reaching this node.
    pub fn num_no(&self) -> usize {
        self.counts.no
    }


    /// Returns the children in branch order.
    pub fn children(&self) -> &[NodeId] {
        &self.children[..]
    }


    /// Returns the parent node. `None` at the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}
