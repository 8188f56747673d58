//! Recursive ID3 induction over categorical and numeric attributes.
use colored::Colorize;

use crate::error::{Result, TreeError};
use crate::pruning::Pruner;
use crate::sample::{Dataset, Value};
use super::node::*;
use super::split_by::*;
use super::statistics::*;
use super::tree::DecisionTree;


/// The ID3 decision tree learner.
/// Given a labeled [`Dataset`], [`Id3`] outputs a [`DecisionTree`].
///
/// Categorical attributes split into one child per observed value,
/// numeric attributes split into `<= t` and `> t` at the threshold `t`
/// with maximal information gain.
/// Each attribute is used at most once on any root-to-leaf path.
///
/// [`Id3`] is constructed by [`Id3Builder`](super::Id3Builder).
///
/// # Example
/// ```no_run
/// use minitree::prelude::*;
///
/// let dataset = DatasetReader::default()
///     .file("/path/to/data.tsv")
///     .read()
///     .unwrap();
///
/// let id3 = Id3Builder::new()
///     .prune(true)
///     .significance(0.05)
///     .build()
///     .unwrap();
/// let tree = id3.fit(&dataset).unwrap();
///
/// let correct = dataset.rows()
///     .iter()
///     .filter(|row| tree.classify(row) == Some(row.label()))
///     .count();
/// println!("training accuracy: {}", correct as f64 / dataset.len() as f64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Id3 {
    prune: bool,
    significance: f64,
    verbose: bool,
}


impl Id3 {
    /// Initialize [`Id3`].
    /// This method is called only via `Id3Builder::build`.
    #[inline]
    pub(super) fn new(prune: bool, significance: f64, verbose: bool) -> Self {
        Self { prune, significance, verbose, }
    }


    /// Returns `true` if the learner prunes the trees it grows.
    pub fn prunes(&self) -> bool {
        self.prune
    }


    /// Returns a copy of this learner that prints nothing.
    pub(crate) fn quiet(&self) -> Self {
        Self { verbose: false, ..self.clone() }
    }


    /// Returns the significance level used for pruning.
    pub fn significance(&self) -> f64 {
        self.significance
    }


    /// Grows a tree on every row of `dataset`.
    pub fn fit(&self, dataset: &Dataset) -> Result<DecisionTree> {
        let indices = (0..dataset.len()).collect::<Vec<_>>();
        self.fit_indices(dataset, indices)
    }


    /// Grows a tree on the rows at `indices`.
    pub(crate) fn fit_indices(&self, dataset: &Dataset, indices: Vec<usize>)
        -> Result<DecisionTree>
    {
        let active = (0..dataset.schema().n_attributes()).collect::<Vec<_>>();

        let mut grower = Grower::new(dataset);
        let root = grower.grow(indices, active, None, None, None)?;

        let mut tree = DecisionTree::from_arena(grower.nodes, root);
        tree.contract();

        if self.prune {
            Pruner::new()
                .significance(self.significance)
                .verbose(self.verbose)
                .prune(&mut tree)?;
        }

        if self.verbose {
            println!(
                "{} {} nodes, {} leaves, depth {}",
                "[ID3]".bold().green(),
                tree.n_nodes(),
                tree.leaves().len(),
                tree.depth(),
            );
        }
        Ok(tree)
    }
}


/// Holds the arena while the tree is grown.
struct Grower<'a> {
    dataset: &'a Dataset,
    nodes: Vec<Node>,
}


impl<'a> Grower<'a> {
    fn new(dataset: &'a Dataset) -> Self {
        Self { dataset, nodes: Vec::new(), }
    }


    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }


    /// Grows the subtree for the rows at `indices`,
    /// splitting only on the columns in `active`.
    fn grow(
        &mut self,
        indices:       Vec<usize>,
        active:        Vec<usize>,
        parent_counts: Option<Counts>,
        branch:        Option<Branch>,
        parent:        Option<NodeId>,
    ) -> Result<NodeId>
    {
        let counts = Counts::of(self.dataset, &indices[..]);

        if indices.is_empty() {
            let outcome = parent_counts
                .ok_or(TreeError::UnresolvableOutcome)?
                .majority();
            return Ok(self.push(Node::leaf(outcome, counts, branch, parent)));
        }

        // A single row is decided by the statistics it came from.
        if indices.len() == 1 {
            let outcome = parent_counts.unwrap_or(counts).majority();
            return Ok(self.push(Node::leaf(outcome, counts, branch, parent)));
        }

        if counts.is_pure() || active.is_empty() {
            return Ok(self.push(Node::leaf(counts.majority(), counts, branch, parent)));
        }

        let stats = AttributeStatistics::collect(self.dataset, &indices[..], &active[..])?;
        let candidate = match best_split(self.dataset.schema(), &stats) {
            Some(candidate) => candidate,
            None => {
                return Ok(self.push(Node::leaf(counts.majority(), counts, branch, parent)));
            },
        };

        let column = candidate.column;
        let feature = self.dataset.schema().attribute(column).name();
        let split = Split::new(feature, column, candidate.rule);
        let id = self.push(Node::branch(split, counts, branch, parent));

        let remaining = active.into_iter()
            .filter(|&c| c != column)
            .collect::<Vec<_>>();

        let groups = self.partition(indices, column, candidate.rule);
        let mut children = Vec::with_capacity(groups.len());
        for (branch, group) in groups {
            let group_counts = Counts::of(self.dataset, &group[..]);
            let child = if group_counts.is_pure() || remaining.is_empty() {
                let leaf = Node::leaf(group_counts.majority(), group_counts, Some(branch), Some(id));
                self.push(leaf)
            } else {
                self.grow(group, remaining.clone(), Some(counts), Some(branch), Some(id))?
            };
            children.push(child);
        }
        self.nodes[id.0].children = children;

        Ok(id)
    }


    /// Splits `indices` into the groups of the rule.
    /// Categorical groups follow the order in which values first appear;
    /// a threshold yields `<= t` then `> t`.
    fn partition(&self, indices: Vec<usize>, column: usize, rule: SplitRule)
        -> Vec<(Branch, Vec<usize>)>
    {
        match rule {
            SplitRule::Threshold(t) => {
                let (low, high) = indices.into_iter()
                    .partition::<Vec<_>, _>(|&i| {
                        matches!(self.dataset[i].value(column), Some(Value::Number(x)) if *x <= t)
                    });
                vec![(Branch::AtMost(t), low), (Branch::Above(t), high)]
            },
            SplitRule::Categorical => {
                let mut groups: Vec<(Branch, Vec<usize>)> = Vec::new();
                for i in indices {
                    let value = match self.dataset[i].value(column) {
                        Some(Value::Category(value)) => value,
                        _ => continue,
                    };
                    let found = groups.iter_mut()
                        .find(|(branch, _)| matches!(branch, Branch::Category(v) if v == value));
                    match found {
                        Some((_, group)) => { group.push(i); },
                        None => {
                            groups.push((Branch::Category(value.clone()), vec![i]));
                        },
                    }
                }
                groups
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Outcome;

    fn id3() -> Id3 {
        Id3::new(false, 0.05, false)
    }

    #[test]
    fn test_weather_splits_once() {
        let header = ["weather", "temp", "label"];
        let records = [
            ["sunny", "70", "yes"],
            ["rainy", "50", "no"],
            ["sunny", "75", "yes"],
            ["rainy", "55", "no"],
        ];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let tree = id3().fit(&dataset).unwrap();

        let root = tree.node(tree.root());
        assert_eq!(root.name(), "weather");
        assert_eq!(tree.depth(), 1);
        assert_eq!(root.children().len(), 2);

        let sunny = tree.node(root.children()[0]);
        assert_eq!(sunny.branch_label(), Some(&Branch::Category("sunny".into())));
        assert_eq!(sunny.outcome(), Some(Outcome::Yes));
        assert_eq!(sunny.num_items(), 2);
    }

    #[test]
    fn test_numeric_attribute_is_used_once() {
        // `x` separates the labels only after `kind` is fixed.
        let header = ["kind", "x", "constant", "label"];
        let records = [
            ["a", "1", "z", "yes"],
            ["a", "2", "z", "yes"],
            ["a", "3", "z", "no"],
            ["b", "1", "z", "no"],
            ["b", "2", "z", "no"],
            ["b", "3", "z", "no"],
        ];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let tree = id3().fit(&dataset).unwrap();
        assert_eq!(tree.node(tree.root()).name(), "kind");
        assert_eq!(tree.depth(), 2);

        for leaf in tree.leaves() {
            let mut names = Vec::new();
            let mut id = tree.node(leaf).parent();
            while let Some(p) = id {
                names.push(tree.node(p).name().to_string());
                id = tree.node(p).parent();
            }
            let mut dedup = names.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(names.len(), dedup.len(), "attribute reused on {names:?}.");
        }

        for row in dataset.rows() {
            assert_eq!(tree.classify(row), Some(row.label()));
        }
    }

    #[test]
    fn test_single_numeric_attribute_splits() {
        let header = ["x", "label"];
        let records = [["1", "yes"], ["2", "no"], ["3", "no"]];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let tree = id3().fit(&dataset).unwrap();
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.node(tree.root()).threshold(), Some(1));
        for row in dataset.rows() {
            assert_eq!(tree.classify(row), Some(row.label()));
        }
    }

    #[test]
    fn test_exclusive_or_splits_without_gain() {
        // Neither attribute alone tells anything about the label.
        let header = ["a", "b", "label"];
        let mut records = Vec::new();
        for _ in 0..2 {
            records.push(["x", "p", "no"]);
            records.push(["x", "q", "yes"]);
            records.push(["y", "p", "yes"]);
            records.push(["y", "q", "no"]);
        }
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let tree = id3().fit(&dataset).unwrap();

        assert_eq!(tree.node(tree.root()).name(), "a");
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_nodes(), 7);
        for leaf in tree.leaves() {
            let leaf = tree.node(leaf);
            assert!(leaf.num_yes() == 0 || leaf.num_no() == 0);
        }
        for row in dataset.rows() {
            assert_eq!(tree.classify(row), Some(row.label()));
        }
    }

    #[test]
    fn test_uninformative_attributes_give_majority_leaf() {
        let header = ["a", "b", "label"];
        let records = [
            ["x", "p", "yes"],
            ["x", "p", "no"],
            ["x", "p", "yes"],
        ];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let tree = id3().fit(&dataset).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.node(tree.root()).outcome(), Some(Outcome::Yes));
    }

    #[test]
    fn test_empty_subset_without_parent_is_an_error() {
        let header = ["a", "b", "label"];
        let records = [["x", "p", "yes"]];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let res = id3().fit_indices(&dataset, Vec::new());
        assert!(matches!(res, Err(TreeError::UnresolvableOutcome)));

        // A single row is a leaf of its own label.
        let tree = id3().fit(&dataset).unwrap();
        assert_eq!(tree.node(tree.root()).outcome(), Some(Outcome::Yes));
    }
}
