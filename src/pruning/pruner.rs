use colored::Colorize;

use crate::common::checker;
use crate::decision_tree::{DecisionTree, NodeId, DEFAULT_SIGNIFICANCE};
use crate::error::Result;
use super::chi_square::chi_square_cdf;


const WIDTH: usize = 6;

/// Replaces an expected count of exactly zero.
const EXPECTED_EPSILON: f64 = 1e-13;


/// Bottom-up chi-square pruning.
///
/// For each internal node whose children are all leaves,
/// the children's label counts are compared with the counts
/// the parent's `yes` rate predicts.
/// If the chi-square CDF of the deviation with `items - 1`
/// degrees of freedom exceeds the significance level,
/// the split is judged uninformative and the parent becomes
/// a leaf of its majority label (ties go to `NO`).
/// Passes repeat until nothing collapses.
///
/// # Example
/// ```no_run
/// use minitree::prelude::*;
///
/// let dataset = DatasetReader::default()
///     .file("/path/to/data.tsv")
///     .read()
///     .unwrap();
/// let mut tree = Id3Builder::new()
///     .build()
///     .unwrap()
///     .fit(&dataset)
///     .unwrap();
/// let collapsed = Pruner::new()
///     .significance(0.05)
///     .verbose(true)
///     .prune(&mut tree)
///     .unwrap();
/// println!("collapsed {collapsed} splits");
/// ```
#[derive(Debug, Clone)]
pub struct Pruner {
    significance: f64,
    verbose: bool,
}


impl Default for Pruner {
    fn default() -> Self {
        Self::new()
    }
}


impl Pruner {
    /// Construct a new instance of `Pruner`.
    #[inline]
    pub fn new() -> Self {
        Self { significance: DEFAULT_SIGNIFICANCE, verbose: false, }
    }


    /// Set the significance level.
    /// Default value is `0.05`.
    #[inline]
    pub fn significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `Pruner` prints the number of collapsed splits per pass.
    /// Default value is `false`.
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Prunes `tree` in place until a fixed point is reached.
    /// Returns the number of collapsed splits.
    pub fn prune(&self, tree: &mut DecisionTree) -> Result<usize> {
        checker::check_significance(self.significance)?;

        let mut total = 0;
        let mut pass = 0;
        loop {
            pass += 1;
            let collapsed = self.prune_pass(tree);
            total += collapsed;

            if self.verbose {
                println!(
                    "{}    {}    {}",
                    format!("  [{: >3}'th pass]", pass).bold().red(),
                    format!("[COLLAPSED {:>WIDTH$}]", collapsed).bold().green(),
                    format!("[NODES {:>WIDTH$}]", tree.n_nodes()).bold().yellow(),
                );
            }
            if collapsed == 0 { break; }
        }
        tree.compact();

        Ok(total)
    }


    fn prune_pass(&self, tree: &mut DecisionTree) -> usize {
        let mut parents = tree.leaves()
            .into_iter()
            .filter_map(|leaf| tree.node(leaf).parent())
            .collect::<Vec<_>>();
        parents.sort();
        parents.dedup();

        let mut collapsed = 0;
        for parent in parents {
            let node = tree.node(parent);
            let all_leaves = !node.is_leaf() && node.children()
                .iter()
                .all(|&child| tree.node(child).is_leaf());
            if !all_leaves { continue; }

            let df = node.num_items().saturating_sub(1);
            let probability = chi_square_cdf(deviation(tree, parent), df);
            if probability > self.significance {
                tree.collapse(parent);
                collapsed += 1;
            }
        }
        collapsed
    }
}


/// `Σ (pk - p̂)² / p̂ + (nk - n̂)² / n̂` over the children of `parent`.
pub(crate) fn deviation(tree: &DecisionTree, parent: NodeId) -> f64 {
    let node = tree.node(parent);
    let p = node.num_yes() as f64;
    let n = node.num_no() as f64;
    let total = p + n;
    if total == 0f64 { return 0f64; }

    node.children()
        .iter()
        .map(|&child| {
            let child = tree.node(child);
            let pk = child.num_yes() as f64;
            let nk = child.num_no() as f64;
            let ratio = (pk + nk) / total;

            let p_hat = guard(p * ratio);
            let n_hat = guard(n * ratio);
            (pk - p_hat).powi(2) / p_hat + (nk - n_hat).powi(2) / n_hat
        })
        .sum::<f64>()
}


#[inline]
fn guard(expected: f64) -> f64 {
    if expected == 0f64 { EXPECTED_EPSILON } else { expected }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_tree::Id3Builder;
    use crate::error::TreeError;
    use crate::sample::{Dataset, Outcome};

    const TEST_TOLERANCE: f64 = 1e-9;

    fn weather() -> DecisionTree {
        let header = ["weather", "temp", "label"];
        let records = [
            ["sunny", "70", "yes"],
            ["rainy", "50", "no"],
            ["sunny", "75", "yes"],
            ["rainy", "55", "no"],
        ];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        Id3Builder::new().build().unwrap().fit(&dataset).unwrap()
    }

    #[test]
    fn test_deviation_of_perfect_split() {
        let tree = weather();
        // Each child holds 2 rows, expected (1, 1); observed (2, 0) or (0, 2).
        // The zero expectations are never hit, so the sum is exact.
        let res = deviation(&tree, tree.root());
        let exp = 4f64;
        assert!((res - exp).abs() < TEST_TOLERANCE, "expected {exp}, got {res}.");
    }

    #[test]
    fn test_small_split_is_collapsed() {
        // cdf(4, 3) is about 0.74 > 0.05.
        let mut tree = weather();
        let collapsed = Pruner::new().prune(&mut tree).unwrap();
        assert_eq!(collapsed, 1);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.depth(), 0);
        // Ties go to `NO`.
        assert_eq!(tree.node(tree.root()).outcome(), Some(Outcome::No));
    }

    #[test]
    fn test_large_significance_keeps_split() {
        let mut tree = weather();
        let collapsed = Pruner::new().significance(0.99).prune(&mut tree).unwrap();
        assert_eq!(collapsed, 0);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_invalid_significance() {
        let mut tree = weather();
        let res = Pruner::new().significance(1.5).prune(&mut tree);
        assert!(matches!(res, Err(TreeError::InvalidParameter(_))));
        assert_eq!(tree.depth(), 1);
    }
}
