use rayon::prelude::*;
use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::decision_tree::Id3;
use crate::error::{Result, TreeError};
use crate::sample::{Dataset, Outcome};

const WIDTH: usize = 9;


/// Leave-one-out cross validation.
/// For each row `i`, a tree is grown on every other row
/// and then asked to classify row `i`.
///
/// A held-out row that reaches a node with no branch for its value
/// (e.g., a categorical value that only this row has)
/// is excluded: it counts neither as correct nor as incorrect.
///
/// # Example
/// ```no_run
/// use minitree::prelude::*;
///
/// let dataset = DatasetReader::default()
///     .file("/path/to/data.tsv")
///     .read()
///     .unwrap();
/// let id3 = Id3Builder::new().build().unwrap();
///
/// let report = LeaveOneOut::new(&dataset, &id3)
///     .verbose(true)
///     .run()
///     .unwrap();
/// match report.accuracy() {
///     Some(accuracy) => println!("LOOCV accuracy: {accuracy}"),
///     None => println!("every fold was excluded"),
/// }
/// ```
pub struct LeaveOneOut<'a> {
    dataset: &'a Dataset,
    learner: &'a Id3,
    verbose: bool,
    parallel: bool,
}


impl<'a> LeaveOneOut<'a> {
    /// Construct a new instance of `LeaveOneOut`.
    #[inline]
    pub fn new(dataset: &'a Dataset, learner: &'a Id3) -> Self {
        Self { dataset, learner, verbose: false, parallel: true, }
    }


    /// Set the verbose parameter.
    /// If `true`, `LeaveOneOut` prints the result of each fold
    /// and the accuracy.
    /// Default value is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Run the folds on the rayon thread pool.
    /// Default value is `true.`
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Runs every fold and aggregates the result.
    /// Returns `Err` if the dataset has fewer than two rows
    /// or a fold fails to grow a tree.
    pub fn run(&self) -> Result<LoocvReport> {
        let n_rows = self.dataset.len();
        if n_rows < 2 {
            return Err(TreeError::InvalidParameter(
                format!("leave-one-out needs at least two rows, got {n_rows}")
            ));
        }

        let learner = self.learner.quiet();
        let folds = if self.parallel {
            (0..n_rows).into_par_iter()
                .map(|i| fold(self.dataset, &learner, i))
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..n_rows).map(|i| fold(self.dataset, &learner, i))
                .collect::<Result<Vec<_>>>()?
        };

        let mut report = LoocvReport::default();
        for (i, result) in folds.iter().enumerate() {
            report.add(result);
            if self.verbose { print_fold(i, result); }
        }

        if self.verbose {
            let accuracy = report.accuracy()
                .map(|accuracy| format!("{accuracy:.4}"))
                .unwrap_or_else(|| "undefined".to_string());
            println!(
                "{}    {}",
                format!("  [LOOCV {: >3} folds]", report.n_folds).bold().red(),
                format!("[ACCURACY {:>WIDTH$}]", accuracy).bold().green(),
            );
        }

        Ok(report)
    }
}


/// The outcome of one fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FoldResult {
    Classified { predicted: Outcome, truth: Outcome },
    Excluded { truth: Outcome },
}


fn fold(dataset: &Dataset, learner: &Id3, held_out: usize) -> Result<FoldResult> {
    let indices = (0..dataset.len())
        .filter(|&i| i != held_out)
        .collect::<Vec<_>>();
    let tree = learner.fit_indices(dataset, indices)?;

    let row = &dataset[held_out];
    let truth = row.label();
    let result = match tree.classify(row) {
        Some(predicted) => FoldResult::Classified { predicted, truth },
        None => FoldResult::Excluded { truth },
    };
    Ok(result)
}


fn print_fold(i: usize, result: &FoldResult) {
    let (predicted, truth) = match result {
        FoldResult::Classified { predicted, truth } => (predicted.to_string(), truth),
        FoldResult::Excluded { truth } => ("excluded".to_string(), truth),
    };
    println!(
        "{}    {}    {}",
        format!("  [{: >3}'th fold]", i).bold().red(),
        format!("[PREDICT {:>WIDTH$}]", predicted).bold().green(),
        format!("[TRUTH {:>WIDTH$}]", truth).bold().yellow(),
    );
}


/// Aggregated result of [`LeaveOneOut::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoocvReport {
    /// The number of folds, one per row.
    pub n_folds: usize,
    /// Held-out rows classified correctly.
    pub correct: usize,
    /// Held-out rows classified incorrectly.
    pub incorrect: usize,
    /// Held-out rows with no matching branch.
    pub excluded: usize,
}


impl LoocvReport {
    fn add(&mut self, result: &FoldResult) {
        self.n_folds += 1;
        match result {
            FoldResult::Classified { predicted, truth } if predicted == truth => {
                self.correct += 1;
            },
            FoldResult::Classified { .. } => { self.incorrect += 1; },
            FoldResult::Excluded { .. } => { self.excluded += 1; },
        }
    }


    /// Returns `correct / (n_folds - excluded)`,
    /// or `None` if every fold was excluded.
    pub fn accuracy(&self) -> Option<f64> {
        let classified = self.n_folds - self.excluded;
        if classified == 0 { return None; }
        Some(self.correct as f64 / classified as f64)
    }
}


impl fmt::Display for LoocvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accuracy() {
            Some(accuracy) => write!(f, "{accuracy:.4}")?,
            None => write!(f, "undefined")?,
        }
        write!(
            f,
            " ({} correct, {} incorrect, {} excluded of {} folds)",
            self.correct, self.incorrect, self.excluded, self.n_folds,
        )
    }
}
