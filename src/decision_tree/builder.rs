use crate::common::checker;
use crate::error::Result;
use super::id3::Id3;


/// The significance level set as default.
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;


/// A struct that builds [`Id3`].
/// `Id3Builder` keeps parameters for constructing [`Id3`].
///
/// # Example
///
/// ```no_run
/// use minitree::prelude::*;
///
/// let id3 = Id3Builder::new()
///     .prune(true)
///     .significance(0.01)
///     .verbose(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Id3Builder {
    prune: bool,
    significance: f64,
    verbose: bool,
}


impl Default for Id3Builder {
    fn default() -> Self {
        Self::new()
    }
}


impl Id3Builder {
    /// Construct a new instance of [`Id3Builder`].
    pub fn new() -> Self {
        Self {
            prune: false,
            significance: DEFAULT_SIGNIFICANCE,
            verbose: false,
        }
    }


    /// Prune every grown tree with the chi-square test.
    /// Default is `false`.
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }


    /// Set the significance level of the chi-square test.
    /// Default is `0.05`.
    pub fn significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }


    /// Print a summary of every grown tree.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Build an [`Id3`].
    /// This method consumes `self`.
    /// Returns `Err` if the significance level is not in `(0, 1)`.
    pub fn build(self) -> Result<Id3> {
        checker::check_significance(self.significance)?;
        Ok(Id3::new(self.prune, self.significance, self.verbose))
    }
}
