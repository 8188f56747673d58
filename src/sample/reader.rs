use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, TreeError};
use super::attribute::AttributeKind;
use super::dataset::Dataset;


const DEFAULT_DELIMITER: char = '\t';


/// A struct that returns [`Dataset`].
/// The file is delimited text whose first line names the attributes,
/// followed by the label column.
///
/// # Example
/// ```no_run
/// use minitree::prelude::*;
///
/// let dataset = DatasetReader::default()
///     .file("/path/to/data.tsv")
///     .categorical("zip")
///     .read()
///     .unwrap();
/// ```
pub struct DatasetReader {
    file: Option<PathBuf>,
    delimiter: char,
    kinds: HashMap<String, AttributeKind>,
}


impl Default for DatasetReader {
    fn default() -> Self {
        Self {
            file: None,
            delimiter: DEFAULT_DELIMITER,
            kinds: HashMap::new(),
        }
    }
}


impl DatasetReader {
    /// Set the file name.
    pub fn file<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }


    /// Set the column delimiter.
    /// Default is the tab character.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }


    /// Treat the column `name` as numeric.
    pub fn numeric<S: ToString>(mut self, name: S) -> Self {
        self.kinds.insert(name.to_string(), AttributeKind::Numeric);
        self
    }


    /// Treat the column `name` as categorical,
    /// even if every token is an integer.
    pub fn categorical<S: ToString>(mut self, name: S) -> Self {
        self.kinds.insert(name.to_string(), AttributeKind::Categorical);
        self
    }


    /// Reads the file based on the arguments.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Dataset> {
        let file = self.file.ok_or_else(|| {
            TreeError::InvalidParameter("the file name is not set".to_string())
        })?;
        Dataset::from_file(file, self.delimiter, &self.kinds)
    }
}
