//! Struct `Dataset` represents a labeled table of rows.

// Provides attribute, value, and label types.
pub(crate) mod attribute;
// Provides the dataset struct.
pub(crate) mod dataset;

// Provides a struct that reads a file.
pub(crate) mod reader;


pub use attribute::{Attribute, AttributeKind, Outcome, Value};
pub use dataset::{Dataset, Row, Schema};
pub use reader::DatasetReader;
