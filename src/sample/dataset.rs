use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;
use std::path::Path;

use crate::common::checker;
use crate::error::{Result, TreeError};
use super::attribute::*;


/// The ordered attribute names of a dataset.
/// The label column is implicit and always comes last.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    attributes: Vec<Attribute>,
    label: String,
    name_to_index: HashMap<String, usize>,
}


impl Schema {
    /// Construct a new schema.
    /// Returns `Err` if `attributes` is empty or contains a name twice.
    pub fn new<T: ToString>(attributes: Vec<Attribute>, label: T) -> Result<Self> {
        checker::check_attributes(&attributes)?;

        let name_to_index = attributes.iter()
            .enumerate()
            .map(|(i, attr)| (attr.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(Self { attributes, label: label.to_string(), name_to_index, })
    }


    /// Returns the attributes in column order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the `i`th attribute.
    pub fn attribute(&self, i: usize) -> &Attribute {
        &self.attributes[i]
    }


    /// Returns the column index of the attribute named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }


    /// Returns the name of the label column.
    pub fn label(&self) -> &str {
        &self.label
    }


    /// Returns the number of attributes (the label is not counted).
    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }
}


/// A row of the dataset: attribute values in schema order and the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<Value>,
    label: Outcome,
}


impl Row {
    /// Construct a new row.
    pub fn new(values: Vec<Value>, label: Outcome) -> Self {
        Self { values, label }
    }


    /// Returns the attribute values.
    pub fn values(&self) -> &[Value] {
        &self.values[..]
    }


    /// Returns the value at column `i`.
    pub fn value(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }


    /// Returns the label of this row.
    pub fn label(&self) -> Outcome {
        self.label
    }
}


/// A validated, non-empty labeled dataset.
/// Every row has one value per attribute,
/// and each value has the kind its attribute declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Row>,
}


impl Dataset {
    /// Construct a dataset from a schema and rows.
    /// Returns `Err` if `rows` is empty or a row does not fit the schema.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        checker::check_rows(schema.attributes(), &rows[..])?;
        Ok(Self { schema, rows })
    }


    /// Construct a dataset from raw tokens.
    /// `header` names the attributes followed by the label;
    /// each record holds one token per header column.
    ///
    /// A column whose tokens all parse as integers is numeric,
    /// every other column is categorical.
    pub fn from_strings<S, T>(header: &[S], records: &[T]) -> Result<Self>
        where S: AsRef<str>,
              T: AsRef<[S]>,
    {
        Self::from_tokens(header, records, &HashMap::new())
    }


    /// Same as [`Dataset::from_strings`], but `kinds` forces the kind
    /// of the named attributes instead of inferring it.
    pub fn from_tokens<S, T>(
        header:  &[S],
        records: &[T],
        kinds:   &HashMap<String, AttributeKind>,
    ) -> Result<Self>
        where S: AsRef<str>,
              T: AsRef<[S]>,
    {
        // At least one attribute and the label.
        if header.len() < 2 {
            return Err(TreeError::EmptySchema);
        }
        let n_attributes = header.len() - 1;
        let names = header.iter()
            .map(|name| name.as_ref().trim())
            .collect::<Vec<_>>();

        if let Some(name) = kinds.keys().find(|key| !names[..n_attributes].contains(&key.as_str())) {
            return Err(TreeError::UnknownAttribute(name.clone()));
        }

        if records.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        for (i, record) in records.iter().enumerate() {
            let got = record.as_ref().len();
            if got != header.len() {
                return Err(TreeError::RowLength { row: i, expected: header.len(), got });
            }
        }

        let attributes = names[..n_attributes].iter()
            .enumerate()
            .map(|(j, &name)| {
                let kind = kinds.get(name)
                    .copied()
                    .unwrap_or_else(|| infer_kind::<S, T>(records, j));
                Attribute::new(name, kind)
            })
            .collect::<Vec<_>>();

        let rows = records.iter()
            .enumerate()
            .map(|(i, record)| parse_record(&attributes, record.as_ref(), i))
            .collect::<Result<Vec<_>>>()?;

        let schema = Schema::new(attributes, names[n_attributes])?;
        Self::new(schema, rows)
    }


    /// Read a delimited text file to [`Dataset`].
    /// The first non-blank line is the header.
    pub(crate) fn from_file<P>(
        file:      P,
        delimiter: char,
        kinds:     &HashMap<String, AttributeKind>,
    ) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, delimiter, kinds)
    }


    /// Read delimited text from any buffered source,
    /// e.g. a [`BufReader`], a [`Cursor`](std::io::Cursor), or standard input.
    /// Blank lines are skipped.
    pub fn from_reader<R>(
        reader:    R,
        delimiter: char,
        kinds:     &HashMap<String, AttributeKind>,
    ) -> Result<Self>
        where R: BufRead,
    {
        let mut header = Vec::new();
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() { continue; }

            let tokens = line.split(delimiter)
                .map(|token| token.trim().to_string())
                .collect::<Vec<_>>();

            if header.is_empty() {
                header = tokens;
            } else {
                records.push(tokens);
            }
        }

        if header.is_empty() {
            return Err(TreeError::EmptySchema);
        }
        Self::from_tokens(&header[..], &records[..], kinds)
    }


    /// Returns the pair of the number of rows and the number of attributes.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.schema.n_attributes())
    }


    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }


    /// Returns the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows[..]
    }


    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }


    /// Always `false`; a [`Dataset`] holds at least one row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}


impl Index<usize> for Dataset {
    type Output = Row;
    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row]
    }
}


fn infer_kind<S, T>(records: &[T], column: usize) -> AttributeKind
    where S: AsRef<str>,
          T: AsRef<[S]>,
{
    let numeric = records.iter()
        .all(|record| record.as_ref()[column].as_ref().trim().parse::<i64>().is_ok());
    if numeric { AttributeKind::Numeric } else { AttributeKind::Categorical }
}


fn parse_record<S>(attributes: &[Attribute], record: &[S], row: usize)
    -> Result<Row>
    where S: AsRef<str>,
{
    let (label, tokens) = record.split_last()
        .ok_or(TreeError::RowLength { row, expected: attributes.len() + 1, got: 0 })?;

    let label = label.as_ref();
    let label = Outcome::from_token(label)
        .ok_or_else(|| TreeError::UnknownLabel { row, label: label.to_string() })?;

    let values = attributes.iter()
        .zip(tokens)
        .map(|(attribute, token)| {
            let token = token.as_ref().trim();
            match attribute.kind() {
                AttributeKind::Categorical => Ok(Value::Category(token.to_string())),
                AttributeKind::Numeric => {
                    token.parse::<i64>()
                        .map(Value::Number)
                        .map_err(|_| TreeError::NotNumeric {
                            row,
                            attribute: attribute.name().to_string(),
                            token: token.to_string(),
                        })
                },
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Row::new(values, label))
}
