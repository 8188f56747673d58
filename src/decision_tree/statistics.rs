//! Per-attribute `value -> (yes, no)` tables over a subset of rows.
use serde::{Serialize, Deserialize};

use std::ops::{Add, AddAssign};

use crate::error::{Result, TreeError};
use crate::sample::{Dataset, Outcome, Value};


/// The number of `yes` and `no` rows reaching some point of the tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Rows labeled `yes`.
    pub yes: usize,
    /// Rows labeled `no`.
    pub no: usize,
}


impl Counts {
    /// Construct a new pair of counts.
    #[inline]
    pub fn new(yes: usize, no: usize) -> Self {
        Self { yes, no }
    }


    /// Counts the labels of the rows at `indices`.
    pub fn of(dataset: &Dataset, indices: &[usize]) -> Self {
        indices.iter()
            .map(|&i| Self::from(dataset[i].label()))
            .fold(Self::default(), |acc, c| acc + c)
    }


    /// Returns `yes + no`.
    #[inline]
    pub fn items(&self) -> usize {
        self.yes + self.no
    }


    /// Returns `true` if every counted row has the same label.
    #[inline]
    pub fn is_pure(&self) -> bool {
        self.yes == 0 || self.no == 0
    }


    /// Returns the fraction of `yes` rows, or `0` if nothing is counted.
    #[inline]
    pub fn yes_fraction(&self) -> f64 {
        let items = self.items();
        if items == 0 { 0f64 } else { self.yes as f64 / items as f64 }
    }


    /// Returns the majority label. Ties go to [`Outcome::No`].
    #[inline]
    pub fn majority(&self) -> Outcome {
        Outcome::majority(self.yes, self.no)
    }
}


impl From<Outcome> for Counts {
    #[inline]
    fn from(label: Outcome) -> Self {
        match label {
            Outcome::Yes => Self::new(1, 0),
            Outcome::No => Self::new(0, 1),
        }
    }
}


impl Add for Counts {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.yes + other.yes, self.no + other.no)
    }
}


impl AddAssign for Counts {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.yes += other.yes;
        self.no += other.no;
    }
}


/// One distinct value of an attribute with its label counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    /// The attribute value.
    pub value: Value,
    /// Labels of the rows holding `value`.
    pub counts: Counts,
}


/// For each active attribute, the distinct values observed in a
/// subset of rows, in order of first appearance, with their label counts.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStatistics {
    table: Vec<(usize, Vec<ValueCount>)>,
    total: Counts,
}


impl AttributeStatistics {
    /// Scans each row at `indices` once and tallies every column
    /// listed in `active`.
    /// Returns `Err` if `indices` is empty since there is nothing to report.
    pub fn collect(dataset: &Dataset, indices: &[usize], active: &[usize])
        -> Result<Self>
    {
        if indices.is_empty() {
            return Err(TreeError::EmptyDataset);
        }

        let mut table = active.iter()
            .map(|&column| (column, Vec::<ValueCount>::new()))
            .collect::<Vec<_>>();
        let mut total = Counts::default();

        for &i in indices {
            let row = &dataset[i];
            let counts = Counts::from(row.label());
            total += counts;

            for (column, values) in table.iter_mut() {
                let value = &row.values()[*column];
                match values.iter_mut().find(|vc| vc.value == *value) {
                    Some(vc) => { vc.counts += counts; },
                    None => {
                        values.push(ValueCount { value: value.clone(), counts });
                    },
                }
            }
        }

        Ok(Self { table, total })
    }


    /// Returns the label counts over the whole subset.
    pub fn total(&self) -> Counts {
        self.total
    }


    /// Returns the table of the attribute at `column`.
    pub fn get(&self, column: usize) -> Option<&[ValueCount]> {
        self.table.iter()
            .find(|(c, _)| *c == column)
            .map(|(_, values)| &values[..])
    }


    /// Iterates over `(column, values)` in the order of `active`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[ValueCount])> {
        self.table.iter().map(|(c, values)| (*c, &values[..]))
    }


    /// Returns the number of attributes in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }


    /// Returns `true` if no attribute is tabulated.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
