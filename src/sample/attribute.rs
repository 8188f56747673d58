use serde::{Serialize, Deserialize};

use std::fmt;


/// The binary outcome attached to every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The `yes` label.
    Yes,
    /// The `no` label.
    No,
}


impl Outcome {
    /// Parses a label token.
    /// Surrounding whitespace is ignored and the match is
    /// case-insensitive, so `yes`, `YES` and ` Yes` are all accepted.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("yes") {
            Some(Self::Yes)
        } else if token.eq_ignore_ascii_case("no") {
            Some(Self::No)
        } else {
            None
        }
    }


    /// Returns the majority outcome of the given counts.
    /// Ties go to [`Outcome::No`].
    #[inline]
    pub fn majority(yes: usize, no: usize) -> Self {
        if yes > no { Self::Yes } else { Self::No }
    }
}


impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yes => "YES",
            Self::No => "NO",
        };
        f.pad(name)
    }
}


/// How the values of an attribute are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Values are opaque tokens; a split has one branch per value.
    Categorical,
    /// Values are integers; a split is a binary threshold test.
    Numeric,
}


impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Categorical => "categorical",
            Self::Numeric => "numeric",
        };
        write!(f, "{name}")
    }
}


/// A named column of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) kind: AttributeKind,
}


impl Attribute {
    /// Construct a new attribute.
    pub fn new<T: ToString>(name: T, kind: AttributeKind) -> Self {
        Self { name: name.to_string(), kind, }
    }


    /// Construct a categorical attribute.
    pub fn categorical<T: ToString>(name: T) -> Self {
        Self::new(name, AttributeKind::Categorical)
    }


    /// Construct a numeric attribute.
    pub fn numeric<T: ToString>(name: T) -> Self {
        Self::new(name, AttributeKind::Numeric)
    }


    /// Returns the attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the attribute kind.
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }
}


/// A single cell of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A categorical token.
    Category(String),
    /// An integer.
    Number(i64),
}


impl Value {
    /// Returns the number held by this value, if any.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(x) => Some(*x),
            Self::Category(_) => None,
        }
    }
}


impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(token) => write!(f, "{token}"),
            Self::Number(x) => write!(f, "{x}"),
        }
    }
}


impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Self::Number(x)
    }
}


impl From<&str> for Value {
    fn from(token: &str) -> Self {
        Self::Category(token.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_token() {
        assert_eq!(Outcome::from_token("yes"), Some(Outcome::Yes));
        assert_eq!(Outcome::from_token(" NO "), Some(Outcome::No));
        assert_eq!(Outcome::from_token("Yes"), Some(Outcome::Yes));
        assert_eq!(Outcome::from_token("maybe"), None);
        assert_eq!(Outcome::from_token(""), None);
    }

    #[test]
    fn test_outcome_majority_ties_to_no() {
        assert_eq!(Outcome::majority(3, 1), Outcome::Yes);
        assert_eq!(Outcome::majority(1, 3), Outcome::No);
        assert_eq!(Outcome::majority(2, 2), Outcome::No);
        assert_eq!(Outcome::majority(0, 0), Outcome::No);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Yes.to_string(), "YES");
        assert_eq!(Outcome::No.to_string(), "NO");
    }
}
