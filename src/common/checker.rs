//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use std::collections::HashSet;

use crate::error::{Result, TreeError};
use crate::sample::{Attribute, AttributeKind, Row, Value};


/// Check whether the attribute list of a schema is valid or not.
pub(crate) fn check_attributes(attributes: &[Attribute]) -> Result<()> {
    // A schema must have at least one attribute besides the label.
    if attributes.is_empty() {
        return Err(TreeError::EmptySchema);
    }

    let mut seen = HashSet::with_capacity(attributes.len());
    for attribute in attributes {
        if !seen.insert(attribute.name()) {
            return Err(TreeError::DuplicateAttribute(attribute.name().to_string()));
        }
    }
    Ok(())
}


/// Check whether the rows agree with the attribute list.
pub(crate) fn check_rows(attributes: &[Attribute], rows: &[Row]) -> Result<()> {
    if rows.is_empty() {
        return Err(TreeError::EmptyDataset);
    }

    // The label column is stored apart from the values,
    // so the expected width counts it separately.
    let expected = attributes.len() + 1;
    for (i, row) in rows.iter().enumerate() {
        let got = row.values().len() + 1;
        if got != expected {
            return Err(TreeError::RowLength { row: i, expected, got });
        }

        for (attribute, value) in attributes.iter().zip(row.values()) {
            match (attribute.kind(), value) {
                (AttributeKind::Numeric, Value::Category(token)) => {
                    return Err(TreeError::NotNumeric {
                        row: i,
                        attribute: attribute.name().to_string(),
                        token: token.clone(),
                    });
                },
                (AttributeKind::Categorical, Value::Number(x)) => {
                    return Err(TreeError::NotCategorical {
                        row: i,
                        attribute: attribute.name().to_string(),
                        value: *x,
                    });
                },
                _ => {},
            }
        }
    }
    Ok(())
}


/// Check the level at which the pruner collapses a split.
pub(crate) fn check_significance(level: f64) -> Result<()> {
    if 0f64 < level && level < 1f64 {
        Ok(())
    } else {
        Err(TreeError::InvalidParameter(
            format!("significance level must be in (0, 1), got {level}")
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Outcome;

    fn attributes() -> Vec<Attribute> {
        vec![Attribute::categorical("weather"), Attribute::numeric("temp")]
    }

    #[test]
    fn test_check_attributes_rejects_duplicates() {
        let attributes = vec![
            Attribute::categorical("a"),
            Attribute::numeric("a"),
        ];
        let res = check_attributes(&attributes);
        assert!(matches!(res, Err(TreeError::DuplicateAttribute(ref a)) if a == "a"));
    }

    #[test]
    fn test_check_attributes_rejects_empty() {
        let res = check_attributes(&[]);
        assert!(matches!(res, Err(TreeError::EmptySchema)));
    }

    #[test]
    fn test_check_rows_reports_row_length() {
        let rows = vec![
            Row::new(vec!["sunny".into(), Value::Number(70)], Outcome::Yes),
            Row::new(vec!["sunny".into()], Outcome::No),
        ];
        let res = check_rows(&attributes(), &rows);
        assert!(
            matches!(res, Err(TreeError::RowLength { row: 1, expected: 3, got: 2 })),
            "got {res:?}."
        );
    }

    #[test]
    fn test_check_rows_reports_kind_mismatch() {
        let rows = vec![
            Row::new(vec!["sunny".into(), "warm".into()], Outcome::Yes),
        ];
        let res = check_rows(&attributes(), &rows);
        assert!(matches!(res, Err(TreeError::NotNumeric { row: 0, .. })));

        let rows = vec![
            Row::new(vec![Value::Number(3), Value::Number(70)], Outcome::Yes),
        ];
        let res = check_rows(&attributes(), &rows);
        assert!(matches!(res, Err(TreeError::NotCategorical { value: 3, .. })));
    }

    #[test]
    fn test_check_significance() {
        assert!(check_significance(0.05).is_ok());
        assert!(check_significance(0f64).is_err());
        assert!(check_significance(1f64).is_err());
        assert!(check_significance(f64::NAN).is_err());
    }
}
