//! Schema validation rules, checked locally before any request is issued

use thiserror::Error;

/// Title shown with every validation warning
pub const INPUT_ERROR_TITLE: &str = "Input Error";

/// First rule a schema violates. Rules are checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("Table name cannot be empty.")]
    EmptyTableName,

    #[error("At least one field is required.")]
    NoFields,

    /// Zero-based field index; the message uses the 1-based row number
    #[error("Field name in row {} cannot be empty.", .0 + 1)]
    EmptyFieldName(usize),
}

impl SchemaViolation {
    /// 1-based row of the offending field, if the rule concerns a field
    pub fn row(&self) -> Option<usize> {
        match self {
            SchemaViolation::EmptyFieldName(index) => Some(index + 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SchemaViolation::EmptyTableName.to_string(),
            "Table name cannot be empty."
        );
        assert_eq!(
            SchemaViolation::NoFields.to_string(),
            "At least one field is required."
        );
        assert_eq!(
            SchemaViolation::EmptyFieldName(0).to_string(),
            "Field name in row 1 cannot be empty."
        );
        assert_eq!(SchemaViolation::EmptyFieldName(2).row(), Some(3));
        assert_eq!(SchemaViolation::NoFields.row(), None);
    }
}
