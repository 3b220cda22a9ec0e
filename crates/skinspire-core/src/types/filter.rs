//! Filter types for dynamic query building.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// SQL `ILIKE` case-insensitive pattern match.
    ILike,
    /// SQL `IN` list membership.
    In,
    /// SQL `IS NULL` check.
    IsNull,
}

/// A typed filter value bound as a SQL parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// A UUID value.
    Uuid(Uuid),
    /// A calendar date.
    Date(NaiveDate),
    /// A timestamp with timezone.
    DateTime(DateTime<Utc>),
    /// A list of string values (for `IN`).
    StringList(Vec<String>),
    /// Null / no value (for `IS NULL`).
    Null,
}

/// A single filter condition on a named column.
///
/// Column names are always taken from a declared entity descriptor, never
/// from raw request input, so they are safe to interpolate into SQL text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCondition {
    /// The column name to filter on.
    pub column: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterCondition {
    /// Create a new filter condition.
    pub fn new(column: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            column: column.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter on a string column.
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Eq, FilterValue::String(value.into()))
    }

    /// Shorthand for a case-insensitive substring match.
    pub fn contains(column: impl Into<String>, term: &str) -> Self {
        Self::new(
            column,
            FilterOp::ILike,
            FilterValue::String(format!("%{term}%")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_wraps_pattern() {
        let cond = FilterCondition::contains("supplier_name", "acme");
        assert_eq!(cond.op, FilterOp::ILike);
        assert_eq!(cond.value, FilterValue::String("%acme%".to_string()));
    }
}
