use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional list filters. All `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub text_contains: Option<String>,
    pub numeric_minimum: Option<i64>,
    pub boolean_flag_true: Option<bool>,
}

impl FilterCriteria {
    /// True when no criterion would contribute a predicate.
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && self.numeric_minimum.is_none() && self.boolean_flag_true != Some(true)
    }

    pub(crate) fn text(&self) -> Option<&str> {
        self.text_contains.as_deref().filter(|t| !t.is_empty())
    }
}

/// Columns a resource exposes to the three filter predicates.
/// Compile-time constants, so always whitelisted identifiers.
#[derive(Debug, Clone, Copy)]
pub struct FilterColumns {
    pub text: &'static str,
    pub numeric: &'static str,
    pub flag: &'static str,
}

/// Either empty or starting with `WHERE `.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub where_clause: String,
    pub values: Vec<Value>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_empty()
    }
}
