use crate::database::params::SqlParams;

use super::types::{FilterColumns, FilterCriteria, WhereClause};

pub struct FilterQueryBuilder;

impl FilterQueryBuilder {
    /// AND together whichever criteria are present.
    ///
    /// Never fails. With no criteria the clause is empty; callers that want the
    /// unfiltered listing should branch on `FilterCriteria::is_empty` themselves.
    pub fn build(criteria: &FilterCriteria, columns: &FilterColumns) -> WhereClause {
        let mut params = SqlParams::new();
        let mut conditions = vec![];

        if let Some(text) = criteria.text() {
            let placeholder = params.push(format!("%{}%", escape_like(text)));
            conditions.push(format!("{} ILIKE {}", columns.text, placeholder));
        }
        if let Some(minimum) = criteria.numeric_minimum {
            let placeholder = params.push(minimum);
            conditions.push(format!("{} >= {}", columns.numeric, placeholder));
        }
        if criteria.boolean_flag_true == Some(true) {
            conditions.push(format!("{} > 0", columns.flag));
        }

        if conditions.is_empty() {
            return WhereClause::default();
        }

        WhereClause {
            where_clause: format!("WHERE {}", conditions.join(" AND ")),
            values: params.into_values(),
        }
    }
}

/// Escape LIKE metacharacters so caller text only matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
