use serde_json::{Map, Value};

use super::error::SqlBuildError;
use super::field_map::FieldMapper;
use super::params::SqlParams;

/// SET fragment for an UPDATE touching only the supplied columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub set_clause: String,
    pub values: Vec<Value>,
}

impl PartialUpdate {
    /// Placeholder index for whatever the caller appends next (e.g. the WHERE key).
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

pub struct PartialUpdateBuilder;

impl PartialUpdateBuilder {
    /// Build `"col = $1, col2 = $2::integer"` from a sparse record.
    ///
    /// All-or-nothing: one unknown field or ill-typed value rejects the whole
    /// record. Text columns take a bare placeholder; typed columns are cast.
    pub fn build(record: &Map<String, Value>, mapper: &FieldMapper) -> Result<PartialUpdate, SqlBuildError> {
        if record.is_empty() {
            return Err(SqlBuildError::NoData);
        }

        let mut params = SqlParams::new();
        let mut assignments = Vec::with_capacity(record.len());
        for (field, value) in record {
            let column = mapper.resolve_column(field)?;
            column.check(field, value)?;
            let placeholder = params.push(value.clone());
            assignments.push(format!("{} = {}{}", column.name, placeholder, column.kind.cast()));
        }

        Ok(PartialUpdate {
            set_clause: assignments.join(", "),
            values: params.into_values(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::field_map::Column;
    use serde_json::json;

    const MAPPER: FieldMapper = FieldMapper::new(&[
        ("title", Column::text("title")),
        ("firstName", Column::text("first_name")),
        ("numEmployees", Column::integer("num_employees").nullable()),
        ("equity", Column::numeric("equity").nullable()),
    ]);

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_record_is_no_data() {
        assert_eq!(PartialUpdateBuilder::build(&Map::new(), &MAPPER), Err(SqlBuildError::NoData));
    }

    #[test]
    fn single_field() {
        let update = PartialUpdateBuilder::build(&record(json!({"title": "X"})), &MAPPER).unwrap();
        assert_eq!(update.set_clause, "title = $1");
        assert_eq!(update.values, vec![json!("X")]);
        assert_eq!(update.next_placeholder(), 2);
    }

    #[test]
    fn maps_columns_in_insertion_order() {
        let update = PartialUpdateBuilder::build(
            &record(json!({"numEmployees": 12, "firstName": "Aliya", "equity": 0.5})),
            &MAPPER,
        )
        .unwrap();

        assert_eq!(update.set_clause, "num_employees = $1::integer, first_name = $2, equity = $3::numeric");
        assert_eq!(update.values, vec![json!(12), json!("Aliya"), json!(0.5)]);
    }

    #[test]
    fn unknown_field_rejects_whole_record() {
        assert_eq!(
            PartialUpdateBuilder::build(&record(json!({"bogus": 1})), &MAPPER),
            Err(SqlBuildError::UnknownField("bogus".to_string()))
        );
        assert_eq!(
            PartialUpdateBuilder::build(&record(json!({"title": "ok", "isAdmin": true})), &MAPPER),
            Err(SqlBuildError::UnknownField("isAdmin".to_string()))
        );
    }

    #[test]
    fn values_never_reach_sql_text() {
        let hostile = "x'; DROP TABLE jobs; --";
        let update = PartialUpdateBuilder::build(&record(json!({"title": hostile})), &MAPPER).unwrap();
        assert!(!update.set_clause.contains("DROP"));
        assert_eq!(update.values, vec![json!(hostile)]);
    }

    #[test]
    fn null_is_bound_with_a_typed_placeholder() {
        let update = PartialUpdateBuilder::build(&record(json!({"numEmployees": null})), &MAPPER).unwrap();
        assert_eq!(update.set_clause, "num_employees = $1::integer");
        assert_eq!(update.values, vec![Value::Null]);
    }

    #[test]
    fn ill_typed_values_reject_whole_record() {
        assert_eq!(
            PartialUpdateBuilder::build(&record(json!({"title": "ok", "numEmployees": "abc"})), &MAPPER),
            Err(SqlBuildError::InvalidValue { field: "numEmployees".to_string(), expected: "integer" })
        );
        assert_eq!(
            PartialUpdateBuilder::build(&record(json!({"firstName": null})), &MAPPER),
            Err(SqlBuildError::InvalidValue { field: "firstName".to_string(), expected: "non-null value" })
        );
    }
}
