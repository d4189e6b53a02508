use serde_json::Value;

use super::error::SqlBuildError;

/// Storage type of a whitelisted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Numeric,
}

impl ColumnKind {
    /// Cast appended to the placeholder. Bind values only carry JSON types, and a
    /// NULL goes over the wire as text, so non-text columns name their type.
    pub fn cast(self) -> &'static str {
        match self {
            ColumnKind::Text => "",
            ColumnKind::Integer => "::integer",
            ColumnKind::Numeric => "::numeric",
        }
    }

    fn expected(self) -> &'static str {
        match self {
            ColumnKind::Text => "string",
            ColumnKind::Integer => "integer",
            ColumnKind::Numeric => "number",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            ColumnKind::Text => value.is_string(),
            // INTEGER is 32-bit in Postgres
            ColumnKind::Integer => value.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
            ColumnKind::Numeric => value.is_number(),
        }
    }
}

/// One writable column behind a client field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

impl Column {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: ColumnKind::Text, nullable: false }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self { name, kind: ColumnKind::Integer, nullable: false }
    }

    pub const fn numeric(name: &'static str) -> Self {
        Self { name, kind: ColumnKind::Numeric, nullable: false }
    }

    pub const fn nullable(self) -> Self {
        Self { nullable: true, ..self }
    }

    /// Reject a value the column cannot store, naming the client field.
    pub fn check(&self, field: &str, value: &Value) -> Result<(), SqlBuildError> {
        let ok = if value.is_null() { self.nullable } else { self.kind.accepts(value) };
        if ok {
            return Ok(());
        }

        let expected = if value.is_null() { "non-null value" } else { self.kind.expected() };
        Err(SqlBuildError::InvalidValue {
            field: field.to_string(),
            expected,
        })
    }
}

/// Whitelist of client-facing field names and the columns they map to.
///
/// Anything not listed is rejected; field names are never used as SQL
/// identifiers directly.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper {
    columns: &'static [(&'static str, Column)],
}

impl FieldMapper {
    pub const fn new(columns: &'static [(&'static str, Column)]) -> Self {
        Self { columns }
    }

    pub fn resolve_column(&self, field: &str) -> Result<Column, SqlBuildError> {
        self.columns
            .iter()
            .find(|(external, _)| *external == field)
            .map(|(_, column)| *column)
            .ok_or_else(|| SqlBuildError::UnknownField(field.to_string()))
    }
}
