use serde_json::Value;

/// Ordered bind values for one statement.
///
/// The only way to put a caller value into a query is `push`, which records the
/// value and hands back its `$n` placeholder. Values never enter the SQL text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SqlParams {
    values: Vec<Value>,
}

impl SqlParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
