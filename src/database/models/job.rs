use serde::{Deserialize, Serialize};

use crate::database::field_map::{Column, FieldMapper};
use crate::filter::{FilterColumns, FilterCriteria};

/// Fields a client may change on an existing job. `id` and `companyHandle` are fixed.
pub const JOB_UPDATE_FIELDS: FieldMapper = FieldMapper::new(&[
    ("title", Column::text("title")),
    ("salary", Column::integer("salary").nullable()),
    ("equity", Column::numeric("equity").nullable()),
]);

pub const JOB_FILTER_COLUMNS: FilterColumns = FilterColumns {
    text: "title",
    numeric: "salary",
    flag: "equity",
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<f64>,
    #[serde(rename = "companyHandle", alias = "company_handle")]
    pub company_handle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<f64>,
    #[serde(rename = "companyHandle")]
    pub company_handle: String,
}

/// `GET /jobs` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobQuery {
    pub title: Option<String>,
    #[serde(rename = "minSalary")]
    pub min_salary: Option<i64>,
    #[serde(rename = "hasEquity")]
    pub has_equity: Option<bool>,
}

impl From<JobQuery> for FilterCriteria {
    fn from(query: JobQuery) -> Self {
        FilterCriteria {
            text_contains: query.title,
            numeric_minimum: query.min_salary,
            boolean_flag_true: query.has_equity,
        }
    }
}
