pub mod error;
pub mod executor;
pub mod field_map;
pub mod models;
pub mod params;
pub mod partial_update;

pub use error::{DatabaseError, SqlBuildError};
pub use executor::{PgExecutor, QueryExecutor};
pub use field_map::{Column, ColumnKind, FieldMapper};
pub use partial_update::{PartialUpdate, PartialUpdateBuilder};
