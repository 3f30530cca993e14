pub mod arrow;
pub mod rename;

pub use self::arrow::{build_utf8_schema, canonical_name};
pub use rename::{normalize_header, normalize_headers};

use crate::error::PipelineError;
use ::arrow::datatypes::Schema;

/// Columns every input table must carry, compared case-insensitively.
pub const MANDATORY_COLUMNS: [&str; 5] = ["statistic label", "year", "sex", "unit", "value"];

/// Names of the mandatory columns absent from `schema`, in `MANDATORY_COLUMNS` order.
pub fn missing_mandatory_columns(schema: &Schema) -> Vec<String> {
    let present: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| canonical_name(f.name()))
        .collect();

    MANDATORY_COLUMNS
        .iter()
        .filter(|m| !present.iter().any(|p| p == *m))
        .map(|m| m.to_string())
        .collect()
}

pub fn validate_mandatory_columns(schema: &Schema) -> Result<(), PipelineError> {
    let missing = missing_mandatory_columns(schema);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingColumns(missing))
    }
}
