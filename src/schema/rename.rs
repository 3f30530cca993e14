use crate::error::PipelineError;
use arrow::{
    datatypes::{Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{info, instrument};

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,()]+").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// `" Col(2)"` → `"col_2"`: lowercase, separator runs become one `_`, no trailing `_`.
pub fn normalize_header(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let replaced = SEPARATORS.replace_all(&lowered, "_");
    let collapsed = UNDERSCORES.replace_all(&replaced, "_");
    collapsed.strip_suffix('_').unwrap_or(&collapsed).to_string()
}

/// Rewrite every column name of `batch` with [`normalize_header`].
///
/// Column data is shared, not copied. A batch without columns comes back
/// as it went in.
#[instrument(level = "debug", skip_all, fields(columns = batch.num_columns()))]
pub fn normalize_headers(batch: RecordBatch) -> Result<RecordBatch, PipelineError> {
    if batch.num_columns() == 0 {
        info!("headers renamed successfully (no columns)");
        return Ok(batch);
    }

    let schema = batch.schema();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| f.as_ref().clone().with_name(normalize_header(f.name())))
        .collect();
    let renamed = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    let out = RecordBatch::try_new_with_options(renamed, batch.columns().to_vec(), &options)
        .map_err(|e| {
            let err = PipelineError::Rename(e);
            tracing::error!("{}", err);
            err
        })?;

    info!("headers renamed successfully");
    Ok(out)
}
