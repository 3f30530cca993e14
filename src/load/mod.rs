// src/load/mod.rs
pub mod raw_table;

pub use raw_table::RawTable;

use crate::{
    error::{LoadError, PipelineError},
    fetch::{fetch_bytes, FetchOptions, Source},
    schema::validate_mandatory_columns,
};
use arrow::record_batch::RecordBatch;
use csv::ReaderBuilder;
use tracing::{error, info, instrument};

/// Parse a comma-delimited document with a header row into an all-Utf8 table.
///
/// Rows with a different field count than the header are a parse error.
pub fn parse_csv(data: &[u8]) -> Result<RecordBatch, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut raw = RawTable {
        headers,
        rows: Vec::new(),
    };
    for record in rdr.records() {
        let record = record?;
        raw.rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(raw.into_record_batch()?)
}

/// Fetch `source`, parse it, and check the mandatory columns are present.
#[instrument(level = "info", skip_all, fields(source = %source))]
pub fn load_dataset(source: &Source, opts: &FetchOptions) -> Result<RecordBatch, PipelineError> {
    let batch = match fetch_bytes(source, opts).and_then(|bytes| parse_csv(&bytes)) {
        Ok(b) => b,
        Err(e) => {
            let err = PipelineError::from(e);
            error!("{}", err);
            return Err(err);
        }
    };
    info!(
        "Dataset loaded successfully with {} rows and {} columns",
        batch.num_rows(),
        batch.num_columns()
    );

    if let Err(err) = validate_mandatory_columns(&batch.schema()) {
        error!("{}", err);
        return Err(err);
    }

    Ok(batch)
}
