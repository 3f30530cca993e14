use crate::schema::build_utf8_schema;
use arrow::{
    array::{ArrayRef, StringArray},
    error::ArrowError,
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

/// A CSV document held as text before it becomes an Arrow table.
#[derive(Debug, Default)]
pub struct RawTable {
    /// Column names, exactly as the header row spells them.
    pub headers: Vec<String>,
    /// Data rows; every row has `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build an all-Utf8 batch. Empty cells become nulls.
    pub fn into_record_batch(self) -> Result<RecordBatch, ArrowError> {
        let schema = build_utf8_schema(&self.headers);
        let num_rows = self.rows.len();

        let columns: Vec<ArrayRef> = (0..self.headers.len())
            .map(|idx| {
                let arr: StringArray = self
                    .rows
                    .iter()
                    .map(|row| row.get(idx).map(String::as_str).filter(|s| !s.is_empty()))
                    .collect();
                Arc::new(arr) as ArrayRef
            })
            .collect();

        let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
        RecordBatch::try_new_with_options(schema, columns, &options)
    }
}
