use crate::{error::TransformError, schema::canonical_name};
use arrow::{
    array::{Array, StringArray},
    compute::cast,
    datatypes::DataType,
    record_batch::RecordBatch,
};

/// Columns the aggregator reads, cast to text regardless of their input type.
pub struct InputColumns {
    pub label: StringArray,
    pub year: StringArray,
    pub sex: StringArray,
    pub unit: StringArray,
    pub value: StringArray,
}

impl InputColumns {
    pub fn from_batch(batch: &RecordBatch) -> Result<Self, TransformError> {
        Ok(Self {
            label: text_column(batch, "statistic label")?,
            year: text_column(batch, "year")?,
            sex: text_column(batch, "sex")?,
            unit: text_column(batch, "unit")?,
            value: text_column(batch, "value")?,
        })
    }

    pub fn len(&self) -> usize {
        self.label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index of the first column whose canonical name is `name`.
pub fn find_column(batch: &RecordBatch, name: &str) -> Option<usize> {
    batch
        .schema()
        .fields()
        .iter()
        .position(|f| canonical_name(f.name()) == name)
}

/// Column `name` as a `StringArray`, casting numeric columns to their text form.
pub fn text_column(batch: &RecordBatch, name: &str) -> Result<StringArray, TransformError> {
    let idx = find_column(batch, name)
        .ok_or_else(|| TransformError::MissingColumn(name.to_string()))?;
    let arr = batch.column(idx);

    if let Some(sarr) = arr.as_any().downcast_ref::<StringArray>() {
        return Ok(sarr.clone());
    }

    let casted = cast(arr, &DataType::Utf8)?;
    casted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| {
            TransformError::Arrow(arrow::error::ArrowError::CastError(format!(
                "column '{}' could not be read as text",
                name
            )))
        })
}
