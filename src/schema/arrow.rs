// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use std::sync::Arc;

/// Trimmed, lowercased column name. A leading UTF-8 BOM is dropped too.
pub fn canonical_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Every loaded column is nullable text; typing happens in the aggregator.
pub fn build_utf8_schema(headers: &[String]) -> SchemaRef {
    let fields: Vec<Field> = headers
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();

    Arc::new(Schema::new(fields))
}

/// Output schema of the aggregator: `year_range`, then counts, then percents.
pub fn build_summary_schema(count_columns: &[String], percent_columns: &[String]) -> SchemaRef {
    let mut fields = Vec::with_capacity(1 + count_columns.len() + percent_columns.len());
    fields.push(Field::new("year_range", DataType::Utf8, false));
    for name in count_columns {
        fields.push(Field::new(name, DataType::Int64, false));
    }
    for name in percent_columns {
        fields.push(Field::new(name, DataType::Float64, false));
    }

    Arc::new(Schema::new(fields))
}
