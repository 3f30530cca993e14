// src/process/pivot.rs

use crate::{
    error::TransformError,
    process::utils::{round_count, round_one_decimal, year_range_label},
    schema::arrow::build_summary_schema,
};
use arrow::{
    array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder},
    record_batch::RecordBatch,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Running sum and row count for one (period, sex) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Cell {
    sum: f64,
    n: u64,
}

impl Cell {
    fn add(&mut self, v: f64) {
        self.sum += v;
        self.n += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.n as f64
    }
}

/// Long-form aggregate: period start → sex → cell. Both levels stay sorted.
#[derive(Debug, Default)]
pub struct Grouped {
    cells: BTreeMap<i64, BTreeMap<String, Cell>>,
    sexes: BTreeSet<String>,
}

impl Grouped {
    pub fn push(&mut self, group: i64, sex: &str, value: f64) {
        if !self.sexes.contains(sex) {
            self.sexes.insert(sex.to_string());
        }
        self.cells
            .entry(group)
            .or_default()
            .entry(sex.to_string())
            .or_default()
            .add(value);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn periods(&self) -> impl Iterator<Item = i64> + '_ {
        self.cells.keys().copied()
    }

    fn sum(&self, group: i64, sex: &str) -> Option<f64> {
        self.cells.get(&group)?.get(sex).map(|c| c.sum)
    }

    fn mean(&self, group: i64, sex: &str) -> Option<f64> {
        self.cells.get(&group)?.get(sex).map(Cell::mean)
    }
}

/// Wide counts: one row per period, one integer column per sex.
///
/// Every cell must be filled with a finite sum that fits an `i64`; a sex seen
/// in some period but not another has no integer representation.
pub fn pivot_counts(counts: &Grouped) -> Result<BTreeMap<i64, Vec<i64>>, TransformError> {
    let mut wide = BTreeMap::new();
    for group in counts.periods() {
        let row = counts
            .sexes
            .iter()
            .map(|sex| {
                let sum = counts
                    .sum(group, sex)
                    .ok_or_else(|| TransformError::MissingCount {
                        year_range: year_range_label(group),
                        column: format!("{}_count", sex),
                    })?;
                round_count(sum).ok_or_else(|| TransformError::InvalidCount {
                    year_range: year_range_label(group),
                    column: format!("{}_count", sex),
                    sum,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        wide.insert(group, row);
    }
    Ok(wide)
}

/// Wide percentages: mean per cell, gaps filled with 0.0, one decimal place.
pub fn pivot_percents(percents: &Grouped) -> BTreeMap<i64, Vec<f64>> {
    percents
        .periods()
        .map(|group| {
            let row = percents
                .sexes
                .iter()
                .map(|sex| round_one_decimal(percents.mean(group, sex).unwrap_or(0.0)))
                .collect();
            (group, row)
        })
        .collect()
}

/// Inner join of the two pivots on period, as an Arrow table.
pub fn join_summary(counts: &Grouped, percents: &Grouped) -> Result<RecordBatch, TransformError> {
    let count_wide = pivot_counts(counts)?;
    let percent_wide = pivot_percents(percents);

    let count_columns: Vec<String> = counts.sexes.iter().map(|s| format!("{}_count", s)).collect();
    let percent_columns: Vec<String> = percents
        .sexes
        .iter()
        .map(|s| format!("{}_percent", s))
        .collect();

    let mut year_range = StringBuilder::new();
    let mut count_builders: Vec<Int64Builder> =
        count_columns.iter().map(|_| Int64Builder::new()).collect();
    let mut percent_builders: Vec<Float64Builder> =
        percent_columns.iter().map(|_| Float64Builder::new()).collect();

    for (group, count_row) in &count_wide {
        let Some(percent_row) = percent_wide.get(group) else {
            continue;
        };
        year_range.append_value(year_range_label(*group));
        for (b, v) in count_builders.iter_mut().zip(count_row) {
            b.append_value(*v);
        }
        for (b, v) in percent_builders.iter_mut().zip(percent_row) {
            b.append_value(*v);
        }
    }

    let mut columns: Vec<ArrayRef> =
        Vec::with_capacity(1 + count_columns.len() + percent_columns.len());
    columns.push(Arc::new(year_range.finish()));
    columns.extend(count_builders.iter_mut().map(|b| Arc::new(b.finish()) as ArrayRef));
    columns.extend(percent_builders.iter_mut().map(|b| Arc::new(b.finish()) as ArrayRef));

    let schema = build_summary_schema(&count_columns, &percent_columns);
    Ok(RecordBatch::try_new(schema, columns)?)
}
