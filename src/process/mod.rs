// src/process/mod.rs
pub mod convert;
pub mod filter;
pub mod pivot;
pub mod utils;

use crate::error::{PipelineError, TransformError};
use arrow::{array::Array, record_batch::RecordBatch};
use convert::InputColumns;
use filter::{is_first_year, normalize_sex, UnitKind};
use pivot::{join_summary, Grouped};
use tracing::{debug, error, info, instrument};
use utils::{coerce_value, parse_year, year_group};

/// Summarize "first year" rows into five-year periods split by sex.
///
/// Counts (`unit == number`) are summed, percentages (`%`/`percentage`) are
/// averaged, each pivoted to one column per sex, then inner-joined on
/// `year_range`. Periods present on only one side are dropped.
#[instrument(level = "info", skip_all, fields(rows = batch.num_rows()))]
pub fn process_first_year_stats(batch: &RecordBatch) -> Result<RecordBatch, PipelineError> {
    summarize(batch).map_err(|e| {
        let err = PipelineError::from(e);
        error!("{}", err);
        err
    })
}

/// Five-year bucket of every row's year; `None` where the year is null.
/// A year that is present but unusable fails the whole table, whether or not
/// its row describes first-year students.
fn year_groups(cols: &InputColumns) -> Result<Vec<Option<i64>>, TransformError> {
    (0..cols.len())
        .map(|row| {
            if cols.year.is_null(row) {
                return Ok(None);
            }
            let raw = cols.year.value(row);
            parse_year(raw)
                .and_then(year_group)
                .map(Some)
                .ok_or_else(|| TransformError::InvalidYear {
                    row,
                    value: raw.to_string(),
                })
        })
        .collect()
}

fn summarize(batch: &RecordBatch) -> Result<RecordBatch, TransformError> {
    let cols = InputColumns::from_batch(batch)?;
    let groups = year_groups(&cols)?;

    let mut counts = Grouped::default();
    let mut percents = Grouped::default();
    let mut kept = 0usize;

    for (row, group) in groups.into_iter().enumerate() {
        if cols.label.is_null(row) || !is_first_year(cols.label.value(row)) {
            continue;
        }
        kept += 1;

        let group = group.ok_or_else(|| TransformError::InvalidYear {
            row,
            value: String::new(),
        })?;

        // rows without a sex have no group key
        if cols.sex.is_null(row) {
            continue;
        }
        let sex = normalize_sex(cols.sex.value(row));

        let value = coerce_value((!cols.value.is_null(row)).then(|| cols.value.value(row)));

        let kind = if cols.unit.is_null(row) {
            None
        } else {
            UnitKind::classify(cols.unit.value(row))
        };
        match kind {
            Some(UnitKind::Count) => counts.push(group, sex, value),
            Some(UnitKind::Percent) => percents.push(group, sex, value),
            None => {}
        }
    }
    debug!(
        kept,
        counts_empty = counts.is_empty(),
        percents_empty = percents.is_empty(),
        "filtered first-year rows"
    );

    let out = join_summary(&counts, &percents)?;
    info!(
        periods = out.num_rows(),
        columns = out.num_columns(),
        "summarized first-year statistics"
    );
    Ok(out)
}
