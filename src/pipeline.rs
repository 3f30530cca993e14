// src/pipeline.rs

use crate::{
    config::Config,
    error::PipelineError,
    load::load_dataset,
    process::process_first_year_stats,
    schema::normalize_headers,
    timing::timed,
    write::save_outputs,
};
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_in: usize,
    pub periods: usize,
    pub columns: Vec<String>,
    pub csv_path: PathBuf,
    pub parquet_path: PathBuf,
}

/// Load → aggregate → rename → save, stopping at the first failing stage.
///
/// Save failures are logged per format by the persister and do not fail the run.
pub fn run(cfg: &Config) -> Result<RunSummary, PipelineError> {
    let opts = cfg.fetch_options();

    let raw = timed("load_dataset", || load_dataset(&cfg.source, &opts))?;
    let summary = timed("process_first_year_stats", || process_first_year_stats(&raw))?;
    let renamed = timed("rename_header", || normalize_headers(summary))?;

    let (csv_path, parquet_path) = match cfg.output_paths() {
        Ok(paths) => paths,
        Err(e) => {
            warn!("cannot resolve output directory ({}), using current dir", e);
            (PathBuf::from(&cfg.csv_name), PathBuf::from(&cfg.parquet_name))
        }
    };
    if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("could not create {}: {}", dir.display(), e);
        }
    }

    timed("save_outputs", || save_outputs(&renamed, &csv_path, &parquet_path));

    let columns = renamed
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    info!(
        rows_in = raw.num_rows(),
        periods = renamed.num_rows(),
        "run complete"
    );

    Ok(RunSummary {
        rows_in: raw.num_rows(),
        periods: renamed.num_rows(),
        columns,
        csv_path,
        parquet_path,
    })
}
