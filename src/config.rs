use crate::fetch::{FetchOptions, Source, DEFAULT_SOURCE_URL};
use clap::Parser;
use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Summarize first-year enrolment statistics into five-year periods by sex"
)]
pub struct Config {
    /// URL or local path of the source CSV.
    #[arg(long, env = "ENROLSTATS_SOURCE", default_value = DEFAULT_SOURCE_URL)]
    pub source: Source,

    /// Output directory. Defaults to the directory holding this executable.
    #[arg(long, env = "ENROLSTATS_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    #[arg(long, default_value = "result.csv")]
    pub csv_name: String,

    #[arg(long, default_value = "result.parquet")]
    pub parquet_name: String,

    /// HTTP timeout in seconds; unset waits indefinitely.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// `--out-dir`, or the executable's own directory.
    pub fn resolve_out_dir(&self) -> io::Result<PathBuf> {
        match &self.out_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let exe = std::env::current_exe()?;
                Ok(exe
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")))
            }
        }
    }

    /// Destinations for the CSV and Parquet outputs.
    pub fn output_paths(&self) -> io::Result<(PathBuf, PathBuf)> {
        let dir = self.resolve_out_dir()?;
        Ok((dir.join(&self.csv_name), dir.join(&self.parquet_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_cso_and_exe_dir() {
        let cfg = Config::try_parse_from(["enrolstats"]).unwrap();
        assert!(matches!(cfg.source, Source::Url(ref u) if u.host_str() == Some("ws.cso.ie")));
        assert_eq!(cfg.fetch_options().timeout, None);

        let (csv, parquet) = cfg.output_paths().unwrap();
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(csv, exe_dir.join("result.csv"));
        assert_eq!(parquet, exe_dir.join("result.parquet"));
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "enrolstats",
            "--source",
            "data/eda14.csv",
            "--out-dir",
            "/tmp/out",
            "--csv-name",
            "summary.csv",
            "--timeout-secs",
            "30",
        ])
        .unwrap();

        assert_eq!(cfg.source, Source::Path("data/eda14.csv".into()));
        assert_eq!(cfg.fetch_options().timeout, Some(Duration::from_secs(30)));
        let (csv, parquet) = cfg.output_paths().unwrap();
        assert_eq!(csv, PathBuf::from("/tmp/out/summary.csv"));
        assert_eq!(parquet, PathBuf::from("/tmp/out/result.parquet"));
    }
}
