// src/fetch/mod.rs

use crate::error::LoadError;
use reqwest::blocking::Client;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use tracing::debug;
use url::Url;

/// CSO "Entrants to first year" table, CSV export.
pub const DEFAULT_SOURCE_URL: &str =
    "https://ws.cso.ie/public/api.restful/PxStat.Data.Cube_API.ReadDataset/EDA14/CSV/1.0/en";

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    Path(PathBuf),
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    /// `http`/`https` URLs are fetched over the network, `file://` URLs and
    /// anything else are treated as local paths.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(url) = Url::parse(s) {
            match url.scheme() {
                "http" | "https" => return Ok(Source::Url(url)),
                "file" => {
                    if let Ok(path) = url.to_file_path() {
                        return Ok(Source::Path(path));
                    }
                }
                _ => {}
            }
        }
        Ok(Source::Path(PathBuf::from(s)))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// HTTP timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Retrieve the raw bytes behind `source`.
pub fn fetch_bytes(source: &Source, opts: &FetchOptions) -> Result<Vec<u8>, LoadError> {
    match source {
        Source::Url(url) => download(url, opts),
        Source::Path(path) => read_local(path),
    }
}

fn download(url: &Url, opts: &FetchOptions) -> Result<Vec<u8>, LoadError> {
    let client = Client::builder().timeout(opts.timeout).build()?;
    let resp = client.get(url.as_str()).send()?.error_for_status()?;
    let bytes = resp.bytes()?;
    debug!(url = %url, bytes = bytes.len(), "downloaded");
    Ok(bytes.to_vec())
}

fn read_local(path: &Path) -> Result<Vec<u8>, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read local file");
    Ok(bytes)
}
