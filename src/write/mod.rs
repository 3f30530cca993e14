// src/write/mod.rs

use crate::error::SaveError;
use arrow::{csv::WriterBuilder, record_batch::RecordBatch};
use parquet::{
    arrow::ArrowWriter,
    basic::Compression,
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, instrument};

/// Sibling scratch file: `out/result.csv` → `out/.result.csv.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Write through a temporary file and rename it over `path` once complete.
/// Nothing is left at `path` or the temp path when `write` fails.
fn write_atomically<F>(path: &Path, write: F) -> Result<u64, SaveError>
where
    F: FnOnce(File) -> Result<(), SaveError>,
{
    let tmp = temp_path(path);
    let result = File::create(&tmp)
        .map_err(SaveError::from)
        .and_then(write)
        .and_then(|()| fs::rename(&tmp, path).map_err(SaveError::from));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(fs::metadata(path)?.len())
}

/// Comma-delimited with a header row; no index column.
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<u64, SaveError> {
    write_atomically(path, |file| {
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(batch)?;
        Ok(())
    })
}

/// Snappy-compressed, dictionary-encoded Parquet.
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<u64, SaveError> {
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_dictionary_enabled(true)
        .build();

    write_atomically(path, |file| {
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(batch)?;
        writer.close()?;
        Ok(())
    })
}

/// Write `batch` as CSV and as Parquet.
///
/// The two writes are independent: a failure of one is logged and the other
/// still runs. Nothing is reported back to the caller.
#[instrument(level = "info", skip(batch), fields(rows = batch.num_rows()))]
pub fn save_outputs(batch: &RecordBatch, csv_path: &Path, parquet_path: &Path) {
    match write_csv(batch, csv_path) {
        Ok(bytes) => {
            debug!(bytes, "csv written");
            info!("Data saved to CSV: {}", csv_path.display());
        }
        Err(e) => error!("Error saving CSV to {}: {}", csv_path.display(), e),
    }

    match write_parquet(batch, parquet_path) {
        Ok(bytes) => {
            debug!(bytes, "parquet written");
            info!("Data saved to Parquet: {}", parquet_path.display());
        }
        Err(e) => error!("Error saving Parquet to {}: {}", parquet_path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;
    use tracing_subscriber::fmt::MakeWriter;

    fn summary() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("year_range", DataType::Utf8, false),
            Field::new("male_count", DataType::Int64, false),
            Field::new("male_percent", DataType::Float64, false),
        ]));
        let cols: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["2010-2014", "2015-2019"])),
            Arc::new(Int64Array::from(vec![100, 250])),
            Arc::new(Float64Array::from(vec![50.5, 49.2])),
        ];
        RecordBatch::try_new(schema, cols).unwrap()
    }

    /// Log sink shared between the subscriber and the test body.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn writes_both_formats() -> Result<()> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("result.csv");
        let pq_path = dir.path().join("result.parquet");

        save_outputs(&summary(), &csv_path, &pq_path);

        let csv = fs::read_to_string(&csv_path)?;
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("year_range,male_count,male_percent"));
        assert_eq!(lines.next(), Some("2010-2014,100,50.5"));
        assert_eq!(lines.next(), Some("2015-2019,250,49.2"));

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&pq_path)?)?.build()?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 2);
        assert_eq!(batches[0].schema().fields().len(), 3);

        // no scratch files left behind
        let leftovers = fs::read_dir(dir.path())?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
        Ok(())
    }

    #[test]
    fn unwritable_csv_still_writes_parquet() -> Result<()> {
        let dir = tempdir()?;
        let bad_csv = dir.path().join("nonexistent_dir").join("file.csv");
        let pq_path = dir.path().join("file.parquet");

        let logs = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            save_outputs(&summary(), &bad_csv, &pq_path);
        });

        assert!(!bad_csv.exists());
        assert!(pq_path.exists());
        assert!(logs.contents().to_lowercase().contains("error saving csv"));
        assert!(!logs.contents().to_lowercase().contains("error saving parquet"));
        Ok(())
    }

    #[test]
    fn unwritable_parquet_still_writes_csv() -> Result<()> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("file.csv");
        let bad_pq = dir.path().join("missing").join("file.parquet");

        save_outputs(&summary(), &csv_path, &bad_pq);

        assert!(csv_path.exists());
        assert!(!bad_pq.exists());
        Ok(())
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("/out/result.csv")),
            PathBuf::from("/out/.result.csv.tmp")
        );
    }
}
