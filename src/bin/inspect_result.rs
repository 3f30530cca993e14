use anyhow::{Context, Result};
use arrow::util::pretty::print_batches;
use clap::Parser;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::{fs::File, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Print the contents of a summary Parquet file")]
struct Args {
    /// Parquet file written by `enrolstats`.
    path: PathBuf,

    /// Only print metadata and schema.
    #[arg(long)]
    schema_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1) File-level metadata
    let file = File::open(&args.path).with_context(|| format!("opening {}", args.path.display()))?;
    let reader = SerializedFileReader::new(file)?;
    let meta = reader.metadata().file_metadata();
    println!("=== Parquet File: {} ===", args.path.display());
    println!("Total rows:           {}", meta.num_rows());
    println!("Number of row groups: {}", reader.metadata().num_row_groups());
    println!();

    // 2) Arrow schema
    let file = File::open(&args.path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    println!("=== Columns ===");
    for field in builder.schema().fields() {
        println!("- {:<30} | {:?}", field.name(), field.data_type());
    }
    println!();

    if args.schema_only {
        return Ok(());
    }

    // 3) Rows
    let batches = builder
        .build()?
        .collect::<Result<Vec<_>, _>>()
        .context("reading record batches")?;
    print_batches(&batches)?;

    Ok(())
}
