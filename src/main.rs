use anyhow::Result;
use clap::Parser;
use enrolstats::{pipeline, Config};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let cfg = Config::parse();
    info!(source = %cfg.source, "startup");

    // ─── 3) run the stages ───────────────────────────────────────────
    match pipeline::run(&cfg) {
        Ok(summary) => {
            info!(
                periods = summary.periods,
                csv = %summary.csv_path.display(),
                parquet = %summary.parquet_path.display(),
                "all done"
            );
            Ok(())
        }
        Err(e) => {
            error!("pipeline stopped: {}", e);
            Err(e.into())
        }
    }
}
