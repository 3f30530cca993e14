use std::time::{Duration, Instant};
use tracing::info;

/// Run `f`, log how long it took under `stage`, and pass its output through.
pub fn timed<T>(stage: &str, f: impl FnOnce() -> T) -> T {
    let (out, elapsed) = measure(f);
    info!(stage, elapsed = ?elapsed, "{} took {:.4} seconds", stage, elapsed.as_secs_f64());
    out
}

pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}
