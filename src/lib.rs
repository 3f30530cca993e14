pub mod config;
pub mod error;
pub mod fetch;
pub mod load;
pub mod pipeline;
pub mod process;
pub mod schema;
pub mod timing;
pub mod write;

pub use config::Config;
pub use error::PipelineError;
pub use pipeline::{run, RunSummary};
