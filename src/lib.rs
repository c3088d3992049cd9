//! trialtab - Tabulates behavioral-experiment logs into tidy per-trial tables
//!
//! trialtab converts raw experiment logs (newline-delimited JSON, one subject
//! per line) into three CSV tables through a single-pass pipeline:
//! NDJSON parsing → per-subject timeline parsing → dial resampling → CSV output.
//!
//! ## Tables
//!
//! - **performance**: one row per trial reporting selected-object flags
//! - **effort_slider**: one row per trial reporting a self-paced effort rating
//! - **effort_dial**: one row per resampled time step of a trial's dial trace

pub mod error;
pub mod pipeline;
pub mod resampler;
pub mod schema;
pub mod tables;
pub mod timeline;
pub mod writer;

pub use error::TabulateError;
pub use pipeline::{tabulate, tabulate_ndjson};
pub use resampler::{resample, DialConfig};
pub use schema::{DialSample, RecordAdapter, Step, SubjectRecord};
pub use tables::{DialDropout, EffortDialRow, EffortSliderRow, PerformanceRow, TrialTables};
pub use writer::{output_paths, write_tables, OutputPaths};

/// trialtab version embedded in CLI output
pub const TRIALTAB_VERSION: &str = env!("CARGO_PKG_VERSION");
