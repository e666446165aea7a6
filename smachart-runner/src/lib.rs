//! smachart runner — configuration and pipeline orchestration.
//!
//! This crate builds on `smachart-core` to provide:
//! - `PipelineConfig`, loaded from TOML with defaults for every key
//! - `run_pipeline`: fetch, add the SMA, chart, strictly in sequence
//! - `fetch_and_print`: the fetch-only entry point that reports fetch
//!   errors as a message instead of failing

pub mod config;
pub mod pipeline;

pub use config::{ConfigError, PipelineConfig};
pub use pipeline::{fetch_and_print, run_pipeline, PipelineError};
