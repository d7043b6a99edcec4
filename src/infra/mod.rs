//! Infrastructure - configuration, logging and run summaries
//!
//! - `config` - Run settings (TOML loading, defaults, CLI overrides)
//! - `logging` - tracing-subscriber setup
//! - `summary` - Derived ratios of a finished run

pub mod config;
pub mod logging;
pub mod summary;

pub use config::{Config, LogFormat};
pub use summary::Summary;
