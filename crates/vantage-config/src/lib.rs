//! Configuration for the culling engine.
//!
//! Runtime-configurable settings that persist to disk as RON files, with
//! CLI overrides via clap, forward/backward compatible serialization, and
//! the fail-fast validation the session entry point relies on.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{BudgetConfig, BudgetMetric, CullConfig, RefreshConfig, RefreshMode, SortOrder};
pub use error::ConfigError;
