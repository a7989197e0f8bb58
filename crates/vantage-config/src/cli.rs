//! Command-line argument parsing for the culling engine's host binaries.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BudgetMetric, CullConfig, RefreshMode, SortOrder};

/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "vantage", about = "Viewport visibility culling engine")]
pub struct CliArgs {
    /// Maximum visible distance from the camera.
    #[arg(long)]
    pub max_distance: Option<f32>,

    /// Enable or disable budgeting.
    #[arg(long)]
    pub budget: Option<bool>,

    /// Budget metric (none, objects, vertices, triangles).
    #[arg(long, value_parser = parse_metric)]
    pub metric: Option<BudgetMetric>,

    /// Budget limit for the selected metric.
    #[arg(long)]
    pub limit: Option<u64>,

    /// Admission order (ascending = cheap first, descending = costly first).
    #[arg(long, value_parser = parse_sort_order)]
    pub sort_order: Option<SortOrder>,

    /// Refresh delay in seconds.
    #[arg(long)]
    pub delay: Option<f32>,

    /// Refresh mode (continuous, settle).
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<RefreshMode>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_metric(s: &str) -> Result<BudgetMetric, String> {
    match s.to_ascii_lowercase().as_str() {
        "none" => Ok(BudgetMetric::None),
        "objects" => Ok(BudgetMetric::Objects),
        "vertices" | "verts" => Ok(BudgetMetric::Vertices),
        "triangles" | "tris" => Ok(BudgetMetric::Triangles),
        other => Err(format!("unknown budget metric: {other}")),
    }
}

fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    match s.to_ascii_lowercase().as_str() {
        "ascending" => Ok(SortOrder::Ascending),
        "descending" => Ok(SortOrder::Descending),
        other => Err(format!("unknown sort order: {other}")),
    }
}

fn parse_mode(s: &str) -> Result<RefreshMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "continuous" => Ok(RefreshMode::Continuous),
        "settle" => Ok(RefreshMode::Settle),
        other => Err(format!("unknown refresh mode: {other}")),
    }
}

impl CullConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(d) = args.max_distance {
            self.max_distance = d;
        }
        if let Some(enabled) = args.budget {
            self.budget.enabled = enabled;
        }
        if let Some(metric) = args.metric {
            self.budget.metric = metric;
        }
        if let Some(limit) = args.limit {
            match self.budget.metric {
                BudgetMetric::Objects => self.budget.max_objects = limit,
                BudgetMetric::Vertices => self.budget.max_vertices = limit,
                BudgetMetric::Triangles => self.budget.max_triangles = limit,
                BudgetMetric::None => {}
            }
        }
        if let Some(order) = args.sort_order {
            self.budget.sort_order = order;
        }
        if let Some(delay) = args.delay {
            self.refresh.delay_seconds = delay;
        }
        if let Some(mode) = args.mode {
            self.refresh.mode = mode;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }
}
