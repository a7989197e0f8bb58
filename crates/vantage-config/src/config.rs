//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use vantage_scene::ObjectKind;

use crate::error::ConfigError;

/// Which cost metric the budget uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetMetric {
    /// Distance/projection culling only, no budgeting.
    None,
    /// Every object costs 1; the limit caps the visible object count.
    Objects,
    /// Mesh vertex counts; instancers cost the recursive sum of their
    /// collection's members.
    Vertices,
    /// Evaluated (post-modifier) triangle counts; the most accurate and the
    /// most expensive metric.
    Triangles,
}

/// Whether cheap or expensive objects are admitted first when budgeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Cheapest objects first: fits the most objects under the budget.
    Ascending,
    /// Costliest objects first: prioritizes heavyweight geometry.
    Descending,
}

/// How frame refreshes are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshMode {
    /// Fire on every delay interval, for smooth review of changing content.
    Continuous,
    /// Fire once after input has been quiet for the delay interval, to
    /// avoid recomputation storms during rapid camera movement.
    Settle,
}

/// Top-level culling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CullConfig {
    /// Maximum distance from the camera at which objects stay visible.
    pub max_distance: f32,
    /// Synthetic box half-extent for objects without a determinable size
    /// (lights, non-instancing empties).
    pub min_box_size: f32,
    /// Omit objects that are members of instanced collections from
    /// evaluation; toggling them directly would affect every instance.
    pub exclude_instanced_members: bool,
    /// Object kinds eligible for show/hide decisions.
    pub enabled_kinds: Vec<ObjectKind>,
    /// Budget settings.
    pub budget: BudgetConfig,
    /// Refresh scheduling settings.
    pub refresh: RefreshConfig,
    /// Log level override (e.g. "debug", "info", "warn").
    pub log_level: String,
}

/// Rendering-cost budget configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BudgetConfig {
    /// Master switch; when off, only distance/projection culling runs.
    pub enabled: bool,
    /// Active cost metric.
    pub metric: BudgetMetric,
    /// Limit when metric is `Objects`.
    pub max_objects: u64,
    /// Limit when metric is `Vertices`.
    pub max_vertices: u64,
    /// Limit when metric is `Triangles`.
    pub max_triangles: u64,
    /// Admission order under the vertex/triangle metrics.
    pub sort_order: SortOrder,
}

/// Refresh scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefreshConfig {
    /// Minimum interval between frames, in seconds.
    pub delay_seconds: f32,
    /// Continuous or settle-triggered refreshes.
    pub mode: RefreshMode,
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            min_box_size: 0.1,
            exclude_instanced_members: true,
            enabled_kinds: vec![
                ObjectKind::Mesh,
                ObjectKind::Curve,
                ObjectKind::Light,
                ObjectKind::Empty,
            ],
            budget: BudgetConfig::default(),
            refresh: RefreshConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            metric: BudgetMetric::Vertices,
            max_objects: 100,
            max_vertices: 1_000_000,
            max_triangles: 300_000,
            sort_order: SortOrder::Ascending,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            delay_seconds: 0.5,
            mode: RefreshMode::Settle,
        }
    }
}

impl BudgetConfig {
    /// The limit for the currently selected metric.
    pub fn limit(&self) -> u64 {
        match self.metric {
            BudgetMetric::None => 0,
            BudgetMetric::Objects => self.max_objects,
            BudgetMetric::Vertices => self.max_vertices,
            BudgetMetric::Triangles => self.max_triangles,
        }
    }
}

// --- Load / Save / Validate ---

impl CullConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: CullConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = CullConfig::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Default config directory (`<platform config dir>/vantage`).
    pub fn default_dir() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("vantage"))
    }

    /// Reject setting combinations the engine cannot run with.
    ///
    /// Session start calls this and fails fast; a bad budget selection is a
    /// configuration bug, not a runtime condition to recover from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        if self.min_box_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_box_size must be positive, got {}",
                self.min_box_size
            )));
        }
        if self.refresh.delay_seconds < 0.0 {
            return Err(ConfigError::Invalid(
                "refresh delay must not be negative".to_string(),
            ));
        }
        if self.enabled_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one object kind must be enabled".to_string(),
            ));
        }
        if self.budget.enabled {
            if self.budget.metric == BudgetMetric::None {
                return Err(ConfigError::Invalid(
                    "budget enabled but metric is None".to_string(),
                ));
            }
            if self.budget.limit() == 0 {
                return Err(ConfigError::Invalid(format!(
                    "budget limit for {:?} must be positive",
                    self.budget.metric
                )));
            }
        }
        Ok(())
    }
}
