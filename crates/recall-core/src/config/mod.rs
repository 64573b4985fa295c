//! Configuration system for recall.
//!
//! All scheduling constants and scoring weights live here rather than as
//! inline magic numbers, so tuning is localized. `PriorityWeights` carries a
//! version so future weight changes do not silently alter score semantics
//! for already-scheduled items.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{RecallError, RecallResult};

/// SM-2 scheduling constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SrsConfig {
    /// Algorithmic floor for the ease factor. Never undercut.
    pub min_ease_factor: f64,
    /// Ease factor assigned to freshly created items.
    pub default_ease_factor: f64,
    /// Interval after the first successful recall following a reset.
    pub first_interval_days: u32,
    /// Interval after the second consecutive successful recall.
    pub second_interval_days: u32,
    /// Interval an item falls back to on a failed recall.
    pub relearn_interval_days: u32,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            min_ease_factor: 1.3,
            default_ease_factor: 2.5,
            first_interval_days: 1,
            second_interval_days: 6,
            relearn_interval_days: 1,
        }
    }
}

impl SrsConfig {
    /// Validate configuration values are in valid ranges.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.min_ease_factor <= 1.0 {
            return Err("min_ease_factor must be greater than 1.0");
        }
        if self.default_ease_factor < self.min_ease_factor {
            return Err("default_ease_factor must not undercut min_ease_factor");
        }
        if self.first_interval_days == 0 || self.second_interval_days == 0 {
            return Err("interval milestones must be at least 1 day");
        }
        if self.relearn_interval_days == 0 {
            return Err("relearn_interval_days must be at least 1 day");
        }
        Ok(())
    }
}

/// Weights and caps for the five priority-score components.
///
/// The score semantics are defined entirely by these values; `version` is
/// bumped whenever a default changes so stored explanations or analytics can
/// be tied to the weight set that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    /// Weight-set version.
    pub version: u32,

    /// Cap for the difficulty component.
    pub difficulty_max: f64,
    /// Score lost per ease-factor point above the floor.
    pub difficulty_slope: f64,
    /// Ease factor at which the difficulty component peaks (the SM-2 floor).
    pub ease_floor: f64,
    /// Ease factor below which an item counts as struggling.
    pub struggling_ease_threshold: f64,

    /// Nominal cap for the efficiency component (pre forgetting boost).
    pub efficiency_max: f64,
    /// Days per expected repetition when computing learning pace.
    pub expected_review_pace_days: f64,
    /// Forgetting-curve boost per (days since review / interval) unit.
    pub forgetting_boost: f64,
    /// Cap for the forgetting-curve multiplier.
    pub forgetting_cap: f64,
    /// Normalized efficiency below which a reasoning string is emitted.
    pub low_efficiency_threshold: f64,

    /// Status-table base scores.
    pub status_new: f64,
    pub status_learning: f64,
    pub status_mastered: f64,
    /// Override for a struggling `learning` item.
    pub status_struggling: f64,
    /// Override for a struggling `mastered` item.
    pub status_regression: f64,

    /// Score per hour overdue inside the grace window.
    pub overdue_hourly_rate: f64,
    /// Length of the linear grace window, in hours.
    pub overdue_grace_hours: i64,
    /// Base score once the grace window is exhausted.
    pub overdue_day_base: f64,
    /// Score per day overdue past the grace window.
    pub overdue_tail_rate: f64,
    /// Cap on the past-grace tail.
    pub overdue_tail_cap: f64,
    /// Hard cap for the overdue component.
    pub overdue_max: f64,

    /// Cap for the interval component.
    pub interval_max: f64,
    /// Interval length (days) at which the component is at half strength.
    pub interval_midpoint_days: f64,
    /// Logistic steepness divisor.
    pub interval_steepness: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self::v1()
    }
}

impl PriorityWeights {
    /// The version-1 weight set.
    pub fn v1() -> Self {
        Self {
            version: 1,
            difficulty_max: 35.0,
            difficulty_slope: 25.0,
            ease_floor: 1.3,
            struggling_ease_threshold: 2.0,
            efficiency_max: 25.0,
            expected_review_pace_days: 7.0,
            forgetting_boost: 0.5,
            forgetting_cap: 2.0,
            low_efficiency_threshold: 0.5,
            status_new: 20.0,
            status_learning: 15.0,
            status_mastered: 5.0,
            status_struggling: 18.0,
            status_regression: 10.0,
            overdue_hourly_rate: 0.5,
            overdue_grace_hours: 24,
            overdue_day_base: 12.0,
            overdue_tail_rate: 2.0,
            overdue_tail_cap: 8.0,
            overdue_max: 20.0,
            interval_max: 15.0,
            interval_midpoint_days: 10.0,
            interval_steepness: 5.0,
        }
    }

    /// Validate configuration values are in valid ranges.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.difficulty_max <= 0.0
            || self.efficiency_max <= 0.0
            || self.overdue_max <= 0.0
            || self.interval_max <= 0.0
        {
            return Err("component caps must be positive");
        }
        if self.ease_floor <= 1.0 {
            return Err("ease_floor must be greater than 1.0");
        }
        if self.forgetting_cap < 1.0 {
            return Err("forgetting_cap must be at least 1.0");
        }
        if self.overdue_grace_hours <= 0 {
            return Err("overdue_grace_hours must be positive");
        }
        if self.interval_steepness <= 0.0 {
            return Err("interval_steepness must be positive");
        }
        if !(0.0..=1.0).contains(&self.low_efficiency_threshold) {
            return Err("low_efficiency_threshold must be between 0.0 and 1.0");
        }
        Ok(())
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// SM-2 scheduling constants.
    pub srs: SrsConfig,
    /// Priority-score weight set.
    pub weights: PriorityWeights,
    /// Upper bound accepted for a session limit.
    pub max_session_limit: usize,
    /// Path to the review item database.
    pub db_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let recall_dir = dirs::home_dir()
            .map(|h| h.join(".recall"))
            .unwrap_or_else(|| PathBuf::from(".recall"));

        Self {
            srs: SrsConfig::default(),
            weights: PriorityWeights::default(),
            max_session_limit: 100,
            db_path: recall_dir.join("items.db"),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> RecallResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| RecallError::Configuration(e.to_string()))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| RecallError::Configuration(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| RecallError::Configuration(e.to_string()))?,
            _ => {
                return Err(RecallError::Configuration(
                    "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("RECALL_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Ok(limit) = std::env::var("RECALL_MAX_SESSION_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.max_session_limit = limit;
            }
        }

        config
    }

    /// Validate all nested configuration sections.
    pub fn validate(&self) -> RecallResult<()> {
        self.srs
            .validate()
            .map_err(|e| RecallError::Configuration(e.to_string()))?;
        self.weights
            .validate()
            .map_err(|e| RecallError::Configuration(e.to_string()))?;
        if self.max_session_limit == 0 {
            return Err(RecallError::Configuration(
                "max_session_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
