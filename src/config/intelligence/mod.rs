// ABOUTME: Health assessment configuration for the traffic-light, processing and mixed-score engines
// ABOUTME: Orchestrates domain-specific configs and provides unified loading, overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Health Assessment Configuration Module
//!
//! Configuration is loaded once, validated, and then shared immutably by every
//! classifier. Loading order is defaults, then an optional JSON file, then
//! `GROCERY_HEALTH_*` environment variables, then validation. Invalid
//! configuration is fatal.
//!
//! # Module Structure
//!
//! - `traffic_light` - Threshold tables, sodium factor and override tables
//! - `processing` - Processing label cut-offs
//! - `mixed_score` - Sub-score weights, label cut-offs and guardrail caps
//! - `consensus` - Reading equality tolerance

pub mod consensus;
pub mod error;
pub mod mixed_score;
pub mod processing;
pub mod traffic_light;

pub use consensus::ConsensusConfig;
pub use error::ConfigError;
pub use mixed_score::MixedScoreConfig;
pub use processing::ProcessingConfig;
pub use traffic_light::{
    NutrientThresholds, Threshold, ThresholdTables, TrafficLightConfig,
    DEFAULT_LEVEL0_FORCED_RED, DEFAULT_SAFE_LEVEL2_CATEGORIES,
};

use super::columns::ColumnMapping;
use crate::intelligence::text::normalize_label;
use grocery_core::models::Category;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static HEALTH_CONFIG: OnceLock<HealthConfig> = OnceLock::new();

/// Separator for list-valued environment variables
const ENV_LIST_SEPARATOR: char = '|';

/// Main health assessment configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Traffic-light classifier settings
    pub traffic_light: TrafficLightConfig,
    /// Processing classifier settings
    pub processing: ProcessingConfig,
    /// Mixed score combiner settings
    pub mixed_score: MixedScoreConfig,
    /// Consensus resolver settings
    pub consensus: ConsensusConfig,
    /// Flat-row column names
    pub columns: ColumnMapping,
}

impl HealthConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        HEALTH_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load health config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        Self::default().finish()
    }

    /// Load configuration from a JSON file, then apply environment overrides
    ///
    /// Sections and fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if environment
    /// variables contain invalid values, or if validation fails
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("Invalid {}: {e}", path.display())))?;
        config.finish()
    }

    /// Overrides, normalization and validation shared by every loader
    fn finish(self) -> Result<Self, ConfigError> {
        let config = self.apply_env_overrides()?.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Normalize the category names used for matching
    fn normalized(mut self) -> Self {
        let traffic_light = &mut self.traffic_light;
        traffic_light.safe_level2_categories = traffic_light
            .safe_level2_categories
            .iter()
            .map(|name| normalize_label(name))
            .filter(|name| !name.is_empty())
            .collect();
        traffic_light.level0_forced_red = normalize_label(&traffic_light.level0_forced_red);
        self
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.traffic_light.validate()?;
        self.processing.validate()?;
        self.mixed_score.validate()?;
        self.consensus.validate()
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Traffic-light overrides
        if let Ok(val) = env::var("GROCERY_HEALTH_DEFAULT_CATEGORY") {
            self.traffic_light.default_category = Category::from_str_lossy(&val)
                .ok_or_else(|| ConfigError::Parse(format!("Invalid category: {val}")))?;
        }
        Self::apply_env_var(
            "GROCERY_HEALTH_SODIUM_TO_SALT",
            &mut self.traffic_light.sodium_to_salt_factor,
        )?;
        Self::apply_env_var(
            "GROCERY_HEALTH_LEVEL0_FORCED_RED",
            &mut self.traffic_light.level0_forced_red,
        )?;
        if let Ok(val) = env::var("GROCERY_HEALTH_SAFE_LEVEL2_CATEGORIES") {
            self.traffic_light.safe_level2_categories = val
                .split(ENV_LIST_SEPARATOR)
                .map(str::to_owned)
                .collect();
        }

        // Processing overrides
        Self::apply_env_var(
            "GROCERY_HEALTH_ULTRA_MIN_SCORE",
            &mut self.processing.ultra_processed_min_score,
        )?;
        Self::apply_env_var(
            "GROCERY_HEALTH_PROCESSED_MIN_SCORE",
            &mut self.processing.processed_min_score,
        )?;

        // Mixed score overrides
        Self::apply_env_var(
            "GROCERY_HEALTH_WEIGHT_NUTRITION",
            &mut self.mixed_score.weight_nutrition,
        )?;
        Self::apply_env_var(
            "GROCERY_HEALTH_WEIGHT_PROCESSING",
            &mut self.mixed_score.weight_processing,
        )?;
        Self::apply_env_var(
            "GROCERY_HEALTH_HEALTHY_MIN",
            &mut self.mixed_score.healthy_min,
        )?;
        Self::apply_env_var("GROCERY_HEALTH_REVIEW_MIN", &mut self.mixed_score.review_min)?;

        // Consensus overrides
        Self::apply_env_var(
            "GROCERY_HEALTH_CONSENSUS_EPSILON",
            &mut self.consensus.epsilon,
        )?;

        Ok(self)
    }
}
