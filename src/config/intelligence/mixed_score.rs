// ABOUTME: Mixed score combiner configuration with sub-score weights, label cut-offs and guardrail caps
// ABOUTME: Validates weights summing to one and ordered healthy/review thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tolerance when checking that weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Mixed Score Combiner Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixedScoreConfig {
    /// Weight of the nutrition (traffic-light) sub-score
    pub weight_nutrition: f64,
    /// Weight of the processing sub-score
    pub weight_processing: f64,
    /// Minimum mixed score labelled healthy
    pub healthy_min: f64,
    /// Minimum mixed score labelled review
    pub review_min: f64,
    /// Nutrition bonus for single-ingredient oils and nuts (one nutrient out of four)
    pub single_ingredient_bonus: f64,
    /// Nutrition sub-score ceiling for sweetened drinks
    pub sweetened_drink_nutrition_cap: f64,
    /// Processing sub-score ceiling for sweetened drinks
    pub sweetened_drink_processing_cap: f64,
}

impl Default for MixedScoreConfig {
    fn default() -> Self {
        Self {
            weight_nutrition: 0.6,
            weight_processing: 0.4,
            healthy_min: 75.0,
            review_min: 55.0,
            single_ingredient_bonus: 25.0,
            sweetened_drink_nutrition_cap: 80.0,
            sweetened_drink_processing_cap: 50.0,
        }
    }
}

impl MixedScoreConfig {
    /// Validate weights, label cut-offs and caps
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is outside `[0, 1]`, the weights do not sum
    /// to 1.0, the cut-offs are out of order or any score value leaves `[0, 100]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in [
            ("weight_nutrition", self.weight_nutrition),
            ("weight_processing", self.weight_processing),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::InvalidWeights(format!(
                    "mixed_score.{name} must be within [0, 1]"
                )));
            }
        }

        let weight_sum = self.weight_nutrition + self.weight_processing;
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "mixed_score weights must sum to 1.0, got {weight_sum}"
            )));
        }

        for (name, value) in [
            ("healthy_min", self.healthy_min),
            ("review_min", self.review_min),
            ("single_ingredient_bonus", self.single_ingredient_bonus),
            (
                "sweetened_drink_nutrition_cap",
                self.sweetened_drink_nutrition_cap,
            ),
            (
                "sweetened_drink_processing_cap",
                self.sweetened_drink_processing_cap,
            ),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "mixed_score.{name} must be within [0, 100]"
                )));
            }
        }

        if self.review_min >= self.healthy_min {
            return Err(ConfigError::InvalidRange(
                "mixed_score.review_min must be < healthy_min".to_owned(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = MixedScoreConfig {
            weight_nutrition: 0.7,
            ..MixedScoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let config = MixedScoreConfig {
            weight_nutrition: f64::NAN,
            ..MixedScoreConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
