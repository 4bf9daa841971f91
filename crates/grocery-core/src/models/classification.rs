// ABOUTME: Result types for the traffic-light classifier, processing classifier and mixed score
// ABOUTME: Value objects recomputed in full on every classification run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::product::Category;
use serde::{Deserialize, Serialize};

/// Traffic-light color for one nutrient (absence is modelled as `None`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLightColor {
    /// At or below the low threshold
    Green,
    /// Between the thresholds
    Amber,
    /// At or above the high threshold
    Red,
}

impl TrafficLightColor {
    /// Lower-case name as written in output rows
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }
}

/// Colors of the four front-of-pack nutrients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientColors {
    /// Total fat
    pub fat: Option<TrafficLightColor>,
    /// Saturated fat
    pub sat: Option<TrafficLightColor>,
    /// Sugars
    pub sugars: Option<TrafficLightColor>,
    /// Salt
    pub salt: Option<TrafficLightColor>,
}

impl NutrientColors {
    /// Colors in fixed order: fat, saturated fat, sugars, salt
    #[must_use]
    pub const fn as_array(&self) -> [Option<TrafficLightColor>; 4] {
        [self.fat, self.sat, self.sugars, self.salt]
    }

    /// Number of nutrients with the given color
    #[must_use]
    pub fn count(&self, color: TrafficLightColor) -> u8 {
        self.as_array()
            .iter()
            .filter(|c| **c == Some(color))
            .count() as u8
    }

    /// Number of nutrients without a value
    #[must_use]
    pub fn absent_count(&self) -> u8 {
        self.as_array().iter().filter(|c| c.is_none()).count() as u8
    }
}

/// Verdict derived from the color counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLightDecision {
    /// Three or more greens and no red
    Healthy,
    /// Two or more reds
    Unhealthy,
    /// Anything else
    Review,
}

impl TrafficLightDecision {
    /// Decision rule: `reds >= 2` unhealthy, else `greens >= 3 && reds == 0` healthy, else review
    #[must_use]
    pub const fn from_counts(red_count: u8, green_count: u8) -> Self {
        if red_count >= 2 {
            Self::Unhealthy
        } else if green_count >= 3 && red_count == 0 {
            Self::Healthy
        } else {
            Self::Review
        }
    }

    /// Lower-case name as written in output rows
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Review => "review",
        }
    }
}

/// Precedence layer that rewrote the threshold-based result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLightOverride {
    /// No nutrient data and a whitelisted raw-food category
    RawFoodShortcut,
    /// Level-0 category forces three reds (wine and spirits)
    Level0ForcedRed,
}

/// Per-nutrient traffic-light verdict for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLightResult {
    /// Color per nutrient
    pub colors: NutrientColors,
    /// Number of red nutrients
    pub red_count: u8,
    /// Number of green nutrients
    pub green_count: u8,
    /// Number of amber nutrients
    pub amber_count: u8,
    /// Overall verdict
    pub decision: TrafficLightDecision,
    /// Category whose threshold table was used
    pub category: Category,
    /// Salt value used for classification (after sodium derivation)
    pub salt_g: Option<f64>,
    /// Override layers applied on top of the threshold evaluation, in order
    pub overrides: Vec<TrafficLightOverride>,
}

impl TrafficLightResult {
    /// Build a result from colors, deriving counters and decision
    #[must_use]
    pub fn from_colors(colors: NutrientColors, category: Category, salt_g: Option<f64>) -> Self {
        let red_count = colors.count(TrafficLightColor::Red);
        let green_count = colors.count(TrafficLightColor::Green);
        Self {
            colors,
            red_count,
            green_count,
            amber_count: colors.count(TrafficLightColor::Amber),
            decision: TrafficLightDecision::from_counts(red_count, green_count),
            category,
            salt_g,
            overrides: Vec::new(),
        }
    }

    /// True when fat is the only red nutrient and the other three are green
    #[must_use]
    pub fn only_fat_red(&self) -> bool {
        self.colors.fat == Some(TrafficLightColor::Red)
            && self.colors.sat == Some(TrafficLightColor::Green)
            && self.colors.sugars == Some(TrafficLightColor::Green)
            && self.colors.salt == Some(TrafficLightColor::Green)
    }
}

/// Processing level inferred from the ingredient list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingLabel {
    /// Unprocessed or minimally processed (NOVA 1/2)
    Minimal,
    /// Processed (NOVA 3)
    Processed,
    /// Ultra-processed (NOVA 4)
    UltraProcessed,
}

impl ProcessingLabel {
    /// Lower-case name as written in output rows
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Processed => "processed",
            Self::UltraProcessed => "ultra_processed",
        }
    }
}

/// Evidence collected from the canonical ingredient text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingTriggers {
    /// Distinct E-codes, explicit and mapped from additive names, sorted
    pub e_numbers: Vec<String>,
    /// Additive families matched by name (e.g. `E-220..E-228`), sorted
    pub families: Vec<String>,
    /// Literal additive-name matches, sorted
    pub named_additives: Vec<String>,
    /// Technological class words, sorted
    pub classes: Vec<String>,
    /// Sweetener keywords found
    pub sweeteners: Vec<String>,
    /// Cosmetic additive keywords found
    pub cosmetic_additives: Vec<String>,
    /// Industrial ingredient keywords found
    pub industrial_ingredients: Vec<String>,
    /// Culinary preservation keywords found
    pub culinary_processing: Vec<String>,
    /// Whether flavourings are mentioned as a word
    pub mentions_flavourings: bool,
}

/// Ultra-processing classification for one ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingClassification {
    /// Processing level
    pub label: ProcessingLabel,
    /// Additive score (0 when the culinary short-circuit fires)
    pub score: u32,
    /// Full evidence set, regardless of label
    pub triggers: ProcessingTriggers,
}

/// Final combined label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedLabel {
    /// Mixed score at or above the healthy threshold
    Healthy,
    /// Mixed score at or above the review threshold
    Review,
    /// Everything below
    Unhealthy,
}

impl MixedLabel {
    /// Lower-case name as written in output rows
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Review => "review",
            Self::Unhealthy => "unhealthy",
        }
    }
}

/// Ingredient-based adjustment applied by the combiner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guardrail {
    /// Single-ingredient virgin or cold-pressed oil: fat treated as green
    VirginOil,
    /// Single-ingredient nuts or seeds: fat treated as green
    SingleIngredientNuts,
    /// Drink with sweeteners: sub-scores capped and label limited to review
    SweetenedDrinkCap,
}

/// Combined health score for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedScoreResult {
    /// Weighted score in `[0, 100]`, one decimal
    pub score: f64,
    /// Final label
    pub label: MixedLabel,
    /// Nutrition sub-score after guardrails (0-100)
    pub nutrition_score: f64,
    /// Processing sub-score after guardrails (0-100)
    pub processing_score: f64,
    /// Guardrails that fired, in evaluation order
    pub guardrails: Vec<Guardrail>,
}

impl MixedScoreResult {
    /// Whether the sweetened-drink class cap was applied
    #[must_use]
    pub fn class_capped(&self) -> bool {
        self.guardrails.contains(&Guardrail::SweetenedDrinkCap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_rule_precedence() {
        assert_eq!(
            TrafficLightDecision::from_counts(2, 2),
            TrafficLightDecision::Unhealthy
        );
        assert_eq!(
            TrafficLightDecision::from_counts(0, 3),
            TrafficLightDecision::Healthy
        );
        assert_eq!(
            TrafficLightDecision::from_counts(1, 3),
            TrafficLightDecision::Review
        );
        assert_eq!(
            TrafficLightDecision::from_counts(0, 2),
            TrafficLightDecision::Review
        );
    }

    #[test]
    fn test_counters_cover_all_four_nutrients() {
        let colors = NutrientColors {
            fat: Some(TrafficLightColor::Red),
            sat: Some(TrafficLightColor::Amber),
            sugars: Some(TrafficLightColor::Green),
            salt: None,
        };
        let result = TrafficLightResult::from_colors(colors, Category::Food, None);

        assert_eq!(
            result.red_count + result.green_count + result.amber_count + colors.absent_count(),
            4
        );
        assert_eq!(result.decision, TrafficLightDecision::Review);
    }

    #[test]
    fn test_label_serialization_names() {
        assert_eq!(
            serde_json::to_string(&ProcessingLabel::UltraProcessed).unwrap(),
            "\"ultra_processed\""
        );
        assert_eq!(ProcessingLabel::UltraProcessed.as_str(), "ultra_processed");
        assert_eq!(MixedLabel::Review.as_str(), "review");
    }
}
