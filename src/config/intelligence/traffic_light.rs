// ABOUTME: Traffic-light configuration with per-category nutrient thresholds and override tables
// ABOUTME: Default food/drink threshold tables, sodium conversion factor and raw-food category whitelist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Traffic-Light Configuration
//!
//! Thresholds are grams per 100 g for food and per 100 ml for drinks, following
//! the UK front-of-pack labelling scheme.
//!
//! # References
//!
//! - Department of Health (2016). Guide to creating a front of pack (FoP) nutrition
//!   label for pre-packed products sold through retail outlets.

use super::error::ConfigError;
use grocery_core::models::Category;
use serde::{Deserialize, Serialize};

/// Level-2 category names treated as raw or unprocessed foods.
///
/// Stored normalized (lower-case, no diacritics). Some names carry the
/// catalogue's own typos and are listed in both spellings.
pub const DEFAULT_SAFE_LEVEL2_CATEGORIES: &[&str] = &[
    "vacuno",
    "cerdo",
    "pollo",
    "pavo y otras aves",
    "conejo",
    "cordero",
    "manzana y pera",
    "fruta tropical",
    "platanoy uva",
    "platano y uva",
    "citricos",
    "naranja",
    "melon y sandia",
    "melony sandia",
    "otras verduras y hortalizas",
    "otras frutas",
    "carne congelada",
    "arroz",
    "alubias",
    "garbanzos",
    "lentejas y otros",
    "frutos secos",
    "te",
    "hierbas",
    "melocoton",
    "colorante y pimenton",
    "limon",
    "sal y bicarbonato",
    "leche en polvo",
    "leche desnatada",
    "leche entera",
    "leche semidesnatada",
    "verdura",
    "huevos",
    "agua sin gas",
    "pescado congelado",
    "marisco",
    "sepia, pulpo y calamar congelado",
    "agua con gas",
    "otras especias",
    "pimienta",
    "hielo",
    "lechuga",
    "repollo y col",
    "calabacin y pimiento",
    "setas y champinones",
    "pepino y zanahoria",
    "corvina",
    "sardina",
    "trucha",
    "bacalao",
    "lenguado",
    "dorada",
    "lubina",
    "salmon",
    "boqueron",
    "sepia, pulpo y calamar",
    "rodaballo",
];

/// Level-0 category forcing three reds (wine and spirits aisle)
pub const DEFAULT_LEVEL0_FORCED_RED: &str = "bodega";

/// Low/high cut-offs for one nutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Values at or below are green
    pub low: f64,
    /// Values at or above are red
    pub high: f64,
}

impl Threshold {
    /// Create a threshold pair
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low < 0.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{name} thresholds must be finite and non-negative"
            )));
        }
        if self.low >= self.high {
            return Err(ConfigError::InvalidRange(format!(
                "{name} low threshold must be < high threshold"
            )));
        }
        Ok(())
    }
}

/// Thresholds for the four front-of-pack nutrients of one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientThresholds {
    /// Total fat
    pub fat: Threshold,
    /// Saturated fat
    pub sat_fat: Threshold,
    /// Sugars
    pub sugars: Threshold,
    /// Salt
    pub salt: Threshold,
}

impl NutrientThresholds {
    /// Per 100 g table for solid food
    #[must_use]
    pub const fn food() -> Self {
        Self {
            fat: Threshold::new(3.0, 17.5),
            sat_fat: Threshold::new(1.5, 5.0),
            sugars: Threshold::new(5.0, 22.5),
            salt: Threshold::new(0.30, 1.50),
        }
    }

    /// Per 100 ml table for drinks (half of the food values except salt)
    #[must_use]
    pub const fn drink() -> Self {
        Self {
            fat: Threshold::new(1.5, 8.75),
            sat_fat: Threshold::new(0.75, 2.5),
            sugars: Threshold::new(2.5, 11.25),
            salt: Threshold::new(0.30, 1.50),
        }
    }

    fn validate(&self, category: Category) -> Result<(), ConfigError> {
        let name = category.as_str();
        self.fat.validate(&format!("{name}.fat"))?;
        self.sat_fat.validate(&format!("{name}.sat_fat"))?;
        self.sugars.validate(&format!("{name}.sugars"))?;
        self.salt.validate(&format!("{name}.salt"))
    }
}

/// One threshold table per category.
///
/// Both tables are required when `thresholds` is present; a missing table is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTables {
    /// Table for solid food
    pub food: NutrientThresholds,
    /// Table for drinks
    pub drink: NutrientThresholds,
}

impl Default for ThresholdTables {
    fn default() -> Self {
        Self {
            food: NutrientThresholds::food(),
            drink: NutrientThresholds::drink(),
        }
    }
}

impl ThresholdTables {
    /// Table used for a category
    #[must_use]
    pub const fn for_category(&self, category: Category) -> &NutrientThresholds {
        match category {
            Category::Food => &self.food,
            Category::Drink => &self.drink,
        }
    }
}

/// Traffic-Light Classifier Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficLightConfig {
    /// Category used when neither the package-size hint nor the category cell decides
    pub default_category: Category,
    /// Threshold tables per category
    pub thresholds: ThresholdTables,
    /// Salt derived from sodium: `salt = sodium * factor`
    pub sodium_to_salt_factor: f64,
    /// Normalized level-2 names eligible for the raw-food shortcut
    pub safe_level2_categories: Vec<String>,
    /// Normalized level-0 name forcing three reds
    pub level0_forced_red: String,
}

impl Default for TrafficLightConfig {
    fn default() -> Self {
        Self {
            default_category: Category::Food,
            thresholds: ThresholdTables::default(),
            sodium_to_salt_factor: 2.5,
            safe_level2_categories: DEFAULT_SAFE_LEVEL2_CATEGORIES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            level0_forced_red: DEFAULT_LEVEL0_FORCED_RED.to_owned(),
        }
    }
}

impl TrafficLightConfig {
    /// Whether a normalized level-2 name is on the raw-food whitelist
    #[must_use]
    pub fn is_safe_level2(&self, normalized: &str) -> bool {
        self.safe_level2_categories
            .iter()
            .any(|name| name == normalized)
    }

    /// Validate threshold tables and override settings
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold pair is inverted, negative or non-finite,
    /// if the sodium factor is not positive, or if the forced-red name is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.food.validate(Category::Food)?;
        self.thresholds.drink.validate(Category::Drink)?;

        if !self.sodium_to_salt_factor.is_finite() || self.sodium_to_salt_factor <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "sodium_to_salt_factor must be a positive number".to_owned(),
            ));
        }

        if self.level0_forced_red.trim().is_empty() {
            return Err(ConfigError::MissingField("traffic_light.level0_forced_red"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        assert!(TrafficLightConfig::default().validate().is_ok());
    }

    #[test]
    fn test_drink_table_selected_for_drinks() {
        let tables = ThresholdTables::default();
        assert!((tables.for_category(Category::Drink).fat.high - 8.75).abs() < f64::EPSILON);
        assert!((tables.for_category(Category::Food).fat.high - 17.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_threshold_rejected() {
        let mut config = TrafficLightConfig::default();
        config.thresholds.drink.sugars = Threshold::new(11.25, 2.5);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_whitelist_contains_both_catalogue_spellings() {
        let config = TrafficLightConfig::default();
        assert!(config.is_safe_level2("platanoy uva"));
        assert!(config.is_safe_level2("platano y uva"));
        assert!(!config.is_safe_level2("Pollo"));
    }
}
