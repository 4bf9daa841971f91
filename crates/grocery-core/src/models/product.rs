// ABOUTME: Per-product classification input combining nutrients, category signals and ingredients
// ABOUTME: Category (food/drink) with lossy parsing of free-text category cells
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::nutrition::CanonicalNutrientRecord;
use serde::{Deserialize, Serialize};

/// Product category selecting the threshold table (per 100 g or per 100 ml)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Solid food, thresholds per 100 g
    #[default]
    Food,
    /// Beverage, thresholds per 100 ml
    Drink,
}

impl Category {
    /// Parse a category cell, returning `None` for anything other than `food`/`drink`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "drink" => Some(Self::Drink),
            _ => None,
        }
    }

    /// Category implied by a package-size unit hint (`l` -> drink, `kg` -> food)
    #[must_use]
    pub fn from_package_size_unit(unit: &str) -> Option<Self> {
        match unit.trim().to_lowercase().as_str() {
            "l" => Some(Self::Drink),
            "kg" => Some(Self::Food),
            _ => None,
        }
    }

    /// Lower-case name as written in output rows
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Drink => "drink",
        }
    }
}

/// Read-only input row consumed by both classifiers and the combiner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductClassificationInput {
    /// Product identifier
    pub product_id: String,
    /// Resolved nutrient values
    #[serde(default)]
    pub nutrients: CanonicalNutrientRecord,
    /// Sodium (g), used to derive salt when salt is absent
    #[serde(default)]
    pub sodium_g: Option<f64>,
    /// Explicit category cell as scraped (may be malformed)
    #[serde(default)]
    pub category: Option<String>,
    /// Package-size unit hint (`l`, `kg`, ...)
    #[serde(default)]
    pub package_size_unit: Option<String>,
    /// Top-level catalogue category name
    #[serde(default)]
    pub level0_category: Option<String>,
    /// Third-level catalogue category name (may list several names)
    #[serde(default)]
    pub level2_category: Option<String>,
    /// Free-text ingredient list, possibly containing markup
    #[serde(default)]
    pub ingredients_text: String,
}

impl ProductClassificationInput {
    /// Create an input with only an identifier and ingredient text
    pub fn new(product_id: impl Into<String>, ingredients_text: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            ingredients_text: ingredients_text.into(),
            ..Self::default()
        }
    }

    /// True when none of the traffic-light inputs (fat, saturated fat, sugars, salt, sodium) is present
    #[must_use]
    pub fn has_no_traffic_light_values(&self) -> bool {
        self.nutrients.fat_g.is_none()
            && self.nutrients.sat_fat_g.is_none()
            && self.nutrients.sugars_g.is_none()
            && self.nutrients.salt_g.is_none()
            && self.sodium_g.is_none()
    }
}
