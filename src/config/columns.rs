// ABOUTME: Column-name mapping from flat product rows to classification inputs
// ABOUTME: Defaults follow the Spanish column names of the scraped catalogue dataset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use grocery_core::models::NutrientField;
use serde::{Deserialize, Serialize};

/// Names of the flat-row keys holding each classification input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Product identifier
    pub id: String,
    /// Energy (kcal)
    pub energy_kcal: String,
    /// Total fat (g)
    pub fat_g: String,
    /// Saturated fat (g)
    pub sat_fat_g: String,
    /// Carbohydrates (g)
    pub carbs_g: String,
    /// Sugars (g)
    pub sugars_g: String,
    /// Protein (g)
    pub protein_g: String,
    /// Salt (g)
    pub salt_g: String,
    /// Sodium (g)
    pub sodium_g: String,
    /// Explicit food/drink category
    pub category: String,
    /// Package-size unit hint
    pub package_size_unit: String,
    /// Top-level catalogue category name
    pub level0_category: String,
    /// Third-level catalogue category name
    pub level2_category: String,
    /// Free-text ingredient list
    pub ingredients: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id: "id".into(),
            energy_kcal: "valor_energético".into(),
            fat_g: "grasas".into(),
            sat_fat_g: "grasas_saturadas".into(),
            carbs_g: "carbohidratos".into(),
            sugars_g: "azúcares".into(),
            protein_g: "proteinas".into(),
            salt_g: "sal".into(),
            sodium_g: "sodio".into(),
            category: "category".into(),
            package_size_unit: "price_size_format".into(),
            level0_category: "level_0_cat_name".into(),
            level2_category: "level_2_cat_name".into(),
            ingredients: "ingredients".into(),
        }
    }
}

impl ColumnMapping {
    /// Column holding a nutrient field
    #[must_use]
    pub fn nutrient(&self, field: NutrientField) -> &str {
        match field {
            NutrientField::Energy => &self.energy_kcal,
            NutrientField::Fat => &self.fat_g,
            NutrientField::SaturatedFat => &self.sat_fat_g,
            NutrientField::Carbohydrates => &self.carbs_g,
            NutrientField::Sugars => &self.sugars_g,
            NutrientField::Protein => &self.protein_g,
            NutrientField::Salt => &self.salt_g,
        }
    }
}
