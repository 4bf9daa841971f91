// ABOUTME: Nutrient reading models for per-image extractions and the resolved per-product record
// ABOUTME: RawNutrientReading, CanonicalNutrientRecord, NutrientField and fixed-precision rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// Round to two decimal places the way the reference dataset does.
///
/// Formats the exact binary value with two decimals and parses it back, so ties
/// are broken on the exact stored value (e.g. `2.675` becomes `2.67`).
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Nutrient fields carried by every reading, in canonical column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientField {
    /// Energy in kcal per 100 g/ml (integer precision)
    Energy,
    /// Total fat in grams
    Fat,
    /// Saturated fat in grams
    SaturatedFat,
    /// Carbohydrates in grams
    Carbohydrates,
    /// Sugars in grams
    Sugars,
    /// Protein in grams
    Protein,
    /// Salt in grams
    Salt,
}

impl NutrientField {
    /// All fields in canonical column order
    pub const ALL: [Self; 7] = [
        Self::Energy,
        Self::Fat,
        Self::SaturatedFat,
        Self::Carbohydrates,
        Self::Sugars,
        Self::Protein,
        Self::Salt,
    ];

    /// Output column name for this field
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Energy => "energy_kcal",
            Self::Fat => "fat_g",
            Self::SaturatedFat => "sat_fat_g",
            Self::Carbohydrates => "carbs_g",
            Self::Sugars => "sugars_g",
            Self::Protein => "protein_g",
            Self::Salt => "salt_g",
        }
    }

    /// Whether the field is stored with integer precision
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Energy)
    }

    /// Normalize a raw value before comparison: energy truncates, others round to 2 decimals
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        if self.is_integer() {
            value.trunc()
        } else {
            round_to_hundredths(value)
        }
    }

    /// Round a resolved value (consensus or mean) to the field's stored precision
    #[must_use]
    pub fn round_resolved(self, value: f64) -> f64 {
        if self.is_integer() {
            value.round_ties_even()
        } else {
            round_to_hundredths(value)
        }
    }
}

/// One extraction result for one product image
///
/// Produced by the vision collaborator; consumed only by the consensus resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNutrientReading {
    /// Energy (kcal)
    #[serde(default)]
    pub energy_kcal: Option<i64>,
    /// Total fat (g)
    #[serde(default)]
    pub fat_g: Option<f64>,
    /// Saturated fat (g)
    #[serde(default)]
    pub sat_fat_g: Option<f64>,
    /// Carbohydrates (g)
    #[serde(default)]
    pub carbs_g: Option<f64>,
    /// Sugars (g)
    #[serde(default)]
    pub sugars_g: Option<f64>,
    /// Protein (g)
    #[serde(default)]
    pub protein_g: Option<f64>,
    /// Salt (g)
    #[serde(default)]
    pub salt_g: Option<f64>,
}

impl RawNutrientReading {
    /// Value of one field as `f64`
    #[must_use]
    pub fn get(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::Energy => self.energy_kcal.map(|kcal| kcal as f64),
            NutrientField::Fat => self.fat_g,
            NutrientField::SaturatedFat => self.sat_fat_g,
            NutrientField::Carbohydrates => self.carbs_g,
            NutrientField::Sugars => self.sugars_g,
            NutrientField::Protein => self.protein_g,
            NutrientField::Salt => self.salt_g,
        }
    }

    /// Copy with every present value normalized to its field precision
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm = |field: NutrientField, value: Option<f64>| value.map(|v| field.normalize(v));
        Self {
            energy_kcal: self.energy_kcal,
            fat_g: norm(NutrientField::Fat, self.fat_g),
            sat_fat_g: norm(NutrientField::SaturatedFat, self.sat_fat_g),
            carbs_g: norm(NutrientField::Carbohydrates, self.carbs_g),
            sugars_g: norm(NutrientField::Sugars, self.sugars_g),
            protein_g: norm(NutrientField::Protein, self.protein_g),
            salt_g: norm(NutrientField::Salt, self.salt_g),
        }
    }

    /// True when no field carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        NutrientField::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

/// Fully resolved nutrient record, one per product
///
/// Every field is either a value at its fixed precision or explicitly absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalNutrientRecord {
    /// Energy (kcal)
    pub energy_kcal: Option<i64>,
    /// Total fat (g)
    pub fat_g: Option<f64>,
    /// Saturated fat (g)
    pub sat_fat_g: Option<f64>,
    /// Carbohydrates (g)
    pub carbs_g: Option<f64>,
    /// Sugars (g)
    pub sugars_g: Option<f64>,
    /// Protein (g)
    pub protein_g: Option<f64>,
    /// Salt (g)
    pub salt_g: Option<f64>,
}

impl CanonicalNutrientRecord {
    /// Value of one field as `f64`
    #[must_use]
    pub fn get(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::Energy => self.energy_kcal.map(|kcal| kcal as f64),
            NutrientField::Fat => self.fat_g,
            NutrientField::SaturatedFat => self.sat_fat_g,
            NutrientField::Carbohydrates => self.carbs_g,
            NutrientField::Sugars => self.sugars_g,
            NutrientField::Protein => self.protein_g,
            NutrientField::Salt => self.salt_g,
        }
    }

    /// Store a resolved value, rounding it to the field precision
    pub fn set(&mut self, field: NutrientField, value: Option<f64>) {
        let value = value.map(|v| field.round_resolved(v));
        match field {
            NutrientField::Energy => self.energy_kcal = value.map(|kcal| kcal as i64),
            NutrientField::Fat => self.fat_g = value,
            NutrientField::SaturatedFat => self.sat_fat_g = value,
            NutrientField::Carbohydrates => self.carbs_g = value,
            NutrientField::Sugars => self.sugars_g = value,
            NutrientField::Protein => self.protein_g = value,
            NutrientField::Salt => self.salt_g = value,
        }
    }

    /// True when no field carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        NutrientField::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

impl From<RawNutrientReading> for CanonicalNutrientRecord {
    fn from(reading: RawNutrientReading) -> Self {
        let reading = reading.normalized();
        Self {
            energy_kcal: reading.energy_kcal,
            fat_g: reading.fat_g,
            sat_fat_g: reading.sat_fat_g,
            carbs_g: reading.carbs_g,
            sugars_g: reading.sugars_g,
            protein_g: reading.protein_g,
            salt_g: reading.salt_g,
        }
    }
}

impl From<&CanonicalNutrientRecord> for RawNutrientReading {
    fn from(record: &CanonicalNutrientRecord) -> Self {
        Self {
            energy_kcal: record.energy_kcal,
            fat_g: record.fat_g,
            sat_fat_g: record.sat_fat_g,
            carbs_g: record.carbs_g,
            sugars_g: record.sugars_g,
            protein_g: record.protein_g,
            salt_g: record.salt_g,
        }
    }
}
