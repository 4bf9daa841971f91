// ABOUTME: Per-product classification pipeline and parallel batch driver
// ABOUTME: Resolve readings, run both classifiers, combine, and flatten into an output row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Classification pipeline
//!
//! Within one product the order is fixed: resolve, then the traffic-light and
//! processing classifiers, then the combiner. Products are independent of each
//! other, so [`classify_batch`] fans them out across the rayon pool while keeping
//! the input order.

use crate::catalog::ProductRow;
use crate::config::{ColumnMapping, HealthConfig};
use crate::intelligence::{classify_ingredients, classify_traffic_light, combine, resolve};
use crate::utils::values::reading_from_map;
use grocery_core::errors::AppResult;
use grocery_core::models::{
    MixedScoreResult, NutrientField, ProcessingClassification, ProductClassificationInput,
    RawNutrientReading, TrafficLightColor, TrafficLightResult,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info_span, warn};

/// Row key holding the per-image readings of a product
pub const READINGS_KEY: &str = "readings";

/// One product queued for classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Product data
    pub input: ProductClassificationInput,
    /// Raw readings still to be resolved (empty keeps `input.nutrients`)
    #[serde(default)]
    pub readings: Vec<RawNutrientReading>,
}

impl BatchItem {
    /// Build from a flat row; an optional `readings` array carries per-image readings
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the id column is missing or blank
    pub fn from_row(row: &ProductRow, columns: &ColumnMapping) -> AppResult<Self> {
        let input = row.to_classification_input(columns)?;
        let readings = row
            .get(READINGS_KEY)
            .map(|value| readings_from_value(value, &input.product_id))
            .unwrap_or_default();
        Ok(Self { input, readings })
    }
}

/// Readings from a JSON array of objects keyed by output column names
fn readings_from_value(value: &Value, product_id: &str) -> Vec<RawNutrientReading> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::Object(map) => {
                    Some(reading_from_map(map, NutrientField::column, product_id))
                }
                other => {
                    warn!(product_id, reading = %other, "Ignoring non-object reading");
                    None
                }
            })
            .filter(|reading| !reading.is_empty())
            .collect(),
        other => {
            warn!(product_id, readings = %other, "Readings cell is not an array, ignoring");
            Vec::new()
        }
    }
}

/// Full classification of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReport {
    /// Input with the resolved nutrient record
    pub input: ProductClassificationInput,
    /// Traffic-light verdict
    pub traffic_light: TrafficLightResult,
    /// Processing verdict with evidence
    pub processing: ProcessingClassification,
    /// Combined score
    pub mixed: MixedScoreResult,
}

/// Classify one product.
///
/// Non-empty `readings` are resolved and replace `input.nutrients`; with no
/// readings the input's own record is used as is.
#[must_use]
pub fn classify_product(
    mut input: ProductClassificationInput,
    readings: &[RawNutrientReading],
    config: &HealthConfig,
) -> ProductReport {
    let span = info_span!("product", product_id = %input.product_id);
    let _guard = span.enter();

    if !readings.is_empty() {
        match resolve(readings, &config.consensus) {
            Ok(record) => input.nutrients = record,
            Err(e) => warn!(error = %e, "Could not resolve readings, keeping row values"),
        }
    }

    let traffic_light = classify_traffic_light(&input, &config.traffic_light);
    let processing = classify_ingredients(&input.ingredients_text, &config.processing);
    let mixed = combine(&input, &traffic_light, &processing, &config.mixed_score);

    ProductReport {
        input,
        traffic_light,
        processing,
        mixed,
    }
}

/// Classify a batch in parallel; the output order matches the input order
#[must_use]
pub fn classify_batch(items: Vec<BatchItem>, config: &HealthConfig) -> Vec<ProductReport> {
    items
        .into_par_iter()
        .map(|item| classify_product(item.input, &item.readings, config))
        .collect()
}

/// Flat output row with the persisted column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Product identifier
    pub id: String,
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
    /// Fat color
    pub tl_fat: Option<String>,
    /// Saturated fat color
    pub tl_sat: Option<String>,
    /// Sugars color
    pub tl_sugars: Option<String>,
    /// Salt color
    pub tl_salt: Option<String>,
    /// Number of reds
    pub tl_reds: u8,
    /// Number of greens
    pub tl_greens: u8,
    /// Number of ambers
    pub tl_ambers: u8,
    /// Traffic-light decision
    pub tl_decision: String,
    /// Processing label
    pub nova_label: String,
    /// Processing score
    pub nova_score: u32,
    /// Mixed score
    pub mixed_score: f64,
    /// Mixed label
    pub mixed_label: String,
}

impl From<&ProductReport> for OutputRow {
    fn from(report: &ProductReport) -> Self {
        let nutrients = &report.input.nutrients;
        let tl = &report.traffic_light;
        let color = |c: Option<TrafficLightColor>| c.map(|c| c.as_str().to_owned());

        Self {
            id: report.input.product_id.clone(),
            energy_kcal: nutrients.energy_kcal,
            fat_g: nutrients.fat_g,
            sat_fat_g: nutrients.sat_fat_g,
            carbs_g: nutrients.carbs_g,
            sugars_g: nutrients.sugars_g,
            protein_g: nutrients.protein_g,
            salt_g: nutrients.salt_g,
            tl_fat: color(tl.colors.fat),
            tl_sat: color(tl.colors.sat),
            tl_sugars: color(tl.colors.sugars),
            tl_salt: color(tl.colors.salt),
            tl_reds: tl.red_count,
            tl_greens: tl.green_count,
            tl_ambers: tl.amber_count,
            tl_decision: tl.decision.as_str().to_owned(),
            nova_label: report.processing.label.as_str().to_owned(),
            nova_score: report.processing.score,
            mixed_score: report.mixed.score,
            mixed_label: report.mixed.label.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_readings_cell_tolerates_bad_entries() {
        let value = json!([{"fat_g": "1,5"}, 7, {}]);
        let readings = readings_from_value(&value, "1");
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].fat_g, Some(1.5));

        assert!(readings_from_value(&json!("oops"), "1").is_empty());
    }
}
