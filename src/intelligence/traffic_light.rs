// ABOUTME: Front-of-pack traffic-light classifier for fat, saturated fat, sugars and salt
// ABOUTME: Threshold evaluation followed by ordered override layers (raw-food shortcut, level-0 forced red)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Traffic-Light Classifier
//!
//! A base result is computed from the threshold tables, then each override
//! layer in [`OVERRIDE_LAYERS`] either passes the result through or rewrites it.
//! Later layers win.

use crate::config::{Threshold, TrafficLightConfig};
use crate::intelligence::text::normalize_label;
use grocery_core::models::{
    Category, NutrientColors, ProductClassificationInput, TrafficLightColor, TrafficLightDecision,
    TrafficLightOverride, TrafficLightResult,
};
use tracing::{debug, warn};

/// Separators allowed between several level-2 names in one cell
const LEVEL2_SEPARATORS: [char; 3] = ['|', ';', ','];

/// Rewrite applied on top of the threshold evaluation
pub type OverrideLayer =
    fn(&ProductClassificationInput, &TrafficLightConfig, TrafficLightResult) -> TrafficLightResult;

/// Override layers in precedence order
pub const OVERRIDE_LAYERS: [OverrideLayer; 2] = [raw_food_shortcut, level0_forced_red];

/// Resolve the category: package-size hint, then category cell, then configured default
#[must_use]
pub fn resolve_category(
    input: &ProductClassificationInput,
    config: &TrafficLightConfig,
) -> Category {
    if let Some(category) = input
        .package_size_unit
        .as_deref()
        .and_then(Category::from_package_size_unit)
    {
        return category;
    }

    match input.category.as_deref().map(str::trim) {
        Some(cell) if !cell.is_empty() => Category::from_str_lossy(cell).unwrap_or_else(|| {
            warn!(
                product_id = %input.product_id,
                category = cell,
                default = config.default_category.as_str(),
                "Unrecognised category, using default"
            );
            config.default_category
        }),
        _ => config.default_category,
    }
}

/// Color a value: `<= low` green, `>= high` red, amber in between, `None` when absent
#[must_use]
pub fn color_for(value: Option<f64>, threshold: &Threshold) -> Option<TrafficLightColor> {
    let value = value?;
    if value <= threshold.low {
        Some(TrafficLightColor::Green)
    } else if value >= threshold.high {
        Some(TrafficLightColor::Red)
    } else {
        Some(TrafficLightColor::Amber)
    }
}

/// Salt value used for classification, derived from sodium when salt is absent
#[must_use]
pub fn effective_salt(
    input: &ProductClassificationInput,
    config: &TrafficLightConfig,
) -> Option<f64> {
    input
        .nutrients
        .salt_g
        .or_else(|| input.sodium_g.map(|sodium| sodium * config.sodium_to_salt_factor))
}

/// Threshold-only evaluation, before any override layer
#[must_use]
pub fn evaluate_thresholds(
    input: &ProductClassificationInput,
    config: &TrafficLightConfig,
) -> TrafficLightResult {
    let category = resolve_category(input, config);
    let table = config.thresholds.for_category(category);
    let salt_g = effective_salt(input, config);

    let colors = NutrientColors {
        fat: color_for(input.nutrients.fat_g, &table.fat),
        sat: color_for(input.nutrients.sat_fat_g, &table.sat_fat),
        sugars: color_for(input.nutrients.sugars_g, &table.sugars),
        salt: color_for(salt_g, &table.salt),
    };

    TrafficLightResult::from_colors(colors, category, salt_g)
}

/// Whether any name in a level-2 cell is on the raw-food whitelist
#[must_use]
pub fn is_safe_level2(cell: &str, config: &TrafficLightConfig) -> bool {
    // Whole-cell match first, so whitelisted names containing a comma
    // ("sepia, pulpo y calamar") match here but not in the reference dataset,
    // which always splits the cell
    if config.is_safe_level2(&normalize_label(cell)) {
        return true;
    }
    cell.split(LEVEL2_SEPARATORS)
        .map(normalize_label)
        .any(|part| !part.is_empty() && config.is_safe_level2(&part))
}

/// Raw-food shortcut: no nutrient data and a whitelisted level-2 category
/// yields three greens, absent salt and a healthy decision
#[must_use]
pub fn raw_food_shortcut(
    input: &ProductClassificationInput,
    config: &TrafficLightConfig,
    result: TrafficLightResult,
) -> TrafficLightResult {
    let whitelisted = input
        .level2_category
        .as_deref()
        .is_some_and(|cell| is_safe_level2(cell, config));

    if !input.has_no_traffic_light_values() || !whitelisted {
        return result;
    }

    debug!(product_id = %input.product_id, "Raw-food category without nutrient data");
    let colors = NutrientColors {
        fat: Some(TrafficLightColor::Green),
        sat: Some(TrafficLightColor::Green),
        sugars: Some(TrafficLightColor::Green),
        salt: None,
    };
    let mut overrides = result.overrides;
    overrides.push(TrafficLightOverride::RawFoodShortcut);

    TrafficLightResult {
        overrides,
        ..TrafficLightResult::from_colors(colors, result.category, None)
    }
}

/// Level-0 forced red: fat, saturated fat and sugars red, salt kept, unhealthy
#[must_use]
pub fn level0_forced_red(
    input: &ProductClassificationInput,
    config: &TrafficLightConfig,
    mut result: TrafficLightResult,
) -> TrafficLightResult {
    let forced = input
        .level0_category
        .as_deref()
        .is_some_and(|name| normalize_label(name) == config.level0_forced_red);

    if !forced {
        return result;
    }

    debug!(product_id = %input.product_id, "Level-0 category forces red");
    result.colors.fat = Some(TrafficLightColor::Red);
    result.colors.sat = Some(TrafficLightColor::Red);
    result.colors.sugars = Some(TrafficLightColor::Red);
    result.red_count = 3;
    result.green_count = 0;
    result.amber_count = 0;
    result.decision = TrafficLightDecision::Unhealthy;
    result.overrides.push(TrafficLightOverride::Level0ForcedRed);
    result
}

/// Classify one product
#[must_use]
pub fn classify(
    input: &ProductClassificationInput,
    config: &TrafficLightConfig,
) -> TrafficLightResult {
    let base = evaluate_thresholds(input, config);
    OVERRIDE_LAYERS
        .iter()
        .fold(base, |result, layer| layer(input, config, result))
}
