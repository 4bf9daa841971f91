// ABOUTME: Mixed score combiner weighting the traffic-light and processing verdicts into one score
// ABOUTME: Ingredient guardrails for single-ingredient oils and nuts and for sweetened drinks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Mixed Score Combiner
//!
//! `M = w_n * N + w_p * P` where `N` is the traffic-light points scaled to 0-100
//! and `P` the processing points scaled to 0-100. Guardrails adjust the
//! sub-scores before weighting.

use crate::config::MixedScoreConfig;
use crate::intelligence::text::canonicalize_ingredients;
use grocery_core::models::{
    Category, Guardrail, MixedLabel, MixedScoreResult, ProcessingClassification, ProcessingLabel,
    ProductClassificationInput, TrafficLightColor, TrafficLightResult,
};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum traffic-light points (four nutrients, two points each)
const MAX_NUTRITION_POINTS: f64 = 8.0;

/// Maximum processing points (minimal)
const MAX_PROCESSING_POINTS: f64 = 3.0;

/// Virgin or cold-pressed oil wording
static VIRGIN_OIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(virgen extra|extra virgin|virgen|prensado en frio|cold pressed)\b").ok()
});

/// Explicit single-ingredient marker
static SINGLE_INGREDIENT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(100%\b|solo\b|unico ingrediente|único ingrediente)\b").ok()
});

/// Non-nutritive sweetener stems
static SWEETENER_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(aspartam|acesulfam|sucralos|sacarina|ciclamat|eritritol|xilitol|maltitol|stevia|esteviol)\w*\b",
    )
    .ok()
});

/// Substring markers for single-ingredient nuts
const SINGLE_INGREDIENT_MARKERS: &[&str] =
    &["100%", "solo", "unico ingrediente", "único ingrediente"];

/// Nut and seed keywords
const NUT_KEYWORDS: &[&str] = &[
    "almendra",
    "nuez",
    "avellana",
    "cacahuete",
    "pistacho",
    "anacardo",
    "semilla",
];

/// Points for one traffic-light color; absent counts as amber
#[must_use]
pub const fn color_points(color: Option<TrafficLightColor>) -> u8 {
    match color {
        Some(TrafficLightColor::Green) => 2,
        Some(TrafficLightColor::Amber) | None => 1,
        Some(TrafficLightColor::Red) => 0,
    }
}

/// Points for a processing label
#[must_use]
pub const fn processing_points(label: ProcessingLabel) -> u8 {
    match label {
        ProcessingLabel::UltraProcessed => 0,
        ProcessingLabel::Processed => 2,
        ProcessingLabel::Minimal => 3,
    }
}

/// Nutrition sub-score on a 0-100 scale
#[must_use]
pub fn nutrition_score(tl: &TrafficLightResult) -> f64 {
    let points: u8 = tl.colors.as_array().into_iter().map(color_points).sum();
    100.0 * f64::from(points) / MAX_NUTRITION_POINTS
}

/// Processing sub-score on a 0-100 scale
#[must_use]
pub fn processing_score(proc: &ProcessingClassification) -> f64 {
    100.0 * f64::from(processing_points(proc.label)) / MAX_PROCESSING_POINTS
}

/// Single virgin oil: oil wording, and a single-ingredient marker or no list separator
fn is_single_virgin_oil(ingredients: &str) -> bool {
    let oil = VIRGIN_OIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(ingredients));
    let single = SINGLE_INGREDIENT_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(ingredients))
        || !ingredients.contains(',');
    oil && single
}

/// Single-ingredient nuts or seeds
fn is_single_nut(ingredients: &str) -> bool {
    SINGLE_INGREDIENT_MARKERS
        .iter()
        .any(|marker| ingredients.contains(marker))
        && NUT_KEYWORDS
            .iter()
            .any(|keyword| ingredients.contains(keyword))
}

/// Whether canonical ingredient text names a non-nutritive sweetener
#[must_use]
pub fn mentions_sweetener(ingredients: &str) -> bool {
    SWEETENER_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(ingredients))
}

/// Round to one decimal the way the reference dataset does
fn round_to_tenths(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Combine both verdicts into the mixed score
#[must_use]
pub fn combine(
    input: &ProductClassificationInput,
    tl: &TrafficLightResult,
    proc: &ProcessingClassification,
    config: &MixedScoreConfig,
) -> MixedScoreResult {
    let mut nutrition = nutrition_score(tl);
    let mut processing = processing_score(proc);
    let mut guardrails = Vec::new();

    let ingredients = canonicalize_ingredients(&input.ingredients_text);
    let only_fat_red = tl.only_fat_red();

    if only_fat_red && is_single_virgin_oil(&ingredients) {
        nutrition = (nutrition + config.single_ingredient_bonus).min(100.0);
        guardrails.push(Guardrail::VirginOil);
    }

    if only_fat_red && is_single_nut(&ingredients) {
        nutrition = (nutrition + config.single_ingredient_bonus).min(100.0);
        guardrails.push(Guardrail::SingleIngredientNuts);
    }

    if tl.category == Category::Drink && mentions_sweetener(&ingredients) {
        nutrition = nutrition.min(config.sweetened_drink_nutrition_cap);
        processing = processing.min(config.sweetened_drink_processing_cap);
        guardrails.push(Guardrail::SweetenedDrinkCap);
    }

    let mixed = (config.weight_nutrition * nutrition + config.weight_processing * processing)
        .clamp(0.0, 100.0);

    let mut label = if mixed >= config.healthy_min {
        MixedLabel::Healthy
    } else if mixed >= config.review_min {
        MixedLabel::Review
    } else {
        MixedLabel::Unhealthy
    };

    if label == MixedLabel::Healthy && guardrails.contains(&Guardrail::SweetenedDrinkCap) {
        label = MixedLabel::Review;
    }

    MixedScoreResult {
        score: round_to_tenths(mixed),
        label,
        nutrition_score: nutrition,
        processing_score: processing,
        guardrails,
    }
}
