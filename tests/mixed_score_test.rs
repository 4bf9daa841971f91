// ABOUTME: Integration tests for the mixed score combiner
// ABOUTME: Sub-score weighting, label cut-offs, oil and nut guardrails and the sweetened-drink cap
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use grocery_health::config::{MixedScoreConfig, ProcessingConfig, TrafficLightConfig};
use grocery_health::intelligence::{classify_ingredients, classify_traffic_light, combine};
use grocery_health::models::{
    CanonicalNutrientRecord, Guardrail, MixedLabel, MixedScoreResult, ProductClassificationInput,
};

fn input(
    ingredients: &str,
    category: &str,
    (fat, sat, sugars, salt): (f64, f64, f64, f64),
) -> ProductClassificationInput {
    ProductClassificationInput {
        nutrients: CanonicalNutrientRecord {
            fat_g: Some(fat),
            sat_fat_g: Some(sat),
            sugars_g: Some(sugars),
            salt_g: Some(salt),
            ..CanonicalNutrientRecord::default()
        },
        category: Some(category.to_owned()),
        ..ProductClassificationInput::new("1", ingredients)
    }
}

fn score(input: &ProductClassificationInput, config: &MixedScoreConfig) -> MixedScoreResult {
    let tl = classify_traffic_light(input, &TrafficLightConfig::default());
    let proc = classify_ingredients(&input.ingredients_text, &ProcessingConfig::default());
    combine(input, &tl, &proc, config)
}

const FAT_ONLY_RED: (f64, f64, f64, f64) = (99.9, 1.0, 0.0, 0.0);
const ALL_GREEN: (f64, f64, f64, f64) = (0.1, 0.1, 0.1, 0.01);

#[test]
fn test_all_green_minimal_scores_full_marks() {
    let result = score(
        &input("tomate", "food", ALL_GREEN),
        &MixedScoreConfig::default(),
    );

    assert!((result.score - 100.0).abs() < f64::EPSILON);
    assert_eq!(result.label, MixedLabel::Healthy);
    assert!(result.guardrails.is_empty());
}

#[test]
fn test_fat_red_without_guardrail() {
    let result = score(
        &input("aceite de girasol, sal", "food", FAT_ONLY_RED),
        &MixedScoreConfig::default(),
    );

    assert!(result.guardrails.is_empty());
    assert!((result.nutrition_score - 75.0).abs() < f64::EPSILON);
    assert!((result.score - 85.0).abs() < f64::EPSILON);
}

#[test]
fn test_single_virgin_oil_gets_fat_bonus() {
    let result = score(
        &input("Aceite de oliva virgen extra", "food", FAT_ONLY_RED),
        &MixedScoreConfig::default(),
    );

    assert_eq!(result.guardrails, vec![Guardrail::VirginOil]);
    assert!((result.nutrition_score - 100.0).abs() < f64::EPSILON);
    assert_eq!(result.label, MixedLabel::Healthy);
}

#[test]
fn test_single_ingredient_nuts_get_fat_bonus() {
    let result = score(
        &input("Almendra 100%", "food", FAT_ONLY_RED),
        &MixedScoreConfig::default(),
    );

    assert_eq!(result.guardrails, vec![Guardrail::SingleIngredientNuts]);
    assert!((result.nutrition_score - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_oil_guardrail_needs_fat_to_be_the_only_red() {
    let result = score(
        &input("aceite de oliva virgen extra", "food", (99.9, 14.0, 0.0, 0.0)),
        &MixedScoreConfig::default(),
    );

    assert!(result.guardrails.is_empty());
}

#[test]
fn test_sweetened_drink_is_capped_to_review() {
    let product = input("agua, aspartamo", "drink", ALL_GREEN);
    let config = MixedScoreConfig::default();
    let result = score(&product, &config);

    assert!(result.class_capped());
    assert!((result.nutrition_score - 80.0).abs() < f64::EPSILON);
    assert!((result.processing_score - 50.0).abs() < f64::EPSILON);
    assert!((result.score - 68.0).abs() < 1e-9);
    assert_eq!(result.label, MixedLabel::Review);
}

#[test]
fn test_cap_keeps_label_at_review_even_above_healthy_cut_off() {
    let lenient = MixedScoreConfig {
        healthy_min: 60.0,
        review_min: 40.0,
        ..MixedScoreConfig::default()
    };
    let result = score(&input("agua, sucralosa", "drink", ALL_GREEN), &lenient);

    assert!(result.class_capped());
    assert!(result.score >= lenient.healthy_min);
    assert_eq!(result.label, MixedLabel::Review);
}

#[test]
fn test_sweetener_in_food_is_not_capped() {
    let result = score(
        &input("yogur, aspartamo", "food", ALL_GREEN),
        &MixedScoreConfig::default(),
    );

    assert!(!result.class_capped());
}

#[test]
fn test_all_red_ultra_processed_scores_zero() {
    let result = score(
        &input(
            "jarabe de glucosa, aroma, colorante, E-330, E-471, E-202, E-250",
            "food",
            (40.0, 20.0, 50.0, 3.0),
        ),
        &MixedScoreConfig::default(),
    );

    assert!(result.score.abs() < f64::EPSILON);
    assert_eq!(result.label, MixedLabel::Unhealthy);
}

#[test]
fn test_weights_follow_config() {
    let nutrition_only = MixedScoreConfig {
        weight_nutrition: 1.0,
        weight_processing: 0.0,
        ..MixedScoreConfig::default()
    };
    let result = score(
        &input("aceite de girasol, sal", "food", FAT_ONLY_RED),
        &nutrition_only,
    );

    assert!((result.score - 75.0).abs() < f64::EPSILON);
    assert_eq!(result.label, MixedLabel::Healthy);
}

#[test]
fn test_score_stays_in_range() {
    let config = MixedScoreConfig::default();
    let texts = [
        "",
        "agua",
        "almendra 100%",
        "aceite de oliva virgen extra",
        "agua, aspartamo, acesulfame k, aroma, colorante",
        "harina, grasa vegetal, jarabe de glucosa, E-322, E-471, E-500, E-330",
    ];
    let nutrient_sets = [
        ALL_GREEN,
        FAT_ONLY_RED,
        (5.0, 2.0, 10.0, 0.5),
        (50.0, 30.0, 60.0, 5.0),
    ];

    for text in texts {
        for category in ["food", "drink"] {
            for nutrients in nutrient_sets {
                let result = score(&input(text, category, nutrients), &config);
                assert!(
                    (0.0..=100.0).contains(&result.score),
                    "{text} / {category} scored {}",
                    result.score
                );
            }
        }
    }
}
