// ABOUTME: Integration tests for the traffic-light classifier
// ABOUTME: Threshold boundaries, category resolution, sodium derivation and override layer precedence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use grocery_health::config::TrafficLightConfig;
use grocery_health::intelligence::{classify_traffic_light, resolve_category};
use grocery_health::models::{
    CanonicalNutrientRecord, Category, ProductClassificationInput, TrafficLightColor,
    TrafficLightDecision, TrafficLightOverride,
};

fn product(fat: f64, sat: f64, sugars: f64, salt: f64) -> ProductClassificationInput {
    ProductClassificationInput {
        nutrients: CanonicalNutrientRecord {
            fat_g: Some(fat),
            sat_fat_g: Some(sat),
            sugars_g: Some(sugars),
            salt_g: Some(salt),
            ..CanonicalNutrientRecord::default()
        },
        ..ProductClassificationInput::new("1", "")
    }
}

fn with_fat(fat: f64) -> ProductClassificationInput {
    ProductClassificationInput {
        nutrients: CanonicalNutrientRecord {
            fat_g: Some(fat),
            ..CanonicalNutrientRecord::default()
        },
        category: Some("food".to_owned()),
        ..ProductClassificationInput::new("1", "")
    }
}

#[test]
fn test_food_fat_boundaries() {
    let config = TrafficLightConfig::default();

    let at_low = classify_traffic_light(&with_fat(3.0), &config);
    assert_eq!(at_low.colors.fat, Some(TrafficLightColor::Green));

    let above_low = classify_traffic_light(&with_fat(3.01), &config);
    assert_eq!(above_low.colors.fat, Some(TrafficLightColor::Amber));

    let at_high = classify_traffic_light(&with_fat(17.5), &config);
    assert_eq!(at_high.colors.fat, Some(TrafficLightColor::Red));
}

#[test]
fn test_drink_thresholds_apply_to_drinks() {
    let config = TrafficLightConfig::default();
    let mut input = with_fat(3.0);
    input.category = Some("drink".to_owned());

    let result = classify_traffic_light(&input, &config);
    assert_eq!(result.category, Category::Drink);
    assert_eq!(result.colors.fat, Some(TrafficLightColor::Amber));
}

#[test]
fn test_decision_counts() {
    let config = TrafficLightConfig::default();

    let healthy = classify_traffic_light(&product(1.0, 0.5, 2.0, 0.1), &config);
    assert_eq!(healthy.green_count, 4);
    assert_eq!(healthy.decision, TrafficLightDecision::Healthy);

    let unhealthy = classify_traffic_light(&product(20.0, 6.0, 2.0, 0.1), &config);
    assert_eq!(unhealthy.red_count, 2);
    assert_eq!(unhealthy.decision, TrafficLightDecision::Unhealthy);

    let review = classify_traffic_light(&product(20.0, 0.5, 2.0, 0.1), &config);
    assert_eq!(review.red_count, 1);
    assert_eq!(review.green_count, 3);
    assert_eq!(review.decision, TrafficLightDecision::Review);
}

#[test]
fn test_absent_nutrients_are_not_counted() {
    let config = TrafficLightConfig::default();
    let result = classify_traffic_light(&with_fat(1.0), &config);

    assert_eq!(result.colors.sat, None);
    assert_eq!(result.green_count, 1);
    assert_eq!(result.red_count + result.green_count + result.amber_count, 1);
    assert_eq!(result.decision, TrafficLightDecision::Review);
}

#[test]
fn test_salt_derived_from_sodium() {
    let config = TrafficLightConfig::default();
    let mut input = with_fat(1.0);
    input.sodium_g = Some(0.8);

    let result = classify_traffic_light(&input, &config);
    assert!((result.salt_g.unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(result.colors.salt, Some(TrafficLightColor::Red));
}

#[test]
fn test_category_resolution_order() {
    let config = TrafficLightConfig::default();

    let mut input = ProductClassificationInput::new("1", "");
    assert_eq!(resolve_category(&input, &config), Category::Food);

    input.category = Some(" Drink ".to_owned());
    assert_eq!(resolve_category(&input, &config), Category::Drink);

    input.package_size_unit = Some("kg".to_owned());
    assert_eq!(resolve_category(&input, &config), Category::Food);

    input.package_size_unit = Some("ud".to_owned());
    input.category = Some("bebida?".to_owned());
    assert_eq!(resolve_category(&input, &config), Category::Food);

    let drink_default = TrafficLightConfig {
        default_category: Category::Drink,
        ..TrafficLightConfig::default()
    };
    assert_eq!(resolve_category(&input, &drink_default), Category::Drink);
}

#[test]
fn test_bodega_forces_three_reds() {
    let config = TrafficLightConfig::default();
    let mut input = product(0.0, 0.0, 0.0, 0.01);
    input.level0_category = Some("Bodega".to_owned());

    let result = classify_traffic_light(&input, &config);
    assert_eq!(result.colors.fat, Some(TrafficLightColor::Red));
    assert_eq!(result.colors.sat, Some(TrafficLightColor::Red));
    assert_eq!(result.colors.sugars, Some(TrafficLightColor::Red));
    assert_eq!(result.colors.salt, Some(TrafficLightColor::Green));
    assert_eq!(result.decision, TrafficLightDecision::Unhealthy);
    assert_eq!(result.overrides, vec![TrafficLightOverride::Level0ForcedRed]);
}

#[test]
fn test_raw_food_shortcut_without_nutrients() {
    let config = TrafficLightConfig::default();
    let mut input = ProductClassificationInput::new("1", "");
    input.level2_category = Some("Pollo".to_owned());

    let result = classify_traffic_light(&input, &config);
    assert_eq!(result.decision, TrafficLightDecision::Healthy);
    assert_eq!(result.colors.fat, Some(TrafficLightColor::Green));
    assert_eq!(result.colors.salt, None);
    assert_eq!(result.salt_g, None);
    assert_eq!(result.green_count, 3);
    assert_eq!(result.overrides, vec![TrafficLightOverride::RawFoodShortcut]);
}

#[test]
fn test_shortcut_needs_every_nutrient_absent() {
    let config = TrafficLightConfig::default();

    let mut with_sodium = ProductClassificationInput::new("1", "");
    with_sodium.level2_category = Some("Pollo".to_owned());
    with_sodium.sodium_g = Some(0.05);
    let result = classify_traffic_light(&with_sodium, &config);
    assert!(result.overrides.is_empty());
    assert_eq!(result.colors.fat, None);

    let mut not_listed = ProductClassificationInput::new("1", "");
    not_listed.level2_category = Some("Galletas".to_owned());
    let result = classify_traffic_light(&not_listed, &config);
    assert!(result.overrides.is_empty());
    assert_eq!(result.decision, TrafficLightDecision::Review);
}

#[test]
fn test_shortcut_matches_accented_and_listed_names() {
    let config = TrafficLightConfig::default();
    let mut input = ProductClassificationInput::new("1", "");

    input.level2_category = Some("Salmón".to_owned());
    assert_eq!(
        classify_traffic_light(&input, &config).decision,
        TrafficLightDecision::Healthy
    );

    input.level2_category = Some("Galletas|Agua sin gas".to_owned());
    assert_eq!(
        classify_traffic_light(&input, &config).decision,
        TrafficLightDecision::Healthy
    );
}

#[test]
fn test_whitelisted_name_with_comma_matches_whole_cell() {
    let config = TrafficLightConfig::default();
    let mut input = ProductClassificationInput::new("1", "");
    input.level2_category = Some("Sepia, pulpo y calamar".to_owned());

    assert_eq!(
        classify_traffic_light(&input, &config).decision,
        TrafficLightDecision::Healthy
    );
}

#[test]
fn test_forced_red_wins_over_shortcut() {
    let config = TrafficLightConfig::default();
    let mut input = ProductClassificationInput::new("1", "");
    input.level2_category = Some("Agua con gas".to_owned());
    input.level0_category = Some("BODEGA".to_owned());

    let result = classify_traffic_light(&input, &config);
    assert_eq!(result.decision, TrafficLightDecision::Unhealthy);
    assert_eq!(
        result.overrides,
        vec![
            TrafficLightOverride::RawFoodShortcut,
            TrafficLightOverride::Level0ForcedRed
        ]
    );
}
