// ABOUTME: Integration tests for the consensus resolver over per-image nutrient readings
// ABOUTME: Covers consensus, mean fallback, normalization, idempotence and the empty-input error
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use grocery_health::config::ConsensusConfig;
use grocery_health::errors::ErrorCode;
use grocery_health::intelligence::{resolve, resolve_with_audit, ResolutionBranch};
use grocery_health::models::{CanonicalNutrientRecord, NutrientField, RawNutrientReading};

fn fat(value: f64) -> RawNutrientReading {
    RawNutrientReading {
        fat_g: Some(value),
        ..RawNutrientReading::default()
    }
}

fn as_reading(record: &CanonicalNutrientRecord) -> RawNutrientReading {
    RawNutrientReading {
        energy_kcal: record.energy_kcal,
        fat_g: record.fat_g,
        sat_fat_g: record.sat_fat_g,
        carbs_g: record.carbs_g,
        sugars_g: record.sugars_g,
        protein_g: record.protein_g,
        salt_g: record.salt_g,
    }
}

#[test]
fn test_agreeing_readings_resolve_to_shared_value() {
    let config = ConsensusConfig::default();
    let record = resolve(&[fat(10.0), fat(10.0), fat(10.0)], &config).unwrap();

    assert_eq!(record.fat_g, Some(10.0));
    assert_eq!(record.sugars_g, None);
}

#[test]
fn test_disagreeing_readings_fall_back_to_mean() {
    let config = ConsensusConfig::default();
    let record = resolve(&[fat(10.0), fat(20.0)], &config).unwrap();

    assert_eq!(record.fat_g, Some(15.0));
}

#[test]
fn test_each_field_resolves_independently() {
    let readings = [
        RawNutrientReading {
            fat_g: Some(10.0),
            sugars_g: Some(1.0),
            ..RawNutrientReading::default()
        },
        RawNutrientReading {
            fat_g: Some(10.0),
            sugars_g: Some(2.0),
            salt_g: Some(0.4),
            ..RawNutrientReading::default()
        },
    ];

    let outcome = resolve_with_audit(&readings, &ConsensusConfig::default()).unwrap();
    assert!(!outcome.identical_readings);
    assert_eq!(outcome.fields.len(), NutrientField::ALL.len());

    let branch = |field: NutrientField| {
        outcome
            .fields
            .iter()
            .find(|resolution| resolution.field == field)
            .map(|resolution| resolution.branch)
            .unwrap()
    };
    assert_eq!(branch(NutrientField::Fat), ResolutionBranch::Consensus);
    assert_eq!(branch(NutrientField::Sugars), ResolutionBranch::Mean);
    assert_eq!(branch(NutrientField::Salt), ResolutionBranch::Consensus);
    assert_eq!(branch(NutrientField::Protein), ResolutionBranch::NoData);

    assert_eq!(outcome.record.fat_g, Some(10.0));
    assert_eq!(outcome.record.sugars_g, Some(1.5));
    assert_eq!(outcome.record.salt_g, Some(0.4));
    assert_eq!(outcome.record.protein_g, None);
}

#[test]
fn test_readings_equal_after_rounding_take_identical_shortcut() {
    let outcome =
        resolve_with_audit(&[fat(10.001), fat(10.004)], &ConsensusConfig::default()).unwrap();

    assert!(outcome.identical_readings);
    assert!(outcome.fields.is_empty());
    assert_eq!(outcome.record.fat_g, Some(10.0));
}

#[test]
fn test_mean_is_rounded_to_field_precision() {
    let config = ConsensusConfig::default();
    let record = resolve(&[fat(10.0), fat(10.0), fat(11.0)], &config).unwrap();
    assert_eq!(record.fat_g, Some(10.33));

    let energy = |kcal| RawNutrientReading {
        energy_kcal: Some(kcal),
        ..RawNutrientReading::default()
    };
    let record = resolve(&[energy(100), energy(101)], &config).unwrap();
    assert_eq!(record.energy_kcal, Some(100));
}

#[test]
fn test_resolving_a_resolved_record_is_a_no_op() {
    let config = ConsensusConfig::default();
    let readings = [
        RawNutrientReading {
            energy_kcal: Some(250),
            fat_g: Some(12.0),
            sugars_g: Some(3.1),
            ..RawNutrientReading::default()
        },
        RawNutrientReading {
            energy_kcal: Some(253),
            fat_g: Some(12.5),
            sugars_g: Some(3.1),
            salt_g: Some(1.07),
            ..RawNutrientReading::default()
        },
        RawNutrientReading {
            energy_kcal: Some(250),
            fat_g: Some(12.0),
            protein_g: Some(7.0),
            ..RawNutrientReading::default()
        },
    ];

    let first = resolve(&readings, &config).unwrap();
    let second = resolve(&[as_reading(&first)], &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_readings_are_rejected() {
    let error = resolve(&[], &ConsensusConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
}
