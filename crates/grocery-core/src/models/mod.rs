// ABOUTME: Domain model module organisation for the grocery health engine
// ABOUTME: Re-exports nutrient, product, classification and catalogue types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Category tree nodes from the product catalogue
pub mod catalog;
/// Classifier and combiner result types
pub mod classification;
/// Raw and canonical nutrient readings
pub mod nutrition;
/// Per-product classification input
pub mod product;

pub use catalog::{CategoryNode, ProductRef};
pub use classification::{
    Guardrail, MixedLabel, MixedScoreResult, NutrientColors, ProcessingClassification,
    ProcessingLabel, ProcessingTriggers, TrafficLightColor, TrafficLightDecision,
    TrafficLightOverride, TrafficLightResult,
};
pub use nutrition::{
    round_to_hundredths, CanonicalNutrientRecord, NutrientField, RawNutrientReading,
};
pub use product::{Category, ProductClassificationInput};
