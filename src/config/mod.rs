// ABOUTME: Configuration management module for classification thresholds and input column names
// ABOUTME: Re-exports the health assessment configuration and the flat-row column mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration module for the grocery health engine
//!
//! - **Intelligence**: threshold tables, whitelist, weights and label cut-offs
//! - **Columns**: names of the flat-row keys holding each classification input

/// Flat-row column-name mapping
pub mod columns;
/// Classifier and combiner configuration
pub mod intelligence;

pub use columns::ColumnMapping;
pub use intelligence::{
    ConfigError, ConsensusConfig, HealthConfig, MixedScoreConfig, NutrientThresholds,
    ProcessingConfig, Threshold, ThresholdTables, TrafficLightConfig,
};
