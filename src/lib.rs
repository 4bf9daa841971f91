// ABOUTME: Main library entry point for the grocery health assessment engine
// ABOUTME: Nutrient consensus, traffic lights, ultra-processing heuristics and mixed scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Grocery Health
//!
//! Scores scraped supermarket products for healthiness from two independent
//! signals: the numeric nutrition panel and the free-text ingredient list.
//!
//! ## Pipeline
//!
//! For each product, in order:
//! 1. **Consensus**: reconcile nutrient readings extracted from several label images
//! 2. **Traffic light**: color fat, saturated fat, sugars and salt against per-100 g/ml thresholds
//! 3. **Processing**: infer an ultra-processing level from additives and keywords
//! 4. **Mixed score**: weight both verdicts into one 0-100 score with ingredient guardrails
//!
//! Products are independent, so batches run in parallel.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use grocery_health::config::HealthConfig;
//! use grocery_health::models::ProductClassificationInput;
//! use grocery_health::pipeline::classify_product;
//!
//! let config = HealthConfig::load().unwrap_or_default();
//! let mut input = ProductClassificationInput::new("4241", "agua, sal");
//! input.level2_category = Some("Agua sin gas".to_owned());
//!
//! let report = classify_product(input, &[], &config);
//! println!("{} -> {}", report.input.product_id, report.mixed.label.as_str());
//! ```

/// Typed catalogue payloads and flat-row conversion
pub mod catalog;

/// Configuration loading, overrides and validation
pub mod config;

/// Vision extraction payloads and reading selection
pub mod extraction;

/// Consensus, traffic-light, processing and mixed-score engines
pub mod intelligence;

/// Logging configuration and subscriber setup
pub mod logging;

/// Per-product pipeline, batch driver and output rows
pub mod pipeline;

/// Value coercion helpers shared by payload readers
pub mod utils;

// Re-export foundation types so downstream users depend on one crate
pub use grocery_core::errors;
pub use grocery_core::models;
