// ABOUTME: Core types for the grocery health assessment engine
// ABOUTME: Foundation crate with error handling and product, nutrient and classification models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Grocery Core
//!
//! Foundation crate providing shared types for the grocery health engine.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Nutrient readings, product inputs, classification results and the category tree

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (readings, products, classification results, categories)
pub mod models;
