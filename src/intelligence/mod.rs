// ABOUTME: Classification engines for nutrient consensus, traffic lights, processing and mixed scoring
// ABOUTME: Pure, synchronous functions over one product, configured by immutable tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Intelligence Module
//!
//! The four engines of the health assessment, in pipeline order:
//!
//! - [`consensus`] reconciles several nutrient readings into one record
//! - [`traffic_light`] colors fat, saturated fat, sugars and salt
//! - [`processing`] infers an ultra-processing level from the ingredient list
//! - [`mixed_score`] weights both verdicts into the final label
//!
//! None of them holds state between calls.

/// Consensus resolver over per-image nutrient readings
pub mod consensus;
/// Mixed score combiner and ingredient guardrails
pub mod mixed_score;
/// Ultra-processing text classifier
pub mod processing;
/// Ingredient text canonicalization
pub mod text;
/// Front-of-pack traffic-light classifier
pub mod traffic_light;

pub use consensus::{
    resolve, resolve_with_audit, ConsensusOutcome, FieldResolution, ResolutionBranch,
};
pub use mixed_score::combine;
pub use processing::classify_ingredients;
pub use text::{canonicalize_ingredients, normalize_label};
pub use traffic_light::{classify as classify_traffic_light, resolve_category};
