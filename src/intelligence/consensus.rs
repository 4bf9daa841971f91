// ABOUTME: Consensus resolver reconciling nutrient readings extracted from several label images
// ABOUTME: Per-field consensus within epsilon, mean fallback on disagreement, audit log per field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Consensus Resolver
//!
//! Each nutrient field is resolved independently: no values means absent, values
//! agreeing within epsilon resolve to the shared value, anything else resolves to
//! the arithmetic mean. The function is pure and total over a non-empty slice.

use crate::config::ConsensusConfig;
use grocery_core::errors::{AppError, AppResult};
use grocery_core::models::{CanonicalNutrientRecord, NutrientField, RawNutrientReading};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Which rule resolved a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionBranch {
    /// No reading carried the field
    NoData,
    /// All present values agreed
    Consensus,
    /// Values disagreed and were averaged
    Mean,
}

/// Audit record for one resolved field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResolution {
    /// Field resolved
    pub field: NutrientField,
    /// Rule applied
    pub branch: ResolutionBranch,
    /// Normalized values that took part
    pub inputs: Vec<f64>,
    /// Resolved value at field precision
    pub value: Option<f64>,
}

/// Resolved record plus the per-field audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    /// Resolved nutrient record
    pub record: CanonicalNutrientRecord,
    /// One entry per field, empty when every reading was identical
    pub fields: Vec<FieldResolution>,
    /// True when the identical-readings shortcut returned the first reading
    pub identical_readings: bool,
}

/// Resolve one field from already-normalized readings
#[must_use]
pub fn resolve_field(
    field: NutrientField,
    normalized: &[RawNutrientReading],
    epsilon: f64,
) -> FieldResolution {
    let inputs: Vec<f64> = normalized.iter().filter_map(|r| r.get(field)).collect();

    let Some(&first) = inputs.first() else {
        return FieldResolution {
            field,
            branch: ResolutionBranch::NoData,
            inputs,
            value: None,
        };
    };

    if inputs.iter().all(|v| (v - first).abs() < epsilon) {
        return FieldResolution {
            field,
            branch: ResolutionBranch::Consensus,
            value: Some(field.round_resolved(first)),
            inputs,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = inputs.iter().sum::<f64>() / inputs.len() as f64;
    FieldResolution {
        field,
        branch: ResolutionBranch::Mean,
        value: Some(field.round_resolved(mean)),
        inputs,
    }
}

/// Resolve readings, keeping the per-field audit trail
///
/// # Errors
///
/// Returns `MissingRequiredField` when `readings` is empty
pub fn resolve_with_audit(
    readings: &[RawNutrientReading],
    config: &ConsensusConfig,
) -> AppResult<ConsensusOutcome> {
    let normalized: Vec<RawNutrientReading> =
        readings.iter().map(RawNutrientReading::normalized).collect();

    let Some(first) = normalized.first() else {
        return Err(AppError::missing_field("readings"));
    };

    if normalized.iter().all(|reading| reading == first) {
        info!(
            readings = normalized.len(),
            "All readings identical, using first reading"
        );
        return Ok(ConsensusOutcome {
            record: CanonicalNutrientRecord::from(first.clone()),
            fields: Vec::new(),
            identical_readings: true,
        });
    }

    let mut record = CanonicalNutrientRecord::default();
    let mut fields = Vec::with_capacity(NutrientField::ALL.len());

    for field in NutrientField::ALL {
        let resolution = resolve_field(field, &normalized, config.epsilon);
        let column = field.column();
        match resolution.branch {
            ResolutionBranch::NoData => debug!(field = column, "No data"),
            ResolutionBranch::Consensus => info!(
                field = column,
                value = ?resolution.value,
                "Consensus"
            ),
            ResolutionBranch::Mean => info!(
                field = column,
                values = ?resolution.inputs,
                mean = ?resolution.value,
                "No consensus, using mean"
            ),
        }
        record.set(field, resolution.value);
        fields.push(resolution);
    }

    Ok(ConsensusOutcome {
        record,
        fields,
        identical_readings: false,
    })
}

/// Resolve readings into one canonical record
///
/// # Errors
///
/// Returns `MissingRequiredField` when `readings` is empty; callers filter
/// products without readings upstream
pub fn resolve(
    readings: &[RawNutrientReading],
    config: &ConsensusConfig,
) -> AppResult<CanonicalNutrientRecord> {
    resolve_with_audit(readings, config).map(|outcome| outcome.record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fat(value: f64) -> RawNutrientReading {
        RawNutrientReading {
            fat_g: Some(value),
            ..RawNutrientReading::default()
        }
    }

    #[test]
    fn test_epsilon_comparison_is_against_first_value() {
        let readings = [fat(1.0), fat(1.0), fat(1.01)];
        let resolution = resolve_field(NutrientField::Fat, &readings, 1e-9);
        assert_eq!(resolution.branch, ResolutionBranch::Mean);
        assert_eq!(resolution.value, Some(1.0));
    }

    #[test]
    fn test_absent_values_do_not_count() {
        let readings = [fat(4.0), RawNutrientReading::default()];
        let resolution = resolve_field(NutrientField::Fat, &readings, 1e-9);
        assert_eq!(resolution.branch, ResolutionBranch::Consensus);
        assert_eq!(resolution.inputs, vec![4.0]);
    }
}
