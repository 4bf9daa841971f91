// ABOUTME: Configuration error type raised while loading or validating health configuration
// ABOUTME: ConfigError variants and their conversion into the unified AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use grocery_core::errors::AppError;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `low`/`high` pair or ordered pair of thresholds is inverted
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A required value is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A value (environment variable or file) could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Score weights are out of `[0, 1]` or do not sum to 1.0
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// A scalar is negative, non-finite or outside its accepted interval
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config_invalid(error.to_string()).with_source(error)
    }
}
