// ABOUTME: Ultra-processing classifier configuration with score cut-offs for each label
// ABOUTME: Labels ingredient lists as minimal, processed or ultra-processed from the additive score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Processing Classifier Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Minimum score labelled `ultra_processed`
    pub ultra_processed_min_score: u32,
    /// Minimum score labelled `processed`
    pub processed_min_score: u32,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            ultra_processed_min_score: 3,
            processed_min_score: 1,
        }
    }
}

impl ProcessingConfig {
    /// Validate label cut-offs
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < processed_min_score < ultra_processed_min_score`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processed_min_score == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "processing.processed_min_score must be at least 1".to_owned(),
            ));
        }
        if self.processed_min_score >= self.ultra_processed_min_score {
            return Err(ConfigError::InvalidRange(
                "processing.processed_min_score must be < ultra_processed_min_score".to_owned(),
            ));
        }
        Ok(())
    }
}
