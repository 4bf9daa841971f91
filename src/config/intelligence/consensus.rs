// ABOUTME: Consensus resolver configuration
// ABOUTME: Equality tolerance used when deciding whether readings agree on a field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Consensus Resolver Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Readings within this distance of the first one count as equal
    pub epsilon: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self { epsilon: 1e-9 }
    }
}

impl ConsensusConfig {
    /// Validate the tolerance
    ///
    /// # Errors
    ///
    /// Returns an error if epsilon is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "consensus.epsilon must be finite and non-negative".to_owned(),
            ));
        }
        Ok(())
    }
}
