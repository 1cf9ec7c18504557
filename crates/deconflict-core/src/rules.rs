//! Separation rules and engine settings.

use serde::{Deserialize, Serialize};

use crate::error::{DeconflictError, Result};

/// Default minimum separation in meters.
pub const DEFAULT_SAFETY_BUFFER_M: f64 = 50.0;

/// Minimum allowed separation between two aircraft at any instant.
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SafetyBuffer(f64);

impl SafetyBuffer {
    pub fn new(distance: f64) -> Result<Self> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(DeconflictError::InvalidBuffer { value: distance });
        }
        Ok(Self(distance))
    }

    pub fn distance(self) -> f64 {
        self.0
    }

    pub fn squared(self) -> f64 {
        self.0 * self.0
    }
}

impl Default for SafetyBuffer {
    fn default() -> Self {
        Self(DEFAULT_SAFETY_BUFFER_M)
    }
}

impl TryFrom<f64> for SafetyBuffer {
    type Error = DeconflictError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SafetyBuffer> for f64 {
    fn from(buffer: SafetyBuffer) -> f64 {
        buffer.0
    }
}

/// Configuration for a [`crate::service::Deconflictor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineRules {
    /// Minimum separation
    #[serde(default)]
    pub safety_buffer: SafetyBuffer,
    /// Fan pairwise checks out across the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Below this many other missions the checks run sequentially
    #[serde(default = "default_min_parallel_missions")]
    pub min_parallel_missions: usize,
}

fn default_parallel() -> bool {
    true
}

fn default_min_parallel_missions() -> usize {
    4
}

impl Default for EngineRules {
    fn default() -> Self {
        Self {
            safety_buffer: SafetyBuffer::default(),
            parallel: default_parallel(),
            min_parallel_missions: default_min_parallel_missions(),
        }
    }
}

impl EngineRules {
    pub fn with_buffer(safety_buffer: SafetyBuffer) -> Self {
        Self {
            safety_buffer,
            ..Self::default()
        }
    }
}
