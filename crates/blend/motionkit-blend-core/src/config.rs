//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Tunables for weight resolution. Defaults match the editor preview sampler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Added to every 2-D distance before inversion so a child sitting exactly
    /// on the query point still yields a finite raw weight.
    pub distance_epsilon: f32,
    /// Allowed drift of the normalized weight sum away from 1.0.
    pub normalization_tolerance: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            distance_epsilon: 0.001,
            normalization_tolerance: 1e-5,
        }
    }
}
