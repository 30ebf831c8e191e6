// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Noise configuration

use serde::{Deserialize, Serialize};

use crate::utility::noise_cache::{NoiseCache, NoiseParams};

/// Gaussian noise settings.
///
/// Without a `seed` each run draws a fresh noise pattern; with one the
/// pattern is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Mean of the noise
    #[serde(default)]
    pub mean: f64,

    /// Variance of the noise
    #[serde(default = "default_variance")]
    pub variance: f64,

    /// Seed of the noise generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_variance() -> f64 {
    0.1
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            mean: 0.0,
            variance: default_variance(),
            seed: None,
        }
    }
}

impl NoiseConfig {
    pub fn params(&self) -> NoiseParams {
        NoiseParams {
            mean: self.mean,
            variance: self.variance,
        }
    }

    /// Empty noise cache seeded as configured
    pub fn cache(&self) -> NoiseCache {
        match self.seed {
            Some(seed) => NoiseCache::with_seed(seed),
            None => NoiseCache::new(),
        }
    }
}
