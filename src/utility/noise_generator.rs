// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Gaussian Noise Generator
//!
//! This module provides the sample source behind the noise cache: a seedable
//! pseudo-random generator producing Gaussian white noise with a chosen mean
//! and standard deviation.
//!
//! ## Examples
//!
//! ```rust
//! use rust_harmonics::utility::noise_generator::NoiseGenerator;
//!
//! // Reproducible generator
//! let mut generator = NoiseGenerator::new(12345);
//!
//! // 1000 samples of N(0.0, 0.1²)
//! let samples = generator.generate_gaussian(1000, 0.0, 0.1);
//! assert_eq!(samples.len(), 1000);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Random number generator producing Gaussian noise samples.
///
/// Two generators created with the same seed produce the same sequence.
/// Not suitable for cryptographic purposes.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    rng: StdRng,
}

impl NoiseGenerator {
    /// Creates a new noise generator with a given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_harmonics::utility::noise_generator::NoiseGenerator;
    ///
    /// let mut a = NoiseGenerator::new(7);
    /// let mut b = NoiseGenerator::new(7);
    /// assert_eq!(a.random_gaussian(), b.random_gaussian());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a new noise generator seeded from the operating system.
    ///
    /// Each instance yields a different noise pattern.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Draws one value from the standard normal distribution N(0, 1).
    pub fn random_gaussian(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Generates `num_samples` independent samples of N(mean, std_dev²).
    ///
    /// # Arguments
    ///
    /// * `num_samples` - The number of samples to generate
    /// * `mean` - Mean of the distribution
    /// * `std_dev` - Standard deviation, expected to be non-negative
    ///
    /// # Returns
    ///
    /// A vector holding exactly `num_samples` values
    pub fn generate_gaussian(&mut self, num_samples: usize, mean: f64, std_dev: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|_| mean + std_dev * self.random_gaussian())
            .collect()
    }
}
