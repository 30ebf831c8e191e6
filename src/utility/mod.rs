// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Utility module for noise generation and caching

pub mod noise_cache;
pub mod noise_generator;

// Re-exports for use in other modules
pub use noise_cache::{NoiseCache, NoiseKey, NoiseParams};
pub use noise_generator::NoiseGenerator;
