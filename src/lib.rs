// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust Harmonics library
//!
//! This library synthesizes a harmonic signal, adds memoized Gaussian noise
//! and filters the result with a zero-phase Butterworth lowpass or a moving
//! average. The three core operations are [`synthesis::synthesize`],
//! [`utility::NoiseCache::get_noise`] and [`preprocessing::apply_filter`];
//! [`processing::HarmonicSession`] chains them for interactive callers.

pub mod config;
pub mod preprocessing;
pub mod processing;
pub mod synthesis;
pub mod utility;
