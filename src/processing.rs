// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Harmonic + noise + filter pipeline
//!
//! A [`HarmonicSession`] owns the time grid and the noise cache of one
//! interactive session. Every parameter change is served by one synchronous
//! call to [`HarmonicSession::compute`]:
//!
//! 1. synthesize the clean harmonic over the grid
//! 2. fetch the (possibly cached) noise trace and add it
//! 3. filter the full noisy signal, whatever trace is displayed
//!
//! ```
//! use rust_harmonics::processing::{HarmonicSession, PipelineParams};
//! use rust_harmonics::synthesis::TimeGrid;
//! use rust_harmonics::utility::noise_cache::NoiseCache;
//!
//! let mut session =
//!     HarmonicSession::with_cache(TimeGrid::linspace(0.0, 10.0, 1000), NoiseCache::with_seed(1));
//! let output = session.compute(&PipelineParams::default())?;
//! assert_eq!(output.filtered.len(), 1000);
//! # Ok::<(), rust_harmonics::preprocessing::FilterError>(())
//! ```

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::preprocessing::{apply_filter, FilterError, FilterSpec};
use crate::synthesis::{HarmonicParams, TimeGrid};
use crate::utility::noise_cache::{NoiseCache, NoiseParams};

/// Which input trace the caller shows next to the filtered one
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTrace {
    Clean,
    #[default]
    Noisy,
}

/// Clean harmonic, noise, and their pointwise sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalTriple {
    pub clean: Vec<f64>,
    pub noise: Vec<f64>,
    pub noisy: Vec<f64>,
}

impl SignalTriple {
    /// Build the triple; `noisy[i] = clean[i] + noise[i]`.
    pub fn new(clean: Vec<f64>, noise: Vec<f64>) -> Self {
        let noisy = clean.iter().zip(noise.iter()).map(|(c, n)| c + n).collect();
        Self {
            clean,
            noise,
            noisy,
        }
    }

    pub fn trace(&self, display: DisplayTrace) -> &[f64] {
        match display {
            DisplayTrace::Clean => &self.clean,
            DisplayTrace::Noisy => &self.noisy,
        }
    }
}

/// Everything a caller can tweak between two evaluations
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineParams {
    pub harmonic: HarmonicParams,
    pub noise: NoiseParams,
    pub filter: FilterSpec,
    pub display: DisplayTrace,
}

/// Result of one pipeline evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Sample times in seconds
    pub time: Vec<f64>,
    #[serde(flatten)]
    pub signals: SignalTriple,
    /// Filtered noisy signal
    pub filtered: Vec<f64>,
    pub display: DisplayTrace,
    pub filter: FilterSpec,
    pub timestamp: DateTime<Utc>,
}

impl PipelineOutput {
    /// The input trace selected by [`DisplayTrace`]
    pub fn displayed(&self) -> &[f64] {
        self.signals.trace(self.display)
    }
}

/// Per-session pipeline state: a fixed time grid and its noise cache
#[derive(Debug)]
pub struct HarmonicSession {
    grid: TimeGrid,
    cache: NoiseCache,
}

impl HarmonicSession {
    /// Session with an OS-seeded noise cache
    pub fn new(grid: TimeGrid) -> Self {
        Self::with_cache(grid, NoiseCache::new())
    }

    pub fn with_cache(grid: TimeGrid, cache: NoiseCache) -> Self {
        Self { grid, cache }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn cache(&self) -> &NoiseCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut NoiseCache {
        &mut self.cache
    }

    /// Clean, noise and noisy traces for the given parameters
    pub fn signals(&mut self, harmonic: &HarmonicParams, noise: &NoiseParams) -> SignalTriple {
        let clean = harmonic.synthesize(&self.grid);
        let noise = self.cache.get(noise, self.grid.len()).to_vec();
        SignalTriple::new(clean, noise)
    }

    /// Run the whole pipeline once
    pub fn compute(&mut self, params: &PipelineParams) -> Result<PipelineOutput, FilterError> {
        let signals = self.signals(&params.harmonic, &params.noise);
        let filtered = apply_filter(&params.filter, &signals.noisy)?;
        debug!(
            "Pipeline evaluated: {} samples, filter {:?}, {} noise regenerations so far",
            self.grid.len(),
            params.filter.kind(),
            self.cache.regenerations()
        );

        Ok(PipelineOutput {
            time: self.grid.as_slice().to_vec(),
            signals,
            filtered,
            display: params.display,
            filter: params.filter,
            timestamp: Utc::now(),
        })
    }

    /// Initial parameters of the pipeline.
    ///
    /// The noise cache is kept: the next evaluation regenerates only if the
    /// default noise key differs from the cached one. Use
    /// [`NoiseCache::clear`] to force fresh noise.
    pub fn reset(&mut self) -> PipelineParams {
        debug!("Resetting pipeline parameters to defaults");
        PipelineParams::default()
    }
}
