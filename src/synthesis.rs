// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Harmonic signal synthesis
//!
//! This module produces the clean periodic waveform that the rest of the
//! pipeline adds noise to and filters:
//!
//! ```text
//! clean[i] = amplitude * sin(2π * frequency * t[i] + phase)
//! ```
//!
//! # Examples
//!
//! ```
//! use rust_harmonics::synthesis::{synthesize, TimeGrid};
//!
//! let grid = TimeGrid::linspace(0.0, 10.0, 1000);
//! let clean = synthesize(&grid, 1.0, 0.5, 0.0);
//! assert_eq!(clean.len(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Ordered, immutable sequence of sample times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// Create `samples` evenly spaced times over `[start, stop]`, both ends included.
    ///
    /// A single sample yields `[start]`, zero samples an empty grid.
    pub fn linspace(start: f64, stop: f64, samples: usize) -> Self {
        let times = match samples {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (stop - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                    .collect()
            }
        };
        Self { times }
    }

    /// Wrap an existing sequence of sample times.
    pub fn from_times(times: Vec<f64>) -> Self {
        Self { times }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Parameters of the clean harmonic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicParams {
    /// Peak amplitude
    pub amplitude: f64,
    /// Frequency in Hz
    pub frequency: f64,
    /// Phase in radians
    pub phase: f64,
}

impl Default for HarmonicParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 0.5,
            phase: 0.0,
        }
    }
}

impl HarmonicParams {
    /// Evaluate the harmonic over `grid`.
    pub fn synthesize(&self, grid: &TimeGrid) -> Vec<f64> {
        synthesize(grid, self.amplitude, self.frequency, self.phase)
    }
}

/// Sample `amplitude * sin(2π·frequency·t + phase)` at every time of `grid`.
///
/// Any real input is accepted. A zero or negative frequency simply yields a
/// constant or time-reversed waveform.
pub fn synthesize(grid: &TimeGrid, amplitude: f64, frequency: f64, phase: f64) -> Vec<f64> {
    let omega = 2.0 * PI * frequency;
    grid.as_slice()
        .iter()
        .map(|&t| amplitude * (omega * t + phase).sin())
        .collect()
}
