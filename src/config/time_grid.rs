// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Time grid configuration
//!
//! Describes the fixed grid every trace of a session is sampled on.

use serde::{Deserialize, Serialize};

use crate::synthesis::TimeGrid;

/// Evenly spaced sample times over `[start, stop]`, both ends included.
///
/// # Example
///
/// ```
/// use rust_harmonics::config::TimeGridConfig;
///
/// let grid = TimeGridConfig::default().build();
/// assert_eq!(grid.len(), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGridConfig {
    /// First sample time in seconds
    #[serde(default = "default_start")]
    pub start: f64,

    /// Last sample time in seconds
    #[serde(default = "default_stop")]
    pub stop: f64,

    /// Number of samples
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_start() -> f64 {
    0.0
}

fn default_stop() -> f64 {
    10.0
}

fn default_samples() -> usize {
    1000
}

impl Default for TimeGridConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            stop: default_stop(),
            samples: default_samples(),
        }
    }
}

impl TimeGridConfig {
    pub fn build(&self) -> TimeGrid {
        TimeGrid::linspace(self.start, self.stop, self.samples)
    }
}
