// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Filter configuration
//!
//! Both filter families keep their parameters in the file so switching
//! `kind` does not lose the other family's settings.

use serde::{Deserialize, Serialize};

use crate::preprocessing::{ButterLowpassFilter, FilterKind, FilterSpec, MovingAverageFilter};

/// Filter settings.
///
/// * `kind` - `lowpass` or `moving_average`
/// * `cutoff_freq`, `sample_rate`, `order` - lowpass parameters
/// * `window_size` - moving average window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_kind")]
    pub kind: FilterKind,

    /// Lowpass cutoff frequency in Hz
    #[serde(default = "default_cutoff_freq")]
    pub cutoff_freq: f64,

    /// Sample rate assumed by the lowpass design, in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Butterworth order
    #[serde(default = "default_order")]
    pub order: usize,

    /// Moving average window in samples
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

fn default_kind() -> FilterKind {
    FilterKind::Lowpass
}

fn default_cutoff_freq() -> f64 {
    2.0
}

fn default_sample_rate() -> f64 {
    ButterLowpassFilter::DEFAULT_SAMPLE_RATE
}

fn default_order() -> usize {
    ButterLowpassFilter::DEFAULT_ORDER
}

fn default_window_size() -> usize {
    MovingAverageFilter::DEFAULT_WINDOW_SIZE
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            cutoff_freq: default_cutoff_freq(),
            sample_rate: default_sample_rate(),
            order: default_order(),
            window_size: default_window_size(),
        }
    }
}

impl FilterConfig {
    /// Specification of the selected filter
    pub fn spec(&self) -> FilterSpec {
        match self.kind {
            FilterKind::Lowpass => FilterSpec::Lowpass {
                cutoff_freq: self.cutoff_freq,
                sample_rate: self.sample_rate,
                order: self.order,
            },
            FilterKind::MovingAverage => FilterSpec::MovingAverage {
                window_size: self.window_size,
            },
        }
    }
}
