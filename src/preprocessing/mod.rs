// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Signal preprocessing module
//!
//! This module handles filtering of the noisy harmonic. Callers pick a filter
//! with a [`FilterSpec`] and run it with [`apply_filter`], or keep a live
//! instance from [`create_filter`] and reconfigure it through
//! [`Filter::update_config`].

pub mod filters;
#[cfg(test)]
mod filters_test;

pub use filters::{ButterLowpassFilter, Filter, FilterError, MovingAverageFilter};

use serde::{Deserialize, Serialize};

/// Selectable filter families
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Zero-phase Butterworth lowpass
    Lowpass,
    /// Centered moving average
    MovingAverage,
}

/// A filter kind together with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    Lowpass {
        cutoff_freq: f64,
        sample_rate: f64,
        order: usize,
    },
    MovingAverage {
        window_size: usize,
    },
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec::Lowpass {
            cutoff_freq: 2.0,
            sample_rate: ButterLowpassFilter::DEFAULT_SAMPLE_RATE,
            order: ButterLowpassFilter::DEFAULT_ORDER,
        }
    }
}

impl FilterSpec {
    /// 4th-order lowpass at the default 100 Hz sample rate
    pub fn lowpass(cutoff_freq: f64) -> Self {
        FilterSpec::Lowpass {
            cutoff_freq,
            sample_rate: ButterLowpassFilter::DEFAULT_SAMPLE_RATE,
            order: ButterLowpassFilter::DEFAULT_ORDER,
        }
    }

    pub fn moving_average(window_size: usize) -> Self {
        FilterSpec::MovingAverage { window_size }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            FilterSpec::Lowpass { .. } => FilterKind::Lowpass,
            FilterSpec::MovingAverage { .. } => FilterKind::MovingAverage,
        }
    }
}

/// Create a filter instance from its specification
pub fn create_filter(spec: &FilterSpec) -> Result<Box<dyn Filter>, FilterError> {
    Ok(match *spec {
        FilterSpec::Lowpass {
            cutoff_freq,
            sample_rate,
            order,
        } => Box::new(ButterLowpassFilter::new(cutoff_freq, sample_rate, order)?),
        FilterSpec::MovingAverage { window_size } => {
            Box::new(MovingAverageFilter::new(window_size))
        }
    })
}

/// Filter `signal` with the filter described by `spec`
pub fn apply_filter(spec: &FilterSpec, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
    create_filter(spec)?.apply(signal)
}
