// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Digital filters for noisy harmonic signals
//!
//! Two filters are provided, both operating on a whole trace at once:
//!
//! - **[`ButterLowpassFilter`]**: Butterworth lowpass designed as SOS
//!   (second-order sections) and applied forward-backward (`sosfiltfilt`), so
//!   the output is time-aligned with the input.
//! - **[`MovingAverageFilter`]**: centered unweighted mean, equivalent to a
//!   "same"-mode convolution with a uniform kernel.
//!
//! # Examples
//!
//! ```no_run
//! use rust_harmonics::preprocessing::filters::{ButterLowpassFilter, Filter};
//!
//! // 4th-order lowpass at 2 Hz for a signal sampled at 100 Hz
//! let filter = ButterLowpassFilter::new(2.0, 100.0, 4)?;
//! let input: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.01).sin()).collect();
//! let output = filter.apply(&input)?;
//! assert_eq!(output.len(), input.len());
//! # Ok::<(), rust_harmonics::preprocessing::FilterError>(())
//! ```

use log::debug;
use sci_rs::signal::filter::design::{
    iirfilter_dyn, DigitalFilter, FilterBandType, FilterOutputType, FilterType, Sos,
};
use sci_rs::signal::filter::sosfiltfilt_dyn;
use serde_json::Value;
use thiserror::Error;

/// Highest Butterworth order accepted by [`ButterLowpassFilter`]
pub const MAX_ORDER: usize = 20;

/// Errors raised while designing or applying a filter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: String,
    },
    #[error("Signal too short for zero-phase filtering: {len} samples, at least {min_len} required")]
    SignalTooShort { len: usize, min_len: usize },
    #[error("Filter design failed: {0}")]
    Design(String),
}

/// Trait for implementing digital filters
pub trait Filter: Send + Sync {
    /// Apply the filter to a whole signal and return a signal of the same length
    fn apply(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError>;

    /// Update filter configuration with new parameters
    ///
    /// ### Returns
    ///
    /// * `Ok(true)` - Parameters were successfully updated
    /// * `Ok(false)` - No matching parameters found
    /// * `Err(FilterError::InvalidParameter)` - A value was rejected; the filter is left unchanged
    fn update_config(&mut self, parameters: &Value) -> Result<bool, FilterError>;
}

fn validate_cutoff(cutoff_freq: f64, sample_rate: f64) -> Result<(), FilterError> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(FilterError::InvalidParameter {
            name: "sample_rate",
            value: sample_rate,
            reason: "must be a positive number".to_string(),
        });
    }
    let nyquist = sample_rate / 2.0;
    if !(cutoff_freq > 0.0 && cutoff_freq < nyquist) {
        return Err(FilterError::InvalidParameter {
            name: "cutoff_freq",
            value: cutoff_freq,
            reason: format!("must lie in (0, {}) for a sample rate of {} Hz", nyquist, sample_rate),
        });
    }
    Ok(())
}

fn validate_order(order: usize) -> Result<(), FilterError> {
    if order == 0 || order > MAX_ORDER {
        return Err(FilterError::InvalidParameter {
            name: "order",
            value: order as f64,
            reason: format!("must lie in [1, {}]", MAX_ORDER),
        });
    }
    Ok(())
}

/// Numeric entry of an `update_config` payload, `None` when absent
fn number_param(parameters: &Value, name: &'static str) -> Result<Option<f64>, FilterError> {
    match parameters.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| FilterError::InvalidParameter {
                name,
                value: f64::NAN,
                reason: format!("expected a number, got {}", value),
            }),
    }
}

/// Non-negative integer entry of an `update_config` payload
fn integer_param(parameters: &Value, name: &'static str) -> Result<Option<usize>, FilterError> {
    match parameters.get(name) {
        None => Ok(None),
        Some(value) => match value.as_u64() {
            Some(n) => Ok(Some(n as usize)),
            None => Err(FilterError::InvalidParameter {
                name,
                value: value.as_f64().unwrap_or(f64::NAN),
                reason: "must be a non-negative integer".to_string(),
            }),
        },
    }
}

/// Butterworth lowpass filter using SOS + filtfilt
///
/// # Parameters
/// - `cutoff_freq`: Cutoff frequency in Hz, strictly inside (0, sample_rate / 2)
/// - `sample_rate`: Sample rate in Hz
/// - `order`: Filter order (4 by default)
#[derive(Debug, Clone)]
pub struct ButterLowpassFilter {
    cutoff_freq: f64,
    sample_rate: f64,
    order: usize,
    sos: Vec<Sos<f64>>,
}

impl ButterLowpassFilter {
    pub const DEFAULT_ORDER: usize = 4;
    pub const DEFAULT_SAMPLE_RATE: f64 = 100.0;

    /// Validate the parameters and design the filter.
    pub fn new(cutoff_freq: f64, sample_rate: f64, order: usize) -> Result<Self, FilterError> {
        validate_cutoff(cutoff_freq, sample_rate)?;
        validate_order(order)?;
        let sos = design_lowpass(cutoff_freq, sample_rate, order)?;
        Ok(Self {
            cutoff_freq,
            sample_rate,
            order,
            sos,
        })
    }

    pub fn cutoff_freq(&self) -> f64 {
        self.cutoff_freq
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Shortest signal the forward-backward pass accepts.
    ///
    /// The signal is extended by `3 * ntaps` samples on both sides and must be
    /// longer than that extension. `ntaps` is `2 * sections + 1`, minus the
    /// first-order sections (zero `b2` and `a2`) that odd orders produce.
    pub fn min_signal_len(&self) -> usize {
        let b_zeros = self.sos.iter().filter(|s| s.b[2] == 0.0).count();
        let a_zeros = self.sos.iter().filter(|s| s.a[2] == 0.0).count();
        let ntaps = 2 * self.sos.len() + 1 - b_zeros.min(a_zeros);
        3 * ntaps + 1
    }
}

fn design_lowpass(
    cutoff_freq: f64,
    sample_rate: f64,
    order: usize,
) -> Result<Vec<Sos<f64>>, FilterError> {
    // Critical frequency normalized to Nyquist
    let cutoff_norm = cutoff_freq / (sample_rate / 2.0);
    debug!(
        "Designing order {} Butterworth lowpass: cutoff={} Hz, fs={} Hz",
        order, cutoff_freq, sample_rate
    );

    let result = iirfilter_dyn(
        order,
        vec![cutoff_norm],
        None,                          // rp (not used for Butterworth)
        None,                          // rs (not used for Butterworth)
        Some(FilterBandType::Lowpass), // filter type
        Some(FilterType::Butterworth), // analog prototype
        Some(false),                   // digital filter
        Some(FilterOutputType::Sos),   // output as SOS
        None,                          // fs (already normalized)
    );

    match result {
        DigitalFilter::Sos(sos_filter) => Ok(sos_filter.sos),
        _ => Err(FilterError::Design(
            "expected SOS output from iirfilter_dyn".to_string(),
        )),
    }
}

impl Filter for ButterLowpassFilter {
    fn apply(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        let min_len = self.min_signal_len();
        if signal.len() < min_len {
            return Err(FilterError::SignalTooShort {
                len: signal.len(),
                min_len,
            });
        }
        Ok(sosfiltfilt_dyn(signal.iter(), &self.sos))
    }

    fn update_config(&mut self, parameters: &Value) -> Result<bool, FilterError> {
        let cutoff_freq = number_param(parameters, "cutoff_freq")?.unwrap_or(self.cutoff_freq);
        let sample_rate = number_param(parameters, "sample_rate")?.unwrap_or(self.sample_rate);
        let order = integer_param(parameters, "order")?.unwrap_or(self.order);

        if cutoff_freq == self.cutoff_freq && sample_rate == self.sample_rate && order == self.order
        {
            return Ok(false);
        }

        // Validate everything before touching the current design
        validate_cutoff(cutoff_freq, sample_rate)?;
        validate_order(order)?;
        let sos = design_lowpass(cutoff_freq, sample_rate, order)?;

        self.cutoff_freq = cutoff_freq;
        self.sample_rate = sample_rate;
        self.order = order;
        self.sos = sos;
        Ok(true)
    }
}

/// Centered moving average filter
///
/// Each output sample is the sum of the `window_size` input samples around
/// it divided by `window_size`. Samples outside the signal count as zero, so
/// the effective window shrinks at both edges, exactly like
/// `convolve(signal, ones(W) / W, mode = "same")`. For an even window the
/// extra sample is taken on the left.
///
/// A window of 0 or 1 leaves the signal unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageFilter {
    window_size: usize,
}

impl MovingAverageFilter {
    pub const DEFAULT_WINDOW_SIZE: usize = 10;

    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl Filter for MovingAverageFilter {
    fn apply(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        let window = self.window_size;
        if window <= 1 {
            return Ok(signal.to_vec());
        }

        let len = signal.len();
        // Window for output i spans [i - window/2, i + (window - 1)/2]
        let left = window / 2;
        let right = (window - 1) / 2;
        let scale = 1.0 / window as f64;

        // Prefix sums make each output O(1)
        let mut prefix = Vec::with_capacity(len + 1);
        prefix.push(0.0);
        let mut acc = 0.0;
        for &x in signal {
            acc += x;
            prefix.push(acc);
        }

        Ok((0..len)
            .map(|i| {
                let lo = i.saturating_sub(left);
                let hi = (i + right + 1).min(len);
                (prefix[hi] - prefix[lo]) * scale
            })
            .collect())
    }

    fn update_config(&mut self, parameters: &Value) -> Result<bool, FilterError> {
        match integer_param(parameters, "window_size")? {
            None => Ok(false),
            Some(window_size) => {
                let updated = window_size != self.window_size;
                self.window_size = window_size;
                Ok(updated)
            }
        }
    }
}
