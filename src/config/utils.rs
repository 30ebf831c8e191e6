// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Config, CONFIG_SCHEMA};
use crate::preprocessing::{ButterLowpassFilter, FilterKind};

/// Output the embedded JSON schema to the console.
///
/// # Example
///
/// ```bash
/// ./rust_harmonics --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against rules the JSON schema cannot express.
///
/// # Validation Rules
///
/// - **Time grid**: `stop` must be greater than `start`, at least one sample
/// - **Noise**: a negative variance is accepted (it is clamped to zero) but logged
/// - **Filter**: the selected filter must be designable; the lowpass cutoff
///   must lie strictly between 0 and the Nyquist frequency
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    let grid = &config.time_grid;
    if !(grid.stop > grid.start) {
        anyhow::bail!(
            "Time grid stop ({}) must be greater than start ({})",
            grid.stop,
            grid.start
        );
    }
    if grid.samples == 0 {
        anyhow::bail!("Time grid needs at least one sample");
    }

    if config.noise.variance < 0.0 {
        warn!(
            "Noise variance {} is negative and will be clamped to 0.0",
            config.noise.variance
        );
    }

    if config.filter.kind == FilterKind::Lowpass {
        let filter = ButterLowpassFilter::new(
            config.filter.cutoff_freq,
            config.filter.sample_rate,
            config.filter.order,
        )
        .context("Invalid lowpass filter configuration")?;

        if grid.samples < filter.min_signal_len() {
            anyhow::bail!(
                "Lowpass filtering needs at least {} samples, the time grid has {}",
                filter.min_signal_len(),
                grid.samples
            );
        }
    }

    Ok(())
}
