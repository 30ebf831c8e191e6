// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the harmonic pipeline
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against a JSON schema for robustness.
//!
//! ## Configuration Structure
//!
//! - `time_grid`: Sample times shared by every trace
//! - `harmonic`: Amplitude, frequency and phase of the clean harmonic
//! - `noise`: Gaussian noise mean, variance and optional seed
//! - `filter`: Selected filter and the parameters of both filter families
//! - `display`: Trace shown next to the filtered one (`noisy` or `clean`)
//!
//! ## Usage
//!
//! ```no_run
//! use rust_harmonics::config::{Config, ConfigOverrides};
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(&ConfigOverrides {
//!     cutoff_freq: Some(5.0),
//!     ..ConfigOverrides::default()
//! });
//!
//! println!("Cutoff: {} Hz", config.filter.cutoff_freq);
//! ```

pub mod filter;
pub mod noise;
pub mod time_grid;
pub mod utils;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::preprocessing::FilterKind;
use crate::processing::{DisplayTrace, HarmonicSession, PipelineParams};
use crate::synthesis::{HarmonicParams, TimeGrid};

pub use filter::FilterConfig;
pub use noise::NoiseConfig;
pub use time_grid::TimeGridConfig;
pub use utils::{output_config_schema, validate_specific_rules};

/// Embedded JSON schema the YAML configuration is validated against
pub const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure.
///
/// Every section falls back to its defaults when missing, which are the
/// initial values of the interactive demos: a 0.5 Hz unit sine over
/// `[0, 10]` s sampled 1000 times, N(0, 0.1) noise and a 2 Hz lowpass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub time_grid: TimeGridConfig,

    #[serde(default)]
    pub harmonic: HarmonicParams,

    #[serde(default)]
    pub noise: NoiseConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub display: DisplayTrace,
}

/// Command line overrides; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub samples: Option<usize>,
    pub amplitude: Option<f64>,
    pub frequency: Option<f64>,
    pub phase: Option<f64>,
    pub noise_mean: Option<f64>,
    pub noise_variance: Option<f64>,
    pub seed: Option<u64>,
    pub filter_kind: Option<FilterKind>,
    pub cutoff_freq: Option<f64>,
    pub sample_rate: Option<f64>,
    pub order: Option<usize>,
    pub window_size: Option<usize>,
    pub display: Option<DisplayTrace>,
}

impl Config {
    /// Write the defaults to `<name>.sample.yaml` beside a rejected file
    fn create_sample_config(path: &Path) -> Result<()> {
        let sample_path = path.with_extension("sample.yaml");
        if let Some(dir) = sample_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create directory {:?}", dir))?;
        }

        Self::default().save_to_file(&sample_path)?;
        error!(
            "Harmonics configuration rejected, defaults written to {:?}",
            sample_path
        );
        Ok(())
    }

    /// Check a parsed YAML document against [`CONFIG_SCHEMA`]
    fn check_schema(document: &serde_yml::Value) -> Result<()> {
        let instance = serde_json::to_value(document)
            .context("Configuration is not representable as JSON")?;
        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Embedded schema is not valid JSON")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        validator
            .validate(&instance)
            .map_err(|err| anyhow::anyhow!("Schema validation failed: {}", err))
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with the default configuration. A file that
    /// fails validation leaves a `*.sample.yaml` with the defaults next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No configuration at {:?}, writing defaults", path);
            let config = Self::default();
            config.save_to_file(path)?;
            return Ok(config);
        }

        let contents =
            fs::read_to_string(path).with_context(|| format!("Cannot read {:?}", path))?;
        let document: serde_yml::Value = serde_yml::from_str(&contents)
            .with_context(|| format!("{:?} is not valid YAML", path))?;

        // Schema first, then the rules serde and the schema cannot see
        let checked = Self::check_schema(&document)
            .and_then(|()| serde_yml::from_value::<Config>(document).map_err(Into::into))
            .and_then(|config| validate_specific_rules(&config).map(|()| config));

        match checked {
            Ok(config) => {
                debug!(
                    "Loaded {:?}: {} samples, {:?} filter",
                    path,
                    config.time_grid.samples,
                    config.filter.kind
                );
                Ok(config)
            }
            Err(err) => {
                Self::create_sample_config(path)?;
                Err(err.context(format!("Invalid harmonics configuration in {:?}", path)))
            }
        }
    }

    /// Save the configuration as YAML
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yml::to_string(self).context("Cannot serialize configuration")?;
        fs::write(path, yaml).with_context(|| format!("Cannot write configuration to {:?}", path))
    }

    /// Apply command line arguments to override configuration values.
    pub fn apply_args(&mut self, overrides: &ConfigOverrides) {
        if let Some(samples) = overrides.samples {
            debug!("Overriding sample count from command line: {}", samples);
            self.time_grid.samples = samples;
        }

        if let Some(amplitude) = overrides.amplitude {
            debug!("Overriding amplitude from command line: {}", amplitude);
            self.harmonic.amplitude = amplitude;
        }
        if let Some(frequency) = overrides.frequency {
            debug!("Overriding frequency from command line: {}", frequency);
            self.harmonic.frequency = frequency;
        }
        if let Some(phase) = overrides.phase {
            debug!("Overriding phase from command line: {}", phase);
            self.harmonic.phase = phase;
        }

        if let Some(mean) = overrides.noise_mean {
            debug!("Overriding noise mean from command line: {}", mean);
            self.noise.mean = mean;
        }
        if let Some(variance) = overrides.noise_variance {
            debug!("Overriding noise variance from command line: {}", variance);
            self.noise.variance = variance;
        }
        if let Some(seed) = overrides.seed {
            debug!("Overriding noise seed from command line: {}", seed);
            self.noise.seed = Some(seed);
        }

        if let Some(kind) = overrides.filter_kind {
            debug!("Overriding filter kind from command line: {:?}", kind);
            self.filter.kind = kind;
        }
        if let Some(cutoff) = overrides.cutoff_freq {
            debug!("Overriding cutoff frequency from command line: {}", cutoff);
            self.filter.cutoff_freq = cutoff;
        }
        if let Some(rate) = overrides.sample_rate {
            debug!("Overriding filter sample rate from command line: {}", rate);
            self.filter.sample_rate = rate;
        }
        if let Some(order) = overrides.order {
            debug!("Overriding filter order from command line: {}", order);
            self.filter.order = order;
        }
        if let Some(window) = overrides.window_size {
            debug!("Overriding window size from command line: {}", window);
            self.filter.window_size = window;
        }

        if let Some(display) = overrides.display {
            debug!("Overriding displayed trace from command line: {:?}", display);
            self.display = display;
        }
    }

    pub fn time_grid(&self) -> TimeGrid {
        self.time_grid.build()
    }

    pub fn pipeline_params(&self) -> PipelineParams {
        PipelineParams {
            harmonic: self.harmonic,
            noise: self.noise.params(),
            filter: self.filter.spec(),
            display: self.display,
        }
    }

    /// Fresh session on the configured grid with a cache seeded as configured
    pub fn session(&self) -> HarmonicSession {
        HarmonicSession::with_cache(self.time_grid(), self.noise.cache())
    }
}
