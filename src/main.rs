// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point: evaluates the harmonic pipeline once and prints the traces as JSON

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use rust_harmonics::config::{output_config_schema, Config, ConfigOverrides};
use rust_harmonics::preprocessing::FilterKind;
use rust_harmonics::processing::DisplayTrace;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FilterArg {
    /// Zero-phase Butterworth lowpass
    Lowpass,
    /// Centered moving average
    MovingAverage,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Lowpass => FilterKind::Lowpass,
            FilterArg::MovingAverage => FilterKind::MovingAverage,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DisplayArg {
    Clean,
    Noisy,
}

impl From<DisplayArg> for DisplayTrace {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Clean => DisplayTrace::Clean,
            DisplayArg::Noisy => DisplayTrace::Noisy,
        }
    }
}

/// Harmonic signal with cached Gaussian noise and zero-phase filtering
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML), created with defaults if missing
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Number of samples of the time grid
    #[arg(long)]
    samples: Option<usize>,

    /// Amplitude of the harmonic
    #[arg(short, long, allow_hyphen_values = true)]
    amplitude: Option<f64>,

    /// Frequency of the harmonic in Hz
    #[arg(short, long, allow_hyphen_values = true)]
    frequency: Option<f64>,

    /// Phase of the harmonic in radians
    #[arg(short, long, allow_hyphen_values = true)]
    phase: Option<f64>,

    /// Mean of the Gaussian noise
    #[arg(long, allow_hyphen_values = true)]
    noise_mean: Option<f64>,

    /// Variance of the Gaussian noise (negative values are clamped to 0)
    #[arg(long, allow_hyphen_values = true)]
    noise_variance: Option<f64>,

    /// Seed of the noise generator
    #[arg(long)]
    seed: Option<u64>,

    /// Filter applied to the noisy signal
    #[arg(short = 't', long, value_enum)]
    filter: Option<FilterArg>,

    /// Lowpass cutoff frequency in Hz
    #[arg(long)]
    cutoff_freq: Option<f64>,

    /// Sample rate assumed by the lowpass design in Hz
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Butterworth order
    #[arg(short = 'n', long)]
    order: Option<usize>,

    /// Moving average window in samples
    #[arg(short, long)]
    window_size: Option<usize>,

    /// Trace displayed next to the filtered one
    #[arg(short, long, value_enum)]
    display: Option<DisplayArg>,

    /// Output file for results (JSON), stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            samples: self.samples,
            amplitude: self.amplitude,
            frequency: self.frequency,
            phase: self.phase,
            noise_mean: self.noise_mean,
            noise_variance: self.noise_variance,
            seed: self.seed,
            filter_kind: self.filter.map(Into::into),
            cutoff_freq: self.cutoff_freq,
            sample_rate: self.sample_rate,
            order: self.order,
            window_size: self.window_size,
            display: self.display.map(Into::into),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.show_config_schema {
        return output_config_schema();
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_args(&args.overrides());
    rust_harmonics::config::validate_specific_rules(&config)?;

    let mut session = config.session();
    let params = config.pipeline_params();
    info!(
        "Evaluating {} samples with {:?} filter",
        session.grid().len(),
        params.filter.kind()
    );

    let output = session
        .compute(&params)
        .context("Failed to filter the noisy signal")?;
    let json = serde_json::to_string_pretty(&output)?;

    match args.output {
        Some(path) => {
            info!("Saving results to: {}", path.display());
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write results to {:?}", path))?;
        }
        None => println!("{}", json),
    }

    Ok(())
}
