// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Signal filter utility
//!
//! This binary tool applies one of the pipeline filters to a signal stored as
//! a JSON array of numbers:
//! 1. A zero-phase Butterworth lowpass with configurable cutoff frequency
//! 2. A centered moving average with configurable window

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use rust_harmonics::preprocessing::{apply_filter, FilterSpec};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum FilterType {
    /// Lowpass filter
    Lowpass,
    /// Moving average filter
    MovingAverage,
}

#[derive(Parser, Debug)]
#[command(name = "filters")]
#[command(author = "Ronan Le Meillat")]
#[command(version = "1.0")]
#[command(about = "Apply a filter to a JSON array of samples", long_about = None)]
struct Args {
    /// Input JSON file holding an array of numbers
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output JSON file, stdout if omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Filter type
    #[arg(short = 't', long, value_enum, default_value_t = FilterType::Lowpass)]
    filter_type: FilterType,

    /// Cutoff frequency in Hz (for lowpass filter)
    #[arg(short = 'c', long, default_value_t = 2.0)]
    cutoff_freq: f64,

    /// Sample rate in Hz (for lowpass filter)
    #[arg(short = 's', long, default_value_t = 100.0)]
    sample_rate: f64,

    /// Filter order (for lowpass filter)
    #[arg(short = 'n', long, default_value_t = 4)]
    order: usize,

    /// Window size in samples (for moving average filter)
    #[arg(short = 'w', long, default_value_t = 10)]
    window_size: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Reading samples from {:?}", args.input);
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {:?}", args.input))?;
    let samples: Vec<f64> = serde_json::from_str(&contents)
        .with_context(|| format!("{:?} is not a JSON array of numbers", args.input))?;

    let spec = match args.filter_type {
        FilterType::Lowpass => FilterSpec::Lowpass {
            cutoff_freq: args.cutoff_freq,
            sample_rate: args.sample_rate,
            order: args.order,
        },
        FilterType::MovingAverage => FilterSpec::MovingAverage {
            window_size: args.window_size,
        },
    };
    info!("Filtering {} samples with {:?}", samples.len(), spec);

    let filtered = apply_filter(&spec, &samples)?;
    let json = serde_json::to_string(&filtered)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {:?}", path))?;
            info!("Filtered signal written to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
