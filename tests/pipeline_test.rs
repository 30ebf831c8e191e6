use anyhow::Result;
use rust_harmonics::preprocessing::{apply_filter, FilterError, FilterSpec};
use rust_harmonics::processing::{HarmonicSession, PipelineParams};
use rust_harmonics::synthesis::{synthesize, TimeGrid};
use rust_harmonics::utility::noise_cache::{NoiseCache, NoiseKey};
use std::f64::consts::PI;

#[test]
fn test_end_to_end_scenario() -> Result<()> {
    let grid = TimeGrid::linspace(0.0, 10.0, 1000);

    // Pure 0.5 Hz sine of unit amplitude
    let clean = synthesize(&grid, 1.0, 0.5, 0.0);
    for (&t, &x) in grid.as_slice().iter().zip(clean.iter()) {
        assert!((x - (2.0 * PI * 0.5 * t).sin()).abs() < 1e-12);
    }

    let mut cache = NoiseCache::new();
    let first = cache.get_noise(0.0, 0.1, grid.len()).to_vec();
    let second = cache.get_noise(0.0, 0.1, grid.len()).to_vec();
    assert_eq!(first.len(), 1000);
    assert_eq!(first, second);
    assert_eq!(cache.regenerations(), 1);

    let third = cache.get_noise(0.0, 0.2, grid.len()).to_vec();
    assert_eq!(third.len(), 1000);
    assert_eq!(cache.regenerations(), 2);
    assert_eq!(
        cache.key(),
        Some(NoiseKey {
            mean: 0.0,
            variance: 0.2,
            length: 1000
        })
    );
    assert_ne!(first, third);

    Ok(())
}

#[test]
fn test_lowpass_recovers_clean_harmonic() -> Result<()> {
    let mut session = HarmonicSession::with_cache(
        TimeGrid::linspace(0.0, 10.0, 1000),
        NoiseCache::with_seed(2025),
    );
    let output = session.compute(&PipelineParams::default())?;

    let rms = |a: &[f64], b: &[f64]| {
        (a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>() / a.len() as f64).sqrt()
    };
    let noisy_error = rms(&output.signals.noisy, &output.signals.clean);
    let filtered_error = rms(&output.filtered, &output.signals.clean);

    // Noise standard deviation is sqrt(0.1) ≈ 0.316
    assert!(noisy_error > 0.25);
    assert!(filtered_error < noisy_error / 2.0);
    Ok(())
}

#[test]
fn test_moving_average_on_pipeline_output() -> Result<()> {
    let mut session =
        HarmonicSession::with_cache(TimeGrid::linspace(0.0, 10.0, 1000), NoiseCache::with_seed(3));
    let params = PipelineParams {
        filter: FilterSpec::moving_average(10),
        ..PipelineParams::default()
    };
    let output = session.compute(&params)?;
    assert_eq!(output.filtered.len(), 1000);

    let identity = apply_filter(&FilterSpec::moving_average(1), &output.signals.noisy)?;
    assert_eq!(identity, output.signals.noisy);
    Ok(())
}

#[test]
fn test_output_serializes_to_json() -> Result<()> {
    let mut session =
        HarmonicSession::with_cache(TimeGrid::linspace(0.0, 1.0, 100), NoiseCache::with_seed(1));
    let output = session.compute(&PipelineParams::default())?;
    let json = serde_json::to_value(&output)?;

    for field in ["time", "clean", "noise", "noisy", "filtered", "display", "timestamp"] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(json["filter"]["kind"], "lowpass");
    Ok(())
}

#[test]
fn test_short_grid_is_reported() {
    let mut session =
        HarmonicSession::with_cache(TimeGrid::linspace(0.0, 1.0, 8), NoiseCache::with_seed(1));
    let result = session.compute(&PipelineParams::default());
    assert!(matches!(result, Err(FilterError::SignalTooShort { len: 8, .. })));
}
