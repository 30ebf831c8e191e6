use anyhow::Result;
use rust_harmonics::config::{Config, ConfigOverrides};
use rust_harmonics::preprocessing::{FilterKind, FilterSpec};
use rust_harmonics::processing::DisplayTrace;
use std::fs;
use std::sync::Once;
use tempfile::tempdir;

static INIT: Once = Once::new();

// Setup logger for tests
fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

#[test]
fn test_config_load_and_save() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    let mut config = Config::default();
    config.harmonic.amplitude = 1.5;
    config.noise.seed = Some(42);
    config.filter.kind = FilterKind::MovingAverage;
    config.filter.window_size = 25;
    config.display = DisplayTrace::Clean;

    config.save_to_file(&config_path)?;
    let loaded_config = Config::from_file(&config_path)?;
    assert_eq!(loaded_config, config);

    // Loading a missing file writes the defaults
    let non_existent_path = temp_dir.path().join("non_existent.yaml");
    let default_config = Config::from_file(&non_existent_path)?;
    assert!(non_existent_path.exists());
    assert_eq!(default_config, Config::default());

    Ok(())
}

#[test]
fn test_partial_config_uses_defaults() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        r#"
filter:
  kind: lowpass
  cutoff_freq: 4.5
noise:
  variance: 0.2
"#,
    )?;

    let config = Config::from_file(&config_path)?;
    assert_eq!(config.filter.cutoff_freq, 4.5);
    assert_eq!(config.filter.order, 4);
    assert_eq!(config.filter.sample_rate, 100.0);
    assert_eq!(config.noise.variance, 0.2);
    assert_eq!(config.noise.mean, 0.0);
    assert_eq!(config.time_grid.samples, 1000);
    assert_eq!(config.display, DisplayTrace::Noisy);

    Ok(())
}

#[test]
fn test_schema_violation_creates_sample_file() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        r#"
filter:
  kind: bandstop
  window_size: "ten"
"#,
    )?;

    let result = Config::from_file(&config_path);
    assert!(result.is_err(), "Config loading should have failed");

    let sample_path = config_path.with_extension("sample.yaml");
    assert!(sample_path.exists(), "Sample config file was not created");
    assert_eq!(Config::from_file(&sample_path)?, Config::default());

    Ok(())
}

#[test]
fn test_cutoff_above_nyquist_is_rejected() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        r#"
filter:
  cutoff_freq: 60.0
  sample_rate: 100.0
"#,
    )?;

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(format!("{:#}", err).contains("cutoff_freq"));
    assert!(config_path.with_extension("sample.yaml").exists());

    Ok(())
}

#[test]
fn test_apply_args() {
    let mut config = Config::default();
    config.apply_args(&ConfigOverrides {
        amplitude: Some(0.7),
        noise_variance: Some(0.3),
        filter_kind: Some(FilterKind::MovingAverage),
        window_size: Some(5),
        display: Some(DisplayTrace::Clean),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.harmonic.amplitude, 0.7);
    assert_eq!(config.harmonic.frequency, 0.5);
    assert_eq!(config.noise.variance, 0.3);

    let params = config.pipeline_params();
    assert_eq!(params.filter, FilterSpec::moving_average(5));
    assert_eq!(params.display, DisplayTrace::Clean);
}
