// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use super::filters::{ButterLowpassFilter, Filter, MovingAverageFilter};

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const SAMPLE_RATE: f64 = 100.0;

    // Sine sampled at SAMPLE_RATE
    fn generate_test_signal(num_samples: usize, freq: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / SAMPLE_RATE;
                (2.0 * PI * freq * t).sin()
            })
            .collect()
    }

    // Peak amplitude away from the edges
    fn interior_peak(signal: &[f64]) -> f64 {
        let margin = signal.len() / 10;
        signal[margin..signal.len() - margin]
            .iter()
            .fold(0.0f64, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_lowpass_frequency_response() {
        let filter = ButterLowpassFilter::new(2.0, SAMPLE_RATE, 4).unwrap();

        let test_frequencies = [
            0.2,  // Well below cutoff
            0.5,  // Below cutoff
            10.0, // Well above cutoff
            20.0, // Far above cutoff
        ];

        let mut amplitudes = Vec::new();
        for &freq in &test_frequencies {
            let signal = generate_test_signal(1000, freq);
            let filtered = filter.apply(&signal).unwrap();
            assert_eq!(filtered.len(), signal.len());
            amplitudes.push(interior_peak(&filtered));
        }

        println!("Frequency response:");
        for (freq, amplitude) in test_frequencies.iter().zip(amplitudes.iter()) {
            println!("{} Hz: {}", freq, amplitude);
        }

        assert!((amplitudes[0] - 1.0).abs() < 0.05, "0.2 Hz should pass");
        assert!((amplitudes[1] - 1.0).abs() < 0.05, "0.5 Hz should pass");
        assert!(amplitudes[2] < 0.05, "10 Hz should be attenuated");
        assert!(amplitudes[3] < 0.01, "20 Hz should be attenuated");
    }

    #[test]
    fn test_lowpass_is_zero_phase() {
        // A causal filter would delay the peaks; forward-backward must not
        let filter = ButterLowpassFilter::new(5.0, SAMPLE_RATE, 4).unwrap();
        let signal = generate_test_signal(1000, 1.0);
        let filtered = filter.apply(&signal).unwrap();

        for i in 200..800 {
            assert!(
                (filtered[i] - signal[i]).abs() < 0.02,
                "sample {}: {} vs {}",
                i,
                filtered[i],
                signal[i]
            );
        }
    }

    #[test]
    fn test_lowpass_removes_noise() {
        let filter = ButterLowpassFilter::new(2.0, SAMPLE_RATE, 4).unwrap();
        let clean = generate_test_signal(1000, 0.5);
        let hiss = generate_test_signal(1000, 23.0);
        let noisy: Vec<f64> = clean
            .iter()
            .zip(hiss.iter())
            .map(|(c, h)| c + 0.3 * h)
            .collect();

        let filtered = filter.apply(&noisy).unwrap();

        let error_before: f64 = noisy.iter().zip(&clean).map(|(a, b)| (a - b).powi(2)).sum();
        let error_after: f64 = filtered[100..900]
            .iter()
            .zip(&clean[100..900])
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        assert!(error_after < error_before * 0.01);
    }

    #[test]
    fn test_moving_average_smooths_alternating_signal() {
        let signal: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let filtered = MovingAverageFilter::new(10).apply(&signal).unwrap();
        assert_eq!(filtered.len(), signal.len());
        assert!(filtered[5..95].iter().all(|&x| x.abs() < 1e-12));
    }
}
