use crate::errors::BenchError;
use crate::types::{Dispersion, TargetStats, TrialSample};

/// Best time, mean time and mean rate. Fails on an empty sample set.
pub fn summarize(samples: &[TrialSample]) -> Result<TargetStats, BenchError> {
    require(samples.len(), 1, "average")?;

    let best = samples
        .iter()
        .map(|s| s.seconds)
        .fold(f64::INFINITY, f64::min);
    let average = mean(samples.iter().map(|s| s.seconds));
    let mean_rate = mean(samples.iter().map(|s| s.rate));

    Ok(TargetStats {
        samples: samples.len(),
        best,
        average,
        mean_rate,
        dispersion: None,
    })
}

/// Like [`summarize`], plus the sample standard deviation of times and rates.
/// Fails with fewer than two samples.
pub fn summarize_with_dispersion(samples: &[TrialSample]) -> Result<TargetStats, BenchError> {
    require(samples.len(), 2, "standard deviation")?;

    let mut stats = summarize(samples)?;
    stats.dispersion = Some(Dispersion {
        seconds: sample_stdev(samples.iter().map(|s| s.seconds), stats.average),
        rate: sample_stdev(samples.iter().map(|s| s.rate), stats.mean_rate),
    });
    Ok(stats)
}

/// Checks ahead of time that `trials` (warm-up included) leaves enough
/// samples for the chosen variant. Same error as aggregation would raise.
pub fn check_trial_count(trials: usize, dispersion: bool) -> Result<(), BenchError> {
    let usable = trials.saturating_sub(1);
    require(usable, 1, "average")?;
    if dispersion {
        require(usable, 2, "standard deviation")?;
    }
    Ok(())
}

fn require(got: usize, needed: usize, statistic: &'static str) -> Result<(), BenchError> {
    if got < needed {
        return Err(BenchError::InsufficientSamples {
            statistic,
            needed,
            got,
        });
    }
    Ok(())
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len() as f64;
    values.sum::<f64>() / n
}

// Bessel-corrected (n - 1).
fn sample_stdev(values: impl ExactSizeIterator<Item = f64>, mean: f64) -> f64 {
    let n = values.len() as f64;
    let sum_sq: f64 = values.map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (n - 1.0)).sqrt()
}
