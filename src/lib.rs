pub mod config;
pub mod errors;
pub mod logging;
pub mod report;
pub mod stats;
pub mod timer;
pub mod toolchain;
pub mod trial;
pub mod types;

use crate::config::Settings;
use crate::errors::BenchError;
use crate::types::{InputSpec, Measurement, TargetStats};

/// Runs every target in order, streaming per-trial lines through `emit`, and
/// returns the per-target statistics in configuration order. Settings are
/// validated before the first trial.
pub fn run_benchmark(
    settings: &Settings,
    input: &InputSpec,
    mut emit: impl FnMut(&str),
) -> Result<Vec<(String, TargetStats)>, BenchError> {
    settings.validate()?;

    let mut results = Vec::with_capacity(settings.targets.len());
    for target in &settings.targets {
        let label = target.label();
        let samples = trial::run_trials(
            target,
            settings.trials,
            input,
            settings.exit_policy,
            |event| {
                let line = report::format_trial(Measurement::from(event.sample), &label, event.warm_up);
                emit(&line);
            },
        )?;
        let stats = if settings.stdev {
            stats::summarize_with_dispersion(&samples)?
        } else {
            stats::summarize(&samples)?
        };
        results.push((label, stats));
    }
    Ok(results)
}

#[cfg(test)]
mod scenario_tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn warm_up_then_best_and_average_lines() {
        let size = 1_000_000_000;
        let mut times = [1.0, 2.0, 1.0].into_iter();
        let samples = trial::collect_trials(3, size, |_| {}, || {
            Ok(Duration::from_secs_f64(times.next().unwrap()))
        })
        .unwrap();
        let results = vec![("md5sum".to_string(), stats::summarize(&samples).unwrap())];

        let out = report::format_summary(&results, size);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "1.000000 (1.000000 GB/s)  md5sum");
        assert_eq!(lines[3], "1.500000 (0.750000 GB/s)  md5sum");
    }
}
