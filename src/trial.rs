use std::time::Duration;

use tracing::warn;

use crate::errors::BenchError;
use crate::timer::{Invocation, time_invocation};
use crate::types::{ExitPolicy, InputSpec, Target, TrialSample};

/// Progress callback payload for one trial.
#[derive(Debug, Clone, Copy)]
pub struct TrialEvent {
    pub index: usize,
    pub sample: TrialSample,
    pub warm_up: bool,
}

/// Runs `target` `trials` times back to back against `input`. The first
/// trial is reported through `on_trial` but left out of the returned samples.
pub fn run_trials(
    target: &Target,
    trials: usize,
    input: &InputSpec,
    policy: ExitPolicy,
    on_trial: impl FnMut(&TrialEvent),
) -> Result<Vec<TrialSample>, BenchError> {
    let label = target.label();
    collect_trials(trials, input.size, on_trial, || {
        let Invocation { elapsed, status } = time_invocation(target, input)?;
        if !status.success() {
            match policy {
                ExitPolicy::Record => {
                    warn!(label = %label, %status, "non-zero exit, timing kept");
                }
                ExitPolicy::Fail => {
                    return Err(BenchError::NonZeroExit {
                        label: label.clone(),
                        status: status.to_string(),
                    });
                }
            }
        }
        Ok(elapsed)
    })
}

/// The warm-up/collect loop, independent of how a single trial is timed.
pub fn collect_trials(
    trials: usize,
    total_bytes: u64,
    mut on_trial: impl FnMut(&TrialEvent),
    mut time_once: impl FnMut() -> Result<Duration, BenchError>,
) -> Result<Vec<TrialSample>, BenchError> {
    let mut samples = Vec::with_capacity(trials.saturating_sub(1));
    for index in 0..trials {
        let elapsed = time_once()?;
        let sample = TrialSample::new(elapsed.as_secs_f64(), total_bytes);
        let warm_up = index == 0;
        on_trial(&TrialEvent {
            index,
            sample,
            warm_up,
        });
        if !warm_up {
            samples.push(sample);
        }
    }
    Ok(samples)
}
