use std::path::{Path, PathBuf};

use crate::errors::BenchError;

/// Bytes per gigabyte used for every reported rate.
pub const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// One benchmarked command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub program: String,
    pub args: Vec<String>,
}

impl Target {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Target {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The program and its arguments joined by single spaces. Used as the report key.
    pub fn label(&self) -> String {
        let mut label = self.program.clone();
        for arg in &self.args {
            label.push(' ');
            label.push_str(arg);
        }
        label
    }
}

/// Rejects an empty list or two targets sharing a label.
pub fn check_targets(targets: &[Target]) -> Result<(), BenchError> {
    if targets.is_empty() {
        return Err(BenchError::NoTargets);
    }
    let mut seen: Vec<String> = Vec::with_capacity(targets.len());
    for target in targets {
        let label = target.label();
        if seen.contains(&label) {
            return Err(BenchError::DuplicateLabel { label });
        }
        seen.push(label);
    }
    Ok(())
}

/// The file fed to every target on stdin. Its size is read once.
#[derive(Debug, Clone)]
pub struct InputSpec {
    pub path: PathBuf,
    pub size: u64,
}

impl InputSpec {
    pub fn from_path(path: &Path) -> Result<Self, BenchError> {
        let metadata = std::fs::metadata(path).map_err(|source| BenchError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(BenchError::InputUnreadable {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        Ok(InputSpec {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    pub fn gigabytes(&self) -> f64 {
        self.size as f64 / BYTES_PER_GB
    }
}

/// One timed invocation: elapsed seconds and the implied GB/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialSample {
    pub seconds: f64,
    pub rate: f64,
}

impl TrialSample {
    pub fn new(seconds: f64, total_bytes: u64) -> Self {
        TrialSample {
            seconds,
            rate: rate_gb_per_sec(seconds, total_bytes),
        }
    }
}

pub fn rate_gb_per_sec(seconds: f64, total_bytes: u64) -> f64 {
    total_bytes as f64 / BYTES_PER_GB / seconds
}

/// A time/rate pair as printed on one report line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub seconds: f64,
    pub rate: f64,
}

impl Measurement {
    pub fn from_elapsed(seconds: f64, total_bytes: u64) -> Self {
        Measurement {
            seconds,
            rate: rate_gb_per_sec(seconds, total_bytes),
        }
    }
}

impl From<TrialSample> for Measurement {
    fn from(sample: TrialSample) -> Self {
        Measurement {
            seconds: sample.seconds,
            rate: sample.rate,
        }
    }
}

/// Sample standard deviations of the time and rate series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispersion {
    pub seconds: f64,
    pub rate: f64,
}

/// Summary statistics for one target's non-warm-up trials.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetStats {
    pub samples: usize,
    pub best: f64,
    pub average: f64,
    pub mean_rate: f64,
    pub dispersion: Option<Dispersion>,
}

/// What to do when a target exits with a non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    #[default]
    Record,
    Fail,
}
