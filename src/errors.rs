use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Failed to read input file {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{label}' exited with {status}")]
    NonZeroExit { label: String, status: String },

    #[error("Cannot compute {statistic}: needs at least {needed} samples, got {got}")]
    InsufficientSamples {
        statistic: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("Duplicate target label '{label}'")]
    DuplicateLabel { label: String },

    #[error("No targets configured")]
    NoTargets,

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Build in {dir} failed: {detail}")]
    BuildFailed { dir: PathBuf, detail: String },
}
