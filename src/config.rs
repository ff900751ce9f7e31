use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::BenchError;
use crate::stats;
use crate::types::{ExitPolicy, Target, check_targets};

/// Placeholder command that resolves to the freshly built binary.
pub const BUILT_PLACEHOLDER: &str = "@built";

pub const DEFAULT_TRIALS: usize = 10;

/// On-disk configuration. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub trials: Option<usize>,
    pub strict_exit: Option<bool>,
    pub stdev: Option<bool>,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BuildConfig {
    pub enabled: bool,
    pub project_dir: PathBuf,
    pub toolchain: String,
    pub binary: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            enabled: true,
            project_dir: PathBuf::from("b2sum"),
            toolchain: "nightly".to_string(),
            binary: PathBuf::from("target/release/b2sum"),
        }
    }
}

impl BuildConfig {
    pub fn binary_path(&self) -> PathBuf {
        self.project_dir.join(&self.binary)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Command-line values that override the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub trials: Option<usize>,
    pub no_build: bool,
    pub no_stdev: bool,
    pub strict_exit: bool,
}

/// Fully resolved run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub trials: usize,
    pub stdev: bool,
    pub exit_policy: ExitPolicy,
    pub build: BuildConfig,
    pub targets: Vec<Target>,
}

impl Settings {
    /// Rejects settings that could never produce a report: an empty or
    /// ambiguous target list, or too few trials for the requested statistics.
    pub fn validate(&self) -> Result<(), BenchError> {
        check_targets(&self.targets)?;
        stats::check_trial_count(self.trials, self.stdev)
    }
}

/// `$XDG_CONFIG_HOME/sumbench/config.toml` (or the platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sumbench").join("config.toml"))
}

pub fn load_file(path: &Path) -> Result<FileConfig, BenchError> {
    let text = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, path)
}

fn parse(text: &str, path: &Path) -> Result<FileConfig, BenchError> {
    toml::from_str(text).map_err(|e| BenchError::ConfigParse {
        path: path.to_path_buf(),
        detail: e.message().to_string(),
    })
}

/// Loads the explicit config if given, else the default location if it exists,
/// else built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig, BenchError> {
    if let Some(path) = explicit {
        return load_file(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => load_file(&path),
        _ => Ok(FileConfig::default()),
    }
}

/// md5sum, sha1sum, sha512sum, the system b2sum, and the built binary with
/// and without `--mmap`.
pub fn default_targets(built: &Path) -> Vec<Target> {
    let built = built.to_string_lossy().to_string();
    vec![
        Target::new("md5sum", &[]),
        Target::new("sha1sum", &[]),
        Target::new("sha512sum", &[]),
        Target::new("/usr/bin/b2sum", &[]),
        Target::new(built.clone(), &[]),
        Target::new(built, &["--mmap"]),
    ]
}

/// Merge file config, overrides and defaults into run settings.
pub fn resolve(file: FileConfig, overrides: &Overrides) -> Settings {
    let mut build = file.build;
    if overrides.no_build {
        build.enabled = false;
    }

    let built = build.binary_path();
    let targets = if file.targets.is_empty() {
        default_targets(&built)
    } else {
        file.targets
            .into_iter()
            .map(|t| {
                let program = if t.command == BUILT_PLACEHOLDER {
                    built.to_string_lossy().to_string()
                } else {
                    t.command
                };
                Target {
                    program,
                    args: t.args,
                }
            })
            .collect()
    };

    let exit_policy = if overrides.strict_exit || file.strict_exit.unwrap_or(false) {
        ExitPolicy::Fail
    } else {
        ExitPolicy::Record
    };

    Settings {
        trials: overrides.trials.or(file.trials).unwrap_or(DEFAULT_TRIALS),
        stdev: !overrides.no_stdev && file.stdev.unwrap_or(true),
        exit_policy,
        build,
        targets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(text: &str) -> Result<FileConfig, BenchError> {
        parse(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = resolve(parse_str("").unwrap(), &Overrides::default());
        assert_eq!(settings.trials, DEFAULT_TRIALS);
        assert!(settings.stdev);
        assert_eq!(settings.exit_policy, ExitPolicy::Record);
        assert!(settings.build.enabled);
        let labels: Vec<String> = settings.targets.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec![
                "md5sum",
                "sha1sum",
                "sha512sum",
                "/usr/bin/b2sum",
                "b2sum/target/release/b2sum",
                "b2sum/target/release/b2sum --mmap",
            ]
        );
    }

    #[test]
    fn file_values_are_applied() {
        let file = parse_str(
            r#"
trials = 4
strict_exit = true
stdev = false

[build]
enabled = false
project_dir = "/src/b2"

[[targets]]
command = "cat"

[[targets]]
command = "@built"
args = ["--mmap"]
"#,
        )
        .unwrap();
        let settings = resolve(file, &Overrides::default());
        assert_eq!(settings.trials, 4);
        assert!(!settings.stdev);
        assert_eq!(settings.exit_policy, ExitPolicy::Fail);
        assert!(!settings.build.enabled);
        assert_eq!(settings.build.toolchain, "nightly");
        assert_eq!(settings.targets[0].label(), "cat");
        assert_eq!(settings.targets[1].label(), "/src/b2/target/release/b2sum --mmap");
    }

    #[test]
    fn overrides_win_over_file() {
        let file = parse_str("trials = 4\nstdev = true\n").unwrap();
        let overrides = Overrides {
            trials: Some(7),
            no_build: true,
            no_stdev: true,
            strict_exit: true,
        };
        let settings = resolve(file, &overrides);
        assert_eq!(settings.trials, 7);
        assert!(!settings.stdev);
        assert!(!settings.build.enabled);
        assert_eq!(settings.exit_policy, ExitPolicy::Fail);
    }

    #[test]
    fn validate_rejects_duplicate_targets() {
        let file = parse_str("[[targets]]\ncommand = \"cat\"\n\n[[targets]]\ncommand = \"cat\"\n").unwrap();
        let settings = resolve(file, &Overrides::default());
        assert!(matches!(settings.validate(), Err(BenchError::DuplicateLabel { .. })));
    }

    #[test]
    fn validate_rejects_too_few_trials() {
        let settings = resolve(parse_str("trials = 2\n").unwrap(), &Overrides::default());
        assert!(matches!(
            settings.validate(),
            Err(BenchError::InsufficientSamples { needed: 2, got: 1, .. })
        ));

        let no_stdev = Overrides {
            no_stdev: true,
            ..Overrides::default()
        };
        let settings = resolve(parse_str("trials = 2\n").unwrap(), &no_stdev);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_str("trails = 3\n").unwrap_err();
        assert!(matches!(err, BenchError::ConfigParse { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/sumbench.toml"))).unwrap_err();
        assert!(matches!(err, BenchError::ConfigRead { .. }));
    }
}
