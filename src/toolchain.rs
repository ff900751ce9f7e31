use std::process::Command;

use tracing::info;

use crate::config::BuildConfig;
use crate::errors::BenchError;

/// `cargo +<toolchain> build --release`
pub fn build_command(config: &BuildConfig) -> Vec<String> {
    vec![
        "cargo".to_string(),
        format!("+{}", config.toolchain),
        "build".to_string(),
        "--release".to_string(),
    ]
}

/// Builds the binary under test in `config.project_dir`. Targets refer to the
/// result through [`BuildConfig::binary_path`].
/// The command line is echoed to stdout before it runs.
pub fn build(config: &BuildConfig) -> Result<(), BenchError> {
    let argv = build_command(config);
    println!("{}", argv.join(" "));
    info!(dir = %config.project_dir.display(), "building binary under test");

    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .current_dir(&config.project_dir)
        .status()
        .map_err(|e| BenchError::BuildFailed {
            dir: config.project_dir.clone(),
            detail: e.to_string(),
        })?;

    if !status.success() {
        return Err(BenchError::BuildFailed {
            dir: config.project_dir.clone(),
            detail: format!("cargo exited with {}", status),
        });
    }

    Ok(())
}
