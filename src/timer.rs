use std::fs::File;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::errors::BenchError;
use crate::types::{InputSpec, Target};

/// Outcome of one timed invocation.
#[derive(Debug, Clone, Copy)]
pub struct Invocation {
    pub elapsed: Duration,
    pub status: ExitStatus,
}

/// Runs `target` once with a freshly opened `input` on stdin and stdout
/// discarded, returning the wall-clock time from just before spawn to just
/// after exit. Stderr is inherited.
pub fn time_invocation(target: &Target, input: &InputSpec) -> Result<Invocation, BenchError> {
    let stdin = File::open(&input.path).map_err(|source| BenchError::InputUnreadable {
        path: input.path.clone(),
        source,
    })?;

    debug!(program = %target.program, args = ?target.args, "spawning trial");

    let start = Instant::now();
    let status = Command::new(&target.program)
        .args(&target.args)
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| BenchError::Spawn {
            program: target.program.clone(),
            source,
        })?;
    let elapsed = start.elapsed();

    Ok(Invocation { elapsed, status })
}
