use std::process::{Command, ExitStatus};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run {cmd}: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{cmd} exited with {status}")]
    Status { cmd: String, status: ExitStatus },
}

/// Executes inventory commands. Every failure degrades to empty output.
pub trait CommandRunner: Send + Sync {
    fn try_run(&self, cmd: &str, args: &[&str]) -> Result<String, CommandError>;

    fn run(&self, cmd: &str, args: &[&str]) -> String {
        match self.try_run(cmd, args) {
            Ok(out) => out,
            Err(e) => {
                debug!(error = %e, "command failed, using empty output");
                String::new()
            }
        }
    }

    /// Total failed invocations since creation.
    fn failure_count(&self) -> usize { 0 }
}

/// Runs real processes via `std::process::Command`.
#[derive(Default)]
pub struct SystemRunner {
    failures: AtomicUsize,
}

impl SystemRunner {
    pub fn new() -> Self { Self::default() }
}

impl CommandRunner for SystemRunner {
    fn try_run(&self, cmd: &str, args: &[&str]) -> Result<String, CommandError> {
        let line = format!("{} {}", cmd, args.join(" "));
        let out = Command::new(cmd).args(args).output().map_err(|source| {
            self.failures.fetch_add(1, Ordering::Relaxed);
            CommandError::Spawn { cmd: line.trim().to_string(), source }
        })?;

        if !out.status.success() {
            self.failures.fetch_add(1, Ordering::Relaxed);
            return Err(CommandError::Status { cmd: line.trim().to_string(), status: out.status });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeRunner;
    use super::*;

    #[test]
    fn failures_degrade_to_empty_output() {
        let r = FakeRunner::new().with("lsvg", "rootvg\n");
        assert_eq!(r.run("lsvg", &[]), "rootvg\n");
        assert_eq!(r.run("lspath", &[]), "");
        assert_eq!(r.failure_count(), 1);
    }

    #[test]
    fn missing_binary_is_reported_as_spawn_error() {
        let r = SystemRunner::new();
        let err = r.try_run("/nonexistent/stgtui-test-binary", &["-x"]).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert_eq!(r.run("/nonexistent/stgtui-test-binary", &[]), "");
        assert_eq!(r.failure_count(), 2);
    }
}
