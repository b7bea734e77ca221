//! Executes automation scripts through the OS script interpreter.

use std::process::Stdio;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Default bound on a single automation run.
pub const AUTOMATION_TIMEOUT: Duration = Duration::from_secs(10);

/// The macOS automation interpreter.
const DEFAULT_INTERPRETER: &str = "osascript";

/// Two automation scripts fighting over the same application window make a
/// mess; runs are serialized process-wide.
static AUTOMATION_GATE: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// Outcome of one script run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptRun {
    Completed,
    /// The interpreter did not finish in time and was killed.
    TimedOut,
    /// The interpreter exited non-zero; carries its diagnostic output.
    Failed(String),
}

/// Runs script text through the automation interpreter with a hard timeout.
///
/// The script is written to the interpreter's stdin (not passed via `-e`),
/// which sidesteps argument-length limits and per-line quoting. No retries
/// happen at this layer; that is a dispatch decision.
pub struct ScriptEngine {
    interpreter: String,
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self::with_interpreter(DEFAULT_INTERPRETER)
    }

    /// Use a different interpreter program. Tests substitute `/bin/sh`.
    pub fn with_interpreter(program: impl Into<String>) -> Self {
        Self {
            interpreter: program.into(),
        }
    }

    /// Execute `script` and wait at most `timeout` for completion.
    ///
    /// A run that outlives the timeout is forcibly terminated and reported
    /// as [`ScriptRun::TimedOut`].
    pub async fn run(&self, script: &str, timeout: Duration) -> ScriptRun {
        let _gate = AUTOMATION_GATE.lock().await;

        debug!(interpreter = %self.interpreter, bytes = script.len(), "running automation script");

        let mut child = match Command::new(&self.interpreter)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("failed to start {}: {e}", self.interpreter);
                return ScriptRun::Failed(format!("could not start {}: {e}", self.interpreter));
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(script.as_bytes()).await {
                warn!("failed to feed script to {}: {e}", self.interpreter);
                return ScriptRun::Failed(format!("could not write script: {e}"));
            }
            // Dropping stdin closes the pipe so the interpreter starts.
        }

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) if output.status.success() => ScriptRun::Completed,
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let diagnostic = if stderr.is_empty() {
                    format!("{} exited with {}", self.interpreter, output.status)
                } else {
                    stderr
                };
                ScriptRun::Failed(diagnostic)
            }
            Ok(Err(e)) => ScriptRun::Failed(format!("could not collect interpreter output: {e}")),
            // The timeout drops the child future; kill_on_drop reaps the
            // interpreter process.
            Err(_) => {
                warn!(
                    "automation script exceeded {}s, killed",
                    timeout.as_secs_f32()
                );
                ScriptRun::TimedOut
            }
        }
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // /bin/sh reads a script from stdin exactly like osascript does, so it
    // stands in for the interpreter on any platform.
    fn sh_engine() -> ScriptEngine {
        ScriptEngine::with_interpreter("/bin/sh")
    }

    #[tokio::test]
    async fn test_successful_run_completes() {
        let run = sh_engine().run("exit 0", Duration::from_secs(5)).await;
        assert_eq!(run, ScriptRun::Completed);
    }

    #[tokio::test]
    async fn test_failure_carries_diagnostics() {
        let run = sh_engine()
            .run("echo boom >&2; exit 3", Duration::from_secs(5))
            .await;
        match run {
            ScriptRun::Failed(diagnostic) => assert!(diagnostic.contains("boom")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_without_stderr_reports_status() {
        let run = sh_engine().run("exit 7", Duration::from_secs(5)).await;
        match run {
            ScriptRun::Failed(diagnostic) => assert!(diagnostic.contains("exit")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stalled_interpreter_times_out() {
        let started = std::time::Instant::now();
        let run = sh_engine().run("sleep 30", Duration::from_millis(200)).await;
        assert_eq!(run, ScriptRun::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_a_script_failure() {
        let engine = ScriptEngine::with_interpreter("/nonexistent/interpreter");
        let run = engine.run("exit 0", Duration::from_secs(1)).await;
        assert!(matches!(run, ScriptRun::Failed(_)));
    }
}
