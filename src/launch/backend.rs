//! The platform seam between dispatch strategies and GUI automation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{AppDescriptor, LaunchError};

use super::engine::{ScriptEngine, ScriptRun};
use super::script::{AutomationStep, render_readiness_probe, render_script};

/// Readiness probes are short scripts; they get a tight bound of their own.
const READINESS_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Executes automation steps and opens URL handles for one platform.
///
/// The dispatcher only ever talks to this trait, which keeps the
/// platform-bound scripting behind one narrow interface and lets tests run
/// strategies against a recording stub.
#[async_trait]
pub trait AutomationBackend: Send + Sync {
    /// Run a step sequence against the application, bounded by `timeout`.
    async fn execute(
        &self,
        app: &AppDescriptor,
        steps: &[AutomationStep],
        timeout: Duration,
    ) -> Result<(), LaunchError>;

    /// Whether the application currently has a usable window (present,
    /// not hidden behind a blocking dialog).
    async fn window_ready(&self, app: &AppDescriptor) -> bool;

    /// Open a URL handle with the system opener.
    async fn open_url(&self, url: &str) -> Result<(), LaunchError>;
}

/// macOS backend: renders steps to AppleScript and feeds the interpreter.
pub struct OsaBackend {
    engine: ScriptEngine,
}

impl OsaBackend {
    pub fn new() -> Self {
        Self {
            engine: ScriptEngine::new(),
        }
    }

    pub fn with_engine(engine: ScriptEngine) -> Self {
        Self { engine }
    }
}

impl Default for OsaBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutomationBackend for OsaBackend {
    async fn execute(
        &self,
        app: &AppDescriptor,
        steps: &[AutomationStep],
        timeout: Duration,
    ) -> Result<(), LaunchError> {
        let script = render_script(app, steps);
        match self.engine.run(&script, timeout).await {
            ScriptRun::Completed => Ok(()),
            ScriptRun::TimedOut => Err(LaunchError::AutomationTimeout),
            ScriptRun::Failed(diagnostic) => Err(LaunchError::AutomationScript(diagnostic)),
        }
    }

    async fn window_ready(&self, app: &AppDescriptor) -> bool {
        // The probe errors when the window is missing or blocked, so a
        // clean exit is the readiness signal.
        let probe = render_readiness_probe(app);
        let ready = self.engine.run(&probe, READINESS_PROBE_TIMEOUT).await == ScriptRun::Completed;
        debug!("{} readiness probe: {ready}", app.id);
        ready
    }

    async fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        let status = tokio::process::Command::new("/usr/bin/open")
            .arg(url)
            .status()
            .await
            .map_err(|e| LaunchError::AutomationScript(format!("could not run open: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::AutomationScript(format!(
                "open {url} exited with {status}"
            )))
        }
    }
}
