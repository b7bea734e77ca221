//! The launch state machine.
//!
//! A request flows `Detecting → {script | URL | direct-spawn} → outcome`.
//! Strategy selection comes entirely from the descriptor's [`LaunchKind`];
//! the dispatcher never branches on application identifiers. Every
//! automation failure is caught here and classified; nothing below this
//! layer reaches the caller unwrapped, and every strategy reaches an
//! outcome in bounded time even when the automation layer stalls.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{AppDescriptor, LaunchError, LaunchKind, LaunchRequest, ScriptFlavor};

use super::backend::AutomationBackend;
use super::command::{substitute_template, validate_template};
use super::detect::InstallationDetector;
use super::engine::AUTOMATION_TIMEOUT;
use super::escape::shell_quote;
use super::script::{AutomationStep, TextPacing};

/// Fallback delay between opening a URL handle and the keystroke pass.
pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_millis(1500);

/// Bounded readiness poll: at most this many probes, spaced this far apart.
const READINESS_POLL_LIMIT: usize = 10;
const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Settle pauses around keystroke bursts.
const ACTIVATE_SETTLE: Duration = Duration::from_millis(400);
const WINDOW_SETTLE: Duration = Duration::from_millis(600);
const TERMINAL_TOGGLE_SETTLE: Duration = Duration::from_millis(500);
const PACED_BURST_SETTLE: Duration = Duration::from_millis(300);

/// Grace added on top of the engine timeout so the engine's own kill fires
/// first and the dispatcher bound only catches a wedged backend.
const DISPATCH_TIMEOUT_GRACE: Duration = Duration::from_millis(500);

/// Drives a [`LaunchRequest`] to exactly one outcome.
pub struct LaunchDispatcher {
    detector: InstallationDetector,
    backend: Arc<dyn AutomationBackend>,
    automation_timeout: Duration,
    configured_delay: Option<Duration>,
    custom_command: Option<String>,
}

impl LaunchDispatcher {
    pub fn new(detector: InstallationDetector, backend: Arc<dyn AutomationBackend>) -> Self {
        Self {
            detector,
            backend,
            automation_timeout: AUTOMATION_TIMEOUT,
            configured_delay: None,
            custom_command: None,
        }
    }

    /// Bound for each automation run.
    pub fn with_automation_timeout(mut self, timeout: Duration) -> Self {
        self.automation_timeout = timeout;
        self
    }

    /// User-configured activation delay, used when the descriptor has no
    /// override of its own.
    pub fn with_configured_delay(mut self, delay: Option<Duration>) -> Self {
        self.configured_delay = delay;
        self
    }

    /// Custom launch template for direct spawns; `{{cwd}}` and
    /// `{{assistant}}` are substituted at launch time.
    pub fn with_custom_command(mut self, template: Option<String>) -> Self {
        self.custom_command = template;
        self
    }

    /// Run the request to completion or a classified failure.
    pub async fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        debug!(app = request.app.id, "detecting assistant CLI");
        if self.detector.resolve_assistant_path().await.is_none() {
            return Err(LaunchError::AssistantNotFound);
        }

        match request.app.kind {
            LaunchKind::ScriptInjection(flavor) => self.run_script_strategy(request, flavor).await,
            LaunchKind::UrlScheme { scheme, paced } => {
                self.run_url_strategy(request, scheme, paced).await
            }
            LaunchKind::DirectSpawn => self.run_direct_spawn(request).await,
        }
    }

    async fn require_installed(&self, app: &AppDescriptor) -> Result<(), LaunchError> {
        if self.detector.is_installed(app).await {
            Ok(())
        } else {
            Err(LaunchError::ApplicationNotFound(
                app.display_name.to_string(),
            ))
        }
    }

    async fn run_script_strategy(
        &self,
        request: &LaunchRequest,
        flavor: ScriptFlavor,
    ) -> Result<(), LaunchError> {
        self.require_installed(&request.app).await?;

        let text = format!(
            "cd {} && clear && {}",
            shell_quote(&request.working_dir.to_string_lossy()),
            request.assistant_command
        );

        let mut steps = vec![AutomationStep::Activate];
        match flavor {
            ScriptFlavor::DoScript => {}
            ScriptFlavor::SessionWrite => steps.push(AutomationStep::EnsureWindow),
            ScriptFlavor::Keystroke => {
                // The one fallback-dependent application: try the File menu
                // once, otherwise the new-window combination, before typing.
                steps.push(AutomationStep::Wait(ACTIVATE_SETTLE));
                steps.push(AutomationStep::MenuOrShortcut {
                    menu: Some(("File", "New Window")),
                    key: "n",
                    modifiers: &["command down"],
                });
                steps.push(AutomationStep::Wait(WINDOW_SETTLE));
            }
        }
        steps.push(AutomationStep::InjectText {
            text,
            pacing: TextPacing::Whole,
        });
        steps.push(AutomationStep::Submit);

        info!("launching assistant in {}", request.app.display_name);
        self.bounded_execute(&request.app, &steps).await
    }

    async fn run_url_strategy(
        &self,
        request: &LaunchRequest,
        scheme: &str,
        paced: bool,
    ) -> Result<(), LaunchError> {
        self.require_installed(&request.app).await?;

        let url = file_url(scheme, &request.working_dir);
        info!("opening {} via {url}", request.app.display_name);
        self.backend.open_url(&url).await?;

        if request.app.requires_delay {
            let delay = request
                .app
                .activation_delay
                .or(self.configured_delay)
                .unwrap_or(DEFAULT_ACTIVATION_DELAY);
            debug!("waiting {}ms before keystroke pass", delay.as_millis());
            tokio::time::sleep(delay).await;
        }

        self.await_window(&request.app).await;

        let cd = format!(
            "cd {}",
            shell_quote(&request.working_dir.to_string_lossy())
        );

        let mut steps = vec![
            AutomationStep::Activate,
            AutomationStep::Wait(ACTIVATE_SETTLE),
            // The editor-integrated terminal toggle.
            AutomationStep::MenuOrShortcut {
                menu: None,
                key: "`",
                modifiers: &["control down"],
            },
            AutomationStep::Wait(TERMINAL_TOGGLE_SETTLE),
        ];

        if paced {
            // Whole-string injection drops characters in this application
            // class; type the directory change and the command as two
            // bursts with settle pauses.
            steps.push(AutomationStep::InjectText {
                text: cd,
                pacing: TextPacing::Paced {
                    settle: PACED_BURST_SETTLE,
                },
            });
            steps.push(AutomationStep::Submit);
            steps.push(AutomationStep::Wait(ACTIVATE_SETTLE));
            steps.push(AutomationStep::InjectText {
                text: request.assistant_command.clone(),
                pacing: TextPacing::Paced {
                    settle: PACED_BURST_SETTLE,
                },
            });
        } else {
            steps.push(AutomationStep::InjectText {
                text: format!("{cd} && {}", request.assistant_command),
                pacing: TextPacing::Whole,
            });
        }
        steps.push(AutomationStep::Submit);

        self.bounded_execute(&request.app, &steps).await
    }

    /// Poll until the application shows a usable window. Bounded; a window
    /// that never appears is not fatal here; the keystroke pass will
    /// surface the real failure with manual-completion guidance.
    async fn await_window(&self, app: &AppDescriptor) {
        for attempt in 1..=READINESS_POLL_LIMIT {
            let probe = tokio::time::timeout(
                READINESS_POLL_INTERVAL * 4,
                self.backend.window_ready(app),
            );
            if matches!(probe.await, Ok(true)) {
                debug!("{} ready after {attempt} probe(s)", app.id);
                return;
            }
            tokio::time::sleep(READINESS_POLL_INTERVAL).await;
        }
        warn!(
            "{} showed no usable window after {READINESS_POLL_LIMIT} probes, proceeding anyway",
            app.id
        );
    }

    async fn run_direct_spawn(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        let command = match &self.custom_command {
            Some(template) => {
                if !validate_template(template) {
                    return Err(LaunchError::InvalidConfiguration(
                        "custom command must contain {{cwd}} and {{assistant}}".to_string(),
                    ));
                }
                substitute_template(
                    template,
                    &request.working_dir.to_string_lossy(),
                    &request.assistant_command,
                )
            }
            None => request.assistant_command.clone(),
        };

        let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
        info!("spawning assistant directly: {command}");

        tokio::process::Command::new(shell)
            .arg("-c")
            .arg(&command)
            .current_dir(&request.working_dir)
            .spawn()
            .map(|_child| ())
            .map_err(|e| LaunchError::CustomCommand(format!("{command}: {e}")))
    }

    /// Execute steps with an outer bound so even a wedged backend cannot
    /// keep a request from reaching its outcome.
    async fn bounded_execute(
        &self,
        app: &AppDescriptor,
        steps: &[AutomationStep],
    ) -> Result<(), LaunchError> {
        let bound = self.automation_timeout + DISPATCH_TIMEOUT_GRACE;
        match tokio::time::timeout(
            bound,
            self.backend.execute(app, steps, self.automation_timeout),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(LaunchError::AutomationTimeout),
        }
    }
}

/// Build a `scheme://file/<path>` URL, percent-encoding each path segment
/// while keeping the separators.
fn file_url(scheme: &str, path: &Path) -> String {
    let encoded: Vec<String> = path
        .to_string_lossy()
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{scheme}://file{}", encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_url_encodes_segments_not_separators() {
        let url = file_url("vscode", &PathBuf::from("/Users/me/my notes"));
        assert_eq!(url, "vscode://file/Users/me/my%20notes");
    }

    #[test]
    fn test_file_url_plain_path() {
        let url = file_url("cursor", &PathBuf::from("/tmp/project"));
        assert_eq!(url, "cursor://file/tmp/project");
    }
}
