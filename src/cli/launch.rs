//! Launch command implementation

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use termlaunch::config::Config;
use termlaunch::domain::{LaunchError, LaunchRequest};
use termlaunch::launch::{
    DetectionCache, InstallationDetector, LaunchDispatcher, OsaBackend, build_command, registry,
    verify_executable,
};
use termlaunch::workspace::{ConsoleNotifier, CurrentDirWorkspace, Notifier, WorkspaceContext};

const NOTIFY_SHORT: Duration = Duration::from_secs(4);
const NOTIFY_LONG: Duration = Duration::from_secs(8);

/// Launch the assistant in the configured (or overridden) application,
/// pointed at the workspace directory.
pub async fn launch_command(
    work_dir: &Path,
    config_file: Option<&Path>,
    app_override: Option<&str>,
) -> Result<()> {
    let config = match config_file {
        Some(path) => Config::from_file(path)?,
        None => Config::from_dir(work_dir)?,
    };
    let notifier = ConsoleNotifier;

    let app_id = app_override.unwrap_or(&config.launcher.application);
    let Some(app) = registry::descriptor(app_id) else {
        let err = LaunchError::InvalidConfiguration(format!("unknown application '{app_id}'"));
        notifier.notify(&err.to_string(), NOTIFY_LONG);
        return Err(err.into());
    };

    // A broken path override should fail before anything is spawned.
    let use_override = config.launcher.use_assistant_path;
    let override_path = config.launcher.assistant_path.clone().unwrap_or_default();
    if use_override && !verify_executable(Path::new(override_path.trim())) {
        let err = LaunchError::InvalidConfiguration(format!(
            "assistant_path '{override_path}' is not an executable file"
        ));
        notifier.notify(&err.to_string(), NOTIFY_LONG);
        return Err(err.into());
    }

    let workspace = CurrentDirWorkspace::resolved(work_dir);
    let command = build_command(&config.effective_options(), use_override, &override_path);

    let detector = InstallationDetector::new(Arc::new(DetectionCache::new()));
    let dispatcher = LaunchDispatcher::new(detector, Arc::new(OsaBackend::new()))
        .with_configured_delay(config.activation_delay())
        .with_custom_command(config.launcher.custom_command.clone());

    let request = LaunchRequest::new(*app, workspace.active_working_directory(), command);
    match dispatcher.launch(&request).await {
        Ok(()) => {
            notifier.notify(
                &format!("Assistant launched in {}", app.display_name),
                NOTIFY_SHORT,
            );
            Ok(())
        }
        Err(err) => {
            notifier.notify(&err.to_string(), NOTIFY_LONG);
            Err(err.into())
        }
    }
}
