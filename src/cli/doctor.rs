//! Doctor command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use termlaunch::config::Config;
use termlaunch::launch::{
    DetectionCache, InstallationDetector, registry, validate_template, verify_executable,
};

/// Check the assistant installation and the configuration, printing what a
/// launch would actually use.
pub async fn doctor_command(work_dir: &Path, config_file: Option<&Path>) -> Result<()> {
    let config = match config_file {
        Some(path) => Config::from_file(path)?,
        None => Config::from_dir(work_dir)?,
    };

    let detector = InstallationDetector::new(Arc::new(DetectionCache::new()));
    // Diagnostics always look at the live system, not yesterday's answers.
    detector.refresh();

    println!("termlaunch doctor\n");

    match detector.resolve_assistant_path().await {
        Some(path) => println!("  assistant CLI:    {}", path.display()),
        None => println!("  assistant CLI:    NOT FOUND (install it or set assistant_path)"),
    }

    if let Some(override_path) = &config.launcher.assistant_path {
        let state = if verify_executable(Path::new(override_path.trim())) {
            "ok"
        } else {
            "NOT EXECUTABLE"
        };
        let active = if config.launcher.use_assistant_path {
            "active"
        } else {
            "inactive"
        };
        println!("  path override:    {override_path} ({state}, {active})");
    }

    match registry::descriptor(&config.launcher.application) {
        Some(app) => println!("  application:      {} ({})", app.id, app.display_name),
        None => println!(
            "  application:      '{}' is UNKNOWN",
            config.launcher.application
        ),
    }

    if let Some(template) = &config.launcher.custom_command {
        let state = if validate_template(template) {
            "ok"
        } else {
            "MISSING {{cwd}} or {{assistant}}"
        };
        println!("  custom command:   {state}");
    }

    Ok(())
}
