//! Apps command implementation

use std::sync::Arc;

use anyhow::Result;

use termlaunch::launch::{DetectionCache, InstallationDetector, registry};

/// List every supported application with its detection state.
pub async fn apps_command(refresh: bool) -> Result<()> {
    let detector = InstallationDetector::new(Arc::new(DetectionCache::new()));
    if refresh {
        detector.refresh();
    }

    println!("Supported applications:\n");
    for app in registry::all() {
        let installed = detector.is_installed(app).await;
        let marker = if installed { "✓" } else { " " };
        println!("  [{marker}] {:<10} {}", app.id, app.display_name);
    }

    Ok(())
}
