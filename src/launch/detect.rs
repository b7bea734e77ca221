//! Installation detection for target applications and the assistant CLI.
//!
//! Detection never errors: a probe that fails resolves to "not installed"
//! and the result, positive or negative, lands in the [`DetectionCache`]
//! so genuinely absent applications are not re-probed within the TTL.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::AppDescriptor;

use super::cache::DetectionCache;
use super::command::ASSISTANT_BINARY;

/// Standard application directories, probed in order.
const APPLICATION_DIRS: &[&str] = &[
    "/Applications",
    "/System/Applications",
    "/System/Applications/Utilities",
];

/// Conventional assistant install locations relative to `$HOME`, probed in
/// order after the shell search path.
const HOME_ASSISTANT_DIRS: &[&str] = &[".claude/local", ".local/bin", ".npm-global/bin", "bin"];

/// System-wide assistant install locations, probed between the two.
const SYSTEM_ASSISTANT_DIRS: &[&str] = &["/opt/homebrew/bin", "/usr/local/bin"];

/// The probing seam: one implementation talks to the real OS, tests swap in
/// counting stubs.
#[async_trait]
pub trait InstallProbe: Send + Sync {
    /// Whether the application is present on this system. Must not error;
    /// failures inside individual probes degrade to `false`.
    async fn probe_installed(&self, app: &AppDescriptor) -> bool;

    /// Locate the assistant executable itself.
    async fn resolve_assistant(&self) -> Option<PathBuf>;
}

/// Real probe chain: bundle-identifier lookup, standard application
/// directories, then a Spotlight name search. First positive wins.
pub struct SpotlightProbe;

#[async_trait]
impl InstallProbe for SpotlightProbe {
    async fn probe_installed(&self, app: &AppDescriptor) -> bool {
        if let Some(bundle_id) = app.bundle_id {
            if query_bundle_identifier(bundle_id).await {
                debug!("{} found by bundle id {bundle_id}", app.id);
                return true;
            }
        }

        if scan_application_dirs(app.display_name) {
            debug!("{} found in a standard application directory", app.id);
            return true;
        }

        if spotlight_name_search(app.display_name).await {
            debug!("{} found via Spotlight name search", app.id);
            return true;
        }

        debug!("{} not found by any probe", app.id);
        false
    }

    async fn resolve_assistant(&self) -> Option<PathBuf> {
        if let Ok(path) = which::which(ASSISTANT_BINARY) {
            debug!("assistant resolved on PATH: {}", path.display());
            return Some(path);
        }

        // ~/.claude/local first, then system dirs, then the remaining
        // per-user locations, the order installers lay the binary down.
        let mut candidates: Vec<PathBuf> = Vec::new();
        let home = dirs::home_dir();
        if let Some(home) = &home {
            candidates.push(home.join(HOME_ASSISTANT_DIRS[0]));
        }
        candidates.extend(SYSTEM_ASSISTANT_DIRS.iter().map(PathBuf::from));
        if let Some(home) = &home {
            candidates.extend(HOME_ASSISTANT_DIRS[1..].iter().map(|dir| home.join(dir)));
        }

        for dir in candidates {
            let path = dir.join(ASSISTANT_BINARY);
            if verify_executable(&path) {
                debug!("assistant resolved at {}", path.display());
                return Some(path);
            }
        }

        None
    }
}

/// Ask Spotlight's metadata index whether anything carries the bundle id.
async fn query_bundle_identifier(bundle_id: &str) -> bool {
    let query = format!("kMDItemCFBundleIdentifier == '{bundle_id}'");
    match Command::new("mdfind").arg(&query).output().await {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .lines()
            .any(|line| !line.trim().is_empty()),
        Ok(_) => false,
        Err(e) => {
            warn!("bundle id probe failed for {bundle_id}: {e}");
            false
        }
    }
}

/// Look for `<display name>.app` in the fixed directory list, then under
/// the user's home.
fn scan_application_dirs(display_name: &str) -> bool {
    let bundle = format!("{display_name}.app");

    for dir in APPLICATION_DIRS {
        if Path::new(dir).join(&bundle).exists() {
            return true;
        }
    }

    if let Some(home) = dirs::home_dir() {
        if home.join("Applications").join(&bundle).exists() {
            return true;
        }
    }

    false
}

/// Last resort: a system-wide content-index search by bundle name.
async fn spotlight_name_search(display_name: &str) -> bool {
    let bundle = format!("{display_name}.app");
    match Command::new("mdfind").args(["-name", &bundle]).output().await {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .lines()
            .any(|line| Path::new(line.trim()).exists()),
        Ok(_) => false,
        Err(e) => {
            warn!("Spotlight name search failed for {bundle}: {e}");
            false
        }
    }
}

/// Whether a specific path exists and is executable. Used for
/// user-supplied overrides and diagnostics.
pub fn verify_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    true
}

/// Resolves installed/not-installed state through the cache.
pub struct InstallationDetector {
    cache: Arc<DetectionCache>,
    probe: Arc<dyn InstallProbe>,
}

impl InstallationDetector {
    pub fn new(cache: Arc<DetectionCache>) -> Self {
        Self::with_probe(cache, Arc::new(SpotlightProbe))
    }

    /// Use a custom probe. Tests inject deterministic stubs here.
    pub fn with_probe(cache: Arc<DetectionCache>, probe: Arc<dyn InstallProbe>) -> Self {
        Self { cache, probe }
    }

    /// Whether the application is installed, consulting the cache first.
    /// Never errors; a failed probe reads as "not installed".
    pub async fn is_installed(&self, app: &AppDescriptor) -> bool {
        if let Some(cached) = self.cache.get(app.id) {
            debug!("{} detection served from cache: {cached}", app.id);
            return cached;
        }

        let installed = self.probe.probe_installed(app).await;
        self.cache.set(app.id, installed);
        installed
    }

    /// Locate the assistant executable: shell search path first, then the
    /// conventional install locations.
    pub async fn resolve_assistant_path(&self) -> Option<PathBuf> {
        self.probe.resolve_assistant().await
    }

    /// Drop all cached detection state so the next queries re-probe.
    /// Used by diagnostics.
    pub fn refresh(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingProbe {
        answer: bool,
        calls: AtomicUsize,
    }

    impl CountingProbe {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl InstallProbe for CountingProbe {
        async fn probe_installed(&self, _app: &AppDescriptor) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }

        async fn resolve_assistant(&self) -> Option<PathBuf> {
            Some(PathBuf::from("/usr/local/bin/claude"))
        }
    }

    fn terminal() -> &'static AppDescriptor {
        crate::launch::registry::descriptor("terminal").unwrap()
    }

    #[tokio::test]
    async fn test_second_query_within_ttl_hits_cache() {
        let probe = Arc::new(CountingProbe::new(true));
        let detector =
            InstallationDetector::with_probe(Arc::new(DetectionCache::new()), probe.clone());

        assert!(detector.is_installed(terminal()).await);
        assert!(detector.is_installed(terminal()).await);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_query_after_expiry_reprobes() {
        let probe = Arc::new(CountingProbe::new(true));
        let cache = Arc::new(DetectionCache::with_ttl(Duration::from_millis(20)));
        let detector = InstallationDetector::with_probe(cache, probe.clone());

        assert!(detector.is_installed(terminal()).await);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(detector.is_installed(terminal()).await);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    // An app confirmed absent stays absent for the TTL even though the
    // probe would now answer differently.
    #[tokio::test]
    async fn test_negative_result_is_cached() {
        let cache = Arc::new(DetectionCache::new());
        let absent = Arc::new(CountingProbe::new(false));
        let detector = InstallationDetector::with_probe(cache.clone(), absent.clone());

        assert!(!detector.is_installed(terminal()).await);
        assert_eq!(cache.get("terminal"), Some(false));

        // Swap in a probe that would say yes; the cache still answers no.
        let present = Arc::new(CountingProbe::new(true));
        let detector = InstallationDetector::with_probe(cache, present.clone());
        assert!(!detector.is_installed(terminal()).await);
        assert_eq!(present.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_forces_reprobe() {
        let probe = Arc::new(CountingProbe::new(true));
        let detector =
            InstallationDetector::with_probe(Arc::new(DetectionCache::new()), probe.clone());

        detector.is_installed(terminal()).await;
        detector.refresh();
        detector.is_installed(terminal()).await;
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_verify_executable() {
        let dir = tempfile::tempdir().unwrap();

        let script = dir.path().join("assistant");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&script).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&script, perms).unwrap();
        }
        assert!(verify_executable(&script));

        let plain = dir.path().join("notes.txt");
        fs::write(&plain, "hello").unwrap();
        #[cfg(unix)]
        assert!(!verify_executable(&plain));

        assert!(!verify_executable(&dir.path().join("missing")));
        assert!(!verify_executable(dir.path()));
    }
}
