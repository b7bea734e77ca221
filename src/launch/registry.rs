//! Catalog of supported target applications.
//!
//! The registry is read-only after process start. Each descriptor fully
//! determines the dispatch strategy; nothing else in the system branches on
//! application identifiers.

use std::time::Duration;

use crate::domain::{AppDescriptor, LaunchKind, ScriptFlavor};

/// URL-scheme editors need more startup time than terminals; Windsurf is
/// the slowest of the class.
const WINDSURF_ACTIVATION_DELAY: Duration = Duration::from_millis(2500);

/// All applications termlaunch knows how to drive.
pub const CATALOG: &[AppDescriptor] = &[
    AppDescriptor {
        id: "terminal",
        display_name: "Terminal",
        bundle_id: Some("com.apple.Terminal"),
        kind: LaunchKind::ScriptInjection(ScriptFlavor::DoScript),
        activation_delay: None,
        requires_delay: false,
    },
    AppDescriptor {
        id: "iterm",
        display_name: "iTerm",
        bundle_id: Some("com.googlecode.iterm2"),
        kind: LaunchKind::ScriptInjection(ScriptFlavor::SessionWrite),
        activation_delay: None,
        requires_delay: false,
    },
    AppDescriptor {
        id: "warp",
        display_name: "Warp",
        bundle_id: Some("dev.warp.Warp-Stable"),
        kind: LaunchKind::ScriptInjection(ScriptFlavor::Keystroke),
        activation_delay: None,
        requires_delay: false,
    },
    AppDescriptor {
        id: "vscode",
        display_name: "Visual Studio Code",
        bundle_id: Some("com.microsoft.VSCode"),
        kind: LaunchKind::UrlScheme {
            scheme: "vscode",
            paced: false,
        },
        activation_delay: None,
        requires_delay: true,
    },
    AppDescriptor {
        id: "cursor",
        display_name: "Cursor",
        bundle_id: Some("com.todesktop.230313mzl4w4u92"),
        kind: LaunchKind::UrlScheme {
            scheme: "cursor",
            paced: false,
        },
        activation_delay: None,
        requires_delay: true,
    },
    AppDescriptor {
        id: "windsurf",
        display_name: "Windsurf",
        bundle_id: Some("com.exafunction.windsurf"),
        kind: LaunchKind::UrlScheme {
            scheme: "windsurf",
            paced: true,
        },
        activation_delay: Some(WINDSURF_ACTIVATION_DELAY),
        requires_delay: true,
    },
    AppDescriptor {
        id: "headless",
        display_name: "Headless",
        bundle_id: None,
        kind: LaunchKind::DirectSpawn,
        activation_delay: None,
        requires_delay: false,
    },
];

/// Look up a descriptor by its configuration identifier.
pub fn descriptor(id: &str) -> Option<&'static AppDescriptor> {
    CATALOG.iter().find(|app| app.id == id)
}

/// All known descriptors, for listings and diagnostics.
pub fn all() -> &'static [AppDescriptor] {
    CATALOG
}
