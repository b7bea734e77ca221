//! Target application descriptors.
//!
//! Every application termlaunch can drive is described by an [`AppDescriptor`]
//! whose [`LaunchKind`] fully determines the dispatch strategy. Adding support
//! for a new application means adding a registry entry, not editing the
//! dispatcher.

use std::time::Duration;

/// How a scriptable application accepts an injected command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFlavor {
    /// `do script` on the application itself (Terminal.app).
    DoScript,
    /// `write text` into the current session of a freshly created window (iTerm2).
    SessionWrite,
    /// No scripting dictionary at all; driven via System Events keystrokes (Warp).
    Keystroke,
}

/// The mechanism used to get the assistant command running inside a
/// target application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    /// The application exposes a scriptable activation path; one automation
    /// script activates it, opens a window and injects the command.
    ScriptInjection(ScriptFlavor),
    /// The application is opened through a URL handle carrying the working
    /// directory, then driven by a delayed keystroke pass that opens its
    /// embedded terminal.
    ///
    /// `paced` marks applications that drop characters on whole-string
    /// injection and need the directory change and the assistant command
    /// typed as two discrete bursts.
    UrlScheme {
        scheme: &'static str,
        paced: bool,
    },
    /// No GUI automation; the assistant is spawned directly as a child
    /// process with its working directory set.
    DirectSpawn,
}

/// A supported target application.
///
/// Descriptors are immutable and defined once in the registry catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    /// Stable identifier used in configuration (e.g. `"iterm"`).
    pub id: &'static str,
    /// Human-readable name, also the `.app` bundle name on macOS.
    pub display_name: &'static str,
    /// macOS bundle identifier, when the application has one.
    pub bundle_id: Option<&'static str>,
    /// Which dispatch strategy this application needs.
    pub kind: LaunchKind,
    /// Per-application activation delay override for URL-scheme launches.
    pub activation_delay: Option<Duration>,
    /// Whether a post-activation delay is required before the secondary
    /// automation pass may run.
    pub requires_delay: bool,
}

impl AppDescriptor {
    /// Returns the process name System Events should address.
    ///
    /// For the applications in the catalog this is the display name.
    pub fn process_name(&self) -> &'static str {
        self.display_name
    }
}
