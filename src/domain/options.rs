//! Assistant invocation options.
//!
//! [`LaunchOptions`] is the structured option set a caller supplies per
//! launch; the command builder turns it into the assistant CLI invocation
//! string. All fields round-trip through the TOML config store.

use serde::{Deserialize, Serialize};

/// Default value for `--max-turns`; the flag is omitted at this value.
pub const DEFAULT_MAX_TURNS: u32 = 10;

/// Sentinel model name meaning "let the assistant pick"; the flag is
/// omitted at this value.
pub const DEFAULT_MODEL: &str = "default";

/// Permission preset passed to the assistant via `--permission-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionMode {
    /// Ask before every sensitive action.
    #[default]
    Default,
    /// Auto-accept file edits, ask for everything else.
    AcceptEdits,
    /// Skip all permission prompts.
    BypassPermissions,
    /// Plan first, act only after approval.
    Plan,
    /// No preset; the explicit tool lists carry the intent.
    Custom,
}

impl PermissionMode {
    /// The value passed to `--permission-mode`, or `None` when no flag
    /// should be emitted (the default mode, and `Custom`, which the
    /// assistant CLI has no mode name for).
    pub fn flag_value(&self) -> Option<&'static str> {
        match self {
            PermissionMode::Default | PermissionMode::Custom => None,
            PermissionMode::AcceptEdits => Some("acceptEdits"),
            PermissionMode::BypassPermissions => Some("bypassPermissions"),
            PermissionMode::Plan => Some("plan"),
        }
    }

    /// Frozen snapshot of tool names a preset allowlists.
    ///
    /// Applied by the config layer only when the user has not listed tools
    /// explicitly, so an explicit list always wins. The snapshot does not
    /// track additions to the assistant CLI's tool set.
    pub fn preset_allowed_tools(&self) -> &'static [&'static str] {
        match self {
            PermissionMode::AcceptEdits => &["Edit", "MultiEdit", "Write", "NotebookEdit"],
            PermissionMode::BypassPermissions => &[
                "Bash",
                "Edit",
                "MultiEdit",
                "Write",
                "NotebookEdit",
                "WebFetch",
                "WebSearch",
            ],
            _ => &[],
        }
    }
}

/// The structured option set for one assistant invocation.
///
/// Immutable during a single launch; identical option sets always produce
/// identical command strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchOptions {
    /// Permission preset.
    #[serde(default)]
    pub permission_mode: PermissionMode,

    /// Emit `--dangerously-skip-permissions`.
    #[serde(default)]
    pub skip_permissions: bool,

    /// Tools the assistant may use without asking (`--allowedTools`).
    #[serde(default)]
    pub allowed_tools: Vec<String>,

    /// Tools the assistant must never use (`--disallowedTools`).
    #[serde(default)]
    pub disallowed_tools: Vec<String>,

    /// Model selector; [`DEFAULT_MODEL`] omits the flag.
    #[serde(default = "default_model")]
    pub model: String,

    /// Resume the most recent conversation (`--continue`).
    #[serde(default)]
    pub continue_session: bool,

    /// Turn limit; [`DEFAULT_MAX_TURNS`] omits the flag.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Emit `--verbose`.
    #[serde(default)]
    pub verbose: bool,

    /// Extra directories the assistant may access, one `--add-dir` each.
    #[serde(default)]
    pub add_dirs: Vec<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            permission_mode: PermissionMode::default(),
            skip_permissions: false,
            allowed_tools: Vec::new(),
            disallowed_tools: Vec::new(),
            model: default_model(),
            continue_session: false,
            max_turns: default_max_turns(),
            verbose: false,
            add_dirs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert_eq!(PermissionMode::Default.flag_value(), None);
        assert_eq!(PermissionMode::Custom.flag_value(), None);
        assert_eq!(PermissionMode::AcceptEdits.flag_value(), Some("acceptEdits"));
        assert_eq!(
            PermissionMode::BypassPermissions.flag_value(),
            Some("bypassPermissions")
        );
        assert_eq!(PermissionMode::Plan.flag_value(), Some("plan"));
    }

    #[test]
    fn test_presets_only_for_permissive_modes() {
        assert!(PermissionMode::Default.preset_allowed_tools().is_empty());
        assert!(PermissionMode::Plan.preset_allowed_tools().is_empty());
        assert!(!PermissionMode::AcceptEdits.preset_allowed_tools().is_empty());
        assert!(
            !PermissionMode::BypassPermissions
                .preset_allowed_tools()
                .is_empty()
        );
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: LaunchOptions = toml::from_str("").unwrap();
        assert_eq!(options, LaunchOptions::default());
        assert_eq!(options.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(options.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_options_deserialize_camel_case_mode() {
        let options: LaunchOptions =
            toml::from_str(r#"permission_mode = "acceptEdits""#).unwrap();
        assert_eq!(options.permission_mode, PermissionMode::AcceptEdits);
    }
}
