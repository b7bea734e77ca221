//! Configuration loading and management

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::LaunchOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Launcher settings: which application, delays, overrides
    #[serde(default)]
    pub launcher: LauncherSettings,

    /// The assistant option set
    #[serde(default)]
    pub options: LaunchOptions,
}

/// Launcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherSettings {
    /// Identifier of the target application (see the registry catalog)
    #[serde(default = "default_application")]
    pub application: String,

    /// Delay in milliseconds between opening a URL-scheme application and
    /// the keystroke pass; applications with their own override ignore it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_delay_ms: Option<u64>,

    /// Custom launch command for the headless application. `{{cwd}}` and
    /// `{{assistant}}` are substituted exactly once each at launch time;
    /// quoting is the template author's responsibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_command: Option<String>,

    /// Explicit path to the assistant binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_path: Option<String>,

    /// Use `assistant_path` instead of resolving the binary from PATH
    #[serde(default)]
    pub use_assistant_path: bool,
}

fn default_application() -> String {
    "terminal".to_string()
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            application: default_application(),
            activation_delay_ms: None,
            custom_command: None,
            assistant_path: None,
            use_assistant_path: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for: .termlaunch/config.toml (preferred) or termlaunch.toml (legacy)
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let new_path = dir.join(".termlaunch/config.toml");
        if new_path.exists() {
            return Self::from_file(&new_path);
        }

        let legacy_path = dir.join("termlaunch.toml");
        if legacy_path.exists() {
            return Self::from_file(&legacy_path);
        }

        Ok(Self::default())
    }

    /// The option set with the permission preset applied: when the user has
    /// not listed tools explicitly, the chosen mode's frozen tool snapshot
    /// becomes the allowlist. An explicit list always wins.
    pub fn effective_options(&self) -> LaunchOptions {
        let mut options = self.options.clone();
        if options.allowed_tools.is_empty() {
            options.allowed_tools = options
                .permission_mode
                .preset_allowed_tools()
                .iter()
                .map(|tool| tool.to_string())
                .collect();
        }
        options
    }

    /// The user-configured activation delay, if any.
    pub fn activation_delay(&self) -> Option<Duration> {
        self.launcher.activation_delay_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PermissionMode;
    use std::fs;

    #[test]
    fn test_empty_config_gets_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.launcher.application, "terminal");
        assert!(!config.launcher.use_assistant_path);
        assert_eq!(config.options, LaunchOptions::default());
    }

    #[test]
    fn test_from_dir_prefers_new_location() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".termlaunch")).unwrap();
        fs::write(
            dir.path().join(".termlaunch/config.toml"),
            "[launcher]\napplication = \"iterm\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("termlaunch.toml"),
            "[launcher]\napplication = \"warp\"\n",
        )
        .unwrap();

        let config = Config::from_dir(dir.path()).unwrap();
        assert_eq!(config.launcher.application, "iterm");
    }

    #[test]
    fn test_from_dir_falls_back_to_legacy_then_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Config::from_dir(dir.path()).unwrap().launcher.application,
            "terminal"
        );

        fs::write(
            dir.path().join("termlaunch.toml"),
            "[launcher]\napplication = \"vscode\"\n",
        )
        .unwrap();
        assert_eq!(
            Config::from_dir(dir.path()).unwrap().launcher.application,
            "vscode"
        );
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("termlaunch.toml"), "launcher = 42").unwrap();
        assert!(Config::from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_effective_options_applies_preset_snapshot() {
        let config: Config =
            toml::from_str("[options]\npermission_mode = \"acceptEdits\"\n").unwrap();
        let options = config.effective_options();
        assert_eq!(options.permission_mode, PermissionMode::AcceptEdits);
        assert_eq!(
            options.allowed_tools,
            vec!["Edit", "MultiEdit", "Write", "NotebookEdit"]
        );
    }

    #[test]
    fn test_explicit_tools_beat_the_preset() {
        let config: Config = toml::from_str(
            "[options]\npermission_mode = \"acceptEdits\"\nallowed_tools = [\"Edit\"]\n",
        )
        .unwrap();
        assert_eq!(config.effective_options().allowed_tools, vec!["Edit"]);
    }

    #[test]
    fn test_options_round_trip() {
        let mut config = Config::default();
        config.launcher.application = "windsurf".to_string();
        config.launcher.activation_delay_ms = Some(2000);
        config.options.model = "opus".to_string();
        config.options.max_turns = 25;

        let serialized = toml::to_string(&config).unwrap();
        let restored: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(restored.launcher.application, "windsurf");
        assert_eq!(restored.activation_delay(), Some(Duration::from_millis(2000)));
        assert_eq!(restored.options.model, "opus");
        assert_eq!(restored.options.max_turns, 25);
    }
}
