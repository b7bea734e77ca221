//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

/// Default configuration content for termlaunch init
pub const DEFAULT_CONFIG: &str = r#"# termlaunch configuration
# ========================

[launcher]
# Which application to launch the assistant inside.
# Scriptable terminals: terminal, iterm, warp
# URL-scheme editors:   vscode, cursor, windsurf
# No GUI at all:        headless
application = "terminal"

# Milliseconds to wait between opening a URL-scheme editor and typing into
# its embedded terminal. Applications with a known slower startup use their
# own default instead.
# activation_delay_ms = 1500

# Launch command for the headless application. {{cwd}} and {{assistant}}
# are each substituted exactly once; you are responsible for quoting.
# custom_command = "tmux new-window 'cd {{cwd}} && {{assistant}}'"

# Explicit path to the assistant binary, used when use_assistant_path = true.
# assistant_path = "/opt/homebrew/bin/claude"
use_assistant_path = false

[options]
# default | acceptEdits | bypassPermissions | plan | custom
permission_mode = "default"
skip_permissions = false
allowed_tools = []
disallowed_tools = []
model = "default"
continue_session = false
max_turns = 10
verbose = false
add_dirs = []
"#;

/// Write a commented default config into `.termlaunch/config.toml`.
pub async fn init_command(work_dir: &Path, force: bool) -> Result<()> {
    let config_dir = work_dir.join(".termlaunch");
    let config_path = config_dir.join("config.toml");

    if config_path.exists() && !force {
        bail!(
            "{} already exists; use --force to overwrite",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    info!("wrote {}", config_path.display());
    println!("Created {}", config_path.display());
    Ok(())
}
