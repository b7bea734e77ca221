//! Assistant command construction.
//!
//! Turns a [`LaunchOptions`] set into the assistant CLI invocation string.
//! Construction is pure and the flag order is fixed: automation scripts
//! embed the result verbatim, so identical inputs must yield byte-identical
//! commands.

use crate::domain::{DEFAULT_MAX_TURNS, DEFAULT_MODEL, LaunchOptions};

use super::escape::shell_quote;

/// Name of the assistant CLI binary when no path override is set.
pub const ASSISTANT_BINARY: &str = "claude";

/// Build the assistant invocation from an option set.
///
/// Flag order is fixed: permission mode, skip-permissions, allowed tools,
/// disallowed tools, model, continue, max-turns, verbose, add-dirs. Flags
/// at their default values are omitted. Paths pass through [`shell_quote`];
/// everything else in the option set is a closed vocabulary.
pub fn build_command(options: &LaunchOptions, use_override: bool, override_path: &str) -> String {
    let mut cmd = if use_override && !override_path.trim().is_empty() {
        shell_quote(override_path.trim())
    } else {
        ASSISTANT_BINARY.to_string()
    };

    if let Some(mode) = options.permission_mode.flag_value() {
        cmd.push_str(" --permission-mode ");
        cmd.push_str(mode);
    }

    if options.skip_permissions {
        cmd.push_str(" --dangerously-skip-permissions");
    }

    if !options.allowed_tools.is_empty() {
        cmd.push_str(" --allowedTools ");
        cmd.push_str(&options.allowed_tools.join(","));
    }

    if !options.disallowed_tools.is_empty() {
        cmd.push_str(" --disallowedTools ");
        cmd.push_str(&options.disallowed_tools.join(","));
    }

    if !options.model.is_empty() && options.model != DEFAULT_MODEL {
        cmd.push_str(" --model ");
        cmd.push_str(&options.model);
    }

    if options.continue_session {
        cmd.push_str(" --continue");
    }

    if options.max_turns != DEFAULT_MAX_TURNS {
        cmd.push_str(&format!(" --max-turns {}", options.max_turns));
    }

    if options.verbose {
        cmd.push_str(" --verbose");
    }

    for dir in &options.add_dirs {
        if dir.trim().is_empty() {
            continue;
        }
        cmd.push_str(" --add-dir ");
        cmd.push_str(&shell_quote(dir));
    }

    cmd
}

/// Substitute a custom command template.
///
/// `{{cwd}}` and `{{assistant}}` are each replaced exactly once, unescaped;
/// the template author is responsible for quoting.
pub fn substitute_template(template: &str, cwd: &str, assistant: &str) -> String {
    template
        .replacen("{{cwd}}", cwd, 1)
        .replacen("{{assistant}}", assistant, 1)
}

/// A custom template is usable only if both placeholders appear.
pub fn validate_template(template: &str) -> bool {
    template.contains("{{cwd}}") && template.contains("{{assistant}}")
}
