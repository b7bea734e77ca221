//! GUI-automation steps and their AppleScript rendering.
//!
//! Dispatch strategies are expressed as a flat sequence of
//! [`AutomationStep`]s, then rendered into one script per run. Keeping the
//! platform-bound script text behind this seam lets tests drive the
//! dispatcher with a recording backend and would let a non-macOS backend
//! interpret the same steps differently.

use std::fmt::Write as _;
use std::time::Duration;

use crate::domain::{AppDescriptor, LaunchKind, ScriptFlavor};

use super::escape::applescript_escape;

/// How injected text is typed into the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPacing {
    /// One keystroke call with the whole string.
    Whole,
    /// Type the burst, then settle before the next action. Needed by
    /// applications that drop characters on long injections.
    Paced { settle: Duration },
}

/// One GUI action against the target application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationStep {
    /// Bring the application to the foreground.
    Activate,
    /// Make sure a window exists to type into.
    EnsureWindow,
    /// Invoke a named menu item, falling back to a key combination if the
    /// menu is unavailable; with no menu, just send the combination.
    MenuOrShortcut {
        menu: Option<(&'static str, &'static str)>,
        key: &'static str,
        modifiers: &'static [&'static str],
    },
    /// Type text into the focused element.
    InjectText { text: String, pacing: TextPacing },
    /// Press return.
    Submit,
    /// Sleep inside the script.
    Wait(Duration),
}

fn delay_line(out: &mut String, indent: &str, duration: Duration) {
    let _ = writeln!(out, "{indent}delay {}", duration.as_secs_f32());
}

/// Render a step sequence into one AppleScript for the given application.
///
/// Terminal and iTerm use their own scripting dictionaries; everything else
/// is driven through System Events keystrokes.
pub fn render_script(app: &AppDescriptor, steps: &[AutomationStep]) -> String {
    match app.kind {
        LaunchKind::ScriptInjection(ScriptFlavor::DoScript) => render_do_script(steps),
        LaunchKind::ScriptInjection(ScriptFlavor::SessionWrite) => render_session_write(steps),
        LaunchKind::ScriptInjection(ScriptFlavor::Keystroke) | LaunchKind::UrlScheme { .. } => {
            render_system_events(app.process_name(), steps)
        }
        // Direct spawns never reach the automation layer.
        LaunchKind::DirectSpawn => String::new(),
    }
}

/// `do script` opens its own window and runs the text, so the whole
/// sequence collapses into one tell block.
fn render_do_script(steps: &[AutomationStep]) -> String {
    let text = injected_text(steps);
    format!(
        "tell application \"Terminal\"\n\tactivate\n\tdo script \"{}\"\nend tell\n",
        applescript_escape(&text)
    )
}

fn render_session_write(steps: &[AutomationStep]) -> String {
    let text = injected_text(steps);
    format!(
        "tell application \"iTerm\"\n\
         \tactivate\n\
         \tcreate window with default profile\n\
         \ttell current session of current window\n\
         \t\twrite text \"{}\"\n\
         \tend tell\n\
         end tell\n",
        applescript_escape(&text)
    )
}

fn render_system_events(process: &str, steps: &[AutomationStep]) -> String {
    let mut out = String::new();
    let mut body = String::new();
    let indent = "\t\t";

    for step in steps {
        match step {
            AutomationStep::Activate => {
                let _ = writeln!(
                    out,
                    "tell application \"{}\" to activate",
                    applescript_escape(process)
                );
            }
            // Keystroke targets get their window via MenuOrShortcut; there
            // is nothing generic to ensure here.
            AutomationStep::EnsureWindow => {}
            AutomationStep::MenuOrShortcut {
                menu,
                key,
                modifiers,
            } => {
                let combo = keystroke_line(key, modifiers);
                match menu {
                    Some((menu_name, item)) => {
                        let _ = writeln!(body, "{indent}try");
                        let _ = writeln!(
                            body,
                            "{indent}\tclick menu item \"{}\" of menu \"{}\" of menu bar 1",
                            applescript_escape(item),
                            applescript_escape(menu_name)
                        );
                        let _ = writeln!(body, "{indent}on error");
                        let _ = writeln!(body, "{indent}\t{combo}");
                        let _ = writeln!(body, "{indent}end try");
                    }
                    None => {
                        let _ = writeln!(body, "{indent}{combo}");
                    }
                }
            }
            AutomationStep::InjectText { text, pacing } => {
                let _ = writeln!(body, "{indent}keystroke \"{}\"", applescript_escape(text));
                if let TextPacing::Paced { settle } = pacing {
                    delay_line(&mut body, indent, *settle);
                }
            }
            AutomationStep::Submit => {
                let _ = writeln!(body, "{indent}key code 36");
            }
            AutomationStep::Wait(duration) => {
                delay_line(&mut body, indent, *duration);
            }
        }
    }

    let _ = writeln!(out, "tell application \"System Events\"");
    let _ = writeln!(
        out,
        "\ttell process \"{}\"",
        applescript_escape(process)
    );
    out.push_str(&body);
    let _ = writeln!(out, "\tend tell");
    let _ = writeln!(out, "end tell");
    out
}

fn keystroke_line(key: &str, modifiers: &[&str]) -> String {
    if modifiers.is_empty() {
        format!("keystroke \"{}\"", applescript_escape(key))
    } else {
        format!(
            "keystroke \"{}\" using {{{}}}",
            applescript_escape(key),
            modifiers.join(", ")
        )
    }
}

fn injected_text(steps: &[AutomationStep]) -> String {
    steps
        .iter()
        .find_map(|step| match step {
            AutomationStep::InjectText { text, .. } => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

/// A probe script that errors unless the application has a usable window:
/// running, at least one window, and no blocking sheet in front of it.
pub fn render_readiness_probe(app: &AppDescriptor) -> String {
    let process = applescript_escape(app.process_name());
    format!(
        "tell application \"System Events\"\n\
         \tif not (exists process \"{process}\") then error \"not running\"\n\
         \ttell process \"{process}\"\n\
         \t\tif (count of windows) is 0 then error \"no window\"\n\
         \t\tif exists sheet 1 of window 1 then error \"blocked by dialog\"\n\
         \tend tell\n\
         end tell\n"
    )
}
