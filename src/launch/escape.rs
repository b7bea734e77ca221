//! Shell and AppleScript escaping helpers.

/// Quote a string for a double-quoted shell context.
///
/// Escapes the four characters the shell interprets inside double quotes
/// (`\`, `"`, `$`, backtick) and wraps the result in double quotes, so the
/// shell reads back exactly the original string.
///
/// # Example
///
/// ```ignore
/// assert_eq!(shell_quote("plain"), "\"plain\"");
/// assert_eq!(shell_quote("my $HOME"), "\"my \\$HOME\"");
/// ```
pub fn shell_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Escape a string for interpolation into an AppleScript string literal.
///
/// Backslashes first, then double quotes; the caller supplies the
/// surrounding quotes in the script template.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a string as a complete AppleScript string literal.
pub fn applescript_quote(s: &str) -> String {
    format!("\"{}\"", applescript_escape(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_shell_quote_plain() {
        assert_eq!(shell_quote("hello"), "\"hello\"");
    }

    #[test]
    fn test_shell_quote_specials() {
        assert_eq!(shell_quote(r#"a "b" $c"#), r#""a \"b\" \$c""#);
        assert_eq!(shell_quote(r"back\slash"), r#""back\\slash""#);
        assert_eq!(shell_quote("tick`tock"), "\"tick\\`tock\"");
    }

    // The shell must read back exactly the original string.
    #[test]
    fn test_shell_quote_round_trips_through_sh() {
        let nasty = r#"it's a "test" with \back\slashes, $dollars, `ticks` and  spaces"#;
        let output = Command::new("sh")
            .arg("-c")
            .arg(format!("printf %s {}", shell_quote(nasty)))
            .output()
            .expect("sh should be available");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), nasty);
    }

    #[test]
    fn test_applescript_escape_round_trip() {
        let nasty = r#"say "hi" \ and $PATH"#;
        let escaped = applescript_escape(nasty);
        // Undo AppleScript literal escaping the way the interpreter would.
        let mut restored = String::new();
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                restored.push(chars.next().expect("dangling escape"));
            } else {
                restored.push(c);
            }
        }
        assert_eq!(restored, nasty);
    }

    #[test]
    fn test_applescript_quote_wraps() {
        assert_eq!(applescript_quote("a \"b\""), r#""a \"b\"""#);
    }
}
