//! External collaborator contracts.
//!
//! The launcher does not care where the working directory comes from or how
//! the user is told about outcomes; both arrive through these seams.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

/// Supplies the directory context a launch points the assistant at.
pub trait WorkspaceContext {
    /// The directory derived from the user's current document.
    fn active_working_directory(&self) -> PathBuf;

    /// The root of the whole workspace.
    fn root_directory(&self) -> PathBuf;
}

/// CLI-side context: an explicit directory, or the process working
/// directory.
pub struct CurrentDirWorkspace {
    root: PathBuf,
}

impl CurrentDirWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve relative roots against the process working directory.
    pub fn resolved(root: &Path) -> Self {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(root))
                .unwrap_or_else(|_| root.to_path_buf())
        };
        Self::new(root)
    }
}

impl WorkspaceContext for CurrentDirWorkspace {
    fn active_working_directory(&self) -> PathBuf {
        self.root.clone()
    }

    fn root_directory(&self) -> PathBuf {
        self.root.clone()
    }
}

/// Tells the user what happened.
pub trait Notifier {
    fn notify(&self, message: &str, duration_hint: Duration);
}

/// Prints to stdout and mirrors into the log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, _duration_hint: Duration) {
        info!("{message}");
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_root_is_kept() {
        let workspace = CurrentDirWorkspace::resolved(Path::new("/work/notes"));
        assert_eq!(
            workspace.active_working_directory(),
            PathBuf::from("/work/notes")
        );
    }

    #[test]
    fn test_relative_root_is_resolved() {
        let workspace = CurrentDirWorkspace::resolved(Path::new("."));
        assert!(workspace.root_directory().is_absolute());
    }
}
