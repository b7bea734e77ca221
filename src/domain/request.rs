//! A single launch request.

use std::path::PathBuf;

use super::app::AppDescriptor;

/// Everything the dispatcher needs for one launch: the target application,
/// the directory the assistant should work in, and the fully built
/// assistant invocation string.
///
/// Created per invocation and discarded afterwards; never persisted.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// The application to launch the assistant inside.
    pub app: AppDescriptor,
    /// Absolute working directory for the assistant.
    pub working_dir: PathBuf,
    /// The assistant command, already built from the option set.
    pub assistant_command: String,
}

impl LaunchRequest {
    pub fn new(
        app: AppDescriptor,
        working_dir: impl Into<PathBuf>,
        assistant_command: impl Into<String>,
    ) -> Self {
        Self {
            app,
            working_dir: working_dir.into(),
            assistant_command: assistant_command.into(),
        }
    }
}
