//! Classified launch failures.

/// Everything that can go wrong between a launch request and a running
/// assistant.
///
/// Every dispatch path terminates in either success or exactly one of these
/// variants; automation failures after a window was already opened still
/// surface here so the user knows to finish the launch by hand.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The assistant CLI could not be resolved on this system.
    #[error(
        "assistant CLI not found; install it or point assistant_path at the binary in your config"
    )]
    AssistantNotFound,

    /// The target application is not installed.
    #[error("{0} is not installed; pick a different application or install it first")]
    ApplicationNotFound(String),

    /// The automation interpreter did not finish within its timeout.
    #[error(
        "automation timed out; the application window may already be open, run the command there manually"
    )]
    AutomationTimeout,

    /// The automation interpreter finished with an error.
    #[error(
        "automation script failed: {0}; if a window opened, run the command there manually"
    )]
    AutomationScript(String),

    /// The custom launch command could not be run.
    #[error("custom command failed: {0}")]
    CustomCommand(String),

    /// The configuration references an unknown application or a malformed
    /// custom command template.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
