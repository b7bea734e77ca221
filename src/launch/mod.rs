//! The terminal-launch orchestration core.
//!
//! Everything between "the user picked an application" and "the assistant
//! is running inside it" lives here:
//!
//! - **[`registry`]** - the catalog of supported target applications.
//! - **[`detect`]** - installation detection, cached in [`cache`].
//! - **[`command`]** - deterministic assistant command construction.
//! - **[`script`]** / **[`engine`]** / **[`backend`]** - GUI-automation
//!   steps, their AppleScript rendering, and the interpreter that runs
//!   them under a timeout.
//! - **[`dispatch`]** - the state machine that picks a strategy per
//!   descriptor and drives it to exactly one outcome.

pub mod backend;
pub mod cache;
pub mod command;
pub mod detect;
pub mod dispatch;
pub mod engine;
pub mod escape;
pub mod registry;
pub mod script;

pub use backend::{AutomationBackend, OsaBackend};
pub use cache::{DETECTION_CACHE_TTL, DetectionCache};
pub use command::{ASSISTANT_BINARY, build_command, substitute_template, validate_template};
pub use detect::{InstallProbe, InstallationDetector, SpotlightProbe, verify_executable};
pub use dispatch::{DEFAULT_ACTIVATION_DELAY, LaunchDispatcher};
pub use engine::{AUTOMATION_TIMEOUT, ScriptEngine, ScriptRun};
pub use script::{AutomationStep, TextPacing};
