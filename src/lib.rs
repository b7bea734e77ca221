//! termlaunch
//!
//! termlaunch opens an external AI coding assistant CLI inside the terminal
//! or editor you already use, pointed at your current working directory.
//! Scriptable terminals get a generated automation script; URL-scheme
//! editors are opened through their URL handle and then driven with
//! delayed keystrokes; everything else is a plain process spawn.

pub mod config;
pub mod domain;
pub mod launch;
pub mod workspace;

pub use domain::*;
