//! Command-line interface module
//!
//! One-shot subcommands for scripting the backend without the TUI.

pub mod actions;
pub mod commands;
pub mod config;
