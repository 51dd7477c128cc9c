//! pagescout - a terminal client for page extraction backends
//!
//! This library provides both CLI and TUI interfaces for driving a
//! page-extraction/summarization server: fetch a page's structured
//! content, run the combined autopilot operation, or summarize free text.

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod tui;

pub use error::{Result, ScoutError};
