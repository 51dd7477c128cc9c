//! Terminal User Interface module
//!
//! ratatui-based TUI: one screen with a URL bar, six content regions and
//! a status bar.

pub mod app;
pub mod event;
pub mod panels;
pub mod theme;
pub mod ui;

pub use app::App;
