//! Core functionality: configuration and shared helpers

pub mod config;

pub use config::Config;
