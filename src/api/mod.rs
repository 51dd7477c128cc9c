//! Backend API module
//!
//! Wire types and the HTTP client for the extraction server.

pub mod client;
pub mod models;

pub use client::{Backend, HttpBackend};
pub use models::{AutopilotResponse, ExtractionResult, PageMeta, SummaryResponse};
