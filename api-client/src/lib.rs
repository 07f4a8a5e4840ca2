//! Authenticated HTTP client for the boards API
//!
//! Wraps `reqwest` with the credential pair the API expects as query
//! parameters on every call, and exposes typed endpoint methods for the
//! audit, management, and export flows. All requests within a run reuse a
//! single client and execute strictly one after another.

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod manage;
pub mod org;

pub use client::ApiClient;
pub use config::{ApiConfig, Credentials};
pub use error::{ApiError, Result};
pub use export::{ExportApi, ExportPoller, ExportStatus};
