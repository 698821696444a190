//! Rutube Core - Foundation types shared by the Rutube API client crates.
//!
//! This crate provides:
//! - The error taxonomy returned by every API call
//! - Client configuration (host, scheme, credentials, logging)
//! - Structured logging with tracing
//! - Wire-level constants (API prefix, endpoints, defaults)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::ClientConfig;
pub use error::{ErrorKind, RtError, RtResult};
pub use logging::init_logging;
