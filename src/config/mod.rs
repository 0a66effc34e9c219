//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry policy, endpoints)
//! - CLI option types and parsing
//! - Validation of user-supplied settings

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputFormat};
