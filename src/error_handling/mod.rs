//! Error handling and degradation statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, configuration, fetching and LLM calls
//! - Per-source degradation counters
//!
//! Fetch errors never reach the caller of the analyzer: each fetcher turns them
//! into a degraded (empty) result and the counters record that it happened.

mod stats;
mod types;

// Re-export public API
pub use stats::DegradationStats;
pub use types::{
    ConfigError, DomainError, FetchError, InitializationError, LlmError, SignalSource,
};
