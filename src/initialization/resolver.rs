//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver used for record lookups.
///
/// Uses the default upstream configuration (Google public DNS) with short
/// timeouts so a slow server cannot stall the analysis of a domain.
///
/// # Arguments
///
/// * `timeout` - Per-query timeout
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
pub fn init_resolver(timeout: Duration) -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = crate::config::DNS_ATTEMPTS;
    // Prevent search-domain appending: every query is for a fully qualified name
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
