//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client (web archive and LLM calls)
//! - DNS resolver
//! - TLS connector for the certificate probe
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;
mod tls;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
pub use tls::init_tls_connector;

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls` so that reqwest's
/// rustls backend and the certificate probe agree on one provider. Call it
/// once before any TLS connection is established.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
