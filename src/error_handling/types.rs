//! Error type definitions.
//!
//! This module defines the typed errors used at the crate's seams and the
//! enum of signal sources whose degradations are counted during a batch.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error building the TLS client configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(#[from] rustls::Error),
}

/// Invalid user-supplied settings or input.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An option holds a value outside its accepted range.
    #[error("Invalid value for --{option}: {reason}")]
    InvalidValue {
        /// CLI option name (without leading dashes)
        option: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// LLM enrichment was requested without an API key.
    #[error("LLM enrichment requested but no API key configured (set OPENROUTER_API_KEY or --llm-api-key)")]
    MissingLlmApiKey,

    /// No domains were supplied on the command line or in the input file.
    #[error("No domains to analyze")]
    NoDomains,

    /// More domains were supplied than the batch limit allows.
    #[error("{count} domains supplied but at most {limit} are accepted per batch")]
    TooManyDomains {
        /// Number of domains supplied
        count: usize,
        /// Configured limit
        limit: usize,
    },
}

/// A domain name that cannot be analyzed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Nothing left after trimming the scheme, path and `www.` prefix.
    #[error("empty domain name")]
    Empty,

    /// The name is syntactically invalid.
    #[error("invalid domain name '{domain}': {reason}")]
    Invalid {
        /// The offending (normalized) name
        domain: String,
        /// What is wrong with it
        reason: &'static str,
    },
}

/// Failure of one external signal source.
///
/// Never escapes a fetcher: it is logged and turned into a degraded result.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source did not answer within the configured timeout.
    #[error("{0} timed out")]
    Timeout(String),

    /// Connection-level failure (refused, reset, unreachable).
    #[error("connection to {target} failed: {source}")]
    Connect {
        /// Host or host:port that was dialed
        target: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// DNS resolver error other than "no records".
    #[error("DNS lookup failed: {0}")]
    Dns(#[from] hickory_resolver::error::ResolveError),

    /// HTTP transport or status error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// TLS handshake or certificate decoding error.
    #[error("TLS probe failed: {0}")]
    Tls(String),

    /// WHOIS protocol error (no server, unreadable answer, ...).
    #[error("WHOIS query failed: {0}")]
    Whois(String),

    /// Upstream answered with something we could not interpret.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Errors from the LLM enrichment collaborator.
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key was provided in the configuration.
    #[error("OpenRouter API key not configured")]
    MissingApiKey,

    /// Transport failure talking to the completion API.
    #[error("LLM request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The API answered with a non-success status.
    #[error("LLM API error: {status} - {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// The completion response held no message content.
    #[error("LLM response contained no choices")]
    EmptyResponse,
}

/// External signal sources consulted for every domain.
///
/// Used as the key for degradation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Display)]
pub enum SignalSource {
    /// DNS record lookups
    #[strum(to_string = "DNS")]
    Dns,
    /// WHOIS registration lookup
    #[strum(to_string = "WHOIS")]
    Whois,
    /// TLS certificate probe
    #[strum(to_string = "TLS")]
    Tls,
    /// Wayback Machine lookups
    #[strum(to_string = "Web archive")]
    WebArchive,
}
