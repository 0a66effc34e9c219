//! Configuration constants.
//!
//! This module defines the constants used as defaults throughout the analyzer:
//! network timeouts, retry policy for WHOIS, service endpoints and batch limits.

// Network operation timeouts
/// DNS query timeout in seconds
/// Most DNS queries complete in <1s, 3s provides a buffer while failing fast
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Number of attempts the resolver makes per query before giving up
pub const DNS_ATTEMPTS: usize = 2;
/// TCP connect + TLS handshake timeout in seconds for the certificate probe
pub const TLS_TIMEOUT_SECS: u64 = 5;
/// Port the certificate probe connects to
pub const TLS_PORT: u16 = 443;
/// Per-request timeout for web-archive calls in seconds
pub const ARCHIVE_TIMEOUT_SECS: u64 = 10;
/// Per-server WHOIS connect/read timeout in seconds
pub const WHOIS_TIMEOUT_SECS: u64 = 10;
/// Timeout for a single LLM completion request in seconds
pub const LLM_TIMEOUT_SECS: u64 = 30;

// WHOIS retry policy
/// Maximum number of WHOIS attempts (including the initial attempt)
pub const WHOIS_MAX_ATTEMPTS: usize = 3;
/// Fixed delay between WHOIS attempts in seconds
pub const WHOIS_RETRY_DELAY_SECS: u64 = 2;

// WHOIS protocol
/// WHOIS TCP port
pub const WHOIS_PORT: u16 = 43;
/// Root server used to discover the authoritative WHOIS server for a TLD
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";
/// Maximum WHOIS response size in bytes (1MB)
pub const MAX_WHOIS_RESPONSE_SIZE: usize = 1024 * 1024;
/// Maximum registry -> registrar referral hops
pub const MAX_WHOIS_REFERRALS: usize = 2;

// Web archive endpoints
/// Wayback Machine availability API base URL
pub const WAYBACK_AVAILABILITY_URL: &str = "http://archive.org/wayback/available";
/// Wayback Machine CDX index base URL
pub const WAYBACK_CDX_URL: &str = "http://web.archive.org/cdx/search/cdx";

// LLM enrichment
/// OpenRouter-compatible chat completion API base URL
pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default model used for narrative summaries
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-3.5-turbo";
/// Default prompt prepended to the domain summary
pub const DEFAULT_LLM_PROMPT: &str = "Analyze the following domain data and provide insights about its quality, potential, and recommendations for use.";
/// Sampling temperature for narrative summaries
pub const LLM_TEMPERATURE: f32 = 0.7;
/// Token ceiling for one narrative summary
pub const LLM_MAX_TOKENS: u32 = 1000;
/// System message framing every completion request
pub const LLM_SYSTEM_PROMPT: &str = "You are a domain analysis expert. Provide detailed, actionable insights about domain quality and potential.";
/// Attribution headers OpenRouter shows in its dashboard
pub const LLM_REFERER: &str = "https://drop-analyzer.com";
pub const LLM_TITLE: &str = "Drop Analyzer";
/// Longest API error body kept in `LlmError::Api`
pub const LLM_ERROR_BODY_LIMIT: usize = 500;

// Batch limits
/// Default maximum number of domains accepted in one batch
pub const DEFAULT_MAX_DOMAINS_PER_BATCH: usize = 10;
/// Hard ceiling for `--max-domains-per-batch`
pub const MAX_DOMAINS_PER_BATCH_LIMIT: usize = 10_000;

/// User-Agent sent to the web archive and LLM endpoints
pub const DEFAULT_USER_AGENT: &str = concat!("drop_analyzer/", env!("CARGO_PKG_VERSION"));

// Domain name limits (RFC 1035)
/// Maximum length of a full domain name
pub const MAX_DOMAIN_LENGTH: usize = 253;
/// Maximum length of a single label
pub const MAX_LABEL_LENGTH: usize = 63;
