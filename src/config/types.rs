//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and the runtime settings handed to the signal fetchers.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::*;
use crate::error_handling::ConfigError;
use crate::fetch::ProbeSettings;
use crate::llm::LlmConfig;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One pretty-printed JSON document holding the whole batch result
    Json,
    /// One JSON object per analyzed domain, one per line
    Jsonl,
}

/// Command-line options and configuration.
///
/// Every option has a default, mirrored by `Config::default()` so the struct
/// can also be built programmatically.
///
/// # Examples
///
/// ```bash
/// # Analyze two domains
/// drop_analyzer example.com example.org
///
/// # Read domains from a file, skip the web archive, bound the whole batch to 2 minutes
/// drop_analyzer --file drops.txt --no-archive --batch-timeout-secs 120
///
/// # Add an LLM narrative (key read from OPENROUTER_API_KEY)
/// drop_analyzer example.com --llm
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "drop_analyzer",
    version,
    about = "Scores expired and dropped domains from DNS, WHOIS, TLS and web-archive signals."
)]
pub struct Config {
    /// Domains to analyze
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// File with one domain per line (blank lines and `#` comments are skipped)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Write results to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Result format: json|jsonl
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,

    /// TLS connect/handshake timeout in seconds
    #[arg(long, default_value_t = TLS_TIMEOUT_SECS)]
    pub tls_timeout_secs: u64,

    /// Per-server WHOIS timeout in seconds
    #[arg(long, default_value_t = WHOIS_TIMEOUT_SECS)]
    pub whois_timeout_secs: u64,

    /// Maximum WHOIS attempts per domain (including the first)
    #[arg(long, default_value_t = WHOIS_MAX_ATTEMPTS)]
    pub whois_max_attempts: usize,

    /// Fixed delay between WHOIS attempts in seconds
    #[arg(long, default_value_t = WHOIS_RETRY_DELAY_SECS)]
    pub whois_retry_delay_secs: u64,

    /// Web-archive request timeout in seconds
    #[arg(long, default_value_t = ARCHIVE_TIMEOUT_SECS)]
    pub archive_timeout_secs: u64,

    /// Skip the web-archive lookups
    #[arg(long)]
    pub no_archive: bool,

    /// Bound the total wall-clock time of the batch (seconds)
    ///
    /// Domains not started before the deadline are left out and the result is
    /// marked as cancelled.
    #[arg(long)]
    pub batch_timeout_secs: Option<u64>,

    /// Maximum number of domains accepted in one run
    #[arg(long, default_value_t = DEFAULT_MAX_DOMAINS_PER_BATCH)]
    pub max_domains_per_batch: usize,

    /// Enrich every successful record with an LLM narrative summary
    #[arg(long)]
    pub llm: bool,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    /// Model identifier passed to the completion API
    #[arg(long, default_value = DEFAULT_LLM_MODEL)]
    pub llm_model: String,

    /// Prompt prepended to the domain summary
    #[arg(long, default_value = DEFAULT_LLM_PROMPT)]
    pub llm_prompt: String,

    /// Chat completion API base URL
    #[arg(long, default_value = DEFAULT_LLM_BASE_URL)]
    pub llm_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            file: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: None,
            format: OutputFormat::Json,
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            tls_timeout_secs: TLS_TIMEOUT_SECS,
            whois_timeout_secs: WHOIS_TIMEOUT_SECS,
            whois_max_attempts: WHOIS_MAX_ATTEMPTS,
            whois_retry_delay_secs: WHOIS_RETRY_DELAY_SECS,
            archive_timeout_secs: ARCHIVE_TIMEOUT_SECS,
            no_archive: false,
            batch_timeout_secs: None,
            max_domains_per_batch: DEFAULT_MAX_DOMAINS_PER_BATCH,
            llm: false,
            llm_api_key: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_prompt: DEFAULT_LLM_PROMPT.to_string(),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Checks that the configured values make sense before any network work starts.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("dns-timeout-secs", self.dns_timeout_secs),
            ("tls-timeout-secs", self.tls_timeout_secs),
            ("whois-timeout-secs", self.whois_timeout_secs),
            ("archive-timeout-secs", self.archive_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    option: name,
                    reason: "must be greater than 0".to_string(),
                });
            }
        }

        if self.whois_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                option: "whois-max-attempts",
                reason: "at least one attempt is required".to_string(),
            });
        }

        if self.max_domains_per_batch == 0
            || self.max_domains_per_batch > MAX_DOMAINS_PER_BATCH_LIMIT
        {
            return Err(ConfigError::InvalidValue {
                option: "max-domains-per-batch",
                reason: format!("must be between 1 and {MAX_DOMAINS_PER_BATCH_LIMIT}"),
            });
        }

        if self.batch_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                option: "batch-timeout-secs",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.llm && self.llm_api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingLlmApiKey);
        }

        Ok(())
    }

    /// Builds the fetcher settings from the CLI values.
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            dns_timeout: Duration::from_secs(self.dns_timeout_secs),
            tls_timeout: Duration::from_secs(self.tls_timeout_secs),
            whois_timeout: Duration::from_secs(self.whois_timeout_secs),
            whois_max_attempts: self.whois_max_attempts,
            whois_retry_delay: Duration::from_secs(self.whois_retry_delay_secs),
            archive_timeout: Duration::from_secs(self.archive_timeout_secs),
            ..ProbeSettings::default()
        }
    }

    /// Builds the LLM collaborator configuration, if enrichment was requested.
    pub fn llm_config(&self) -> Option<LlmConfig> {
        if !self.llm {
            return None;
        }
        let api_key = self.llm_api_key.clone()?;
        Some(LlmConfig {
            api_key,
            model: self.llm_model.clone(),
            prompt_template: self.llm_prompt.clone(),
            base_url: self.llm_base_url.clone(),
            timeout: Duration::from_secs(LLM_TIMEOUT_SECS),
        })
    }

    /// Total wall-clock bound for the batch, if one was configured.
    pub fn batch_deadline(&self) -> Option<Duration> {
        self.batch_timeout_secs.map(Duration::from_secs)
    }
}
