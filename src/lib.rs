//! drop_analyzer library: domain signal aggregation and scoring
//!
//! This library gathers public signals about domain names (DNS records, WHOIS
//! registration data, the TLS certificate served on port 443 and Wayback
//! Machine coverage), classifies each name as registered or available, and
//! turns the evidence into signatures, a 0-100 quality score and a list of
//! recommendations. Results can optionally be enriched with an LLM narrative.
//!
//! # Example
//!
//! ```no_run
//! use drop_analyzer::{DomainAnalyzer, NetworkSources, ProbeSettings};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! drop_analyzer::initialization::init_crypto_provider();
//! let sources = NetworkSources::new(&ProbeSettings::default())?;
//! let analyzer = DomainAnalyzer::new(sources).with_archive(true);
//!
//! let record = analyzer.analyze_domain("example.com").await;
//! println!("{} scored {}", record.domain, record.quality_score);
//!
//! let batch = analyzer
//!     .analyze_domains_batch(&["example.org".to_string()], &CancellationToken::new())
//!     .await;
//! println!("{} of {} analyzed", batch.successful, batch.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod analysis;
pub mod archive;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod llm;
pub mod tls;
pub mod whois;

// Re-export public API
pub use analysis::{BatchEntry, BatchResult, DomainAnalyzer, DomainRecord, FailureStub, Signature};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use fetch::{Fetched, NetworkSources, ProbeSettings, SignalSources};
pub use llm::{LlmConfig, LlmEnricher};
pub use run::{run_analysis, AnalysisReport};

// Internal run module (drives one CLI invocation end to end)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio::io::AsyncReadExt;
    use tokio_util::sync::CancellationToken;

    use crate::analysis::{BatchEntry, DomainAnalyzer};
    use crate::config::Config;
    use crate::domain::parse_domain_list;
    use crate::error_handling::ConfigError;
    use crate::export::{export_report, Report};
    use crate::fetch::NetworkSources;
    use crate::llm::LlmEnricher;

    /// Summary of a completed analysis run.
    #[derive(Debug, Clone)]
    pub struct AnalysisReport {
        /// Domains accepted for analysis
        pub total: usize,
        /// Domains analyzed or stubbed before the run ended
        pub processed: usize,
        /// Domains analyzed without fault
        pub successful: usize,
        /// Invalid names and faulted analyses
        pub failed: usize,
        /// Whether the batch was cut short by Ctrl-C or the deadline
        pub cancelled: bool,
        /// Where results were written (`None` for stdout)
        pub output: Option<PathBuf>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Collects the domain list from positional arguments and `--file`.
    ///
    /// `--file -` reads from stdin. Entries are de-duplicated after
    /// normalization; invalid entries are kept so they surface as failure
    /// stubs.
    ///
    /// # Errors
    ///
    /// Fails if the input file cannot be read, if no domains remain, or if
    /// more than `max_domains_per_batch` remain.
    pub(crate) async fn gather_domains(config: &Config) -> Result<Vec<String>> {
        let mut contents = config.domains.join("\n");

        if let Some(path) = &config.file {
            let file_contents = if path.as_os_str() == "-" {
                info!("Reading domains from stdin");
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("Failed to read domains from stdin")?;
                buf
            } else {
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read input file: {}", path.display()))?
            };
            contents.push('\n');
            contents.push_str(&file_contents);
        }

        let domains = parse_domain_list(&contents);
        if domains.is_empty() {
            return Err(ConfigError::NoDomains.into());
        }
        if domains.len() > config.max_domains_per_batch {
            return Err(ConfigError::TooManyDomains {
                count: domains.len(),
                limit: config.max_domains_per_batch,
            }
            .into());
        }
        Ok(domains)
    }

    /// Runs one analysis with the provided configuration.
    ///
    /// This is the main entry point for the binary. It validates the
    /// configuration, analyzes every domain in order, optionally enriches the
    /// records with an LLM narrative and writes the results.
    ///
    /// # Arguments
    ///
    /// * `config` - Domains, timeouts, output and LLM settings
    /// * `cancel` - Stops the batch early when cancelled (e.g. on Ctrl-C)
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is invalid or no domains were supplied
    /// - The input file cannot be read
    /// - Network resources cannot be initialized
    /// - The results cannot be written
    ///
    /// Per-domain failures are not errors; they are counted in the report.
    pub async fn run_analysis(config: Config, cancel: CancellationToken) -> Result<AnalysisReport> {
        config.validate()?;
        let start = Instant::now();

        let domains = gather_domains(&config).await?;
        info!("Analyzing {} domain(s)", domains.len());

        let sources = NetworkSources::new(&config.probe_settings())
            .context("Failed to initialize network resources")?;
        let analyzer = DomainAnalyzer::new(sources)
            .with_archive(!config.no_archive)
            .with_batch_deadline(config.batch_deadline());

        let batch = analyzer.analyze_domains_batch(&domains, &cancel).await;

        let llm = match config.llm_config() {
            Some(_) if batch.cancelled => {
                warn!("Skipping LLM enrichment: batch was cancelled");
                None
            }
            Some(llm_config) => {
                let enricher =
                    LlmEnricher::new(llm_config).context("Failed to initialize LLM client")?;
                let records: Vec<_> = batch
                    .domains
                    .iter()
                    .filter_map(|entry| match entry {
                        BatchEntry::Record(record) => Some(record.as_ref().clone()),
                        BatchEntry::Failure(_) => None,
                    })
                    .collect();
                info!("Requesting LLM analysis for {} domain(s)", records.len());
                Some(enricher.enrich_batch(&records).await)
            }
            None => None,
        };

        let report = Report {
            batch: &batch,
            llm: llm.as_ref(),
        };
        export_report(&report, config.format, config.output.as_deref())?;

        analyzer.stats().log_summary();

        Ok(AnalysisReport {
            total: batch.total,
            processed: batch.processed,
            successful: batch.successful,
            failed: batch.failed,
            cancelled: batch.cancelled,
            output: config.output.clone(),
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}
