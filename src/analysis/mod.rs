//! Domain analysis orchestration.
//!
//! [`DomainAnalyzer`] fetches every signal for a domain concurrently, derives
//! signatures, availability, score and recommendations, and drives sequential
//! batches. The analyzer never fails: unreachable sources leave their part of
//! the record empty, and a panicking source is caught here and recorded in
//! the record's `error` field.

mod recommendations;
mod score;
mod signatures;
mod types;

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::FutureExt;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::normalize_domain;
use crate::error_handling::{DegradationStats, SignalSource};
use crate::fetch::{Fetched, SignalSources};

pub use recommendations::{
    generate_recommendations, AVAILABLE, HIGH_SCORE, LOW_SCORE, NO_A_RECORDS, NO_SSL, REGISTERED,
};
pub use score::{quality_score, MAX_SCORE};
pub use signatures::{extract_signatures, Signature};
pub use types::{BatchEntry, BatchResult, DomainRecord, FailureStub};

/// Analyzes domains against a set of signal sources.
pub struct DomainAnalyzer<S> {
    sources: S,
    stats: Arc<DegradationStats>,
    include_archive: bool,
    batch_deadline: Option<Duration>,
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Fills in the derived fields (signatures, availability, score,
/// recommendations) from the fetched ones.
pub fn finalize_record(record: &mut DomainRecord) {
    record.signatures = extract_signatures(&record.dns_records, &record.whois_info, &record.ssl_info);
    record.is_available = record.whois_info.is_available;
    record.quality_score = quality_score(&record.dns_records, &record.whois_info, &record.ssl_info);
    record.recommendations = generate_recommendations(
        record.is_available,
        &record.dns_records,
        &record.ssl_info,
        record.quality_score,
    );
}

/// Resolves at `deadline`, or never.
async fn deadline_reached(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl<S: SignalSources> DomainAnalyzer<S> {
    /// Creates an analyzer with archive analysis disabled and no batch deadline.
    pub fn new(sources: S) -> Self {
        Self {
            sources,
            stats: Arc::new(DegradationStats::new()),
            include_archive: false,
            batch_deadline: None,
        }
    }

    /// Enables or disables the web-archive fetch.
    pub fn with_archive(mut self, enabled: bool) -> Self {
        self.include_archive = enabled;
        self
    }

    /// Bounds the wall-clock time of each batch run.
    pub fn with_batch_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.batch_deadline = deadline;
        self
    }

    /// Shares an existing counter set instead of a private one.
    pub fn with_stats(mut self, stats: Arc<DegradationStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Degradation and fault counters accumulated by this analyzer.
    pub fn stats(&self) -> &Arc<DegradationStats> {
        &self.stats
    }

    /// Runs one fetch, counting degradations and catching panics.
    ///
    /// Returns the value (empty on failure) and, for a panic, its message.
    async fn guarded<T, F>(&self, source: SignalSource, domain: &str, fetch: F) -> (T, Option<String>)
    where
        T: Default,
        F: Future<Output = Fetched<T>>,
    {
        match AssertUnwindSafe(fetch).catch_unwind().await {
            Ok(Fetched::Observed(value)) => (value, None),
            Ok(Fetched::Degraded { reason }) => {
                self.stats.increment_degraded(source);
                log::debug!("{source} degraded for {domain}: {reason}");
                (T::default(), None)
            }
            Err(payload) => {
                self.stats.increment_fault();
                let message = format!("{source} fetch failed unexpectedly: {}", panic_message(&*payload));
                log::error!("{message} (domain {domain})");
                (T::default(), Some(message))
            }
        }
    }

    /// Analyzes one (already normalized) domain.
    ///
    /// DNS, WHOIS, TLS and, when enabled, the web archive are fetched
    /// concurrently. Always returns a complete record; faults end up in
    /// `error` and leave the faulting source's fields empty.
    pub async fn analyze_domain(&self, domain: &str) -> DomainRecord {
        log::info!("Analyzing {domain}");
        let timestamp = Utc::now();

        let archive = async {
            if self.include_archive {
                let (info, fault) = self
                    .guarded(SignalSource::WebArchive, domain, self.sources.web_archive(domain))
                    .await;
                (Some(info), fault)
            } else {
                (None, None)
            }
        };

        let ((dns, dns_fault), (whois, whois_fault), (ssl, ssl_fault), (web_archive, archive_fault)) = tokio::join!(
            self.guarded(SignalSource::Dns, domain, self.sources.dns(domain)),
            self.guarded(SignalSource::Whois, domain, self.sources.whois(domain)),
            self.guarded(SignalSource::Tls, domain, self.sources.tls(domain)),
            archive,
        );

        let faults: Vec<String> = [dns_fault, whois_fault, ssl_fault, archive_fault]
            .into_iter()
            .flatten()
            .collect();

        let mut record = DomainRecord::empty(domain, timestamp);
        record.dns_records = dns;
        record.whois_info = whois;
        record.ssl_info = ssl;
        record.web_archive = web_archive;
        record.error = (!faults.is_empty()).then(|| faults.join("; "));
        finalize_record(&mut record);

        log::info!(
            "Analyzed {domain}: score {}, available {}",
            record.quality_score,
            record.is_available
        );
        record
    }

    /// Analyzes domains one after another, in input order.
    ///
    /// Names that fail normalization and analyses that record a fault become
    /// failure stubs; the batch always continues with the next domain. When
    /// `cancel` fires or the batch deadline passes, the in-flight domain is
    /// abandoned (not counted), no further domains are started and the result
    /// is marked `cancelled`.
    pub async fn analyze_domains_batch(&self, domains: &[String], cancel: &CancellationToken) -> BatchResult {
        let mut result = BatchResult::new(domains.len());
        let deadline = self.batch_deadline.map(|limit| Instant::now() + limit);

        for input in domains {
            if cancel.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d) {
                result.cancelled = true;
                break;
            }

            let domain = match normalize_domain(input) {
                Ok(domain) => domain,
                Err(e) => {
                    log::warn!("Skipping {input:?}: {e}");
                    result.push(BatchEntry::Failure(FailureStub {
                        domain: input.clone(),
                        error: e.to_string(),
                        timestamp: Utc::now(),
                    }));
                    continue;
                }
            };

            let record = tokio::select! {
                record = self.analyze_domain(&domain) => record,
                _ = cancel.cancelled() => {
                    result.cancelled = true;
                    break;
                }
                _ = deadline_reached(deadline) => {
                    result.cancelled = true;
                    break;
                }
            };

            let entry = match record.error.clone() {
                Some(error) => BatchEntry::Failure(FailureStub {
                    domain: record.domain,
                    error,
                    timestamp: record.timestamp,
                }),
                None => BatchEntry::Record(Box::new(record)),
            };
            result.push(entry);
            log::debug!(
                "Batch progress: {}/{} processed ({} failed)",
                result.processed,
                result.total,
                result.failed
            );
        }

        if result.cancelled {
            log::warn!(
                "Batch stopped early: {} of {} domains processed",
                result.processed,
                result.total
            );
        }
        result
    }
}
