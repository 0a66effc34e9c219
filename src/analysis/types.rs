//! Analysis result data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::archive::WebArchiveInfo;
use crate::dns::DnsRecords;
use crate::tls::SslInfo;
use crate::whois::WhoisInfo;

use super::signatures::Signature;

/// Everything learned about one domain in one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    /// Normalized domain name
    pub domain: String,
    /// When the analysis started
    pub timestamp: DateTime<Utc>,
    pub dns_records: DnsRecords,
    pub whois_info: WhoisInfo,
    pub ssl_info: SslInfo,
    /// Present only when archive analysis was enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_archive: Option<WebArchiveInfo>,
    pub signatures: Vec<Signature>,
    /// Copied from `whois_info.is_available`
    pub is_available: bool,
    /// 0..=100
    pub quality_score: u8,
    pub recommendations: Vec<String>,
    /// Set when a collaborator faulted; the rest is best effort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainRecord {
    /// A record with no evidence at all, before scoring.
    pub fn empty(domain: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            domain: domain.into(),
            timestamp,
            dns_records: DnsRecords::default(),
            whois_info: WhoisInfo::default(),
            ssl_info: SslInfo::default(),
            web_archive: None,
            signatures: Vec::new(),
            is_available: false,
            quality_score: 0,
            recommendations: Vec::new(),
            error: None,
        }
    }
}

/// Minimal entry for a domain that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureStub {
    pub domain: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// One batch entry, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Record(Box<DomainRecord>),
    Failure(FailureStub),
}

impl BatchEntry {
    /// Domain name of the entry (normalized for records, as given for stubs).
    pub fn domain(&self) -> &str {
        match self {
            BatchEntry::Record(record) => &record.domain,
            BatchEntry::Failure(stub) => &stub.domain,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, BatchEntry::Failure(_))
    }
}

/// Outcome of a batch run.
///
/// `processed == successful + failed` and `processed <= total` hold after
/// every item, not only at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    /// The batch stopped early (cancellation or deadline)
    #[serde(default)]
    pub cancelled: bool,
    pub domains: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            successful: 0,
            failed: 0,
            cancelled: false,
            domains: Vec::with_capacity(total),
        }
    }

    /// Appends an entry and updates the counters.
    pub fn push(&mut self, entry: BatchEntry) {
        if entry.is_failure() {
            self.failed += 1;
        } else {
            self.successful += 1;
        }
        self.processed += 1;
        self.domains.push(entry);
    }
}
