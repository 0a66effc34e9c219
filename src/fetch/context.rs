//! Shared network resources for signal fetching.
//!
//! This module defines `ProbeSettings` (timeouts, retry policy, endpoints) and
//! `NetworkSources`, which groups the resolver, HTTP client and TLS connector
//! so that each fetch only borrows what it needs.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use tokio_rustls::TlsConnector;

use crate::archive::{analyze_web_archive, ArchiveEndpoints, WebArchiveInfo};
use crate::config::*;
use crate::dns::{check_dns_records, DnsRecords};
use crate::error_handling::InitializationError;
use crate::initialization::{init_client, init_resolver, init_tls_connector};
use crate::tls::{check_ssl_certificate, SslInfo};
use crate::whois::{lookup_whois, WhoisInfo, WhoisSettings};

use super::{Fetched, SignalSources};

/// Timeouts, retry policy and endpoints used by the network fetchers.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Per-query DNS timeout
    pub dns_timeout: Duration,
    /// TCP connect + TLS handshake timeout
    pub tls_timeout: Duration,
    /// Per-server WHOIS connect/read timeout
    pub whois_timeout: Duration,
    /// Maximum WHOIS attempts (including the first)
    pub whois_max_attempts: usize,
    /// Fixed delay between WHOIS attempts
    pub whois_retry_delay: Duration,
    /// Root WHOIS server used for TLD referral discovery
    pub whois_root_server: String,
    /// Per-request web-archive timeout
    pub archive_timeout: Duration,
    /// Wayback availability endpoint
    pub wayback_availability_url: String,
    /// Wayback CDX endpoint
    pub wayback_cdx_url: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            tls_timeout: Duration::from_secs(TLS_TIMEOUT_SECS),
            whois_timeout: Duration::from_secs(WHOIS_TIMEOUT_SECS),
            whois_max_attempts: WHOIS_MAX_ATTEMPTS,
            whois_retry_delay: Duration::from_secs(WHOIS_RETRY_DELAY_SECS),
            whois_root_server: IANA_WHOIS_SERVER.to_string(),
            archive_timeout: Duration::from_secs(ARCHIVE_TIMEOUT_SECS),
            wayback_availability_url: WAYBACK_AVAILABILITY_URL.to_string(),
            wayback_cdx_url: WAYBACK_CDX_URL.to_string(),
        }
    }
}

impl ProbeSettings {
    fn whois_settings(&self) -> WhoisSettings {
        WhoisSettings {
            root_server: self.whois_root_server.clone(),
            port: WHOIS_PORT,
            timeout: self.whois_timeout,
            max_attempts: self.whois_max_attempts,
            retry_delay: self.whois_retry_delay,
        }
    }

    fn archive_endpoints(&self) -> ArchiveEndpoints {
        ArchiveEndpoints {
            availability_url: self.wayback_availability_url.clone(),
            cdx_url: self.wayback_cdx_url.clone(),
        }
    }
}

/// Production signal sources backed by real network I/O.
///
/// Cheap to share: every resource is reference-counted.
#[derive(Clone)]
pub struct NetworkSources {
    resolver: Arc<TokioAsyncResolver>,
    client: Arc<reqwest::Client>,
    tls_connector: TlsConnector,
    whois: WhoisSettings,
    archive: ArchiveEndpoints,
    tls_timeout: Duration,
}

impl NetworkSources {
    /// Initializes the resolver, HTTP client and TLS connector.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the HTTP client or TLS configuration
    /// cannot be built.
    pub fn new(settings: &ProbeSettings) -> Result<Self, InitializationError> {
        Ok(Self {
            resolver: init_resolver(settings.dns_timeout),
            client: init_client(settings.archive_timeout)?,
            tls_connector: init_tls_connector()?,
            whois: settings.whois_settings(),
            archive: settings.archive_endpoints(),
            tls_timeout: settings.tls_timeout,
        })
    }
}

impl SignalSources for NetworkSources {
    async fn dns(&self, domain: &str) -> Fetched<DnsRecords> {
        check_dns_records(domain, &self.resolver).await
    }

    async fn whois(&self, domain: &str) -> Fetched<WhoisInfo> {
        lookup_whois(domain, &self.whois).await
    }

    async fn tls(&self, domain: &str) -> Fetched<SslInfo> {
        check_ssl_certificate(domain, &self.tls_connector, self.tls_timeout).await
    }

    async fn web_archive(&self, domain: &str) -> Fetched<WebArchiveInfo> {
        analyze_web_archive(domain, &self.client, &self.archive).await
    }
}
