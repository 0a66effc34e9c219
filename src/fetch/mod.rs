//! Signal fetching.
//!
//! Every external source (DNS, WHOIS, TLS, web archive) is reached through the
//! [`SignalSources`] trait. A fetch never fails from the caller's point of view:
//! it yields a [`Fetched`] value that is either the observed data or a degraded
//! marker carrying the reason, and a degraded value always collapses to the
//! empty default of its type.
//!
//! [`NetworkSources`] is the production implementation backed by the hickory
//! resolver, the WHOIS port-43 client, tokio-rustls and reqwest.

mod context;

use std::fmt::Display;
use std::future::Future;

pub use context::{NetworkSources, ProbeSettings};

use crate::archive::WebArchiveInfo;
use crate::dns::DnsRecords;
use crate::tls::SslInfo;
use crate::whois::WhoisInfo;

/// Outcome of one signal fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The source answered; the data may still be empty (e.g. no MX records).
    Observed(T),
    /// The source could not be reached or its answer was unusable.
    Degraded {
        /// Human-readable cause, for logs only
        reason: String,
    },
}

impl<T: Default> Fetched<T> {
    /// Builds a degraded result from any displayable cause.
    pub fn degraded(reason: impl Display) -> Self {
        Fetched::Degraded {
            reason: reason.to_string(),
        }
    }

    /// Whether the source failed.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Fetched::Degraded { .. })
    }

    /// Returns the observed value, or the type's empty default when degraded.
    pub fn into_value(self) -> T {
        match self {
            Fetched::Observed(value) => value,
            Fetched::Degraded { .. } => T::default(),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Fetched<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Fetched::Observed(value),
            Err(e) => Fetched::Degraded {
                reason: e.to_string(),
            },
        }
    }
}

/// The external signal sources consulted for one domain.
///
/// Implementations must not panic on network trouble and must bound every call
/// with a timeout; a panic is still caught by the analyzer and recorded in the
/// record's `error` field.
pub trait SignalSources: Send + Sync {
    /// NS, A, MX, TXT and CNAME lookups, each attempted independently.
    fn dns(&self, domain: &str) -> impl Future<Output = Fetched<DnsRecords>> + Send;

    /// Registration lookup with retries, classified into registered/available.
    fn whois(&self, domain: &str) -> impl Future<Output = Fetched<WhoisInfo>> + Send;

    /// Certificate probe on port 443 without chain or hostname validation.
    fn tls(&self, domain: &str) -> impl Future<Output = Fetched<SslInfo>> + Send;

    /// Wayback Machine coverage.
    fn web_archive(&self, domain: &str) -> impl Future<Output = Fetched<WebArchiveInfo>> + Send;
}
