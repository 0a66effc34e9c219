//! DNS record queries (NS, A, MX, TXT, CNAME).

use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::RData;
use hickory_resolver::TokioAsyncResolver;
use strum::IntoEnumIterator;

use crate::error_handling::FetchError;
use crate::fetch::Fetched;

use super::types::{DnsRecordKind, DnsRecords};

/// Queries one record kind for a domain.
///
/// # Returns
///
/// The record values rendered as strings, or an empty vector when the name
/// exists without such records or does not exist at all (NXDOMAIN).
///
/// # Errors
///
/// Returns `FetchError::Dns` for real failures (timeouts, SERVFAIL, network
/// errors) so the caller can tell a dead resolver from an empty zone.
pub async fn lookup_records(
    domain: &str,
    kind: DnsRecordKind,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, FetchError> {
    match resolver.lookup(domain, kind.record_type()).await {
        Ok(lookup) => Ok(lookup.iter().filter_map(|rdata| render(kind, rdata)).collect()),
        Err(e) => {
            if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                log::debug!("No {kind} records for {domain}");
                Ok(Vec::new())
            } else {
                log::warn!("Failed to lookup {kind} records for {domain}: {e}");
                Err(e.into())
            }
        }
    }
}

/// Renders one answer as a string, skipping answers of other types
/// (a CNAME chain can put CNAME data in an A answer, for example).
pub(crate) fn render(kind: DnsRecordKind, rdata: &RData) -> Option<String> {
    match (kind, rdata) {
        (DnsRecordKind::Ns, RData::NS(ns)) => Some(ns.to_utf8()),
        (DnsRecordKind::A, RData::A(a)) => Some(a.to_string()),
        (DnsRecordKind::Mx, RData::MX(mx)) => {
            Some(format_mx(mx.preference(), &mx.exchange().to_utf8()))
        }
        (DnsRecordKind::Txt, RData::TXT(txt)) => Some(
            // TXT records can contain multiple strings - join them
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        (DnsRecordKind::Cname, RData::CNAME(cname)) => Some(cname.to_utf8()),
        _ => None,
    }
}

/// Formats an MX answer as `"<preference> <exchange>"`.
pub(crate) fn format_mx(preference: u16, exchange: &str) -> String {
    format!("{preference} {exchange}")
}

/// Queries every record kind for a domain, concurrently and independently.
///
/// A kind whose lookup fails is left empty. The result is degraded only when
/// every single lookup failed, which means the resolver itself is unusable.
pub async fn check_dns_records(domain: &str, resolver: &TokioAsyncResolver) -> Fetched<DnsRecords> {
    let lookups = DnsRecordKind::iter().map(|kind| async move {
        (kind, lookup_records(domain, kind, resolver).await)
    });
    let results = futures::future::join_all(lookups).await;
    merge_lookups(domain, results)
}

/// Folds per-kind lookup results into one record set.
///
/// Failed kinds stay empty; the set is degraded only when every kind failed.
pub(crate) fn merge_lookups(
    domain: &str,
    results: impl IntoIterator<Item = (DnsRecordKind, Result<Vec<String>, FetchError>)>,
) -> Fetched<DnsRecords> {
    let mut records = DnsRecords::default();
    let mut failures = Vec::new();
    for (kind, result) in results {
        match result {
            Ok(values) => records.set(kind, values),
            Err(e) => failures.push(format!("{kind}: {e}")),
        }
    }

    if failures.len() == DnsRecordKind::iter().count() {
        return Fetched::degraded(failures.join("; "));
    }
    if !failures.is_empty() {
        log::debug!(
            "{} of the DNS lookups for {domain} failed: {}",
            failures.len(),
            failures.join("; ")
        );
    }
    Fetched::Observed(records)
}
