//! WHOIS domain lookup.
//!
//! Queries the registry (and registrar, when referred) over port 43, parses
//! the answer into [`WhoisInfo`] and classifies it as registered or available.
//! Transient failures are retried with a fixed delay; when every attempt
//! fails the lookup degrades to the empty default, which classifies as
//! neither registered nor available.

mod classify;
mod client;
mod parse;
mod types;

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;

use crate::fetch::Fetched;

pub use classify::{classify_registration, Registration, AVAILABLE_INDICATORS, REGISTERED_INDICATORS};
pub use types::{WhoisInfo, WhoisSettings};

/// Builds a [`WhoisInfo`] from raw WHOIS text: parsed fields plus
/// registration flags.
pub fn whois_info_from_text(raw: &str) -> WhoisInfo {
    let registration = classify_registration(raw);
    WhoisInfo {
        is_registered: registration.is_registered,
        is_available: registration.is_available,
        ..parse::parse_whois_text(raw)
    }
}

/// Performs a WHOIS lookup for a domain
///
/// Makes up to `settings.max_attempts` attempts, `settings.retry_delay` apart.
/// A server that answers at all ends the retry loop, even if the answer
/// matches neither indicator list.
///
/// # Arguments
///
/// * `domain` - The normalized domain to look up (e.g., "example.com")
/// * `settings` - Root server, port, timeout and retry policy
pub async fn lookup_whois(domain: &str, settings: &WhoisSettings) -> Fetched<WhoisInfo> {
    log::debug!("Starting WHOIS lookup for domain: {domain}");

    let retries = settings.max_attempts.saturating_sub(1);
    let retry_strategy = FixedInterval::new(settings.retry_delay).take(retries);
    let attempt_count = AtomicUsize::new(0);

    let counter = &attempt_count;
    let result = Retry::spawn(retry_strategy, move || async move {
        let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
        client::query_whois(domain, settings).await.inspect_err(|e| {
            log::warn!("WHOIS attempt {attempt} failed for {domain}: {e}");
        })
    })
    .await;

    match result {
        Ok(raw) => {
            let info = whois_info_from_text(&raw);
            log::debug!(
                "WHOIS lookup for {domain}: registered={}, available={}",
                info.is_registered,
                info.is_available
            );
            Fetched::Observed(info)
        }
        Err(e) => {
            log::warn!(
                "All {} WHOIS attempts failed for {domain}: {e}",
                attempt_count.load(Ordering::SeqCst)
            );
            Fetched::degraded(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whois_info_from_registered_text() {
        let raw = "Domain Name: EXAMPLE.COM\nRegistrar: Example Registrar, Inc.\nCreation Date: 1995-08-14T04:00:00Z\nName Server: NS1.EXAMPLE.COM\n";
        let info = whois_info_from_text(raw);
        assert!(info.is_registered);
        assert!(!info.is_available);
        assert_eq!(info.registrar.as_deref(), Some("Example Registrar, Inc."));
        assert_eq!(info.name_servers, vec!["ns1.example.com"]);
        assert!(info.creation_date.is_some());
    }

    #[test]
    fn test_whois_info_from_available_text() {
        let info = whois_info_from_text("No match for \"UNUSED-NAME-42.COM\".\n");
        assert!(!info.is_registered);
        assert!(info.is_available);
        assert!(info.registrar.is_none());
        assert!(info.name_servers.is_empty());
    }

    #[test]
    fn test_degraded_whois_is_neither_registered_nor_available() {
        let fetched: Fetched<WhoisInfo> = Fetched::degraded("connection refused");
        let info = fetched.into_value();
        assert!(!info.is_registered);
        assert!(!info.is_available);
        assert!(info.raw_text.is_empty());
    }
}
