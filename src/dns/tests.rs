//! DNS module tests.

use super::records::{format_mx, merge_lookups, render};
use super::*;
use crate::error_handling::FetchError;
use crate::fetch::Fetched;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::rdata::MX;
use hickory_resolver::proto::rr::{Name, RData};
use std::time::Duration;
use strum::IntoEnumIterator;

/// Creates a test DNS resolver with short timeouts for faster test execution.
fn create_test_resolver() -> hickory_resolver::TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(5);
    opts.attempts = 1; // Single attempt for faster failures in tests
    opts.ndots = 0;

    hickory_resolver::TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
}

#[test]
fn test_format_mx() {
    assert_eq!(format_mx(10, "mail.example.com."), "10 mail.example.com.");
    assert_eq!(format_mx(0, "."), "0 .");
}

#[test]
fn test_render_mx_answer() {
    let exchange = Name::from_ascii("mail.example.com.").unwrap();
    let rdata = RData::MX(MX::new(10, exchange));
    assert_eq!(
        render(DnsRecordKind::Mx, &rdata).as_deref(),
        Some("10 mail.example.com.")
    );
    // An answer of another type is skipped
    assert_eq!(render(DnsRecordKind::A, &rdata), None);
}

fn timeout(kind: DnsRecordKind) -> FetchError {
    FetchError::Timeout(format!("{kind} lookup"))
}

#[test]
fn test_merge_lookups_keeps_kinds_that_answered() {
    let results = vec![
        (DnsRecordKind::Ns, Ok(vec!["ns1.example.com.".to_string()])),
        (DnsRecordKind::A, Err(timeout(DnsRecordKind::A))),
        (DnsRecordKind::Mx, Ok(vec!["10 mail.example.com.".to_string()])),
        (DnsRecordKind::Txt, Err(timeout(DnsRecordKind::Txt))),
        (DnsRecordKind::Cname, Ok(Vec::new())),
    ];

    match merge_lookups("example.com", results) {
        Fetched::Observed(records) => {
            assert_eq!(records.ns, ["ns1.example.com."]);
            assert_eq!(records.mx, ["10 mail.example.com."]);
            assert!(records.a.is_empty());
            assert!(records.txt.is_empty());
            assert!(records.cname.is_empty());
        }
        Fetched::Degraded { reason } => panic!("unexpected degradation: {reason}"),
    }
}

#[test]
fn test_merge_lookups_single_success_is_observed() {
    let results = DnsRecordKind::iter().map(|kind| {
        if kind == DnsRecordKind::Cname {
            (kind, Ok(Vec::new()))
        } else {
            (kind, Err(timeout(kind)))
        }
    });
    let fetched = merge_lookups("example.com", results);
    assert!(!fetched.is_degraded());
    assert!(fetched.into_value().is_empty());
}

#[test]
fn test_merge_lookups_all_failed_is_degraded() {
    let results = DnsRecordKind::iter().map(|kind| (kind, Err(timeout(kind))));

    match merge_lookups("example.com", results) {
        Fetched::Degraded { reason } => {
            for kind in DnsRecordKind::iter() {
                assert!(reason.contains(&format!("{kind}: ")), "missing {kind} in {reason}");
            }
        }
        Fetched::Observed(records) => panic!("expected degradation, got {records:?}"),
    }
}

#[test]
fn test_record_kind_display() {
    let names: Vec<String> = DnsRecordKind::iter().map(|k| k.to_string()).collect();
    assert_eq!(names, vec!["NS", "A", "MX", "TXT", "CNAME"]);
}

#[test]
fn test_dns_records_get_set_has() {
    let mut records = DnsRecords::default();
    assert!(records.is_empty());
    for kind in DnsRecordKind::iter() {
        assert!(!records.has(kind));
    }

    records.set(DnsRecordKind::Mx, vec!["10 mx.example.com.".to_string()]);
    assert!(records.has(DnsRecordKind::Mx));
    assert!(!records.has(DnsRecordKind::A));
    assert_eq!(records.get(DnsRecordKind::Mx), ["10 mx.example.com."]);
    assert!(!records.is_empty());
}

#[test]
fn test_dns_records_serialize_with_kind_keys() {
    let records = DnsRecords {
        ns: vec!["ns1.example.com.".to_string()],
        a: vec!["93.184.216.34".to_string()],
        ..Default::default()
    };
    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(json["NS"][0], "ns1.example.com.");
    assert_eq!(json["A"][0], "93.184.216.34");
    assert_eq!(json["MX"], serde_json::json!([]));
    assert_eq!(json["CNAME"], serde_json::json!([]));
}

#[tokio::test]
#[ignore] // Requires network access. Run with: cargo test -- --ignored
async fn test_lookup_ns_records_success() {
    let resolver = create_test_resolver();
    let nameservers = lookup_records("google.com", DnsRecordKind::Ns, &resolver)
        .await
        .expect("NS lookup should succeed for google.com");
    assert!(!nameservers.is_empty(), "google.com should have nameservers");
    for ns in &nameservers {
        assert!(ns.contains('.'));
    }
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_lookup_mx_records_format() {
    let resolver = create_test_resolver();
    let mx = lookup_records("google.com", DnsRecordKind::Mx, &resolver)
        .await
        .expect("MX lookup should succeed for google.com");
    assert!(!mx.is_empty());
    for record in &mx {
        let (preference, exchange) = record.split_once(' ').expect("preference and exchange");
        assert!(preference.parse::<u16>().is_ok());
        assert!(!exchange.is_empty());
    }
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_check_dns_records_nonexistent_domain_is_empty() {
    let resolver = create_test_resolver();
    let fetched = check_dns_records("definitely-does-not-exist-12345.invalid", &resolver).await;
    // NXDOMAIN is an answer, not a failure
    assert!(!fetched.is_degraded());
    assert!(fetched.into_value().is_empty());
}
