// Orchestrator and batch driver tests against in-memory signal sources.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use drop_analyzer::analysis::{HIGH_SCORE, LOW_SCORE, NO_A_RECORDS, NO_SSL, REGISTERED};
use drop_analyzer::archive::WebArchiveInfo;
use drop_analyzer::dns::DnsRecords;
use drop_analyzer::error_handling::SignalSource;
use drop_analyzer::tls::SslInfo;
use drop_analyzer::whois::{whois_info_from_text, WhoisInfo};
use drop_analyzer::{BatchEntry, DomainAnalyzer, Fetched, Signature, SignalSources};
use tokio_util::sync::CancellationToken;

/// Canned answers for every source, with optional faults.
#[derive(Clone, Default)]
struct FakeSources {
    dns: DnsRecords,
    whois: WhoisInfo,
    ssl: SslInfo,
    archive: WebArchiveInfo,
    degrade_whois: bool,
    panic_on: Option<String>,
    tls_delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl SignalSources for FakeSources {
    async fn dns(&self, domain: &str) -> Fetched<DnsRecords> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on.as_deref() == Some(domain) {
            panic!("resolver exploded for {domain}");
        }
        Fetched::Observed(self.dns.clone())
    }

    async fn whois(&self, _domain: &str) -> Fetched<WhoisInfo> {
        if self.degrade_whois {
            return Fetched::degraded("connection refused");
        }
        Fetched::Observed(self.whois.clone())
    }

    async fn tls(&self, _domain: &str) -> Fetched<SslInfo> {
        if let Some(delay) = self.tls_delay {
            tokio::time::sleep(delay).await;
        }
        Fetched::Observed(self.ssl.clone())
    }

    async fn web_archive(&self, _domain: &str) -> Fetched<WebArchiveInfo> {
        Fetched::Observed(self.archive.clone())
    }
}

fn full_evidence() -> FakeSources {
    let dns = DnsRecords {
        ns: vec!["a.iana-servers.net.".to_string()],
        a: vec!["93.184.216.34".to_string()],
        mx: vec!["10 mail.example.com.".to_string()],
        txt: vec!["v=spf1 -all".to_string()],
        cname: Vec::new(),
    };
    let whois = whois_info_from_text(
        "Domain Name: EXAMPLE.COM\n\
         Registrar: RESERVED-Internet Assigned Numbers Authority\n\
         Creation Date: 1995-08-14T04:00:00Z\n\
         Name Server: A.IANA-SERVERS.NET\n\
         Name Server: B.IANA-SERVERS.NET\n",
    );
    let ssl = SslInfo {
        has_ssl: true,
        ..Default::default()
    };
    FakeSources {
        dns,
        whois,
        ssl,
        ..Default::default()
    }
}

fn domains(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn test_empty_evidence_scores_zero() {
    let analyzer = DomainAnalyzer::new(FakeSources::default());
    let record = analyzer.analyze_domain("example.com").await;

    assert_eq!(record.domain, "example.com");
    assert_eq!(record.quality_score, 0);
    assert!(record.signatures.is_empty());
    assert!(!record.is_available);
    assert!(record.error.is_none());
    assert!(record.web_archive.is_none());
    assert_eq!(
        record.recommendations,
        vec![REGISTERED, NO_A_RECORDS, NO_SSL, LOW_SCORE]
    );
}

#[tokio::test]
async fn test_full_evidence_scores_maximum() {
    let analyzer = DomainAnalyzer::new(full_evidence());
    let record = analyzer.analyze_domain("example.com").await;

    assert_eq!(record.quality_score, 100);
    assert!(record.whois_info.is_registered);
    assert!(!record.is_available);
    assert_eq!(
        record.signatures,
        vec![
            Signature::DnsNs,
            Signature::DnsA,
            Signature::DnsMx,
            Signature::Whois,
            Signature::Ssl
        ]
    );
    assert_eq!(record.recommendations, vec![REGISTERED, HIGH_SCORE]);
}

#[tokio::test]
async fn test_available_domain_mirrors_whois() {
    let sources = FakeSources {
        whois: whois_info_from_text("No match for \"DROPPED-NAME.COM\".\n"),
        ..Default::default()
    };
    let record = DomainAnalyzer::new(sources)
        .analyze_domain("dropped-name.com")
        .await;

    assert!(record.is_available);
    assert!(!record.whois_info.is_registered);
    assert_eq!(record.recommendations[0], drop_analyzer::analysis::AVAILABLE);
}

#[tokio::test]
async fn test_archive_only_when_enabled() {
    let sources = FakeSources {
        archive: WebArchiveInfo {
            has_snapshots: true,
            total_snapshots: 12,
            ..Default::default()
        },
        ..Default::default()
    };

    let without = DomainAnalyzer::new(sources.clone())
        .analyze_domain("example.com")
        .await;
    assert!(without.web_archive.is_none());

    let with = DomainAnalyzer::new(sources)
        .with_archive(true)
        .analyze_domain("example.com")
        .await;
    let archive = with.web_archive.expect("archive requested");
    assert!(archive.has_snapshots);
    assert_eq!(archive.total_snapshots, 12);
    // Archive coverage never changes the score
    assert_eq!(with.quality_score, 0);
}

#[tokio::test]
async fn test_degraded_source_is_counted_not_fatal() {
    let sources = FakeSources {
        degrade_whois: true,
        ..full_evidence()
    };
    let analyzer = DomainAnalyzer::new(sources);
    let record = analyzer.analyze_domain("example.com").await;

    assert!(record.error.is_none());
    assert_eq!(record.whois_info, WhoisInfo::default());
    // NS 20 + A 20 + MX 15 + TXT 10 + SSL 15
    assert_eq!(record.quality_score, 80);
    assert_eq!(analyzer.stats().degraded_count(SignalSource::Whois), 1);
    assert_eq!(analyzer.stats().fault_count(), 0);
}

#[tokio::test]
async fn test_panicking_source_is_recorded() {
    let sources = FakeSources {
        panic_on: Some("broken.com".to_string()),
        ..full_evidence()
    };
    let analyzer = DomainAnalyzer::new(sources);
    let record = analyzer.analyze_domain("broken.com").await;

    let error = record.error.expect("panic should be recorded");
    assert!(error.contains("DNS"), "unexpected error: {error}");
    assert!(error.contains("resolver exploded"), "unexpected error: {error}");
    // Other sources still contributed
    assert!(record.whois_info.is_registered);
    assert!(record.ssl_info.has_ssl);
    assert_eq!(analyzer.stats().fault_count(), 1);
}

#[tokio::test]
async fn test_batch_continues_after_fault() {
    let sources = FakeSources {
        panic_on: Some("broken.com".to_string()),
        ..full_evidence()
    };
    let analyzer = DomainAnalyzer::new(sources);
    let input = domains(&["example.com", "broken.com", "example.org"]);
    let result = analyzer
        .analyze_domains_batch(&input, &CancellationToken::new())
        .await;

    assert_eq!(result.total, 3);
    assert_eq!(result.processed, 3);
    assert_eq!(result.successful, 2);
    assert_eq!(result.failed, 1);
    assert!(!result.cancelled);

    let order: Vec<&str> = result.domains.iter().map(|e| e.domain()).collect();
    assert_eq!(order, vec!["example.com", "broken.com", "example.org"]);

    match &result.domains[1] {
        BatchEntry::Failure(stub) => {
            assert_eq!(stub.domain, "broken.com");
            assert!(stub.error.contains("resolver exploded"));
        }
        BatchEntry::Record(_) => panic!("expected a failure stub for broken.com"),
    }
}

#[tokio::test]
async fn test_invalid_domain_becomes_stub_without_fetching() {
    let sources = FakeSources::default();
    let calls = Arc::clone(&sources.calls);
    let analyzer = DomainAnalyzer::new(sources);
    let input = domains(&["not a domain", "https://www.Example.COM/path"]);
    let result = analyzer
        .analyze_domains_batch(&input, &CancellationToken::new())
        .await;

    assert_eq!((result.total, result.processed), (2, 2));
    assert_eq!((result.successful, result.failed), (1, 1));
    assert!(result.domains[0].is_failure());
    assert_eq!(result.domains[0].domain(), "not a domain");
    assert_eq!(result.domains[1].domain(), "example.com");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let analyzer = DomainAnalyzer::new(FakeSources::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = analyzer
        .analyze_domains_batch(&domains(&["example.com", "example.org"]), &cancel)
        .await;

    assert!(result.cancelled);
    assert_eq!(result.total, 2);
    assert_eq!(result.processed, 0);
    assert!(result.domains.is_empty());
}

#[tokio::test]
async fn test_cancel_abandons_in_flight_domain() {
    let sources = FakeSources {
        tls_delay: Some(Duration::from_secs(30)),
        ..Default::default()
    };
    let analyzer = DomainAnalyzer::new(sources);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        analyzer.analyze_domains_batch(&domains(&["example.com", "example.org"]), &cancel),
    )
    .await
    .expect("cancellation should stop the batch promptly");

    assert!(result.cancelled);
    assert_eq!(result.processed, 0);
    assert_eq!(result.successful + result.failed, result.processed);
}

#[tokio::test]
async fn test_batch_deadline_marks_cancelled() {
    let sources = FakeSources {
        tls_delay: Some(Duration::from_millis(300)),
        ..Default::default()
    };
    let analyzer =
        DomainAnalyzer::new(sources).with_batch_deadline(Some(Duration::from_millis(450)));
    let input = domains(&["one.com", "two.com", "three.com", "four.com"]);

    let result = analyzer
        .analyze_domains_batch(&input, &CancellationToken::new())
        .await;

    assert!(result.cancelled);
    assert_eq!(result.total, 4);
    assert!(result.processed >= 1 && result.processed < 4);
    assert_eq!(result.domains.len(), result.processed);
    assert_eq!(result.successful + result.failed, result.processed);
}

#[tokio::test]
async fn test_batch_serializes_entries_untagged() {
    let analyzer = DomainAnalyzer::new(full_evidence());
    let result = analyzer
        .analyze_domains_batch(&domains(&["example.com", "bad..name"]), &CancellationToken::new())
        .await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["domains"][0]["qualityScore"], 100);
    assert_eq!(json["domains"][0]["signatures"][0], "DNS_NS");
    assert!(json["domains"][0].get("error").is_none());
    assert_eq!(json["domains"][1]["domain"], "bad..name");
    assert!(json["domains"][1]["error"].is_string());
    assert!(json["domains"][1].get("qualityScore").is_none());
}
