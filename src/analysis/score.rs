//! Quality score.
//!
//! Fixed weights per piece of evidence; the weights add up to 110 and the sum
//! is capped at 100, so a domain can miss one minor signal and still score
//! full marks.

use crate::dns::{DnsRecordKind, DnsRecords};
use crate::tls::SslInfo;
use crate::whois::WhoisInfo;

pub const NS_WEIGHT: u32 = 20;
pub const A_WEIGHT: u32 = 20;
pub const MX_WEIGHT: u32 = 15;
pub const TXT_WEIGHT: u32 = 10;
pub const REGISTRAR_WEIGHT: u32 = 10;
pub const CREATION_DATE_WEIGHT: u32 = 10;
pub const WHOIS_NAME_SERVERS_WEIGHT: u32 = 10;
pub const SSL_WEIGHT: u32 = 15;
pub const MAX_SCORE: u8 = 100;

/// Scores the evidence, 0..=100. Deterministic; the web archive summary
/// plays no part.
pub fn quality_score(dns: &DnsRecords, whois: &WhoisInfo, ssl: &SslInfo) -> u8 {
    let mut score = 0;

    if dns.has(DnsRecordKind::Ns) {
        score += NS_WEIGHT;
    }
    if dns.has(DnsRecordKind::A) {
        score += A_WEIGHT;
    }
    if dns.has(DnsRecordKind::Mx) {
        score += MX_WEIGHT;
    }
    if dns.has(DnsRecordKind::Txt) {
        score += TXT_WEIGHT;
    }

    if whois.registrar.as_deref().is_some_and(|r| !r.trim().is_empty()) {
        score += REGISTRAR_WEIGHT;
    }
    if whois.has_creation_date() {
        score += CREATION_DATE_WEIGHT;
    }
    if !whois.name_servers.is_empty() {
        score += WHOIS_NAME_SERVERS_WEIGHT;
    }

    if ssl.has_ssl {
        score += SSL_WEIGHT;
    }

    // Clamped to MAX_SCORE, so the narrowing cannot truncate
    score.min(u32::from(MAX_SCORE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn full_evidence() -> (DnsRecords, WhoisInfo, SslInfo) {
        let dns = DnsRecords {
            ns: vec!["ns1.example.com.".to_string()],
            a: vec!["192.0.2.1".to_string()],
            mx: vec!["10 mx.example.com.".to_string()],
            txt: vec!["v=spf1 -all".to_string()],
            cname: Vec::new(),
        };
        let whois = WhoisInfo {
            registrar: Some("Example Registrar".to_string()),
            creation_date: Some(Utc::now()),
            name_servers: vec!["ns1.example.com".to_string()],
            is_registered: true,
            ..Default::default()
        };
        let ssl = SslInfo {
            has_ssl: true,
            ..Default::default()
        };
        (dns, whois, ssl)
    }

    #[test]
    fn test_no_evidence_scores_zero() {
        assert_eq!(
            quality_score(&DnsRecords::default(), &WhoisInfo::default(), &SslInfo::default()),
            0
        );
    }

    #[test]
    fn test_full_evidence_is_clamped_to_100() {
        let (dns, whois, ssl) = full_evidence();
        assert_eq!(quality_score(&dns, &whois, &ssl), 100);
    }

    #[test]
    fn test_one_minor_signal_missing_still_100() {
        let (mut dns, whois, ssl) = full_evidence();
        dns.txt.clear();
        assert_eq!(quality_score(&dns, &whois, &ssl), 100);
    }

    #[test]
    fn test_partial_evidence() {
        let dns = DnsRecords {
            ns: vec!["ns1.example.com.".to_string()],
            a: vec!["192.0.2.1".to_string()],
            ..Default::default()
        };
        let ssl = SslInfo {
            has_ssl: true,
            ..Default::default()
        };
        assert_eq!(quality_score(&dns, &WhoisInfo::default(), &ssl), 55);
    }

    #[test]
    fn test_blank_registrar_does_not_count() {
        let whois = WhoisInfo {
            registrar: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            quality_score(&DnsRecords::default(), &whois, &SslInfo::default()),
            0
        );
    }

    #[test]
    fn test_creation_date_counts_in_registry_formats() {
        for text in [
            "Creation Date: 1997-09-15T07:00:00+0000\n",
            "created: 19991211 #15324\n",
            "Creation Date: 15-Sep-1997 07:00:00 UTC\n",
        ] {
            let whois = crate::whois::whois_info_from_text(text);
            assert!(whois.creation_date.is_some(), "unparsed: {text}");
            assert_eq!(
                quality_score(&DnsRecords::default(), &whois, &SslInfo::default()),
                10,
                "text: {text}"
            );
        }
    }

    #[test]
    fn test_unparseable_creation_date_still_counts() {
        let whois = WhoisInfo {
            creation_date_raw: Some("before the war".to_string()),
            ..Default::default()
        };
        assert_eq!(
            quality_score(&DnsRecords::default(), &whois, &SslInfo::default()),
            10
        );
    }

    #[test]
    fn test_cname_does_not_count() {
        let dns = DnsRecords {
            cname: vec!["alias.example.net.".to_string()],
            ..Default::default()
        };
        assert_eq!(
            quality_score(&dns, &WhoisInfo::default(), &SslInfo::default()),
            0
        );
    }
}
