//! Prompt construction for LLM enrichment.

use crate::analysis::DomainRecord;
use crate::dns::DnsRecordKind;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the plain-text summary of a record that the model sees.
pub fn prepare_domain_info(record: &DomainRecord) -> String {
    let availability = if record.is_available {
        "Available"
    } else if record.whois_info.is_registered {
        "Registered"
    } else {
        "Unknown"
    };
    let signatures = if record.signatures.is_empty() {
        "None".to_string()
    } else {
        record
            .signatures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = vec![
        format!("Domain: {}", record.domain),
        format!("Quality Score: {}/100", record.quality_score),
        format!("Availability: {availability}"),
        format!("Technical Signatures: {signatures}"),
    ];

    let dns: Vec<String> = [
        (DnsRecordKind::Ns, "NS Records"),
        (DnsRecordKind::A, "A Records"),
        (DnsRecordKind::Mx, "MX Records"),
    ]
    .into_iter()
    .filter(|(kind, _)| record.dns_records.has(*kind))
    .map(|(kind, label)| format!("{label}: {}", record.dns_records.get(kind).len()))
    .collect();
    if !dns.is_empty() {
        lines.push(format!("DNS: {}", dns.join(", ")));
    }

    let whois = &record.whois_info;
    let mut whois_parts = Vec::new();
    if let Some(registrar) = whois.registrar.as_deref().filter(|r| !r.is_empty()) {
        whois_parts.push(format!("Registrar: {registrar}"));
    }
    if let Some(created) = whois.creation_date {
        whois_parts.push(format!("Created: {}", created.format(DATE_FORMAT)));
    }
    if let Some(expires) = whois.expiration_date {
        whois_parts.push(format!("Expires: {}", expires.format(DATE_FORMAT)));
    }
    if !whois_parts.is_empty() {
        lines.push(format!("WHOIS: {}", whois_parts.join(", ")));
    }

    let ssl = &record.ssl_info;
    if ssl.has_ssl {
        let mut ssl_parts = Vec::new();
        if !ssl.issuer.is_empty() {
            let issuer = ssl
                .issuer
                .get("organizationName")
                .map(String::as_str)
                .unwrap_or("Unknown");
            ssl_parts.push(format!("Issuer: {issuer}"));
        }
        if let Some(not_after) = &ssl.not_after {
            ssl_parts.push(format!("SSL Expires: {not_after}"));
        }
        if !ssl_parts.is_empty() {
            lines.push(format!("SSL: {}", ssl_parts.join(", ")));
        }
    }

    lines.join("\n")
}

/// Wraps the summary in the user prompt.
pub fn build_prompt(template: &str, domain_info: &str) -> String {
    format!(
        "{template}\n\nDomain Information:\n{domain_info}\n\n\
         Please provide a comprehensive analysis including:\n\
         1. Domain quality assessment\n\
         2. Business potential\n\
         3. Technical evaluation\n\
         4. Recommendations\n\
         5. Risk factors\n\n\
         Provide the response in a structured format."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{finalize_record, Signature};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_record_summary() {
        let mut record = DomainRecord::empty("example.com", Utc::now());
        finalize_record(&mut record);
        let info = prepare_domain_info(&record);
        assert_eq!(
            info,
            "Domain: example.com\nQuality Score: 0/100\nAvailability: Unknown\nTechnical Signatures: None"
        );
    }

    #[test]
    fn test_full_record_summary() {
        let mut record = DomainRecord::empty("example.com", Utc::now());
        record.dns_records.ns = vec!["a.ns.".into(), "b.ns.".into()];
        record.dns_records.a = vec!["192.0.2.1".into()];
        record.whois_info.registrar = Some("Example Registrar".into());
        record.whois_info.creation_date = Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).single();
        record.whois_info.is_registered = true;
        record.ssl_info.has_ssl = true;
        record
            .ssl_info
            .issuer
            .insert("organizationName".into(), "Let's Encrypt".into());
        record.ssl_info.not_after = Some("Jan  5 12:00:00 2025 GMT".into());
        finalize_record(&mut record);

        let info = prepare_domain_info(&record);
        assert!(info.contains("Availability: Registered"));
        assert!(info.contains("Technical Signatures: DNS_NS, DNS_A, WHOIS, SSL"));
        assert!(info.contains("DNS: NS Records: 2, A Records: 1"));
        assert!(info.contains("WHOIS: Registrar: Example Registrar, Created: 1995-08-14 04:00:00"));
        assert!(info.contains("SSL: Issuer: Let's Encrypt, SSL Expires: Jan  5 12:00:00 2025 GMT"));
        assert_eq!(record.signatures.len(), 4);
        assert!(record.signatures.contains(&Signature::Whois));
    }

    #[test]
    fn test_issuer_without_organization() {
        let mut record = DomainRecord::empty("example.com", Utc::now());
        record.ssl_info.has_ssl = true;
        record.ssl_info.issuer.insert("commonName".into(), "R3".into());
        let info = prepare_domain_info(&record);
        assert!(info.ends_with("SSL: Issuer: Unknown"));
    }

    #[test]
    fn test_build_prompt_layout() {
        let prompt = build_prompt("Analyze this.", "Domain: example.com");
        assert!(prompt.starts_with("Analyze this.\n\nDomain Information:\nDomain: example.com\n\n"));
        assert!(prompt.contains("5. Risk factors"));
        assert!(prompt.ends_with("Provide the response in a structured format."));
    }
}
