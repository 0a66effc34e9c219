//! Evidence tags derived from the fetched signals.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::dns::{DnsRecordKind, DnsRecords};
use crate::tls::SslInfo;
use crate::whois::WhoisInfo;

/// One piece of observed evidence that the domain is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
pub enum Signature {
    #[serde(rename = "DNS_NS")]
    #[strum(to_string = "DNS_NS")]
    DnsNs,
    #[serde(rename = "DNS_A")]
    #[strum(to_string = "DNS_A")]
    DnsA,
    #[serde(rename = "DNS_MX")]
    #[strum(to_string = "DNS_MX")]
    DnsMx,
    #[serde(rename = "WHOIS")]
    #[strum(to_string = "WHOIS")]
    Whois,
    #[serde(rename = "SSL")]
    #[strum(to_string = "SSL")]
    Ssl,
}

/// Tags for the evidence present, in declaration order.
pub fn extract_signatures(dns: &DnsRecords, whois: &WhoisInfo, ssl: &SslInfo) -> Vec<Signature> {
    let mut signatures = Vec::new();
    if dns.has(DnsRecordKind::Ns) {
        signatures.push(Signature::DnsNs);
    }
    if dns.has(DnsRecordKind::A) {
        signatures.push(Signature::DnsA);
    }
    if dns.has(DnsRecordKind::Mx) {
        signatures.push(Signature::DnsMx);
    }
    if whois.is_registered {
        signatures.push(Signature::Whois);
    }
    if ssl.has_ssl {
        signatures.push(Signature::Ssl);
    }
    signatures
}
