//! Registration status classification from raw WHOIS text.
//!
//! Registries do not agree on a format for "not found" answers, so the
//! classifier matches the lowercased text against two phrase lists. A single
//! registration phrase wins over any number of availability phrases.

/// Phrases registries use to report an unregistered name.
pub const AVAILABLE_INDICATORS: &[&str] = &[
    "no match for",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "no object found",
    "no matching record",
    "status: free",
    "status: available",
    "is available for registration",
    "domain status: no object found",
    "no match!!",
    "not registered",
    "available for registration",
    "domain available",
    "available domain",
    "free domain",
    "domain free",
    "unregistered domain",
    "domain unregistered",
    "no match",
    "not found in database",
    "no matching record found",
    "domain name not found",
    "object does not exist",
    "no such domain",
    "domain status: available",
    "registration status: available",
    "state: available",
    "domain state: available",
    "available for purchase",
    "this domain is available",
    "domain is available",
    "can be registered",
    "eligible for registration",
    "free for registration",
    "open for registration",
    "ready for registration",
    "registration available",
    "status code: 210",
    "status code: 220",
    "response: 210",
    "response: 220",
];

/// Phrases that only appear in the record of a registered name.
pub const REGISTERED_INDICATORS: &[&str] = &[
    "registrar:",
    "registrant:",
    "creation date:",
    "updated date:",
    "expiration date:",
    "name server:",
    "nserver:",
    "status: registered",
    "status: active",
    "status: ok",
    "status: connect",
    "status: clienttransferprohibited",
    "status: servertransferprohibited",
    "domain status: registered",
    "domain status: active",
    "registration date:",
    "expiry date:",
    "registry expiry date:",
    "registrar registration expiration date:",
    "admin contact:",
    "tech contact:",
    "billing contact:",
    "dnssec:",
    "domain servers in listed order:",
    "registered domain",
    "registered on:",
    "expires on:",
    "last updated on:",
    "changed:",
    "holder:",
    "person:",
    "sponsoring registrar:",
    "whois server:",
    "referral url:",
    "domain name:",
    "registry domain id:",
    "registrar whois server:",
    "registrar url:",
    "registrar iana id:",
    "registrar abuse contact email:",
    "registrar abuse contact phone:",
    "reseller:",
    "domain status:",
    "name server",
    "dnssec: unsigned",
    "dnssec: signed",
];

/// Outcome of classifying one WHOIS answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registration {
    pub is_registered: bool,
    pub is_available: bool,
}

/// Classifies raw WHOIS text.
///
/// `is_available` is never true together with `is_registered`. Text matching
/// neither list (empty answers, rate-limit banners) yields both false.
pub fn classify_registration(raw: &str) -> Registration {
    let text = raw.to_lowercase();
    let is_registered = REGISTERED_INDICATORS.iter().any(|p| text.contains(p));
    let is_available = !is_registered && AVAILABLE_INDICATORS.iter().any(|p| text.contains(p));
    Registration {
        is_registered,
        is_available,
    }
}
