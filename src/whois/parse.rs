//! WHOIS text parsing.
//!
//! WHOIS answers are loosely formatted `key: value` lines whose key names
//! differ between registries, so each field accepts a list of aliases and
//! the first non-empty match wins.

use chrono::{DateTime, Utc};

use super::types::WhoisInfo;

const REGISTRAR_KEYS: &[&str] = &["registrar", "sponsoring registrar", "registrar name"];
const CREATION_KEYS: &[&str] = &[
    "creation date",
    "created",
    "created on",
    "registered on",
    "registration date",
    "domain registration date",
    "registration time",
];
const EXPIRATION_KEYS: &[&str] = &[
    "registry expiry date",
    "registrar registration expiration date",
    "expiration date",
    "expiry date",
    "expires on",
    "expire date",
    "paid-till",
    "expiration time",
];
const UPDATED_KEYS: &[&str] = &[
    "updated date",
    "last updated on",
    "last updated",
    "last modified",
    "changed",
];
const NAME_SERVER_KEYS: &[&str] = &["name server", "nameserver", "nserver", "name servers"];
const STATUS_KEYS: &[&str] = &["domain status", "status"];

/// Splits raw WHOIS text into lowercase-key/value pairs.
///
/// Comment lines (`%`, `#`, `>>>`) and lines without a value are skipped.
fn fields(raw: &str) -> impl Iterator<Item = (String, &str)> {
    raw.lines().filter_map(|line| {
        let line = line.trim();
        if line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>") {
            return None;
        }
        let (key, value) = line.split_once(':')?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some((key.trim().to_lowercase(), value))
    })
}

fn first_value<'a>(raw: &'a str, keys: &[&str]) -> Option<&'a str> {
    // Alias order decides precedence, not line order
    keys.iter()
        .find_map(|key| fields(raw).find(|(k, _)| k == key).map(|(_, v)| v))
}

fn all_values<'a>(raw: &'a str, keys: &[&str]) -> Vec<&'a str> {
    fields(raw)
        .filter(|(k, _)| keys.contains(&k.as_str()))
        .map(|(_, v)| v)
        .collect()
}

/// Extracts registrar, dates, name servers and status codes from raw text.
///
/// Registration flags are left false; they come from the classifier.
pub(crate) fn parse_whois_text(raw: &str) -> WhoisInfo {
    let mut name_servers: Vec<String> = Vec::new();
    for value in all_values(raw, NAME_SERVER_KEYS) {
        // Some registries append glue addresses after the host name
        let Some(host) = value.split_whitespace().next() else {
            continue;
        };
        let host = host.trim_end_matches('.').to_lowercase();
        if !host.is_empty() && !name_servers.contains(&host) {
            name_servers.push(host);
        }
    }

    let mut status: Vec<String> = Vec::new();
    for value in all_values(raw, STATUS_KEYS) {
        // "clientTransferProhibited https://icann.org/epp#clientTransferProhibited"
        let Some(code) = value.split_whitespace().next() else {
            continue;
        };
        if !status.iter().any(|s| s == code) {
            status.push(code.to_string());
        }
    }

    let creation = first_value(raw, CREATION_KEYS);

    WhoisInfo {
        raw_text: raw.to_string(),
        registrar: first_value(raw, REGISTRAR_KEYS).map(str::to_string),
        creation_date: creation.and_then(parse_date_string),
        creation_date_raw: creation.map(str::to_string),
        expiration_date: first_value(raw, EXPIRATION_KEYS).and_then(parse_date_string),
        updated_date: first_value(raw, UPDATED_KEYS).and_then(parse_date_string),
        name_servers,
        status,
        is_registered: false,
        is_available: false,
    }
}

/// Formats carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z"];

/// Common WHOIS date formats without an offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d-%b-%Y %H:%M:%S",
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d-%b-%Y",
    "%d.%m.%Y",
    "%d/%m/%Y",
];

/// Attempts to parse a date string in various formats
///
/// A trailing word such as a zone name (`UTC`) or a registry note
/// (`#15324`) is dropped when the full string does not parse.
pub(crate) fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    parse_date_exact(date_str).or_else(|| {
        let (without_suffix, _) = date_str.rsplit_once(char::is_whitespace)?;
        parse_date_exact(without_suffix.trim_end())
    })
}

fn parse_date_exact(date_str: &str) -> Option<DateTime<Utc>> {
    if date_str.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
