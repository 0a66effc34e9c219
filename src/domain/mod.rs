//! Domain name normalization and validation.
//!
//! Operators paste names in many shapes (`https://www.Example.com/path`,
//! `example.com.`, ` EXAMPLE.COM `). Everything is reduced to a bare,
//! lowercase host name before any network lookup is made.
//!
//! Key functions:
//! - `normalize_domain()` - Normalizes and validates one input line
//! - `parse_domain_list()` - Parses a newline-separated list, skipping comments

use crate::config::{MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH};
use crate::error_handling::DomainError;

/// Normalizes a user-supplied domain name.
///
/// Steps:
/// 1. Trim whitespace and lowercase
/// 2. If a scheme is present, keep only the URL host (drops port, path, query)
/// 3. Otherwise drop anything after the first `/`
/// 4. Strip a leading `www.` and a trailing root dot
/// 5. Convert internationalized names to their punycode (`xn--`) form
/// 6. Validate label syntax (RFC 1035 letters, digits, hyphen)
///
/// # Errors
///
/// Returns `DomainError` if nothing usable remains or the name is malformed.
pub fn normalize_domain(input: &str) -> Result<String, DomainError> {
    let trimmed = input.trim().to_lowercase();

    let host = if trimmed.contains("://") {
        match url::Url::parse(&trimmed) {
            Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
            Err(_) => {
                return Err(DomainError::Invalid {
                    domain: trimmed,
                    reason: "unparseable URL",
                })
            }
        }
    } else {
        trimmed
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string()
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host.strip_suffix('.').unwrap_or(host);

    if host.is_empty() {
        return Err(DomainError::Empty);
    }

    let host = to_ascii_host(host)?;
    validate_domain(&host)?;
    Ok(host)
}

/// IDNA conversion, matching what `url` does for hosts of full URLs.
fn to_ascii_host(host: &str) -> Result<String, DomainError> {
    if host.is_ascii() {
        return Ok(host.to_string());
    }
    match url::Host::parse(host) {
        Ok(url::Host::Domain(ascii)) => Ok(ascii),
        _ => Err(DomainError::Invalid {
            domain: host.to_string(),
            reason: "not a valid internationalized name",
        }),
    }
}

fn validate_domain(domain: &str) -> Result<(), DomainError> {
    let invalid = |reason| DomainError::Invalid {
        domain: domain.to_string(),
        reason,
    };

    if domain.len() > MAX_DOMAIN_LENGTH {
        return Err(invalid("name longer than 253 characters"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid("at least two labels are required"));
    }

    for label in &labels {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(invalid("label longer than 63 characters"));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(invalid("labels may only contain letters, digits and '-'"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("labels may not start or end with '-'"));
        }
    }

    // A numeric TLD means this is an IPv4 address, which has no registration
    if labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid("IP addresses are not domain names"));
    }

    Ok(())
}

/// Parses a newline-separated domain list.
///
/// Blank lines and lines starting with `#` are skipped. Entries are returned
/// as written (trimmed) so invalid names still reach the batch, where they
/// become failure stubs; exact duplicates after normalization are dropped,
/// keeping the first occurrence.
pub fn parse_domain_list(contents: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            let key = normalize_domain(line).unwrap_or_else(|_| line.to_string());
            seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}
