//! Raw WHOIS protocol client (RFC 3912).
//!
//! Resolution follows the usual chain: the root server names the registry
//! server for the TLD (`refer:`), and a thin registry answer may name the
//! registrar's server (`Registrar WHOIS Server:`).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::{MAX_WHOIS_REFERRALS, MAX_WHOIS_RESPONSE_SIZE};
use crate::error_handling::FetchError;

use super::types::WhoisSettings;

/// Sends one query to one server and reads the answer until EOF.
async fn query_server(server: &str, query: &str, settings: &WhoisSettings) -> Result<String, FetchError> {
    let addr = format!("{server}:{}", settings.port);

    let mut stream = timeout(settings.timeout, TcpStream::connect(&addr))
        .await
        .map_err(|_| FetchError::Timeout(format!("WHOIS connection to {addr}")))?
        .map_err(|source| FetchError::Connect {
            target: addr.clone(),
            source,
        })?;

    timeout(settings.timeout, stream.write_all(format!("{query}\r\n").as_bytes()))
        .await
        .map_err(|_| FetchError::Timeout(format!("WHOIS query to {addr}")))?
        .map_err(|source| FetchError::Connect {
            target: addr.clone(),
            source,
        })?;

    let mut response = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match timeout(settings.timeout, stream.read(&mut buf)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                response.extend_from_slice(&buf[..n]);
                if response.len() > MAX_WHOIS_RESPONSE_SIZE {
                    return Err(FetchError::Whois(format!("response from {server} too large")));
                }
            }
            Ok(Err(e)) => {
                return Err(FetchError::Whois(format!("read from {server} failed: {e}")));
            }
            // Some servers keep the socket open after answering
            Err(_) if !response.is_empty() => break,
            Err(_) => return Err(FetchError::Timeout(format!("WHOIS read from {addr}"))),
        }
    }

    // Not every registry answers in UTF-8; fall back to Latin-1
    Ok(String::from_utf8(response)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&b| b as char).collect()))
}

/// Server named by a root-server answer (`refer:` or `whois:` line).
pub(crate) fn extract_refer(response: &str) -> Option<String> {
    response.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let key = key.trim().to_lowercase();
        if key != "refer" && key != "whois" {
            return None;
        }
        normalize_server(value)
    })
}

/// Registrar referral lines, in precedence order.
static REFERRAL_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)Registrar WHOIS Server:[ \t]*(\S+)").expect("valid registrar referral regex"),
        Regex::new(r"(?i)ReferralServer:[ \t]*(\S+)").expect("valid ARIN-style referral regex"),
    ]
});

/// Registrar server named by a thin registry answer.
pub(crate) fn extract_registrar_referral(response: &str) -> Option<String> {
    REFERRAL_PATTERNS.iter().find_map(|re| {
        re.captures(response)
            .and_then(|caps| caps.get(1))
            .and_then(|m| normalize_server(m.as_str()))
    })
}

/// Reduces `whois://host:43/` and similar forms to a bare lowercase host.
fn normalize_server(value: &str) -> Option<String> {
    let value = value.trim().to_lowercase();
    let value = value
        .strip_prefix("whois://")
        .or_else(|| value.strip_prefix("rwhois://"))
        .unwrap_or(&value);
    let host = value.split(['/', ':']).next()?.trim().trim_end_matches('.');
    if host.is_empty() || !host.contains('.') {
        return None;
    }
    Some(host.to_string())
}

/// Resolves and queries the authoritative WHOIS servers for `domain`.
///
/// # Returns
///
/// The registry answer, followed by the registrar answer when the registry
/// referred to one and it answered.
///
/// # Errors
///
/// Fails when the root or registry server cannot be reached, when the root
/// knows no server for the TLD, or when the registry answer is empty.
pub(crate) async fn query_whois(domain: &str, settings: &WhoisSettings) -> Result<String, FetchError> {
    let tld = domain
        .rsplit('.')
        .next()
        .filter(|tld| !tld.is_empty())
        .ok_or_else(|| FetchError::Whois(format!("no TLD in '{domain}'")))?;

    let root_answer = query_server(&settings.root_server, tld, settings).await?;
    let registry = extract_refer(&root_answer)
        .ok_or_else(|| FetchError::Whois(format!("no WHOIS server known for .{tld}")))?;
    log::debug!("WHOIS server for .{tld} is {registry}");

    let mut visited = HashSet::from([settings.root_server.to_lowercase(), registry.clone()]);
    let mut text = query_server(&registry, domain, settings).await?;
    if text.trim().is_empty() {
        return Err(FetchError::Whois(format!("empty answer from {registry}")));
    }

    let mut last = text.clone();
    for _ in 0..MAX_WHOIS_REFERRALS {
        let Some(referral) = extract_registrar_referral(&last) else {
            break;
        };
        if !visited.insert(referral.clone()) {
            break;
        }
        log::debug!("Following WHOIS referral to {referral} for {domain}");
        match query_server(&referral, domain, settings).await {
            Ok(answer) if !answer.trim().is_empty() => {
                text.push_str("\n\n");
                text.push_str(&answer);
                last = answer;
            }
            Ok(_) => break,
            Err(e) => {
                // The registry answer alone is still usable
                log::debug!("WHOIS referral {referral} failed for {domain}: {e}");
                break;
            }
        }
    }

    Ok(text)
}
