//! Wayback Machine coverage analysis.
//!
//! One availability call decides whether the domain was ever archived; only
//! then are the CDX index queries made (page count, oldest and latest
//! capture). The summary is informational and never feeds the quality score.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_handling::FetchError;
use crate::fetch::Fetched;

/// Base URLs of the two Wayback APIs.
#[derive(Debug, Clone)]
pub struct ArchiveEndpoints {
    pub availability_url: String,
    pub cdx_url: String,
}

/// Archive coverage for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebArchiveInfo {
    pub has_snapshots: bool,
    pub closest_url: Option<String>,
    /// `YYYYMMDDhhmmss`
    pub closest_timestamp: Option<String>,
    /// CDX page count, a coarse proxy for the number of captures
    pub total_snapshots: u64,
    pub first_snapshot: Option<String>,
    pub last_snapshot: Option<String>,
    pub years_covered: u32,
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    archived_snapshots: ArchivedSnapshots,
}

#[derive(Debug, Default, Deserialize)]
struct ArchivedSnapshots {
    closest: Option<ClosestSnapshot>,
}

#[derive(Debug, Deserialize)]
struct ClosestSnapshot {
    #[serde(default)]
    available: bool,
    url: Option<String>,
    timestamp: Option<String>,
}

/// Inclusive number of calendar years between two CDX timestamps.
///
/// Returns 0 unless both start with a four-digit year and the last is not
/// before the first.
pub fn years_covered(first: &str, last: &str) -> u32 {
    let year = |ts: &str| ts.get(..4).and_then(|y| y.parse::<u32>().ok());
    match (year(first), year(last)) {
        (Some(first), Some(last)) if last >= first => last - first + 1,
        _ => 0,
    }
}

/// Extracts the page count from a `showNumPages` answer, which is either a
/// bare number or an object with `num_pages`.
fn parse_page_count(body: &str) -> u64 {
    match serde_json::from_str::<Value>(body.trim()) {
        Ok(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Ok(Value::Object(map)) => map.get("num_pages").and_then(Value::as_u64).unwrap_or(0),
        _ => 0,
    }
}

/// Timestamp (column 1) of the first data row of a CDX JSON answer; row 0 is
/// the header.
fn first_row_timestamp(rows: &Value) -> Option<String> {
    rows.get(1)?.get(1)?.as_str().map(str::to_string)
}

async fn check_availability(
    domain: &str,
    client: &Client,
    endpoints: &ArchiveEndpoints,
) -> Result<Option<ClosestSnapshot>, FetchError> {
    let response: AvailabilityResponse = client
        .get(&endpoints.availability_url)
        .query(&[("url", domain)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(response.archived_snapshots.closest)
}

async fn snapshot_count(domain: &str, client: &Client, endpoints: &ArchiveEndpoints) -> Result<u64, FetchError> {
    let body = client
        .get(&endpoints.cdx_url)
        .query(&[
            ("url", domain),
            ("output", "json"),
            ("limit", "1"),
            ("showNumPages", "true"),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_page_count(&body))
}

async fn edge_snapshot(
    domain: &str,
    sort: &str,
    client: &Client,
    endpoints: &ArchiveEndpoints,
) -> Result<Option<String>, FetchError> {
    let rows: Value = client
        .get(&endpoints.cdx_url)
        .query(&[("url", domain), ("output", "json"), ("limit", "1"), ("sort", sort)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(first_row_timestamp(&rows))
}

/// Summarizes the archive coverage of `domain`.
///
/// A failed availability call degrades the whole summary. Failures of the
/// follow-up CDX calls only leave their fields empty.
pub async fn analyze_web_archive(
    domain: &str,
    client: &Client,
    endpoints: &ArchiveEndpoints,
) -> Fetched<WebArchiveInfo> {
    let closest = match check_availability(domain, client, endpoints).await {
        Ok(closest) => closest,
        Err(e) => {
            log::warn!("Wayback availability check failed for {domain}: {e}");
            return Fetched::degraded(e);
        }
    };

    let Some(closest) = closest.filter(|c| c.available) else {
        log::debug!("No Wayback snapshots for {domain}");
        return Fetched::Observed(WebArchiveInfo::default());
    };

    let mut info = WebArchiveInfo {
        has_snapshots: true,
        closest_url: closest.url,
        closest_timestamp: closest.timestamp,
        ..Default::default()
    };

    let (count, first, last) = tokio::join!(
        snapshot_count(domain, client, endpoints),
        edge_snapshot(domain, "oldest", client, endpoints),
        edge_snapshot(domain, "latest", client, endpoints),
    );

    match count {
        Ok(count) => info.total_snapshots = count,
        Err(e) => log::debug!("Wayback snapshot count failed for {domain}: {e}"),
    }
    match first {
        Ok(first) => info.first_snapshot = first,
        Err(e) => log::debug!("Wayback oldest snapshot lookup failed for {domain}: {e}"),
    }
    match last {
        Ok(last) => info.last_snapshot = last,
        Err(e) => log::debug!("Wayback latest snapshot lookup failed for {domain}: {e}"),
    }

    if let (Some(first), Some(last)) = (&info.first_snapshot, &info.last_snapshot) {
        info.years_covered = years_covered(first, last);
    }

    Fetched::Observed(info)
}
