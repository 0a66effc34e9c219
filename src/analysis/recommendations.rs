//! Human-readable advisories for a scored record.

use crate::dns::{DnsRecordKind, DnsRecords};
use crate::tls::SslInfo;

pub const AVAILABLE: &str = "Domain is available for registration";
pub const REGISTERED: &str = "Domain is already registered";
pub const NO_A_RECORDS: &str = "No A records found - domain may not be actively used";
pub const NO_SSL: &str = "No SSL certificate found - HTTPS not available";
pub const LOW_SCORE: &str = "Low quality score - limited web presence";
pub const HIGH_SCORE: &str = "High quality score - strong web presence";

const LOW_SCORE_BELOW: u8 = 50;
const HIGH_SCORE_ABOVE: u8 = 80;

/// Advisories in fixed order: availability, A records, TLS, score band.
///
/// Scores in 50..=80 get no score advisory.
pub fn generate_recommendations(
    is_available: bool,
    dns: &DnsRecords,
    ssl: &SslInfo,
    quality_score: u8,
) -> Vec<String> {
    let mut recommendations = Vec::with_capacity(4);

    recommendations.push(if is_available { AVAILABLE } else { REGISTERED }.to_string());

    if !dns.has(DnsRecordKind::A) {
        recommendations.push(NO_A_RECORDS.to_string());
    }
    if !ssl.has_ssl {
        recommendations.push(NO_SSL.to_string());
    }

    if quality_score < LOW_SCORE_BELOW {
        recommendations.push(LOW_SCORE.to_string());
    } else if quality_score > HIGH_SCORE_ABOVE {
        recommendations.push(HIGH_SCORE.to_string());
    }

    recommendations
}
