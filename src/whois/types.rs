//! WHOIS data structures.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration data for one domain.
///
/// The default value (no text, both flags false) is what a failed lookup
/// collapses to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisInfo {
    /// Raw WHOIS text of the most specific server that answered
    pub raw_text: String,
    /// Registrar name
    pub registrar: Option<String>,
    /// Domain creation date
    pub creation_date: Option<DateTime<Utc>>,
    /// Creation date exactly as the server wrote it, kept even when it
    /// does not parse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date_raw: Option<String>,
    /// Domain expiration date
    pub expiration_date: Option<DateTime<Utc>>,
    /// Domain updated date
    pub updated_date: Option<DateTime<Utc>>,
    /// Nameservers from WHOIS (lowercase, without trailing dot)
    pub name_servers: Vec<String>,
    /// Domain status codes (e.g., "clientTransferProhibited")
    pub status: Vec<String>,
    /// Text carries at least one registration indicator
    pub is_registered: bool,
    /// Text carries an availability indicator and no registration indicator
    pub is_available: bool,
}

impl WhoisInfo {
    /// The server reported a creation date, parsed or not.
    pub fn has_creation_date(&self) -> bool {
        self.creation_date.is_some()
            || self
                .creation_date_raw
                .as_deref()
                .is_some_and(|raw| !raw.trim().is_empty())
    }
}

/// Where and how patiently to ask.
#[derive(Debug, Clone)]
pub struct WhoisSettings {
    /// Root server asked for the TLD's WHOIS server (IANA)
    pub root_server: String,
    /// TCP port, 43 outside of tests
    pub port: u16,
    /// Connect and per-read timeout
    pub timeout: Duration,
    /// Maximum attempts, including the first
    pub max_attempts: usize,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
}
