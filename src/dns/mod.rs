//! DNS record lookups.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - Nameserver queries (NS records)
//! - Address queries (A records)
//! - Mail exchanger queries (MX records, rendered as `"<preference> <exchange>"`)
//! - Text record queries (TXT records)
//! - Alias queries (CNAME records)
//!
//! Each record kind is queried independently; a failure for one kind leaves
//! that kind empty and never prevents the others from being attempted.

mod records;
mod types;

// Re-export public API
pub use records::{check_dns_records, lookup_records};
pub use types::{DnsRecordKind, DnsRecords};

#[cfg(test)]
mod tests;
