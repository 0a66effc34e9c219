//! DNS record data structures.

use hickory_resolver::proto::rr::RecordType;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Record kinds queried for every domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum DnsRecordKind {
    #[strum(to_string = "NS")]
    Ns,
    #[strum(to_string = "A")]
    A,
    #[strum(to_string = "MX")]
    Mx,
    #[strum(to_string = "TXT")]
    Txt,
    #[strum(to_string = "CNAME")]
    Cname,
}

impl DnsRecordKind {
    /// The wire record type for this kind.
    pub fn record_type(self) -> RecordType {
        match self {
            DnsRecordKind::Ns => RecordType::NS,
            DnsRecordKind::A => RecordType::A,
            DnsRecordKind::Mx => RecordType::MX,
            DnsRecordKind::Txt => RecordType::TXT,
            DnsRecordKind::Cname => RecordType::CNAME,
        }
    }
}

/// Record values per kind, in resolver answer order.
///
/// An empty list means either "no such record" or "lookup failed"; the two
/// are deliberately not distinguished in the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecords {
    #[serde(rename = "NS", default)]
    pub ns: Vec<String>,
    #[serde(rename = "A", default)]
    pub a: Vec<String>,
    #[serde(rename = "MX", default)]
    pub mx: Vec<String>,
    #[serde(rename = "TXT", default)]
    pub txt: Vec<String>,
    #[serde(rename = "CNAME", default)]
    pub cname: Vec<String>,
}

impl DnsRecords {
    /// Values recorded for `kind`.
    pub fn get(&self, kind: DnsRecordKind) -> &[String] {
        match kind {
            DnsRecordKind::Ns => &self.ns,
            DnsRecordKind::A => &self.a,
            DnsRecordKind::Mx => &self.mx,
            DnsRecordKind::Txt => &self.txt,
            DnsRecordKind::Cname => &self.cname,
        }
    }

    /// Replaces the values recorded for `kind`.
    pub fn set(&mut self, kind: DnsRecordKind, values: Vec<String>) {
        match kind {
            DnsRecordKind::Ns => self.ns = values,
            DnsRecordKind::A => self.a = values,
            DnsRecordKind::Mx => self.mx = values,
            DnsRecordKind::Txt => self.txt = values,
            DnsRecordKind::Cname => self.cname = values,
        }
    }

    /// Whether at least one value was recorded for `kind`.
    pub fn has(&self, kind: DnsRecordKind) -> bool {
        !self.get(kind).is_empty()
    }

    /// Whether no kind holds any value.
    pub fn is_empty(&self) -> bool {
        self.ns.is_empty()
            && self.a.is_empty()
            && self.mx.is_empty()
            && self.txt.is_empty()
            && self.cname.is_empty()
    }
}
