//! Certificate extraction utilities.

use std::collections::BTreeMap;

use chrono::DateTime;
use x509_parser::certificate::X509Certificate;
use x509_parser::time::ASN1Time;
use x509_parser::x509::X509Name;

use crate::error_handling::FetchError;

use super::SslInfo;

/// Long attribute names for the distinguished-name OIDs seen in practice.
fn attribute_name(oid: &str) -> Option<&'static str> {
    match oid {
        "2.5.4.3" => Some("commonName"),
        "2.5.4.6" => Some("countryName"),
        "2.5.4.7" => Some("localityName"),
        "2.5.4.8" => Some("stateOrProvinceName"),
        "2.5.4.10" => Some("organizationName"),
        "2.5.4.11" => Some("organizationalUnitName"),
        "2.5.4.5" => Some("serialNumber"),
        "2.5.4.9" => Some("streetAddress"),
        "2.5.4.17" => Some("postalCode"),
        "1.2.840.113549.1.9.1" => Some("emailAddress"),
        "1.3.6.1.4.1.311.60.2.1.3" => Some("jurisdictionCountryName"),
        "2.5.4.15" => Some("businessCategory"),
        _ => None,
    }
}

/// Flattens a distinguished name into attribute-name -> value.
///
/// Unknown attributes keep their dotted OID as key. Repeated attributes keep
/// the last value.
pub(crate) fn name_to_map(name: &X509Name<'_>) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for attr in name.iter_attributes() {
        let Ok(value) = attr.as_str() else {
            continue;
        };
        let oid = attr.attr_type().to_id_string();
        let key = attribute_name(&oid).map(str::to_string).unwrap_or(oid);
        map.insert(key, value.to_string());
    }
    map
}

/// Renders a certificate time the way OpenSSL prints it
/// (`"Jan  5 12:00:00 2024 GMT"`).
pub(crate) fn format_asn1_time(time: &ASN1Time) -> Option<String> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .map(|dt| dt.format("%b %e %H:%M:%S %Y GMT").to_string())
}

/// Uppercase hex without separators.
pub(crate) fn serial_hex(raw: &[u8]) -> String {
    raw.iter().map(|b| format!("{b:02X}")).collect()
}

/// Maps a signature algorithm OID to its usual name.
pub(crate) fn signature_algorithm_name(oid: &str) -> String {
    match oid {
        "1.2.840.113549.1.1.5" => "sha1WithRSAEncryption",
        "1.2.840.113549.1.1.11" => "sha256WithRSAEncryption",
        "1.2.840.113549.1.1.12" => "sha384WithRSAEncryption",
        "1.2.840.113549.1.1.13" => "sha512WithRSAEncryption",
        "1.2.840.113549.1.1.10" => "rsassaPss",
        "1.2.840.10045.4.3.2" => "ecdsa-with-SHA256",
        "1.2.840.10045.4.3.3" => "ecdsa-with-SHA384",
        "1.2.840.10045.4.3.4" => "ecdsa-with-SHA512",
        "1.3.101.112" => "ED25519",
        // Return OID if unknown
        other => other,
    }
    .to_string()
}

/// Summarizes a DER-encoded leaf certificate.
pub(crate) fn summarize_certificate(der: &[u8]) -> Result<SslInfo, FetchError> {
    let (_, cert): (_, X509Certificate<'_>) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| FetchError::Tls(format!("unparseable certificate: {e}")))?;
    let tbs = &cert.tbs_certificate;

    Ok(SslInfo {
        has_ssl: true,
        issuer: name_to_map(&tbs.issuer),
        subject: name_to_map(&tbs.subject),
        not_before: format_asn1_time(&tbs.validity.not_before),
        not_after: format_asn1_time(&tbs.validity.not_after),
        serial_number: serial_hex(tbs.raw_serial()),
        // X.509 encodes v3 as 2
        version: Some(tbs.version.0 + 1),
        signature_algorithm: Some(signature_algorithm_name(
            &cert.signature_algorithm.algorithm.to_id_string(),
        )),
        protocol_version: None,
    })
}
