//! TLS/SSL certificate probe.
//!
//! This module connects to port 443 and summarizes the leaf certificate the
//! server presents:
//! - Subject and issuer (attribute-name -> value maps)
//! - Validity period (OpenSSL-style strings)
//! - Serial number, X.509 version and signature algorithm
//! - Negotiated TLS version
//!
//! Chain and hostname validation are skipped: the probe reports what is served,
//! not whether a browser would trust it. Uses `tokio-rustls` for async TLS
//! connections and `x509-parser` for certificate parsing.

mod extract;
mod verifier;

use std::collections::BTreeMap;
use std::time::Duration;

use rustls::pki_types::ServerName;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use crate::config::TLS_PORT;
use crate::error_handling::FetchError;
use crate::fetch::Fetched;

pub use verifier::AcceptAnyCertificate;

/// Certificate summary. The default (`has_ssl == false`, everything empty)
/// stands for "no certificate obtained".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslInfo {
    pub has_ssl: bool,
    pub issuer: BTreeMap<String, String>,
    pub subject: BTreeMap<String, String>,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
    pub serial_number: String,
    pub version: Option<u32>,
    pub signature_algorithm: Option<String>,
    /// Negotiated protocol, e.g. "TLSv1_3"
    pub protocol_version: Option<String>,
}

/// Retrieves the certificate summary for a domain on port 443.
///
/// Connection and handshake together are bounded by `timeout`. Any failure
/// (refused, timeout, handshake error, no certificate) degrades to
/// `has_ssl == false`.
pub async fn check_ssl_certificate(
    domain: &str,
    connector: &TlsConnector,
    timeout: Duration,
) -> Fetched<SslInfo> {
    check_ssl_certificate_on(domain, TLS_PORT, connector, timeout).await
}

pub(crate) async fn check_ssl_certificate_on(
    domain: &str,
    port: u16,
    connector: &TlsConnector,
    timeout: Duration,
) -> Fetched<SslInfo> {
    log::debug!("Attempting to get SSL info for domain: {domain}");

    let result = match tokio::time::timeout(timeout, probe(domain, port, connector)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(format!("TLS probe of {domain}:{port}"))),
    };

    match result {
        Ok(info) => {
            log::debug!("SSL certificate info extracted for domain: {domain}");
            Fetched::Observed(info)
        }
        Err(e) => {
            log::warn!("No SSL certificate for {domain}: {e}");
            Fetched::degraded(e)
        }
    }
}

async fn probe(domain: &str, port: u16, connector: &TlsConnector) -> Result<SslInfo, FetchError> {
    let server_name = ServerName::try_from(domain.to_string())
        .map_err(|e| FetchError::Tls(format!("invalid server name: {e}")))?;

    let sock = TcpStream::connect((domain, port))
        .await
        .map_err(|source| FetchError::Connect {
            target: format!("{domain}:{port}"),
            source,
        })?;

    let tls_stream = connector
        .connect(server_name, sock)
        .await
        .map_err(|e| FetchError::Tls(format!("handshake failed: {e}")))?;

    let connection = tls_stream.get_ref().1;
    let protocol_version = connection.protocol_version().map(|v| format!("{v:?}"));
    let leaf = connection
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| FetchError::Tls("server presented no certificate".to_string()))?;

    let mut info = extract::summarize_certificate(leaf.as_ref())?;
    info.protocol_version = protocol_version;
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_tls_connector;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_default_means_no_ssl() {
        let info = SslInfo::default();
        assert!(!info.has_ssl);
        assert!(info.issuer.is_empty());
        assert!(info.not_after.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let info = SslInfo {
            has_ssl: true,
            not_after: Some("Jan  5 12:00:00 2025 GMT".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["hasSsl"], true);
        assert_eq!(json["notAfter"], "Jan  5 12:00:00 2025 GMT");
        assert!(json.get("serialNumber").is_some());
    }

    #[tokio::test]
    async fn test_plaintext_server_degrades() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let _ = socket.write_all(b"HTTP/1.1 400 Bad Request\r\n\r\n").await;
            }
        });

        let connector = init_tls_connector().unwrap();
        let fetched =
            check_ssl_certificate_on("127.0.0.1", port, &connector, Duration::from_secs(2)).await;
        assert!(fetched.is_degraded());
        assert!(!fetched.into_value().has_ssl);
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            // Accept and hold the socket without ever answering the ClientHello
            let held = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(held);
        });

        let connector = init_tls_connector().unwrap();
        let fetched =
            check_ssl_certificate_on("127.0.0.1", port, &connector, Duration::from_millis(200))
                .await;
        match fetched {
            Fetched::Degraded { reason } => assert!(reason.contains("timed out"), "{reason}"),
            Fetched::Observed(_) => panic!("silent server must not yield a certificate"),
        }
    }
}
