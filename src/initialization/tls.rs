//! TLS connector initialization for the certificate probe.

use std::sync::Arc;

use rustls::crypto::ring::default_provider;
use rustls::ClientConfig;
use tokio_rustls::TlsConnector;

use crate::tls::AcceptAnyCertificate;

/// Builds a TLS connector that completes handshakes without validating the peer.
///
/// The probe only records whether a certificate is served and what it says;
/// it never trusts the connection, so chain and hostname checks are disabled.
///
/// # Errors
///
/// Returns a `rustls::Error` if the protocol versions cannot be configured.
pub fn init_tls_connector() -> Result<TlsConnector, rustls::Error> {
    let provider = Arc::new(default_provider());
    let config = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate::new(provider)))
        .with_no_client_auth();

    Ok(TlsConnector::from(Arc::new(config)))
}
