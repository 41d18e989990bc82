//! TLS termination for the RPC listener.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustls::crypto::ring::default_provider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};

/// PEM file locations for the server certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
    /// Trust anchor for client certificates. When set, every client must
    /// present a certificate signed by it.
    pub ca_cert: Option<PathBuf>,
}

impl TlsConfig {
    pub const DEFAULT_CERT: &'static str = "./certs/quill-post-cert.pem";
    pub const DEFAULT_KEY: &'static str = "./certs/quill-post-key.pem";

    /// `None` unless `TLS_ENABLE` is set to a true value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let enabled = lookup("TLS_ENABLE")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);
        if !enabled {
            return None;
        }

        Some(Self {
            cert: lookup("TLS_CERT")
                .unwrap_or_else(|| Self::DEFAULT_CERT.to_string())
                .into(),
            key: lookup("TLS_KEY")
                .unwrap_or_else(|| Self::DEFAULT_KEY.to_string())
                .into(),
            ca_cert: lookup("TLS_CA_CERT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Build the rustls server configuration from the PEM files.
    pub fn load(&self) -> io::Result<ServerConfig> {
        let provider = Arc::new(default_provider());
        let certs = read_certs(&self.cert)?;
        let key = read_key(&self.key)?;

        let builder = ServerConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()
            .map_err(io::Error::other)?;

        let builder = match &self.ca_cert {
            Some(path) => {
                let mut roots = RootCertStore::empty();
                for cert in read_certs(path)? {
                    roots.add(cert).map_err(io::Error::other)?;
                }
                let verifier = WebPkiClientVerifier::builder_with_provider(roots.into(), provider)
                    .build()
                    .map_err(io::Error::other)?;
                builder.with_client_cert_verifier(verifier)
            }
            None => builder.with_no_client_auth(),
        };

        builder
            .with_single_cert(certs, key)
            .map_err(io::Error::other)
    }
}

fn read_certs(path: &Path) -> io::Result<Vec<CertificateDer<'static>>> {
    let mut reader = BufReader::new(File::open(path)?);
    let certs = rustls_pemfile::certs(&mut reader).collect::<io::Result<Vec<_>>>()?;

    if certs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no certificates in {}", path.display()),
        ));
    }

    Ok(certs)
}

fn read_key(path: &Path) -> io::Result<PrivateKeyDer<'static>> {
    let mut reader = BufReader::new(File::open(path)?);
    rustls_pemfile::private_key(&mut reader)?.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no private key in {}", path.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use uuid::Uuid;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Option<TlsConfig> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        TlsConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_disabled_by_default() {
        assert_eq!(from_vars(&[]), None);
        assert_eq!(from_vars(&[("TLS_ENABLE", "false")]), None);
        assert_eq!(from_vars(&[("TLS_CERT", "/etc/quill/cert.pem")]), None);
    }

    #[test]
    fn test_enabled_with_default_paths() {
        let tls = from_vars(&[("TLS_ENABLE", "true")]).unwrap();

        assert_eq!(tls.cert, PathBuf::from(TlsConfig::DEFAULT_CERT));
        assert_eq!(tls.key, PathBuf::from(TlsConfig::DEFAULT_KEY));
        assert_eq!(tls.ca_cert, None);
    }

    #[test]
    fn test_enabled_with_client_ca() {
        let tls = from_vars(&[
            ("TLS_ENABLE", "TRUE"),
            ("TLS_CERT", "/etc/quill/cert.pem"),
            ("TLS_KEY", "/etc/quill/key.pem"),
            ("TLS_CA_CERT", "/etc/quill/ca.pem"),
        ])
        .unwrap();

        assert_eq!(tls.cert, PathBuf::from("/etc/quill/cert.pem"));
        assert_eq!(tls.key, PathBuf::from("/etc/quill/key.pem"));
        assert_eq!(tls.ca_cert, Some(PathBuf::from("/etc/quill/ca.pem")));
    }

    #[test]
    fn test_missing_certificate_file() {
        let dir = std::env::temp_dir().join(Uuid::new_v4().to_string());
        let tls = TlsConfig {
            cert: dir.join("cert.pem"),
            key: dir.join("key.pem"),
            ca_cert: None,
        };

        let err = tls.load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_file_without_certificates() {
        let path = std::env::temp_dir().join(format!("{}.pem", Uuid::new_v4()));
        fs::write(&path, "not a certificate\n").unwrap();

        let tls = TlsConfig {
            cert: path.clone(),
            key: path.clone(),
            ca_cert: None,
        };
        let err = tls.load().unwrap_err();
        fs::remove_file(&path).unwrap();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
