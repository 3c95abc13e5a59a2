//! Loading certificate and private key material from PEM files.
//!
//! Only loading and classification happen here: the DER payloads are handed to
//! the secure channel untouched. A certificate and the private key of the same
//! category are loaded independently and never checked against each other, so
//! a mismatched pair is reported by the handshake, not at startup.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use thiserror::Error;

/// A credential file that could not be opened or did not hold the expected
/// PEM content.
#[derive(Debug, Error)]
#[error("unable to open or parse file: {}", .path.display())]
pub struct CredentialError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl CredentialError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whether a certificate identifies this node or anchors peer validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateRole {
    EndEntity,
    TrustAnchor,
}

/// A certificate (with any chain that followed it in the file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    path: PathBuf,
    role: CertificateRole,
    chain: Vec<CertificateDer<'static>>,
}

impl Certificate {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn role(&self) -> CertificateRole {
        self.role
    }

    /// The first certificate of the file.
    pub fn leaf(&self) -> &CertificateDer<'static> {
        &self.chain[0]
    }

    pub fn chain(&self) -> &[CertificateDer<'static>] {
        &self.chain
    }
}

/// A private key in PKCS#1, PKCS#8 or SEC1 form.
#[derive(Debug)]
pub struct PrivateKey {
    path: PathBuf,
    key: PrivateKeyDer<'static>,
}

impl PrivateKey {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &PrivateKeyDer<'static> {
        &self.key
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            key: self.key.clone_key(),
        }
    }
}

/// Loads an end-entity certificate.
pub fn load_certificate(path: &Path) -> Result<Certificate, CredentialError> {
    read_certificate(path, CertificateRole::EndEntity)
}

/// Loads a certificate flagged as a trust anchor.
pub fn load_trusted_certificate(path: &Path) -> Result<Certificate, CredentialError> {
    read_certificate(path, CertificateRole::TrustAnchor)
}

/// Loads the first private key found in the file.
pub fn load_private_key(path: &Path) -> Result<PrivateKey, CredentialError> {
    let mut reader = open(path)?;
    let key = rustls_pemfile::private_key(&mut reader)
        .map_err(|err| CredentialError::new(path, err))?
        .ok_or_else(|| CredentialError::new(path, invalid_data("no private key found")))?;

    Ok(PrivateKey {
        path: path.to_path_buf(),
        key,
    })
}

fn read_certificate(path: &Path, role: CertificateRole) -> Result<Certificate, CredentialError> {
    let mut reader = open(path)?;
    let chain = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CredentialError::new(path, err))?;
    if chain.is_empty() {
        return Err(CredentialError::new(
            path,
            invalid_data("no certificate found"),
        ));
    }

    Ok(Certificate {
        path: path.to_path_buf(),
        role,
        chain,
    })
}

fn open(path: &Path) -> Result<BufReader<File>, CredentialError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| CredentialError::new(path, err))
}

fn invalid_data(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.to_string())
}
