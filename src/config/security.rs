use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::fields::Fields;
use super::schema::{
    OptionDescriptor, AUTHORITY_CERTIFICATE_FILE, CERTIFICATE_VALIDATION_METHOD,
    CERTIFICATE_VALIDATION_SCRIPT, ENCRYPTION_CERTIFICATE_FILE, ENCRYPTION_PRIVATE_KEY_FILE,
    SIGNATURE_CERTIFICATE_FILE, SIGNATURE_PRIVATE_KEY_FILE,
};
use crate::parsers::{
    load_certificate, load_private_key, load_trusted_certificate, Certificate,
    CertificateValidationMethod, CredentialError, PrivateKey,
};

/// A certificate together with its private key.
#[derive(Debug, Clone)]
pub struct CredentialMaterial {
    pub certificate: Certificate,
    pub private_key: PrivateKey,
}

/// External program the secure channel runs for each peer certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateValidationScript {
    path: PathBuf,
}

impl CertificateValidationScript {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Identity and trust settings.
///
/// The encryption certificate and key are loaded independently of each other
/// and are not checked for consistency; see [`SecurityConfig::encryption`].
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub signature: CredentialMaterial,
    pub encryption_certificate: Option<Certificate>,
    pub encryption_private_key: Option<PrivateKey>,
    pub certificate_validation_method: CertificateValidationMethod,
    pub certificate_validation_script: Option<CertificateValidationScript>,
    /// Trust anchors, in the order given.
    pub authority_certificates: Vec<Certificate>,
}

impl SecurityConfig {
    /// The encryption credential, when both halves were supplied.
    pub fn encryption(&self) -> Option<(&Certificate, &PrivateKey)> {
        self.encryption_certificate
            .as_ref()
            .zip(self.encryption_private_key.as_ref())
    }

    pub(crate) fn build(fields: &Fields<'_>) -> Result<Self, ConfigError> {
        let signature_certificate_file = fields.required_path(&SIGNATURE_CERTIFICATE_FILE)?;
        let signature_private_key_file = fields.required_path(&SIGNATURE_PRIVATE_KEY_FILE)?;
        let signature = CredentialMaterial {
            certificate: load(
                &SIGNATURE_CERTIFICATE_FILE,
                &signature_certificate_file,
                load_certificate,
            )?,
            private_key: load(
                &SIGNATURE_PRIVATE_KEY_FILE,
                &signature_private_key_file,
                load_private_key,
            )?,
        };

        let encryption_certificate = fields
            .path(&ENCRYPTION_CERTIFICATE_FILE)?
            .map(|path| load(&ENCRYPTION_CERTIFICATE_FILE, &path, load_certificate))
            .transpose()?;
        let encryption_private_key = fields
            .path(&ENCRYPTION_PRIVATE_KEY_FILE)?
            .map(|path| load(&ENCRYPTION_PRIVATE_KEY_FILE, &path, load_private_key))
            .transpose()?;

        let certificate_validation_method = fields.parse(&CERTIFICATE_VALIDATION_METHOD)?;
        let certificate_validation_script = fields
            .path(&CERTIFICATE_VALIDATION_SCRIPT)?
            .map(|path| CertificateValidationScript { path });

        let authority_certificates = fields
            .list(&AUTHORITY_CERTIFICATE_FILE)?
            .into_iter()
            .map(|path| {
                load(
                    &AUTHORITY_CERTIFICATE_FILE,
                    Path::new(path),
                    load_trusted_certificate,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            signature,
            encryption_certificate,
            encryption_private_key,
            certificate_validation_method,
            certificate_validation_script,
            authority_certificates,
        })
    }
}

fn load<T>(
    descriptor: &'static OptionDescriptor,
    path: &Path,
    loader: fn(&Path) -> Result<T, CredentialError>,
) -> Result<T, ConfigError> {
    loader(path).map_err(|source| ConfigError::CredentialLoadError {
        key: descriptor.key,
        source,
    })
}
