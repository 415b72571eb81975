use std::{path::PathBuf, str::FromStr};
use tiberius::EncryptionLevel;

/// TLS configuration for the TDS connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub mode: TlsMode,
    pub ca: Option<PathBuf>,
}

/// TLS/SSL mode for the TDS connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Only the login packet is encrypted
    #[default]
    Disable,
    /// TLS required, but no certificate verification
    Require,
    /// Verify server certificate against CA
    VerifyCA,
    /// Verify certificate and hostname
    VerifyFull,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "require" => Ok(Self::Require),
            "verify-ca" => Ok(Self::VerifyCA),
            "verify-full" => Ok(Self::VerifyFull),
            _ => Err(format!("Invalid TLS mode: {s}")),
        }
    }
}

impl TlsMode {
    /// Check if the whole session is encrypted
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disable)
    }

    /// Check if the server certificate has to be verified
    #[must_use]
    pub const fn verifies_certificate(&self) -> bool {
        matches!(self, Self::VerifyCA | Self::VerifyFull)
    }

    /// Encryption level requested during prelogin
    #[must_use]
    pub const fn encryption_level(&self) -> EncryptionLevel {
        if self.is_enabled() {
            EncryptionLevel::Required
        } else {
            EncryptionLevel::Off
        }
    }

    /// Value used in the textual connection string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Require => "require",
            Self::VerifyCA => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }
}

impl TlsConfig {
    /// Apply encryption and certificate trust settings to a client config
    pub fn apply(&self, config: &mut tiberius::Config) {
        config.encryption(self.mode.encryption_level());

        if self.mode.verifies_certificate() {
            // tiberius checks the hostname whenever it verifies the chain
            if let Some(ca) = &self.ca {
                config.trust_cert_ca(ca.to_string_lossy());
            }
        } else {
            config.trust_cert();
        }
    }
}
