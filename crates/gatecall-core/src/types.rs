//! Value types shared across GateCall crates.

use std::fmt;

/// Placeholder rendered instead of secret material.
const REDACTED: &str = "*********";

/// Access key / secret key pair identifying the caller to the gateway.
///
/// The secret key is never part of the `Debug` or `Display` rendering.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The public access key.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret key. Callers must not log it.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &REDACTED)
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{REDACTED}", self.access_key)
    }
}

/// Name and version of the gateway api being invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ApiIdentity {
    name: Option<String>,
    version: Option<String>,
}

impl ApiIdentity {
    /// Create an identity with both name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
        }
    }

    /// Create an identity from optional parts.
    #[must_use]
    pub fn from_parts(name: Option<String>, version: Option<String>) -> Self {
        Self { name, version }
    }

    /// The api name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The api version, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Per-call uniqueness token mixed into the signature.
///
/// A fresh fingerprint must be supplied for every call; the signer never
/// generates one itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an existing token.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// A fingerprint holding the current UTC time in epoch milliseconds.
    #[must_use]
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis().to_string())
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_redact_secret_key_in_debug() {
        let creds = Credentials::new("AK1", "SK-very-secret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("AK1"));
        assert!(!rendered.contains("SK-very-secret"));
    }

    #[test]
    fn test_should_redact_secret_key_in_display() {
        let creds = Credentials::new("AK1", "SK-very-secret");
        assert_eq!(creds.to_string(), "AK1:*********");
    }

    #[test]
    fn test_should_expose_api_identity_parts() {
        let api = ApiIdentity::new("orderQuery", "1.0");
        assert_eq!(api.name(), Some("orderQuery"));
        assert_eq!(api.version(), Some("1.0"));

        let unnamed = ApiIdentity::from_parts(None, Some("2.0".to_owned()));
        assert_eq!(unnamed.name(), None);
    }

    #[test]
    fn test_should_create_numeric_fingerprint_from_clock() {
        let fp = Fingerprint::now();
        assert!(!fp.as_str().is_empty());
        assert!(fp.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_should_convert_fingerprint_from_str() {
        let fp: Fingerprint = "f-001".into();
        assert_eq!(fp.to_string(), "f-001");
    }
}
