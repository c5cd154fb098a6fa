//! The [`Signer`] capability and the default HMAC-SHA1 implementation.
//!
//! A signer is a pure function of its inputs: identical inputs always yield a
//! byte-identical [`SignedHeaderSet`]. [`HmacSigner`] computes
//!
//! ```text
//! Signature = Base64(HMAC-SHA1(SecretKey, StringToSign))
//! ```
//!
//! where `StringToSign` is built by
//! [`build_string_to_sign`](crate::canonical::build_string_to_sign) from every
//! emitted header except the signature itself.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use gatecall_core::{ApiIdentity, Credentials, Fingerprint, SdkConfig};
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use tracing::debug;

use crate::canonical::build_string_to_sign;
use crate::error::SigningError;
use crate::headers;
use crate::signed::SignedHeaderSet;

type HmacSha1 = Hmac<Sha1>;

/// Everything that enters the signature of one call.
#[derive(Clone, Copy)]
pub struct SigningInput<'a> {
    /// Caller access key.
    pub access_key: &'a str,
    /// Caller secret key. Never emitted or logged.
    pub secret_key: &'a str,
    /// Invoked api name; `None` leaves it out of the signature and headers.
    pub api_name: Option<&'a str>,
    /// Invoked api version.
    pub api_version: Option<&'a str>,
    /// Per-call uniqueness token.
    pub fingerprint: &'a str,
    /// Whether the gateway should treat the call as a simulation.
    pub mock: bool,
}

impl<'a> SigningInput<'a> {
    /// Assemble the input from the shared value types.
    #[must_use]
    pub fn new(
        credentials: &'a Credentials,
        api: &'a ApiIdentity,
        fingerprint: &'a Fingerprint,
        mock: bool,
    ) -> Self {
        Self {
            access_key: credentials.access_key(),
            secret_key: credentials.secret_key(),
            api_name: api.name(),
            api_version: api.version(),
            fingerprint: fingerprint.as_str(),
            mock,
        }
    }

    /// Drop the api name from the signed fields.
    #[must_use]
    pub fn without_api_name(self) -> Self {
        Self {
            api_name: None,
            ..self
        }
    }

    /// Apply the client-wide flags that change which fields are signed.
    #[must_use]
    pub fn with_config(self, config: &SdkConfig) -> Self {
        if config.skip_api_name_signing {
            self.without_api_name()
        } else {
            self
        }
    }

    /// The `(header, value)` pairs that are both emitted and signed.
    fn signed_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (headers::ACCESS_KEY, self.access_key.to_owned()),
            (headers::TIMESTAMP, self.fingerprint.to_owned()),
            (headers::MOCK, self.mock.to_string()),
        ];
        if let Some(name) = self.api_name {
            fields.push((headers::API_NAME, name.to_owned()));
        }
        if let Some(version) = self.api_version {
            fields.push((headers::API_VERSION, version.to_owned()));
        }
        fields
    }
}

impl fmt::Debug for SigningInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningInput")
            .field("access_key", &self.access_key)
            .field("secret_key", &"*********")
            .field("api_name", &self.api_name)
            .field("api_version", &self.api_version)
            .field("fingerprint", &self.fingerprint)
            .field("mock", &self.mock)
            .finish()
    }
}

/// Produces the authentication headers for one call.
///
/// Implementations must be pure and deterministic, must not generate the
/// fingerprint themselves, and must never log the secret key or signature.
pub trait Signer: Send + Sync + fmt::Debug {
    /// Compute the signed header set for the given input.
    ///
    /// # Errors
    ///
    /// Returns a [`SigningError`] when a required credential or the
    /// fingerprint is missing.
    fn sign(&self, input: &SigningInput<'_>) -> Result<SignedHeaderSet, SigningError>;
}

/// Base64(HMAC-SHA1) signer understood by the gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSigner;

impl Signer for HmacSigner {
    fn sign(&self, input: &SigningInput<'_>) -> Result<SignedHeaderSet, SigningError> {
        if input.access_key.is_empty() {
            return Err(SigningError::MissingAccessKey);
        }
        if input.secret_key.is_empty() {
            return Err(SigningError::MissingSecretKey);
        }
        if input.fingerprint.is_empty() {
            return Err(SigningError::MissingFingerprint);
        }

        let fields = input.signed_fields();
        let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let signature = compute_signature(input.secret_key, &build_string_to_sign(&pairs));

        let mut set = SignedHeaderSet::new();
        for (name, value) in fields {
            set.insert(name, value);
        }
        set.insert(headers::SIGNATURE, signature);

        debug!(
            access_key = %input.access_key,
            api_name = ?input.api_name,
            api_version = ?input.api_version,
            fingerprint = %input.fingerprint,
            mock = input.mock,
            "Signed gateway call"
        );

        Ok(set)
    }
}

/// Compute Base64(HMAC-SHA1(secret, string_to_sign)).
pub(crate) fn compute_signature(secret_key: &str, string_to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret_key.as_bytes()).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    let result = mac.finalize().into_bytes();
    BASE64.encode(result)
}
