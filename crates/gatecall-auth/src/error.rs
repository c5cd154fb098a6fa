//! Error types for call signing.
//!
//! All signing and verification failures are represented by [`SigningError`].
//! None of them is retryable: they describe missing or mismatched input.

/// Errors that can occur while signing a call or verifying a signed header set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    /// The access key is empty.
    #[error("cannot sign call: missing access key")]
    MissingAccessKey,

    /// The secret key is empty.
    #[error("cannot sign call: missing secret key")]
    MissingSecretKey,

    /// The per-call fingerprint is empty.
    #[error("cannot sign call: missing fingerprint")]
    MissingFingerprint,

    /// A header required for verification is absent from the header set.
    #[error("missing signed header: {0}")]
    MissingHeader(String),

    /// The recomputed signature does not match the provided one.
    #[error("signature does not match")]
    SignatureDoesNotMatch,
}
