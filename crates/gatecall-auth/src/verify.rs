//! Verification of a received signed header set.
//!
//! Recomputes the [`HmacSigner`](crate::HmacSigner) signature from the signed
//! fields present in the set and compares it with the provided signature in
//! constant time. This is the check the gateway performs on its side.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::build_string_to_sign;
use crate::error::SigningError;
use crate::headers;
use crate::signed::SignedHeaderSet;
use crate::signer::compute_signature;

/// Verify the signature carried by `received` against `secret_key`.
///
/// # Errors
///
/// Returns [`SigningError::MissingHeader`] when the signature, access key or
/// timestamp header is absent, and [`SigningError::SignatureDoesNotMatch`]
/// when the recomputed signature differs.
pub fn verify_signed_headers(
    secret_key: &str,
    received: &SignedHeaderSet,
) -> Result<(), SigningError> {
    let provided = required(received, headers::SIGNATURE)?;
    required(received, headers::ACCESS_KEY)?;
    required(received, headers::TIMESTAMP)?;

    let pairs: Vec<(&str, &str)> = received
        .iter()
        .filter(|(name, _)| headers::SIGNED_FIELDS.contains(name))
        .filter_map(|(name, values)| values.first().map(|v| (name, v.as_str())))
        .collect();

    let expected = compute_signature(secret_key, &build_string_to_sign(&pairs));

    if provided.as_bytes().ct_eq(expected.as_bytes()).into() {
        debug!(
            access_key = ?received.get(headers::ACCESS_KEY),
            "Signature verification succeeded"
        );
        Ok(())
    } else {
        debug!(
            access_key = ?received.get(headers::ACCESS_KEY),
            "Signature mismatch"
        );
        Err(SigningError::SignatureDoesNotMatch)
    }
}

fn required<'a>(set: &'a SignedHeaderSet, name: &str) -> Result<&'a str, SigningError> {
    set.get(name)
        .ok_or_else(|| SigningError::MissingHeader(name.to_owned()))
}
