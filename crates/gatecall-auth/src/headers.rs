//! Names of the authentication headers exchanged with the gateway.
//!
//! These names are a compatibility contract with the receiving gateway and
//! must be kept byte-for-byte.

/// Caller access key.
pub const ACCESS_KEY: &str = "_api_access_key";

/// Base64 signature over the other signed headers.
pub const SIGNATURE: &str = "_api_signature";

/// Per-call fingerprint.
pub const TIMESTAMP: &str = "_api_timestamp";

/// Name of the invoked api. Omitted when api-name signing is skipped.
pub const API_NAME: &str = "_api_name";

/// Version of the invoked api.
pub const API_VERSION: &str = "_api_version";

/// `"true"` when the gateway should treat the call as a simulation.
pub const MOCK: &str = "_api_mock";

/// Every header that contributes to the signature, i.e. all but [`SIGNATURE`].
pub const SIGNED_FIELDS: &[&str] = &[ACCESS_KEY, API_NAME, API_VERSION, MOCK, TIMESTAMP];
