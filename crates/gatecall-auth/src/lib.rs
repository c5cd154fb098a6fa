//! Request signing for gateway calls.
//!
//! A [`Signer`] turns the caller credentials, the api identity, a per-call
//! fingerprint and the mock flag into a [`SignedHeaderSet`]: the fixed set of
//! authentication headers the gateway expects on every call.
//!
//! # Usage
//!
//! ```rust
//! use gatecall_auth::{HmacSigner, Signer, SigningInput, headers};
//! use gatecall_core::{ApiIdentity, Credentials, Fingerprint};
//!
//! let creds = Credentials::new("AK1", "SK1");
//! let api = ApiIdentity::new("orderQuery", "1.0");
//! let fp = Fingerprint::new("f-001");
//!
//! let signed = HmacSigner.sign(&SigningInput::new(&creds, &api, &fp, false)).unwrap();
//! assert_eq!(signed.get(headers::ACCESS_KEY), Some("AK1"));
//! assert_eq!(signed.get(headers::MOCK), Some("false"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - String-to-sign construction
//! - [`error`] - Signing error types
//! - [`headers`] - Signed header names shared with the gateway
//! - [`signed`] - The signed header set
//! - [`signer`] - The [`Signer`] capability and the HMAC-SHA1 implementation
//! - [`verify`] - Signature verification of a received header set

pub mod canonical;
pub mod error;
pub mod headers;
pub mod signed;
pub mod signer;
pub mod verify;

pub use error::SigningError;
pub use signed::{HeaderMultiMap, SignedHeaderSet};
pub use signer::{HmacSigner, Signer, SigningInput};
pub use verify::verify_signed_headers;
