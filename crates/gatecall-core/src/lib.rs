//! Configuration and shared value types for GateCall.
//!
//! This crate provides the building blocks shared by the parameter model, the
//! signer and the call interceptor: the process-wide [`SdkConfig`] flags, the
//! caller [`Credentials`], the [`ApiIdentity`] being invoked and the per-call
//! [`Fingerprint`].

mod config;
mod types;

pub use config::SdkConfig;
pub use types::{ApiIdentity, Credentials, Fingerprint};
