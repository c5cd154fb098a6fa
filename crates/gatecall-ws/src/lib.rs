//! Signing call interceptor for shared transport handles.
//!
//! A transport handle (an HTTP client or a SOAP binding proxy) is a
//! long-lived object reused across many calls, possibly from several threads.
//! [`CallInterceptor`] temporarily alters such a handle for the duration of a
//! single call:
//!
//! 1. [`CallInterceptor::before`] signs the call and merges the signed headers
//!    into the handle's per-request header map. In legacy envelope mode it
//!    also snapshots the handle's protocol handler chain, appends a
//!    [`SecurityHeaderHandler`] and installs the extended chain.
//! 2. The caller performs the transport exchange.
//! 3. [`CallInterceptor::after`] reinstalls the snapshot taken in `before`.
//!
//! [`CallInterceptor::invoke`] wraps all three steps and restores the handle
//! on every exit path.
//!
//! ```rust
//! use gatecall_core::{ApiIdentity, Credentials, Fingerprint, SdkConfig};
//! use gatecall_ws::{CallInterceptor, LocalHandle};
//!
//! let interceptor = CallInterceptor::new(
//!     SdkConfig::default(),
//!     Credentials::new("AK1", "SK1"),
//!     ApiIdentity::new("orderQuery", "1.0"),
//! );
//! let handle = LocalHandle::new();
//!
//! let dispatched = interceptor
//!     .invoke(&handle, &Fingerprint::now(), |_| {
//!         Ok::<_, String>(handle.dispatch(&b"<q/>"[..]))
//!     })
//!     .unwrap();
//! assert!(dispatched.request_headers.contains_key("_api_signature"));
//! ```
//!
//! # Modules
//!
//! - [`error`] - Interceptor and call error types
//! - [`handle`] - The transport handle capability traits
//! - [`handler`] - The security header protocol handler
//! - [`interceptor`] - The call interceptor and its armed-call guard
//! - [`local`] - An in-process loopback transport handle

pub mod error;
pub mod handle;
pub mod handler;
pub mod interceptor;
pub mod local;
mod locks;

pub use error::{BindingError, CallError, InterceptError};
pub use handle::{
    Binding, Envelope, HandlerChain, ProtocolHandler, RequestContext, TransportHandle,
};
pub use handler::SecurityHeaderHandler;
pub use interceptor::{ArmedCall, CallInterceptor};
pub use local::{Dispatched, LocalHandle};
