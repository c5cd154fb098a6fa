//! Call parameter model and HTTP request assembly for GateCall.
//!
//! A [`ParameterSet`] is the immutable description of one gateway call. It is
//! produced by a separate mutable [`ParameterSetBuilder`], validated with an
//! explicit [`ParameterSet::validate`] call before any network activity, and
//! finally turned into an [`http::Request`] by [`build_request`] once the
//! authentication headers have been signed.
//!
//! ```rust
//! use gatecall_http::{ContentBody, ParameterSet};
//!
//! let params = ParameterSet::builder()
//!     .api("echo")
//!     .version("1.0.0")
//!     .request_url("http://gateway.local:8086/test")
//!     .method("post")
//!     .unwrap()
//!     .body(ContentBody::json(r#"{"msg":"hi"}"#))
//!     .put_param("q", "1")
//!     .build();
//!
//! params.validate().unwrap();
//! ```

pub mod body;
pub mod error;
pub mod method;
pub mod params;
pub mod request;

pub use body::ContentBody;
pub use error::ConfigurationError;
pub use method::Method;
pub use params::{ParameterSet, ParameterSetBuilder};
pub use request::build_request;
