//! Error types for call parameters.
//!
//! Every [`ConfigurationError`] is detected before any network activity and
//! is never retried.

use crate::method::Method;

/// An invalid or missing call parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No request URL was set.
    #[error("bad parameters: missing request url")]
    MissingRequestUrl,

    /// No api name was set.
    #[error("bad parameters: missing api name")]
    MissingApi,

    /// A body was set on a method that cannot carry one.
    #[error("bad parameters: method must be POST or CPOST when a body is set, got {0}")]
    BodyRequiresPost(Method),

    /// The method is not one of GET, POST, CGET or CPOST.
    #[error("unsupported method '{0}': only GET, POST, CGET and CPOST are allowed")]
    UnsupportedMethod(String),

    /// The parameters could not be assembled into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
