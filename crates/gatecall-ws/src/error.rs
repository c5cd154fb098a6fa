//! Error types for the call interceptor.

use gatecall_auth::SigningError;

/// A transport handle refused a handler chain update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct BindingError(pub String);

impl BindingError {
    /// Create a binding error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors raised by [`CallInterceptor`](crate::CallInterceptor) itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterceptError {
    /// The handle lacks a required capability or is not the handle the call
    /// was armed on.
    #[error("invalid transport handle: {0}")]
    InvalidHandle(String),

    /// The call could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The extended handler chain could not be installed in `before`.
    #[error("failed to install handler chain: {0}")]
    Install(#[source] BindingError),

    /// The handler chain snapshot could not be reinstalled in `after`.
    #[error("failed to restore handler chain: {0}")]
    Restore(#[source] BindingError),
}

/// Outcome of a failed [`CallInterceptor::invoke`](crate::CallInterceptor::invoke).
///
/// A restoration failure is reported on its own, with the transport error
/// (if the call itself also failed) attached, rather than hidden behind it.
#[derive(Debug, thiserror::Error)]
pub enum CallError<E> {
    /// `before` failed; the transport was not called.
    #[error("call interception failed: {0}")]
    Intercept(InterceptError),

    /// The transport call failed; the handle was restored.
    #[error("transport call failed: {0}")]
    Transport(E),

    /// The handle could not be restored after the call.
    #[error("failed to restore transport handle after call: {source}")]
    Restore {
        /// The restoration failure.
        source: InterceptError,
        /// The transport error, when the call had failed as well.
        transport_error: Option<E>,
    },
}
