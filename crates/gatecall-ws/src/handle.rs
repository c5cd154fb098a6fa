//! Capability traits a transport handle exposes to the interceptor.
//!
//! A handle is an externally owned, long-lived object. The interceptor only
//! borrows it and discovers its capabilities at runtime: a handle without a
//! [`RequestContext`] cannot be intercepted at all, and a handle without a
//! [`Binding`] cannot be used in legacy envelope mode.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use gatecall_auth::HeaderMultiMap;

use crate::error::BindingError;

/// Ordered protocol handlers attached to a handle's binding.
pub type HandlerChain = Vec<Arc<dyn ProtocolHandler>>;

/// Protocol-level message seen by the handler chain on its way out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    /// Envelope header entries, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Serialized message body.
    pub body: Bytes,
}

impl Envelope {
    /// Create an envelope with no headers around the given body.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// First value of the named envelope header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A handler in the protocol-level chain of a binding.
pub trait ProtocolHandler: Send + Sync + fmt::Debug {
    /// Short identifying name.
    fn name(&self) -> &str;

    /// Process an outbound message.
    fn handle_outbound(&self, envelope: &mut Envelope);
}

/// Per-request context of a handle: the HTTP headers sent with the next call.
pub trait RequestContext: Send + Sync {
    /// Current request headers.
    fn request_headers(&self) -> HeaderMultiMap;

    /// Replace the request headers.
    fn set_request_headers(&self, headers: HeaderMultiMap);
}

/// Protocol binding of a handle, owning the shared handler chain.
///
/// [`Binding::handler_chain`] may return a fresh copy on every read. Changing
/// that copy has no effect; a chain only takes effect once passed to
/// [`Binding::set_handler_chain`].
pub trait Binding: Send + Sync {
    /// Current handler chain.
    fn handler_chain(&self) -> HandlerChain;

    /// Install a handler chain.
    fn set_handler_chain(&self, chain: HandlerChain) -> Result<(), BindingError>;
}

/// A transport handle the interceptor can wrap.
pub trait TransportHandle: Send + Sync {
    /// The per-request context, or `None` if the handle exposes no mutable
    /// request headers.
    fn request_context(&self) -> Option<&dyn RequestContext>;

    /// The protocol binding, or `None` if the handle has no handler chain.
    fn binding(&self) -> Option<&dyn Binding> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_find_first_envelope_header() {
        let mut envelope = Envelope::new(&b"<soap/>"[..]);
        envelope.headers.push(("a".to_owned(), "1".to_owned()));
        envelope.headers.push(("a".to_owned(), "2".to_owned()));
        assert_eq!(envelope.header("a"), Some("1"));
        assert_eq!(envelope.header("b"), None);
    }
}
