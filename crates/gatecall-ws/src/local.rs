//! In-process loopback transport handle.
//!
//! [`LocalHandle`] exposes both capabilities the interceptor looks for and,
//! instead of sending anything, [`dispatches`](LocalHandle::dispatch) a call
//! by running its handler chain over an [`Envelope`] and reporting what would
//! have gone on the wire. Useful for tests and for wiring checks.

use bytes::Bytes;
use gatecall_auth::HeaderMultiMap;
use parking_lot::RwLock;
use tracing::trace;

use crate::error::BindingError;
use crate::handle::{Binding, Envelope, HandlerChain, RequestContext, TransportHandle};

/// What a [`LocalHandle`] would have sent for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// HTTP request headers at dispatch time.
    pub request_headers: HeaderMultiMap,
    /// The envelope after every outbound handler ran.
    pub envelope: Envelope,
}

/// Loopback transport handle with a request header map and a handler chain.
///
/// Both are guarded by their own lock, so the handle can be shared across
/// threads. [`Binding::handler_chain`] returns a copy, like real bindings.
#[derive(Debug, Default)]
pub struct LocalHandle {
    headers: RwLock<HeaderMultiMap>,
    chain: RwLock<HandlerChain>,
}

impl LocalHandle {
    /// Create a handle with no headers and an empty handler chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the handler chain over `body` and capture the outbound state.
    #[must_use]
    pub fn dispatch(&self, body: impl Into<Bytes>) -> Dispatched {
        let chain = self.chain.read().clone();
        let mut envelope = Envelope::new(body);
        for handler in &chain {
            handler.handle_outbound(&mut envelope);
        }
        trace!(handlers = chain.len(), "Dispatched local call");

        Dispatched {
            request_headers: self.headers.read().clone(),
            envelope,
        }
    }
}

impl RequestContext for LocalHandle {
    fn request_headers(&self) -> HeaderMultiMap {
        self.headers.read().clone()
    }

    fn set_request_headers(&self, headers: HeaderMultiMap) {
        *self.headers.write() = headers;
    }
}

impl Binding for LocalHandle {
    fn handler_chain(&self) -> HandlerChain {
        self.chain.read().clone()
    }

    fn set_handler_chain(&self, chain: HandlerChain) -> Result<(), BindingError> {
        *self.chain.write() = chain;
        Ok(())
    }
}

impl TransportHandle for LocalHandle {
    fn request_context(&self) -> Option<&dyn RequestContext> {
        Some(self)
    }

    fn binding(&self) -> Option<&dyn Binding> {
        Some(self)
    }
}
