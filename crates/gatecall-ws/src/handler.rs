//! Protocol handler carrying the signed headers into the message envelope.

use gatecall_auth::SignedHeaderSet;

use crate::handle::{Envelope, ProtocolHandler};

/// Writes a call's signed headers into the envelope header block.
///
/// Used in legacy envelope mode, for intermediaries that read protocol-level
/// headers instead of HTTP headers.
#[derive(Debug, Clone)]
pub struct SecurityHeaderHandler {
    signed: SignedHeaderSet,
}

impl SecurityHeaderHandler {
    /// Handler name as reported by [`ProtocolHandler::name`].
    pub const NAME: &str = "gatecall-security-header";

    /// Create a handler for one call's signed headers.
    #[must_use]
    pub fn new(signed: SignedHeaderSet) -> Self {
        Self { signed }
    }

    /// The headers this handler writes.
    #[must_use]
    pub fn signed_headers(&self) -> &SignedHeaderSet {
        &self.signed
    }
}

impl ProtocolHandler for SecurityHeaderHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn handle_outbound(&self, envelope: &mut Envelope) {
        for (name, values) in self.signed.iter() {
            for value in values {
                envelope.headers.push((name.to_owned(), value.clone()));
            }
        }
    }
}
