//! The signing call interceptor.
//!
//! Per call the interceptor moves through two states:
//!
//! ```text
//! Idle --before(handle, fingerprint)--> Armed --after(handle, armed)--> Idle
//! ```
//!
//! The armed state is an [`ArmedCall`] value rather than interceptor state,
//! so one interceptor can serve any number of concurrent calls. `after`
//! consumes the [`ArmedCall`]; dropping it without `after` (for example while
//! unwinding from a panicking transport call) performs the same restoration
//! on a best-effort basis.
//!
//! # Legacy envelope mode
//!
//! With [`SdkConfig::headers_in_envelope`] set, `before` also mutates the
//! handle's shared handler chain. The chain is snapshotted by value, extended
//! with a [`SecurityHeaderHandler`] and installed; `after` reinstalls the
//! snapshot. The chain a handle returns may be a transient copy, so the
//! appended handler is never removed from a re-fetched chain.
//!
//! Mutation is serialized per handle: `before` takes a process-wide lock
//! keyed on the handle's identity and the [`ArmedCall`] holds it until
//! restoration. The lock is shared by all interceptors, so calls to different
//! apis over one handle are serialized too. A thread must therefore finish one
//! envelope-mode call on a handle before arming another on the same handle,
//! through any interceptor, or it deadlocks.

use std::fmt;
use std::sync::Arc;

use gatecall_auth::{HmacSigner, SignedHeaderSet, Signer, SigningInput};
use gatecall_core::{ApiIdentity, Credentials, Fingerprint, SdkConfig};
use tracing::{debug, trace, warn};

use crate::error::{CallError, InterceptError};
use crate::handle::{Binding, HandlerChain, RequestContext, TransportHandle};
use crate::handler::SecurityHeaderHandler;
use crate::locks::{HANDLE_LOCKS, HandleKey, HandleLease};

/// Injects signed authentication headers around calls on a transport handle.
#[derive(Debug)]
pub struct CallInterceptor {
    config: SdkConfig,
    signer: Arc<dyn Signer>,
    credentials: Credentials,
    api: ApiIdentity,
    mock: bool,
}

impl CallInterceptor {
    /// Create an interceptor signing with [`HmacSigner`].
    #[must_use]
    pub fn new(config: SdkConfig, credentials: Credentials, api: ApiIdentity) -> Self {
        Self {
            config,
            signer: Arc::new(HmacSigner),
            credentials,
            api,
            mock: false,
        }
    }

    /// Use a different signer.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = signer;
        self
    }

    /// Mark every call made through this interceptor as a mock call.
    #[must_use]
    pub fn with_mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    /// The flags this interceptor was built with.
    #[must_use]
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Sign the call and inject the authentication state into `handle`.
    ///
    /// Signed headers are merged into the handle's request headers, replacing
    /// same-named entries and keeping all others. In legacy envelope mode the
    /// handler chain is extended as described in the module documentation.
    ///
    /// # Errors
    ///
    /// - [`InterceptError::InvalidHandle`] if the handle has no request
    ///   context, or no binding while legacy envelope mode is enabled
    /// - [`InterceptError::Signing`] if the signer rejects the input
    /// - [`InterceptError::Install`] if the handle refuses the extended chain
    pub fn before<'h>(
        &self,
        handle: &'h dyn TransportHandle,
        fingerprint: &Fingerprint,
    ) -> Result<ArmedCall<'h>, InterceptError> {
        let context = request_context(handle)?;
        let binding = if self.config.headers_in_envelope {
            Some(binding(handle)?)
        } else {
            None
        };

        let input = SigningInput::new(&self.credentials, &self.api, fingerprint, self.mock)
            .with_config(&self.config);
        let signed = self.signer.sign(&input)?;

        if self.config.dump_headers {
            debug!(headers = ?signed, "Signed gateway headers");
        }

        // In envelope mode the lock covers header injection as well. The
        // chain goes first so a refused install leaves the headers untouched.
        let key = HandleKey::of(handle);
        let legacy = match binding {
            Some(binding) => Some(install_handler(binding, HANDLE_LOCKS.acquire(key), &signed)?),
            None => None,
        };

        let mut headers = context.request_headers();
        for (name, values) in signed.iter() {
            headers.insert(name.to_owned(), values.to_vec());
        }
        context.set_request_headers(headers);

        debug!(
            fingerprint = %fingerprint,
            envelope = legacy.is_some(),
            "Armed gateway call"
        );

        Ok(ArmedCall {
            handle,
            key,
            signed,
            legacy,
        })
    }

    /// Restore `handle` to the state it had before the matching `before`.
    ///
    /// The request headers injected by `before` are left in place; they are
    /// scoped to the call.
    ///
    /// # Errors
    ///
    /// - [`InterceptError::InvalidHandle`] if the handle has no request
    ///   context or is not the handle `armed` was created for; the armed call
    ///   is then restored on its own handle as it is dropped
    /// - [`InterceptError::Restore`] if the handle refuses the snapshot
    pub fn after(
        &self,
        handle: &dyn TransportHandle,
        mut armed: ArmedCall<'_>,
    ) -> Result<(), InterceptError> {
        request_context(handle)?;
        if HandleKey::of(handle) != armed.key {
            return Err(InterceptError::InvalidHandle(
                "handle does not match the armed call".to_owned(),
            ));
        }
        armed.restore()
    }

    /// Run `call` between [`before`](Self::before) and
    /// [`after`](Self::after), restoring the handle on every exit path.
    ///
    /// `call` receives the signed headers of this invocation. The interceptor
    /// neither retries nor masks the transport error.
    ///
    /// # Errors
    ///
    /// - [`CallError::Intercept`] if `before` fails; `call` is not run
    /// - [`CallError::Transport`] if `call` fails and restoration succeeds
    /// - [`CallError::Restore`] if restoration fails, whatever the outcome
    ///   of `call`
    pub fn invoke<T, E, F>(
        &self,
        handle: &dyn TransportHandle,
        fingerprint: &Fingerprint,
        call: F,
    ) -> Result<T, CallError<E>>
    where
        F: FnOnce(&SignedHeaderSet) -> Result<T, E>,
    {
        let armed = self
            .before(handle, fingerprint)
            .map_err(CallError::Intercept)?;
        let outcome = call(armed.signed_headers());

        match self.after(handle, armed) {
            Ok(()) => outcome.map_err(CallError::Transport),
            Err(source) => Err(CallError::Restore {
                source,
                transport_error: outcome.err(),
            }),
        }
    }
}

fn install_handler(
    binding: &dyn Binding,
    lease: HandleLease<'static>,
    signed: &SignedHeaderSet,
) -> Result<LegacyState, InterceptError> {
    let snapshot = binding.handler_chain();
    let mut extended = snapshot.clone();
    extended.push(Arc::new(SecurityHeaderHandler::new(signed.clone())));

    // The chain only changes once it is set back on the binding.
    binding
        .set_handler_chain(extended)
        .map_err(InterceptError::Install)?;

    trace!(handlers = snapshot.len() + 1, "Installed security header handler");

    Ok(LegacyState {
        snapshot,
        _lease: lease,
    })
}

fn request_context(handle: &dyn TransportHandle) -> Result<&dyn RequestContext, InterceptError> {
    handle.request_context().ok_or_else(|| {
        InterceptError::InvalidHandle("handle does not expose request headers".to_owned())
    })
}

fn binding(handle: &dyn TransportHandle) -> Result<&dyn Binding, InterceptError> {
    handle.binding().ok_or_else(|| {
        InterceptError::InvalidHandle(
            "envelope mode requires a handle with a handler chain".to_owned(),
        )
    })
}

/// Handler chain snapshot plus the handle lock, held while a legacy call is armed.
struct LegacyState {
    snapshot: HandlerChain,
    _lease: HandleLease<'static>,
}

/// Authentication state injected into a handle for one call.
///
/// Produced by [`CallInterceptor::before`] and consumed by
/// [`CallInterceptor::after`].
#[must_use = "an armed call must be passed to `CallInterceptor::after`"]
pub struct ArmedCall<'h> {
    handle: &'h dyn TransportHandle,
    key: HandleKey,
    signed: SignedHeaderSet,
    legacy: Option<LegacyState>,
}

impl ArmedCall<'_> {
    /// The signed headers injected for this call.
    #[must_use]
    pub fn signed_headers(&self) -> &SignedHeaderSet {
        &self.signed
    }

    /// Whether the handler chain was modified for this call.
    #[must_use]
    pub fn is_envelope_armed(&self) -> bool {
        self.legacy.is_some()
    }

    /// Reinstall the snapshot, then release the handle lock.
    fn restore(&mut self) -> Result<(), InterceptError> {
        let Some(LegacyState { snapshot, _lease }) = self.legacy.take() else {
            return Ok(());
        };
        let binding = binding(self.handle)?;
        let handlers = snapshot.len();
        binding
            .set_handler_chain(snapshot)
            .map_err(InterceptError::Restore)?;
        trace!(handlers, "Restored handler chain snapshot");
        Ok(())
    }
}

impl Drop for ArmedCall<'_> {
    fn drop(&mut self) {
        if self.legacy.is_some() {
            warn!("Armed call dropped without `after`; restoring handler chain");
            if let Err(e) = self.restore() {
                warn!(error = %e, "Failed to restore handler chain on drop");
            }
        }
    }
}

impl fmt::Debug for ArmedCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArmedCall")
            .field("handle", &self.key)
            .field("signed", &self.signed)
            .field("envelope_armed", &self.is_envelope_armed())
            .finish()
    }
}
