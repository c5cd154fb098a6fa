//! End-to-end tests for the gatecall client stack.
//!
//! These tests exercise the crates together the way a client does: build
//! the call parameters, sign them, attach the result to a transport, and
//! check the output with the gateway-side verifier. No server is needed;
//! the transport is the in-process [`LocalHandle`](gatecall_ws::LocalHandle).
//!
//! Run them with:
//! ```text
//! cargo test -p gatecall-integration
//! ```

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};

use gatecall_auth::{HeaderMultiMap, SignedHeaderSet};
use gatecall_core::{ApiIdentity, Credentials, Fingerprint};
use parking_lot::Mutex;

static INIT: Once = Once::new();

/// Access key used by every test.
pub const ACCESS_KEY: &str = "AK1";

/// Secret key used by every test.
pub const SECRET_KEY: &str = "SK1";

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// In-memory log sink shared with a `tracing_subscriber` writer.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with `debug` logs emitted on this thread captured, returning its
/// value and the formatted log output.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs.contents())
}

/// Test credentials.
#[must_use]
pub fn credentials() -> Credentials {
    Credentials::new(ACCESS_KEY, SECRET_KEY)
}

/// The api every test invokes.
#[must_use]
pub fn order_query() -> ApiIdentity {
    ApiIdentity::new("orderQuery", "1.0")
}

/// A fingerprint unique within this test process.
#[must_use]
pub fn unique_fingerprint(prefix: &str) -> Fingerprint {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    Fingerprint::new(format!("{prefix}-{n:06}"))
}

/// Collect the gateway headers out of a request header multimap.
#[must_use]
pub fn collect_signed(headers: &HeaderMultiMap) -> SignedHeaderSet {
    SignedHeaderSet::from_headers(
        headers
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.as_str(), v.as_str()))),
    )
}

mod test_http_call;
mod test_shared_handle;
