//! Client-wide configuration flags.
//!
//! All flags are read once (typically at startup via [`SdkConfig::from_env`])
//! and then passed by value into the components that need them, so tests can
//! vary them per instance.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Client-wide signing and injection flags.
///
/// # Examples
///
/// ```
/// use gatecall_core::SdkConfig;
///
/// let config = SdkConfig::default();
/// assert!(!config.headers_in_envelope);
/// assert!(!config.skip_api_name_signing);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    /// Also inject the signed headers into the protocol-level handler chain of
    /// the transport handle (legacy envelope mode).
    #[builder(default = false)]
    pub headers_in_envelope: bool,

    /// Leave the api name out of the signed header set.
    #[builder(default = false)]
    pub skip_api_name_signing: bool,

    /// Emit a diagnostic dump of the signed headers at `debug` level.
    /// The signature value is always masked.
    #[builder(default = false)]
    pub dump_headers: bool,
}

impl SdkConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATECALL_HEADERS_IN_ENVELOPE` | `false` |
    /// | `GATECALL_SKIP_SIGN_API_NAME` | `false` |
    /// | `GATECALL_DUMP_HEADERS` | `false` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Unset variables keep their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATECALL_HEADERS_IN_ENVELOPE") {
            config.headers_in_envelope = parse_bool(&v);
        }
        if let Some(v) = lookup("GATECALL_SKIP_SIGN_API_NAME") {
            config.skip_api_name_signing = parse_bool(&v);
        }
        if let Some(v) = lookup("GATECALL_DUMP_HEADERS") {
            config.dump_headers = parse_bool(&v);
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
