//! String-to-sign construction.
//!
//! The string to sign is the `name=value` pairs of every signed field, sorted
//! by name (then value) and joined with `&`:
//!
//! ```text
//! _api_access_key=AK1&_api_mock=false&_api_name=orderQuery&_api_timestamp=f-001&_api_version=1.0
//! ```
//!
//! Values are used as-is, without percent-encoding, so both sides of the
//! exchange derive the same bytes from the same header values.

/// Build the string to sign from `(name, value)` pairs.
///
/// # Examples
///
/// ```
/// use gatecall_auth::canonical::build_string_to_sign;
///
/// assert_eq!(build_string_to_sign(&[]), "");
/// assert_eq!(
///     build_string_to_sign(&[("b", "2"), ("a", "1")]),
///     "a=1&b=2"
/// );
/// ```
#[must_use]
pub fn build_string_to_sign(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<(&str, &str)> = fields.to_vec();
    sorted.sort_unstable();

    sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
