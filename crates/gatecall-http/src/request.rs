//! Assembly of an [`http::Request`] from a parameter set and its signed headers.
//!
//! The request is built as follows:
//!
//! 1. The parameter set is validated.
//! 2. When a REST protocol version is set, `/{api}/{version}` is appended to
//!    the URL path, each segment percent-encoded.
//! 3. Query parameters are form-urlencoded in name order and appended to the
//!    URL.
//! 4. Header parameters are added, then the signed headers. A signed header
//!    replaces a header parameter of the same name.
//! 5. The body, if any, is attached with its content type.

use bytes::Bytes;
use gatecall_auth::SignedHeaderSet;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::error::ConfigurationError;
use crate::params::ParameterSet;

/// Characters left unencoded in REST path segments (RFC 3986 unreserved).
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the HTTP request for a validated call.
///
/// # Errors
///
/// Returns [`ConfigurationError`] if the parameter set is invalid, or
/// [`ConfigurationError::InvalidRequest`] if the URL or a header cannot be
/// represented in an HTTP request.
pub fn build_request(
    params: &ParameterSet,
    signed: &SignedHeaderSet,
) -> Result<http::Request<Bytes>, ConfigurationError> {
    params.validate()?;

    let url = build_url(params);
    let method = params.method().to_http();

    debug!(%url, %method, api = ?params.api(), "Building gateway request");

    let mut request = http::Request::builder()
        .method(method)
        .uri(&url)
        .body(params.body().map(|b| b.data().clone()).unwrap_or_default())
        .map_err(|e| ConfigurationError::InvalidRequest(e.to_string()))?;

    let headers = request.headers_mut();
    for (name, value) in params.headers() {
        headers.insert(header_name(name)?, header_value(value)?);
    }
    for (name, values) in signed.iter() {
        let name = header_name(name)?;
        headers.remove(&name);
        for value in values {
            headers.append(name.clone(), header_value(value)?);
        }
    }
    if let Some(body) = params.body() {
        headers.insert(CONTENT_TYPE, header_value(body.content_type())?);
    }

    Ok(request)
}

/// Compute the full request URL, including REST path segments and query.
fn build_url(params: &ParameterSet) -> String {
    let mut url = params.request_url().unwrap_or_default().to_owned();

    if params.restful_protocol_version().is_some() {
        let (path, existing_query) = match url.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (url.clone(), None),
        };
        let mut rest = path.trim_end_matches('/').to_owned();
        for segment in [params.api(), params.version()].into_iter().flatten() {
            rest.push('/');
            rest.push_str(&utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string());
        }
        url = match existing_query {
            Some(query) => format!("{rest}?{query}"),
            None => rest,
        };
    }

    if !params.params().is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.params())
            .finish();
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query);
    }

    url
}

fn header_name(name: &str) -> Result<HeaderName, ConfigurationError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ConfigurationError::InvalidRequest(format!("invalid header name '{name}'")))
}

fn header_value(value: &str) -> Result<HeaderValue, ConfigurationError> {
    HeaderValue::from_str(value)
        .map_err(|_| ConfigurationError::InvalidRequest("invalid header value".to_owned()))
}
