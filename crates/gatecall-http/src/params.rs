//! The parameter set of one gateway call and its builder.
//!
//! [`ParameterSetBuilder`] is a mutable accumulator; [`ParameterSetBuilder::build`]
//! copies its state into an immutable [`ParameterSet`], so later changes to the
//! builder never leak into a set that was already built. Validation is a
//! separate explicit step, [`ParameterSet::validate`].
//!
//! Both types redact the secret key from every human-readable rendering.

use std::collections::BTreeMap;
use std::fmt;

use gatecall_auth::SigningInput;
use gatecall_core::{ApiIdentity, Credentials, Fingerprint};

use crate::body::ContentBody;
use crate::error::ConfigurationError;
use crate::method::Method;

/// Placeholder rendered in place of the secret key.
const REDACTED: &str = "*********";

/// Immutable, self-contained description of one gateway call.
#[derive(Clone, PartialEq, Eq)]
pub struct ParameterSet {
    api: Option<String>,
    version: Option<String>,
    credentials: Credentials,
    restful_protocol_version: Option<String>,
    method: Method,
    request_url: Option<String>,
    body: Option<ContentBody>,
    params: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Start building a parameter set.
    #[must_use]
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    /// Check the call invariants.
    ///
    /// Violations are reported in this order: missing request URL, missing
    /// api, body on a method other than POST/CPOST. A body combined with
    /// query parameters is accepted; both are sent.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if is_blank(self.request_url.as_deref()) {
            return Err(ConfigurationError::MissingRequestUrl);
        }
        if is_blank(self.api.as_deref()) {
            return Err(ConfigurationError::MissingApi);
        }
        if self.body.is_some() && !self.method.allows_body() {
            return Err(ConfigurationError::BodyRequiresPost(self.method));
        }
        Ok(())
    }

    /// Api name.
    #[must_use]
    pub fn api(&self) -> Option<&str> {
        self.api.as_deref()
    }

    /// Api version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Api name and version as a single identity.
    #[must_use]
    pub fn api_identity(&self) -> ApiIdentity {
        ApiIdentity::from_parts(self.api.clone(), self.version.clone())
    }

    /// Caller credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// REST protocol version; when set, path-style addressing is used.
    #[must_use]
    pub fn restful_protocol_version(&self) -> Option<&str> {
        self.restful_protocol_version.as_deref()
    }

    /// Call method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Target URL.
    #[must_use]
    pub fn request_url(&self) -> Option<&str> {
        self.request_url.as_deref()
    }

    /// Request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&ContentBody> {
        self.body.as_ref()
    }

    /// Query parameters, ordered by name.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Extra transport headers, ordered by name.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Signer input for this call.
    #[must_use]
    pub fn signing_input<'a>(
        &'a self,
        fingerprint: &'a Fingerprint,
        mock: bool,
    ) -> SigningInput<'a> {
        SigningInput {
            access_key: self.credentials.access_key(),
            secret_key: self.credentials.secret_key(),
            api_name: self.api.as_deref(),
            api_version: self.version.as_deref(),
            fingerprint: fingerprint.as_str(),
            mock,
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "requestUrl={}", self.request_url().unwrap_or_default())?;
        writeln!(f, " api={}", self.api().unwrap_or_default())?;
        writeln!(f, " version={}", self.version().unwrap_or_default())?;
        writeln!(f, " method={}", self.method)?;
        writeln!(f, " accessKey={}", self.credentials.access_key())?;
        writeln!(f, " secretKey={REDACTED}")?;
        writeln!(
            f,
            " restfulProtocolVersion={}",
            self.restful_protocol_version().unwrap_or_default()
        )?;
        match &self.body {
            Some(body) => writeln!(f, " contentBody={body}")?,
            None => writeln!(f, " contentBody=")?,
        }
        writeln!(f, " params:")?;
        for (k, v) in &self.params {
            writeln!(f, "{k}={v}")?;
        }
        writeln!(f, " http header params:")?;
        for (k, v) in &self.headers {
            writeln!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterSet")
            .field("api", &self.api)
            .field("version", &self.version)
            .field("credentials", &self.credentials)
            .field("restful_protocol_version", &self.restful_protocol_version)
            .field("method", &self.method)
            .field("request_url", &self.request_url)
            .field("body", &self.body)
            .field("params", &self.params)
            .field("headers", &self.headers)
            .finish()
    }
}

/// Mutable builder for [`ParameterSet`].
#[derive(Clone, Default)]
pub struct ParameterSetBuilder {
    api: Option<String>,
    version: Option<String>,
    access_key: String,
    secret_key: String,
    restful_protocol_version: Option<String>,
    method: Method,
    request_url: Option<String>,
    body: Option<ContentBody>,
    params: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
}

impl ParameterSetBuilder {
    /// Set the api name.
    #[must_use]
    pub fn api(mut self, api: impl Into<String>) -> Self {
        self.api = Some(api.into());
        self
    }

    /// Set the api version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the access key.
    #[must_use]
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = access_key.into();
        self
    }

    /// Set the secret key.
    #[must_use]
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = secret_key.into();
        self
    }

    /// Enable REST path-style addressing for the given protocol version.
    #[must_use]
    pub fn restful_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.restful_protocol_version = Some(version.into());
        self
    }

    /// Set the method from its name (case-insensitive).
    ///
    /// Fails immediately for anything other than GET, POST, CGET or CPOST.
    pub fn method(self, method: &str) -> Result<Self, ConfigurationError> {
        Ok(self.method_kind(method.parse()?))
    }

    /// Set the method.
    #[must_use]
    pub fn method_kind(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the target URL.
    #[must_use]
    pub fn request_url(mut self, url: impl Into<String>) -> Self {
        self.request_url = Some(url.into());
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn body(mut self, body: ContentBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a query parameter, replacing any previous value for the key.
    #[must_use]
    pub fn put_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add several query parameters.
    #[must_use]
    pub fn put_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Remove every query parameter.
    #[must_use]
    pub fn clear_params(mut self) -> Self {
        self.params.clear();
        self
    }

    /// Add a transport header, replacing any previous value for the name.
    #[must_use]
    pub fn put_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add several transport headers.
    #[must_use]
    pub fn put_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Remove every transport header.
    #[must_use]
    pub fn clear_headers(mut self) -> Self {
        self.headers.clear();
        self
    }

    /// Freeze the accumulated fields into a [`ParameterSet`].
    ///
    /// The set owns copies of the builder's containers; the builder may be
    /// reused afterward without affecting it. No validation happens here.
    #[must_use]
    pub fn build(&self) -> ParameterSet {
        ParameterSet {
            api: self.api.clone(),
            version: self.version.clone(),
            credentials: Credentials::new(self.access_key.clone(), self.secret_key.clone()),
            restful_protocol_version: self.restful_protocol_version.clone(),
            method: self.method,
            request_url: self.request_url.clone(),
            body: self.body.clone(),
            params: self.params.clone(),
            headers: self.headers.clone(),
        }
    }
}

impl fmt::Debug for ParameterSetBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterSetBuilder")
            .field("api", &self.api)
            .field("version", &self.version)
            .field("access_key", &self.access_key)
            .field("secret_key", &REDACTED)
            .field("restful_protocol_version", &self.restful_protocol_version)
            .field("method", &self.method)
            .field("request_url", &self.request_url)
            .field("body", &self.body)
            .field("params", &self.params)
            .field("headers", &self.headers)
            .finish()
    }
}
