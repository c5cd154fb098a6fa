//! Call methods accepted by the gateway.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Method of a gateway call.
///
/// `CGET` and `CPOST` are the gateway's variants of `GET` and `POST`; on the
/// wire they travel as plain `GET` and `POST`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// Plain GET.
    #[default]
    Get,
    /// Plain POST.
    Post,
    /// Gateway GET variant.
    CGet,
    /// Gateway POST variant.
    CPost,
}

impl Method {
    /// Canonical upper-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::CGet => "CGET",
            Self::CPost => "CPOST",
        }
    }

    /// Whether the method may carry a body.
    #[must_use]
    pub fn allows_body(self) -> bool {
        matches!(self, Self::Post | Self::CPost)
    }

    /// The HTTP method used on the wire.
    #[must_use]
    pub fn to_http(self) -> http::Method {
        if self.allows_body() {
            http::Method::POST
        } else {
            http::Method::GET
        }
    }
}

impl FromStr for Method {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Get, Self::Post, Self::CGet, Self::CPost]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigurationError::UnsupportedMethod(s.to_owned()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
