//! Opaque request bodies.

use std::fmt;

use bytes::Bytes;

/// Request body together with its content type.
///
/// The body is opaque to the parameter model; only its presence matters for
/// validation.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentBody {
    content_type: String,
    data: Bytes,
}

impl ContentBody {
    /// A JSON document body.
    pub fn json(json: impl Into<String>) -> Self {
        Self::new("application/json; charset=UTF-8", json.into())
    }

    /// An arbitrary binary body.
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        Self::new("application/octet-stream", data)
    }

    /// A body with an explicit content type.
    pub fn new(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Content type sent with the body.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Body bytes.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl fmt::Debug for ContentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentBody")
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

impl fmt::Display for ContentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.content_type, self.data.len())
    }
}
