//! Error taxonomy for the gateway.
//!
//! Every failure a request can hit is one of these variants. The `Display`
//! text of each variant is exactly what clients see in the `error` field of
//! the JSON body, so the messages here are part of the public contract.

/// Common error type for cineredux.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller-supplied API key did not match the configured one.
    #[error("Unauthorized access: Invalid API key")]
    InvalidApiKey,

    /// An internal-only capability was invoked without the internal marker.
    #[error("Unauthorized access")]
    Forbidden,

    /// A required request parameter was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// No critic score could be resolved for the requested title.
    #[error("Rating not found")]
    RatingNotFound,

    /// The requested movie id is not a valid TMDB id.
    #[error("Movie not found")]
    MovieNotFound,

    /// The movie database call failed (transport, status, or body decode).
    #[error("Movie not found")]
    Upstream {
        /// HTTP status returned by the upstream, if it answered at all.
        status: Option<u16>,
        /// Diagnostic detail, logged but never sent to clients.
        detail: String,
    },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create the error returned when the `query` parameter is absent.
    pub fn missing_query() -> Self {
        Self::Validation("Query parameter is required".to_string())
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new Upstream error.
    pub fn upstream<S: Into<String>>(status: Option<u16>, detail: S) -> Self {
        Self::Upstream {
            status,
            detail: detail.into(),
        }
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Map this error to the HTTP status code served to clients.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidApiKey => 401,
            Error::Forbidden => 403,
            Error::Validation(_) => 400,
            Error::RatingNotFound => 404,
            Error::MovieNotFound => 404,
            Error::Upstream {
                status: Some(404), ..
            } => 404,
            Error::Upstream { .. } => 502,
            Error::Internal(_) => 500,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
