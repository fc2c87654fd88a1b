use http::StatusCode;

/// Errors that can happen either during client configuration or while
/// talking to the marketplace backend.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The client was built without a required parameter.
    #[error("configuration error: {0}")]
    Config(&'static str),

    /// The backend rejected the request with a structured error body.
    #[error("{url} rejected with status {status}: {detail}")]
    Rejected {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: StatusCode,
        /// Machine-readable detail from the error body.
        detail: String,
    },

    /// A response body was missing or unparsable where one was expected.
    #[error("{url} returned status {status} with a null or invalid body")]
    InvalidBody {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response text, for diagnostics.
        body: String,
    },

    /// A network problem.
    #[error("network error: {0}")]
    Network(anyhow::Error),

    /// A problem reading or writing session storage.
    #[error("storage error: {0}")]
    Storage(anyhow::Error),

    /// An access token problem.
    #[error("invalid access token: {0}")]
    InvalidAccessToken(anyhow::Error),
}

pub(crate) fn network(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Network(anyhow::Error::from(err))
}

pub(crate) fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Storage(anyhow::Error::from(err))
}

pub(crate) fn invalid_token(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::InvalidAccessToken(anyhow::Error::from(err))
}
