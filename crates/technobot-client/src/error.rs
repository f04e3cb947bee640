use thiserror::Error;

/// Errors raised while constructing an HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("no endpoint url configured")]
    NoEndpoint,
}
