//! HTTP clients for the remote TECHNOBOT endpoints.
//!
//! Each client implements the matching provider trait from
//! `technobot-protocol`, so the chat engine never sees `reqwest` types.

mod error;
mod extraction;
mod generation;
mod intent;

pub use error::ClientError;
pub use extraction::HttpExtractionClient;
pub use generation::HttpGenerationClient;
pub use intent::HttpIntentClient;

use std::time::Duration;
use technobot_protocol::EndpointError;

/// Build a `reqwest` client with the given request timeout.
fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ClientError::Build)
}

/// Translate a transport-level failure into an endpoint error.
fn transport_error(err: reqwest::Error, timeout: Duration) -> EndpointError {
    if err.is_timeout() {
        EndpointError::Timeout(timeout.as_secs())
    } else {
        EndpointError::Unreachable(err.to_string())
    }
}
