/// Failures returned by remote endpoint clients.
///
/// Callers decide the fallback policy; clients only report what happened.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// No configured URL could be reached.
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),
    /// The endpoint answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The request exceeded the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),
}
