use crate::{ClientError, build_http_client, transport_error};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;
use technobot_protocol::{EndpointError, ExtractionProvider, ExtractionRequest, ExtractionResponse};

/// Client for the clipboard extraction endpoint.
///
/// Extraction runs a language model behind the endpoint, so it carries its
/// own, longer timeout.
pub struct HttpExtractionClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpExtractionClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            url,
            timeout,
        })
    }
}

#[async_trait]
impl ExtractionProvider for HttpExtractionClient {
    async fn extract_transfer(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionResponse, EndpointError> {
        debug!("calling extraction endpoint (url={})", self.url);
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| transport_error(err, self.timeout))?;
        let status = response.status();
        if !status.is_success() {
            return Err(EndpointError::Status(status.as_u16()));
        }
        response
            .json::<ExtractionResponse>()
            .await
            .map_err(|err| EndpointError::Malformed(err.to_string()))
    }
}
