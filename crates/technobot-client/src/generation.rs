use crate::{ClientError, build_http_client, transport_error};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;
use technobot_protocol::{EndpointError, GenerationProvider, GenerationRequest, GenerationResponse};

/// Client for the generative-text explanation endpoint.
pub struct HttpGenerationClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpGenerationClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            url,
            timeout,
        })
    }
}

#[async_trait]
impl GenerationProvider for HttpGenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, EndpointError> {
        debug!("calling generation endpoint (url={})", self.url);
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
            .json::<GenerationResponse>()
            .await
            .map_err(|err| EndpointError::Malformed(err.to_string()))
    }
}
