use crate::{ClientError, build_http_client, transport_error};
use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;
use technobot_protocol::{EndpointError, IntentProvider, IntentRequest, IntentResponse};

/// Client for the text-to-action intent endpoint.
///
/// The endpoint is published under more than one scheme; the configured
/// URLs are tried in order and the first decodable response wins.
pub struct HttpIntentClient {
    client: reqwest::Client,
    urls: Vec<String>,
    timeout: Duration,
}

impl HttpIntentClient {
    /// Build a client over the candidate URLs, tried in order.
    pub fn new(urls: Vec<String>, timeout: Duration) -> Result<Self, ClientError> {
        if urls.is_empty() {
            return Err(ClientError::NoEndpoint);
        }
        Ok(Self {
            client: build_http_client(timeout)?,
            urls,
            timeout,
        })
    }

    async fn call(&self, url: &str, request: &IntentRequest) -> Result<IntentResponse, EndpointError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|err| transport_error(err, self.timeout))?;
        let status = response.status();
        if !status.is_success() {
            return Err(EndpointError::Status(status.as_u16()));
        }
        response
            .json::<IntentResponse>()
            .await
            .map_err(|err| EndpointError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl IntentProvider for HttpIntentClient {
    async fn text_to_action(
        &self,
        request: &IntentRequest,
    ) -> Result<IntentResponse, EndpointError> {
        let mut last_error = EndpointError::Unreachable("no endpoint url configured".to_string());
        for url in &self.urls {
            debug!("calling intent endpoint (url={})", url);
            match self.call(url, request).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    warn!("intent endpoint attempt failed (url={}, error={})", url, err);
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}
