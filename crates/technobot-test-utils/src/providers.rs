use async_trait::async_trait;
use parking_lot::Mutex;
use technobot_protocol::{
    EndpointError, ExtractionProvider, ExtractionRequest, ExtractionResponse, GenerationProvider,
    GenerationRequest, GenerationResponse, IntentProvider, IntentRequest, IntentResponse,
};

/// Intent double that replays one canned response and records every request.
#[derive(Debug)]
pub struct FixedIntentProvider {
    response: IntentResponse,
    requests: Mutex<Vec<IntentRequest>>,
}

impl FixedIntentProvider {
    pub fn new(response: IntentResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<IntentRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl IntentProvider for FixedIntentProvider {
    async fn text_to_action(
        &self,
        request: &IntentRequest,
    ) -> Result<IntentResponse, EndpointError> {
        self.requests.lock().push(request.clone());
        Ok(self.response.clone())
    }
}

/// Intent double whose endpoint is always down.
#[derive(Debug, Clone)]
pub struct FailingIntentProvider;

#[async_trait]
impl IntentProvider for FailingIntentProvider {
    async fn text_to_action(
        &self,
        _request: &IntentRequest,
    ) -> Result<IntentResponse, EndpointError> {
        Err(EndpointError::Unreachable(
            "mock intent endpoint down".to_string(),
        ))
    }
}

/// Extraction double that replays one canned response.
#[derive(Debug, Clone)]
pub struct FixedExtractionProvider {
    response: ExtractionResponse,
}

impl FixedExtractionProvider {
    pub fn new(response: ExtractionResponse) -> Self {
        Self { response }
    }
}

#[async_trait]
impl ExtractionProvider for FixedExtractionProvider {
    async fn extract_transfer(
        &self,
        _request: &ExtractionRequest,
    ) -> Result<ExtractionResponse, EndpointError> {
        Ok(self.response.clone())
    }
}

/// Extraction double whose endpoint is always down.
#[derive(Debug, Clone)]
pub struct FailingExtractionProvider;

#[async_trait]
impl ExtractionProvider for FailingExtractionProvider {
    async fn extract_transfer(
        &self,
        _request: &ExtractionRequest,
    ) -> Result<ExtractionResponse, EndpointError> {
        Err(EndpointError::Unreachable(
            "mock extraction endpoint down".to_string(),
        ))
    }
}

/// Generation double that replays one canned text.
#[derive(Debug, Clone)]
pub struct FixedGenerationProvider {
    text: String,
}

impl FixedGenerationProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl GenerationProvider for FixedGenerationProvider {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, EndpointError> {
        Ok(GenerationResponse {
            generated_text: self.text.clone(),
        })
    }
}

/// Generation double that records prompts while replaying one canned text.
#[derive(Debug)]
pub struct RecordingGenerationProvider {
    text: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerationProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl GenerationProvider for RecordingGenerationProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, EndpointError> {
        self.prompts.lock().push(request.prompt.clone());
        Ok(GenerationResponse {
            generated_text: self.text.clone(),
        })
    }
}

/// Generation double whose endpoint is always down.
#[derive(Debug, Clone)]
pub struct FailingGenerationProvider;

#[async_trait]
impl GenerationProvider for FailingGenerationProvider {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, EndpointError> {
        Err(EndpointError::Unreachable(
            "mock generation endpoint down".to_string(),
        ))
    }
}
