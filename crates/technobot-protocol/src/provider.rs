//! Provider seams for the remote TECHNOBOT endpoints.

use crate::{
    EndpointError, ExtractionRequest, ExtractionResponse, GenerationRequest, GenerationResponse,
    IntentRequest, IntentResponse,
};
use async_trait::async_trait;

/// Classifies free-text messages into actions via the intent endpoint.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    /// Resolve a message (plus prior history) into an intent response.
    async fn text_to_action(
        &self,
        request: &IntentRequest,
    ) -> Result<IntentResponse, EndpointError>;
}

/// Parses free-form clipboard text into structured transfer fields.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    /// Extract transfer fields from free text.
    async fn extract_transfer(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionResponse, EndpointError>;
}

/// Produces natural-language text from a prompt.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate explanation text for a prompt.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, EndpointError>;
}
