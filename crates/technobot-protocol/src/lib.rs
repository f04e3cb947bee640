//! Wire types for the TECHNOBOT remote endpoints and common payloads.

mod amount;
mod endpoint;
mod provider;

pub use amount::Amount;
pub use endpoint::EndpointError;
pub use provider::{ExtractionProvider, GenerationProvider, IntentProvider};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a chat session.
pub type SessionId = Uuid;

/// Request body for the text-to-action intent endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentRequest {
    /// Raw user message text.
    pub text: String,
    /// Prior turns rendered as "User: …" / "Assistant: …" lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_history: Option<Vec<String>>,
}

/// Response from the intent endpoint, tagged by `action`.
///
/// Actions the endpoint may add later must still deserialize, whatever
/// payload they carry, so unknown tags collapse into
/// [`IntentResponse::Unknown`] and callers degrade to a generic error
/// message.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "action", content = "payload")]
pub enum IntentResponse {
    /// Conversational answer to display verbatim.
    Ask(AskPayload),
    /// Transfer request that must be confirmed by the user.
    TransferMoney(TransferDetails),
    /// Any action this client does not understand.
    Unknown,
}

impl<'de> Deserialize<'de> for IntentResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Decoded in two steps: an unrecognized action must be accepted as
        // a whole, including any payload shape it carries.
        #[derive(Deserialize)]
        struct Envelope {
            action: String,
            #[serde(default)]
            payload: serde_json::Value,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        let payload = match envelope.payload {
            serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
            other => other,
        };
        match envelope.action.as_str() {
            "ask" => serde_json::from_value(payload)
                .map(IntentResponse::Ask)
                .map_err(D::Error::custom),
            "transfer_money" => serde_json::from_value(payload)
                .map(IntentResponse::TransferMoney)
                .map_err(D::Error::custom),
            _ => Ok(IntentResponse::Unknown),
        }
    }
}

/// Payload carried by an `ask` action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AskPayload {
    /// Display answer; absent when the endpoint had nothing to say.
    #[serde(default)]
    pub answer: Option<String>,
}

/// Transfer fields carried by a `transfer_money` action.
///
/// Display fields default to "N/A" so a partial payload still renders the
/// confirmation card the way the endpoint intended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferDetails {
    /// Transfer amount in VND.
    #[serde(default)]
    pub amount: Amount,
    /// Recipient account number.
    #[serde(default = "not_available")]
    pub recipient_account: String,
    /// Receiving bank name.
    #[serde(default = "not_available")]
    pub bank_name: String,
    /// Recipient display name.
    #[serde(default = "not_available")]
    pub recipient_name: String,
    /// Free-text transfer memo.
    #[serde(default = "not_available")]
    pub memo: String,
}

impl Default for TransferDetails {
    fn default() -> Self {
        Self {
            amount: Amount::default(),
            recipient_account: not_available(),
            bank_name: not_available(),
            recipient_name: not_available(),
            memo: not_available(),
        }
    }
}

/// Request body for the clipboard extraction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionRequest {
    /// Free-form clipboard text to parse.
    pub text: String,
}

/// Response from the extraction endpoint.
///
/// `raw_output: null` means the text contained no recognizable transfer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExtractionResponse {
    /// Extracted transfer fields, or `None` when nothing was found.
    #[serde(default)]
    pub raw_output: Option<ExtractedTransfer>,
}

/// Structured transfer fields parsed from free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExtractedTransfer {
    /// Receiving bank name.
    #[serde(default = "not_available")]
    pub bank_name: String,
    /// Recipient account number.
    #[serde(default = "not_available")]
    pub account_number: String,
    /// Transfer amount in VND.
    #[serde(default)]
    pub amount: Amount,
    /// Free-text content carried into the memo.
    #[serde(default)]
    pub content: String,
}

impl From<ExtractedTransfer> for TransferDetails {
    fn from(extracted: ExtractedTransfer) -> Self {
        let memo = if extracted.content.trim().is_empty() {
            not_available()
        } else {
            extracted.content
        };
        Self {
            amount: extracted.amount,
            recipient_account: extracted.account_number,
            bank_name: extracted.bank_name,
            recipient_name: not_available(),
            memo,
        }
    }
}

/// Request body for the generative-text endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// Prompt assembled from the profile and feature importances.
    pub prompt: String,
}

/// Response from the generative-text endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerationResponse {
    /// Generated explanation text.
    #[serde(default)]
    pub generated_text: String,
}

/// Placeholder for display fields the endpoint omitted.
fn not_available() -> String {
    "N/A".to_string()
}
