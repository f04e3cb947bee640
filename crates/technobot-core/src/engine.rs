//! Chat dispatch engine: keyword resolution, intent dispatch, and the
//! pending-transfer flow.

use crate::confirm::match_keyword;
use crate::explain::{Explainer, FeatureImportance};
use crate::intent::offline_intent_response;
use crate::sessions::SessionStore;
use crate::transfer::{
    CANCEL_NOTICE, NO_PENDING_CANCEL, NO_PENDING_CONFIRM, NO_VALID_TRANSFER, PREPARING_TRANSFER,
    TransferAction, success_receipt,
};
use crate::types::{CustomerProfile, Role};
use crate::error::TechnobotCoreError;
use chrono::Local;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use technobot_protocol::{
    ExtractionProvider, ExtractionRequest, GenerationProvider, GenerationRequest, IntentProvider,
    IntentRequest, IntentResponse, SessionId, TransferDetails,
};

/// Generic answer when the endpoint's `ask` payload carries no text.
pub const DONT_UNDERSTAND: &str = "Xin lỗi, tôi không hiểu câu hỏi của bạn.";

/// Generic answer for actions this client does not understand.
pub const UNKNOWN_ACTION_REPLY: &str = "Xin lỗi, có lỗi xảy ra khi xử lý yêu cầu của bạn.";

/// Assistant reply for one handled message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    /// Text to display in the transcript.
    pub reply: String,
    /// Transfer payload for the confirmation modal, when one was prepared.
    pub pending_transfer: Option<TransferDetails>,
}

/// Mocked importance chart plus its natural-language explanation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplainReport {
    /// Signed feature weights, strongest first.
    pub importances: Vec<FeatureImportance>,
    /// Explanation text, generated remotely or assembled locally.
    pub explanation: String,
}

/// Orchestrates sessions, providers, and the transfer state machine.
///
/// Both confirmation paths (typed keyword and UI button) resolve through
/// [`ChatEngine::resolve_transfer`], so they cannot drift apart.
pub struct ChatEngine {
    sessions: SessionStore,
    intent: Arc<dyn IntentProvider>,
    extraction: Arc<dyn ExtractionProvider>,
    generation: Arc<dyn GenerationProvider>,
    explainer: Explainer,
}

impl ChatEngine {
    /// Create an engine over the given providers.
    pub fn new(
        sessions: SessionStore,
        intent: Arc<dyn IntentProvider>,
        extraction: Arc<dyn ExtractionProvider>,
        generation: Arc<dyn GenerationProvider>,
        explainer: Explainer,
    ) -> Self {
        Self {
            sessions,
            intent,
            extraction,
            generation,
            explainer,
        }
    }

    /// Session store shared with the HTTP surface.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one user message.
    ///
    /// Returns `None` for blank input. Confirmation keywords resolve the
    /// pending transfer locally; everything else goes to the intent
    /// endpoint, with the offline mock substituted on failure.
    pub async fn handle_message(
        &self,
        session_id: SessionId,
        text: &str,
    ) -> Result<Option<ChatReply>, TechnobotCoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if let Some(keyword) = match_keyword(text) {
            self.sessions.append_turn(session_id, Role::User, text)?;
            let reply = self.resolve_transfer(session_id, keyword.into())?;
            return Ok(Some(ChatReply {
                reply,
                pending_transfer: None,
            }));
        }

        self.dispatch(session_id, text, DONT_UNDERSTAND).await
    }

    /// Product-button shortcut: restart the transcript with an interest
    /// message for the selected product.
    pub async fn product_interest(
        &self,
        session_id: SessionId,
        product_name: &str,
    ) -> Result<Option<ChatReply>, TechnobotCoreError> {
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Ok(None);
        }
        self.sessions.reset_transcript(session_id)?;
        let message = format!("Tôi quan tâm đến sản phẩm {product_name}");
        let default_answer = format!("Cảm ơn bạn đã quan tâm đến sản phẩm {product_name}!");
        self.dispatch(session_id, &message, &default_answer).await
    }

    /// Forward a message to the intent endpoint and apply the response.
    async fn dispatch(
        &self,
        session_id: SessionId,
        text: &str,
        default_answer: &str,
    ) -> Result<Option<ChatReply>, TechnobotCoreError> {
        // History context excludes the message being dispatched.
        let history = self.sessions.history(session_id)?;
        self.sessions.append_turn(session_id, Role::User, text)?;

        let request = IntentRequest {
            text: text.to_string(),
            message_history: (!history.is_empty()).then_some(history),
        };
        let response = match self.intent.text_to_action(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "intent endpoint failed, substituting offline response \
                     (session_id={}, error={})",
                    session_id, err
                );
                offline_intent_response(text)
            }
        };

        let reply = match response {
            IntentResponse::Ask(payload) => ChatReply {
                reply: payload
                    .answer
                    .unwrap_or_else(|| default_answer.to_string()),
                pending_transfer: None,
            },
            IntentResponse::TransferMoney(details) => {
                debug!(
                    "transfer intent received (session_id={}, amount={})",
                    session_id,
                    details.amount.value()
                );
                self.sessions.set_pending(session_id, details.clone())?;
                ChatReply {
                    reply: PREPARING_TRANSFER.to_string(),
                    pending_transfer: Some(details),
                }
            }
            IntentResponse::Unknown => ChatReply {
                reply: UNKNOWN_ACTION_REPLY.to_string(),
                pending_transfer: None,
            },
        };

        self.sessions
            .append_turn(session_id, Role::Assistant, &reply.reply)?;
        Ok(Some(reply))
    }

    /// Resolve the session's pending transfer.
    ///
    /// Shared by the typed-keyword path and the UI-button routes. With
    /// nothing pending the state is left untouched and the caller gets the
    /// corresponding notice.
    pub fn resolve_transfer(
        &self,
        session_id: SessionId,
        action: TransferAction,
    ) -> Result<String, TechnobotCoreError> {
        let pending = self.sessions.take_pending(session_id)?;
        let reply = match (action, pending) {
            (TransferAction::Confirm, Some(details)) => {
                debug!(
                    "confirming transfer (session_id={}, amount={})",
                    session_id,
                    details.amount.value()
                );
                success_receipt(&details, Local::now())
            }
            (TransferAction::Confirm, None) => NO_PENDING_CONFIRM.to_string(),
            (TransferAction::Cancel, Some(_)) => CANCEL_NOTICE.to_string(),
            (TransferAction::Cancel, None) => NO_PENDING_CANCEL.to_string(),
        };
        self.sessions
            .append_turn(session_id, Role::Assistant, &reply)?;
        Ok(reply)
    }

    /// Parse clipboard text into a pending transfer via the extraction
    /// endpoint. `raw_output: null` and endpoint failures both resolve to
    /// the "no valid info" outcome without touching pending state.
    pub async fn extract_transfer(
        &self,
        session_id: SessionId,
        text: &str,
    ) -> Result<ChatReply, TechnobotCoreError> {
        let request = ExtractionRequest {
            text: text.to_string(),
        };
        let extracted = match self.extraction.extract_transfer(&request).await {
            Ok(response) => response.raw_output,
            Err(err) => {
                warn!(
                    "extraction endpoint failed (session_id={}, error={})",
                    session_id, err
                );
                None
            }
        };

        let reply = match extracted {
            Some(extracted) => {
                let details = TransferDetails::from(extracted);
                self.sessions.set_pending(session_id, details.clone())?;
                ChatReply {
                    reply: PREPARING_TRANSFER.to_string(),
                    pending_transfer: Some(details),
                }
            }
            None => ChatReply {
                reply: NO_VALID_TRANSFER.to_string(),
                pending_transfer: None,
            },
        };
        self.sessions
            .append_turn(session_id, Role::Assistant, &reply.reply)?;
        Ok(reply)
    }

    /// Mocked importance chart plus explanation for a customer profile.
    pub async fn explain(&self, profile: &CustomerProfile) -> ExplainReport {
        let importances = self.explainer.feature_importances();
        let prompt = self.explainer.build_prompt(profile, &importances);
        let explanation = match self.generation.generate(&GenerationRequest { prompt }).await {
            Ok(response) if !response.generated_text.trim().is_empty() => response.generated_text,
            Ok(_) => self.explainer.fallback_explanation(profile, &importances),
            Err(err) => {
                warn!("generation endpoint failed, using local fallback: {err}");
                self.explainer.fallback_explanation(profile, &importances)
            }
        };
        ExplainReport {
            importances,
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatEngine, DONT_UNDERSTAND, UNKNOWN_ACTION_REPLY};
    use crate::explain::Explainer;
    use crate::intent::OFFLINE_ANSWER;
    use crate::sessions::SessionStore;
    use crate::transfer::{
        CANCEL_NOTICE, NO_PENDING_CONFIRM, NO_VALID_TRANSFER, PREPARING_TRANSFER, TransferAction,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use technobot_protocol::{
        Amount, AskPayload, ExtractedTransfer, ExtractionResponse, IntentResponse, SessionId,
        TransferDetails,
    };
    use technobot_test_utils::{
        FailingExtractionProvider, FailingGenerationProvider, FailingIntentProvider,
        FixedExtractionProvider, FixedGenerationProvider, FixedIntentProvider,
        RecordingGenerationProvider,
    };

    fn ask_response(answer: &str) -> IntentResponse {
        IntentResponse::Ask(AskPayload {
            answer: Some(answer.to_string()),
        })
    }

    fn transfer_response() -> IntentResponse {
        IntentResponse::TransferMoney(TransferDetails {
            amount: Amount::from(500_000u64),
            recipient_account: "19031234567890".to_string(),
            bank_name: "Techcombank".to_string(),
            recipient_name: "Nguyễn Văn A".to_string(),
            memo: "hoc phi".to_string(),
        })
    }

    fn engine_with_intent(intent: Arc<FixedIntentProvider>) -> (ChatEngine, SessionId) {
        let sessions = SessionStore::new();
        let session_id = sessions.create_session(None);
        let engine = ChatEngine::new(
            sessions,
            intent,
            Arc::new(FixedExtractionProvider::new(ExtractionResponse::default())),
            Arc::new(FixedGenerationProvider::new("")),
            Explainer::new(vec!["age".to_string()]),
        );
        (engine, session_id)
    }

    #[tokio::test]
    async fn ask_reply_appends_turns_and_mirrors_history() {
        let intent = Arc::new(FixedIntentProvider::new(ask_response("Chào bạn!")));
        let (engine, session_id) = engine_with_intent(intent.clone());

        let reply = engine
            .handle_message(session_id, "xin chào")
            .await
            .expect("handle")
            .expect("reply");
        assert_eq!(reply.reply, "Chào bạn!".to_string());
        assert_eq!(reply.pending_transfer, None);

        // The first call carries no history; the second carries the mirror
        // of the first exchange but not the in-flight message.
        engine
            .handle_message(session_id, "lãi suất thế nào?")
            .await
            .expect("handle")
            .expect("reply");
        let requests = intent.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].message_history, None);
        assert_eq!(
            requests[1].message_history,
            Some(vec![
                "User: xin chào".to_string(),
                "Assistant: Chào bạn!".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn blank_message_is_ignored() {
        let intent = Arc::new(FixedIntentProvider::new(ask_response("bỏ qua")));
        let (engine, session_id) = engine_with_intent(intent.clone());
        let outcome = engine
            .handle_message(session_id, "   ")
            .await
            .expect("handle");
        assert_eq!(outcome, None);
        assert_eq!(intent.requests().len(), 0);
    }

    #[tokio::test]
    async fn missing_answer_gets_generic_reply() {
        let intent = Arc::new(FixedIntentProvider::new(IntentResponse::Ask(
            AskPayload::default(),
        )));
        let (engine, session_id) = engine_with_intent(intent);
        let reply = engine
            .handle_message(session_id, "???")
            .await
            .expect("handle")
            .expect("reply");
        assert_eq!(reply.reply, DONT_UNDERSTAND.to_string());
    }

    #[tokio::test]
    async fn unknown_action_gets_generic_error_reply() {
        let intent = Arc::new(FixedIntentProvider::new(IntentResponse::Unknown));
        let (engine, session_id) = engine_with_intent(intent);
        let reply = engine
            .handle_message(session_id, "mở tài khoản mới")
            .await
            .expect("handle")
            .expect("reply");
        assert_eq!(reply.reply, UNKNOWN_ACTION_REPLY.to_string());
    }

    #[tokio::test]
    async fn transfer_intent_creates_exactly_one_pending() {
        let intent = Arc::new(FixedIntentProvider::new(transfer_response()));
        let (engine, session_id) = engine_with_intent(intent);

        let reply = engine
            .handle_message(session_id, "chuyển 500000 cho A")
            .await
            .expect("handle")
            .expect("reply");
        assert_eq!(reply.reply, PREPARING_TRANSFER.to_string());
        assert_eq!(reply.pending_transfer.is_some(), true);
        assert_eq!(
            engine.sessions().pending(session_id).expect("pending"),
            reply.pending_transfer
        );
    }

    #[tokio::test]
    async fn typed_keyword_confirms_and_clears_pending() {
        let intent = Arc::new(FixedIntentProvider::new(transfer_response()));
        let (engine, session_id) = engine_with_intent(intent);
        engine
            .handle_message(session_id, "chuyển 500000 cho A")
            .await
            .expect("handle");

        let reply = engine
            .handle_message(session_id, "xác nhận")
            .await
            .expect("handle")
            .expect("reply");
        assert!(reply.reply.contains("GIAO DỊCH ĐÃ ĐƯỢC THỰC HIỆN THÀNH CÔNG"));
        assert!(reply.reply.contains("TCB5000007890"));
        assert_eq!(engine.sessions().pending(session_id).expect("pending"), None);
    }

    #[tokio::test]
    async fn button_cancel_matches_typed_cancel() {
        let intent = Arc::new(FixedIntentProvider::new(transfer_response()));
        let (engine, session_id) = engine_with_intent(intent);
        engine
            .handle_message(session_id, "chuyển 500000 cho A")
            .await
            .expect("handle");

        // The UI button path goes through the same resolver.
        let reply = engine
            .resolve_transfer(session_id, TransferAction::Cancel)
            .expect("resolve");
        assert_eq!(reply, CANCEL_NOTICE.to_string());
        assert_eq!(engine.sessions().pending(session_id).expect("pending"), None);
    }

    #[tokio::test]
    async fn confirm_without_pending_leaves_state_untouched() {
        let intent = Arc::new(FixedIntentProvider::new(ask_response("ok")));
        let (engine, session_id) = engine_with_intent(intent.clone());

        let reply = engine
            .handle_message(session_id, "CONFIRM")
            .await
            .expect("handle")
            .expect("reply");
        assert_eq!(reply.reply, NO_PENDING_CONFIRM.to_string());
        assert_eq!(engine.sessions().pending(session_id).expect("pending"), None);
        // Keywords never reach the intent endpoint.
        assert_eq!(intent.requests().len(), 0);
    }

    #[tokio::test]
    async fn endpoint_failure_with_transfer_text_substitutes_mock_transfer() {
        let sessions = SessionStore::new();
        let session_id = sessions.create_session(None);
        let engine = ChatEngine::new(
            sessions,
            Arc::new(FailingIntentProvider),
            Arc::new(FixedExtractionProvider::new(ExtractionResponse::default())),
            Arc::new(FixedGenerationProvider::new("")),
            Explainer::new(vec!["age".to_string()]),
        );

        let reply = engine
            .handle_message(session_id, "chuyển tiền 200000")
            .await
            .expect("handle")
            .expect("reply");
        assert_eq!(reply.reply, PREPARING_TRANSFER.to_string());
        let pending = engine
            .sessions()
            .pending(session_id)
            .expect("pending")
            .expect("some");
        assert_eq!(pending.amount, Amount::from(200_000u64));
    }

    #[tokio::test]
    async fn endpoint_failure_with_plain_text_substitutes_offline_answer() {
        let sessions = SessionStore::new();
        let session_id = sessions.create_session(None);
        let engine = ChatEngine::new(
            sessions,
            Arc::new(FailingIntentProvider),
            Arc::new(FixedExtractionProvider::new(ExtractionResponse::default())),
            Arc::new(FixedGenerationProvider::new("")),
            Explainer::new(vec!["age".to_string()]),
        );

        let reply = engine
            .handle_message(session_id, "lãi suất tiết kiệm?")
            .await
            .expect("handle")
            .expect("reply");
        assert_eq!(reply.reply, OFFLINE_ANSWER.to_string());
    }

    #[tokio::test]
    async fn product_interest_restarts_transcript() {
        let intent = Arc::new(FixedIntentProvider::new(IntentResponse::Ask(
            AskPayload::default(),
        )));
        let (engine, session_id) = engine_with_intent(intent);
        engine
            .handle_message(session_id, "xin chào")
            .await
            .expect("handle");

        let reply = engine
            .product_interest(session_id, "Vay mua nhà")
            .await
            .expect("interest")
            .expect("reply");
        assert_eq!(
            reply.reply,
            "Cảm ơn bạn đã quan tâm đến sản phẩm Vay mua nhà!".to_string()
        );

        let session = engine.sessions().get_session(session_id).expect("session");
        assert_eq!(
            session.history,
            vec![
                "User: Tôi quan tâm đến sản phẩm Vay mua nhà".to_string(),
                "Assistant: Cảm ơn bạn đã quan tâm đến sản phẩm Vay mua nhà!".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn extraction_success_creates_pending_transfer() {
        let sessions = SessionStore::new();
        let session_id = sessions.create_session(None);
        let engine = ChatEngine::new(
            sessions,
            Arc::new(FixedIntentProvider::new(ask_response("ok"))),
            Arc::new(FixedExtractionProvider::new(ExtractionResponse {
                raw_output: Some(ExtractedTransfer {
                    bank_name: "Techcombank".to_string(),
                    account_number: "19031234567890".to_string(),
                    amount: Amount::from(750_000u64),
                    content: "tien thue nha".to_string(),
                }),
            })),
            Arc::new(FixedGenerationProvider::new("")),
            Explainer::new(vec!["age".to_string()]),
        );

        let reply = engine
            .extract_transfer(session_id, "stk 19031234567890 tcb 750k tien thue nha")
            .await
            .expect("extract");
        assert_eq!(reply.reply, PREPARING_TRANSFER.to_string());
        let pending = engine
            .sessions()
            .pending(session_id)
            .expect("pending")
            .expect("some");
        assert_eq!(pending.memo, "tien thue nha".to_string());
        assert_eq!(pending.recipient_name, "N/A".to_string());
    }

    #[tokio::test]
    async fn extraction_null_creates_no_pending_transfer() {
        let sessions = SessionStore::new();
        let session_id = sessions.create_session(None);
        let engine = ChatEngine::new(
            sessions,
            Arc::new(FixedIntentProvider::new(ask_response("ok"))),
            Arc::new(FixedExtractionProvider::new(ExtractionResponse {
                raw_output: None,
            })),
            Arc::new(FixedGenerationProvider::new("")),
            Explainer::new(vec!["age".to_string()]),
        );

        let reply = engine
            .extract_transfer(session_id, "họp lúc 3 giờ chiều")
            .await
            .expect("extract");
        assert_eq!(reply.reply, NO_VALID_TRANSFER.to_string());
        assert_eq!(engine.sessions().pending(session_id).expect("pending"), None);
    }

    #[tokio::test]
    async fn extraction_endpoint_failure_degrades_to_no_valid_info() {
        let sessions = SessionStore::new();
        let session_id = sessions.create_session(None);
        let engine = ChatEngine::new(
            sessions,
            Arc::new(FixedIntentProvider::new(ask_response("ok"))),
            Arc::new(FailingExtractionProvider),
            Arc::new(FixedGenerationProvider::new("")),
            Explainer::new(vec!["age".to_string()]),
        );

        let reply = engine
            .extract_transfer(session_id, "stk 123 500k")
            .await
            .expect("extract");
        assert_eq!(reply.reply, NO_VALID_TRANSFER.to_string());
        assert_eq!(engine.sessions().pending(session_id).expect("pending"), None);
    }

    #[tokio::test]
    async fn explain_uses_generated_text_and_prompts_with_the_profile() {
        let generation = Arc::new(RecordingGenerationProvider::new("Giải thích từ mô hình."));
        let sessions = SessionStore::new();
        let engine = ChatEngine::new(
            sessions,
            Arc::new(FixedIntentProvider::new(ask_response("ok"))),
            Arc::new(FixedExtractionProvider::new(ExtractionResponse::default())),
            generation.clone(),
            Explainer::new(vec!["age".to_string(), "occupation".to_string()]),
        );

        let report = engine.explain(&sample_profile()).await;
        assert_eq!(report.explanation, "Giải thích từ mô hình.".to_string());
        assert_eq!(report.importances.len(), 2);

        let prompts = generation.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("34 tuổi"));
        assert!(prompts[0].contains("Kỹ sư"));
    }

    #[tokio::test]
    async fn explain_falls_back_when_generation_fails() {
        let sessions = SessionStore::new();
        let engine = ChatEngine::new(
            sessions,
            Arc::new(FixedIntentProvider::new(ask_response("ok"))),
            Arc::new(FixedExtractionProvider::new(ExtractionResponse::default())),
            Arc::new(FailingGenerationProvider),
            Explainer::new(vec!["age".to_string()]),
        );

        let report = engine.explain(&sample_profile()).await;
        assert!(report.explanation.contains("demo offline"));
    }

    fn sample_profile() -> crate::types::CustomerProfile {
        crate::types::CustomerProfile {
            user_id: "a1b2c3d4".to_string(),
            age: 34,
            occupation: "Kỹ sư".to_string(),
            marital_status: "Đã kết hôn".to_string(),
            recommendation_success: true,
            adopted_products_count: 2,
            timestamp: "2024-11-02 09:15:00".to_string(),
            recommended_products: vec!["Vay mua nhà".to_string()],
        }
    }
}
