//! JSON route handlers consumed by the chat front end.

use crate::state::AppState;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post};
use serde::{Deserialize, Serialize};
use technobot_core::engine::ExplainReport;
use technobot_core::types::{CustomerProfile, Session, SessionSummary};
use technobot_core::{CustomerOption, TechnobotCoreError, TransferAction};
use technobot_protocol::{SessionId, TransferDetails};
use uuid::Uuid;

/// Placeholder shown when a customer id has no profile in the catalog.
pub const CUSTOMER_NOT_FOUND: &str = "Không tìm thấy thông tin khách hàng.";

/// Error body for an unknown session id.
pub const SESSION_NOT_FOUND: &str = "Không tìm thấy phiên trò chuyện.";

/// Error body for a session id that is not a UUID.
pub const INVALID_SESSION_ID: &str = "Mã phiên không hợp lệ.";

/// Generic error body for internal failures.
pub const INTERNAL_ERROR: &str = "Đã xảy ra lỗi hệ thống. Vui lòng thử lại.";

/// JSON error body returned by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = Custom<Json<ErrorBody>>;
pub type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(status: Status, message: impl Into<String>) -> ApiError {
    Custom(
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn parse_session_id(id: &str) -> Result<SessionId, ApiError> {
    Uuid::parse_str(id).map_err(|_| api_error(Status::BadRequest, INVALID_SESSION_ID))
}

fn engine_error(err: TechnobotCoreError) -> ApiError {
    match err {
        TechnobotCoreError::UnknownSession(_) => api_error(Status::NotFound, SESSION_NOT_FOUND),
        _ => api_error(Status::InternalServerError, INTERNAL_ERROR),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Chat response shape shared by message, product-interest, and extraction
/// routes. `reply` is absent when the message was blank and ignored.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: Option<String>,
    pub pending_transfer: Option<TransferDetails>,
}

#[derive(Debug, Serialize)]
pub struct TransferResolution {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductInterestRequest {
    pub product_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractTransferRequest {
    pub text: String,
}

/// Profile lookup result; misses carry the placeholder message instead of
/// an error status so the front end can render it verbatim.
#[derive(Debug, Serialize)]
pub struct CustomerLookup {
    pub profile: Option<CustomerProfile>,
    pub message: Option<String>,
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "technobot",
    })
}

#[get("/customers")]
pub fn list_customers(state: &State<AppState>) -> Json<Vec<CustomerOption>> {
    Json(state.catalog.options())
}

#[get("/customers/<id>")]
pub fn get_customer(id: &str, state: &State<AppState>) -> Json<CustomerLookup> {
    match state.catalog.lookup(id) {
        Some(profile) => Json(CustomerLookup {
            profile: Some(profile.clone()),
            message: None,
        }),
        None => Json(CustomerLookup {
            profile: None,
            message: Some(CUSTOMER_NOT_FOUND.to_string()),
        }),
    }
}

#[post("/sessions", format = "json", data = "<body>")]
pub fn create_session(
    body: Option<Json<CreateSessionRequest>>,
    state: &State<AppState>,
) -> Json<SessionCreated> {
    let customer_id = body.and_then(|body| body.into_inner().customer_id);
    let session_id = state.engine.sessions().create_session(customer_id);
    Json(SessionCreated { session_id })
}

#[get("/sessions")]
pub fn list_sessions(state: &State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.engine.sessions().list_sessions())
}

#[get("/sessions/<id>")]
pub fn get_session(id: &str, state: &State<AppState>) -> ApiResult<Session> {
    let session_id = parse_session_id(id)?;
    let session = state
        .engine
        .sessions()
        .get_session(session_id)
        .map_err(engine_error)?;
    Ok(Json(session))
}

#[delete("/sessions/<id>")]
pub fn delete_session(id: &str, state: &State<AppState>) -> Result<Status, ApiError> {
    let session_id = parse_session_id(id)?;
    if state.engine.sessions().delete_session(session_id) {
        Ok(Status::NoContent)
    } else {
        Err(api_error(Status::NotFound, SESSION_NOT_FOUND))
    }
}

#[post("/sessions/<id>/messages", format = "json", data = "<body>")]
pub async fn post_message(
    id: &str,
    body: Json<MessageRequest>,
    state: &State<AppState>,
) -> ApiResult<MessageResponse> {
    let session_id = parse_session_id(id)?;
    let outcome = state
        .engine
        .handle_message(session_id, &body.text)
        .await
        .map_err(engine_error)?;
    Ok(Json(match outcome {
        Some(reply) => MessageResponse {
            reply: Some(reply.reply),
            pending_transfer: reply.pending_transfer,
        },
        None => MessageResponse {
            reply: None,
            pending_transfer: None,
        },
    }))
}

#[post("/sessions/<id>/transfer/confirm")]
pub fn confirm_transfer(id: &str, state: &State<AppState>) -> ApiResult<TransferResolution> {
    resolve_transfer(id, state, TransferAction::Confirm)
}

#[post("/sessions/<id>/transfer/cancel")]
pub fn cancel_transfer(id: &str, state: &State<AppState>) -> ApiResult<TransferResolution> {
    resolve_transfer(id, state, TransferAction::Cancel)
}

fn resolve_transfer(
    id: &str,
    state: &State<AppState>,
    action: TransferAction,
) -> ApiResult<TransferResolution> {
    let session_id = parse_session_id(id)?;
    let reply = state
        .engine
        .resolve_transfer(session_id, action)
        .map_err(engine_error)?;
    Ok(Json(TransferResolution { reply }))
}

#[post("/sessions/<id>/product-interest", format = "json", data = "<body>")]
pub async fn product_interest(
    id: &str,
    body: Json<ProductInterestRequest>,
    state: &State<AppState>,
) -> ApiResult<MessageResponse> {
    let session_id = parse_session_id(id)?;
    let outcome = state
        .engine
        .product_interest(session_id, &body.product_name)
        .await
        .map_err(engine_error)?;
    Ok(Json(match outcome {
        Some(reply) => MessageResponse {
            reply: Some(reply.reply),
            pending_transfer: reply.pending_transfer,
        },
        None => MessageResponse {
            reply: None,
            pending_transfer: None,
        },
    }))
}

#[post("/sessions/<id>/extract-transfer", format = "json", data = "<body>")]
pub async fn extract_transfer(
    id: &str,
    body: Json<ExtractTransferRequest>,
    state: &State<AppState>,
) -> ApiResult<MessageResponse> {
    let session_id = parse_session_id(id)?;
    let reply = state
        .engine
        .extract_transfer(session_id, &body.text)
        .await
        .map_err(engine_error)?;
    Ok(Json(MessageResponse {
        reply: Some(reply.reply),
        pending_transfer: reply.pending_transfer,
    }))
}

#[post("/customers/<id>/explain")]
pub async fn explain_customer(id: &str, state: &State<AppState>) -> ApiResult<ExplainReport> {
    match state.catalog.lookup(id) {
        Some(profile) => Ok(Json(state.engine.explain(profile).await)),
        None => Err(api_error(Status::NotFound, CUSTOMER_NOT_FOUND)),
    }
}
