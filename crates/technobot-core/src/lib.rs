//! Core domain logic for TECHNOBOT.
//!
//! This crate owns the customer catalog, session handling, the
//! pending-transfer state machine, and the chat dispatch engine used by the
//! server.

pub mod catalog;
pub mod confirm;
pub mod engine;
pub mod error;
pub mod explain;
pub mod intent;
pub mod sessions;
pub mod transfer;
pub mod types;

pub use catalog::{CustomerCatalog, CustomerOption, clean_product_name};
pub use confirm::{ConfirmKeyword, match_keyword};
pub use engine::{ChatEngine, ChatReply, ExplainReport};
pub use error::TechnobotCoreError;
pub use explain::{Explainer, FeatureImportance};
pub use sessions::SessionStore;
pub use transfer::TransferAction;
pub use types::{ConversationTurn, CustomerProfile, Role, Session, SessionSummary};
