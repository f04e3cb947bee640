//! Core data types shared across the chat API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use technobot_protocol::{SessionId, TransferDetails};

/// Message stored in a session transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    /// Role that produced the turn.
    pub role: Role,
    /// Turn content.
    pub content: String,
    /// Timestamp for the turn.
    pub created_at: DateTime<Utc>,
}

/// Speaker role for a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User-authored turn.
    User,
    /// Assistant-authored turn.
    Assistant,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Label used in the mirrored history lines sent to the intent endpoint.
    pub fn history_label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }

    /// Parse a role from a lowercase string.
    pub fn parse(value: &str) -> Self {
        if value == "assistant" {
            Role::Assistant
        } else {
            Role::User
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(value))
    }
}

/// Full session transcript plus the session's pending transfer slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Session identifier.
    pub id: SessionId,
    /// Selected customer profile, if any.
    pub customer_id: Option<String>,
    /// Ordered list of turns in the session.
    pub turns: Vec<ConversationTurn>,
    /// Mirror of the transcript as "User: …" / "Assistant: …" lines,
    /// forwarded to the intent endpoint as context.
    pub history: Vec<String>,
    /// Uncommitted transfer awaiting confirmation, at most one per session.
    pub pending_transfer: Option<TransferDetails>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Summary view of a session for listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    /// Session identifier.
    pub id: SessionId,
    /// Selected customer profile, if any.
    pub customer_id: Option<String>,
    /// Count of turns stored.
    pub turn_count: usize,
    /// Whether a transfer is awaiting confirmation.
    pub has_pending_transfer: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Read-only customer profile sourced from the recommendations CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerProfile {
    /// Customer identifier.
    pub user_id: String,
    /// Customer age in years.
    pub age: u32,
    /// Occupation label.
    pub occupation: String,
    /// Marital status label.
    pub marital_status: String,
    /// Whether the prior recommendation succeeded.
    pub recommendation_success: bool,
    /// Count of products the customer already adopted.
    pub adopted_products_count: u32,
    /// Last-update timestamp, kept as the source string.
    pub timestamp: String,
    /// Up to three recommended products, tier suffix already stripped.
    pub recommended_products: Vec<String>,
}
