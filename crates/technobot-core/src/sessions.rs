//! In-memory session store with session-scoped pending transfers.

use crate::error::TechnobotCoreError;
use crate::types::{ConversationTurn, Role, Session, SessionSummary};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use technobot_protocol::{SessionId, TransferDetails};
use uuid::Uuid;

/// Session storage facade used by the chat engine and the server.
///
/// Each session owns its own pending-transfer slot; concurrent sessions
/// never see each other's in-flight transfer.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session, optionally bound to a customer profile.
    pub fn create_session(&self, customer_id: Option<String>) -> SessionId {
        let session = Session {
            id: Uuid::new_v4(),
            customer_id: customer_id.clone(),
            turns: Vec::new(),
            history: Vec::new(),
            pending_transfer: None,
            created_at: chrono::Utc::now(),
        };
        info!(
            "created session (session_id={}, customer_set={})",
            session.id,
            customer_id.is_some()
        );
        let session_id = session.id;
        self.sessions.write().insert(session.id, session);
        session_id
    }

    /// Fetch a full session snapshot by id.
    pub fn get_session(&self, session_id: SessionId) -> Result<Session, TechnobotCoreError> {
        self.sessions
            .read()
            .get(&session_id)
            .cloned()
            .ok_or(TechnobotCoreError::UnknownSession(session_id))
    }

    /// List all session summaries, newest first.
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> = self
            .sessions
            .read()
            .values()
            .map(|session| SessionSummary {
                id: session.id,
                customer_id: session.customer_id.clone(),
                turn_count: session.turns.len(),
                has_pending_transfer: session.pending_transfer.is_some(),
                created_at: session.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// Delete a session.
    pub fn delete_session(&self, session_id: SessionId) -> bool {
        info!("deleting session (session_id={})", session_id);
        self.sessions.write().remove(&session_id).is_some()
    }

    /// Append a turn and mirror it into the string history log.
    pub fn append_turn(
        &self,
        session_id: SessionId,
        role: Role,
        content: &str,
    ) -> Result<(), TechnobotCoreError> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(&session_id)
            .ok_or(TechnobotCoreError::UnknownSession(session_id))?;
        debug!(
            "appending turn (session_id={}, role={}, content_len={})",
            session_id,
            role.as_str(),
            content.len()
        );
        session.turns.push(ConversationTurn {
            role,
            content: content.to_string(),
            created_at: chrono::Utc::now(),
        });
        session
            .history
            .push(format!("{}: {}", role.history_label(), content));
        Ok(())
    }

    /// Snapshot of the mirrored history lines for the next intent call.
    pub fn history(&self, session_id: SessionId) -> Result<Vec<String>, TechnobotCoreError> {
        self.sessions
            .read()
            .get(&session_id)
            .map(|session| session.history.clone())
            .ok_or(TechnobotCoreError::UnknownSession(session_id))
    }

    /// Reset the transcript, keeping the pending transfer untouched.
    ///
    /// The product-interest shortcut starts a fresh conversation.
    pub fn reset_transcript(&self, session_id: SessionId) -> Result<(), TechnobotCoreError> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(&session_id)
            .ok_or(TechnobotCoreError::UnknownSession(session_id))?;
        session.turns.clear();
        session.history.clear();
        Ok(())
    }

    /// Store a pending transfer, silently overwriting an unresolved one.
    pub fn set_pending(
        &self,
        session_id: SessionId,
        details: TransferDetails,
    ) -> Result<(), TechnobotCoreError> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(&session_id)
            .ok_or(TechnobotCoreError::UnknownSession(session_id))?;
        if session.pending_transfer.is_some() {
            debug!(
                "overwriting unresolved pending transfer (session_id={})",
                session_id
            );
        }
        session.pending_transfer = Some(details);
        Ok(())
    }

    /// Take and clear the pending transfer, if any.
    pub fn take_pending(
        &self,
        session_id: SessionId,
    ) -> Result<Option<TransferDetails>, TechnobotCoreError> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(&session_id)
            .ok_or(TechnobotCoreError::UnknownSession(session_id))?;
        Ok(session.pending_transfer.take())
    }

    /// Current pending transfer without clearing it.
    pub fn pending(
        &self,
        session_id: SessionId,
    ) -> Result<Option<TransferDetails>, TechnobotCoreError> {
        self.sessions
            .read()
            .get(&session_id)
            .map(|session| session.pending_transfer.clone())
            .ok_or(TechnobotCoreError::UnknownSession(session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::error::TechnobotCoreError;
    use crate::types::Role;
    use pretty_assertions::assert_eq;
    use technobot_protocol::{Amount, TransferDetails};
    use uuid::Uuid;

    #[test]
    fn creates_and_lists_sessions() {
        let store = SessionStore::new();
        let session_id = store.create_session(Some("a1b2c3d4".to_string()));
        let summaries = store.list_sessions();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, session_id);
        assert_eq!(summaries[0].customer_id, Some("a1b2c3d4".to_string()));
        assert_eq!(summaries[0].has_pending_transfer, false);
    }

    #[test]
    fn unknown_session_is_a_typed_error() {
        let store = SessionStore::new();
        let missing = Uuid::new_v4();
        let err = store.get_session(missing).expect_err("missing");
        match err {
            TechnobotCoreError::UnknownSession(id) => assert_eq!(id, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn turns_mirror_into_history_lines() {
        let store = SessionStore::new();
        let session_id = store.create_session(None);
        store
            .append_turn(session_id, Role::User, "xin chào")
            .expect("append");
        store
            .append_turn(session_id, Role::Assistant, "chào bạn")
            .expect("append");

        let session = store.get_session(session_id).expect("session");
        assert_eq!(session.turns.len(), 2);
        assert_eq!(
            session.history,
            vec![
                "User: xin chào".to_string(),
                "Assistant: chào bạn".to_string(),
            ]
        );
    }

    #[test]
    fn pending_transfer_is_session_scoped() {
        let store = SessionStore::new();
        let first = store.create_session(None);
        let second = store.create_session(None);

        let details = TransferDetails {
            amount: Amount::from(500_000u64),
            ..TransferDetails::default()
        };
        store.set_pending(first, details.clone()).expect("set");

        assert_eq!(store.pending(first).expect("pending"), Some(details));
        assert_eq!(store.pending(second).expect("pending"), None);

        assert_eq!(store.take_pending(first).expect("take").is_some(), true);
        assert_eq!(store.pending(first).expect("pending"), None);
    }

    #[test]
    fn new_pending_overwrites_unresolved_one() {
        let store = SessionStore::new();
        let session_id = store.create_session(None);

        let first = TransferDetails {
            amount: Amount::from(100u64),
            ..TransferDetails::default()
        };
        let second = TransferDetails {
            amount: Amount::from(200u64),
            ..TransferDetails::default()
        };
        store.set_pending(session_id, first).expect("set");
        store.set_pending(session_id, second.clone()).expect("set");
        assert_eq!(store.pending(session_id).expect("pending"), Some(second));
    }

    #[test]
    fn reset_transcript_keeps_pending_transfer() {
        let store = SessionStore::new();
        let session_id = store.create_session(None);
        store
            .append_turn(session_id, Role::User, "chuyển tiền")
            .expect("append");
        store
            .set_pending(session_id, TransferDetails::default())
            .expect("set");

        store.reset_transcript(session_id).expect("reset");
        let session = store.get_session(session_id).expect("session");
        assert_eq!(session.turns.len(), 0);
        assert_eq!(session.history.len(), 0);
        assert_eq!(session.pending_transfer.is_some(), true);
    }
}
