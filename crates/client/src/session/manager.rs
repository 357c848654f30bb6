//! The owned session context shared by every outgoing request.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{Identity, Session, SessionStore};
use crate::errors::Result;

/// Events emitted when the session changes, for UI observers that need to
/// react (e.g. navigating back to the login screen after a teardown).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was established or replaced.
    Established(Identity),
    /// The session was cleared (logout or authentication loss).
    Cleared,
}

/// Holder of the current session, warmed from the persisted slot at
/// construction and written through to it on every mutation.
///
/// This is an explicitly owned context: construct one at startup and hand an
/// `Arc` of it to the HTTP client and to any UI code that logs in or out.
/// Token reads snapshot the slot once; writes are last-write-wins.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    /// Create a manager over `store`, restoring any persisted session.
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the slot exists but cannot be read.
    pub fn new(store: Arc<dyn SessionStore>) -> Result<Self> {
        let restored = store.load()?;
        if let Some(session) = &restored {
            debug!(identity = ?session.identity, "restored persisted session");
        }
        let (events, _) = broadcast::channel(16);
        Ok(Self { store, current: RwLock::new(restored), events })
    }

    /// The current auth token, or `None` when unauthenticated. An empty
    /// stored token also counts as unauthenticated.
    pub fn current_token(&self) -> Option<String> {
        self.current
            .read()
            .as_ref()
            .map(|session| session.token.clone())
            .filter(|token| !token.is_empty())
    }

    /// The current role identity, if logged in.
    pub fn current_identity(&self) -> Option<Identity> {
        self.current.read().as_ref().map(|session| session.identity)
    }

    /// Whether a usable token is present.
    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// Establish a session, replacing any previous one, and persist it.
    pub fn set_session(&self, token: impl Into<String>, identity: Identity) -> Result<()> {
        let session = Session::new(token, identity);
        self.store.save(&session)?;
        *self.current.write() = Some(session);

        info!(identity = ?identity, "session established");
        let _ = self.events.send(SessionEvent::Established(identity));
        Ok(())
    }

    /// Erase the session from memory and from the persisted slot, then
    /// notify observers. Safe to call when already logged out.
    pub fn clear_session(&self) -> Result<()> {
        self.store.clear()?;
        let had_session = self.current.write().take().is_some();

        if had_session {
            info!("session cleared");
        }
        let _ = self.events.send(SessionEvent::Cleared);
        Ok(())
    }

    /// Flip the current identity between applicant and publisher, persisting
    /// the change. Returns the new identity, or `None` when logged out.
    pub fn toggle_identity(&self) -> Result<Option<Identity>> {
        let toggled = {
            let current = self.current.read();
            match current.as_ref() {
                Some(session) => Session::new(session.token.clone(), session.identity.toggled()),
                None => return Ok(None),
            }
        };

        self.store.save(&toggled)?;
        let identity = toggled.identity;
        *self.current.write() = Some(toggled);

        info!(identity = ?identity, "identity switched");
        let _ = self.events.send(SessionEvent::Established(identity));
        Ok(Some(identity))
    }

    /// Subscribe to session change events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySessionStore;

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(MemorySessionStore::default())).expect("session manager")
    }

    #[test]
    fn starts_unauthenticated_with_empty_store() {
        let manager = manager();
        assert_eq!(manager.current_token(), None);
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn restores_persisted_session() {
        let store = Arc::new(MemorySessionStore::default());
        store.save(&Session::new("tok-1", Identity::Publisher)).unwrap();

        let manager = SessionManager::new(store).unwrap();
        assert_eq!(manager.current_token(), Some("tok-1".into()));
        assert_eq!(manager.current_identity(), Some(Identity::Publisher));
    }

    #[test]
    fn set_session_writes_through_to_store() {
        let store = Arc::new(MemorySessionStore::default());
        let manager = SessionManager::new(Arc::clone(&store) as Arc<dyn SessionStore>).unwrap();

        manager.set_session("tok-2", Identity::Applicant).unwrap();
        assert_eq!(store.load().unwrap(), Some(Session::new("tok-2", Identity::Applicant)));
    }

    #[test]
    fn clear_session_empties_memory_and_store() {
        let store = Arc::new(MemorySessionStore::default());
        let manager = SessionManager::new(Arc::clone(&store) as Arc<dyn SessionStore>).unwrap();
        manager.set_session("tok-3", Identity::Applicant).unwrap();

        manager.clear_session().unwrap();
        assert_eq!(manager.current_token(), None);
        assert_eq!(store.load().unwrap(), None);

        // Idempotent.
        manager.clear_session().unwrap();
    }

    #[test]
    fn empty_token_counts_as_unauthenticated() {
        let manager = manager();
        manager.set_session("", Identity::Applicant).unwrap();
        assert_eq!(manager.current_token(), None);
    }

    #[test]
    fn toggle_identity_flips_and_persists() {
        let store = Arc::new(MemorySessionStore::default());
        let manager = SessionManager::new(Arc::clone(&store) as Arc<dyn SessionStore>).unwrap();
        manager.set_session("tok", Identity::Applicant).unwrap();

        assert_eq!(manager.toggle_identity().unwrap(), Some(Identity::Publisher));
        assert_eq!(store.load().unwrap().unwrap().identity, Identity::Publisher);
        assert_eq!(manager.toggle_identity().unwrap(), Some(Identity::Applicant));
    }

    #[test]
    fn toggle_identity_without_session_is_none() {
        assert_eq!(manager().toggle_identity().unwrap(), None);
    }

    #[tokio::test]
    async fn observers_receive_session_events() {
        let manager = manager();
        let mut events = manager.subscribe();

        manager.set_session("tok", Identity::Applicant).unwrap();
        manager.clear_session().unwrap();

        assert_eq!(events.recv().await.unwrap(), SessionEvent::Established(Identity::Applicant));
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Cleared);
    }
}
