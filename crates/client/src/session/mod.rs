//! Locally persisted identity and session state.
//!
//! A session is the pair of an opaque auth token and a role tag. At most one
//! session exists per process; it lives in a single persisted key-value slot
//! so it survives restarts, and is cleared whenever authentication is lost.

mod file_store;
mod manager;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub use file_store::FileSessionStore;
pub use manager::{SessionEvent, SessionManager};

/// The closed set of role tags a logged-in user can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identity {
    /// Regular user applying to claim items.
    Applicant,
    /// User publishing found items and reviewing claims.
    Publisher,
}

impl Identity {
    /// The other role, for the quick role switch in the demo UI.
    pub fn toggled(self) -> Self {
        match self {
            Self::Applicant => Self::Publisher,
            Self::Publisher => Self::Applicant,
        }
    }
}

/// The persisted credential: auth token plus role identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

impl Session {
    pub fn new(token: impl Into<String>, identity: Identity) -> Self {
        Self { token: token.into(), identity }
    }
}

/// The single persisted slot holding the current session.
///
/// `load` returns `Ok(None)` when no session has been stored; `clear` is
/// idempotent. Implementations must be shareable across concurrent requests.
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if any.
    fn load(&self) -> Result<Option<Session>>;

    /// Persist `session`, replacing any previous one.
    fn save(&self, session: &Session) -> Result<()>;

    /// Erase the persisted session. A no-op when the slot is already empty.
    fn clear(&self) -> Result<()>;
}
