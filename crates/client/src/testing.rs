//! Test doubles shared by unit and integration tests.

#![allow(clippy::expect_used)]
#![allow(clippy::missing_panics_doc)]

use std::sync::Mutex;

use crate::errors::Result;
use crate::notify::UiNotifier;
use crate::session::{Session, SessionStore};

/// In-memory session slot.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self { slot: Mutex::new(Some(session)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot.lock().expect("session slot poisoned").clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.slot.lock().expect("session slot poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().expect("session slot poisoned") = None;
        Ok(())
    }
}

/// One recorded notifier invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierEvent {
    Toast(String),
    ShowLoading(String),
    HideLoading,
}

/// Notifier that records every call in order, so tests can assert toast
/// contents and loading-indicator symmetry.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotifierEvent>>,
}

impl RecordingNotifier {
    /// All recorded events, in call order.
    pub fn events(&self) -> Vec<NotifierEvent> {
        self.events.lock().expect("notifier log poisoned").clone()
    }

    /// Only the toast messages, in call order.
    pub fn toasts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NotifierEvent::Toast(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Number of `show_loading` calls recorded.
    pub fn shows(&self) -> usize {
        self.events().iter().filter(|e| matches!(e, NotifierEvent::ShowLoading(_))).count()
    }

    /// Number of `hide_loading` calls recorded.
    pub fn hides(&self) -> usize {
        self.events().iter().filter(|e| matches!(e, NotifierEvent::HideLoading)).count()
    }
}

impl UiNotifier for RecordingNotifier {
    fn toast(&self, message: &str) {
        self.events
            .lock()
            .expect("notifier log poisoned")
            .push(NotifierEvent::Toast(message.to_string()));
    }

    fn show_loading(&self, text: &str) {
        self.events
            .lock()
            .expect("notifier log poisoned")
            .push(NotifierEvent::ShowLoading(text.to_string()));
    }

    fn hide_loading(&self) {
        self.events.lock().expect("notifier log poisoned").push(NotifierEvent::HideLoading);
    }
}
