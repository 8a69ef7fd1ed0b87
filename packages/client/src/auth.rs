//! # Session store: who is logged in
//!
//! [`SessionStore`] is the single source of truth for the authenticated
//! identity. It keeps the current [`Session`] in an [`Observable`] and mirrors
//! it into durable storage under [`SESSION_STORAGE_KEY`], so a login survives
//! restarts.
//!
//! ## Lifecycle
//!
//! | Call | Storage | Published value |
//! |------|---------|-----------------|
//! | [`open`](SessionStore::open) / [`initialize`](SessionStore::initialize) | read | persisted session if well-formed, else `None` |
//! | [`set_session`](SessionStore::set_session) | overwrite | `Some(session)` |
//! | [`clear`](SessionStore::clear) | remove | `None` (republished even if already `None`) |
//! | [`login`](SessionStore::login) | via `set_session` on success | `Some(session)` |
//!
//! Storage is written before anything is published. When the write fails the
//! call returns the error and nothing is published, so memory and storage
//! never disagree. Concurrent `set_session` / `clear` calls persist and
//! publish one after another, never interleaved. Observers run inside that
//! critical section and must not call `set_session` or `clear` themselves.
//!
//! Reading a corrupt or unreadable entry at start-up is not an error: the
//! store starts logged out.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use api::{ApiError, AuthBackend, Credentials, RegisterRequest, Session};
use store::{KeyValueStore, StoreError};
use thiserror::Error;

use crate::observable::{Observable, SubscriptionId};

/// Storage key holding the serialized session.
pub const SESSION_STORAGE_KEY: &str = "currentUser";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not persist session: {0}")]
    Storage(#[from] StoreError),
    #[error("could not encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: Observable<Option<Session>>,
    /// Held across persist + publish.
    write: Mutex<()>,
}

impl SessionStore {
    /// A logged-out store. Call [`initialize`](Self::initialize) to load any
    /// persisted session.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            current: Observable::new(None),
            write: Mutex::new(()),
        }
    }

    /// Construct and initialize in one step.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let store = Self::new(storage);
        store.initialize();
        store
    }

    /// Load the persisted session, if any, and publish it.
    pub fn initialize(&self) {
        let session = self.read_persisted();
        if let Some(session) = &session {
            tracing::debug!(user_id = session.user_id, "restored persisted session");
        }
        self.current.set(session);
    }

    fn read_persisted(&self) -> Option<Session> {
        let raw = match self.storage.get(SESSION_STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted session");
                return None;
            }
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if session.is_well_formed() => Some(session),
            Ok(_) => {
                tracing::warn!("ignoring persisted session with blank token or email");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed persisted session");
                None
            }
        }
    }

    /// The latest published session.
    pub fn current(&self) -> Option<Session> {
        self.current.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.with(Option::is_some)
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .with(|session| session.as_ref().map(|s| s.token.clone()))
    }

    pub fn user_id(&self) -> Option<i64> {
        self.current
            .with(|session| session.as_ref().map(|s| s.user_id))
    }

    /// Observe the session: called now with the current value, then on every
    /// `set_session` / `clear`.
    pub fn subscribe(
        &self,
        observer: impl Fn(&Option<Session>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.current.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.current.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.current.observer_count()
    }

    /// Persist `session` (replacing any previous one) and publish it.
    pub fn set_session(&self, session: Session) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&session)?;
        let _write = self.write.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage.set(SESSION_STORAGE_KEY, &raw)?;
        self.current.set(Some(session));
        Ok(())
    }

    /// Remove the persisted session and publish `None`.
    pub fn clear(&self) -> Result<(), StoreError> {
        let _write = self.write.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage.remove(SESSION_STORAGE_KEY)?;
        self.current.set(None);
        Ok(())
    }

    /// Exchange credentials through `backend` and store the resulting session.
    pub async fn login(
        &self,
        backend: &dyn AuthBackend,
        credentials: &Credentials,
    ) -> Result<Session, SessionError> {
        let session = backend.login(credentials).await?;
        self.set_session(session.clone())?;
        tracing::info!(user_id = session.user_id, role = %session.role, "logged in");
        Ok(session)
    }

    /// Create an account. Registration does not log the user in.
    pub async fn register(
        &self,
        backend: &dyn AuthBackend,
        request: &RegisterRequest,
    ) -> Result<(), SessionError> {
        backend.register(request).await?;
        tracing::info!(email = %request.email, "registered account");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        let user_id = self.user_id();
        self.clear()?;
        tracing::info!(?user_id, "logged out");
        Ok(())
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("user_id", &self.user_id())
            .finish_non_exhaustive()
    }
}
