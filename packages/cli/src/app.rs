//! Shared handles built once per invocation.

use std::sync::Arc;

use anyhow::{Context, Result};
use api::{HttpApi, Session};
use client::{make_session_storage, NotificationCache, SessionStore};

use crate::settings::Settings;

pub struct App {
    pub api: Arc<HttpApi>,
    pub session: Arc<SessionStore>,
    settings: Settings,
}

impl App {
    /// Open the persisted session and point the HTTP client at the API. The
    /// bearer token follows the session from here on.
    pub fn open(settings: Settings) -> Result<Self> {
        let api = HttpApi::with_timeout(&settings.api.base_url, settings.timeout())
            .with_context(|| format!("invalid API base URL {}", settings.api.base_url))?;
        let api = Arc::new(api);

        let storage = make_session_storage(settings.storage.dir.clone());
        let session = Arc::new(SessionStore::open(storage));

        let token_api = api.clone();
        session.subscribe(move |current| {
            token_api.set_bearer_token(current.as_ref().map(|s| s.token.clone()));
        });

        Ok(Self {
            api,
            session,
            settings,
        })
    }

    pub fn require_session(&self) -> Result<Session> {
        self.session
            .current()
            .context("not logged in, run `staykonnect login` first")
    }

    pub fn notification_cache(&self) -> Arc<NotificationCache> {
        NotificationCache::with_period(
            self.api.clone(),
            self.session.clone(),
            self.settings.poll_interval(),
        )
    }
}
