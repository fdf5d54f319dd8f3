//! Directory of running session actors.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use playvault_protocol::{AccountAddress, SessionToken};
use playvault_store::{Clock, Store};

use crate::actor::{spawn_session, SessionHandle};
use crate::{SessionConfig, SessionError};

/// Command-channel depth for each session actor. Sessions see far less
/// traffic than accounts, so a shallow queue is plenty.
const DEFAULT_CHANNEL_SIZE: usize = 16;

/// Maps session tokens to their running actors, spawning lazily.
///
/// Unlike accounts, session entries are actively evicted: a destroy, or
/// a resolve that finds the session gone, drops the registry entry so
/// dead sessions don't pile up for the whole process lifetime.
pub struct SessionDirectory<S: Store, K: Clock> {
    store: S,
    clock: K,
    config: SessionConfig,
    sessions: Arc<Mutex<HashMap<SessionToken, SessionHandle>>>,
}

impl<S: Store, K: Clock> Clone for SessionDirectory<S, K> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<S: Store, K: Clock> SessionDirectory<S, K> {
    pub fn new(store: S, clock: K, config: SessionConfig) -> Self {
        Self {
            store,
            clock,
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Mints a fresh token and binds a new session to `account`.
    pub async fn create_session(
        &self,
        account: AccountAddress,
    ) -> Result<SessionToken, SessionError> {
        let token = SessionToken::generate();
        let handle = self.handle(&token).await;
        handle.create(account).await?;
        Ok(token)
    }

    /// Resolves a token to its account, sliding the TTL window.
    /// `None` means unknown or expired; either way the registry entry
    /// is evicted.
    pub async fn resolve(
        &self,
        token: &SessionToken,
    ) -> Result<Option<AccountAddress>, SessionError> {
        let handle = self.handle(token).await;
        let resolved = handle.resolve().await?;
        if resolved.is_none() {
            self.evict(token).await;
        }
        Ok(resolved)
    }

    /// Destroys a session (idempotent) and evicts its actor.
    pub async fn destroy(
        &self,
        token: &SessionToken,
    ) -> Result<(), SessionError> {
        let handle = self.handle(token).await;
        handle.destroy().await?;
        self.evict(token).await;
        Ok(())
    }

    async fn handle(&self, token: &SessionToken) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;
        if let Some(handle) = sessions.get(token) {
            if !handle.is_closed() {
                return handle.clone();
            }
        }
        let handle = spawn_session(
            token.clone(),
            self.store.clone(),
            self.clock.clone(),
            self.config.clone(),
            DEFAULT_CHANNEL_SIZE,
        );
        sessions.insert(token.clone(), handle.clone());
        handle
    }

    async fn evict(&self, token: &SessionToken) {
        self.sessions.lock().await.remove(token);
    }

    /// Number of session actors currently registered.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
