//! Session actor: one Tokio task per session token.
//!
//! Much smaller than the account actor — a session has exactly three
//! operations (create, resolve, destroy) and a three-field record. The
//! actor still buys the same guarantee: all operations on one token are
//! serialized, so a resolve can never race a destroy on the same
//! session.

use tokio::sync::{mpsc, oneshot};

use playvault_protocol::{AccountAddress, SessionToken};
use playvault_store::{Clock, Store};

use crate::record::SessionRecord;
use crate::{SessionConfig, SessionError};

pub(crate) enum SessionCommand {
    Create {
        account: AccountAddress,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    Resolve {
        reply: oneshot::Sender<Result<Option<AccountAddress>, SessionError>>,
    },
    Destroy {
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
}

/// Handle to a running session actor.
#[derive(Clone)]
pub struct SessionHandle {
    token: SessionToken,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// The token this handle points at.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, SessionError>>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(make(reply_tx))
            .await
            .map_err(|_| SessionError::Unavailable(self.token.clone()))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Unavailable(self.token.clone()))?
    }

    /// Binds this session to an account and starts its TTL window.
    /// Overwrites any previous record at this token.
    pub async fn create(
        &self,
        account: AccountAddress,
    ) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Create { account, reply })
            .await
    }

    /// Resolves the session to its account, sliding the deadline
    /// forward. `None` means unknown or expired — an expired record is
    /// purged from storage on the spot.
    pub async fn resolve(
        &self,
    ) -> Result<Option<AccountAddress>, SessionError> {
        self.request(|reply| SessionCommand::Resolve { reply }).await
    }

    /// Ends the session. Idempotent — destroying an unknown or already
    /// destroyed session succeeds.
    pub async fn destroy(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Destroy { reply }).await
    }
}

struct SessionActor<S: Store, K: Clock> {
    token: SessionToken,
    store: S,
    clock: K,
    config: SessionConfig,
    record: Option<SessionRecord>,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl<S: Store, K: Clock> SessionActor<S, K> {
    async fn run(mut self) {
        match self.load().await {
            Ok(record) => self.record = record,
            Err(e) => {
                tracing::error!(
                    token = %self.token,
                    error = %e,
                    "failed to load session record, actor exiting"
                );
                return;
            }
        }

        while let Some(cmd) = self.receiver.recv().await {
            self.handle(cmd).await;
        }
    }

    async fn handle(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Create { account, reply } => {
                let result = self.handle_create(account).await;
                let _ = reply.send(result);
            }
            SessionCommand::Resolve { reply } => {
                let result = self.handle_resolve().await;
                let _ = reply.send(result);
            }
            SessionCommand::Destroy { reply } => {
                let result = self.handle_destroy().await;
                let _ = reply.send(result);
            }
        }
    }

    async fn handle_create(
        &mut self,
        account: AccountAddress,
    ) -> Result<(), SessionError> {
        let record = SessionRecord::new(
            account,
            self.clock.now_millis(),
            self.config.ttl_millis(),
        );
        self.persist(&record).await?;
        tracing::info!(
            token = %self.token,
            account = %record.account_address,
            "session created"
        );
        self.record = Some(record);
        Ok(())
    }

    async fn handle_resolve(
        &mut self,
    ) -> Result<Option<AccountAddress>, SessionError> {
        let now = self.clock.now_millis();
        let Some(record) = self.record.as_mut() else {
            return Ok(None);
        };
        if record.is_expired(now) {
            // Purge, don't just report: once past the deadline the
            // record is deleted, so a clock moving backward later can't
            // bring the session back.
            tracing::info!(token = %self.token, "session expired, purging");
            self.store.delete(self.token.as_str()).await?;
            self.record = None;
            return Ok(None);
        }
        record.slide(now, self.config.ttl_millis());
        let record = record.clone();
        self.persist(&record).await?;
        Ok(Some(record.account_address))
    }

    async fn handle_destroy(&mut self) -> Result<(), SessionError> {
        self.store.delete(self.token.as_str()).await?;
        if self.record.take().is_some() {
            tracing::info!(token = %self.token, "session destroyed");
        }
        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        match self.store.get(self.token.as_str()).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn persist(&self, record: &SessionRecord) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec(record)?;
        self.store.put(self.token.as_str(), bytes).await?;
        Ok(())
    }
}

pub(crate) fn spawn_session<S: Store, K: Clock>(
    token: SessionToken,
    store: S,
    clock: K,
    config: SessionConfig,
    channel_size: usize,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = SessionActor {
        token: token.clone(),
        store,
        clock,
        config,
        record: None,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    SessionHandle { token, sender: tx }
}
