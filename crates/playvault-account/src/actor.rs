//! Account actor: an isolated Tokio task that owns one user's state.
//!
//! Each account address gets its own task, communicating with the
//! outside world through an mpsc command channel. Commands run to
//! completion — including their storage write — before the next one on
//! the same address is admitted, which is exactly the per-account
//! sequential consistency the rest of the backend relies on.

use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot};

use playvault_protocol::{
    AccountAddress, ProfileSnapshot, SaveSlots, SlotId, SlotRecord,
};
use playvault_store::{Clock, Store};

use crate::record::AccountRecord;
use crate::{credentials, AccountError, VerifyOutcome};

/// Commands sent to an account actor through its channel.
///
/// Each variant carries a `oneshot::Sender` reply channel — the caller
/// sends a command and awaits the response on it.
pub(crate) enum AccountCommand {
    Create {
        email: String,
        password: String,
        username: String,
        reply: oneshot::Sender<Result<(), AccountError>>,
    },
    Authenticate {
        password: String,
        reply: oneshot::Sender<Result<bool, AccountError>>,
    },
    GetProfile {
        reply: oneshot::Sender<Result<ProfileSnapshot, AccountError>>,
    },
    UpdateProfile {
        fields: Map<String, Value>,
        reply: oneshot::Sender<Result<(), AccountError>>,
    },
    SetVerificationToken {
        token: String,
        reply: oneshot::Sender<Result<(), AccountError>>,
    },
    VerifyEmail {
        token: String,
        reply: oneshot::Sender<Result<VerifyOutcome, AccountError>>,
    },
    UpdateGameData {
        namespace: String,
        document: Map<String, Value>,
        reply: oneshot::Sender<Result<(), AccountError>>,
    },
    GetGameData {
        namespace: String,
        reply: oneshot::Sender<Result<Value, AccountError>>,
    },
    GetSlots {
        reply: oneshot::Sender<Result<SaveSlots, AccountError>>,
    },
    SaveSlot {
        slot: SlotId,
        data: Value,
        name: Option<String>,
        reply: oneshot::Sender<Result<(), AccountError>>,
    },
    LoadSlot {
        slot: SlotId,
        reply: oneshot::Sender<Result<Option<SlotRecord>, AccountError>>,
    },
    DeleteSlot {
        slot: SlotId,
        reply: oneshot::Sender<Result<(), AccountError>>,
    },
}

/// Handle to a running account actor.
///
/// Cheap to clone — it's an `mpsc::Sender` plus the address. The
/// [`AccountDirectory`](crate::AccountDirectory) holds one per address.
#[derive(Clone)]
pub struct AccountHandle {
    address: AccountAddress,
    sender: mpsc::Sender<AccountCommand>,
}

impl AccountHandle {
    /// The address this handle points at.
    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    /// Whether the actor behind this handle has stopped.
    pub(crate) fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Sends one command and awaits its reply, mapping a dead channel
    /// (either direction) to `Unavailable`.
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, AccountError>>) -> AccountCommand,
    ) -> Result<T, AccountError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(make(reply_tx))
            .await
            .map_err(|_| AccountError::Unavailable(self.address.clone()))?;
        reply_rx
            .await
            .map_err(|_| AccountError::Unavailable(self.address.clone()))?
    }

    /// Creates the account. Fails with `AlreadyExists` if state is
    /// already present at this address — a second call never overwrites
    /// the first account.
    pub async fn create(
        &self,
        email: String,
        password: String,
        username: String,
    ) -> Result<(), AccountError> {
        self.request(|reply| AccountCommand::Create {
            email,
            password,
            username,
            reply,
        })
        .await
    }

    /// Checks a password. Returns `false` — not an error — both for a
    /// wrong password and for a missing account. Side-effect free.
    pub async fn authenticate(
        &self,
        password: String,
    ) -> Result<bool, AccountError> {
        self.request(|reply| AccountCommand::Authenticate { password, reply })
            .await
    }

    /// The sanitized snapshot (everything but the password hash).
    pub async fn profile(&self) -> Result<ProfileSnapshot, AccountError> {
        self.request(|reply| AccountCommand::GetProfile { reply })
            .await
    }

    /// Shallow, overwrite-per-key profile merge. A no-op on a missing
    /// account.
    pub async fn update_profile(
        &self,
        fields: Map<String, Value>,
    ) -> Result<(), AccountError> {
        self.request(|reply| AccountCommand::UpdateProfile { fields, reply })
            .await
    }

    /// Stores a verification token (24h expiry), replacing any previous
    /// one. A no-op on a missing account.
    pub async fn set_verification_token(
        &self,
        token: String,
    ) -> Result<(), AccountError> {
        self.request(|reply| AccountCommand::SetVerificationToken {
            token,
            reply,
        })
        .await
    }

    /// Attempts the one-way email-verification transition.
    pub async fn verify_email(
        &self,
        token: String,
    ) -> Result<VerifyOutcome, AccountError> {
        self.request(|reply| AccountCommand::VerifyEmail { token, reply })
            .await
    }

    /// Shallow-merges a partial document into one game-data namespace.
    /// A no-op on a missing account.
    pub async fn update_game_data(
        &self,
        namespace: String,
        document: Map<String, Value>,
    ) -> Result<(), AccountError> {
        self.request(|reply| AccountCommand::UpdateGameData {
            namespace,
            document,
            reply,
        })
        .await
    }

    /// The stored namespace document, or its default when absent.
    pub async fn game_data(
        &self,
        namespace: String,
    ) -> Result<Value, AccountError> {
        self.request(|reply| AccountCommand::GetGameData { namespace, reply })
            .await
    }

    /// The full slot registry (empty registry for a missing account).
    pub async fn save_slots(&self) -> Result<SaveSlots, AccountError> {
        self.request(|reply| AccountCommand::GetSlots { reply }).await
    }

    /// Writes a slot unconditionally and marks it last-played.
    pub async fn save_slot(
        &self,
        slot: SlotId,
        data: Value,
        name: Option<String>,
    ) -> Result<(), AccountError> {
        self.request(|reply| AccountCommand::SaveSlot {
            slot,
            data,
            name,
            reply,
        })
        .await
    }

    /// One slot's contents, `None` when empty.
    pub async fn load_slot(
        &self,
        slot: SlotId,
    ) -> Result<Option<SlotRecord>, AccountError> {
        self.request(|reply| AccountCommand::LoadSlot { slot, reply })
            .await
    }

    /// Empties a slot. Does not touch `lastPlayedSlot`.
    pub async fn delete_slot(&self, slot: SlotId) -> Result<(), AccountError> {
        self.request(|reply| AccountCommand::DeleteSlot { slot, reply })
            .await
    }
}

/// The actor state. Runs inside a Tokio task.
struct AccountActor<S: Store, K: Clock> {
    address: AccountAddress,
    store: S,
    clock: K,
    /// `None` until a successful `Create` (or when nothing was found in
    /// storage at spawn).
    record: Option<AccountRecord>,
    receiver: mpsc::Receiver<AccountCommand>,
}

impl<S: Store, K: Clock> AccountActor<S, K> {
    /// Runs the command loop until all handles are dropped.
    async fn run(mut self) {
        // Load once; everything after goes through the in-memory copy.
        match self.load().await {
            Ok(record) => self.record = record,
            Err(e) => {
                // Exiting closes the channel; callers observe
                // `Unavailable` and the directory respawns on next use.
                tracing::error!(
                    address = %self.address,
                    error = %e,
                    "failed to load account record, actor exiting"
                );
                return;
            }
        }
        tracing::debug!(
            address = %self.address,
            exists = self.record.is_some(),
            "account actor started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            self.handle(cmd).await;
            if self.record.is_none() {
                // No account lives at this address. Close the queue —
                // anything already sent still drains — and let the task
                // end instead of idling forever on a probed address.
                // The directory drops closed handles on its next
                // lookup; storage stays authoritative, so a later
                // lookup simply respawns.
                self.receiver.close();
            }
        }

        tracing::debug!(address = %self.address, "account actor stopped");
    }

    async fn handle(&mut self, cmd: AccountCommand) {
        match cmd {
            AccountCommand::Create {
                email,
                password,
                username,
                reply,
            } => {
                let result = self.handle_create(email, password, username).await;
                let _ = reply.send(result);
            }
            AccountCommand::Authenticate { password, reply } => {
                let result = Ok(self
                    .record
                    .as_ref()
                    .is_some_and(|r| {
                        credentials::verify_password(&password, &r.password_hash)
                    }));
                let _ = reply.send(result);
            }
            AccountCommand::GetProfile { reply } => {
                let result = self
                    .record
                    .as_ref()
                    .map(|r| r.snapshot(&self.address))
                    .ok_or_else(|| {
                        AccountError::NotFound(self.address.clone())
                    });
                let _ = reply.send(result);
            }
            AccountCommand::UpdateProfile { fields, reply } => {
                let result = self
                    .mutate(|record, _now| record.apply_profile(&fields))
                    .await;
                let _ = reply.send(result);
            }
            AccountCommand::SetVerificationToken { token, reply } => {
                let result = self
                    .mutate(|record, now| {
                        record.set_verification_token(token, now);
                        true
                    })
                    .await;
                let _ = reply.send(result);
            }
            AccountCommand::VerifyEmail { token, reply } => {
                let result = self.handle_verify_email(&token).await;
                let _ = reply.send(result);
            }
            AccountCommand::UpdateGameData {
                namespace,
                document,
                reply,
            } => {
                let result = self
                    .mutate(|record, now| {
                        record.merge_game_data(&namespace, document, now);
                        true
                    })
                    .await;
                let _ = reply.send(result);
            }
            AccountCommand::GetGameData { namespace, reply } => {
                let result = Ok(match &self.record {
                    Some(record) => record.game_data_or_default(&namespace),
                    None => crate::default_game_data(&namespace),
                });
                let _ = reply.send(result);
            }
            AccountCommand::GetSlots { reply } => {
                let result = Ok(self
                    .record
                    .as_ref()
                    .map(|r| r.save_slots.clone())
                    .unwrap_or_default());
                let _ = reply.send(result);
            }
            AccountCommand::SaveSlot {
                slot,
                data,
                name,
                reply,
            } => {
                let result = self
                    .mutate(|record, now| {
                        record.save_slot(slot, data, name, now);
                        true
                    })
                    .await;
                let _ = reply.send(result);
            }
            AccountCommand::LoadSlot { slot, reply } => {
                let result = Ok(self
                    .record
                    .as_ref()
                    .and_then(|r| r.save_slots.get(slot).clone()));
                let _ = reply.send(result);
            }
            AccountCommand::DeleteSlot { slot, reply } => {
                let result = self
                    .mutate(|record, _now| {
                        record.save_slots.get_mut(slot).take().is_some()
                    })
                    .await;
                let _ = reply.send(result);
            }
        }
    }

    async fn handle_create(
        &mut self,
        email: String,
        password: String,
        username: String,
    ) -> Result<(), AccountError> {
        if self.record.is_some() {
            return Err(AccountError::AlreadyExists(self.address.clone()));
        }
        let password_hash = credentials::hash_password(&password)?;
        let record = AccountRecord::new(
            email,
            username,
            password_hash,
            self.clock.now_millis(),
        );
        // Persist before exposing: a storage failure here means the
        // account was never created.
        self.persist(&record).await?;
        tracing::info!(address = %self.address, "account created");
        self.record = Some(record);
        Ok(())
    }

    async fn handle_verify_email(
        &mut self,
        token: &str,
    ) -> Result<VerifyOutcome, AccountError> {
        let now = self.clock.now_millis();
        let Some(record) = self.record.as_mut() else {
            return Err(AccountError::NotFound(self.address.clone()));
        };
        let outcome = record.verify_email(token, now);
        if outcome == VerifyOutcome::Verified {
            let record = record.clone();
            self.persist(&record).await?;
            tracing::info!(address = %self.address, "email verified");
        }
        Ok(outcome)
    }

    /// Applies a mutation to the record (silent no-op when no account
    /// exists) and persists if the closure reports a change.
    async fn mutate(
        &mut self,
        apply: impl FnOnce(&mut AccountRecord, u64) -> bool,
    ) -> Result<(), AccountError> {
        let now = self.clock.now_millis();
        let Some(record) = self.record.as_mut() else {
            return Ok(());
        };
        if apply(record, now) {
            let record = record.clone();
            self.persist(&record).await?;
        }
        Ok(())
    }

    async fn load(&self) -> Result<Option<AccountRecord>, AccountError> {
        match self.store.get(self.address.as_str()).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn persist(&self, record: &AccountRecord) -> Result<(), AccountError> {
        let bytes = serde_json::to_vec(record)?;
        self.store.put(self.address.as_str(), bytes).await?;
        Ok(())
    }
}

/// Spawns a new account actor task and returns its handle.
pub(crate) fn spawn_account<S: Store, K: Clock>(
    address: AccountAddress,
    store: S,
    clock: K,
    channel_size: usize,
) -> AccountHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = AccountActor {
        address: address.clone(),
        store,
        clock,
        record: None,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    AccountHandle {
        address,
        sender: tx,
    }
}
