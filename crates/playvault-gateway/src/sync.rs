//! The sync coordinator: everything behind a bearer token.
//!
//! Every method starts with the same step: resolve the session token to
//! an account address. That resolve is also what keeps the session
//! alive — each authorized call slides the session's expiry window.
//! After that, the coordinator is a thin dispatch onto the account
//! actor; no state of its own.

use serde_json::{Map, Value};

use playvault_account::AccountDirectory;
use playvault_protocol::{
    AccountAddress, OkResponse, ProfileSnapshot, SaveSlotRequest, SaveSlots,
    SessionToken, SlotId, SlotRecord,
};
use playvault_session::SessionDirectory;
use playvault_store::{Clock, Store};

use crate::GatewayError;

/// Authorized access to profile, game data, and save slots.
pub struct SyncCoordinator<S: Store, K: Clock> {
    accounts: AccountDirectory<S, K>,
    sessions: SessionDirectory<S, K>,
}

impl<S: Store, K: Clock> Clone for SyncCoordinator<S, K> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl<S: Store, K: Clock> SyncCoordinator<S, K> {
    pub fn new(
        accounts: AccountDirectory<S, K>,
        sessions: SessionDirectory<S, K>,
    ) -> Self {
        Self { accounts, sessions }
    }

    /// Resolves a bearer token to the account it authenticates as,
    /// sliding the session's expiry. The single authorization gate for
    /// every method below.
    pub async fn authorize(
        &self,
        token: &SessionToken,
    ) -> Result<AccountAddress, GatewayError> {
        self.sessions
            .resolve(token)
            .await?
            .ok_or(GatewayError::Unauthorized)
    }

    /// The authorized account's full sanitized profile.
    pub async fn profile(
        &self,
        token: &SessionToken,
    ) -> Result<ProfileSnapshot, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        Ok(account.profile().await?)
    }

    /// Merges client profile state (shallow, fixed key set).
    pub async fn sync_profile(
        &self,
        token: &SessionToken,
        fields: Map<String, Value>,
    ) -> Result<OkResponse, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        account.update_profile(fields).await?;
        Ok(OkResponse::ok())
    }

    /// Shallow-merges a partial document into one game-data namespace.
    pub async fn update_game_data(
        &self,
        token: &SessionToken,
        namespace: &str,
        document: Map<String, Value>,
    ) -> Result<OkResponse, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        account
            .update_game_data(namespace.to_string(), document)
            .await?;
        Ok(OkResponse::ok())
    }

    /// One namespace's document (its fixed default when never written).
    pub async fn game_data(
        &self,
        token: &SessionToken,
        namespace: &str,
    ) -> Result<Value, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        Ok(account.game_data(namespace.to_string()).await?)
    }

    /// All three save slots plus the last-played marker.
    pub async fn list_slots(
        &self,
        token: &SessionToken,
    ) -> Result<SaveSlots, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        Ok(account.save_slots().await?)
    }

    /// Writes one slot (unconditional overwrite, marks it last-played).
    pub async fn save_slot(
        &self,
        token: &SessionToken,
        req: SaveSlotRequest,
    ) -> Result<OkResponse, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        account.save_slot(req.slot, req.data, req.name).await?;
        Ok(OkResponse::ok())
    }

    /// Reads one slot. An empty slot is `Ok(None)`, not an error.
    pub async fn load_slot(
        &self,
        token: &SessionToken,
        slot: SlotId,
    ) -> Result<Option<SlotRecord>, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        Ok(account.load_slot(slot).await?)
    }

    /// Empties one slot. Idempotent.
    pub async fn delete_slot(
        &self,
        token: &SessionToken,
        slot: SlotId,
    ) -> Result<OkResponse, GatewayError> {
        let address = self.authorize(token).await?;
        let account = self.accounts.handle(&address).await;
        account.delete_slot(slot).await?;
        Ok(OkResponse::ok())
    }
}
