//! `Backend` builder and facade.
//!
//! This is the entry point for embedding Playvault. It ties together
//! all the layers: store → actors → directories → gateway, and exposes
//! one method per operation of the HTTP surface.

use serde_json::{Map, Value};

use playvault_account::AccountDirectory;
use playvault_gateway::{
    AuthGateway, Mailer, SyncCoordinator, VerificationFlow,
};
use playvault_protocol::{
    LoginRequest, LoginResponse, OkResponse, ProfileSnapshot,
    SaveSlotRequest, SaveSlots, SessionToken, SignupRequest, SignupResponse,
    SlotId, SlotRecord, VerifyResponse,
};
use playvault_session::{SessionConfig, SessionDirectory};
use playvault_store::{Clock, Store};

use crate::PlayvaultError;

/// Builder for configuring a [`Backend`].
pub struct BackendBuilder {
    session_config: SessionConfig,
}

impl BackendBuilder {
    pub fn new() -> Self {
        Self {
            session_config: SessionConfig::default(),
        }
    }

    /// Sets the session configuration (TTL).
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Builds the backend over the given store, clock, and mailer.
    pub fn build<S: Store, K: Clock, M: Mailer>(
        self,
        store: S,
        clock: K,
        mailer: M,
    ) -> Backend<S, K, M> {
        let accounts = AccountDirectory::new(store.clone(), clock.clone());
        let sessions =
            SessionDirectory::new(store, clock, self.session_config);
        let auth = AuthGateway::new(
            accounts.clone(),
            sessions.clone(),
            VerificationFlow::new(mailer),
        );
        let sync = SyncCoordinator::new(accounts, sessions);
        Backend { auth, sync }
    }
}

impl Default for BackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully wired Playvault backend.
///
/// One method per operation. An HTTP layer maps routes onto these
/// one-to-one; tests and demos call them directly.
pub struct Backend<S: Store, K: Clock, M: Mailer> {
    auth: AuthGateway<S, K, M>,
    sync: SyncCoordinator<S, K>,
}

impl<S: Store, K: Clock, M: Mailer> Clone for Backend<S, K, M> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            sync: self.sync.clone(),
        }
    }
}

impl<S: Store, K: Clock, M: Mailer> Backend<S, K, M> {
    /// Creates a new builder.
    pub fn builder() -> BackendBuilder {
        BackendBuilder::new()
    }

    // -- Auth ---------------------------------------------------------------

    /// `POST /api/signup`
    pub async fn signup(
        &self,
        req: SignupRequest,
    ) -> Result<SignupResponse, PlayvaultError> {
        Ok(self.auth.signup(req).await?)
    }

    /// `POST /api/login`
    pub async fn login(
        &self,
        req: LoginRequest,
    ) -> Result<LoginResponse, PlayvaultError> {
        Ok(self.auth.login(req).await?)
    }

    /// `POST /api/logout`
    pub async fn logout(
        &self,
        token: &SessionToken,
    ) -> Result<OkResponse, PlayvaultError> {
        Ok(self.auth.logout(token).await?)
    }

    /// `GET /api/verify?email=…&token=…`
    pub async fn verify_email(
        &self,
        email: &str,
        token: &str,
    ) -> Result<VerifyResponse, PlayvaultError> {
        Ok(self.auth.verify_email(email, token).await?)
    }

    // -- Profile ------------------------------------------------------------

    /// `GET /api/profile`
    pub async fn profile(
        &self,
        token: &SessionToken,
    ) -> Result<ProfileSnapshot, PlayvaultError> {
        Ok(self.sync.profile(token).await?)
    }

    /// `POST /api/sync`
    pub async fn sync_profile(
        &self,
        token: &SessionToken,
        fields: Map<String, Value>,
    ) -> Result<OkResponse, PlayvaultError> {
        Ok(self.sync.sync_profile(token, fields).await?)
    }

    // -- Game data ----------------------------------------------------------

    /// `POST /api/<namespace>/save` (document form)
    pub async fn update_game_data(
        &self,
        token: &SessionToken,
        namespace: &str,
        document: Map<String, Value>,
    ) -> Result<OkResponse, PlayvaultError> {
        Ok(self.sync.update_game_data(token, namespace, document).await?)
    }

    /// `GET /api/<namespace>/load`
    pub async fn game_data(
        &self,
        token: &SessionToken,
        namespace: &str,
    ) -> Result<Value, PlayvaultError> {
        Ok(self.sync.game_data(token, namespace).await?)
    }

    // -- Save slots ---------------------------------------------------------

    /// `GET /api/dungeon/slots`
    pub async fn list_slots(
        &self,
        token: &SessionToken,
    ) -> Result<SaveSlots, PlayvaultError> {
        Ok(self.sync.list_slots(token).await?)
    }

    /// `POST /api/dungeon/save`
    pub async fn save_slot(
        &self,
        token: &SessionToken,
        req: SaveSlotRequest,
    ) -> Result<OkResponse, PlayvaultError> {
        Ok(self.sync.save_slot(token, req).await?)
    }

    /// `POST /api/dungeon/load`
    pub async fn load_slot(
        &self,
        token: &SessionToken,
        slot: SlotId,
    ) -> Result<Option<SlotRecord>, PlayvaultError> {
        Ok(self.sync.load_slot(token, slot).await?)
    }

    /// `POST /api/dungeon/delete`
    pub async fn delete_slot(
        &self,
        token: &SessionToken,
        slot: SlotId,
    ) -> Result<OkResponse, PlayvaultError> {
        Ok(self.sync.delete_slot(token, slot).await?)
    }
}
