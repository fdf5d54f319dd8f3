//! Directory of running account actors.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use playvault_protocol::AccountAddress;
use playvault_store::{Clock, Store};

use crate::actor::{spawn_account, AccountHandle};

/// Command-channel depth for each account actor.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Maps account addresses to their running actors, spawning lazily.
///
/// The first command for an address spawns its actor; later lookups
/// reuse the running one, so all operations on an address funnel
/// through a single task. An actor that has stopped (e.g. its record
/// failed to load) is respawned transparently on the next lookup.
pub struct AccountDirectory<S: Store, K: Clock> {
    store: S,
    clock: K,
    accounts: Arc<Mutex<HashMap<AccountAddress, AccountHandle>>>,
}

impl<S: Store, K: Clock> Clone for AccountDirectory<S, K> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            accounts: Arc::clone(&self.accounts),
        }
    }
}

impl<S: Store, K: Clock> AccountDirectory<S, K> {
    pub fn new(store: S, clock: K) -> Self {
        Self {
            store,
            clock,
            accounts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The handle for an address, spawning the actor if it isn't
    /// running.
    ///
    /// Every lookup also sweeps out entries whose actors have stopped —
    /// actors for addresses that turned out to hold no account (login
    /// or verify probes against arbitrary emails) shut themselves down,
    /// and the sweep keeps those probes from growing the registry
    /// without bound.
    pub async fn handle(&self, address: &AccountAddress) -> AccountHandle {
        let mut accounts = self.accounts.lock().await;
        accounts.retain(|_, handle| !handle.is_closed());
        if let Some(handle) = accounts.get(address) {
            return handle.clone();
        }
        let handle = spawn_account(
            address.clone(),
            self.store.clone(),
            self.clock.clone(),
            DEFAULT_CHANNEL_SIZE,
        );
        accounts.insert(address.clone(), handle.clone());
        handle
    }

    /// Number of actors currently registered (stopped ones included
    /// until the next lookup sweeps them).
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use playvault_protocol::SlotId;
    use playvault_store::{ManualClock, MemoryStore};

    use super::*;
    use crate::{AccountError, VerifyOutcome};

    fn directory() -> (AccountDirectory<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000);
        (
            AccountDirectory::new(MemoryStore::new(), clock.clone()),
            clock,
        )
    }

    async fn signed_up(
        dir: &AccountDirectory<MemoryStore, ManualClock>,
    ) -> AccountHandle {
        let address = AccountAddress::from_email("alice@example.com");
        let handle = dir.handle(&address).await;
        handle
            .create(
                "alice@example.com".into(),
                "hunter2".into(),
                "alice".into(),
            )
            .await
            .unwrap();
        handle
    }

    #[tokio::test]
    async fn test_handle_reuses_running_actor() {
        let (dir, _) = directory();
        let address = AccountAddress::from_email("a@x.com");
        dir.handle(&address).await;
        dir.handle(&address).await;
        assert_eq!(dir.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_then_authenticate() {
        let (dir, _) = directory();
        let handle = signed_up(&dir).await;
        assert!(handle.authenticate("hunter2".into()).await.unwrap());
        assert!(!handle.authenticate("wrong".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_twice_keeps_original_account() {
        let (dir, _) = directory();
        let handle = signed_up(&dir).await;
        let err = handle
            .create("alice@example.com".into(), "other".into(), "mallory".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AlreadyExists(_)));
        // Original credentials and username survive.
        assert!(handle.authenticate("hunter2".into()).await.unwrap());
        let profile = handle.profile().await.unwrap();
        assert_eq!(profile.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_missing_account_is_false() {
        let (dir, _) = directory();
        let address = AccountAddress::from_email("ghost@x.com");
        let handle = dir.handle(&address).await;
        assert!(!handle.authenticate("anything".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_profile_missing_account_is_not_found() {
        let (dir, _) = directory();
        let address = AccountAddress::from_email("ghost@x.com");
        let handle = dir.handle(&address).await;
        let err = handle.profile().await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mutations_on_missing_account_are_no_ops() {
        let (dir, _) = directory();
        let address = AccountAddress::from_email("ghost@x.com");

        // Fresh lookup per operation, the way callers use the
        // directory; an actor that found no account stops after
        // replying.
        let mut fields = Map::new();
        fields.insert("points".into(), json!(10));
        dir.handle(&address)
            .await
            .update_profile(fields)
            .await
            .unwrap();
        dir.handle(&address)
            .await
            .save_slot(SlotId::Slot1, json!({"hp": 1}), None)
            .await
            .unwrap();

        // Still no account, and nothing was written.
        assert!(matches!(
            dir.handle(&address).await.profile().await.unwrap_err(),
            AccountError::NotFound(_)
        ));
        assert!(dir
            .handle(&address)
            .await
            .load_slot(SlotId::Slot1)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_game_data_defaults_without_account() {
        let (dir, _) = directory();
        let address = AccountAddress::from_email("ghost@x.com");
        let chess = dir
            .handle(&address)
            .await
            .game_data("chess".into())
            .await
            .unwrap();
        assert_eq!(chess["points"], 0);
        let other = dir
            .handle(&address)
            .await
            .game_data("dungeon".into())
            .await
            .unwrap();
        assert_eq!(other, json!({}));
    }

    #[tokio::test]
    async fn test_handle_sweeps_actors_for_missing_accounts() {
        let (dir, _) = directory();

        // A burst of failed probes against distinct nonexistent
        // addresses. Each actor replies `false` and stops; the next
        // lookup sweeps it out, so the registry never accumulates
        // ghosts.
        for i in 0..50 {
            let address =
                AccountAddress::from_email(&format!("ghost{i}@x.com"));
            let handle = dir.handle(&address).await;
            assert!(!handle.authenticate("guess".into()).await.unwrap());
        }
        assert!(
            dir.len().await <= 1,
            "probed addresses must not pile up live actors"
        );
    }

    #[tokio::test]
    async fn test_handle_sweep_keeps_live_actors() {
        let (dir, _) = directory();
        let handle = signed_up(&dir).await;

        // Probes against other addresses must not sweep out the actor
        // of a real account.
        for i in 0..10 {
            let ghost = AccountAddress::from_email(&format!("g{i}@x.com"));
            let _ = dir.handle(&ghost).await.authenticate("x".into()).await;
        }

        assert!(handle.authenticate("hunter2".into()).await.unwrap());
        assert_eq!(handle.profile().await.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_verify_email_full_flow() {
        let (dir, clock) = directory();
        let handle = signed_up(&dir).await;
        handle
            .set_verification_token("verify_tok".into())
            .await
            .unwrap();

        clock.advance(60_000);
        assert_eq!(
            handle.verify_email("verify_bad".into()).await.unwrap(),
            VerifyOutcome::InvalidToken
        );
        assert_eq!(
            handle.verify_email("verify_tok".into()).await.unwrap(),
            VerifyOutcome::Verified
        );
        assert_eq!(
            handle.verify_email("verify_tok".into()).await.unwrap(),
            VerifyOutcome::AlreadyVerified
        );
        assert!(handle.profile().await.unwrap().email_verified);
    }

    #[tokio::test]
    async fn test_verify_email_missing_account_is_not_found() {
        let (dir, _) = directory();
        let address = AccountAddress::from_email("ghost@x.com");
        let handle = dir.handle(&address).await;
        let err = handle.verify_email("verify_tok".into()).await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_save_and_load_slot_through_actor() {
        let (dir, clock) = directory();
        let handle = signed_up(&dir).await;
        clock.set(5_000);
        handle
            .save_slot(SlotId::Slot2, json!({"floor": 7}), Some("Deep run".into()))
            .await
            .unwrap();

        let slot = handle.load_slot(SlotId::Slot2).await.unwrap().unwrap();
        assert_eq!(slot.name, "Deep run");
        assert_eq!(slot.data, json!({"floor": 7}));
        assert_eq!(slot.saved_at, 5_000);

        let slots = handle.save_slots().await.unwrap();
        assert_eq!(slots.last_played_slot, Some(SlotId::Slot2));

        handle.delete_slot(SlotId::Slot2).await.unwrap();
        assert!(handle.load_slot(SlotId::Slot2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_survives_directory_restart() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(1_000);
        let address = AccountAddress::from_email("alice@example.com");

        {
            let dir = AccountDirectory::new(store.clone(), clock.clone());
            let handle = dir.handle(&address).await;
            handle
                .create(
                    "alice@example.com".into(),
                    "hunter2".into(),
                    "alice".into(),
                )
                .await
                .unwrap();
            let mut doc = Map::new();
            doc.insert("points".into(), json!(42));
            handle.update_game_data("chess".into(), doc).await.unwrap();
        }

        // A fresh directory over the same store loads the persisted record.
        let dir = AccountDirectory::new(store, clock);
        let handle = dir.handle(&address).await;
        assert!(handle.authenticate("hunter2".into()).await.unwrap());
        let chess = handle.game_data("chess".into()).await.unwrap();
        assert_eq!(chess["points"], 42);
    }
}
