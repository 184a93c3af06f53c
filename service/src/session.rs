//! [`Store`] of the authenticated [`Session`].

use std::sync::{Arc, PoisonError, RwLock};

use derive_more::{Display, Error as StdError, From};
use tracing as log;

use crate::{
    domain::{
        seller::{session::Token, Role, Session},
        Seller,
    },
    infra::storage::{self, Key, Storage},
};

/// Single source of truth for "who is signed in".
///
/// Holds the in-memory [`Session`] and mirrors it into the durable
/// [`Storage`], so it survives restarts. Cheap to clone; all clones share
/// the same state.
///
/// Mutations always overwrite the whole persisted key space, never merge
/// it partially: either both `user` and `token` are stored, or neither.
#[derive(Debug)]
pub struct Store<S> {
    /// Currently published [`Session`].
    state: Arc<RwLock<Option<Session>>>,

    /// Durable [`Storage`] backing this [`Store`].
    storage: Arc<S>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Storage> Store<S> {
    /// Creates a new, empty [`Store`] on top of the given [`Storage`].
    ///
    /// Call [`rehydrate`] to pick up a previously persisted [`Session`].
    ///
    /// [`rehydrate`]: Store::rehydrate
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
            storage: Arc::new(storage),
        }
    }

    /// Returns the current [`Session`], if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the credential [`Token`] of the current [`Session`], if
    /// any.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.current().map(|s| s.token)
    }

    /// Returns the [`Role`] of the signed-in [`Seller`], if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current().map(|s| s.seller.role)
    }

    /// Restores the [`Session`] persisted by a previous run.
    ///
    /// Fails safe: a missing key, an unreadable storage or a malformed
    /// persisted profile all yield the empty session, removing whatever
    /// partial state was persisted. Never errors out to the caller.
    pub fn rehydrate(&self) -> Option<Session> {
        let stored_seller = self.select(Key::User);
        let stored_token = self.select(Key::Token);

        let session = match (stored_seller, stored_token) {
            (Some(raw), Some(token)) => {
                match serde_json::from_str::<Seller>(&raw) {
                    Ok(seller) => Some(Session {
                        seller,
                        token: Token::from(token),
                    }),
                    Err(e) => {
                        log::warn!(
                            "discarding persisted session: \
                             malformed profile: {e}",
                        );
                        self.discard_persisted();
                        None
                    }
                }
            }
            (None, None) => None,
            // A lone key violates the session invariant.
            (Some(_), None) | (None, Some(_)) => {
                log::warn!("discarding partially persisted session");
                self.discard_persisted();
                None
            }
        };

        self.publish(session.clone());
        session
    }

    /// Signs the given [`Seller`] in: persists both the profile and the
    /// `token`, then publishes the [`Session`].
    ///
    /// The durable write completes before the session becomes visible, so
    /// a navigation following a successful login always observes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be persisted; nothing is
    /// published in that case and the previous state stays intact.
    pub fn login(
        &self,
        seller: Seller,
        token: Token,
    ) -> Result<Session, LoginError> {
        let raw = serde_json::to_string(&seller)?;

        self.storage.insert(Key::User, &raw)?;
        if let Err(e) = self.storage.insert(Key::Token, token.as_ref()) {
            // Do not leave a lone `user` key behind.
            self.discard_persisted();
            return Err(e.into());
        }

        let session = Session { seller, token };
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Signs out: clears the persisted key space and the in-memory state.
    ///
    /// Best-effort and idempotent: storage failures are logged, never
    /// surfaced, and the in-memory session is dropped unconditionally.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            log::warn!("failed to clear session storage: {e}");
            self.discard_persisted();
        }
        self.publish(None);
    }

    /// Reads the given `key`, degrading a storage failure to "absent".
    fn select(&self, key: Key) -> Option<String> {
        self.storage.select(key).unwrap_or_else(|e| {
            log::warn!("failed to read `{key}` from session storage: {e}");
            None
        })
    }

    /// Removes both session keys, ignoring (but logging) failures.
    fn discard_persisted(&self) {
        for key in [Key::User, Key::Token] {
            if let Err(e) = self.storage.delete(key) {
                log::warn!(
                    "failed to remove `{key}` from session storage: {e}",
                );
            }
        }
    }

    /// Publishes the given `session` as the current one.
    fn publish(&self, session: Option<Session>) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

/// Error of a [`Store::login`].
#[derive(Debug, Display, From, StdError)]
pub enum LoginError {
    /// Profile cannot be serialized.
    #[display("cannot serialize the `Seller` profile: {_0}")]
    Serialize(serde_json::Error),

    /// Durable [`Storage`] failed.
    #[display("session storage failed: {_0}")]
    Storage(storage::Error),
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use crate::{
        domain::seller::{session::Token, Role},
        infra::storage::{Key, Memory, Storage as _},
    };

    use super::Store;

    fn seller(id: i64, role: Role) -> crate::domain::Seller {
        serde_json::from_str(&format!(
            r#"{{
                "id": {id},
                "fullName": "Test Seller",
                "email": "seller@travel.vn",
                "role": "{role}"
            }}"#,
        ))
        .unwrap()
    }

    #[test]
    fn login_then_rehydrate_restores_session() {
        let storage = Arc::new(Memory::default());
        let store = Store::new(Arc::clone(&storage));
        drop(
            store
                .login(seller(42, Role::Staff), Token::from("opaque"))
                .unwrap(),
        );

        // A fresh store over the same storage sees nothing until it
        // rehydrates.
        let restored = Store::new(Arc::clone(&storage));
        assert_eq!(restored.current(), None);

        let session = restored.rehydrate().unwrap();
        assert_eq!(session.seller.id, 42.into());
        assert_eq!(session.token, Token::from("opaque"));
        assert_eq!(restored.role(), Some(Role::Staff));
    }

    #[test]
    fn malformed_profile_clears_both_keys() {
        let storage = Arc::new(Memory::default());
        storage.insert(Key::User, "{not json").unwrap();
        storage.insert(Key::Token, "opaque").unwrap();

        let store = Store::new(Arc::clone(&storage));
        assert_eq!(store.rehydrate(), None);
        assert_eq!(store.current(), None);

        assert_eq!(storage.select(Key::User).unwrap(), None);
        assert_eq!(storage.select(Key::Token).unwrap(), None);
    }

    #[test]
    fn lone_token_is_discarded() {
        let storage = Arc::new(Memory::default());
        storage.insert(Key::Token, "opaque").unwrap();

        let store = Store::new(Arc::clone(&storage));
        assert_eq!(store.rehydrate(), None);
        assert_eq!(storage.select(Key::Token).unwrap(), None);
    }

    #[test]
    fn logout_clears_everything_and_is_idempotent() {
        let storage = Arc::new(Memory::default());
        let store = Store::new(Arc::clone(&storage));
        drop(
            store
                .login(seller(1, Role::Admin), Token::from("t"))
                .unwrap(),
        );

        store.logout();
        assert_eq!(store.current(), None);
        assert_eq!(storage.select(Key::User).unwrap(), None);
        assert_eq!(storage.select(Key::Token).unwrap(), None);

        // Logging out of an empty session must not blow up.
        store.logout();
        assert_eq!(store.current(), None);
    }
}
