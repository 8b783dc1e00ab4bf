//! Session Store
//!
//! Owns the active [`Session`] and writes every change through to the
//! key-value store. The signed-in user is always re-read from the user
//! collection before being modified, so changes made by other users (such
//! as incoming friend requests) are not overwritten.

use std::sync::Arc;

use crate::domain::{DomainResult, Goal, Session, User};
use crate::repository::{
    load_json, save_json, KeyValueStore, KvUserRepository, Repository, CURRENT_USER_KEY, GUEST_GOALS_KEY,
    GUEST_MODE_KEY,
};
use crate::social::DEFAULT_NEARBY_RADIUS_KM;

pub struct SessionStore<S: KeyValueStore + ?Sized> {
    pub(super) store: Arc<S>,
    pub(super) users: KvUserRepository<S>,
    pub(super) session: Session,
    pub(super) nearby_radius_km: f64,
}

impl<S: KeyValueStore + ?Sized> SessionStore<S> {
    /// Restore the previous session from the store
    pub async fn open(store: Arc<S>) -> DomainResult<Self> {
        let users = KvUserRepository::new(store.clone());

        let session = if let Some(stored) = load_json::<S, User>(&*store, CURRENT_USER_KEY).await? {
            let user = users.find_by_id(&stored.id).await?.unwrap_or(stored);
            Session::Authenticated(user)
        } else if store.get(GUEST_MODE_KEY).await?.as_deref() == Some("true") {
            let goals = load_json::<S, Vec<Goal>>(&*store, GUEST_GOALS_KEY).await?.unwrap_or_default();
            Session::Guest { goals }
        } else {
            Session::Anonymous
        };

        log::info!("Session restored: {}", describe(&session));
        Ok(Self {
            store,
            users,
            session,
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
        })
    }

    /// Radius used by [`SessionStore::nearby_users`] and suggestions
    pub fn with_nearby_radius(mut self, km: f64) -> Self {
        self.nearby_radius_km = km;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn users(&self) -> &KvUserRepository<S> {
        &self.users
    }

    /// Reload the signed-in user from the collection
    pub async fn refresh_current_user(&mut self) -> DomainResult<Option<User>> {
        let Session::Authenticated(current) = &self.session else {
            return Ok(None);
        };
        let Some(fresh) = self.users.find_by_id(&current.id).await? else {
            return Ok(Some(current.clone()));
        };

        if &fresh != current {
            save_json(&*self.store, CURRENT_USER_KEY, &fresh).await?;
            self.session = Session::Authenticated(fresh.clone());
        }
        Ok(Some(fresh))
    }

    /// Read-modify-write of the signed-in user; `None` when nobody is signed in
    pub(super) async fn modify_current_user<F>(&mut self, f: F) -> DomainResult<Option<User>>
    where
        F: FnOnce(&mut User),
    {
        let Session::Authenticated(current) = &mut self.session else {
            return Ok(None);
        };

        let mut user = self
            .users
            .find_by_id(&current.id)
            .await?
            .unwrap_or_else(|| current.clone());
        f(&mut user);
        *current = user.clone();

        self.users.upsert(&user).await?;
        save_json(&*self.store, CURRENT_USER_KEY, &user).await?;
        Ok(Some(user))
    }

    pub(super) async fn clear_guest_data(&self) -> DomainResult<()> {
        self.store.remove(GUEST_MODE_KEY).await?;
        self.store.remove(GUEST_GOALS_KEY).await
    }
}

fn describe(session: &Session) -> String {
    match session {
        Session::Anonymous => "anonymous".to_string(),
        Session::Guest { goals } => format!("guest with {} goals", goals.len()),
        Session::Authenticated(user) => format!("user {}", user.id),
    }
}
