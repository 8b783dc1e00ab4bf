//! User Repository
//!
//! Stores the whole user collection as one JSON array under [`USERS_KEY`].
//! Every write is a read-modify-write of that array.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{DomainResult, User};
use super::kv_store::{load_json, save_json, USERS_KEY};
use super::traits::{KeyValueStore, Repository};

pub struct KvUserRepository<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> KvUserRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Whether a collection has ever been written
    pub async fn is_initialized(&self) -> DomainResult<bool> {
        Ok(self.store.get(USERS_KEY).await?.is_some())
    }

    /// Case-insensitive email lookup
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = email.trim();
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn load(&self) -> DomainResult<Vec<User>> {
        Ok(load_json::<S, Vec<User>>(&*self.store, USERS_KEY).await?.unwrap_or_default())
    }

    async fn save(&self, users: &[User]) -> DomainResult<()> {
        save_json(&*self.store, USERS_KEY, users).await
    }
}

fn merge(users: &mut Vec<User>, entity: &User) {
    match users.iter_mut().find(|u| u.id == entity.id) {
        Some(existing) => *existing = entity.clone(),
        None => users.push(entity.clone()),
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> Repository<User> for KvUserRepository<S> {
    async fn find_by_id(&self, id: &String) -> DomainResult<Option<User>> {
        Ok(self.load().await?.into_iter().find(|u| &u.id == id))
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        self.load().await
    }

    async fn upsert(&self, entity: &User) -> DomainResult<User> {
        let mut users = self.load().await?;
        merge(&mut users, entity);
        self.save(&users).await?;
        Ok(entity.clone())
    }

    async fn upsert_many(&self, entities: &[User]) -> DomainResult<()> {
        let mut users = self.load().await?;
        for entity in entities {
            merge(&mut users, entity);
        }
        self.save(&users).await
    }
}
