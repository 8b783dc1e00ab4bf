//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// Core repository trait over a keyed entity collection
///
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List all entities in stored order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace the entity with the same ID, or append it
    async fn upsert(&self, entity: &T) -> DomainResult<T>;

    /// Upsert several entities; backends may write them in one step
    async fn upsert_many(&self, entities: &[T]) -> DomainResult<()> {
        for entity in entities {
            self.upsert(entity).await?;
        }
        Ok(())
    }
}

/// Opaque string key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Removing a missing key is not an error
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
