//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod kv_store;
mod seed;
mod traits;
mod user_repo;


pub use db::{init_db, DbState};
pub use kv_store::{
    load_json, save_json, MemoryKvStore, SqliteKvStore, CURRENT_USER_KEY, GUEST_GOALS_KEY, GUEST_MODE_KEY, THEME_KEY,
    USERS_KEY,
};
pub use seed::{demo_users, seed_demo_users};
pub use traits::{KeyValueStore, Repository};
pub use user_repo::KvUserRepository;
