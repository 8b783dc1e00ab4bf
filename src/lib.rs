//! Goal Tracker Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - goal_tree: Goal / task / subtask editing
//! - social: Distance, matching heuristics and the friend-request protocol
//! - repository: Key-value persistence and the user collection
//! - session: Who is using the app, and the operations the UI calls

use std::path::PathBuf;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod goal_tree;
pub mod repository;
pub mod session;
pub mod social;

pub use config::AppConfig;
pub use domain::{DomainError, DomainResult};
pub use session::SessionStore;

use repository::{init_db, seed_demo_users, DbState, KvUserRepository, SqliteKvStore};

/// Application state shared with the embedding UI
pub struct AppState {
    pub db_state: DbState,
    pub db_path: PathBuf,
    pub session: SessionStore<SqliteKvStore>,
}

/// Start logging, open the database and restore the last session
pub async fn bootstrap(config: &AppConfig) -> DomainResult<AppState> {
    if let Err(e) = rolling_logger::init_logger(config.log_dir.clone(), &config.app_name) {
        // A subscriber may already be installed by the host
        log::warn!("Rolling logger not started: {}", e);
    }

    let db_path = config.db_path();
    let db_state = match init_db(&db_path).await {
        Ok(state) => {
            let _ = rolling_logger::info("DB init success");
            state
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            return Err(e);
        }
    };
    let store = Arc::new(SqliteKvStore::new(db_state.conn.clone()));

    if config.seed_demo_users {
        seed_demo_users(&KvUserRepository::new(store.clone())).await?;
    }

    let session = SessionStore::open(store)
        .await?
        .with_nearby_radius(config.nearby_radius_km);

    Ok(AppState {
        db_state,
        db_path,
        session,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Session;
    use crate::repository::Repository;

    #[tokio::test]
    async fn test_bootstrap_seeds_and_restores() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            log_dir: dir.path().join("logs"),
            ..Default::default()
        };

        let mut state = bootstrap(&config).await.unwrap();
        assert!(state.db_state.is_initialized().await);
        assert_eq!(state.session.session(), &Session::Anonymous);
        state.session.login("emma@example.com", "pw").await.unwrap();
        drop(state);

        let state = bootstrap(&config).await.unwrap();
        assert_eq!(state.session.current_user().map(|u| u.id.as_str()), Some("1"));
        assert_eq!(state.session.users().list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_bootstrap_reports_unopenable_db() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = AppConfig {
            data_dir: blocker,
            log_dir: dir.path().join("logs"),
            ..Default::default()
        };

        assert!(matches!(bootstrap(&config).await, Err(DomainError::Persistence(_))));
    }
}
