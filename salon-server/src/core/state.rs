use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{CurrentUser, JwtService};
use crate::core::Config;

/// Shared server state
///
/// Holds the configuration, the embedded database handle and the JWT
/// service. `Clone` is shallow; handlers receive it via axum state.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize state from configuration: create the work directory
    /// layout and open the database at `work_dir/database`.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized;
    /// the server cannot run without either.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db = crate::db::connect(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db, jwt_service)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// True when the session's e-mail is on the admin allowlist.
    pub fn is_admin(&self, user: &CurrentUser) -> bool {
        let email = user.email.to_lowercase();
        self.config.admin_emails.iter().any(|e| *e == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::new_memory;

    #[tokio::test]
    async fn test_admin_allowlist_is_case_insensitive() {
        let mut config = Config::with_overrides("/tmp/salon-test", 0);
        config.admin_emails = vec!["admin@example.com".to_string()];
        let db = new_memory().await.unwrap();
        let state = ServerState::new(config, db, Arc::new(JwtService::new()));

        let admin = CurrentUser {
            id: "user:a".to_string(),
            email: "Admin@Example.COM".to_string(),
            display_name: "Admin".to_string(),
        };
        let other = CurrentUser {
            id: "user:b".to_string(),
            email: "jane@example.com".to_string(),
            display_name: "Jane".to_string(),
        };
        assert!(state.is_admin(&admin));
        assert!(!state.is_admin(&other));
    }
}
