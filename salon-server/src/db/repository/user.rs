//! User Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{User, UserCreate, UserUpdate};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = parse_id(id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new account. Emails are stored lowercased and unique.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let email = data.email.to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    email = $email,
                    first_name = $first_name,
                    last_name = $last_name,
                    hash_pass = $hash_pass,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("email", email))
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("hash_pass", hash_pass))
            .bind(("created_at", Utc::now().to_rfc3339()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update profile fields; absent fields keep their value.
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let thing = parse_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    first_name = $first_name OR first_name,
                    last_name = $last_name OR last_name,
                    photo_url = $photo_url OR photo_url
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("photo_url", data.photo_url))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }
}
