use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Account record
///
/// `hash_pass` never leaves the server: it is skipped on serialization so a
/// `User` can be returned from a handler as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id",
        default
    )]
    pub id: Option<RecordId>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo_url: Option<String>,
    pub created_at: String,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.hash_pass)
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Fields for account creation; the password arrives in clear and is hashed
/// by the repository before the write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profile update payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: None,
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            hash_pass: User::hash_password("correct horse").unwrap(),
            photo_url: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_password_verification() {
        let user = sample();
        assert!(user.verify_password("correct horse"));
        assert!(!user.verify_password("wrong horse"));
    }

    #[test]
    fn test_hash_is_never_serialized() {
        let user = sample();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hash_pass").is_none());
        assert_eq!(json["email"], "jane@example.com");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample().display_name(), "Jane Doe");
    }
}
