//! Organization-User Role Mapping Repository
//!
//! One row per (user, organization) pair holding the user's role set. The
//! table invariant: a row exists only while its role set is non-empty, so
//! membership checks reduce to "does a row exist".

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use tracing::warn;

use shared::Role;

use super::{BaseRepository, OrganizationRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{
    Organization, OrganizationMember, OrganizationUser, OrganizationWithRoles, OwnerRef, User,
};

#[derive(Clone)]
pub struct OrganizationUserRepository {
    base: BaseRepository,
}

impl OrganizationUserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_mapping(
        &self,
        user_id: &str,
        organization_id: &str,
    ) -> RepoResult<Option<OrganizationUser>> {
        let user: RecordId = parse_id(user_id)?;
        let org: RecordId = parse_id(organization_id)?;
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM organization_user
                 WHERE user_id = $user AND organization_id = $org LIMIT 1",
            )
            .bind(("user", user))
            .bind(("org", org))
            .await?;
        let mappings: Vec<OrganizationUser> = result.take(0)?;
        Ok(mappings.into_iter().next())
    }

    /// Roles the user holds in the organization; empty when no mapping exists.
    pub async fn find_roles(&self, user_id: &str, organization_id: &str) -> RepoResult<Vec<Role>> {
        Ok(self
            .find_mapping(user_id, organization_id)
            .await?
            .map(|m| m.roles)
            .unwrap_or_default())
    }

    /// All organizations the user belongs to, each with the user's role set.
    ///
    /// A mapping pointing at a deleted organization is logged and dropped
    /// rather than failing the whole listing.
    pub async fn find_organizations_by_user(
        &self,
        user_id: &str,
    ) -> RepoResult<Vec<OrganizationWithRoles>> {
        let user: RecordId = parse_id(user_id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM organization_user WHERE user_id = $user")
            .bind(("user", user))
            .await?;
        let mappings: Vec<OrganizationUser> = result.take(0)?;

        let mut organizations = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            let org: Option<Organization> = self
                .base
                .db()
                .select(mapping.organization_id.clone())
                .await?;
            match org {
                Some(organization) => organizations.push(OrganizationWithRoles {
                    organization,
                    roles: mapping.roles,
                }),
                None => {
                    warn!(
                        user_id = %user_id,
                        organization_id = %mapping.organization_id,
                        "role mapping points at a missing organization, skipping"
                    );
                }
            }
        }
        Ok(organizations)
    }

    /// Staff listing: every mapping in the organization joined with the
    /// user's identity fields.
    pub async fn members(&self, organization_id: &str) -> RepoResult<Vec<OrganizationMember>> {
        let org: RecordId = parse_id(organization_id)?;
        let members: Vec<OrganizationMember> = self
            .base
            .db()
            .query(
                "SELECT user_id, roles,
                        user_id.email AS email,
                        user_id.first_name AS first_name,
                        user_id.last_name AS last_name
                 FROM organization_user WHERE organization_id = $org
                 ORDER BY email",
            )
            .bind(("org", org))
            .await?
            .take(0)?;
        Ok(members)
    }

    /// Add an existing account to the organization by e-mail, defaulting to
    /// the employee role.
    pub async fn add_user(
        &self,
        organization_id: &str,
        email: &str,
    ) -> RepoResult<OrganizationUser> {
        let email_owned = email.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned.clone()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        let user = users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("No account for '{}'", email_owned)))?;
        let user_id = user
            .id
            .ok_or_else(|| RepoError::Database("User record without id".to_string()))?;

        if self
            .find_mapping(&user_id.to_string(), organization_id)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "'{}' is already a member",
                email_owned
            )));
        }

        let org: RecordId = parse_id(organization_id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE organization_user SET
                    user_id = $user,
                    organization_id = $org,
                    roles = $roles,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("user", user_id))
            .bind(("org", org))
            .bind(("roles", vec![Role::Employee]))
            .bind(("created_at", Utc::now().to_rfc3339()))
            .await?;

        let created: Option<OrganizationUser> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create mapping".to_string()))
    }

    /// Replace the user's role set. An empty set deletes the mapping and
    /// returns `None`.
    pub async fn update_roles(
        &self,
        organization_id: &str,
        user_id: &str,
        roles: Vec<Role>,
    ) -> RepoResult<Option<OrganizationUser>> {
        let mapping = self
            .find_mapping(user_id, organization_id)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("{} is not a member of {}", user_id, organization_id))
            })?;
        let thing = mapping
            .id
            .ok_or_else(|| RepoError::Database("Mapping record without id".to_string()))?;

        if roles.is_empty() {
            self.base
                .db()
                .query("DELETE $thing")
                .bind(("thing", thing))
                .await?;
            return Ok(None);
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET roles = $roles RETURN AFTER")
            .bind(("thing", thing))
            .bind(("roles", roles))
            .await?;
        let updated: Option<OrganizationUser> = result.take(0)?;
        updated
            .map(Some)
            .ok_or_else(|| RepoError::Database("Failed to update roles".to_string()))
    }

    /// Remove the user from the organization entirely.
    pub async fn remove_user(&self, organization_id: &str, user_id: &str) -> RepoResult<bool> {
        let mapping = self
            .find_mapping(user_id, organization_id)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("{} is not a member of {}", user_id, organization_id))
            })?;
        let thing = mapping
            .id
            .ok_or_else(|| RepoError::Database("Mapping record without id".to_string()))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Grant the owner role and mirror the owner onto the organization
    /// document. The two writes are independent: if the mirror write fails
    /// the role grant stands, and the caller sees the error.
    pub async fn assign_owner(
        &self,
        organization_id: &str,
        user: &User,
    ) -> RepoResult<OrganizationUser> {
        let user_id = user
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("User record without id".to_string()))?;

        let mapping = match self
            .find_mapping(&user_id.to_string(), organization_id)
            .await?
        {
            Some(existing) => {
                let mut roles = existing.roles.clone();
                if !roles.contains(&Role::Owner) {
                    roles.push(Role::Owner);
                }
                self.update_roles(organization_id, &user_id.to_string(), roles)
                    .await?
                    .ok_or_else(|| RepoError::Database("Owner grant lost the mapping".to_string()))?
            }
            None => {
                let org: RecordId = parse_id(organization_id)?;
                let mut result = self
                    .base
                    .db()
                    .query(
                        r#"CREATE organization_user SET
                            user_id = $user,
                            organization_id = $org,
                            roles = $roles,
                            created_at = $created_at
                        RETURN AFTER"#,
                    )
                    .bind(("user", user_id.clone()))
                    .bind(("org", org))
                    .bind(("roles", vec![Role::Owner]))
                    .bind(("created_at", Utc::now().to_rfc3339()))
                    .await?;
                let created: Option<OrganizationUser> = result.take(0)?;
                created.ok_or_else(|| RepoError::Database("Failed to create mapping".to_string()))?
            }
        };

        let org_repo = OrganizationRepository::new(self.base.db().clone());
        org_repo
            .set_owner(
                organization_id,
                Some(OwnerRef {
                    email: user.email.clone(),
                    uid: user_id,
                }),
            )
            .await?;

        Ok(mapping)
    }

    /// Revoke the owner role and clear the mirror. Deletes the mapping when
    /// no roles remain.
    pub async fn remove_owner(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> RepoResult<Option<OrganizationUser>> {
        let mapping = self
            .find_mapping(user_id, organization_id)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("{} is not a member of {}", user_id, organization_id))
            })?;

        if !mapping.roles.contains(&Role::Owner) {
            return Err(RepoError::Validation(format!(
                "{} does not hold the owner role",
                user_id
            )));
        }

        let roles: Vec<Role> = mapping
            .roles
            .iter()
            .copied()
            .filter(|r| *r != Role::Owner)
            .collect();
        let remaining = self.update_roles(organization_id, user_id, roles).await?;

        let org_repo = OrganizationRepository::new(self.base.db().clone());
        org_repo.set_owner(organization_id, None).await?;

        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::new_memory;
    use crate::db::models::{OrganizationCreate, UserCreate};
    use crate::db::repository::UserRepository;

    async fn seed(db: &Surreal<Db>) -> (String, User) {
        let org = OrganizationRepository::new(db.clone())
            .create(OrganizationCreate {
                name: "Salon".to_string(),
                logo_url: None,
            })
            .await
            .unwrap();
        let user = UserRepository::new(db.clone())
            .create(UserCreate {
                email: "jane@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            })
            .await
            .unwrap();
        (org.id.unwrap().to_string(), user)
    }

    #[tokio::test]
    async fn test_add_user_defaults_to_employee() {
        let db = new_memory().await.unwrap();
        let (org_id, user) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db);

        let mapping = repo.add_user(&org_id, "jane@example.com").await.unwrap();
        assert_eq!(mapping.roles, vec![Role::Employee]);

        let roles = repo
            .find_roles(&user.id.unwrap().to_string(), &org_id)
            .await
            .unwrap();
        assert_eq!(roles, vec![Role::Employee]);
    }

    #[tokio::test]
    async fn test_add_unknown_email_is_not_found() {
        let db = new_memory().await.unwrap();
        let (org_id, _) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db);

        let err = repo.add_user(&org_id, "nobody@example.com").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_twice_is_duplicate() {
        let db = new_memory().await.unwrap();
        let (org_id, _) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db);

        repo.add_user(&org_id, "jane@example.com").await.unwrap();
        let err = repo.add_user(&org_id, "jane@example.com").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_empty_roles_deletes_mapping() {
        let db = new_memory().await.unwrap();
        let (org_id, user) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db);
        let user_id = user.id.unwrap().to_string();

        repo.add_user(&org_id, "jane@example.com").await.unwrap();
        let remaining = repo.update_roles(&org_id, &user_id, vec![]).await.unwrap();
        assert!(remaining.is_none());
        assert!(repo.find_mapping(&user_id, &org_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_assign_owner_mirrors_onto_organization() {
        let db = new_memory().await.unwrap();
        let (org_id, user) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db.clone());
        let user_id = user.id.clone().unwrap().to_string();

        repo.add_user(&org_id, "jane@example.com").await.unwrap();
        let mapping = repo.assign_owner(&org_id, &user).await.unwrap();
        assert!(mapping.roles.contains(&Role::Owner));
        assert!(mapping.roles.contains(&Role::Employee));

        let org = OrganizationRepository::new(db)
            .find_by_id(&org_id)
            .await
            .unwrap()
            .unwrap();
        let owner = org.owner.unwrap();
        assert_eq!(owner.email, "jane@example.com");
        assert_eq!(owner.uid.to_string(), user_id);
    }

    #[tokio::test]
    async fn test_remove_owner_clears_mirror_and_empty_mapping() {
        let db = new_memory().await.unwrap();
        let (org_id, user) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db.clone());
        let user_id = user.id.clone().unwrap().to_string();

        // Owner role only, so revoking it empties the mapping
        repo.assign_owner(&org_id, &user).await.unwrap();
        let remaining = repo.remove_owner(&org_id, &user_id).await.unwrap();
        assert!(remaining.is_none());
        assert!(repo.find_mapping(&user_id, &org_id).await.unwrap().is_none());

        let org = OrganizationRepository::new(db)
            .find_by_id(&org_id)
            .await
            .unwrap()
            .unwrap();
        assert!(org.owner.is_none());
    }

    #[tokio::test]
    async fn test_listing_skips_deleted_organizations() {
        let db = new_memory().await.unwrap();
        let (org_id, user) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db.clone());
        let user_id = user.id.unwrap().to_string();

        repo.add_user(&org_id, "jane@example.com").await.unwrap();
        OrganizationRepository::new(db).delete(&org_id).await.unwrap();

        let orgs = repo.find_organizations_by_user(&user_id).await.unwrap();
        assert!(orgs.is_empty());
    }

    #[tokio::test]
    async fn test_members_listing_joins_identity() {
        let db = new_memory().await.unwrap();
        let (org_id, _) = seed(&db).await;
        let repo = OrganizationUserRepository::new(db);

        repo.add_user(&org_id, "jane@example.com").await.unwrap();
        let members = repo.members(&org_id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, "jane@example.com");
        assert_eq!(members[0].first_name, "Jane");
        assert_eq!(members[0].roles, vec![Role::Employee]);
    }
}
