//! Organization Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Organization, OrganizationCreate, OrganizationUpdate, OwnerRef};

#[derive(Clone)]
pub struct OrganizationRepository {
    base: BaseRepository,
}

impl OrganizationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Organization>> {
        let orgs: Vec<Organization> = self
            .base
            .db()
            .query("SELECT * FROM organization ORDER BY name")
            .await?
            .take(0)?;
        Ok(orgs)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Organization>> {
        let thing = parse_id(id)?;
        let org: Option<Organization> = self.base.db().select(thing).await?;
        Ok(org)
    }

    pub async fn create(&self, data: OrganizationCreate) -> RepoResult<Organization> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE organization SET
                    name = $name,
                    logo_url = $logo_url,
                    owner = NONE,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("logo_url", data.logo_url))
            .bind(("created_at", Utc::now().to_rfc3339()))
            .await?;

        let created: Option<Organization> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create organization".to_string()))
    }

    pub async fn update(&self, id: &str, data: OrganizationUpdate) -> RepoResult<Organization> {
        let thing = parse_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Organization {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    logo_url = $logo_url OR logo_url
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("logo_url", data.logo_url))
            .await?;

        result
            .take::<Option<Organization>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Organization {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Organization {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Write or clear the denormalized owner mirror on the organization
    /// document. Role mappings are handled separately by the caller.
    pub async fn set_owner(&self, id: &str, owner: Option<OwnerRef>) -> RepoResult<Organization> {
        let thing = parse_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Organization {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET owner = $owner RETURN AFTER")
            .bind(("thing", thing))
            .bind(("owner", owner))
            .await?;

        result
            .take::<Option<Organization>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Organization {} not found", id)))
    }
}
