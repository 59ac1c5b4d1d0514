//! Client Repository
//!
//! Clients are keyed by phone number within an organization. "Saving" from
//! the check-in form is an upsert: a repeat visit updates the record and
//! bumps the visit counter.

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Client, ClientSave};

#[derive(Clone)]
pub struct ClientRepository {
    base: BaseRepository,
}

impl ClientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Client>> {
        let thing = parse_id(id)?;
        let client: Option<Client> = self.base.db().select(thing).await?;
        Ok(client)
    }

    pub async fn find_by_phone(
        &self,
        organization_id: &str,
        phone: &str,
    ) -> RepoResult<Option<Client>> {
        let org: RecordId = parse_id(organization_id)?;
        let phone = phone.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM client
                 WHERE organization_id = $org AND phone = $phone LIMIT 1",
            )
            .bind(("org", org))
            .bind(("phone", phone))
            .await?;
        let clients: Vec<Client> = result.take(0)?;
        Ok(clients.into_iter().next())
    }

    /// Upsert by phone number. First save starts the visit counter at 1;
    /// every repeat save increments it.
    pub async fn save(&self, organization_id: &str, data: ClientSave) -> RepoResult<Client> {
        if data.phone.trim().is_empty() {
            return Err(RepoError::Validation("Phone number is required".to_string()));
        }
        if data.first_name.trim().is_empty() {
            return Err(RepoError::Validation("First name is required".to_string()));
        }

        match self.find_by_phone(organization_id, &data.phone).await? {
            Some(existing) => {
                let thing = existing
                    .id
                    .ok_or_else(|| RepoError::Database("Client record without id".to_string()))?;
                let mut result = self
                    .base
                    .db()
                    .query(
                        r#"UPDATE $thing SET
                            first_name = $first_name,
                            last_name = $last_name,
                            email = $email OR email,
                            last_visit_rating = $last_visit_rating OR last_visit_rating,
                            agree_to_terms = $agree_to_terms,
                            number_of_visits = number_of_visits + 1
                        RETURN AFTER"#,
                    )
                    .bind(("thing", thing))
                    .bind(("first_name", data.first_name))
                    .bind(("last_name", data.last_name))
                    .bind(("email", data.email))
                    .bind(("last_visit_rating", data.last_visit_rating))
                    .bind(("agree_to_terms", data.agree_to_terms))
                    .await?;
                result
                    .take::<Option<Client>>(0)?
                    .ok_or_else(|| RepoError::Database("Failed to update client".to_string()))
            }
            None => {
                let org: RecordId = parse_id(organization_id)?;
                let mut result = self
                    .base
                    .db()
                    .query(
                        r#"CREATE client SET
                            organization_id = $org,
                            first_name = $first_name,
                            last_name = $last_name,
                            phone = $phone,
                            email = $email,
                            number_of_visits = 1,
                            last_visit_rating = $last_visit_rating,
                            agree_to_terms = $agree_to_terms,
                            created_at = $created_at
                        RETURN AFTER"#,
                    )
                    .bind(("org", org))
                    .bind(("first_name", data.first_name))
                    .bind(("last_name", data.last_name))
                    .bind(("phone", data.phone))
                    .bind(("email", data.email))
                    .bind(("last_visit_rating", data.last_visit_rating))
                    .bind(("agree_to_terms", data.agree_to_terms))
                    .bind(("created_at", Utc::now().to_rfc3339()))
                    .await?;
                result
                    .take::<Option<Client>>(0)?
                    .ok_or_else(|| RepoError::Database("Failed to create client".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::new_memory;
    use crate::db::models::OrganizationCreate;
    use crate::db::repository::OrganizationRepository;

    async fn seed_org(db: &Surreal<Db>) -> String {
        OrganizationRepository::new(db.clone())
            .create(OrganizationCreate {
                name: "Salon".to_string(),
                logo_url: None,
            })
            .await
            .unwrap()
            .id
            .unwrap()
            .to_string()
    }

    fn save_dto(first_name: &str) -> ClientSave {
        ClientSave {
            first_name: first_name.to_string(),
            last_name: "Liu".to_string(),
            phone: "555-0101".to_string(),
            email: None,
            last_visit_rating: None,
            agree_to_terms: true,
        }
    }

    #[tokio::test]
    async fn test_first_save_starts_at_one_visit() {
        let db = new_memory().await.unwrap();
        let org_id = seed_org(&db).await;
        let repo = ClientRepository::new(db);

        let client = repo.save(&org_id, save_dto("Amy")).await.unwrap();
        assert_eq!(client.number_of_visits, 1);
        assert!(client.agree_to_terms);
        assert_eq!(client.display_name(), "Amy Liu");
    }

    #[tokio::test]
    async fn test_repeat_save_increments_visits() {
        let db = new_memory().await.unwrap();
        let org_id = seed_org(&db).await;
        let repo = ClientRepository::new(db);

        repo.save(&org_id, save_dto("Amy")).await.unwrap();
        let second = repo
            .save(
                &org_id,
                ClientSave {
                    last_visit_rating: Some(5),
                    ..save_dto("Amelia")
                },
            )
            .await
            .unwrap();
        assert_eq!(second.number_of_visits, 2);
        assert_eq!(second.first_name, "Amelia");
        assert_eq!(second.last_visit_rating, Some(5));
    }

    #[tokio::test]
    async fn test_empty_phone_rejected() {
        let db = new_memory().await.unwrap();
        let org_id = seed_org(&db).await;
        let repo = ClientRepository::new(db);

        let err = repo
            .save(
                &org_id,
                ClientSave {
                    phone: " ".to_string(),
                    ..save_dto("Amy")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
