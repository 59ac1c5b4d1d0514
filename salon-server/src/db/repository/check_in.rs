//! Check-In Repository

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{CheckIn, CheckInCreate, Client, sort_queue};

#[derive(Clone)]
pub struct CheckInRepository {
    base: BaseRepository,
}

impl CheckInRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Queue a client. Name and day key are denormalized at creation.
    pub async fn create(&self, organization_id: &str, data: CheckInCreate) -> RepoResult<CheckIn> {
        let client_thing: RecordId = parse_id(&data.client_id)?;
        let client: Option<Client> = self.base.db().select(client_thing.clone()).await?;
        let client = client
            .ok_or_else(|| RepoError::NotFound(format!("Client {} not found", data.client_id)))?;

        let org: RecordId = parse_id(organization_id)?;
        let now = Utc::now();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE check_in SET
                    organization_id = $org,
                    client_id = $client,
                    client_name = $client_name,
                    service = $service,
                    check_in_time = $check_in_time,
                    date = $date,
                    is_in_service = false
                RETURN AFTER"#,
            )
            .bind(("org", org))
            .bind(("client", client_thing))
            .bind(("client_name", client.display_name()))
            .bind(("service", data.service))
            .bind(("check_in_time", now.to_rfc3339()))
            .bind(("date", now.format("%Y-%m-%d").to_string()))
            .await?;

        let created: Option<CheckIn> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create check-in".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CheckIn>> {
        let thing: RecordId = parse_id(id)?;
        let entry: Option<CheckIn> = self.base.db().select(thing).await?;
        Ok(entry)
    }

    /// The day's queue, waiting entries first, enriched with the client's
    /// visit history for the floor display.
    pub async fn find_by_date(
        &self,
        organization_id: &str,
        date: &str,
    ) -> RepoResult<Vec<CheckIn>> {
        let org: RecordId = parse_id(organization_id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM check_in WHERE organization_id = $org AND date = $date")
            .bind(("org", org))
            .bind(("date", date.to_string()))
            .await?;
        let mut entries: Vec<CheckIn> = result.take(0)?;

        for entry in &mut entries {
            let client: Option<Client> = self.base.db().select(entry.client_id.clone()).await?;
            if let Some(client) = client {
                entry.visits_before_today = Some(client.number_of_visits.saturating_sub(1));
                entry.last_visit_rating = client.last_visit_rating;
            }
        }

        sort_queue(&mut entries);
        Ok(entries)
    }

    /// Flip the in-service flag; moving an entry out of the waiting group.
    pub async fn set_in_service(&self, id: &str, in_service: bool) -> RepoResult<CheckIn> {
        let thing: RecordId = parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_in_service = $in_service RETURN AFTER")
            .bind(("thing", thing))
            .bind(("in_service", in_service))
            .await?;
        result
            .take::<Option<CheckIn>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Check-in {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::new_memory;
    use crate::db::models::{ClientSave, OrganizationCreate};
    use crate::db::repository::{ClientRepository, OrganizationRepository};

    async fn seed(db: &Surreal<Db>) -> (String, String) {
        let org_id = OrganizationRepository::new(db.clone())
            .create(OrganizationCreate {
                name: "Salon".to_string(),
                logo_url: None,
            })
            .await
            .unwrap()
            .id
            .unwrap()
            .to_string();
        let client = ClientRepository::new(db.clone())
            .save(
                &org_id,
                ClientSave {
                    first_name: "Amy".to_string(),
                    last_name: "Liu".to_string(),
                    phone: "555-0101".to_string(),
                    email: None,
                    last_visit_rating: None,
                    agree_to_terms: true,
                },
            )
            .await
            .unwrap();
        (org_id, client.id.unwrap().to_string())
    }

    #[tokio::test]
    async fn test_create_denormalizes_name_and_date() {
        let db = new_memory().await.unwrap();
        let (org_id, client_id) = seed(&db).await;
        let repo = CheckInRepository::new(db);

        let entry = repo
            .create(
                &org_id,
                CheckInCreate {
                    client_id,
                    service: "haircut".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(entry.client_name, "Amy Liu");
        assert!(!entry.is_in_service);
        assert_eq!(entry.date.len(), 10);
        assert!(entry.check_in_time.starts_with(&entry.date));
    }

    #[tokio::test]
    async fn test_unknown_client_rejected() {
        let db = new_memory().await.unwrap();
        let (org_id, _) = seed(&db).await;
        let repo = CheckInRepository::new(db);

        let err = repo
            .create(
                &org_id,
                CheckInCreate {
                    client_id: "client:nope".to_string(),
                    service: "haircut".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_queue_enrichment_and_order() {
        let db = new_memory().await.unwrap();
        let (org_id, client_id) = seed(&db).await;
        let repo = CheckInRepository::new(db);

        let first = repo
            .create(
                &org_id,
                CheckInCreate {
                    client_id: client_id.clone(),
                    service: "haircut".to_string(),
                },
            )
            .await
            .unwrap();
        repo.create(
            &org_id,
            CheckInCreate {
                client_id,
                service: "color".to_string(),
            },
        )
        .await
        .unwrap();

        // The first arrival starts service; it drops behind the waiting entry
        repo.set_in_service(&first.id.unwrap().to_string(), true)
            .await
            .unwrap();

        let date = first.date.clone();
        let queue = repo.find_by_date(&org_id, &date).await.unwrap();
        assert_eq!(queue.len(), 2);
        assert!(!queue[0].is_in_service);
        assert!(queue[1].is_in_service);
        assert_eq!(queue[0].visits_before_today, Some(0));
    }
}
