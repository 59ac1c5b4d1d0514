//! Sale Repository

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Sale, SaleCreate, SaleUpdate, User};

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Record a sale for the given employee. The employee's display name is
    /// resolved once here; unpaid until settled at the cashier desk.
    pub async fn create(
        &self,
        organization_id: &str,
        employee_id: &str,
        data: SaleCreate,
    ) -> RepoResult<Sale> {
        if data.amount < 0.0 {
            return Err(RepoError::Validation("Amount cannot be negative".to_string()));
        }

        let employee_thing: RecordId = parse_id(employee_id)?;
        let employee: Option<User> = self.base.db().select(employee_thing.clone()).await?;
        let employee = employee
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", employee_id)))?;

        let org: RecordId = parse_id(organization_id)?;
        let now = Utc::now();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE sale SET
                    organization_id = $org,
                    employee_id = $employee,
                    employee_name = $employee_name,
                    amount = $amount,
                    combo_num = $combo_num,
                    note = $note,
                    paid = false,
                    date = $date,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("org", org))
            .bind(("employee", employee_thing))
            .bind(("employee_name", employee.display_name()))
            .bind(("amount", data.amount))
            .bind(("combo_num", data.combo_num))
            .bind(("note", data.note))
            .bind(("date", now.format("%Y-%m-%d").to_string()))
            .bind(("created_at", now.to_rfc3339()))
            .await?;

        let created: Option<Sale> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create sale".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Sale>> {
        let thing: RecordId = parse_id(id)?;
        let sale: Option<Sale> = self.base.db().select(thing).await?;
        Ok(sale)
    }

    /// A day's sales, optionally narrowed to paid/unpaid or one employee.
    pub async fn find_by_date(
        &self,
        organization_id: &str,
        date: &str,
        paid: Option<bool>,
        employee_id: Option<&str>,
    ) -> RepoResult<Vec<Sale>> {
        let org: RecordId = parse_id(organization_id)?;
        let employee = match employee_id {
            Some(id) => Some(parse_id(id)?),
            None => None,
        };
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM sale
                 WHERE organization_id = $org AND date = $date
                   AND ($paid = NONE OR paid = $paid)
                   AND ($employee = NONE OR employee_id = $employee)
                 ORDER BY created_at",
            )
            .bind(("org", org))
            .bind(("date", date.to_string()))
            .bind(("paid", paid))
            .bind(("employee", employee))
            .await?;
        let sales: Vec<Sale> = result.take(0)?;
        Ok(sales)
    }

    pub async fn update(&self, id: &str, data: SaleUpdate) -> RepoResult<Sale> {
        let thing: RecordId = parse_id(id)?;
        if let Some(amount) = data.amount
            && amount < 0.0
        {
            return Err(RepoError::Validation("Amount cannot be negative".to_string()));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    amount = IF $has_amount THEN $amount ELSE amount END,
                    combo_num = IF $has_combo THEN $combo_num ELSE combo_num END,
                    note = $note OR note,
                    paid = IF $has_paid THEN $paid ELSE paid END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("has_amount", data.amount.is_some()))
            .bind(("amount", data.amount))
            .bind(("has_combo", data.combo_num.is_some()))
            .bind(("combo_num", data.combo_num))
            .bind(("note", data.note))
            .bind(("has_paid", data.paid.is_some()))
            .bind(("paid", data.paid))
            .await?;

        result
            .take::<Option<Sale>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Sale {} not found", id)))
    }

    /// Settle a combo: every sale of that day sharing the combo number is
    /// marked paid with one call. Combo 0 is "no combo" and cannot be
    /// settled this way.
    pub async fn settle_combo(
        &self,
        organization_id: &str,
        date: &str,
        combo_num: u32,
    ) -> RepoResult<Vec<Sale>> {
        if combo_num == 0 {
            return Err(RepoError::Validation(
                "Combo number must be at least 1".to_string(),
            ));
        }
        let org: RecordId = parse_id(organization_id)?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE sale SET paid = true
                 WHERE organization_id = $org AND date = $date AND combo_num = $combo_num
                 RETURN AFTER",
            )
            .bind(("org", org))
            .bind(("date", date.to_string()))
            .bind(("combo_num", combo_num))
            .await?;
        let settled: Vec<Sale> = result.take(0)?;
        Ok(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::new_memory;
    use crate::db::models::{OrganizationCreate, UserCreate};
    use crate::db::repository::{OrganizationRepository, UserRepository};

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
        let user = UserRepository::new(db.clone())
            .create(UserCreate {
                email: "jane@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            })
            .await
            .unwrap();
        (org_id, user.id.unwrap().to_string())
    }

    fn sale_dto(amount: f64, combo_num: u32) -> SaleCreate {
        SaleCreate {
            amount,
            combo_num,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_resolves_employee_name_and_is_unpaid() {
        let db = new_memory().await.unwrap();
        let (org_id, employee_id) = seed(&db).await;
        let repo = SaleRepository::new(db);

        let sale = repo
            .create(&org_id, &employee_id, sale_dto(45.0, 0))
            .await
            .unwrap();
        assert_eq!(sale.employee_name, "Jane Doe");
        assert!(!sale.paid);
        assert_eq!(sale.amount, 45.0);
        assert_eq!(sale.combo_num, 0);
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let db = new_memory().await.unwrap();
        let (org_id, employee_id) = seed(&db).await;
        let repo = SaleRepository::new(db);

        let err = repo
            .create(&org_id, &employee_id, sale_dto(-1.0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_paid_filter() {
        let db = new_memory().await.unwrap();
        let (org_id, employee_id) = seed(&db).await;
        let repo = SaleRepository::new(db);

        let a = repo
            .create(&org_id, &employee_id, sale_dto(45.0, 0))
            .await
            .unwrap();
        repo.create(&org_id, &employee_id, sale_dto(30.0, 0))
            .await
            .unwrap();
        let date = a.date.clone();
        repo.update(
            &a.id.unwrap().to_string(),
            SaleUpdate {
                paid: Some(true),
                ..SaleUpdate::default()
            },
        )
        .await
        .unwrap();

        let paid = repo
            .find_by_date(&org_id, &date, Some(true), None)
            .await
            .unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].amount, 45.0);

        let all = repo.find_by_date(&org_id, &date, None, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_settle_combo_marks_all_members_paid() {
        let db = new_memory().await.unwrap();
        let (org_id, employee_id) = seed(&db).await;
        let repo = SaleRepository::new(db);

        let a = repo
            .create(&org_id, &employee_id, sale_dto(45.0, 3))
            .await
            .unwrap();
        repo.create(&org_id, &employee_id, sale_dto(30.0, 3))
            .await
            .unwrap();
        let solo = repo
            .create(&org_id, &employee_id, sale_dto(20.0, 0))
            .await
            .unwrap();

        let settled = repo.settle_combo(&org_id, &a.date, 3).await.unwrap();
        assert_eq!(settled.len(), 2);
        assert!(settled.iter().all(|s| s.paid));

        let unpaid = repo
            .find_by_date(&org_id, &solo.date, Some(false), None)
            .await
            .unwrap();
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].amount, 20.0);
    }

    #[tokio::test]
    async fn test_settle_combo_zero_rejected() {
        let db = new_memory().await.unwrap();
        let (org_id, _) = seed(&db).await;
        let repo = SaleRepository::new(db);

        let err = repo.settle_combo(&org_id, "2026-08-29", 0).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
