//! End-Of-Day Report Repository
//!
//! One report per organization per day. Saving over an existing day replaces
//! it wholesale; the last submission before close wins.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::EndOfDayReport;

#[derive(Clone)]
pub struct ReportRepository {
    base: BaseRepository,
}

impl ReportRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_date(
        &self,
        organization_id: &str,
        date: &str,
    ) -> RepoResult<Option<EndOfDayReport>> {
        let org: RecordId = parse_id(organization_id)?;
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM end_of_day_report
                 WHERE organization_id = $org AND date = $date LIMIT 1",
            )
            .bind(("org", org))
            .bind(("date", date.to_string()))
            .await?;
        let reports: Vec<EndOfDayReport> = result.take(0)?;
        Ok(reports.into_iter().next())
    }

    /// Reports for the organization, newest first, optionally bounded to a
    /// date range (inclusive).
    pub async fn find_all(
        &self,
        organization_id: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> RepoResult<Vec<EndOfDayReport>> {
        let org: RecordId = parse_id(organization_id)?;
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM end_of_day_report
                 WHERE organization_id = $org
                   AND ($from = NONE OR date >= $from)
                   AND ($to = NONE OR date <= $to)
                 ORDER BY date DESC",
            )
            .bind(("org", org))
            .bind(("from", from.map(str::to_string)))
            .bind(("to", to.map(str::to_string)))
            .await?;
        let reports: Vec<EndOfDayReport> = result.take(0)?;
        Ok(reports)
    }

    /// Upsert keyed on (organization, date).
    pub async fn save(&self, report: EndOfDayReport) -> RepoResult<EndOfDayReport> {
        let org_key = report.organization_id.to_string();
        let existing = self.find_by_date(&org_key, &report.date).await?;

        // Field list shared by both branches; the organization link must be
        // bound as a RecordId, never serialized through the model
        const FIELDS: &str = r#"
            organization_id = $org,
            date = $date,
            total_sale = $total_sale,
            cash = $cash,
            debit = $debit,
            service_discount = $service_discount,
            giftcard_buy = $giftcard_buy,
            giftcard_redeem = $giftcard_redeem,
            expense = $expense,
            expense_note = $expense_note,
            other_income = $other_income,
            income_note = $income_note,
            result = $result,
            verdict = $verdict,
            employee_summaries = $employee_summaries,
            submitted_by = $submitted_by,
            created_at = $created_at"#;

        let statement = match &existing {
            Some(_) => format!("UPDATE $thing SET {} RETURN AFTER", FIELDS),
            None => format!("CREATE end_of_day_report SET {} RETURN AFTER", FIELDS),
        };

        let mut query = self.base.db().query(statement);
        if let Some(previous) = existing {
            let thing = previous
                .id
                .ok_or_else(|| RepoError::Database("Report record without id".to_string()))?;
            query = query.bind(("thing", thing));
        }

        let mut result = query
            .bind(("org", report.organization_id))
            .bind(("date", report.date))
            .bind(("total_sale", report.total_sale))
            .bind(("cash", report.cash))
            .bind(("debit", report.debit))
            .bind(("service_discount", report.service_discount))
            .bind(("giftcard_buy", report.giftcard_buy))
            .bind(("giftcard_redeem", report.giftcard_redeem))
            .bind(("expense", report.expense))
            .bind(("expense_note", report.expense_note))
            .bind(("other_income", report.other_income))
            .bind(("income_note", report.income_note))
            .bind(("result", report.result))
            .bind(("verdict", report.verdict))
            .bind(("employee_summaries", report.employee_summaries))
            .bind(("submitted_by", report.submitted_by))
            .bind(("created_at", report.created_at))
            .await?;

        let saved: Option<EndOfDayReport> = result.take(0)?;
        saved.ok_or_else(|| RepoError::Database("Failed to save report".to_string()))
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

    fn report(org_id: &str, date: &str, cash: f64) -> EndOfDayReport {
        EndOfDayReport {
            id: None,
            organization_id: org_id.parse().unwrap(),
            date: date.to_string(),
            total_sale: 500.0,
            cash,
            debit: 113.0,
            service_discount: 0.0,
            giftcard_buy: 0.0,
            giftcard_redeem: 0.0,
            expense: 0.0,
            expense_note: None,
            other_income: 0.0,
            income_note: None,
            result: 0.0,
            verdict: "OK".to_string(),
            employee_summaries: vec![],
            submitted_by: "jane@example.com".to_string(),
            created_at: "2026-03-01T21:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_then_find() {
        let db = new_memory().await.unwrap();
        let org_id = seed_org(&db).await;
        let repo = ReportRepository::new(db);

        repo.save(report(&org_id, "2026-03-01", 400.0)).await.unwrap();
        let found = repo.find_by_date(&org_id, "2026-03-01").await.unwrap();
        assert_eq!(found.unwrap().cash, 400.0);
    }

    #[tokio::test]
    async fn test_second_save_replaces_the_day() {
        let db = new_memory().await.unwrap();
        let org_id = seed_org(&db).await;
        let repo = ReportRepository::new(db);

        repo.save(report(&org_id, "2026-03-01", 400.0)).await.unwrap();
        repo.save(report(&org_id, "2026-03-01", 450.0)).await.unwrap();

        let all = repo.find_all(&org_id, None, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].cash, 450.0);
    }

    #[tokio::test]
    async fn test_range_listing_newest_first() {
        let db = new_memory().await.unwrap();
        let org_id = seed_org(&db).await;
        let repo = ReportRepository::new(db);

        repo.save(report(&org_id, "2026-03-01", 1.0)).await.unwrap();
        repo.save(report(&org_id, "2026-03-02", 2.0)).await.unwrap();
        repo.save(report(&org_id, "2026-03-03", 3.0)).await.unwrap();

        let window = repo
            .find_all(&org_id, Some("2026-03-02"), Some("2026-03-03"))
            .await
            .unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].date, "2026-03-03");
    }
}
