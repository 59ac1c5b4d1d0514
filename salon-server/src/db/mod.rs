//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus the model and repository layers.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use tracing::info;

use repository::RepoResult;

const NAMESPACE: &str = "salon";
const DATABASE: &str = "salon";

/// Open the on-disk database and apply schema definitions.
pub async fn connect(path: &Path) -> RepoResult<Surreal<Db>> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    define_schema(&db).await?;
    info!(path = %path.display(), "database ready");
    Ok(db)
}

/// In-memory database for tests.
pub async fn new_memory() -> RepoResult<Surreal<Db>> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    define_schema(&db).await?;
    Ok(db)
}

/// Idempotent index definitions; run on every startup.
async fn define_schema(db: &Surreal<Db>) -> RepoResult<()> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS user_email ON TABLE user COLUMNS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS org_user_pair ON TABLE organization_user
            COLUMNS user_id, organization_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS report_day ON TABLE end_of_day_report
            COLUMNS organization_id, date UNIQUE;
        DEFINE INDEX IF NOT EXISTS client_phone ON TABLE client
            COLUMNS organization_id, phone;
        DEFINE INDEX IF NOT EXISTS check_in_day ON TABLE check_in
            COLUMNS organization_id, date;
        DEFINE INDEX IF NOT EXISTS sale_day ON TABLE sale
            COLUMNS organization_id, date;
        "#,
    )
    .await?;
    Ok(())
}
