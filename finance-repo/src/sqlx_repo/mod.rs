mod expense_repo;
mod income_repo;

use crate::expense_repo::ExpenseRepo;
use crate::income_repo::IncomeRepo;
use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub struct SQLxRepo {
    pool: SqlitePool,
}

impl SQLxRepo {
    pub fn new(pool: SqlitePool) -> SQLxRepo {
        SQLxRepo { pool }
    }
}

/// Connects to the SQLite database at `database_url`, creating it if needed, and brings the
/// schema up to date.
pub async fn create_repos(
    database_url: &str,
    max_pool_size: u32,
) -> Result<(Arc<dyn ExpenseRepo>, Arc<dyn IncomeRepo>), anyhow::Error> {
    let connect_options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database url {}", database_url))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_pool_size)
        // an in-memory database lives only as long as its connection
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await
        .context("Unable to connect to database")?;

    info!("Running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Unable to run migrations")?;

    let repo = Arc::new(SQLxRepo::new(pool));
    let expense_repo: Arc<dyn ExpenseRepo> = repo.clone();
    let income_repo: Arc<dyn IncomeRepo> = repo;
    Ok((expense_repo, income_repo))
}
