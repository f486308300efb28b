use finance_repo::expense_repo::ExpenseRepo;
use finance_repo::income_repo::IncomeRepo;
use std::sync::Arc;

pub mod generator;

// each connection to an in-memory database sees its own database
const TEST_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

pub async fn build_repos(repo_type: RepoType) -> (Arc<dyn ExpenseRepo>, Arc<dyn IncomeRepo>) {
    match repo_type {
        RepoType::SQLx => finance_repo::sqlx_repo::create_repos(TEST_DATABASE_URL, 1)
            .await
            .unwrap(),
        RepoType::Mem => finance_repo::mem_repo::create_repos(),
    }
}
