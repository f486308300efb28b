#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use rstest::*;
use tracing::info;
use tracing::Level;

use finance_repo::expense_repo::ExpenseRepo;
use finance_repo::income_repo::IncomeRepo;

macro_rules! build_app {
    ($expense_repo:expr, $income_repo:expr) => {{
        let app = App::new()
            .wrap(finance_lib::tracing::create_middleware())
            .configure(finance_lib::app_config_func($expense_repo, $income_repo));
        tracing::info!("Built app");
        app
    }};
}

macro_rules! set_income {
    (&$service:ident, $body:expr) => {{
        let request = TestRequest::post()
            .uri("/income")
            .set_json(&$body)
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when setting income",
            response.status()
        );
        let income: finance_repo::income_repo::Income = test::read_body_json(response).await;
        income
    }};
}

macro_rules! create_expense {
    (&$service:ident, $new_expense:expr) => {{
        let request = TestRequest::post()
            .uri("/expenses")
            .set_json(&$new_expense)
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when creating expense",
            response.status()
        );
        let expense: finance_repo::expense_repo::Expense = test::read_body_json(response).await;
        expense
    }};
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .try_init();
    info!("tracing initialized");
}

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

pub async fn build_repos(repo_type: RepoType) -> (Arc<dyn ExpenseRepo>, Arc<dyn IncomeRepo>) {
    match repo_type {
        RepoType::SQLx => finance_repo::sqlx_repo::create_repos("sqlite::memory:", 1)
            .await
            .unwrap(),
        RepoType::Mem => finance_repo::mem_repo::create_repos(),
    }
}

#[fixture]
pub fn repos() -> (Arc<dyn ExpenseRepo>, Arc<dyn IncomeRepo>) {
    finance_repo::mem_repo::create_repos()
}
