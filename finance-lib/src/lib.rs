#[macro_use]
extern crate actix_web;

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::web::{Data, JsonConfig, QueryConfig, ServiceConfig};
use actix_web::HttpResponse;
use finance_repo::expense_repo::ExpenseRepo;
use finance_repo::income_repo::IncomeRepo;
use std::sync::Arc;

pub mod config;
mod error;
pub mod expense;
pub mod income;
pub mod report;
pub mod tracing;

pub use error::HandlerError;

/// Registers the repositories and every service of the application.
pub fn app_config_func(
    expense_repo: Arc<dyn ExpenseRepo>,
    income_repo: Arc<dyn IncomeRepo>,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(Data::new(expense_repo))
            .app_data(Data::new(income_repo))
            .app_data(json_config())
            .app_data(query_config())
            .service(expense::expense_service())
            .service(income::income_service())
            .service(report::report_service());
    }
}

fn bad_request(error: &str, detail: String) -> HttpResponse {
    let error_body = serde_json::json!({
        "error": error,
        "detail": detail,
    });
    HttpResponse::BadRequest()
        .content_type("application/json")
        .body(error_body.to_string())
}

fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, req| {
        ::tracing::error!(req_path = req.path(), %err);
        match err {
            JsonPayloadError::Deserialize(deserialize_err) => {
                let response =
                    bad_request("Unable to parse JSON payload", format!("{}", deserialize_err));
                InternalError::from_response(deserialize_err, response).into()
            }
            _ => err.into(),
        }
    })
}

fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, req| {
        ::tracing::error!(req_path = req.path(), %err);
        match err {
            QueryPayloadError::Deserialize(deserialize_err) => {
                let response =
                    bad_request("Unable to parse query string", format!("{}", deserialize_err));
                InternalError::from_response(deserialize_err, response).into()
            }
            _ => err.into(),
        }
    })
}
