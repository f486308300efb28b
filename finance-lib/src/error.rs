use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use finance_repo::expense_repo::ExpenseRepoError;
use finance_repo::income_repo::IncomeRepoError;
use finance_repo::year_month::YearMonth;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Expense with id {0} not found")]
    ExpenseNotFound(i32),
    #[error("{0}")]
    Validation(String),
    #[error("You cannot add expenses for {0} without setting a monthly income first.")]
    MissingIncome(YearMonth),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ExpenseRepoError> for HandlerError {
    fn from(e: ExpenseRepoError) -> Self {
        match e {
            ExpenseRepoError::ExpenseNotFound(id) => HandlerError::ExpenseNotFound(id),
            ExpenseRepoError::DateOutOfRange(e) => HandlerError::Validation(e.to_string()),
            ExpenseRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<IncomeRepoError> for HandlerError {
    fn from(e: IncomeRepoError) -> Self {
        match e {
            IncomeRepoError::DateOutOfRange(e) => HandlerError::Validation(e.to_string()),
            IncomeRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl HandlerError {
    fn title(&self) -> &'static str {
        match self {
            HandlerError::ExpenseNotFound(_) => "Not found",
            HandlerError::Validation(_) => "Invalid input",
            HandlerError::MissingIncome(_) => "Missing income",
            HandlerError::Other(_) => "Internal server error",
        }
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Validation(_) | HandlerError::MissingIncome(_) => StatusCode::BAD_REQUEST,
            HandlerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let detail = match self {
            HandlerError::Other(e) => {
                error!(err = ?e, "Request failed");
                // internals stay in the logs
                None
            }
            _ => Some(self.to_string()),
        };
        let error_body = serde_json::json!({
            "error": self.title(),
            "detail": detail,
        });
        HttpResponse::build(self.status_code()).json(error_body)
    }
}
