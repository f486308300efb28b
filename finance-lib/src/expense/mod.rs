use actix_web::{web, Scope};
use finance_repo::expense_repo::NewExpense;
use finance_repo::year_month::YearMonth;

use crate::error::HandlerError;

mod handlers;

const MAX_DESCRIPTION_LENGTH: usize = 100;

pub fn expense_service() -> Scope {
    web::scope("/expenses")
        .service(handlers::get_all_expenses)
        .service(handlers::get_expense)
        .service(handlers::create_expense)
        .service(handlers::update_expense)
        .service(handlers::delete_expense)
}

/// Malformed amounts and dates are already rejected while parsing the JSON body.
/// Returns the month the expense falls in.
fn validate(expense: &NewExpense) -> Result<YearMonth, HandlerError> {
    if expense.description.trim().is_empty() {
        return Err(HandlerError::Validation(
            "Description must not be empty".to_owned(),
        ));
    }
    if expense.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(HandlerError::Validation(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    YearMonth::try_from(expense.date).map_err(|e| HandlerError::Validation(e.to_string()))
}
