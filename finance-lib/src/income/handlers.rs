use crate::error::HandlerError;
use actix_web::{web, HttpResponse, Responder};
use chrono::{Datelike, Utc};
use finance_repo::income_repo::{IncomeRepo, NewIncome};
use finance_repo::year_month::YearMonth;
use std::sync::Arc;
use tracing::{info, Span};

use super::SetIncome;

#[get("")]
pub async fn get_all_income(
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
) -> Result<impl Responder, HandlerError> {
    let income = income_repo.get_all_income().await?;
    Ok(HttpResponse::Ok().json(income))
}

#[post("")]
pub async fn set_income(
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    set_income: web::Json<SetIncome>,
) -> Result<impl Responder, HandlerError> {
    let SetIncome {
        income,
        month,
        year,
    } = set_income.into_inner();
    let year = year.unwrap_or_else(|| Utc::now().year());
    let month = YearMonth::new(year, month).ok_or_else(|| {
        HandlerError::Validation(format!("Invalid month {} for year {}", month, year))
    })?;
    Span::current().record("month", &tracing::field::display(month));

    let income = income_repo
        .create_income(NewIncome::for_month(income, month))
        .await?;
    info!(income_id = income.id, %month, "Set monthly income");
    Ok(HttpResponse::Ok().json(income))
}
