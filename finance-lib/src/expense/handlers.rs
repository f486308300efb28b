use crate::error::HandlerError;
use actix_web::{web, HttpResponse, Responder};
use finance_repo::expense_repo::{ExpenseRepo, NewExpense};
use finance_repo::income_repo::IncomeRepo;
use std::sync::Arc;
use tracing::{info, warn, Span};

use super::validate;

#[get("")]
pub async fn get_all_expenses(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
) -> Result<impl Responder, HandlerError> {
    let expenses = expense_repo.get_all_expenses().await?;
    Ok(HttpResponse::Ok().json(expenses))
}

#[get("/{expense_id}")]
pub async fn get_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    expense_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let expense = expense_repo.get_expense(expense_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[post("")]
pub async fn create_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    new_expense: web::Json<NewExpense>,
) -> Result<impl Responder, HandlerError> {
    let new_expense = new_expense.into_inner();
    let month = validate(&new_expense)?;
    Span::current().record("month", &tracing::field::display(month));

    if income_repo.find_income_for_month(month).await?.is_none() {
        warn!(%month, "Rejected expense for month without income");
        return Err(HandlerError::MissingIncome(month));
    }

    let expense = expense_repo.create_expense(new_expense).await?;
    info!(expense_id = expense.id, "Created expense");
    Ok(HttpResponse::Ok().json(expense))
}

#[put("/{expense_id}")]
pub async fn update_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    expense_id: web::Path<i32>,
    updated_expense: web::Json<NewExpense>,
) -> Result<impl Responder, HandlerError> {
    let updated_expense = updated_expense.into_inner();
    validate(&updated_expense)?;

    let expense = expense_repo
        .update_expense(expense_id.into_inner(), updated_expense)
        .await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[delete("/{expense_id}")]
pub async fn delete_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    expense_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let expense = expense_repo.delete_expense(expense_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(expense))
}
