use crate::error::HandlerError;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use finance_repo::expense_repo::ExpenseRepo;
use finance_repo::income_repo::IncomeRepo;
use finance_repo::year_month::YearMonth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, Span};

use super::charts::{self, DashboardCharts, MonthlyCharts};
use super::engine::{self, DrillDown, MonthBreakdown, MonthlyView};

#[derive(Deserialize)]
pub struct MonthlyQuery {
    pub month: Option<YearMonth>,
}

#[derive(Serialize)]
pub struct Dashboard {
    #[serde(flatten)]
    pub view: MonthBreakdown,
    pub charts: DashboardCharts,
}

#[derive(Serialize)]
pub struct MonthlyReport {
    #[serde(flatten)]
    pub view: MonthlyView,
    pub charts: MonthlyCharts,
}

#[get("/dashboard")]
pub async fn get_dashboard(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
) -> Result<impl Responder, HandlerError> {
    let today = Utc::now().date_naive();
    let month = YearMonth::of(today);
    Span::current().record("month", &tracing::field::display(month));

    let expenses = expense_repo.get_expenses_in_month(month).await?;
    let income = income_repo.get_all_income().await?;

    let view = engine::current_month_view(&expenses, &income, today);
    let charts = charts::dashboard_charts(&view, &expenses);
    Ok(HttpResponse::Ok().json(Dashboard { view, charts }))
}

#[get("/monthly")]
pub async fn get_monthly_report(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    query: web::Query<MonthlyQuery>,
) -> Result<impl Responder, HandlerError> {
    let selected_month = query.into_inner().month;
    if let Some(month) = selected_month {
        Span::current().record("month", &tracing::field::display(month));
    }

    let expenses = expense_repo.get_all_expenses().await?;
    let income = income_repo.get_all_income().await?;

    let view = engine::monthly_view(&expenses, &income, selected_month);
    if let Some(DrillDown::PeriodNotFound { month }) = &view.drill_down {
        debug!(%month, "No expenses for selected month");
    }
    let charts = charts::monthly_charts(&view, &expenses);
    Ok(HttpResponse::Ok().json(MonthlyReport { view, charts }))
}
