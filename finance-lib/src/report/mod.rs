use actix_web::{web, Scope};

pub mod charts;
pub mod engine;
mod handlers;

pub fn report_service() -> Scope {
    web::scope("/reports")
        .service(handlers::get_dashboard)
        .service(handlers::get_monthly_report)
}
