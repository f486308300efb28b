use actix_web::{web, Scope};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

mod handlers;

pub fn income_service() -> Scope {
    web::scope("/income")
        .service(handlers::get_all_income)
        .service(handlers::set_income)
}

/// Income declared for a month of `year`, or of the current year when `year` is omitted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SetIncome {
    pub income: Decimal,
    pub month: u32,
    pub year: Option<i32>,
}
