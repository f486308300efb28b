pub mod expense_repo;
pub mod income_repo;
pub mod year_month;

// implementation modules
pub mod mem_repo;
pub mod sqlx_repo;
