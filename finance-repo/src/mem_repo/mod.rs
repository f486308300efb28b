use crate::expense_repo::ExpenseRepo;
use crate::income_repo::IncomeRepo;
use std::sync::Arc;

mod expense_repo;
mod income_repo;

pub use expense_repo::MemExpenseRepo;
pub use income_repo::MemIncomeRepo;

pub fn create_repos() -> (Arc<dyn ExpenseRepo>, Arc<dyn IncomeRepo>) {
    let expense_repo = MemExpenseRepo::new();
    let income_repo = MemIncomeRepo::new();

    (Arc::new(expense_repo), Arc::new(income_repo))
}
