use crate::year_month::{DateOutOfRange, YearMonth};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[async_trait]
pub trait ExpenseRepo: Sync + Send {
    async fn get_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError>;

    /// All expenses, oldest first.
    async fn get_all_expenses(&self) -> Result<Vec<Expense>, ExpenseRepoError>;

    async fn get_expenses_in_month(
        &self,
        month: YearMonth,
    ) -> Result<Vec<Expense>, ExpenseRepoError>;

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense, ExpenseRepoError>;

    async fn update_expense(
        &self,
        expense_id: i32,
        updated_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError>;

    async fn delete_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError>;
}

#[derive(Error, Debug)]
pub enum ExpenseRepoError {
    #[error("Expense with id {0} not found")]
    ExpenseNotFound(i32),
    #[error(transparent)]
    DateOutOfRange(#[from] DateOutOfRange),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Expense {
    pub id: i32,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Expense {
    pub const fn new(id: i32, description: String, amount: Decimal, date: NaiveDate) -> Expense {
        Expense {
            id,
            description,
            amount,
            date,
        }
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

impl PartialOrd for Expense {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expense {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl NewExpense {
    pub const fn new(description: String, amount: Decimal, date: NaiveDate) -> NewExpense {
        NewExpense {
            description,
            amount,
            date,
        }
    }

    pub fn to_expense(self, id: i32) -> Expense {
        Expense::new(id, self.description, self.amount, self.date)
    }
}
