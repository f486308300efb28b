use crate::expense_repo::ExpenseRepoError::ExpenseNotFound;
use crate::expense_repo::{Expense, ExpenseRepo, ExpenseRepoError, NewExpense};
use crate::sqlx_repo::SQLxRepo;
use crate::year_month::YearMonth;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{query, query_as, query_scalar};
use std::str::FromStr;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct ExpenseEntry {
    id: i32,
    description: String,
    amount: String,
    date: NaiveDate,
}

impl TryFrom<ExpenseEntry> for Expense {
    type Error = anyhow::Error;

    fn try_from(value: ExpenseEntry) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&value.amount)
            .with_context(|| format!("Invalid amount stored for expense {}", value.id))?;
        Ok(Expense::new(value.id, value.description, amount, value.date))
    }
}

fn into_expenses(entries: Vec<ExpenseEntry>) -> Result<Vec<Expense>, ExpenseRepoError> {
    let expenses = entries
        .into_iter()
        .map(Expense::try_from)
        .collect::<Result<Vec<Expense>, anyhow::Error>>()?;
    Ok(expenses)
}

#[async_trait]
impl ExpenseRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError> {
        let entry: ExpenseEntry = query_as("SELECT * FROM expenses WHERE id = ?")
            .bind(expense_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to get expense {}", expense_id))?
            .ok_or(ExpenseNotFound(expense_id))?;
        Ok(entry.try_into()?)
    }

    #[instrument(skip(self))]
    async fn get_all_expenses(&self) -> Result<Vec<Expense>, ExpenseRepoError> {
        let entries: Vec<ExpenseEntry> = query_as("SELECT * FROM expenses ORDER BY date, id")
            .fetch_all(&self.pool)
            .await
            .context("Unable to get expenses")?;
        into_expenses(entries)
    }

    #[instrument(skip(self))]
    async fn get_expenses_in_month(
        &self,
        month: YearMonth,
    ) -> Result<Vec<Expense>, ExpenseRepoError> {
        let entries: Vec<ExpenseEntry> =
            query_as("SELECT * FROM expenses WHERE strftime('%Y-%m', date) = ? ORDER BY date, id")
                .bind(month.to_string())
                .fetch_all(&self.pool)
                .await
                .with_context(|| format!("Unable to get expenses for {}", month))?;
        into_expenses(entries)
    }

    #[instrument(skip(self, new_expense))]
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense, ExpenseRepoError> {
        YearMonth::try_from(new_expense.date)?;
        let id: i32 = query_scalar(
            "INSERT INTO expenses(description, amount, date) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_expense.description)
        .bind(new_expense.amount.to_string())
        .bind(new_expense.date)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert expense")?;

        Ok(new_expense.to_expense(id))
    }

    #[instrument(skip(self, updated_expense))]
    async fn update_expense(
        &self,
        expense_id: i32,
        updated_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        YearMonth::try_from(updated_expense.date)?;
        let result = query("UPDATE expenses SET description = ?, amount = ?, date = ? WHERE id = ?")
            .bind(&updated_expense.description)
            .bind(updated_expense.amount.to_string())
            .bind(updated_expense.date)
            .bind(expense_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to update expense {}", expense_id))?;
        if result.rows_affected() == 0 {
            Err(ExpenseNotFound(expense_id))
        } else {
            Ok(updated_expense.to_expense(expense_id))
        }
    }

    #[instrument(skip(self))]
    async fn delete_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError> {
        let entry: ExpenseEntry = query_as(
            "DELETE FROM expenses WHERE id = ? RETURNING id, description, amount, date",
        )
        .bind(expense_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete expense {}", expense_id))?
        .ok_or(ExpenseNotFound(expense_id))?;
        Ok(entry.try_into()?)
    }
}
