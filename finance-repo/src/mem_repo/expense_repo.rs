use crate::expense_repo::ExpenseRepoError::ExpenseNotFound;
use crate::expense_repo::{Expense, ExpenseRepo, ExpenseRepoError, NewExpense};
use crate::year_month::YearMonth;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    expenses: HashMap<i32, Expense>,
    next_id: i32,
}

pub struct MemExpenseRepo {
    state: RwLock<State>,
}

impl MemExpenseRepo {
    pub fn new() -> MemExpenseRepo {
        let state = State {
            expenses: HashMap::new(),
            next_id: 1,
        };
        MemExpenseRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn sorted_expenses<P>(&self, predicate: P) -> Result<Vec<Expense>, ExpenseRepoError>
    where
        P: Fn(&Expense) -> bool,
    {
        let read_guard = self.read_lock()?;

        let mut expenses: Vec<Expense> = read_guard
            .expenses
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect();
        expenses.sort();

        Ok(expenses)
    }
}

impl Default for MemExpenseRepo {
    fn default() -> Self {
        MemExpenseRepo::new()
    }
}

#[async_trait]
impl ExpenseRepo for MemExpenseRepo {
    async fn get_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .expenses
            .get(&expense_id)
            .cloned()
            .ok_or(ExpenseNotFound(expense_id))
    }

    async fn get_all_expenses(&self) -> Result<Vec<Expense>, ExpenseRepoError> {
        self.sorted_expenses(|_| true)
    }

    async fn get_expenses_in_month(
        &self,
        month: YearMonth,
    ) -> Result<Vec<Expense>, ExpenseRepoError> {
        self.sorted_expenses(|e| month.contains(e.date))
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense, ExpenseRepoError> {
        YearMonth::try_from(new_expense.date)?;
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let expense = new_expense.to_expense(id);
        write_guard.expenses.insert(id, expense.clone());

        Ok(expense)
    }

    async fn update_expense(
        &self,
        expense_id: i32,
        updated_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        YearMonth::try_from(updated_expense.date)?;
        let mut write_guard = self.write_lock()?;

        let entry = write_guard.expenses.entry(expense_id);
        if let Entry::Occupied(mut e) = entry {
            let expense = updated_expense.to_expense(expense_id);
            e.insert(expense.clone());
            Ok(expense)
        } else {
            Err(ExpenseNotFound(expense_id))
        }
    }

    async fn delete_expense(&self, expense_id: i32) -> Result<Expense, ExpenseRepoError> {
        let mut write_guard = self.write_lock()?;

        write_guard
            .expenses
            .remove(&expense_id)
            .ok_or(ExpenseNotFound(expense_id))
    }
}
