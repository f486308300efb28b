use crate::income_repo::{Income, IncomeRepo, IncomeRepoError, NewIncome};
use crate::year_month::YearMonth;
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    // kept in insertion order
    income: Vec<Income>,
    next_id: i32,
}

pub struct MemIncomeRepo {
    state: RwLock<State>,
}

impl MemIncomeRepo {
    pub fn new() -> Self {
        let state = State {
            income: Vec::new(),
            next_id: 1,
        };
        MemIncomeRepo {
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
}

impl Default for MemIncomeRepo {
    fn default() -> Self {
        MemIncomeRepo::new()
    }
}

#[async_trait]
impl IncomeRepo for MemIncomeRepo {
    async fn create_income(&self, new_income: NewIncome) -> Result<Income, IncomeRepoError> {
        YearMonth::try_from(new_income.date_set)?;
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let income = new_income.to_income(id);
        write_guard.income.push(income.clone());

        Ok(income)
    }

    async fn get_all_income(&self) -> Result<Vec<Income>, IncomeRepoError> {
        let read_guard = self.read_lock()?;
        Ok(read_guard.income.clone())
    }

    async fn find_income_for_month(
        &self,
        month: YearMonth,
    ) -> Result<Option<Income>, IncomeRepoError> {
        let read_guard = self.read_lock()?;

        let income = read_guard
            .income
            .iter()
            .filter(|i| month.contains(i.date_set))
            .max_by(|a, b| a.recency_cmp(b))
            .cloned();
        Ok(income)
    }
}
