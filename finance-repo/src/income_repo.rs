use crate::year_month::{DateOutOfRange, YearMonth};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[async_trait]
pub trait IncomeRepo: Sync + Send {
    async fn create_income(&self, new_income: NewIncome) -> Result<Income, IncomeRepoError>;

    /// All income records in insertion order.
    async fn get_all_income(&self) -> Result<Vec<Income>, IncomeRepoError>;

    /// The income set for `month` with the latest `date_set`, highest id on ties.
    async fn find_income_for_month(
        &self,
        month: YearMonth,
    ) -> Result<Option<Income>, IncomeRepoError>;
}

#[derive(Error, Debug)]
pub enum IncomeRepoError {
    #[error(transparent)]
    DateOutOfRange(#[from] DateOutOfRange),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Income {
    pub id: i32,
    pub income: Decimal,
    pub date_set: NaiveDate,
}

impl Income {
    pub const fn new(id: i32, income: Decimal, date_set: NaiveDate) -> Income {
        Income {
            id,
            income,
            date_set,
        }
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date_set)
    }

    /// Ordering used to pick the most recent income among several for one month.
    pub fn recency_cmp(&self, other: &Income) -> Ordering {
        self.date_set
            .cmp(&other.date_set)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewIncome {
    pub income: Decimal,
    pub date_set: NaiveDate,
}

impl NewIncome {
    pub const fn new(income: Decimal, date_set: NaiveDate) -> NewIncome {
        NewIncome { income, date_set }
    }

    /// Income declared for the whole of `month`, dated on its first day.
    pub fn for_month(income: Decimal, month: YearMonth) -> NewIncome {
        NewIncome::new(income, month.first_day())
    }

    pub fn to_income(self, id: i32) -> Income {
        Income::new(id, self.income, self.date_set)
    }
}
