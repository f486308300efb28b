use crate::income_repo::{Income, IncomeRepo, IncomeRepoError, NewIncome};
use crate::sqlx_repo::SQLxRepo;
use crate::year_month::YearMonth;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{query_as, query_scalar};
use std::str::FromStr;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct IncomeEntry {
    id: i32,
    income: String,
    date_set: NaiveDate,
}

impl TryFrom<IncomeEntry> for Income {
    type Error = anyhow::Error;

    fn try_from(value: IncomeEntry) -> Result<Self, Self::Error> {
        let income = Decimal::from_str(&value.income)
            .with_context(|| format!("Invalid amount stored for income {}", value.id))?;
        Ok(Income::new(value.id, income, value.date_set))
    }
}

#[async_trait]
impl IncomeRepo for SQLxRepo {
    #[instrument(skip(self, new_income))]
    async fn create_income(&self, new_income: NewIncome) -> Result<Income, IncomeRepoError> {
        YearMonth::try_from(new_income.date_set)?;
        let id: i32 =
            query_scalar("INSERT INTO monthly_income(income, date_set) VALUES (?, ?) RETURNING id")
                .bind(new_income.income.to_string())
                .bind(new_income.date_set)
                .fetch_one(&self.pool)
                .await
                .context("Unable to insert income")?;

        Ok(new_income.to_income(id))
    }

    #[instrument(skip(self))]
    async fn get_all_income(&self) -> Result<Vec<Income>, IncomeRepoError> {
        let entries: Vec<IncomeEntry> = query_as("SELECT * FROM monthly_income ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Unable to get income")?;

        let income = entries
            .into_iter()
            .map(Income::try_from)
            .collect::<Result<Vec<Income>, anyhow::Error>>()?;
        Ok(income)
    }

    #[instrument(skip(self))]
    async fn find_income_for_month(
        &self,
        month: YearMonth,
    ) -> Result<Option<Income>, IncomeRepoError> {
        let entry: Option<IncomeEntry> = query_as(
            "SELECT * FROM monthly_income WHERE strftime('%Y-%m', date_set) = ? ORDER BY date_set DESC, id DESC LIMIT 1",
        )
        .bind(month.to_string())
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get income for {}", month))?;

        let income = entry.map(Income::try_from).transpose()?;
        Ok(income)
    }
}
