//! Aggregation of expense and income records into report figures.
//!
//! Everything here is a pure function of the records passed in. Loading the records is the
//! caller's job, as is turning the results into charts (see [`super::charts`]).

use chrono::NaiveDate;
use finance_repo::expense_repo::Expense;
use finance_repo::income_repo::Income;
use finance_repo::year_month::YearMonth;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("No expenses recorded for {0}")]
    PeriodNotFound(YearMonth),
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct DescriptionTotal {
    pub description: String,
    pub total: Decimal,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Decimal,
}

/// Spending against income for one month of the monthly view.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct MonthSummary {
    pub month: YearMonth,
    pub total_expense: Decimal,
    pub income: Decimal,
    pub savings: Decimal,
}

/// Single-month figures, used by both the current month view and the monthly drill-down.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct MonthBreakdown {
    pub month: YearMonth,
    pub per_description_totals: Vec<DescriptionTotal>,
    pub total_expense: Decimal,
    pub income: Decimal,
    pub savings: Decimal,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DrillDown {
    Found(MonthBreakdown),
    PeriodNotFound { month: YearMonth },
}

impl From<Result<MonthBreakdown, ReportError>> for DrillDown {
    fn from(result: Result<MonthBreakdown, ReportError>) -> Self {
        match result {
            Ok(breakdown) => DrillDown::Found(breakdown),
            Err(ReportError::PeriodNotFound(month)) => DrillDown::PeriodNotFound { month },
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct MonthlyView {
    pub monthly_totals: Vec<MonthlyTotal>,
    pub income_by_month: BTreeMap<YearMonth, Decimal>,
    pub months: Vec<MonthSummary>,
    pub drill_down: Option<DrillDown>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct DescriptionSeries {
    pub description: String,
    pub points: Vec<TimelinePoint>,
}

/// Sum of amounts per exact description, in order of first appearance.
pub fn totals_by_description(expenses: &[Expense]) -> Vec<DescriptionTotal> {
    sum_by_description(expenses)
}

fn sum_by_description<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Vec<DescriptionTotal> {
    let mut totals: Vec<DescriptionTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match positions.get(expense.description.as_str()) {
            Some(&pos) => totals[pos].total += expense.amount,
            None => {
                positions.insert(expense.description.as_str(), totals.len());
                totals.push(DescriptionTotal {
                    description: expense.description.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    totals
}

/// Sum of amounts per month, oldest month first.
pub fn monthly_totals(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.month()).or_insert(Decimal::ZERO) += expense.amount;
    }

    totals
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// Income per month for the monthly view. When a month has several records the last one in
/// `income` wins.
pub fn income_by_month(income: &[Income]) -> BTreeMap<YearMonth, Decimal> {
    let mut income_by_month = BTreeMap::new();
    for i in income {
        income_by_month.insert(i.month(), i.income);
    }
    income_by_month
}

/// Income for a single month: the record with the latest `date_set`, highest id on ties.
pub fn latest_income_for_month(income: &[Income], month: YearMonth) -> Option<&Income> {
    income
        .iter()
        .filter(|i| month.contains(i.date_set))
        .max_by(|a, b| a.recency_cmp(b))
}

/// A month without income counts as zero income, so the savings are the negated spending.
pub fn savings(income: Decimal, total_expense: Decimal) -> Decimal {
    income - total_expense
}

fn breakdown<'a>(
    month: YearMonth,
    expenses: impl IntoIterator<Item = &'a Expense>,
    income: Decimal,
) -> MonthBreakdown {
    let per_description_totals = sum_by_description(expenses);
    let total_expense: Decimal = per_description_totals.iter().map(|t| t.total).sum();
    MonthBreakdown {
        month,
        per_description_totals,
        total_expense,
        income,
        savings: savings(income, total_expense),
    }
}

/// Figures for the month containing `today`.
pub fn current_month_view(
    expenses: &[Expense],
    income: &[Income],
    today: NaiveDate,
) -> MonthBreakdown {
    let month = YearMonth::of(today);
    let month_income = latest_income_for_month(income, month)
        .map(|i| i.income)
        .unwrap_or(Decimal::ZERO);

    breakdown(
        month,
        expenses.iter().filter(|e| month.contains(e.date)),
        month_income,
    )
}

/// Month-by-month figures over the whole history, plus the drill-down into `selected_month`
/// when one is given.
pub fn monthly_view(
    expenses: &[Expense],
    income: &[Income],
    selected_month: Option<YearMonth>,
) -> MonthlyView {
    let monthly_totals = monthly_totals(expenses);
    let income_by_month = income_by_month(income);

    let months = monthly_totals
        .iter()
        .map(|t| {
            let income = month_income(&income_by_month, t.month);
            MonthSummary {
                month: t.month,
                total_expense: t.total,
                income,
                savings: savings(income, t.total),
            }
        })
        .collect();

    let drill_down: Option<DrillDown> = selected_month.map(|month| {
        drill_down_with(expenses, &monthly_totals, &income_by_month, month).into()
    });

    MonthlyView {
        monthly_totals,
        income_by_month,
        months,
        drill_down,
    }
}

/// Figures for one month of the monthly view. Fails when no expense falls in `month`.
pub fn drill_down(
    expenses: &[Expense],
    income: &[Income],
    month: YearMonth,
) -> Result<MonthBreakdown, ReportError> {
    drill_down_with(
        expenses,
        &monthly_totals(expenses),
        &income_by_month(income),
        month,
    )
}

fn drill_down_with(
    expenses: &[Expense],
    monthly_totals: &[MonthlyTotal],
    income_by_month: &BTreeMap<YearMonth, Decimal>,
    month: YearMonth,
) -> Result<MonthBreakdown, ReportError> {
    if !monthly_totals.iter().any(|t| t.month == month) {
        return Err(ReportError::PeriodNotFound(month));
    }

    Ok(breakdown(
        month,
        expenses.iter().filter(|e| month.contains(e.date)),
        month_income(income_by_month, month),
    ))
}

fn month_income(income_by_month: &BTreeMap<YearMonth, Decimal>, month: YearMonth) -> Decimal {
    income_by_month
        .get(&month)
        .copied()
        .unwrap_or(Decimal::ZERO)
}

/// Every expense as a point in time, ordered by date.
pub fn expense_timeline(expenses: &[Expense]) -> Vec<TimelinePoint> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort();
    sorted
        .into_iter()
        .map(|e| TimelinePoint {
            date: e.date,
            amount: e.amount,
        })
        .collect()
}

/// One timeline per description, in order of first appearance.
pub fn timeline_by_description(expenses: &[Expense]) -> Vec<DescriptionSeries> {
    let mut series: Vec<DescriptionSeries> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        let pos = *positions
            .entry(expense.description.as_str())
            .or_insert_with(|| {
                series.push(DescriptionSeries {
                    description: expense.description.clone(),
                    points: Vec::new(),
                });
                series.len() - 1
            });
        series[pos].points.push(TimelinePoint {
            date: expense.date,
            amount: expense.amount,
        });
    }

    // stable, so same-day points keep their input order
    for s in series.iter_mut() {
        s.points.sort_by_key(|p| p.date);
    }
    series
}
