//! Chart payloads built from report figures.
//!
//! The payloads only describe what to draw (titles, axis labels, values) so that any charting
//! library on the client side can render them.

use super::engine::{
    self, DescriptionSeries, DescriptionTotal, MonthBreakdown, MonthlyTotal, MonthlyView,
    TimelinePoint,
};
use chrono::NaiveDate;
use finance_repo::expense_repo::Expense;
use finance_repo::year_month::YearMonth;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct Bar {
    pub label: String,
    pub value: Decimal,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<LinePoint>,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct Slice {
    pub label: String,
    pub value: Decimal,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct DashboardCharts {
    pub expenses_by_description: BarChart,
    pub expenses_over_time: LineChart,
    pub savings_vs_utilized: PieChart,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct MonthlyCharts {
    pub monthly_expenses: BarChart,
    pub savings_vs_utilized: BTreeMap<YearMonth, PieChart>,
    pub expenses_over_time: LineChart,
}

pub fn expenses_by_description_chart(totals: &[DescriptionTotal]) -> BarChart {
    BarChart {
        title: "Expenses by Description".to_owned(),
        x_label: "Description".to_owned(),
        y_label: "Amount".to_owned(),
        bars: totals
            .iter()
            .map(|t| Bar {
                label: t.description.clone(),
                value: t.total,
            })
            .collect(),
    }
}

pub fn monthly_expenses_chart(monthly_totals: &[MonthlyTotal]) -> BarChart {
    BarChart {
        title: "Monthly Expenses".to_owned(),
        x_label: "Month".to_owned(),
        y_label: "Total Expenses".to_owned(),
        bars: monthly_totals
            .iter()
            .map(|t| Bar {
                label: t.month.to_string(),
                value: t.total,
            })
            .collect(),
    }
}

pub fn savings_pie_chart(title: String, total_expense: Decimal, savings: Decimal) -> PieChart {
    PieChart {
        title,
        slices: vec![
            Slice {
                label: "Utilized".to_owned(),
                value: total_expense,
            },
            Slice {
                label: "Saved".to_owned(),
                value: savings,
            },
        ],
    }
}

fn line_points(points: &[TimelinePoint]) -> Vec<LinePoint> {
    points
        .iter()
        .map(|p| LinePoint {
            date: p.date,
            value: p.amount,
        })
        .collect()
}

pub fn expenses_over_time_chart(expenses: &[Expense]) -> LineChart {
    let timeline = engine::expense_timeline(expenses);
    LineChart {
        title: "Expenses Over Time".to_owned(),
        x_label: "Date".to_owned(),
        y_label: "Expense Amount".to_owned(),
        series: vec![LineSeries {
            name: "Expenses".to_owned(),
            points: line_points(&timeline),
        }],
    }
}

pub fn grouped_expenses_over_time_chart(expenses: &[Expense]) -> LineChart {
    let series = engine::timeline_by_description(expenses)
        .into_iter()
        .map(|DescriptionSeries { description, points }| LineSeries {
            name: description,
            points: line_points(&points),
        })
        .collect();
    LineChart {
        title: "Expenses Over Time (Grouped by Month)".to_owned(),
        x_label: "Date".to_owned(),
        y_label: "Expense Amount".to_owned(),
        series,
    }
}

/// Charts for the current month view. `expenses` are the expenses the view was built from.
pub fn dashboard_charts(view: &MonthBreakdown, expenses: &[Expense]) -> DashboardCharts {
    DashboardCharts {
        expenses_by_description: expenses_by_description_chart(&view.per_description_totals),
        expenses_over_time: expenses_over_time_chart(expenses),
        savings_vs_utilized: savings_pie_chart(
            "Savings vs Utilized".to_owned(),
            view.total_expense,
            view.savings,
        ),
    }
}

pub fn monthly_charts(view: &MonthlyView, expenses: &[Expense]) -> MonthlyCharts {
    let savings_vs_utilized = view
        .months
        .iter()
        .map(|m| {
            let pie = savings_pie_chart(
                format!("Savings vs Utilized for {}", m.month),
                m.total_expense,
                m.savings,
            );
            (m.month, pie)
        })
        .collect();

    MonthlyCharts {
        monthly_expenses: monthly_expenses_chart(&view.monthly_totals),
        savings_vs_utilized,
        expenses_over_time: grouped_expenses_over_time_chart(expenses),
    }
}
