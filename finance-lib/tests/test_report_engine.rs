use std::str::FromStr;

use chrono::NaiveDate;
use rstest::*;
use rust_decimal::Decimal;

use finance_lib::report::charts;
use finance_lib::report::engine::{self, DescriptionTotal, DrillDown, MonthlyTotal, ReportError};
use finance_repo::expense_repo::Expense;
use finance_repo::income_repo::Income;
use finance_repo::year_month::YearMonth;

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

fn month(s: &str) -> YearMonth {
    YearMonth::from_str(s).unwrap()
}

fn expense(id: i32, description: &str, amount: i64, d: &str) -> Expense {
    Expense::new(id, description.to_owned(), Decimal::from(amount), date(d))
}

fn income(id: i32, amount: i64, d: &str) -> Income {
    Income::new(id, Decimal::from(amount), date(d))
}

#[fixture]
fn expenses() -> Vec<Expense> {
    vec![
        expense(1, "rent", 1000, "2024-01-05"),
        expense(2, "food", 200, "2024-01-10"),
        expense(3, "rent", 900, "2024-02-03"),
    ]
}

#[fixture]
fn income_records() -> Vec<Income> {
    vec![income(1, 1500, "2024-01-01"), income(2, 1500, "2024-02-01")]
}

#[rstest]
fn test_monthly_totals(expenses: Vec<Expense>) {
    assert_eq!(
        engine::monthly_totals(&expenses),
        vec![
            MonthlyTotal {
                month: month("2024-01"),
                total: Decimal::from(1200),
            },
            MonthlyTotal {
                month: month("2024-02"),
                total: Decimal::from(900),
            },
        ]
    );
}

#[rstest]
fn test_monthly_view_savings(expenses: Vec<Expense>, income_records: Vec<Income>) {
    let view = engine::monthly_view(&expenses, &income_records, None);

    let savings: Vec<(YearMonth, Decimal)> = view.months.iter().map(|m| (m.month, m.savings)).collect();
    assert_eq!(
        savings,
        vec![
            (month("2024-01"), Decimal::from(300)),
            (month("2024-02"), Decimal::from(600)),
        ]
    );
    assert_eq!(view.drill_down, None);
}

#[rstest]
fn test_monthly_view_empty() {
    let view = engine::monthly_view(&[], &[], None);

    assert!(view.monthly_totals.is_empty());
    assert!(view.income_by_month.is_empty());
    assert!(view.months.is_empty());

    let charts = charts::monthly_charts(&view, &[]);
    assert!(charts.monthly_expenses.bars.is_empty());
    assert!(charts.savings_vs_utilized.is_empty());
    assert!(charts.expenses_over_time.series.is_empty());
}

#[rstest]
fn test_totals_by_description_order_independent(expenses: Vec<Expense>) {
    let mut totals = engine::totals_by_description(&expenses);
    let mut reversed: Vec<Expense> = expenses.clone();
    reversed.reverse();
    let mut reversed_totals = engine::totals_by_description(&reversed);

    totals.sort_by(|a, b| a.description.cmp(&b.description));
    reversed_totals.sort_by(|a, b| a.description.cmp(&b.description));
    assert_eq!(totals, reversed_totals);
    assert_eq!(
        totals,
        vec![
            DescriptionTotal {
                description: "food".to_owned(),
                total: Decimal::from(200),
            },
            DescriptionTotal {
                description: "rent".to_owned(),
                total: Decimal::from(1900),
            },
        ]
    );
}

#[rstest]
fn test_totals_by_description_exact_match() {
    let expenses = vec![
        expense(1, "Rent", 10, "2024-01-05"),
        expense(2, "rent", 20, "2024-01-06"),
        expense(3, "rent ", 30, "2024-01-07"),
    ];

    let totals = engine::totals_by_description(&expenses);
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[0].description, "Rent");
    assert_eq!(totals[1].total, Decimal::from(20));
}

#[rstest]
fn test_monthly_totals_conserves_sum() {
    let expenses = vec![
        expense(1, "a", 5, "2023-12-31"),
        expense(2, "b", 7, "2021-06-01"),
        expense(3, "c", 11, "2024-01-01"),
        expense(4, "a", 13, "2023-12-01"),
        expense(5, "d", -2, "2022-02-28"),
    ];

    let totals = engine::monthly_totals(&expenses);
    let sum: Decimal = totals.iter().map(|t| t.total).sum();
    let expected: Decimal = expenses.iter().map(|e| e.amount).sum();
    assert_eq!(sum, expected);

    let months: Vec<YearMonth> = totals.iter().map(|t| t.month).collect();
    let mut sorted = months.clone();
    sorted.sort();
    assert_eq!(months, sorted);
    assert_eq!(months.len(), 4);
}

#[rstest]
#[case(Decimal::ZERO)]
#[case(Decimal::from(1250))]
#[case(Decimal::new(-1999, 2))]
fn test_savings_without_income(#[case] total: Decimal) {
    assert_eq!(engine::savings(Decimal::ZERO, total), -total);
}

#[rstest]
fn test_current_month_view_without_income(income_records: Vec<Income>) {
    let expenses = vec![
        expense(1, "food", 40, "2024-03-02"),
        expense(2, "rent", 900, "2024-03-03"),
        expense(3, "food", 25, "2024-02-28"),
    ];

    let view = engine::current_month_view(&expenses, &income_records, date("2024-03-15"));
    assert_eq!(view.month, month("2024-03"));
    assert_eq!(view.total_expense, Decimal::from(940));
    assert_eq!(view.income, Decimal::ZERO);
    assert_eq!(view.savings, Decimal::from(-940));
}

#[rstest]
fn test_current_month_view(expenses: Vec<Expense>, income_records: Vec<Income>) {
    let view = engine::current_month_view(&expenses, &income_records, date("2024-01-20"));

    assert_eq!(view.per_description_totals.len(), 2);
    assert_eq!(view.total_expense, Decimal::from(1200));
    assert_eq!(view.income, Decimal::from(1500));
    assert_eq!(view.savings, Decimal::from(300));

    let charts = charts::dashboard_charts(&view, &expenses);
    assert_eq!(charts.expenses_by_description.bars.len(), 2);
    assert_eq!(charts.savings_vs_utilized.slices[0].value, Decimal::from(1200));
    assert_eq!(charts.savings_vs_utilized.slices[1].value, Decimal::from(300));
}

#[rstest]
fn test_single_month_lookup_uses_latest_date_set() {
    let income_records = vec![
        income(1, 2000, "2024-01-20"),
        income(2, 1500, "2024-01-01"),
    ];

    let latest = engine::latest_income_for_month(&income_records, month("2024-01")).unwrap();
    assert_eq!(latest.id, 1);

    let view = engine::current_month_view(&[], &income_records, date("2024-01-25"));
    assert_eq!(view.income, Decimal::from(2000));
}

#[rstest]
fn test_single_month_lookup_tie_uses_highest_id() {
    let income_records = vec![income(7, 2000, "2024-01-01"), income(3, 1500, "2024-01-01")];

    let latest = engine::latest_income_for_month(&income_records, month("2024-01")).unwrap();
    assert_eq!(latest.id, 7);
    assert!(engine::latest_income_for_month(&income_records, month("2024-02")).is_none());
}

#[rstest]
fn test_multi_month_lookup_uses_last_record() {
    let income_records = vec![
        income(1, 2000, "2024-01-20"),
        income(2, 1500, "2024-01-01"),
    ];

    let by_month = engine::income_by_month(&income_records);
    assert_eq!(by_month.get(&month("2024-01")), Some(&Decimal::from(1500)));

    // the two lookups disagree on the same records
    let expenses = vec![expense(1, "food", 100, "2024-01-05")];
    let monthly = engine::monthly_view(&expenses, &income_records, Some(month("2024-01")));
    assert_eq!(monthly.months[0].income, Decimal::from(1500));
    let current = engine::current_month_view(&expenses, &income_records, date("2024-01-25"));
    assert_eq!(current.income, Decimal::from(2000));
}

#[rstest]
fn test_drill_down(expenses: Vec<Expense>, income_records: Vec<Income>) {
    let view = engine::monthly_view(&expenses, &income_records, Some(month("2024-01")));

    match view.drill_down {
        Some(DrillDown::Found(breakdown)) => {
            assert_eq!(breakdown.month, month("2024-01"));
            assert_eq!(breakdown.per_description_totals.len(), 2);
            assert_eq!(breakdown.total_expense, Decimal::from(1200));
            assert_eq!(breakdown.income, Decimal::from(1500));
            assert_eq!(breakdown.savings, Decimal::from(300));
        }
        other => panic!("Unexpected drill down {:?}", other),
    }
}

#[rstest]
fn test_drill_down_zero_total_month_found() {
    let expenses = vec![
        expense(1, "refund", 50, "2024-03-04"),
        expense(2, "refund", -50, "2024-03-09"),
    ];
    let income_records = vec![income(1, 1000, "2024-03-01")];

    let breakdown = engine::drill_down(&expenses, &income_records, month("2024-03")).unwrap();
    assert_eq!(breakdown.total_expense, Decimal::ZERO);
    assert_eq!(breakdown.savings, Decimal::from(1000));
}

#[rstest]
fn test_drill_down_period_not_found(expenses: Vec<Expense>) {
    // income alone does not put a month into the history
    let income_records = vec![income(1, 1000, "2024-03-01")];

    assert_eq!(
        engine::drill_down(&expenses, &income_records, month("2024-03")),
        Err(ReportError::PeriodNotFound(month("2024-03")))
    );

    let view = engine::monthly_view(&expenses, &income_records, Some(month("2024-03")));
    assert_eq!(
        view.drill_down,
        Some(DrillDown::PeriodNotFound {
            month: month("2024-03")
        })
    );
    assert_eq!(view.monthly_totals.len(), 2);
}

#[rstest]
fn test_expense_timeline_sorted() {
    let expenses = vec![
        expense(3, "b", 3, "2024-02-01"),
        expense(1, "a", 1, "2024-01-01"),
        expense(2, "a", 2, "2024-01-15"),
    ];

    let timeline = engine::expense_timeline(&expenses);
    let dates: Vec<NaiveDate> = timeline.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![date("2024-01-01"), date("2024-01-15"), date("2024-02-01")]
    );
}

#[rstest]
fn test_timeline_by_description() {
    let expenses = vec![
        expense(1, "food", 30, "2024-02-10"),
        expense(2, "rent", 900, "2024-01-05"),
        expense(3, "food", 20, "2024-01-12"),
    ];

    let series = engine::timeline_by_description(&expenses);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].description, "food");
    assert_eq!(series[0].points[0].date, date("2024-01-12"));
    assert_eq!(series[0].points[1].amount, Decimal::from(30));
    assert_eq!(series[1].description, "rent");

    let chart = charts::grouped_expenses_over_time_chart(&expenses);
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[1].name, "rent");
}
