// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finview::aggregate::{budget_statuses, category_totals, monthly_series, totals, CHART_PALETTE};
use finview::models::{Budget, Transaction, TxnKind};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn txn(date: NaiveDate, amount: i64, kind: TxnKind, category: &str) -> Transaction {
    Transaction {
        id: 0,
        date,
        description: String::from("t"),
        amount: Decimal::from(amount),
        kind,
        category: category.to_string(),
    }
}

fn budget(category: &str, amount: i64) -> Budget {
    Budget {
        id: 1,
        category: category.to_string(),
        amount: Decimal::from(amount),
    }
}

#[test]
fn monthly_series_partitions_by_type() {
    let txns = vec![
        txn(d(2025, 1, 10), 100, TxnKind::Income, "Salary"),
        txn(d(2025, 1, 12), 40, TxnKind::Expense, "Food"),
        txn(d(2025, 3, 5), 25, TxnKind::Expense, "Transport"),
    ];
    let series = monthly_series(&txns, d(2025, 3, 20));
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].month, "Jan");
    assert_eq!(series[0].income, Decimal::from(100));
    assert_eq!(series[0].expense, Decimal::from(40));
    assert_eq!(series[1].income, Decimal::ZERO);
    assert_eq!(series[1].expense, Decimal::ZERO);
    assert_eq!(series[2].expense, Decimal::from(25));
}

#[test]
fn monthly_series_zero_fills_empty_input() {
    let series = monthly_series(&[], d(2025, 8, 6));
    assert_eq!(series.len(), 8);
    assert_eq!(series.first().unwrap().month, "Jan");
    assert_eq!(series.last().unwrap().month, "Aug");
    for p in &series {
        assert_eq!(p.income, Decimal::ZERO);
        assert_eq!(p.expense, Decimal::ZERO);
    }
}

#[test]
fn category_totals_cycle_palette_of_five() {
    let date = d(2025, 2, 1);
    let txns: Vec<Transaction> = (0..6)
        .map(|i| txn(date, 10, TxnKind::Expense, &format!("cat{}", i)))
        .collect();
    let slices = category_totals(&txns);
    assert_eq!(slices.len(), 6);
    assert_eq!(slices[0].fill, CHART_PALETTE[0]);
    assert_eq!(slices[4].fill, CHART_PALETTE[4]);
    // sixth slice wraps back to the first color
    assert_eq!(slices[5].fill, CHART_PALETTE[0]);
}

#[test]
fn category_totals_are_case_sensitive_and_expense_only() {
    let date = d(2025, 2, 1);
    let txns = vec![
        txn(date, 20, TxnKind::Expense, "Food"),
        txn(date, 5, TxnKind::Expense, "food"),
        txn(date, 100, TxnKind::Income, "Food"),
        txn(date, 30, TxnKind::Expense, "Food"),
    ];
    let slices = category_totals(&txns);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].category, "Food");
    assert_eq!(slices[0].value, Decimal::from(50));
    assert_eq!(slices[1].category, "food");
    assert_eq!(slices[1].value, Decimal::from(5));
}

#[test]
fn budget_progress_trips_over_budget() {
    let date = d(2025, 4, 2);
    let txns = vec![
        txn(date, 20, TxnKind::Expense, "Food"),
        txn(date, 30, TxnKind::Expense, "Food"),
        txn(date, 100, TxnKind::Income, "Salary"),
    ];
    let statuses = budget_statuses(&[budget("Food", 40)], &txns);
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].spent, Decimal::from(50));
    assert!((statuses[0].progress - 125.0).abs() < f64::EPSILON);
    assert!(statuses[0].over_budget);
    assert!(!statuses[0].approaching_limit);
}

#[test]
fn budget_spent_matches_category_ignoring_case() {
    let date = d(2025, 4, 2);
    let txns = vec![
        txn(date, 10, TxnKind::Expense, "GROCERIES"),
        txn(date, 15, TxnKind::Expense, "groceries"),
    ];
    let statuses = budget_statuses(&[budget("Groceries", 100)], &txns);
    assert_eq!(statuses[0].spent, Decimal::from(25));
    assert!(!statuses[0].over_budget);
    assert!(!statuses[0].approaching_limit);
}

#[test]
fn budget_approaching_limit_between_80_and_100() {
    let date = d(2025, 4, 2);
    let txns = vec![txn(date, 85, TxnKind::Expense, "Rent")];
    let statuses = budget_statuses(&[budget("Rent", 100)], &txns);
    assert!(statuses[0].approaching_limit);
    assert!(!statuses[0].over_budget);
}

#[test]
fn totals_sum_each_type() {
    let date = d(2025, 5, 1);
    let txns = vec![
        txn(date, 100, TxnKind::Income, "Salary"),
        txn(date, 50, TxnKind::Income, "Bonus"),
        txn(date, 30, TxnKind::Expense, "Food"),
    ];
    let t = totals(&txns);
    assert_eq!(t.income, Decimal::from(150));
    assert_eq!(t.expense, Decimal::from(30));
}
