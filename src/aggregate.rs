// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Budget, BudgetStatus, CategorySlice, MonthPoint, Totals, Transaction, TxnKind};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Display colors cycled across category slices.
pub const CHART_PALETTE: [&str; 5] = ["#4f46e5", "#0ea5e9", "#f97316", "#10b981", "#eab308"];

/// Income and expense per calendar month, one point per month from January
/// through the month of `today`, zero-filled where nothing happened.
pub fn monthly_series(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthPoint> {
    let mut income = [Decimal::ZERO; 12];
    let mut expense = [Decimal::ZERO; 12];
    for t in transactions {
        let m = t.date.month0() as usize;
        match t.kind {
            TxnKind::Income => income[m] += t.amount,
            TxnKind::Expense => expense[m] += t.amount,
        }
    }
    let current = today.month0() as usize;
    (0..=current)
        .map(|m| MonthPoint {
            month: MONTHS[m],
            income: income[m],
            expense: expense[m],
        })
        .collect()
}

/// Expense totals per category label (case-sensitive), in first-seen order,
/// each slice carrying a palette color.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.kind == TxnKind::Expense) {
        if !sums.contains_key(&t.category) {
            order.push(t.category.clone());
        }
        *sums.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
    }
    order
        .into_iter()
        .enumerate()
        .map(|(i, category)| {
            let value = sums.remove(&category).unwrap_or(Decimal::ZERO);
            CategorySlice {
                category,
                value,
                fill: CHART_PALETTE[i % CHART_PALETTE.len()],
            }
        })
        .collect()
}

/// Derived spend and progress per budget. Spent sums expense transactions
/// whose category matches ignoring letter case; flags trip above 80% and
/// above 100% and drive presentation only.
pub fn budget_statuses(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| {
            let wanted = b.category.to_lowercase();
            let spent: Decimal = transactions
                .iter()
                .filter(|t| t.kind == TxnKind::Expense && t.category.to_lowercase() == wanted)
                .map(|t| t.amount)
                .sum();
            let progress =
                (spent.to_f64().unwrap_or(0.0) / b.amount.to_f64().unwrap_or(0.0)) * 100.0;
            BudgetStatus {
                id: b.id,
                category: b.category.clone(),
                amount: b.amount,
                spent,
                progress,
                approaching_limit: progress > 80.0 && progress <= 100.0,
                over_budget: progress > 100.0,
            }
        })
        .collect()
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TxnKind::Income => income += t.amount,
            TxnKind::Expense => expense += t.amount,
        }
    }
    Totals { income, expense }
}
