// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Income => "income",
            TxnKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<TxnKind> {
        match s {
            "income" => Some(TxnKind::Income),
            "expense" => Some(TxnKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub kind: TxnKind,
    pub category: String,
}

/// Monthly spending limit for one category. Spent is derived from the
/// transaction set, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub r#type: String,
    pub provider: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub weekly_summary: bool,
    pub budget_alerts: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        NotificationPrefs {
            weekly_summary: false,
            budget_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub notifications: NotificationPrefs,
}

/// One point of the income-vs-expense series, labeled with the short month
/// name ("Jan".."Dec").
#[derive(Debug, Clone, Serialize)]
pub struct MonthPoint {
    pub month: &'static str,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub value: Decimal,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub progress: f64,
    pub approaching_limit: bool,
    pub over_budget: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}
