// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finview::advisor::{render_prompt, spending_data, SavingsTipsInput, SavingsTipsOutput};
use finview::models::{Transaction, TxnKind};
use rust_decimal::Decimal;

fn txn(amount: &str, kind: TxnKind, category: &str) -> Transaction {
    Transaction {
        id: 0,
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        description: String::from("t"),
        amount: amount.parse::<Decimal>().unwrap(),
        kind,
        category: category.to_string(),
    }
}

#[test]
fn spending_data_joins_expense_pairs() {
    let txns = vec![
        txn("20", TxnKind::Expense, "Food"),
        txn("100", TxnKind::Income, "Salary"),
        txn("9.5", TxnKind::Expense, "Transport"),
    ];
    assert_eq!(spending_data(&txns), "Food: $20.00, Transport: $9.50");
}

#[test]
fn spending_data_is_empty_without_expenses() {
    let txns = vec![txn("100", TxnKind::Income, "Salary")];
    assert_eq!(spending_data(&txns), "");
}

#[test]
fn prompt_embeds_the_spending_data() {
    let input = SavingsTipsInput {
        spending_data: "Food: $20.00".to_string(),
    };
    let prompt = render_prompt(&input);
    assert!(prompt.starts_with("You are a personal finance advisor."));
    assert!(prompt.contains("Spending Data:\nFood: $20.00"));
    assert!(!prompt.contains("{{spendingData}}"));
}

#[test]
fn response_field_is_the_only_contract() {
    let out: SavingsTipsOutput =
        serde_json::from_str(r#"{"savingsTips":"Cook at home more often."}"#).unwrap();
    assert_eq!(out.savings_tips, "Cook at home more often.");

    let err = serde_json::from_str::<SavingsTipsOutput>(r#"{"tips":"nope"}"#);
    assert!(err.is_err());
}
