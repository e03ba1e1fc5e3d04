// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use crate::aggregate;
use crate::models::{Budget, Transaction};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde_json::json;

/// Renders the dashboard from live snapshots: subscribe, take the delivered
/// result sets, aggregate, release the subscriptions.
pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    if store.current_user().is_none() {
        println!("Not signed in");
        return Ok(());
    }
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let transactions: Rc<RefCell<Vec<Transaction>>> = Rc::new(RefCell::new(Vec::new()));
    let budgets: Rc<RefCell<Vec<Budget>>> = Rc::new(RefCell::new(Vec::new()));

    let txn_sink = Rc::clone(&transactions);
    let txn_sub = store.watch_transactions(move |snap| *txn_sink.borrow_mut() = snap.to_vec())?;
    let budget_sink = Rc::clone(&budgets);
    let budget_sub = store.watch_budgets(move |snap| *budget_sink.borrow_mut() = snap.to_vec())?;
    store.unwatch(txn_sub);
    store.unwatch(budget_sub);

    let transactions = transactions.borrow().clone();
    let budgets = budgets.borrow().clone();

    let today = chrono::Utc::now().date_naive();
    let totals = aggregate::totals(&transactions);
    let monthly = aggregate::monthly_series(&transactions, today);
    let categories = aggregate::category_totals(&transactions);
    let statuses = aggregate::budget_statuses(&budgets, &transactions);
    let recent: Vec<&Transaction> = transactions.iter().take(5).collect();

    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({
            "totals": &totals,
            "monthly": &monthly,
            "categories": &categories,
            "budgets": &statuses,
            "recent": &recent,
        }),
    )? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Income", "Expense"],
            vec![vec![fmt_money(&totals.income), fmt_money(&totals.expense)]],
        )
    );

    let rows: Vec<Vec<String>> = monthly
        .iter()
        .map(|p| {
            vec![
                p.month.to_string(),
                format!("{:.2}", p.income),
                format!("{:.2}", p.expense),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| vec![c.category.clone(), fmt_money(&c.value), c.fill.to_string()])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Color"], rows));

    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|s| {
            let status = if s.over_budget {
                "over budget"
            } else if s.approaching_limit {
                "approaching limit"
            } else {
                "ok"
            };
            vec![
                s.category.clone(),
                format!("{} / {}", fmt_money(&s.spent), fmt_money(&s.amount)),
                format!("{:.0}%", s.progress),
                status.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Budget", "Spent / Limit", "Progress", "Status"], rows)
    );

    let rows: Vec<Vec<String>> = recent
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                fmt_money(&t.amount),
                t.kind.as_str().to_string(),
                t.category.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Amount", "Type", "Category"], rows)
    );
    Ok(())
}
