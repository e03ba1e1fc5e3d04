// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let category = sub.get_one::<String>("category").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            store.set_budget(category, amount)?;
            println!("Budget set for {} = {}", category, fmt_money(&amount));
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_budget(id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let budgets = store.list_budgets()?;
    let transactions = store.list_transactions()?;
    let statuses = aggregate::budget_statuses(&budgets, &transactions);
    if !maybe_print_json(json_flag, jsonl_flag, &statuses)? {
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
                    s.id.to_string(),
                    s.category.clone(),
                    fmt_money(&s.amount),
                    fmt_money(&s.spent),
                    format!("{:.0}%", s.progress),
                    status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Category", "Limit", "Spent", "Progress", "Status"],
                rows
            )
        );
    }
    Ok(())
}
