// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxnKind;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let type_s = sub.get_one::<String>("type").unwrap();
    let kind = TxnKind::parse(type_s)
        .with_context(|| format!("Invalid type '{}', expected income|expense", type_s))?;
    let category = sub.get_one::<String>("category").unwrap();

    let id = store.add_transaction(date, description, amount, kind, category)?;
    println!(
        "Recorded {} {} on {} '{}' ({}) [id {}]",
        kind.as_str(),
        amount,
        date,
        description,
        category,
        id
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Type", "Category"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub r#type: String,
    pub category: String,
}

/// Filters are applied by scanning the full partition; the store holds no
/// windowed queries.
pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub.get_one::<String>("month");
    let category = sub.get_one::<String>("category");
    let type_filter = sub.get_one::<String>("type");
    let limit = sub.get_one::<usize>("limit").copied();

    let mut data = Vec::new();
    for t in store.list_transactions()? {
        if let Some(m) = month {
            if t.date.format("%Y-%m").to_string() != *m {
                continue;
            }
        }
        if let Some(c) = category {
            if t.category != *c {
                continue;
            }
        }
        if let Some(ty) = type_filter {
            if t.kind.as_str() != ty {
                continue;
            }
        }
        data.push(TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description,
            amount: t.amount.to_string(),
            r#type: t.kind.as_str().to_string(),
            category: t.category,
        });
        if let Some(n) = limit {
            if data.len() == n {
                break;
            }
        }
    }
    Ok(data)
}
