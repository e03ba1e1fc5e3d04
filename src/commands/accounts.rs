// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let typ = sub.get_one::<String>("type").unwrap();
            let provider = sub.get_one::<String>("provider").unwrap();
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            let id = store.add_account(typ, provider, balance)?;
            println!("Added {} account at '{}' [id {}]", typ, provider, id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let accounts = store.list_accounts()?;
            if !maybe_print_json(json_flag, jsonl_flag, &accounts)? {
                let rows: Vec<Vec<String>> = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.r#type.clone(),
                            a.provider.clone(),
                            fmt_money(&a.balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Type", "Provider", "Balance"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_account(id)?;
            println!("Removed account {}", id);
        }
        _ => {}
    }
    Ok(())
}
