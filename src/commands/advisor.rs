// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{self, SavingsTipsInput, ADVISOR_TOKEN_KEY, ADVISOR_URL_KEY};
use crate::store::Store;
use crate::utils::{maybe_print_json, set_setting};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("configure", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            set_setting(store.conn(), ADVISOR_URL_KEY, url)?;
            if let Some(token) = sub.get_one::<String>("token") {
                set_setting(store.conn(), ADVISOR_TOKEN_KEY, token)?;
            }
            println!("Advisor endpoint set to {}", url);
        }
        Some(("tips", sub)) => tips(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn tips(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let transactions = store.list_transactions()?;
    let spending_data = advisor::spending_data(&transactions);
    if spending_data.is_empty() {
        println!("No expense transactions to analyze.");
        return Ok(());
    }
    let out = advisor::generate_savings_tips(store.conn(), &SavingsTipsInput { spending_data })?;
    if !maybe_print_json(json_flag, jsonl_flag, &out)? {
        println!("{}", out.savings_tips);
    }
    Ok(())
}
