// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(store, sub)?,
        Some(("update", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let photo = sub.get_one::<String>("photo").map(|s| s.as_str());
            let profile = store.update_profile(name, photo)?;
            println!("Profile updated for {}", profile.email);
        }
        Some(("notify", sub)) => {
            let mut prefs = store
                .current_user()
                .context("Not signed in")?
                .notifications;
            if let Some(v) = sub.get_one::<bool>("weekly-summary") {
                prefs.weekly_summary = *v;
            }
            if let Some(v) = sub.get_one::<bool>("budget-alerts") {
                prefs.budget_alerts = *v;
            }
            store.update_notifications(prefs)?;
            println!(
                "Notifications: weekly summary {}, budget alerts {}",
                on_off(prefs.weekly_summary),
                on_off(prefs.budget_alerts)
            );
        }
        _ => {}
    }
    Ok(())
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

fn show(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let u = store.current_user().context("Not signed in")?;
    if !maybe_print_json(json_flag, jsonl_flag, u)? {
        let rows = vec![vec![
            u.display_name.clone(),
            u.email.clone(),
            u.photo_url.clone().unwrap_or_default(),
            on_off(u.notifications.weekly_summary).to_string(),
            on_off(u.notifications.budget_alerts).to_string(),
        ]];
        println!(
            "{}",
            pretty_table(
                &["Name", "Email", "Photo", "Weekly summary", "Budget alerts"],
                rows
            )
        );
    }
    Ok(())
}
