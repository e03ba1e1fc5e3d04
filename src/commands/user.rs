// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::AuthError;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("signup", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let profile = store.sign_up(email, password, name)?;
            println!("Signed up as {} <{}>", profile.display_name, profile.email);
        }
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let profile = store.sign_in(email, password)?;
            println!("Signed in as {} <{}>", profile.display_name, profile.email);
        }
        Some(("logout", _)) => {
            store.sign_out()?;
            println!("Signed out");
        }
        Some(("whoami", sub)) => whoami(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn whoami(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    match store.current_user() {
        Some(u) => {
            if !maybe_print_json(json_flag, jsonl_flag, u)? {
                let rows = vec![vec![
                    u.id.to_string(),
                    u.display_name.clone(),
                    u.email.clone(),
                ]];
                println!("{}", pretty_table(&["ID", "Name", "Email"], rows));
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

fn delete(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let password = sub.get_one::<String>("password").unwrap();
    match store.delete_user_account(password) {
        Ok(()) => {
            println!("Account deleted");
            Ok(())
        }
        Err(e) => {
            // Reauthentication gets its own message; everything else
            // propagates as usual.
            if matches!(e.downcast_ref::<AuthError>(), Some(AuthError::Reauthentication)) {
                tracing::error!("reauthentication failed during account deletion");
                println!("Could not verify your password; the account was not deleted.");
                Ok(())
            } else {
                Err(e)
            }
        }
    }
}
