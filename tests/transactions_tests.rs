// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finview::models::TxnKind;
use finview::store::Store;
use finview::{cli, commands::transactions};
use rust_decimal::Decimal;

fn setup() -> Store {
    let conn = finview::db::open_in_memory().unwrap();
    let mut store = Store::with_connection(conn).unwrap();
    store.sign_up("ana@example.com", "hunter2", "Ana").unwrap();
    for i in 1..=3 {
        store
            .add_transaction(
                NaiveDate::from_ymd_opt(2025, 1, i).unwrap(),
                "P",
                Decimal::from(10),
                TxnKind::Expense,
                "Cat1",
            )
            .unwrap();
    }
    store
}

#[test]
fn list_limit_respected() {
    let store = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["finview", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&store, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_filters_by_month_and_type() {
    let mut store = setup();
    store
        .add_transaction(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            "Salary",
            Decimal::from(100),
            TxnKind::Income,
            "Salary",
        )
        .unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["finview", "tx", "list", "--month", "2025-01"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&store, list_m).unwrap();
            assert_eq!(rows.len(), 3);
        } else {
            panic!("no list subcommand");
        }
    }

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["finview", "tx", "list", "--type", "income"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&store, list_m).unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].description, "Salary");
        } else {
            panic!("no list subcommand");
        }
    }
}
