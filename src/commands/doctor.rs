// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Rows stranded by a partial account deletion
    for table in ["transactions", "budgets", "accounts"] {
        let sql = format!(
            "SELECT user_id, COUNT(*) FROM {} WHERE user_id NOT IN (SELECT id FROM users) GROUP BY user_id",
            table
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let uid: i64 = r.get(0)?;
            let n: i64 = r.get(1)?;
            rows.push(vec![
                "orphaned_rows".into(),
                format!("{}: user {} has {} stranded rows", table, uid, n),
            ]);
        }
    }

    // 2) Unparsable amounts
    for (table, column) in [
        ("transactions", "amount"),
        ("budgets", "amount"),
        ("accounts", "balance"),
    ] {
        let sql = format!("SELECT id, {} FROM {}", column, table);
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let raw: String = r.get(1)?;
            if raw.parse::<Decimal>().is_err() {
                rows.push(vec![
                    "bad_amount".into(),
                    format!("{} {}: '{}'", table, id, raw),
                ]);
            }
        }
    }

    // 3) Unparsable transaction dates
    let mut stmt = conn.prepare("SELECT id, date FROM transactions")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        if chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_err() {
            rows.push(vec!["bad_date".into(), format!("transaction {}: '{}'", id, d)]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
