// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use finview::aggregate;
use finview::models::TxnKind;
use finview::store::Store;
use rust_decimal::Decimal;

fn setup() -> Store {
    let conn = finview::db::open_in_memory().unwrap();
    let mut store = Store::with_connection(conn).unwrap();
    store.sign_up("ana@example.com", "hunter2", "Ana").unwrap();
    store
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn partitions_are_isolated_per_user() {
    let mut store = setup();
    store
        .add_transaction(d(2025, 1, 5), "Groceries", Decimal::from(20), TxnKind::Expense, "Food")
        .unwrap();

    store.sign_up("ben@example.com", "hunter2", "Ben").unwrap();
    assert!(store.list_transactions().unwrap().is_empty());
    store
        .add_transaction(d(2025, 1, 6), "Rent", Decimal::from(900), TxnKind::Expense, "Housing")
        .unwrap();

    store.sign_in("ana@example.com", "hunter2").unwrap();
    let txns = store.list_transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].description, "Groceries");
}

#[test]
fn watchers_receive_full_snapshots_on_every_change() {
    let mut store = setup();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = store
        .watch_transactions(move |snap| sink.borrow_mut().push(snap.len()))
        .unwrap();

    let id = store
        .add_transaction(d(2025, 2, 1), "Coffee", Decimal::from(4), TxnKind::Expense, "Food")
        .unwrap();
    store
        .add_transaction(d(2025, 2, 2), "Lunch", Decimal::from(12), TxnKind::Expense, "Food")
        .unwrap();
    store.delete_transaction(id).unwrap();

    // initial delivery, then one per mutation
    assert_eq!(*seen.borrow(), vec![0, 1, 2, 1]);

    store.unwatch(sub);
    store
        .add_transaction(d(2025, 2, 3), "Tea", Decimal::from(3), TxnKind::Expense, "Food")
        .unwrap();
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn signed_out_watchers_see_empty_then_data_after_sign_in() {
    let conn = finview::db::open_in_memory().unwrap();
    let mut store = Store::with_connection(conn).unwrap();

    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store
        .watch_transactions(move |snap| sink.borrow_mut().push(snap.len()))
        .unwrap();
    assert_eq!(*seen.borrow(), vec![0]);

    store.sign_up("cam@example.com", "hunter2", "Cam").unwrap();
    store
        .add_transaction(d(2025, 3, 1), "Bus", Decimal::from(2), TxnKind::Expense, "Transport")
        .unwrap();
    store.sign_out().unwrap();

    // sign-up publishes the (empty) partition, the mutation publishes one
    // row, sign-out goes back to empty
    assert_eq!(*seen.borrow(), vec![0, 0, 1, 0]);
}

#[test]
fn deleted_entities_leave_subsequent_aggregates() {
    let mut store = setup();
    let keep = store
        .add_transaction(d(2025, 1, 5), "Groceries", Decimal::from(20), TxnKind::Expense, "Food")
        .unwrap();
    let removed = store
        .add_transaction(d(2025, 1, 9), "Dinner", Decimal::from(35), TxnKind::Expense, "Food")
        .unwrap();
    assert_ne!(keep, removed);

    let before = aggregate::category_totals(&store.list_transactions().unwrap());
    assert_eq!(before[0].value, Decimal::from(55));

    store.delete_transaction(removed).unwrap();
    let after = aggregate::category_totals(&store.list_transactions().unwrap());
    assert_eq!(after[0].value, Decimal::from(20));
}

#[test]
fn budget_upsert_replaces_limit() {
    let mut store = setup();
    let first = store.set_budget("Food", Decimal::from(100)).unwrap();
    let second = store.set_budget("Food", Decimal::from(150)).unwrap();
    assert_eq!(first, second);

    let budgets = store.list_budgets().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].amount, Decimal::from(150));
}

#[test]
fn transactions_are_listed_newest_first() {
    let mut store = setup();
    for day in 1..=3 {
        store
            .add_transaction(
                d(2025, 1, day),
                "P",
                Decimal::from(10),
                TxnKind::Expense,
                "Misc",
            )
            .unwrap();
    }
    let txns = store.list_transactions().unwrap();
    assert_eq!(txns[0].date, d(2025, 1, 3));
    assert_eq!(txns[2].date, d(2025, 1, 1));
}

#[test]
fn delete_account_removes_it_from_listings() {
    let mut store = setup();
    let id = store
        .add_account("Checking", "Main Bank", Decimal::from(1200))
        .unwrap();
    store.add_account("Savings", "Main Bank", Decimal::from(5000)).unwrap();

    store.delete_account(id).unwrap();
    let accounts = store.list_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].r#type, "Savings");
}
