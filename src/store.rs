// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::db;
use crate::models::{Account, Budget, NotificationPrefs, Transaction, TxnKind, UserProfile};
use crate::session::{digest_password, verify_password, AuthError, Session};
use crate::utils::{clear_setting, get_setting, set_setting};

const CURRENT_USER_KEY: &str = "current_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Budgets,
    Accounts,
    Profile,
}

/// Handle returned by the watch registrations; pass back to
/// [`Store::unwatch`] to release the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

enum Sink {
    Transactions(Box<dyn FnMut(&[Transaction])>),
    Budgets(Box<dyn FnMut(&[Budget])>),
    Accounts(Box<dyn FnMut(&[Account])>),
    Profile(Box<dyn FnMut(Option<&UserProfile>)>),
}

struct Watcher {
    id: u64,
    sink: Sink,
}

/// Per-user partitioned store over SQLite. Reads and mutations are gated on
/// the session; every mutation re-runs the standing query for the touched
/// collection and hands the full result set to each registered watcher.
pub struct Store {
    conn: Connection,
    session: Session,
    watchers: Vec<Watcher>,
    next_sub: u64,
}

impl Store {
    pub fn open() -> Result<Store> {
        Store::with_connection(db::open_or_init()?)
    }

    /// Wrap an already-initialized connection, restoring any persisted
    /// session identity.
    pub fn with_connection(conn: Connection) -> Result<Store> {
        let user = match get_setting(&conn, CURRENT_USER_KEY)? {
            Some(id_s) => {
                let id: i64 = id_s
                    .parse()
                    .with_context(|| format!("Invalid stored user id '{}'", id_s))?;
                let profile = load_profile(&conn, id)?;
                if profile.is_none() {
                    tracing::warn!(user = id, "stale session for missing user; signing out");
                    clear_setting(&conn, CURRENT_USER_KEY)?;
                }
                profile
            }
            None => None,
        };
        Ok(Store {
            conn,
            session: Session::new(user),
            watchers: Vec::new(),
            next_sub: 0,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.session.current()
    }

    // ---- session gate ----

    pub fn sign_up(&mut self, email: &str, password: &str, display_name: &str) -> Result<UserProfile> {
        let existing: Option<i64> = self
            .conn
            .query_row("SELECT id FROM users WHERE email=?1", params![email], |r| r.get(0))
            .optional()?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken(email.to_string()).into());
        }
        self.conn.execute(
            "INSERT INTO users(email, display_name, password_digest) VALUES (?1, ?2, ?3)",
            params![email, display_name, digest_password(password)],
        )?;
        let id = self.conn.last_insert_rowid();
        self.start_session(id)
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, password_digest FROM users WHERE email=?1",
                params![email],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        let (id, digest) = row.ok_or(AuthError::BadCredentials)?;
        if !verify_password(password, &digest) {
            return Err(AuthError::BadCredentials.into());
        }
        self.start_session(id)
    }

    fn start_session(&mut self, user_id: i64) -> Result<UserProfile> {
        let profile = load_profile(&self.conn, user_id)?
            .with_context(|| format!("User {} not found", user_id))?;
        set_setting(&self.conn, CURRENT_USER_KEY, &user_id.to_string())?;
        self.session.set(Some(profile.clone()));
        tracing::debug!(user = user_id, "session started");
        self.publish_all()?;
        Ok(profile)
    }

    pub fn sign_out(&mut self) -> Result<()> {
        clear_setting(&self.conn, CURRENT_USER_KEY)?;
        self.session.set(None);
        self.publish_all()?;
        Ok(())
    }

    pub fn update_profile(&mut self, display_name: &str, photo_url: Option<&str>) -> Result<UserProfile> {
        let id = self.session.require()?.id;
        self.conn.execute(
            "UPDATE users SET display_name=?1, photo_url=?2 WHERE id=?3",
            params![display_name, photo_url, id],
        )?;
        self.reload_profile(id)
    }

    pub fn update_notifications(&mut self, prefs: NotificationPrefs) -> Result<UserProfile> {
        let id = self.session.require()?.id;
        self.conn.execute(
            "UPDATE users SET weekly_summary=?1, budget_alerts=?2 WHERE id=?3",
            params![prefs.weekly_summary, prefs.budget_alerts, id],
        )?;
        self.reload_profile(id)
    }

    fn reload_profile(&mut self, user_id: i64) -> Result<UserProfile> {
        let profile = load_profile(&self.conn, user_id)?
            .with_context(|| format!("User {} not found", user_id))?;
        self.session.set(Some(profile.clone()));
        self.publish(Collection::Profile)?;
        Ok(profile)
    }

    /// Deletes the signed-in user and their data. Requires the password
    /// again; a mismatch is reported as a reauthentication failure, distinct
    /// from other errors. The partition deletes are sequential single
    /// statements with no enclosing transaction.
    pub fn delete_user_account(&mut self, password: &str) -> Result<()> {
        let user = self.session.require()?.clone();
        let digest: String = self.conn.query_row(
            "SELECT password_digest FROM users WHERE id=?1",
            params![user.id],
            |r| r.get(0),
        )?;
        if !verify_password(password, &digest) {
            return Err(AuthError::Reauthentication.into());
        }
        self.conn
            .execute("DELETE FROM transactions WHERE user_id=?1", params![user.id])?;
        self.conn
            .execute("DELETE FROM budgets WHERE user_id=?1", params![user.id])?;
        self.conn
            .execute("DELETE FROM accounts WHERE user_id=?1", params![user.id])?;
        self.conn
            .execute("DELETE FROM users WHERE id=?1", params![user.id])?;
        clear_setting(&self.conn, CURRENT_USER_KEY)?;
        self.session.set(None);
        tracing::info!(user = user.id, "account deleted");
        self.publish_all()?;
        Ok(())
    }

    // ---- mutations ----

    pub fn add_transaction(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount: Decimal,
        kind: TxnKind,
        category: &str,
    ) -> Result<i64> {
        let uid = self.session.require()?.id;
        self.conn.execute(
            "INSERT INTO transactions(user_id, date, description, amount, kind, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                uid,
                date.to_string(),
                description,
                amount.to_string(),
                kind.as_str(),
                category
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(user = uid, id, "transaction recorded");
        self.publish(Collection::Transactions)?;
        Ok(id)
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let uid = self.session.require()?.id;
        let n = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, uid],
        )?;
        if n == 0 {
            anyhow::bail!("Transaction {} not found", id);
        }
        self.publish(Collection::Transactions)?;
        Ok(())
    }

    /// Upserts the monthly limit for a category and returns the budget id.
    pub fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<i64> {
        let uid = self.session.require()?.id;
        self.conn.execute(
            "INSERT INTO budgets(user_id, category, amount) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, category) DO UPDATE SET amount=excluded.amount",
            params![uid, category, amount.to_string()],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM budgets WHERE user_id=?1 AND category=?2",
            params![uid, category],
            |r| r.get(0),
        )?;
        self.publish(Collection::Budgets)?;
        Ok(id)
    }

    pub fn delete_budget(&mut self, id: i64) -> Result<()> {
        let uid = self.session.require()?.id;
        let n = self.conn.execute(
            "DELETE FROM budgets WHERE id=?1 AND user_id=?2",
            params![id, uid],
        )?;
        if n == 0 {
            anyhow::bail!("Budget {} not found", id);
        }
        self.publish(Collection::Budgets)?;
        Ok(())
    }

    pub fn add_account(&mut self, r#type: &str, provider: &str, balance: Decimal) -> Result<i64> {
        let uid = self.session.require()?.id;
        self.conn.execute(
            "INSERT INTO accounts(user_id, type, provider, balance) VALUES (?1, ?2, ?3, ?4)",
            params![uid, r#type, provider, balance.to_string()],
        )?;
        let id = self.conn.last_insert_rowid();
        self.publish(Collection::Accounts)?;
        Ok(id)
    }

    pub fn delete_account(&mut self, id: i64) -> Result<()> {
        let uid = self.session.require()?.id;
        let n = self.conn.execute(
            "DELETE FROM accounts WHERE id=?1 AND user_id=?2",
            params![id, uid],
        )?;
        if n == 0 {
            anyhow::bail!("Account {} not found", id);
        }
        self.publish(Collection::Accounts)?;
        Ok(())
    }

    // ---- reads ----

    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let uid = self.session.require()?.id;
        query_transactions(&self.conn, uid)
    }

    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let uid = self.session.require()?.id;
        query_budgets(&self.conn, uid)
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let uid = self.session.require()?.id;
        query_accounts(&self.conn, uid)
    }

    // ---- live subscriptions ----
    //
    // Each watcher receives the full current result set: once at
    // registration, then after every mutation of its collection and on
    // session changes. With no signed-in user the snapshot is empty.

    pub fn watch_transactions<F>(&mut self, mut f: F) -> Result<SubscriptionId>
    where
        F: FnMut(&[Transaction]) + 'static,
    {
        let snap = self.snapshot_transactions()?;
        f(&snap);
        Ok(self.register(Sink::Transactions(Box::new(f))))
    }

    pub fn watch_budgets<F>(&mut self, mut f: F) -> Result<SubscriptionId>
    where
        F: FnMut(&[Budget]) + 'static,
    {
        let snap = self.snapshot_budgets()?;
        f(&snap);
        Ok(self.register(Sink::Budgets(Box::new(f))))
    }

    pub fn watch_accounts<F>(&mut self, mut f: F) -> Result<SubscriptionId>
    where
        F: FnMut(&[Account]) + 'static,
    {
        let snap = self.snapshot_accounts()?;
        f(&snap);
        Ok(self.register(Sink::Accounts(Box::new(f))))
    }

    pub fn watch_profile<F>(&mut self, mut f: F) -> Result<SubscriptionId>
    where
        F: FnMut(Option<&UserProfile>) + 'static,
    {
        f(self.session.current());
        Ok(self.register(Sink::Profile(Box::new(f))))
    }

    pub fn unwatch(&mut self, id: SubscriptionId) {
        self.watchers.retain(|w| w.id != id.0);
    }

    fn register(&mut self, sink: Sink) -> SubscriptionId {
        let id = self.next_sub;
        self.next_sub += 1;
        self.watchers.push(Watcher { id, sink });
        SubscriptionId(id)
    }

    fn snapshot_transactions(&self) -> Result<Vec<Transaction>> {
        match self.session.current() {
            Some(u) => query_transactions(&self.conn, u.id),
            None => Ok(Vec::new()),
        }
    }

    fn snapshot_budgets(&self) -> Result<Vec<Budget>> {
        match self.session.current() {
            Some(u) => query_budgets(&self.conn, u.id),
            None => Ok(Vec::new()),
        }
    }

    fn snapshot_accounts(&self) -> Result<Vec<Account>> {
        match self.session.current() {
            Some(u) => query_accounts(&self.conn, u.id),
            None => Ok(Vec::new()),
        }
    }

    fn publish(&mut self, col: Collection) -> Result<()> {
        match col {
            Collection::Transactions => {
                let snap = self.snapshot_transactions()?;
                for w in self.watchers.iter_mut() {
                    if let Sink::Transactions(f) = &mut w.sink {
                        f(&snap);
                    }
                }
            }
            Collection::Budgets => {
                let snap = self.snapshot_budgets()?;
                for w in self.watchers.iter_mut() {
                    if let Sink::Budgets(f) = &mut w.sink {
                        f(&snap);
                    }
                }
            }
            Collection::Accounts => {
                let snap = self.snapshot_accounts()?;
                for w in self.watchers.iter_mut() {
                    if let Sink::Accounts(f) = &mut w.sink {
                        f(&snap);
                    }
                }
            }
            Collection::Profile => {
                let current = self.session.current().cloned();
                for w in self.watchers.iter_mut() {
                    if let Sink::Profile(f) = &mut w.sink {
                        f(current.as_ref());
                    }
                }
            }
        }
        Ok(())
    }

    fn publish_all(&mut self) -> Result<()> {
        self.publish(Collection::Transactions)?;
        self.publish(Collection::Budgets)?;
        self.publish(Collection::Accounts)?;
        self.publish(Collection::Profile)?;
        Ok(())
    }
}

fn load_profile(conn: &Connection, user_id: i64) -> Result<Option<UserProfile>> {
    let row: Option<(String, String, Option<String>, bool, bool)> = conn
        .query_row(
            "SELECT email, display_name, photo_url, weekly_summary, budget_alerts
             FROM users WHERE id=?1",
            params![user_id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                ))
            },
        )
        .optional()?;
    Ok(row.map(|(email, display_name, photo_url, weekly_summary, budget_alerts)| UserProfile {
        id: user_id,
        email,
        display_name,
        photo_url,
        notifications: NotificationPrefs {
            weekly_summary,
            budget_alerts,
        },
    }))
}

fn query_transactions(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, amount, kind, category FROM transactions
         WHERE user_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let description: String = r.get(2)?;
        let amount_s: String = r.get(3)?;
        let kind_s: String = r.get(4)?;
        let category: String = r.get(5)?;
        let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' in transaction {}", date_s, id))?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transaction {}", amount_s, id))?;
        let kind = TxnKind::parse(&kind_s)
            .with_context(|| format!("Invalid kind '{}' in transaction {}", kind_s, id))?;
        out.push(Transaction {
            id,
            date,
            description,
            amount,
            kind,
            category,
        });
    }
    Ok(out)
}

fn query_budgets(conn: &Connection, user_id: i64) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, amount FROM budgets WHERE user_id=?1 ORDER BY category",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let category: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in budget {}", amount_s, id))?;
        out.push(Budget {
            id,
            category,
            amount,
        });
    }
    Ok(out)
}

fn query_accounts(conn: &Connection, user_id: i64) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, provider, balance FROM accounts WHERE user_id=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let r#type: String = r.get(1)?;
        let provider: String = r.get(2)?;
        let balance_s: String = r.get(3)?;
        let balance = balance_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid balance '{}' in account {}", balance_s, id))?;
        out.push(Account {
            id,
            r#type,
            provider,
            balance,
        });
    }
    Ok(out)
}
