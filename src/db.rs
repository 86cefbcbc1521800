// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::models::{NewTransaction, Transaction, TxType};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Finboard", "finboard"));

/// Default database location inside the platform data dir.
pub fn default_db_path() -> StoreResult<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(StoreError::NoDataDir)?;
    Ok(proj.data_dir().join("finboard.sqlite"))
}

const SELECT_COLUMNS: &str = "SELECT id, date, description, amount, type, category FROM transactions";

/// Owns the SQLite connection for one application session.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened transaction store");
        let store = Self { conn };
        store.create_table_if_absent()?;
        Ok(store)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.create_table_if_absent()?;
        Ok(store)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn create_table_if_absent(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL CHECK(amount >= 0),
            type TEXT NOT NULL CHECK(type IN ('Income','Expense')),
            category TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
        "#,
        )?;
        Ok(())
    }

    pub fn insert(&self, tx: &NewTransaction) -> StoreResult<i64> {
        if tx.amount < Decimal::ZERO {
            return Err(StoreError::NegativeAmount(tx.amount));
        }
        let amount = tx
            .amount
            .to_f64()
            .ok_or_else(|| StoreError::UnrepresentableAmount(tx.amount.to_string()))?;
        self.conn.execute(
            "INSERT INTO transactions(date, description, amount, type, category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tx.date.to_string(),
                tx.description,
                amount,
                tx.r#type.as_str(),
                tx.category
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, date = %tx.date, kind = %tx.r#type, "inserted transaction");
        Ok(id)
    }

    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "deleted transaction");
        Ok(())
    }

    pub fn update_description(&self, id: i64, description: &str) -> StoreResult<()> {
        let n = self.conn.execute(
            "UPDATE transactions SET description=?1 WHERE id=?2",
            params![description, id],
        )?;
        if n == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "updated transaction description");
        Ok(())
    }

    pub fn get(&self, id: i64) -> StoreResult<Option<Transaction>> {
        let raw = self
            .conn
            .query_row(
                &format!("{} WHERE id=?1", SELECT_COLUMNS),
                params![id],
                RawRow::from_row,
            )
            .optional()?;
        raw.map(RawRow::into_transaction).transpose()
    }

    /// Snapshot of every stored transaction, ordered by date then id.
    pub fn fetch_all(&self) -> StoreResult<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY date, id", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], RawRow::from_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.into_transaction()?);
        }
        debug!(count = data.len(), "fetched transactions");
        Ok(data)
    }

    pub fn get_setting(&self, key: &str) -> StoreResult<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

struct RawRow {
    id: i64,
    date: String,
    description: String,
    amount: f64,
    r#type: String,
    category: String,
}

impl RawRow {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            date: r.get(1)?,
            description: r.get(2)?,
            amount: r.get(3)?,
            r#type: r.get(4)?,
            category: r.get(5)?,
        })
    }

    fn into_transaction(self) -> StoreResult<Transaction> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            StoreError::InvalidDate {
                id: self.id,
                value: self.date.clone(),
            }
        })?;
        let r#type = self
            .r#type
            .parse::<TxType>()
            .map_err(|_| StoreError::InvalidType {
                id: self.id,
                value: self.r#type.clone(),
            })?;
        let amount = Decimal::try_from(self.amount)
            .map_err(|_| StoreError::UnrepresentableAmount(self.amount.to_string()))?
            .normalize();
        Ok(Transaction {
            id: self.id,
            date,
            description: self.description,
            amount,
            r#type,
            category: self.category,
        })
    }
}
