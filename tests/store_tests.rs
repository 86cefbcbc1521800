// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::db::Store;
use finboard::error::StoreError;
use finboard::models::{NewTransaction, TxType};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn new_tx(date: &str, amount: Decimal, kind: TxType) -> NewTransaction {
    NewTransaction {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: "Coffee".into(),
        amount,
        r#type: kind,
        category: "Dining".into(),
    }
}

#[test]
fn insert_assigns_increasing_ids_and_fetch_orders_by_date() {
    let store = Store::open_in_memory().unwrap();
    let a = store
        .insert(&new_tx("2025-02-01", Decimal::new(350, 2), TxType::Expense))
        .unwrap();
    let b = store
        .insert(&new_tx("2025-01-15", Decimal::new(1200, 0), TxType::Income))
        .unwrap();
    assert!(b > a);

    let all = store.fetch_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, b);
    assert_eq!(all[0].r#type, TxType::Income);
    assert_eq!(all[1].amount, Decimal::new(350, 2));
}

#[test]
fn update_description_and_delete() {
    let store = Store::open_in_memory().unwrap();
    let id = store
        .insert(&new_tx("2025-02-01", Decimal::from(5), TxType::Expense))
        .unwrap();
    store.update_description(id, "Espresso").unwrap();
    assert_eq!(store.get(id).unwrap().unwrap().description, "Espresso");

    store.delete(id).unwrap();
    assert!(store.get(id).unwrap().is_none());
    assert!(matches!(store.delete(id), Err(StoreError::NotFound { .. })));
    assert!(matches!(
        store.update_description(id, "x"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn negative_amounts_are_rejected() {
    let store = Store::open_in_memory().unwrap();
    let err = store
        .insert(&new_tx("2025-02-01", Decimal::from(-5), TxType::Expense))
        .unwrap_err();
    assert!(matches!(err, StoreError::NegativeAmount(_)));
    assert!(store.fetch_all().unwrap().is_empty());
}

#[test]
fn schema_constrains_type_column() {
    let store = Store::open_in_memory().unwrap();
    let res = store.connection().execute(
        "INSERT INTO transactions(date, description, amount, type, category) \
         VALUES ('2025-01-01', 'x', 1.0, 'Transfer', 'c')",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn create_table_is_idempotent_and_data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("finboard.sqlite");
    {
        let store = Store::open(&path).unwrap();
        store
            .insert(&new_tx("2025-03-03", Decimal::new(1999, 2), TxType::Expense))
            .unwrap();
        store.create_table_if_absent().unwrap();
    }
    let store = Store::open(&path).unwrap();
    let all = store.fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, Decimal::new(1999, 2));
}

#[test]
fn settings_upsert() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(store.get_setting("k").unwrap(), None);
    store.set_setting("k", "1").unwrap();
    store.set_setting("k", "2").unwrap();
    assert_eq!(store.get_setting("k").unwrap().as_deref(), Some("2"));
}
