// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::db::Store;
use finboard::models::{NewTransaction, TxType};
use finboard::{cli, commands::transactions};
use rust_decimal::Decimal;

fn setup() -> Store {
    let store = Store::open_in_memory().unwrap();
    for i in 1..=3 {
        store
            .insert(&NewTransaction {
                date: chrono::NaiveDate::from_ymd_opt(2025, 1, i).unwrap(),
                description: format!("P{}", i),
                amount: Decimal::from(10),
                r#type: TxType::Expense,
                category: "Cat1".into(),
            })
            .unwrap();
    }
    store
        .insert(&NewTransaction {
            date: chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            description: "Salary".into(),
            amount: Decimal::from(1000),
            r#type: TxType::Income,
            category: "Work".into(),
        })
        .unwrap();
    store
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["finboard", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => list_m.clone(),
            _ => panic!("no list subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn list_limit_respected() {
    let store = setup();
    let rows = transactions::query_rows(&store, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01");
    assert_eq!(rows[1].date, "2025-01-03");
}

#[test]
fn list_filters_by_month_and_type() {
    let store = setup();
    let rows =
        transactions::query_rows(&store, &list_matches(&["--month", "2025-01", "--type", "expense"]))
            .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.r#type == "Expense"));
    assert_eq!(rows[0].amount, "10.00");

    let rows = transactions::query_rows(&store, &list_matches(&["--category", "Work"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Salary");
}

#[test]
fn list_rejects_bad_month() {
    let store = setup();
    assert!(transactions::query_rows(&store, &list_matches(&["--month", "2025-13"])).is_err());
}

#[test]
fn add_edit_and_remove_through_handler() {
    let store = Store::open_in_memory().unwrap();
    let run = |args: &[&str]| {
        let mut argv = vec!["finboard", "tx"];
        argv.extend_from_slice(args);
        let matches = cli::build_cli().get_matches_from(argv);
        let (_, tx_m) = matches.subcommand().unwrap();
        transactions::handle(&store, tx_m)
    };

    run(&[
        "add",
        "--date",
        "2025-03-04",
        "--description",
        "Groceries",
        "--amount",
        "42.10",
        "--type",
        "Expense",
        "--category",
        "Food",
    ])
    .unwrap();
    let all = store.fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, Decimal::new(4210, 2));
    let id = all[0].id.to_string();

    run(&["edit", id.as_str()]).unwrap();
    assert_eq!(store.fetch_all().unwrap()[0].description, "Updated Entry");

    run(&["rm", id.as_str()]).unwrap();
    assert!(store.fetch_all().unwrap().is_empty());
    assert!(run(&["rm", id.as_str()]).is_err());
}

#[test]
fn add_rejects_negative_amount() {
    let store = Store::open_in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "finboard",
        "tx",
        "add",
        "--date",
        "2025-03-04",
        "--description",
        "Refund",
        "--amount=-5",
        "--type",
        "Income",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    assert!(transactions::handle(&store, tx_m).is_err());
    assert!(store.fetch_all().unwrap().is_empty());
}
