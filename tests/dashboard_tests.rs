// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::commands::dashboard;
use finboard::commands::reports::{forecast_report, ForecastOptions};
use finboard::db::Store;
use finboard::forecast::TrendIndex;
use finboard::models::{NewTransaction, TxType, YearMonth};
use rust_decimal::Decimal;

fn opts(horizon: i64) -> ForecastOptions {
    ForecastOptions {
        horizon,
        index: TrendIndex::Sequential,
        reference: YearMonth::new(2025, 6).unwrap(),
    }
}

fn seeded() -> Store {
    let store = Store::open_in_memory().unwrap();
    for (d, amt, kind, cat) in [
        ((2025, 1, 3), 2500, TxType::Income, "Salary"),
        ((2025, 1, 9), 900, TxType::Expense, "Rent"),
        ((2025, 2, 9), 950, TxType::Expense, "Rent"),
        ((2025, 2, 14), 80, TxType::Expense, "Dining"),
    ] {
        store
            .insert(&NewTransaction {
                date: chrono::NaiveDate::from_ymd_opt(d.0, d.1, d.2).unwrap(),
                description: cat.to_string(),
                amount: Decimal::from(amt),
                r#type: kind,
                category: cat.to_string(),
            })
            .unwrap();
    }
    store
}

#[test]
fn dashboard_renders_every_section() {
    let store = seeded();
    let out = dashboard::render(&store, &opts(3)).unwrap();
    for title in [
        "All Transactions",
        "Monthly Income vs Expenses",
        "Category-wise Spending",
        "Forecasted Expenses",
        "Savings Over Time",
    ] {
        assert!(out.contains(title), "missing section {}", title);
    }
    assert!(out.contains("2025-03*"));
    assert!(out.contains("Rent"));
}

#[test]
fn dashboard_propagates_invalid_horizon() {
    let store = seeded();
    assert!(dashboard::render(&store, &opts(0)).is_err());
}

#[test]
fn empty_store_forecasts_after_reference_month() {
    let store = Store::open_in_memory().unwrap();
    let report = forecast_report(&store.fetch_all().unwrap(), &opts(2)).unwrap();
    let months: Vec<String> = report
        .forecast
        .points
        .iter()
        .map(|p| p.month.to_string())
        .collect();
    assert_eq!(months, vec!["2025-07", "2025-08"]);
    assert!(report.history.is_empty());
}
