// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::reports::{
    forecast_report, render_categories, render_forecast, render_monthly, render_savings,
    ForecastOptions,
};
use crate::db::Store;
use crate::utils::{fmt_money, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let opts = ForecastOptions::resolve(store, m)?;
    println!("{}", render(store, &opts)?);
    Ok(())
}

/// One full recompute-and-render pass over a fresh snapshot.
pub fn render(store: &Store, opts: &ForecastOptions) -> Result<String> {
    let txs = store.fetch_all()?;
    let table = pretty_table(
        &["ID", "Date", "Description", "Amount", "Type", "Category"],
        txs.iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    fmt_money(&t.amount),
                    t.r#type.to_string(),
                    t.category.clone(),
                ]
            })
            .collect(),
    );
    let forecast = forecast_report(&txs, opts)?;

    let sections = [
        ("All Transactions", table.to_string()),
        ("Monthly Income vs Expenses", render_monthly(&txs)),
        ("Category-wise Spending", render_categories(&txs)),
        ("Forecasted Expenses", render_forecast(&forecast)),
        ("Savings Over Time", render_savings(&txs)),
    ];
    Ok(sections
        .iter()
        .map(|(title, body)| format!("== {} ==\n{}", title, body))
        .collect::<Vec<_>>()
        .join("\n\n"))
}
