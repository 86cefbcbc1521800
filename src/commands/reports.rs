// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::{bar_chart, paired_bar_chart, DEFAULT_WIDTH};
use crate::config::Settings;
use crate::db::Store;
use crate::forecast::{forecast_with, monthly_expense_series, ForecastSeries, TrendIndex};
use crate::models::{MonthTotal, Transaction, YearMonth};
use crate::summary::{monthly_cashflow, savings_over_time, spend_by_category};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txs = store.fetch_all()?;
    match name {
        "monthly" => {
            if !maybe_print_json(json_flag, jsonl_flag, &monthly_cashflow(&txs))? {
                println!("{}", render_monthly(&txs));
            }
        }
        "categories" => {
            if !maybe_print_json(json_flag, jsonl_flag, &spend_by_category(&txs))? {
                println!("{}", render_categories(&txs));
            }
        }
        "savings" => {
            if !maybe_print_json(json_flag, jsonl_flag, &savings_over_time(&txs))? {
                println!("{}", render_savings(&txs));
            }
        }
        "forecast" => {
            let opts = ForecastOptions::resolve(store, sub)?;
            let report = forecast_report(&txs, &opts)?;
            if !maybe_print_json(json_flag, jsonl_flag, &report)? {
                println!("{}", render_forecast(&report));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Forecast parameters after merging CLI flags over stored settings.
#[derive(Debug, Clone, Copy)]
pub struct ForecastOptions {
    pub horizon: i64,
    pub index: TrendIndex,
    pub reference: YearMonth,
}

impl ForecastOptions {
    pub fn resolve(store: &Store, sub: &clap::ArgMatches) -> Result<Self> {
        let settings = Settings::load(store)?;
        let horizon = sub
            .get_one::<i64>("horizon")
            .copied()
            .unwrap_or(settings.horizon);
        let index = if sub.get_flag("calendar-gaps") {
            TrendIndex::Calendar
        } else {
            settings.index
        };
        Ok(Self {
            horizon,
            index,
            reference: YearMonth::of(chrono::Utc::now().date_naive()),
        })
    }
}

#[derive(Serialize)]
pub struct ForecastReport {
    pub index: TrendIndex,
    pub history: Vec<MonthTotal>,
    pub forecast: ForecastSeries,
}

pub fn forecast_report(txs: &[Transaction], opts: &ForecastOptions) -> Result<ForecastReport> {
    let forecast = forecast_with(txs, opts.horizon, opts.index, Some(opts.reference))
        .context("Could not forecast expenses")?;
    Ok(ForecastReport {
        index: opts.index,
        history: monthly_expense_series(txs),
        forecast,
    })
}

pub fn render_monthly(txs: &[Transaction]) -> String {
    let data = monthly_cashflow(txs);
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.month.to_string(),
                fmt_money(&r.income),
                fmt_money(&r.expense),
                fmt_money(&(r.income - r.expense)),
            ]
        })
        .collect();
    let chart: Vec<_> = data
        .iter()
        .map(|r| (r.month.to_string(), r.income, r.expense))
        .collect();
    format!(
        "{}\n{}",
        pretty_table(&["Month", "Income", "Expense", "Net"], rows),
        paired_bar_chart(&chart, ("in ", "out"), DEFAULT_WIDTH)
    )
}

pub fn render_categories(txs: &[Transaction]) -> String {
    let data = spend_by_category(txs);
    let rows = data
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(&c.spent),
                format!("{:.1}%", c.share),
            ]
        })
        .collect();
    let chart: Vec<_> = data.iter().map(|c| (c.category.clone(), c.spent)).collect();
    format!(
        "{}\n{}",
        pretty_table(&["Category", "Spent", "Share"], rows),
        bar_chart(&chart, DEFAULT_WIDTH)
    )
}

pub fn render_savings(txs: &[Transaction]) -> String {
    let data = savings_over_time(txs);
    let rows = data
        .iter()
        .map(|p| {
            vec![
                p.month.to_string(),
                fmt_money(&p.net),
                fmt_money(&p.cumulative),
            ]
        })
        .collect();
    let chart: Vec<_> = data
        .iter()
        .map(|p| (p.month.to_string(), p.cumulative))
        .collect();
    format!(
        "{}\n{}",
        pretty_table(&["Month", "Net", "Cumulative"], rows),
        bar_chart(&chart, DEFAULT_WIDTH)
    )
}

pub fn render_forecast(report: &ForecastReport) -> String {
    let mut rows: Vec<Vec<String>> = report
        .history
        .iter()
        .map(|m| vec![m.month.to_string(), fmt_money(&m.total), "actual".into()])
        .collect();
    rows.extend(report.forecast.points.iter().map(|p| {
        vec![
            p.month.to_string(),
            fmt_money(&p.predicted),
            "forecast".into(),
        ]
    }));

    let mut chart: Vec<_> = report
        .history
        .iter()
        .map(|m| (m.month.to_string(), m.total))
        .collect();
    chart.extend(
        report
            .forecast
            .points
            .iter()
            .map(|p| (format!("{}*", p.month), p.predicted)),
    );

    let trend = match report.forecast.trend {
        Some(fit) => format!(
            "Trend ({} index): {:+.2} per month",
            report.index, fit.slope
        ),
        None => "Not enough history for a trend; repeating the last monthly total".to_string(),
    };
    format!(
        "{}\n{}\n{}",
        pretty_table(&["Month", "Expenses", "Kind"], rows),
        bar_chart(&chart, DEFAULT_WIDTH),
        trend
    )
}
