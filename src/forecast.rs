// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly expense forecasting.
//!
//! Expense transactions are summed per calendar month and an ordinary least
//! squares line is fitted over those totals. With fewer than two observed
//! months there is no trend to fit, so the last total (or zero) is repeated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ForecastError;
use crate::models::{ForecastPoint, MonthTotal, Transaction, TxType, YearMonth};

pub const DEFAULT_HORIZON: i64 = 3;
/// Largest accepted horizon: one hundred years of months.
pub const MAX_HORIZON: i64 = 1200;

/// How observed months are placed on the regression's x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendIndex {
    /// x = position in the series; gaps between months are ignored.
    #[default]
    Sequential,
    /// x = months elapsed since the first observed month.
    Calendar,
}

impl fmt::Display for TrendIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendIndex::Sequential => f.write_str("sequential"),
            TrendIndex::Calendar => f.write_str("calendar"),
        }
    }
}

impl FromStr for TrendIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(TrendIndex::Sequential),
            "calendar" => Ok(TrendIndex::Calendar),
            _ => Err(format!(
                "Unknown trend index '{}' (use sequential|calendar)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendFit {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
    /// `None` when the constant fallback was used.
    pub trend: Option<TrendFit>,
}

impl ForecastSeries {
    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    pub fn to_map(&self) -> BTreeMap<YearMonth, Decimal> {
        self.points.iter().map(|p| (p.month, p.predicted)).collect()
    }
}

/// Sum expense magnitudes per calendar month, ascending by month.
pub fn monthly_expense_series(transactions: &[Transaction]) -> Vec<MonthTotal> {
    let mut by_month: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.r#type == TxType::Expense) {
        *by_month
            .entry(YearMonth::of(tx.date))
            .or_insert(Decimal::ZERO) += tx.amount.abs();
    }
    by_month
        .into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}

/// Forecast with sequential indexing and no external reference month.
pub fn forecast(
    transactions: &[Transaction],
    horizon: i64,
) -> Result<ForecastSeries, ForecastError> {
    forecast_with(transactions, horizon, TrendIndex::default(), None)
}

/// Forecast `horizon` months of expenses.
///
/// Output starts the month after the last expense month. Without any
/// expense month it starts after the latest transaction of any type; with
/// no transactions at all, after `reference`, else after [`YearMonth::EPOCH`].
pub fn forecast_with(
    transactions: &[Transaction],
    horizon: i64,
    index: TrendIndex,
    reference: Option<YearMonth>,
) -> Result<ForecastSeries, ForecastError> {
    validate_horizon(horizon)?;
    let series = monthly_expense_series(transactions);

    let Some(last) = series.last() else {
        let anchor = transactions
            .iter()
            .map(|t| YearMonth::of(t.date))
            .max()
            .or(reference)
            .unwrap_or(YearMonth::EPOCH);
        debug!(horizon, %anchor, "no expense months; forecasting zero");
        return Ok(constant(anchor, Decimal::ZERO, horizon));
    };

    if series.len() < 2 {
        debug!(horizon, month = %last.month, "single expense month; repeating its total");
        return Ok(constant(last.month, last.total, horizon));
    }

    let xs = x_positions(&series, index);
    let ys: Vec<f64> = series
        .iter()
        .map(|m| m.total.to_f64().unwrap_or(0.0))
        .collect();
    let fit = least_squares(&xs, &ys);
    debug!(
        horizon,
        %index,
        slope = fit.slope,
        intercept = fit.intercept,
        months = series.len(),
        "fitted expense trend"
    );

    let last_x = xs.last().copied().unwrap_or(0.0);
    let mut month = last.month;
    let mut points = Vec::with_capacity(horizon as usize);
    for step in 1..=horizon {
        month = month.succ();
        let raw = fit.at(last_x + step as f64).max(0.0);
        points.push(ForecastPoint {
            month,
            predicted: to_money(raw),
        });
    }
    Ok(ForecastSeries {
        points,
        trend: Some(fit),
    })
}

/// Rejects horizons outside `1..=MAX_HORIZON`.
pub fn validate_horizon(horizon: i64) -> Result<(), ForecastError> {
    if horizon <= 0 {
        return Err(ForecastError::InvalidArgument(format!(
            "horizon must be a positive integer, got {}",
            horizon
        )));
    }
    if horizon > MAX_HORIZON {
        return Err(ForecastError::InvalidArgument(format!(
            "horizon must be at most {} months, got {}",
            MAX_HORIZON, horizon
        )));
    }
    Ok(())
}

fn constant(last: YearMonth, value: Decimal, horizon: i64) -> ForecastSeries {
    let mut month = last;
    let points = (0..horizon)
        .map(|_| {
            month = month.succ();
            ForecastPoint {
                month,
                predicted: value.max(Decimal::ZERO),
            }
        })
        .collect();
    ForecastSeries {
        points,
        trend: None,
    }
}

fn x_positions(series: &[MonthTotal], index: TrendIndex) -> Vec<f64> {
    match index {
        TrendIndex::Sequential => (0..series.len()).map(|i| i as f64).collect(),
        TrendIndex::Calendar => {
            let first = series[0].month;
            series
                .iter()
                .map(|m| first.months_until(&m.month) as f64)
                .collect()
        }
    }
}

/// Ordinary least squares for y = intercept + slope * x. Needs two or more
/// distinct x values; a flat line through the mean is returned otherwise.
fn least_squares(xs: &[f64], ys: &[f64]) -> TrendFit {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx == 0.0 {
        return TrendFit {
            slope: 0.0,
            intercept: mean_y,
        };
    }
    let slope = sxy / sxx;
    TrendFit {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

/// Out-of-range predictions saturate at `Decimal::MAX`.
fn to_money(v: f64) -> Decimal {
    Decimal::try_from(v)
        .map(|d| d.round_dp(2))
        .unwrap_or(if v > 0.0 { Decimal::MAX } else { Decimal::ZERO })
}
