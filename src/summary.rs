// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregations behind the dashboard views.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TxType, YearMonth};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCashflow {
    pub month: YearMonth,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub spent: Decimal,
    /// Share of all expense spending, in percent.
    pub share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPoint {
    pub month: YearMonth,
    pub net: Decimal,
    pub cumulative: Decimal,
}

/// Income and expense totals for every month that has a transaction.
pub fn monthly_cashflow(transactions: &[Transaction]) -> Vec<MonthlyCashflow> {
    let mut map: BTreeMap<YearMonth, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let entry = map
            .entry(YearMonth::of(tx.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.r#type {
            TxType::Income => entry.0 += tx.amount.abs(),
            TxType::Expense => entry.1 += tx.amount.abs(),
        }
    }
    map.into_iter()
        .map(|(month, (income, expense))| MonthlyCashflow {
            month,
            income,
            expense,
        })
        .collect()
}

/// Expense totals per category, largest first. Ties sort by name.
pub fn spend_by_category(transactions: &[Transaction]) -> Vec<CategorySpend> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.r#type == TxType::Expense) {
        let cat = if tx.category.trim().is_empty() {
            "(uncategorized)"
        } else {
            tx.category.as_str()
        };
        *agg.entry(cat).or_insert(Decimal::ZERO) += tx.amount.abs();
    }
    let total: Decimal = agg.values().copied().sum();
    let mut items: Vec<CategorySpend> = agg
        .into_iter()
        .map(|(cat, spent)| CategorySpend {
            category: cat.to_string(),
            spent,
            share: if total.is_zero() {
                Decimal::ZERO
            } else {
                (spent * Decimal::ONE_HUNDRED / total).round_dp(1)
            },
        })
        .collect();
    items.sort_by(|a, b| b.spent.cmp(&a.spent).then_with(|| a.category.cmp(&b.category)));
    items
}

/// Net flow per month and its running total, from the first to the last
/// transaction month. Months without transactions carry a zero net.
pub fn savings_over_time(transactions: &[Transaction]) -> Vec<SavingsPoint> {
    let mut net: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for tx in transactions {
        *net.entry(YearMonth::of(tx.date)).or_insert(Decimal::ZERO) += tx.signed_amount();
    }
    let (Some(first), Some(last)) = (
        net.keys().next().copied(),
        net.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut running = Decimal::ZERO;
    let mut month = first;
    while month <= last {
        let n = net.get(&month).copied().unwrap_or(Decimal::ZERO);
        running += n;
        out.push(SavingsPoint {
            month,
            net: n,
            cumulative: running,
        });
        month = month.succ();
    }
    out
}
