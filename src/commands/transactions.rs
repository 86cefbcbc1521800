// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Store;
use crate::models::{NewTransaction, YearMonth};
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, parse_type, pretty_table,
};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("Missing --{}", name))
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let tx = NewTransaction {
        date: parse_date(required(sub, "date")?)?,
        description: required(sub, "description")?.clone(),
        amount: parse_decimal(required(sub, "amount")?)?,
        r#type: parse_type(required(sub, "type")?)?,
        category: sub
            .get_one::<String>("category")
            .cloned()
            .unwrap_or_default(),
    };
    let id = store.insert(&tx).context("Could not record transaction")?;
    println!(
        "Recorded #{}: {} {} on {} '{}'",
        id,
        tx.r#type,
        fmt_money(&tx.amount),
        tx.date,
        tx.description
    );
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing transaction id")?;
    store.delete(id)?;
    println!("Deleted transaction #{}", id);
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing transaction id")?;
    let description = required(sub, "description")?;
    store.update_description(id, description)?;
    println!("Updated #{} description to '{}'", id, description);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Type", "Category"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub r#type: String,
    pub category: String,
}

/// Transactions matching the `list` filters, newest first.
pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month: Option<YearMonth> = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| parse_type(s))
        .transpose()?;
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied();

    let mut txs = store.fetch_all()?;
    txs.retain(|t| {
        month.is_none_or(|m| YearMonth::of(t.date) == m)
            && kind.is_none_or(|k| t.r#type == k)
            && category.is_none_or(|c| &t.category == c)
    });
    txs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

    Ok(txs
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description,
            amount: fmt_money(&t.amount),
            r#type: t.r#type.to_string(),
            category: t.category,
        })
        .collect())
}
