// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use crate::db::Store;
use anyhow::{Context, Result};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").context("Missing key")?;
            println!("{} = {}", key, config::get(store, key)?);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").context("Missing key")?;
            let value = sub.get_one::<String>("value").context("Missing value")?;
            config::set(store, key, value)?;
            println!("Set {} = {}", key, config::get(store, key)?);
        }
        _ => {}
    }
    Ok(())
}
