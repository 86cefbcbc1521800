// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};

use crate::db::Store;
use crate::forecast::{validate_horizon, TrendIndex, DEFAULT_HORIZON};

pub const HORIZON_KEY: &str = "forecast.horizon";
pub const INDEX_KEY: &str = "forecast.index";
pub const KEYS: &[&str] = &[HORIZON_KEY, INDEX_KEY];

/// User settings persisted in the `settings` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub horizon: i64,
    pub index: TrendIndex,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            index: TrendIndex::default(),
        }
    }
}

impl Settings {
    pub fn load(store: &Store) -> Result<Self> {
        let mut s = Settings::default();
        if let Some(v) = store.get_setting(HORIZON_KEY)? {
            s.horizon = parse_horizon(&v)
                .with_context(|| format!("Stored setting {} is invalid", HORIZON_KEY))?;
        }
        if let Some(v) = store.get_setting(INDEX_KEY)? {
            s.index = v
                .parse::<TrendIndex>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Stored setting {} is invalid", INDEX_KEY))?;
        }
        Ok(s)
    }
}

fn parse_horizon(v: &str) -> Result<i64> {
    let h: i64 = v
        .trim()
        .parse()
        .with_context(|| format!("Invalid horizon '{}'", v))?;
    validate_horizon(h)?;
    Ok(h)
}

/// Current value of `key`, falling back to its default.
pub fn get(store: &Store, key: &str) -> Result<String> {
    let s = Settings::load(store)?;
    match key {
        HORIZON_KEY => Ok(s.horizon.to_string()),
        INDEX_KEY => Ok(s.index.to_string()),
        _ => bail!("Unknown setting '{}' (known: {})", key, KEYS.join(", ")),
    }
}

/// Validate and persist `value` under `key`.
pub fn set(store: &Store, key: &str, value: &str) -> Result<()> {
    let normalized = match key {
        HORIZON_KEY => parse_horizon(value)?.to_string(),
        INDEX_KEY => value
            .parse::<TrendIndex>()
            .map_err(anyhow::Error::msg)?
            .to_string(),
        _ => bail!("Unknown setting '{}' (known: {})", key, KEYS.join(", ")),
    };
    store.set_setting(key, &normalized)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_stored() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(Settings::load(&store).unwrap(), Settings::default());
        assert_eq!(get(&store, HORIZON_KEY).unwrap(), "3");
        assert_eq!(get(&store, INDEX_KEY).unwrap(), "sequential");
    }

    #[test]
    fn set_then_load() {
        let store = Store::open_in_memory().unwrap();
        set(&store, HORIZON_KEY, "6").unwrap();
        set(&store, INDEX_KEY, "Calendar").unwrap();
        let s = Settings::load(&store).unwrap();
        assert_eq!(s.horizon, 6);
        assert_eq!(s.index, TrendIndex::Calendar);
        assert_eq!(get(&store, INDEX_KEY).unwrap(), "calendar");
    }

    #[test]
    fn rejects_bad_values_and_keys() {
        let store = Store::open_in_memory().unwrap();
        assert!(set(&store, HORIZON_KEY, "0").is_err());
        assert!(set(&store, HORIZON_KEY, "soon").is_err());
        assert!(set(&store, HORIZON_KEY, "9223372036854775807").is_err());
        assert!(set(&store, HORIZON_KEY, "1200").is_ok());
        assert!(set(&store, INDEX_KEY, "weekly").is_err());
        assert!(set(&store, "theme", "dark").is_err());
        assert!(get(&store, "theme").is_err());
    }
}
