// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ForecastError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transaction {id} not found")]
    NotFound { id: i64 },

    #[error("Amount must be a non-negative magnitude, got {0}")]
    NegativeAmount(rust_decimal::Decimal),

    #[error("Amount {0} cannot be stored")]
    UnrepresentableAmount(String),

    #[error("Row {id} has unknown type '{value}'")]
    InvalidType { id: i64, value: String },

    #[error("Row {id} has invalid date '{value}'")]
    InvalidDate { id: i64, value: String },

    #[error("Could not determine platform-specific data dir")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
