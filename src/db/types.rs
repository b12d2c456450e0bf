//! Shared type definitions for the database layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to create database directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Schema migration failed: {0}")]
    Migration(String),

    /// A canonical row already exists under the same key with different
    /// identity fields. Surfaced, never silently overwritten.
    #[error("{entity} '{key}' already registered with a different {field}")]
    Conflict {
        entity: &'static str,
        key: String,
        field: &'static str,
    },

    #[error("No account with code '{0}'")]
    UnknownAccount(String),

    #[error("Linking '{child}' under '{parent}' would create a cycle")]
    HierarchyCycle { child: String, parent: String },
}

/// A row from the `company` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbCompany {
    pub company_id: i64,
    pub ticker: String,
    pub name: String,
    pub description: String,
    /// Little-endian f32 blob, absent until the embedding pass runs.
    #[serde(skip_serializing)]
    pub embedding: Option<Vec<u8>>,
}

/// A row from the `account` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbAccount {
    pub account_id: i64,
    pub code: String,
    pub parent_account_id: Option<i64>,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing)]
    pub embedding: Option<Vec<u8>>,
}

/// A row from the `period` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbPeriod {
    pub period_id: i64,
    pub year: i32,
    pub quarter: i32,
}

/// A row from the `financial_fact` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbFact {
    pub fact_id: i64,
    pub company_id: i64,
    pub period_id: i64,
    pub account_id: i64,
    pub value: f64,
}

/// A resolved (company, period, account, value) tuple ready for insertion.
/// Produced by the ETL and the deriver, consumed by the bulk insert path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactRow {
    pub company_id: i64,
    pub period_id: i64,
    pub account_id: i64,
    pub value: f64,
}
