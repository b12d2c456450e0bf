use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::*;

/// Inclusive quarter range used to generate the `period` table exhaustively.
/// Lookups during ETL never fail on a missing period row inside the range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRange {
    pub start_year: i32,
    pub start_quarter: i32,
    pub end_year: i32,
    pub end_quarter: i32,
}

impl Default for PeriodRange {
    /// Historical coverage of the source data: 2006 Q1 through 2025 Q1.
    fn default() -> Self {
        Self {
            start_year: 2006,
            start_quarter: 1,
            end_year: 2025,
            end_quarter: 1,
        }
    }
}

impl PeriodRange {
    /// Every (year, quarter) pair in the range, in calendar order.
    pub fn quarters(&self) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for year in self.start_year..=self.end_year {
            let lo = if year == self.start_year { self.start_quarter } else { 1 };
            let hi = if year == self.end_year { self.end_quarter } else { 4 };
            for quarter in lo..=hi {
                out.push((year, quarter));
            }
        }
        out
    }

    pub fn contains(&self, year: i32, quarter: i32) -> bool {
        let point = (year, quarter);
        point >= (self.start_year, self.start_quarter)
            && point <= (self.end_year, self.end_quarter)
    }
}

impl FactStore {
    // =========================================================================
    // Periods
    // =========================================================================

    /// Populate the `period` table for every quarter in `range`.
    ///
    /// Conflict-ignoring, so the call is idempotent and safe to repeat after
    /// widening the configured range. Returns the number of rows inserted.
    pub fn fill_periods(&self, range: &PeriodRange) -> Result<usize, DbError> {
        let mut inserted = 0;
        for (year, quarter) in range.quarters() {
            inserted += self.conn.execute(
                "INSERT OR IGNORE INTO period (year, quarter) VALUES (?1, ?2)",
                params![year, quarter],
            )?;
        }
        Ok(inserted)
    }

    /// Insert a single period or return the existing row's id.
    pub fn upsert_period(&self, year: i32, quarter: i32) -> Result<i64, DbError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO period (year, quarter) VALUES (?1, ?2)",
            params![year, quarter],
        )?;
        let id = self.conn.query_row(
            "SELECT period_id FROM period WHERE year = ?1 AND quarter = ?2",
            params![year, quarter],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Look up a period row. Out-of-range lookups return None, not an error.
    pub fn get_period(&self, year: i32, quarter: i32) -> Result<Option<DbPeriod>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT period_id, year, quarter FROM period WHERE year = ?1 AND quarter = ?2",
                params![year, quarter],
                Self::map_period_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Get all periods in calendar order.
    pub fn get_all_periods(&self) -> Result<Vec<DbPeriod>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT period_id, year, quarter FROM period ORDER BY year, quarter")?;
        let rows = stmt.query_map([], Self::map_period_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Build a (year, quarter) -> period_id lookup map for ETL resolution.
    pub fn period_id_map(&self) -> Result<HashMap<(i32, i32), i64>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT year, quarter, period_id FROM period")?;
        let rows = stmt.query_map([], |row| {
            Ok(((row.get(0)?, row.get(1)?), row.get(2)?))
        })?;
        Ok(rows.collect::<Result<HashMap<_, _>, _>>()?)
    }

    fn map_period_row(row: &rusqlite::Row) -> rusqlite::Result<DbPeriod> {
        Ok(DbPeriod {
            period_id: row.get(0)?,
            year: row.get(1)?,
            quarter: row.get(2)?,
        })
    }
}
