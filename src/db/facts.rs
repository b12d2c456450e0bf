use rusqlite::{params, OptionalExtension};

use super::*;

impl FactStore {
    // =========================================================================
    // Financial facts
    // =========================================================================

    /// Insert a fact unless the (company, period, account) triple already has
    /// one. Returns whether a new row was created.
    ///
    /// Conflict handling is the table's UNIQUE constraint + OR IGNORE, so a
    /// concurrent duplicate insert resolves in SQLite rather than by a
    /// check-then-insert race in application code.
    pub fn insert_fact_if_absent(
        &self,
        company_id: i64,
        period_id: i64,
        account_id: i64,
        value: f64,
    ) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO financial_fact (company_id, period_id, account_id, value)
             VALUES (?1, ?2, ?3, ?4)",
            params![company_id, period_id, account_id, value],
        )?;
        Ok(changed > 0)
    }

    /// Bulk absent-only insert of a whole source's buffered tuples inside a
    /// single transaction. Returns the number of rows actually created;
    /// re-running over an already-loaded source returns 0.
    pub fn insert_facts_if_absent(&self, rows: &[FactRow]) -> Result<usize, DbError> {
        self.with_transaction(|store| {
            let mut inserted = 0;
            for row in rows {
                if store.insert_fact_if_absent(
                    row.company_id,
                    row.period_id,
                    row.account_id,
                    row.value,
                )? {
                    inserted += 1;
                }
            }
            Ok(inserted)
        })
    }

    /// Fetch a single fact value.
    pub fn get_fact_value(
        &self,
        company_id: i64,
        period_id: i64,
        account_id: i64,
    ) -> Result<Option<f64>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM financial_fact
                 WHERE company_id = ?1 AND period_id = ?2 AND account_id = ?3",
                params![company_id, period_id, account_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Total number of fact rows.
    pub fn fact_count(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM financial_fact", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Sum facts per (company, period) across `account_ids`, keeping only the
    /// groups where every listed account has a fact. Groups missing even one
    /// source never surface, so a caller can't build a partial sum from them.
    pub fn complete_group_sums(
        &self,
        account_ids: &[i64],
    ) -> Result<Vec<(i64, i64, f64)>, DbError> {
        if account_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; account_ids.len()].join(", ");
        let sql = format!(
            "SELECT company_id, period_id, SUM(value)
             FROM financial_fact
             WHERE account_id IN ({placeholders})
             GROUP BY company_id, period_id
             HAVING COUNT(account_id) = ?
             ORDER BY company_id, period_id"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut bindings: Vec<&dyn rusqlite::ToSql> = account_ids
            .iter()
            .map(|id| id as &dyn rusqlite::ToSql)
            .collect();
        let expected = account_ids.len() as i64;
        bindings.push(&expected);

        let rows = stmt.query_map(bindings.as_slice(), |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
