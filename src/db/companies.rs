use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};

use super::*;

impl FactStore {
    // =========================================================================
    // Companies
    // =========================================================================

    /// Insert a company or return the existing row's id.
    ///
    /// Keyed on ticker. Repeating the call with identical arguments is a
    /// no-op; a changed description is refreshed in place; a changed name is
    /// a conflict and surfaces as [`DbError::Conflict`] rather than silently
    /// overwriting the stored row.
    pub fn upsert_company(
        &self,
        ticker: &str,
        name: &str,
        description: &str,
    ) -> Result<i64, DbError> {
        if let Some(existing) = self.get_company_by_ticker(ticker)? {
            if existing.name != name {
                return Err(DbError::Conflict {
                    entity: "company",
                    key: ticker.to_string(),
                    field: "name",
                });
            }
            if existing.description != description {
                self.conn.execute(
                    "UPDATE company SET description = ?1 WHERE company_id = ?2",
                    params![description, existing.company_id],
                )?;
            }
            return Ok(existing.company_id);
        }

        self.conn.execute(
            "INSERT INTO company (ticker, name, description) VALUES (?1, ?2, ?3)",
            params![ticker, name, description],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a company by ticker.
    pub fn get_company_by_ticker(&self, ticker: &str) -> Result<Option<DbCompany>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT company_id, ticker, name, description, embedding
                 FROM company WHERE ticker = ?1",
                params![ticker],
                Self::map_company_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Get a company by id.
    pub fn get_company(&self, company_id: i64) -> Result<Option<DbCompany>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT company_id, ticker, name, description, embedding
                 FROM company WHERE company_id = ?1",
                params![company_id],
                Self::map_company_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Get all companies, ordered by ticker.
    pub fn get_all_companies(&self) -> Result<Vec<DbCompany>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT company_id, ticker, name, description, embedding
             FROM company ORDER BY ticker",
        )?;
        let rows = stmt.query_map([], Self::map_company_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Build a ticker -> company_id lookup map for ETL resolution.
    pub fn company_id_map(&self) -> Result<HashMap<String, i64>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT ticker, company_id FROM company")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<Result<HashMap<_, _>, _>>()?)
    }

    /// Store the embedding blob for a company.
    pub fn set_company_embedding(&self, company_id: i64, blob: &[u8]) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE company SET embedding = ?1 WHERE company_id = ?2",
            params![blob, company_id],
        )?;
        Ok(())
    }

    pub(crate) fn map_company_row(row: &rusqlite::Row) -> rusqlite::Result<DbCompany> {
        Ok(DbCompany {
            company_id: row.get(0)?,
            ticker: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            embedding: row.get(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_company_idempotent() {
        let store = FactStore::open_in_memory().expect("open");

        let first = store
            .upsert_company("KCHOL", "Koç Holding A.Ş.", "Conglomerate")
            .expect("insert");
        let second = store
            .upsert_company("KCHOL", "Koç Holding A.Ş.", "Conglomerate")
            .expect("repeat");
        assert_eq!(first, second);

        let all = store.get_all_companies().expect("list");
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_upsert_company_conflicting_name_errors() {
        let store = FactStore::open_in_memory().expect("open");
        store
            .upsert_company("KCHOL", "Koç Holding A.Ş.", "")
            .expect("insert");

        let err = store.upsert_company("KCHOL", "Some Other Corp", "");
        assert!(matches!(err, Err(DbError::Conflict { .. })));

        // Stored row is untouched
        let row = store
            .get_company_by_ticker("KCHOL")
            .expect("get")
            .expect("present");
        assert_eq!(row.name, "Koç Holding A.Ş.");
    }

    #[test]
    fn test_upsert_company_refreshes_description() {
        let store = FactStore::open_in_memory().expect("open");
        let id = store
            .upsert_company("SISE", "Türkiye Şişe ve Cam Fabrikaları A.Ş.", "old")
            .expect("insert");
        let same = store
            .upsert_company("SISE", "Türkiye Şişe ve Cam Fabrikaları A.Ş.", "Glass manufacturer")
            .expect("refresh");
        assert_eq!(id, same);

        let row = store
            .get_company_by_ticker("SISE")
            .expect("get")
            .expect("present");
        assert_eq!(row.description, "Glass manufacturer");
    }
}
