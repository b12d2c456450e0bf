use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};

use super::*;

impl FactStore {
    // =========================================================================
    // Accounts
    // =========================================================================

    /// Insert an account or return the existing row's id.
    ///
    /// Keyed on code. Parent linkage is deliberately not part of the upsert:
    /// the chart is loaded in two phases (insert every account, then wire
    /// parents by code via [`FactStore::link_parent`]) so insertion order
    /// never matters.
    pub fn upsert_account(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<i64, DbError> {
        if let Some(existing) = self.get_account_by_code(code)? {
            if existing.name != name {
                return Err(DbError::Conflict {
                    entity: "account",
                    key: code.to_string(),
                    field: "name",
                });
            }
            if existing.description != description {
                self.conn.execute(
                    "UPDATE account SET description = ?1 WHERE account_id = ?2",
                    params![description, existing.account_id],
                )?;
            }
            return Ok(existing.account_id);
        }

        self.conn.execute(
            "INSERT INTO account (code, name, description) VALUES (?1, ?2, ?3)",
            params![code, name, description],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Wire `child_code` under `parent_code`. Both accounts must already
    /// exist. Rejects links that would make the parent graph cyclic.
    pub fn link_parent(&self, child_code: &str, parent_code: &str) -> Result<(), DbError> {
        let child = self
            .get_account_by_code(child_code)?
            .ok_or_else(|| DbError::UnknownAccount(child_code.to_string()))?;
        let parent = self
            .get_account_by_code(parent_code)?
            .ok_or_else(|| DbError::UnknownAccount(parent_code.to_string()))?;

        // Walk the prospective parent's ancestor chain; finding the child
        // there means the link would close a cycle.
        let mut stmt = self.conn.prepare(
            "WITH RECURSIVE ancestors(id) AS (
                SELECT parent_account_id FROM account WHERE account_id = ?1
                UNION ALL
                SELECT a.parent_account_id FROM account a
                JOIN ancestors anc ON a.account_id = anc.id
                WHERE a.parent_account_id IS NOT NULL
            )
            SELECT 1 FROM ancestors WHERE id = ?2 LIMIT 1",
        )?;
        let cyclic = stmt
            .query_row(params![parent.account_id, child.account_id], |_| Ok(()))
            .optional()?
            .is_some()
            || parent.account_id == child.account_id;
        if cyclic {
            return Err(DbError::HierarchyCycle {
                child: child_code.to_string(),
                parent: parent_code.to_string(),
            });
        }

        self.conn.execute(
            "UPDATE account SET parent_account_id = ?1 WHERE account_id = ?2",
            params![parent.account_id, child.account_id],
        )?;
        Ok(())
    }

    /// Get an account by code.
    pub fn get_account_by_code(&self, code: &str) -> Result<Option<DbAccount>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT account_id, code, parent_account_id, name, description, embedding
                 FROM account WHERE code = ?1",
                params![code],
                Self::map_account_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Get an account by id.
    pub fn get_account(&self, account_id: i64) -> Result<Option<DbAccount>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT account_id, code, parent_account_id, name, description, embedding
                 FROM account WHERE account_id = ?1",
                params![account_id],
                Self::map_account_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Get all accounts, ordered by code.
    pub fn get_all_accounts(&self) -> Result<Vec<DbAccount>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id, code, parent_account_id, name, description, embedding
             FROM account ORDER BY code",
        )?;
        let rows = stmt.query_map([], Self::map_account_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Get the direct children of an account, ordered by code.
    pub fn get_child_accounts(&self, parent_account_id: i64) -> Result<Vec<DbAccount>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id, code, parent_account_id, name, description, embedding
             FROM account WHERE parent_account_id = ?1 ORDER BY code",
        )?;
        let rows = stmt.query_map(params![parent_account_id], Self::map_account_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Map account_id -> code of its parent, for matches that need to report
    /// their position in the hierarchy.
    pub fn parent_code_of(&self, account_id: i64) -> Result<Option<String>, DbError> {
        let code = self
            .conn
            .query_row(
                "SELECT p.code FROM account a
                 JOIN account p ON a.parent_account_id = p.account_id
                 WHERE a.account_id = ?1",
                params![account_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(code)
    }

    /// Build a code -> account_id lookup map for ETL resolution.
    pub fn account_id_map(&self) -> Result<HashMap<String, i64>, DbError> {
        let mut stmt = self.conn.prepare("SELECT code, account_id FROM account")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<Result<HashMap<_, _>, _>>()?)
    }

    /// Store the embedding blob for an account.
    pub fn set_account_embedding(&self, account_id: i64, blob: &[u8]) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE account SET embedding = ?1 WHERE account_id = ?2",
            params![blob, account_id],
        )?;
        Ok(())
    }

    pub(crate) fn map_account_row(row: &rusqlite::Row) -> rusqlite::Result<DbAccount> {
        Ok(DbAccount {
            account_id: row.get(0)?,
            code: row.get(1)?,
            parent_account_id: row.get(2)?,
            name: row.get(3)?,
            description: row.get(4)?,
            embedding: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_pair(store: &FactStore) {
        store
            .upsert_account("TOTAL_ASSETS", "Total Assets", "")
            .unwrap();
        store
            .upsert_account("TOTAL_CURRENT_ASSETS", "Total Current Assets", "")
            .unwrap();
    }

    #[test]
    fn test_upsert_account_idempotent() {
        let store = FactStore::open_in_memory().expect("open");
        let first = store
            .upsert_account("TOTAL_ASSETS", "Total Assets", "All assets")
            .expect("insert");
        let second = store
            .upsert_account("TOTAL_ASSETS", "Total Assets", "All assets")
            .expect("repeat");
        assert_eq!(first, second);
        assert_eq!(store.get_all_accounts().unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_account_conflicting_name_errors() {
        let store = FactStore::open_in_memory().expect("open");
        store
            .upsert_account("TOTAL_ASSETS", "Total Assets", "")
            .unwrap();
        let err = store.upsert_account("TOTAL_ASSETS", "Grand Total", "");
        assert!(matches!(err, Err(DbError::Conflict { .. })));
    }

    #[test]
    fn test_link_parent_child_inserted_first() {
        let store = FactStore::open_in_memory().expect("open");
        // Child upserted before the parent exists; linking happens later.
        store
            .upsert_account("TOTAL_CURRENT_ASSETS", "Total Current Assets", "")
            .unwrap();
        store
            .upsert_account("TOTAL_ASSETS", "Total Assets", "")
            .unwrap();
        store
            .link_parent("TOTAL_CURRENT_ASSETS", "TOTAL_ASSETS")
            .expect("link");

        let parent = store
            .get_account_by_code("TOTAL_ASSETS")
            .unwrap()
            .unwrap();
        let children = store.get_child_accounts(parent.account_id).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].code, "TOTAL_CURRENT_ASSETS");
        assert_eq!(
            store
                .parent_code_of(children[0].account_id)
                .unwrap()
                .as_deref(),
            Some("TOTAL_ASSETS")
        );
    }

    #[test]
    fn test_link_parent_unknown_code() {
        let store = FactStore::open_in_memory().expect("open");
        seed_pair(&store);
        let err = store.link_parent("TOTAL_CURRENT_ASSETS", "NOPE");
        assert!(matches!(err, Err(DbError::UnknownAccount(_))));
    }

    #[test]
    fn test_link_parent_rejects_cycle() {
        let store = FactStore::open_in_memory().expect("open");
        seed_pair(&store);
        store
            .upsert_account("CASH_AND_CASH_EQUIVALENTS", "Cash and Cash Equivalents", "")
            .unwrap();

        store
            .link_parent("TOTAL_CURRENT_ASSETS", "TOTAL_ASSETS")
            .unwrap();
        store
            .link_parent("CASH_AND_CASH_EQUIVALENTS", "TOTAL_CURRENT_ASSETS")
            .unwrap();

        // Ancestor under descendant closes a cycle
        let err = store.link_parent("TOTAL_ASSETS", "CASH_AND_CASH_EQUIVALENTS");
        assert!(matches!(err, Err(DbError::HierarchyCycle { .. })));

        // Self-parenting too
        let err = store.link_parent("TOTAL_ASSETS", "TOTAL_ASSETS");
        assert!(matches!(err, Err(DbError::HierarchyCycle { .. })));
    }
}
