//! Schema migration framework.
//!
//! Numbered SQL migrations are embedded at compile time via `include_str!`.
//! Each migration runs exactly once, tracked by the `schema_version` table.

use rusqlite::Connection;

struct Migration {
    version: i32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/001_baseline.sql"),
}];

/// Create the `schema_version` table if it doesn't exist.
fn ensure_schema_version_table(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(|e| format!("Failed to create schema_version table: {}", e))
}

/// Return the highest applied migration version, or 0 if none.
fn current_version(conn: &Connection) -> Result<i32, String> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| format!("Failed to read schema version: {}", e))
}

/// Run all pending migrations.
///
/// Returns the number of migrations applied (0 if already up-to-date).
///
/// Forward-compat guard: if the database has a higher version than the highest
/// known migration, returns an error telling the user to update finfacts.
pub fn run_migrations(conn: &Connection) -> Result<usize, String> {
    ensure_schema_version_table(conn)?;

    let current = current_version(conn)?;
    let max_known = MIGRATIONS.last().map(|m| m.version).unwrap_or(0);

    if current > max_known {
        return Err(format!(
            "Database schema version ({}) is newer than this version of finfacts supports ({}). \
             Please update finfacts.",
            current, max_known
        ));
    }

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();

    if pending.is_empty() {
        return Ok(0);
    }

    for migration in &pending {
        conn.execute_batch(migration.sql)
            .map_err(|e| format!("Migration v{} failed: {}", migration.version, e))?;

        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [migration.version],
        )
        .map_err(|e| format!("Failed to record migration v{}: {}", migration.version, e))?;

        log::info!("Applied migration v{}", migration.version);
    }

    Ok(pending.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn mem_db() -> Connection {
        Connection::open_in_memory().expect("in-memory db")
    }

    #[test]
    fn test_fresh_db_applies_baseline() {
        let conn = mem_db();
        let applied = run_migrations(&conn).expect("migrations should succeed");
        assert_eq!(applied, 1, "should apply exactly 1 migration (baseline)");

        let version = current_version(&conn).expect("version query");
        assert_eq!(version, 1);

        // Verify key tables exist with the expected columns
        conn.execute(
            "INSERT INTO company (ticker, name, description) VALUES ('KCHOL', 'Koç Holding A.Ş.', '')",
            [],
        )
        .expect("company table should exist");

        conn.execute(
            "INSERT INTO account (code, name, description, parent_account_id)
             VALUES ('TOTAL_ASSETS', 'Total Assets', '', NULL)",
            [],
        )
        .expect("account table should accept a NULL parent");

        conn.execute("INSERT INTO period (year, quarter) VALUES (2024, 4)", [])
            .expect("period table should exist");

        conn.execute(
            "INSERT INTO financial_fact (company_id, period_id, account_id, value)
             VALUES (1, 1, 1, 1000.0)",
            [],
        )
        .expect("financial_fact table should exist");
    }

    #[test]
    fn test_fact_uniqueness_constraint() {
        let conn = mem_db();
        run_migrations(&conn).expect("migrations");

        conn.execute_batch(
            "INSERT INTO company (ticker, name) VALUES ('KCHOL', 'Koç Holding A.Ş.');
             INSERT INTO account (code, name) VALUES ('TOTAL_ASSETS', 'Total Assets');
             INSERT INTO period (year, quarter) VALUES (2024, 4);
             INSERT INTO financial_fact (company_id, period_id, account_id, value)
             VALUES (1, 1, 1, 1000.0);",
        )
        .expect("seed");

        let dup = conn.execute(
            "INSERT INTO financial_fact (company_id, period_id, account_id, value)
             VALUES (1, 1, 1, 2000.0)",
            [],
        );
        assert!(dup.is_err(), "duplicate (company, period, account) must be rejected");
    }

    #[test]
    fn test_quarter_check_constraint() {
        let conn = mem_db();
        run_migrations(&conn).expect("migrations");

        let bad = conn.execute("INSERT INTO period (year, quarter) VALUES (2024, 5)", []);
        assert!(bad.is_err(), "quarter must be 1-4");
    }

    #[test]
    fn test_idempotency() {
        let conn = mem_db();

        let first = run_migrations(&conn).expect("first run");
        assert_eq!(first, 1);

        let second = run_migrations(&conn).expect("second run");
        assert_eq!(second, 0, "second run should apply no migrations");

        let version = current_version(&conn).expect("version query");
        assert_eq!(version, 1);
    }

    #[test]
    fn test_forward_compat_guard() {
        let conn = mem_db();

        ensure_schema_version_table(&conn).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (999)", [])
            .unwrap();

        let result = run_migrations(&conn);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(
            err.contains("newer than this version"),
            "error should mention version mismatch: {}",
            err
        );
    }
}
