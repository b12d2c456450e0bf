//! Fact loader: workbook rows into the canonical fact table.
//!
//! Per source file: translate the Turkish labels through the static
//! dictionary (untranslated rows are dropped; the dictionary is
//! authoritative), resolve (ticker, code, year/quarter) to row ids, buffer
//! every resolved tuple, and land them in one absent-only bulk insert.
//! Re-running over an already-loaded source inserts zero rows and says so.
//!
//! A malformed file is logged with its identifier and does not abort the
//! remaining files; unknown references skip that pair only.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::db::{DbError, FactRow, FactStore};

pub mod statement;
pub mod translations;

pub use statement::{parse_period_header, read_statement, Statement, BALANCE_SHEET};
pub use translations::{translate, ACCOUNT_TRANSLATIONS};

#[derive(Debug, Error)]
pub enum EtlError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Failed to read workbook {path}: {message}")]
    Workbook { path: String, message: String },

    #[error("No company registered for ticker '{0}'")]
    UnknownTicker(String),
}

/// One workbook to load: the ticker it belongs to plus its path.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub ticker: String,
    pub path: PathBuf,
}

impl SourceFile {
    /// Conventional layout: `<dir>/<TICKER>.xlsx`.
    pub fn in_dir(dir: &Path, ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            path: dir.join(format!("{}.xlsx", ticker)),
        }
    }
}

/// Outcome of loading a single statement.
#[derive(Debug, Default, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// Resolved tuples buffered for insertion.
    pub buffered: usize,
    /// Rows actually created (0 on a re-run).
    pub inserted: usize,
    /// Rows dropped because their label has no translation entry.
    pub dropped_labels: usize,
    /// Columns skipped for malformed period headers.
    pub skipped_columns: usize,
    /// Pairs skipped because a period was outside the generated range.
    pub skipped_unknown: usize,
}

/// Aggregate outcome of a multi-file load.
#[derive(Debug, Default, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub files_loaded: usize,
    pub files_failed: usize,
    pub buffered: usize,
    pub inserted: usize,
    pub dropped_labels: usize,
    pub skipped_columns: usize,
    pub skipped_unknown: usize,
}

impl LoadSummary {
    fn absorb(&mut self, file: FileSummary) {
        self.files_loaded += 1;
        self.buffered += file.buffered;
        self.inserted += file.inserted;
        self.dropped_labels += file.dropped_labels;
        self.skipped_columns += file.skipped_columns;
        self.skipped_unknown += file.skipped_unknown;
    }
}

/// Load a parsed statement for one company.
pub fn load_statement(
    store: &FactStore,
    ticker: &str,
    statement: &Statement,
) -> Result<FileSummary, EtlError> {
    let company = store
        .get_company_by_ticker(ticker)?
        .ok_or_else(|| EtlError::UnknownTicker(ticker.to_string()))?;

    let account_ids = store.account_id_map()?;
    let period_ids = store.period_id_map()?;

    let mut summary = FileSummary {
        skipped_columns: statement.periods.iter().filter(|p| p.is_none()).count(),
        ..FileSummary::default()
    };

    let mut buffer: Vec<FactRow> = Vec::new();
    for row in &statement.rows {
        let Some(code) = translations::translate(&row.label) else {
            summary.dropped_labels += 1;
            continue;
        };
        let Some(&account_id) = account_ids.get(code) else {
            log::warn!("{}: translated code '{}' has no account row, skipping", ticker, code);
            summary.skipped_unknown += row.values.iter().filter(|v| v.is_some()).count();
            continue;
        };

        for (column, value) in row.values.iter().enumerate() {
            let Some(value) = value else {
                continue; // absent cell, not zero
            };
            let Some(Some((year, quarter))) = statement.periods.get(column) else {
                continue; // malformed header, already counted per column
            };
            let Some(&period_id) = period_ids.get(&(*year, *quarter)) else {
                log::warn!(
                    "{}: no period row for {}Q{}, skipping {}",
                    ticker,
                    year,
                    quarter,
                    code
                );
                summary.skipped_unknown += 1;
                continue;
            };
            buffer.push(FactRow {
                company_id: company.company_id,
                period_id,
                account_id,
                value: *value,
            });
        }
    }

    summary.buffered = buffer.len();
    summary.inserted = store.insert_facts_if_absent(&buffer)?;

    log::info!(
        "{}: buffered {} facts, inserted {} new",
        ticker,
        summary.buffered,
        summary.inserted
    );
    Ok(summary)
}

/// Load one workbook from disk.
pub fn load_file(store: &FactStore, source: &SourceFile) -> Result<FileSummary, EtlError> {
    let statement = read_statement(&source.path)?;
    load_statement(store, &source.ticker, &statement)
}

/// Load every source, isolating per-file failures: a workbook that fails to
/// read or resolve is logged under its identifier and the loader moves on.
pub fn load_sources(store: &FactStore, sources: &[SourceFile]) -> LoadSummary {
    let mut summary = LoadSummary::default();
    for source in sources {
        match load_file(store, source) {
            Ok(file) => summary.absorb(file),
            Err(e) => {
                log::error!("failed to load {}: {}", source.path.display(), e);
                summary.files_failed += 1;
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::statement::StatementRow;
    use super::*;
    use crate::db::PeriodRange;

    fn seeded_store() -> FactStore {
        let store = FactStore::open_in_memory().expect("open");
        store
            .upsert_company("KCHOL", "Koç Holding A.Ş.", "")
            .unwrap();
        store
            .upsert_account("TOTAL_ASSETS", "Total Assets", "")
            .unwrap();
        store
            .upsert_account("TOTAL_EQUITY", "Total Equity", "")
            .unwrap();
        store.fill_periods(&PeriodRange::default()).unwrap();
        store
    }

    fn single_column_statement() -> Statement {
        Statement {
            periods: vec![Some((2024, 4))],
            rows: vec![StatementRow {
                label: "Toplam Varlıklar".to_string(),
                values: vec![Some(1000.0)],
            }],
        }
    }

    #[test]
    fn test_load_statement_inserts_translated_fact() {
        let store = seeded_store();
        let summary = load_statement(&store, "KCHOL", &single_column_statement()).unwrap();

        assert_eq!(summary.buffered, 1);
        assert_eq!(summary.inserted, 1);

        let company = store.get_company_by_ticker("KCHOL").unwrap().unwrap();
        let account = store.get_account_by_code("TOTAL_ASSETS").unwrap().unwrap();
        let period = store.get_period(2024, 4).unwrap().unwrap();
        assert_eq!(
            store
                .get_fact_value(company.company_id, period.period_id, account.account_id)
                .unwrap(),
            Some(1000.0)
        );
    }

    #[test]
    fn test_reload_is_noop() {
        let store = seeded_store();
        let statement = single_column_statement();

        let first = load_statement(&store, "KCHOL", &statement).unwrap();
        assert_eq!(first.inserted, 1);

        let second = load_statement(&store, "KCHOL", &statement).unwrap();
        assert_eq!(second.buffered, 1);
        assert_eq!(second.inserted, 0, "re-running must insert zero new facts");
        assert_eq!(store.fact_count().unwrap(), 1);
    }

    #[test]
    fn test_untranslated_labels_dropped() {
        let store = seeded_store();
        let statement = Statement {
            periods: vec![Some((2024, 4))],
            rows: vec![
                StatementRow {
                    label: "Bilinmeyen Kalem".to_string(),
                    values: vec![Some(5.0)],
                },
                StatementRow {
                    label: "Toplam Özkaynaklar".to_string(),
                    values: vec![Some(800.0)],
                },
            ],
        };

        let summary = load_statement(&store, "KCHOL", &statement).unwrap();
        assert_eq!(summary.dropped_labels, 1);
        assert_eq!(summary.inserted, 1);
    }

    #[test]
    fn test_out_of_range_period_skipped() {
        let store = seeded_store();
        let statement = Statement {
            periods: vec![Some((1999, 4)), Some((2024, 4))],
            rows: vec![StatementRow {
                label: "Toplam Varlıklar".to_string(),
                values: vec![Some(1.0), Some(2.0)],
            }],
        };

        let summary = load_statement(&store, "KCHOL", &statement).unwrap();
        assert_eq!(summary.skipped_unknown, 1);
        assert_eq!(summary.inserted, 1);
    }

    #[test]
    fn test_unknown_ticker_errors() {
        let store = seeded_store();
        let err = load_statement(&store, "NOPE", &single_column_statement());
        assert!(matches!(err, Err(EtlError::UnknownTicker(_))));
    }

    #[test]
    fn test_load_sources_isolates_missing_files() {
        let store = seeded_store();
        let dir = tempfile::tempdir().expect("tempdir");
        let sources = vec![
            SourceFile::in_dir(dir.path(), "KCHOL"),
            SourceFile::in_dir(dir.path(), "SAHOL"),
        ];

        // Neither file exists; both failures are absorbed, none panic.
        let summary = load_sources(&store, &sources);
        assert_eq!(summary.files_failed, 2);
        assert_eq!(summary.files_loaded, 0);
        assert_eq!(summary.inserted, 0);
    }

    #[test]
    fn test_absent_cells_never_become_zero() {
        let store = seeded_store();
        let statement = Statement {
            periods: vec![Some((2024, 4)), Some((2024, 3))],
            rows: vec![StatementRow {
                label: "Toplam Varlıklar".to_string(),
                values: vec![None, Some(900.0)],
            }],
        };

        let summary = load_statement(&store, "KCHOL", &statement).unwrap();
        assert_eq!(summary.buffered, 1, "absent cell must not produce a fact");

        let company = store.get_company_by_ticker("KCHOL").unwrap().unwrap();
        let account = store.get_account_by_code("TOTAL_ASSETS").unwrap().unwrap();
        let q4 = store.get_period(2024, 4).unwrap().unwrap();
        assert_eq!(
            store
                .get_fact_value(company.company_id, q4.period_id, account.account_id)
                .unwrap(),
            None,
            "no zero fact for the absent cell"
        );
    }
}
