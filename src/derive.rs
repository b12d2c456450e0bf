//! Derived facts: rollups the source data never reports directly.
//!
//! A derived account is the sum of a fixed set of sibling accounts. Only
//! (company, period) groups holding facts for every source account produce a
//! row; a partial sum is never inserted. The absent-only insert contract
//! makes re-runs leave existing rows untouched.

use crate::db::{DbError, FactStore};

/// Rollups applied after every load. The source sheets report short- and
/// long-term liabilities but not their total.
pub const STANDARD_ROLLUPS: &[(&str, &[&str])] = &[(
    "TOTAL_LIABILITIES",
    &["TOTAL_SHORT_TERM_LIABILITIES", "TOTAL_LONG_TERM_LIABILITIES"],
)];

/// Insert `target_code = sum(source_codes)` for every (company, period) with
/// a complete set of source facts. Returns the number of facts created.
pub fn derive_sum(
    store: &FactStore,
    target_code: &str,
    source_codes: &[&str],
) -> Result<usize, DbError> {
    let target = store
        .get_account_by_code(target_code)?
        .ok_or_else(|| DbError::UnknownAccount(target_code.to_string()))?;

    let mut source_ids = Vec::with_capacity(source_codes.len());
    for code in source_codes {
        let account = store
            .get_account_by_code(code)?
            .ok_or_else(|| DbError::UnknownAccount(code.to_string()))?;
        source_ids.push(account.account_id);
    }

    let groups = store.complete_group_sums(&source_ids)?;
    let mut inserted = 0;
    for (company_id, period_id, total) in groups {
        if store.insert_fact_if_absent(company_id, period_id, target.account_id, total)? {
            inserted += 1;
        }
    }

    log::info!(
        "derived {} {} facts from {:?}",
        inserted,
        target_code,
        source_codes
    );
    Ok(inserted)
}

/// Run every standard rollup. Returns the total number of facts created.
pub fn derive_standard_rollups(store: &FactStore) -> Result<usize, DbError> {
    let mut inserted = 0;
    for (target, sources) in STANDARD_ROLLUPS {
        inserted += derive_sum(store, target, sources)?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::PeriodRange;

    struct Fixture {
        store: FactStore,
        company: i64,
        q4: i64,
        q3: i64,
        short: i64,
        long: i64,
        total: i64,
    }

    fn fixture() -> Fixture {
        let store = FactStore::open_in_memory().expect("open");
        let company = store.upsert_company("KCHOL", "Koç Holding A.Ş.", "").unwrap();
        let short = store
            .upsert_account("TOTAL_SHORT_TERM_LIABILITIES", "Total Short-term Liabilities", "")
            .unwrap();
        let long = store
            .upsert_account("TOTAL_LONG_TERM_LIABILITIES", "Total Long-term Liabilities", "")
            .unwrap();
        let total = store
            .upsert_account("TOTAL_LIABILITIES", "Total Liabilities", "")
            .unwrap();
        store.link_parent("TOTAL_SHORT_TERM_LIABILITIES", "TOTAL_LIABILITIES").unwrap();
        store.link_parent("TOTAL_LONG_TERM_LIABILITIES", "TOTAL_LIABILITIES").unwrap();
        store
            .fill_periods(&PeriodRange {
                start_year: 2024,
                start_quarter: 1,
                end_year: 2024,
                end_quarter: 4,
            })
            .unwrap();
        let q4 = store.get_period(2024, 4).unwrap().unwrap().period_id;
        let q3 = store.get_period(2024, 3).unwrap().unwrap().period_id;
        Fixture { store, company, q4, q3, short, long, total }
    }

    #[test]
    fn test_derive_sum_complete_group() {
        let f = fixture();
        f.store.insert_fact_if_absent(f.company, f.q4, f.short, 300.0).unwrap();
        f.store.insert_fact_if_absent(f.company, f.q4, f.long, 700.0).unwrap();

        let inserted = derive_sum(
            &f.store,
            "TOTAL_LIABILITIES",
            &["TOTAL_SHORT_TERM_LIABILITIES", "TOTAL_LONG_TERM_LIABILITIES"],
        )
        .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(
            f.store.get_fact_value(f.company, f.q4, f.total).unwrap(),
            Some(1000.0)
        );
    }

    #[test]
    fn test_derive_sum_skips_partial_group() {
        let f = fixture();
        // Q3 has only the short-term fact; no partial sum may appear.
        f.store.insert_fact_if_absent(f.company, f.q3, f.short, 300.0).unwrap();

        let inserted = derive_standard_rollups(&f.store).unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(f.store.get_fact_value(f.company, f.q3, f.total).unwrap(), None);
    }

    #[test]
    fn test_derive_sum_rerun_safe() {
        let f = fixture();
        f.store.insert_fact_if_absent(f.company, f.q4, f.short, 300.0).unwrap();
        f.store.insert_fact_if_absent(f.company, f.q4, f.long, 700.0).unwrap();

        assert_eq!(derive_standard_rollups(&f.store).unwrap(), 1);
        assert_eq!(derive_standard_rollups(&f.store).unwrap(), 0);
        assert_eq!(
            f.store.get_fact_value(f.company, f.q4, f.total).unwrap(),
            Some(1000.0)
        );
    }

    #[test]
    fn test_derived_parent_matches_child_sum() {
        let f = fixture();
        f.store.insert_fact_if_absent(f.company, f.q4, f.short, 123.45).unwrap();
        f.store.insert_fact_if_absent(f.company, f.q4, f.long, 876.55).unwrap();
        derive_standard_rollups(&f.store).unwrap();

        // Hierarchy sum invariant: parent equals the sum of its children
        let parent_row = f.store.get_account_by_code("TOTAL_LIABILITIES").unwrap().unwrap();
        let children = f.store.get_child_accounts(parent_row.account_id).unwrap();
        assert_eq!(children.len(), 2);

        let parent_value = f
            .store
            .get_fact_value(f.company, f.q4, parent_row.account_id)
            .unwrap()
            .expect("derived fact");
        let child_sum: f64 = children
            .iter()
            .filter_map(|c| {
                f.store
                    .get_fact_value(f.company, f.q4, c.account_id)
                    .unwrap()
            })
            .sum();
        assert!((parent_value - child_sum).abs() < 0.01);
    }

    #[test]
    fn test_derive_sum_unknown_code_errors() {
        let f = fixture();
        let err = derive_sum(&f.store, "TOTAL_LIABILITIES", &["NOPE"]);
        assert!(matches!(err, Err(DbError::UnknownAccount(_))));
    }
}
