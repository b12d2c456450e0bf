//! Free-text resolution against the canonical tables.
//!
//! A query phrase is embedded and matched against the HNSW index for the
//! requested table; account matches can additionally expand to their direct
//! children so one round trip answers "give me the total and its breakdown".
//! Queries are read-only and stateless given a built index.
//!
//! Index lifecycle: entity or embedding mutations mark the resolver stale;
//! only an explicit [`Resolver::rebuild`] returns it to fresh. Stale queries
//! still answer (accuracy degrades, which is the accepted trade-off) but log
//! a warning.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use crate::db::{DbAccount, DbError, FactStore};
use crate::embeddings::{blob_to_f32_vec, entity_text, EmbedError, Embedder, f32_vec_to_blob};
use crate::index::{VectorIndex, DEFAULT_EF_SEARCH};
use crate::retry::{RetryDecision, RetryPolicy};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Embed(#[from] EmbedError),
}

/// A company match returned to callers (agent tools, CLI).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMatch {
    pub ticker: String,
    pub name: String,
    pub description: String,
    pub distance: f32,
}

/// An account match, carrying its position in the hierarchy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMatch {
    pub code: String,
    pub name: String,
    pub description: String,
    pub parent_code: Option<String>,
    pub distance: f32,
}

/// A direct child of a matched account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildAccount {
    pub code: String,
    pub name: String,
    pub description: String,
    pub parent_code: Option<String>,
}

/// An account match expanded with its direct children. Leaves carry an empty
/// list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithChildren {
    #[serde(flatten)]
    pub account: AccountMatch,
    pub children: Vec<ChildAccount>,
}

/// Outcome of an embedding pass over the canonical tables.
#[derive(Debug, Default, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedSummary {
    pub embedded: usize,
    pub skipped: usize,
}

pub struct Resolver {
    embedder: Arc<dyn Embedder>,
    ef_search: usize,
    companies: RwLock<VectorIndex>,
    accounts: RwLock<VectorIndex>,
    stale: AtomicBool,
}

impl Resolver {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            ef_search: DEFAULT_EF_SEARCH,
            companies: RwLock::new(VectorIndex::build(&[])),
            accounts: RwLock::new(VectorIndex::build(&[])),
            // Empty indexes serve nothing useful until the first rebuild.
            stale: AtomicBool::new(true),
        }
    }

    /// Override the recall/latency knob for subsequent queries.
    pub fn with_ef_search(mut self, ef_search: usize) -> Self {
        self.ef_search = ef_search;
        self
    }

    /// Record that entities or embeddings changed since the last build.
    pub fn mark_stale(&self) {
        self.stale.store(true, Ordering::Relaxed);
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Relaxed)
    }

    /// Rebuild both indexes from the stored embedding blobs.
    ///
    /// Graphs are constructed off to the side and swapped in under a short
    /// write lock, so concurrent queries never see a half-built graph. Rows
    /// without an embedding are left out (and logged) rather than failing the
    /// build.
    pub fn rebuild(&self, store: &FactStore) -> Result<(), ResolveError> {
        let mut company_entries = Vec::new();
        for company in store.get_all_companies()? {
            match company.embedding.as_deref().map(blob_to_f32_vec) {
                Some(Ok(vector)) => company_entries.push((company.company_id, vector)),
                Some(Err(e)) => {
                    log::warn!("company {} has an unreadable embedding: {}", company.ticker, e)
                }
                None => log::debug!("company {} not embedded yet, skipping", company.ticker),
            }
        }

        let mut account_entries = Vec::new();
        for account in store.get_all_accounts()? {
            match account.embedding.as_deref().map(blob_to_f32_vec) {
                Some(Ok(vector)) => account_entries.push((account.account_id, vector)),
                Some(Err(e)) => {
                    log::warn!("account {} has an unreadable embedding: {}", account.code, e)
                }
                None => log::debug!("account {} not embedded yet, skipping", account.code),
            }
        }

        let fresh_companies = VectorIndex::build(&company_entries);
        let fresh_accounts = VectorIndex::build(&account_entries);

        *self.companies.write() = fresh_companies;
        *self.accounts.write() = fresh_accounts;
        self.stale.store(false, Ordering::Relaxed);

        log::info!(
            "resolver indexes rebuilt: {} companies, {} accounts",
            company_entries.len(),
            account_entries.len()
        );
        Ok(())
    }

    fn warn_if_stale(&self) {
        if self.is_stale() {
            log::warn!("query served against a stale index; results may be outdated until rebuild");
        }
    }

    /// Top-k companies for a free-text phrase, closest first.
    pub fn resolve_company(
        &self,
        store: &FactStore,
        text: &str,
        k: usize,
    ) -> Result<Vec<CompanyMatch>, ResolveError> {
        self.warn_if_stale();
        let query = self.embedder.embed(text)?;
        let hits = self.companies.read().search(&query, k, self.ef_search);

        let mut out = Vec::with_capacity(hits.len());
        for (company_id, distance) in hits {
            let Some(company) = store.get_company(company_id)? else {
                continue;
            };
            out.push(CompanyMatch {
                ticker: company.ticker,
                name: company.name,
                description: company.description,
                distance,
            });
        }
        Ok(out)
    }

    /// Top-k accounts for a free-text phrase, closest first.
    pub fn resolve_account(
        &self,
        store: &FactStore,
        text: &str,
        k: usize,
    ) -> Result<Vec<AccountMatch>, ResolveError> {
        self.warn_if_stale();
        let query = self.embedder.embed(text)?;
        let hits = self.accounts.read().search(&query, k, self.ef_search);

        let mut out = Vec::with_capacity(hits.len());
        for (account_id, distance) in hits {
            let Some(account) = store.get_account(account_id)? else {
                continue;
            };
            out.push(self.account_match(store, account, distance)?);
        }
        Ok(out)
    }

    /// Top-k accounts, each expanded with its direct children.
    pub fn search_accounts_with_children(
        &self,
        store: &FactStore,
        text: &str,
        k: usize,
    ) -> Result<Vec<AccountWithChildren>, ResolveError> {
        self.warn_if_stale();
        let query = self.embedder.embed(text)?;
        let hits = self.accounts.read().search(&query, k, self.ef_search);

        let mut out = Vec::with_capacity(hits.len());
        for (account_id, distance) in hits {
            let Some(account) = store.get_account(account_id)? else {
                continue;
            };
            let parent_code = account.code.clone();
            let children = store
                .get_child_accounts(account.account_id)?
                .into_iter()
                .map(|child| ChildAccount {
                    code: child.code,
                    name: child.name,
                    description: child.description,
                    parent_code: Some(parent_code.clone()),
                })
                .collect();
            out.push(AccountWithChildren {
                account: self.account_match(store, account, distance)?,
                children,
            });
        }
        Ok(out)
    }

    fn account_match(
        &self,
        store: &FactStore,
        account: DbAccount,
        distance: f32,
    ) -> Result<AccountMatch, ResolveError> {
        let parent_code = store.parent_code_of(account.account_id)?;
        Ok(AccountMatch {
            code: account.code,
            name: account.name,
            description: account.description,
            parent_code,
            distance,
        })
    }
}

/// Embed every company and account row and store the vectors.
///
/// Texts are batched per table (one vector per input, input order). If a
/// batch fails it degrades to per-item embedding under the retry policy, so
/// one bad item skips that item only, never the whole pass.
pub fn embed_catalog(
    store: &FactStore,
    embedder: &dyn Embedder,
    policy: &RetryPolicy,
) -> Result<EmbedSummary, ResolveError> {
    let mut summary = EmbedSummary::default();

    let companies = store.get_all_companies()?;
    let texts: Vec<String> = companies
        .iter()
        .map(|c| entity_text(&c.ticker, &c.name, &c.description))
        .collect();
    let vectors = embed_all(embedder, policy, &texts);
    for (company, vector) in companies.iter().zip(vectors) {
        match vector {
            Some(v) => {
                store.set_company_embedding(company.company_id, &f32_vec_to_blob(&v))?;
                summary.embedded += 1;
            }
            None => {
                log::warn!("embedding unavailable for company {}, skipping", company.ticker);
                summary.skipped += 1;
            }
        }
    }

    let accounts = store.get_all_accounts()?;
    let texts: Vec<String> = accounts
        .iter()
        .map(|a| entity_text(&a.code, &a.name, &a.description))
        .collect();
    let vectors = embed_all(embedder, policy, &texts);
    for (account, vector) in accounts.iter().zip(vectors) {
        match vector {
            Some(v) => {
                store.set_account_embedding(account.account_id, &f32_vec_to_blob(&v))?;
                summary.embedded += 1;
            }
            None => {
                log::warn!("embedding unavailable for account {}, skipping", account.code);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// One optional vector per input text, in input order.
fn embed_all(
    embedder: &dyn Embedder,
    policy: &RetryPolicy,
    texts: &[String],
) -> Vec<Option<Vec<f32>>> {
    if texts.is_empty() {
        return Vec::new();
    }

    match embedder.embed_batch(texts) {
        Ok(vectors) => vectors.into_iter().map(Some).collect(),
        Err(batch_err) => {
            log::warn!(
                "batch embedding failed ({}), falling back to per-item retries",
                batch_err
            );
            texts
                .iter()
                .map(|text| {
                    policy
                        .run_sync(|| embedder.embed(text), |_| RetryDecision::Retryable)
                        .ok()
                })
                .collect()
        }
    }
}
