//! Approximate nearest-neighbour index over entity embeddings.
//!
//! One immutable HNSW graph per searchable table (company, account), built
//! from the stored embedding blobs and queried with cosine distance. A
//! rebuild constructs a fresh graph off to the side and the caller swaps it
//! in atomically, so queries never observe a half-built graph. Recall is
//! approximate; `ef_search` trades recall for latency.

use hnsw_rs::prelude::{DistCosine, Hnsw};

// HNSW construction parameters (conservative defaults):
// - `M`: max connections per layer
// - `EF_CONSTRUCTION`: construction search width
const M: usize = 16;
const EF_CONSTRUCTION: usize = 200;

/// Default search width. The original service ran pgvector HNSW with
/// ef_search = 200; the same effort keeps recall high on catalogs this size.
pub const DEFAULT_EF_SEARCH: usize = 200;

pub struct VectorIndex {
    /// Row ids aligned with the graph's positional ids.
    ids: Vec<i64>,
    hnsw: Option<Hnsw<'static, f32, DistCosine>>,
}

impl VectorIndex {
    /// Build a fresh graph over `(row_id, embedding)` pairs. Insertion order
    /// is preserved as the positional id, which also breaks distance ties.
    pub fn build(entries: &[(i64, Vec<f32>)]) -> Self {
        if entries.is_empty() {
            return Self {
                ids: Vec::new(),
                hnsw: None,
            };
        }

        let nb_elem = entries.len();
        let max_layer = 16.min((nb_elem as f32).ln().trunc() as usize).max(1);
        let hnsw = Hnsw::<f32, DistCosine>::new(M, nb_elem, max_layer, EF_CONSTRUCTION, DistCosine {});

        let mut ids = Vec::with_capacity(nb_elem);
        for (position, (row_id, vector)) in entries.iter().enumerate() {
            hnsw.insert((&vector[..], position));
            ids.push(*row_id);
        }

        Self {
            ids,
            hnsw: Some(hnsw),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Return up to `k` row ids with their cosine distance, closest first,
    /// ties broken by insertion order.
    pub fn search(&self, query: &[f32], k: usize, ef_search: usize) -> Vec<(i64, f32)> {
        let Some(hnsw) = self.hnsw.as_ref() else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let mut neighbours = hnsw.search(query, k.min(self.ids.len()), ef_search);
        neighbours.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.d_id.cmp(&b.d_id))
        });

        neighbours
            .into_iter()
            .filter_map(|n| self.ids.get(n.d_id).map(|row_id| (*row_id, n.distance)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{Embedder, HashEmbedder};

    fn build_from_texts(texts: &[(i64, &str)]) -> VectorIndex {
        let embedder = HashEmbedder;
        let entries: Vec<(i64, Vec<f32>)> = texts
            .iter()
            .map(|(id, text)| (*id, embedder.embed(text).unwrap()))
            .collect();
        VectorIndex::build(&entries)
    }

    #[test]
    fn test_empty_index_returns_nothing() {
        let index = VectorIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.search(&[0.0; 384], 5, DEFAULT_EF_SEARCH).is_empty());
    }

    #[test]
    fn test_exact_text_ranks_first() {
        let index = build_from_texts(&[
            (1, "Total Assets all assets owned by the company"),
            (2, "Cash and Cash Equivalents liquid holdings"),
            (3, "Retained Earnings cumulative net profit"),
        ]);

        let query = HashEmbedder
            .embed("Total Assets all assets owned by the company")
            .unwrap();
        let results = index.search(&query, 2, DEFAULT_EF_SEARCH);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 1);
        assert!(results[0].1 < 1e-4, "identical text should be ~zero distance");
        assert!(results[0].1 <= results[1].1, "ascending by distance");
    }

    #[test]
    fn test_k_larger_than_index() {
        let index = build_from_texts(&[(7, "Total Equity"), (8, "Total Liabilities")]);
        let query = HashEmbedder.embed("Total Equity").unwrap();
        let results = index.search(&query, 10, DEFAULT_EF_SEARCH);
        assert_eq!(results.len(), 2);
    }
}
