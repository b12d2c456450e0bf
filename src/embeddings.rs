//! Embedding providers for entity text.
//!
//! Canonical rows are embedded as `"{key} | {name} | {description}"` and the
//! vectors stored as little-endian f32 blobs next to the row. Two providers
//! implement the same trait: fastembed's all-MiniLM-L6-v2 for real semantic
//! search, and a deterministic token-hash embedder that keeps the crate fully
//! local and testable when the ONNX model is unavailable.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use parking_lot::Mutex;
use thiserror::Error;

pub const EMBEDDING_DIMENSION: usize = 384;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("Embedding model initialization failed: {0}")]
    ModelInit(String),

    #[error("Embedding backend error: {0}")]
    Backend(String),

    #[error("Embedding backend returned {got} vectors for {want} inputs")]
    CountMismatch { want: usize, got: usize },

    #[error("Invalid embedding blob length")]
    BadBlob,
}

/// A text-to-vector provider. Treated as having non-trivial latency and a
/// non-zero failure rate; retries are the caller's responsibility.
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Batch variant. Returns exactly one vector per input, in input order,
    /// so callers can reassemble results by position rather than completion
    /// order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// The text a canonical row is embedded under (key = ticker or account code).
pub fn entity_text(key: &str, name: &str, description: &str) -> String {
    format!("{} | {} | {}", key, name, description)
}

// ---------------------------------------------------------------------------
// fastembed provider
// ---------------------------------------------------------------------------

/// all-MiniLM-L6-v2 via fastembed. The model (~90MB) downloads on first use
/// into the given cache directory.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    pub fn new(cache_dir: &Path) -> Result<Self, EmbedError> {
        let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_cache_dir(cache_dir.to_path_buf())
            .with_show_download_progress(false);
        let model = TextEmbedding::try_new(options).map_err(|e| EmbedError::ModelInit(e.to_string()))?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for FastEmbedder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.embed_batch(std::slice::from_ref(&text.to_string()))?;
        vectors.pop().ok_or(EmbedError::CountMismatch { want: 1, got: 0 })
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = self
            .model
            .lock()
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbedError::Backend(e.to_string()))?;
        if vectors.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                want: texts.len(),
                got: vectors.len(),
            });
        }
        Ok(vectors)
    }
}

// ---------------------------------------------------------------------------
// Deterministic token-hash provider
// ---------------------------------------------------------------------------

/// Hash-based bag-of-words vectors. Deterministic and dependency-free, so the
/// resolver stays exercisable offline and in tests. Same dimensionality as
/// the real model so index code paths are identical.
#[derive(Debug, Default)]
pub struct HashEmbedder;

impl Embedder for HashEmbedder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        Ok(hash_embed(text, EMBEDDING_DIMENSION))
    }
}

fn hash_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut vec = vec![0.0_f32; dimension];
    let mut seen = 0usize;

    for token in text.split_whitespace() {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        let hash = hasher.finish();
        let idx = (hash as usize) % dimension;
        let sign = if (hash & 1) == 0 { 1.0 } else { -1.0 };
        vec[idx] += sign;
        seen += 1;
    }

    if seen == 0 {
        return vec;
    }

    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vec {
            *value /= norm;
        }
    }

    vec
}

// ---------------------------------------------------------------------------
// Vector helpers
// ---------------------------------------------------------------------------

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (va, vb) in a.iter().zip(b.iter()) {
        dot += va * vb;
        norm_a += va * va;
        norm_b += vb * vb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

pub fn f32_vec_to_blob(values: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 4);
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

pub fn blob_to_f32_vec(blob: &[u8]) -> Result<Vec<f32>, EmbedError> {
    if blob.len() % 4 != 0 {
        return Err(EmbedError::BadBlob);
    }

    let mut values = Vec::with_capacity(blob.len() / 4);
    for chunk in blob.chunks_exact(4) {
        values.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_blob_roundtrip() {
        let original = vec![0.1_f32, -0.5_f32, 1.25_f32, 0.0_f32];
        let blob = f32_vec_to_blob(&original);
        let restored = blob_to_f32_vec(&blob).expect("valid blob");
        assert_eq!(original.len(), restored.len());
        for (a, b) in original.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_bad_blob_length_rejected() {
        assert!(matches!(blob_to_f32_vec(&[1, 2, 3]), Err(EmbedError::BadBlob)));
    }

    #[test]
    fn test_hash_embed_deterministic_and_normalized() {
        let embedder = HashEmbedder;
        let a = embedder.embed("Total Assets").unwrap();
        let b = embedder.embed("Total Assets").unwrap();
        assert_eq!(a, b);

        let norm = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cosine_similarity_ranking() {
        let embedder = HashEmbedder;
        let assets = embedder.embed("total assets of the company").unwrap();
        let close = embedder.embed("total assets").unwrap();
        let far = embedder.embed("deferred tax liabilities").unwrap();
        assert!(cosine_similarity(&assets, &close) > cosine_similarity(&assets, &far));
    }

    #[test]
    fn test_embed_batch_preserves_order() {
        let embedder = HashEmbedder;
        let texts = vec![
            "Total Assets".to_string(),
            "Retained Earnings".to_string(),
            "Total Assets".to_string(),
        ];
        let vectors = embedder.embed_batch(&texts).unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0], vectors[2]);
        assert_ne!(vectors[0], vectors[1]);
    }

    #[test]
    fn test_entity_text_composition() {
        assert_eq!(
            entity_text("TOTAL_ASSETS", "Total Assets", "All assets."),
            "TOTAL_ASSETS | Total Assets | All assets."
        );
    }
}
