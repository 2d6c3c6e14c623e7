// Fixed-dimension dish embeddings
//
// Semantic vectors over the food vocabulary. The 300-dimension contract is
// hard: a vector of any other length is treated as absent, never truncated
// or padded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Embedding dimension required of every vector in the system.
pub const EMBEDDING_DIM: usize = 300;

/// Embedding errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// Provided vector length does not match [`EMBEDDING_DIM`].
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension received
        got: usize,
    },
}

/// A fixed-length semantic vector.
///
/// Present-or-absent is always expressed as `Option<Embedding>`; there is no
/// zero-vector sentinel for "missing". Construction rejects any vector whose
/// length is not exactly [`EMBEDDING_DIM`], so a misbehaving provider
/// degrades to "absent" at the boundary instead of corrupting scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Wrap a raw vector, returning `None` on a dimension mismatch.
    pub fn from_vec(values: Vec<f32>) -> Option<Self> {
        if values.len() == EMBEDDING_DIM {
            Some(Self(values))
        } else {
            None
        }
    }

    /// Borrow the raw components.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Unit-length copy, or `None` when the norm is zero.
    pub fn normalized(&self) -> Option<Self> {
        let norm = self.norm();
        if norm == 0.0 {
            return None;
        }
        Some(Self(self.0.iter().map(|x| x / norm).collect()))
    }

    /// Dot product with another embedding.
    pub fn dot(&self, other: &Embedding) -> f32 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }
}

impl TryFrom<Vec<f32>> for Embedding {
    type Error = Error;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        let got = values.len();
        Embedding::from_vec(values).ok_or(Error::DimensionMismatch {
            expected: EMBEDDING_DIM,
            got,
        })
    }
}

impl From<Embedding> for Vec<f32> {
    fn from(embedding: Embedding) -> Self {
        embedding.0
    }
}

/// Calculate cosine similarity between two vectors
///
/// Cosine similarity = (A · B) / (||A|| * ||B||)
/// Returns a value between -1.0 and 1.0, where 1.0 is identical.
/// Returns 0.0 when either vector is zero-length or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for i in 0..a.len() {
        dot_product += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let norm_a = norm_a.sqrt();
    let norm_b = norm_b.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Contract consumed from the external food-vector provider.
///
/// Implementations supply single-token lookups; phrase resolution and
/// ingredient averaging are shared algorithms and live here as provided
/// methods so every provider resolves names identically.
pub trait FoodVectorModel {
    /// Whether the (lowercased) word is in the provider vocabulary.
    fn has_word(&self, word: &str) -> bool;

    /// Vector for a single vocabulary token, `None` when absent.
    fn token_vector(&self, token: &str) -> Option<Embedding>;

    /// Vector for a word or multi-word phrase.
    ///
    /// Case-insensitive. The full phrase is tried first; an unrecognized
    /// multi-word phrase falls back to the mean of its recognized
    /// constituent tokens.
    fn get_vector(&self, word: &str) -> Option<Embedding> {
        let w = word.trim().to_lowercase();
        if self.has_word(&w) {
            return self.token_vector(&w);
        }
        let tokens: Vec<&str> = w.split_whitespace().collect();
        if tokens.len() > 1 {
            let vectors: Vec<Embedding> = tokens
                .iter()
                .filter(|t| self.has_word(t))
                .filter_map(|t| self.token_vector(t))
                .collect();
            if !vectors.is_empty() {
                return mean_embedding(&vectors);
            }
        }
        None
    }

    /// Mean vector of all recognized ingredients, `None` when none resolve.
    fn embed_ingredients(&self, ingredients: &[String]) -> Option<Embedding> {
        let vectors: Vec<Embedding> = ingredients
            .iter()
            .filter_map(|ing| self.get_vector(ing))
            .collect();
        if vectors.is_empty() {
            return None;
        }
        mean_embedding(&vectors)
    }
}

/// Component-wise mean of a non-empty set of embeddings.
fn mean_embedding(vectors: &[Embedding]) -> Option<Embedding> {
    if vectors.is_empty() {
        return None;
    }
    let mut acc = vec![0.0f32; EMBEDDING_DIM];
    for v in vectors {
        for (slot, x) in acc.iter_mut().zip(v.as_slice()) {
            *slot += x;
        }
    }
    let count = vectors.len() as f32;
    for slot in acc.iter_mut() {
        *slot /= count;
    }
    Embedding::from_vec(acc)
}

/// In-memory vocabulary-backed vector model.
///
/// Used by tests and offline evaluation; the production provider wraps the
/// external food2vec estimator behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct StaticVocabModel {
    vectors: HashMap<String, Embedding>,
}

impl StaticVocabModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vocabulary entry. The key is lowercased; a wrong-length
    /// vector is rejected and the entry is skipped.
    pub fn insert(&mut self, word: &str, values: Vec<f32>) -> bool {
        match Embedding::from_vec(values) {
            Some(embedding) => {
                self.vectors.insert(word.trim().to_lowercase(), embedding);
                true
            }
            None => false,
        }
    }

    /// Number of vocabulary entries.
    pub fn vocab_size(&self) -> usize {
        self.vectors.len()
    }
}

impl FoodVectorModel for StaticVocabModel {
    fn has_word(&self, word: &str) -> bool {
        self.vectors.contains_key(&word.trim().to_lowercase())
    }

    fn token_vector(&self, token: &str) -> Option<Embedding> {
        self.vectors.get(&token.trim().to_lowercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basis(index: usize) -> Vec<f32> {
        let mut v = vec![0.0; EMBEDDING_DIM];
        v[index] = 1.0;
        v
    }

    #[test]
    fn test_embedding_rejects_wrong_dimension() {
        assert!(Embedding::from_vec(vec![0.1, 0.2]).is_none());
        assert!(Embedding::from_vec(vec![0.0; EMBEDDING_DIM + 1]).is_none());
        assert!(Embedding::from_vec(vec![0.0; EMBEDDING_DIM]).is_some());
    }

    #[test]
    fn test_embedding_serde_enforces_dimension() {
        let short = serde_json::to_string(&vec![0.1f32, 0.2]).unwrap();
        assert!(serde_json::from_str::<Embedding>(&short).is_err());

        let ok = serde_json::to_string(&basis(0)).unwrap();
        let embedding: Embedding = serde_json::from_str(&ok).unwrap();
        assert_eq!(embedding.as_slice()[0], 1.0);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = basis(0);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        assert_eq!(cosine_similarity(&basis(0), &basis(1)), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let zero = vec![0.0; EMBEDDING_DIM];
        assert_eq!(cosine_similarity(&zero, &basis(0)), 0.0);
        assert_eq!(cosine_similarity(&basis(0), &zero), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_range() {
        let a = basis(0);
        let mut b = basis(0);
        b[0] = -2.5;
        let sim = cosine_similarity(&a, &b);
        assert!((-1.0..=1.0).contains(&sim));
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_unit_length() {
        let mut v = vec![0.0; EMBEDDING_DIM];
        v[0] = 3.0;
        v[1] = 4.0;
        let embedding = Embedding::from_vec(v).unwrap();
        let unit = embedding.normalized().unwrap();
        assert!((unit.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalized_zero_vector() {
        let zero = Embedding::from_vec(vec![0.0; EMBEDDING_DIM]).unwrap();
        assert!(zero.normalized().is_none());
    }

    #[test]
    fn test_get_vector_case_insensitive() {
        let mut model = StaticVocabModel::new();
        assert!(model.insert("Tofu", basis(3)));
        let v = model.get_vector("TOFU").unwrap();
        assert_eq!(v.as_slice()[3], 1.0);
    }

    #[test]
    fn test_get_vector_phrase_averages_tokens() {
        let mut model = StaticVocabModel::new();
        model.insert("soy", basis(0));
        model.insert("sauce", basis(1));

        // "soy sauce" is not itself in the vocabulary; its tokens are.
        let v = model.get_vector("soy sauce").unwrap();
        assert!((v.as_slice()[0] - 0.5).abs() < f32::EPSILON);
        assert!((v.as_slice()[1] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_get_vector_prefers_full_phrase() {
        let mut model = StaticVocabModel::new();
        model.insert("soy", basis(0));
        model.insert("sauce", basis(1));
        model.insert("soy sauce", basis(2));

        let v = model.get_vector("soy sauce").unwrap();
        assert_eq!(v.as_slice()[2], 1.0);
    }

    #[test]
    fn test_get_vector_unknown() {
        let model = StaticVocabModel::new();
        assert!(model.get_vector("durian").is_none());
    }

    #[test]
    fn test_embed_ingredients_mean() {
        let mut model = StaticVocabModel::new();
        model.insert("chicken", basis(0));
        model.insert("rice", basis(1));

        let ingredients = vec![
            "chicken".to_string(),
            "rice".to_string(),
            "unobtainium".to_string(),
        ];
        let v = model.embed_ingredients(&ingredients).unwrap();
        assert!((v.as_slice()[0] - 0.5).abs() < f32::EPSILON);
        assert!((v.as_slice()[1] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_embed_ingredients_none_resolved() {
        let model = StaticVocabModel::new();
        assert!(model.embed_ingredients(&["kale".to_string()]).is_none());
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let mut model = StaticVocabModel::new();
        assert!(!model.insert("bad", vec![1.0, 2.0]));
        assert!(!model.has_word("bad"));
    }
}
