//! TF-IDF relevance ranking for article results.
//!
//! Each call fits a fresh vocabulary over the query (document 0) and the
//! candidate documents (1..=N), weights raw term counts with smoothed
//! inverse document frequency, L2-normalises every vector and scores each
//! candidate by cosine similarity with the query.
//!
//! ```text
//! idf(t)   = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)  = count(t, d) * idf(t)
//! score(d) = cos(q, d)   (0.0 when either vector is zero)
//! ```

use crate::types::ArticleResult;
use std::collections::HashMap;

/// Split text into lowercase tokens of two or more word characters.
///
/// A word character is alphanumeric or `_`; everything else separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

/// A sparse, L2-normalised TF-IDF vector keyed by vocabulary index.
type SparseVector = HashMap<usize, f64>;

/// Score each document against `query`.
///
/// Returns one cosine similarity per document, in input order, each in
/// `[0, 1]`. An empty `documents` slice yields an empty vector.
pub fn score(query: &str, documents: &[String]) -> Vec<f64> {
    if documents.is_empty() {
        return Vec::new();
    }

    let tokenized: Vec<Vec<String>> = std::iter::once(query)
        .chain(documents.iter().map(String::as_str))
        .map(tokenize)
        .collect();

    let mut vocabulary: HashMap<&str, usize> = HashMap::new();
    let mut document_frequency: Vec<usize> = Vec::new();
    for tokens in &tokenized {
        let mut seen: Vec<usize> = Vec::new();
        for token in tokens {
            let next = vocabulary.len();
            let index = *vocabulary.entry(token.as_str()).or_insert(next);
            if index == document_frequency.len() {
                document_frequency.push(0);
            }
            if !seen.contains(&index) {
                seen.push(index);
                document_frequency[index] += 1;
            }
        }
    }

    let n = tokenized.len() as f64;
    let idf: Vec<f64> = document_frequency
        .iter()
        .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let vectors: Vec<SparseVector> = tokenized
        .iter()
        .map(|tokens| tfidf_vector(tokens, &vocabulary, &idf))
        .collect();

    let (query_vector, document_vectors) = vectors.split_at(1);
    document_vectors
        .iter()
        .map(|doc| cosine(&query_vector[0], doc))
        .collect()
}

fn tfidf_vector(tokens: &[String], vocabulary: &HashMap<&str, usize>, idf: &[f64]) -> SparseVector {
    let mut vector = SparseVector::new();
    for token in tokens {
        if let Some(&index) = vocabulary.get(token.as_str()) {
            *vector.entry(index).or_insert(0.0) += idf[index];
        }
    }
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

/// Cosine similarity of two normalised sparse vectors; 0.0 if either is zero.
fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(index, w)| large.get(index).map(|v| w * v))
        .sum();
    if dot.is_finite() {
        dot.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Rank articles by relevance to `query`.
///
/// The document for each candidate is `title + " " + snippet`. The score is
/// written to [`ArticleResult::relevance`] and the output is sorted by
/// descending score; equal scores keep their input order.
pub fn rank(query: &str, candidates: Vec<ArticleResult>) -> Vec<ArticleResult> {
    if candidates.is_empty() {
        return candidates;
    }

    let documents: Vec<String> = candidates
        .iter()
        .map(|c| format!("{} {}", c.title, c.snippet))
        .collect();
    let scores = score(query, &documents);

    let mut ranked: Vec<ArticleResult> = candidates
        .into_iter()
        .zip(scores)
        .map(|(mut candidate, relevance)| {
            candidate.relevance = relevance;
            candidate
        })
        .collect();

    // `sort_by` is stable, so ties keep API order.
    ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    tracing::debug!(count = ranked.len(), "articles ranked");
    ranked
}
