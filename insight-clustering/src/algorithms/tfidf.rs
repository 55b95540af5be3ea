//! TF-IDF vectors over quote text, plus distinctive key phrases for a cluster.

use std::collections::{BTreeMap, HashMap, HashSet};

/// A sparse, L2-normalized term vector. Entries are sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from raw weights, dropping zeros and normalizing to unit length.
    pub fn from_weights(weights: BTreeMap<usize, f64>) -> Self {
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm < f64::EPSILON {
            return Self::default();
        }
        Self {
            entries: weights
                .into_iter()
                .filter(|(_, w)| *w > 0.0)
                .map(|(i, w)| (i, w / norm))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Vocabulary and smoothed inverse document frequencies for one document set.
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Fit vocabulary and IDF on `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let n_docs = documents.len() as f64;
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();

        for doc in documents {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            // Sorted so term indices do not depend on hash order.
            let mut unique: Vec<String> = unique.into_iter().collect();
            unique.sort();
            for term in unique {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next);
                if idx == df.len() {
                    df.push(0);
                }
                df[idx] += 1;
            }
        }

        // Smoothed IDF: every term keeps a positive weight.
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Vectorize a document against the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, weight) in counts.iter_mut() {
            *weight *= self.idf[*idx];
        }
        SparseVector::from_weights(counts)
    }

    /// Fit on `documents` and vectorize each of them.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> Vec<SparseVector> {
        let model = Self::fit(documents);
        documents
            .iter()
            .map(|d| model.transform(d.as_ref()))
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Compute TF-IDF scores for terms across a set of documents.
/// Returns the top `limit` key phrases sorted by score descending, ties by term.
pub fn extract_key_phrases<S: AsRef<str>>(documents: &[S], limit: usize) -> Vec<(String, f64)> {
    if documents.is_empty() || limit == 0 {
        return Vec::new();
    }

    let n_docs = documents.len() as f64;
    let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in &tokenized {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    let mut tf: HashMap<&str, usize> = HashMap::new();
    let mut total_terms = 0usize;
    for token in tokenized.iter().flatten() {
        *tf.entry(token.as_str()).or_insert(0) += 1;
        total_terms += 1;
    }

    if total_terms == 0 {
        return Vec::new();
    }

    let mut scores: Vec<(String, f64)> = tf
        .iter()
        .filter_map(|(term, &count)| {
            let doc_freq = *df.get(term)? as f64;
            let term_freq = count as f64 / total_terms as f64;
            // Terms shared by more documents describe the cluster better.
            let spread = doc_freq / n_docs;
            let idf = (n_docs / doc_freq).ln() + 1.0;
            Some((term.to_string(), term_freq * idf * (0.5 + spread)))
        })
        .collect();

    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scores.truncate(limit);
    scores
}

/// Whitespace + lowercase tokenizer with stop word removal.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| w.len() > 2 && !is_stop_word(w))
        .collect()
}

fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "the"
            | "and"
            | "for"
            | "are"
            | "but"
            | "not"
            | "you"
            | "all"
            | "can"
            | "had"
            | "her"
            | "was"
            | "one"
            | "our"
            | "out"
            | "has"
            | "have"
            | "been"
            | "from"
            | "this"
            | "that"
            | "with"
            | "they"
            | "will"
            | "each"
            | "which"
            | "their"
            | "said"
            | "what"
            | "its"
            | "into"
            | "more"
            | "other"
            | "were"
            | "just"
            | "really"
            | "very"
            | "would"
            | "could"
            | "there"
            | "them"
            | "then"
            | "than"
            | "when"
            | "also"
            | "because"
            | "about"
            | "some"
            | "like"
    )
}
