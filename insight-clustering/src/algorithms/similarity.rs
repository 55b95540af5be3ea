//! Cosine similarity over sparse term vectors, and a corpus-independent text
//! similarity used for dedup.

use std::collections::BTreeMap;

use super::tfidf::{tokenize, SparseVector};

/// Cosine similarity of two L2-normalized sparse vectors.
/// Returns 0.0 when either vector is empty.
pub fn sparse_cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (a, b) = (a.entries(), b.entries());
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (mut i, mut j) = (0usize, 0usize);
    let mut dot = 0.0f64;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot.clamp(0.0, 1.0)
}

/// Symmetric pairwise similarity matrix with 1.0 on the diagonal.
pub fn similarity_matrix(vectors: &[SparseVector]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let s = sparse_cosine(&vectors[i], &vectors[j]);
            matrix[i][j] = s;
            matrix[j][i] = s;
        }
    }
    matrix
}

/// Mean of the off-diagonal entries among `members`. 1.0 for fewer than two members.
pub fn mean_pairwise(matrix: &[Vec<f64>], members: &[usize]) -> f64 {
    if members.len() < 2 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for (pos, &i) in members.iter().enumerate() {
        for &j in &members[pos + 1..] {
            sum += matrix[i][j];
            pairs += 1;
        }
    }
    sum / pairs as f64
}

/// Term-frequency cosine between two texts.
///
/// Unlike TF-IDF it does not depend on the surrounding document set, so the
/// same pair always scores the same. Identical texts score 1.0.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let va = term_frequencies(a);
    let vb = term_frequencies(b);
    if va.is_empty() || vb.is_empty() {
        return if a.trim().eq_ignore_ascii_case(b.trim()) && !a.trim().is_empty() {
            1.0
        } else {
            0.0
        };
    }
    let dot: f64 = va
        .iter()
        .filter_map(|(term, x)| vb.get(term).map(|y| x * y))
        .sum();
    let norm_a = va.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = vb.values().map(|y| y * y).sum::<f64>().sqrt();
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn term_frequencies(text: &str) -> BTreeMap<String, f64> {
    let mut tf = BTreeMap::new();
    for token in tokenize(text) {
        *tf.entry(token).or_insert(0.0) += 1.0;
    }
    tf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::tfidf::TfIdfModel;

    #[test]
    fn identical_texts_have_similarity_one() {
        let s = text_similarity("Onboarding took months", "onboarding took months");
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_texts_have_similarity_zero() {
        assert_eq!(text_similarity("pricing expensive", "support responsive"), 0.0);
    }

    #[test]
    fn empty_vectors_return_zero() {
        assert_eq!(sparse_cosine(&SparseVector::default(), &SparseVector::default()), 0.0);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let vectors = TfIdfModel::fit_transform(&[
            "integration with salesforce broke",
            "salesforce integration is brittle",
            "great customer support team",
        ]);
        let m = similarity_matrix(&vectors);
        for i in 0..3 {
            assert_eq!(m[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(m[i][j], m[j][i]);
            }
        }
        assert!(m[0][1] > m[0][2]);
    }

    #[test]
    fn mean_pairwise_of_singleton_is_one() {
        assert_eq!(mean_pairwise(&[vec![1.0]], &[0]), 1.0);
    }
}
