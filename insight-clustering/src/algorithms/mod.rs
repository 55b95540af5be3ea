//! Text algorithms: TF-IDF, similarity, DBSCAN, sentence splitting.

pub mod dbscan;
pub mod sentence_splitter;
pub mod similarity;
pub mod tfidf;
