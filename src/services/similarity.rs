use tracing::{debug, warn};

use crate::models::{KnowledgeEntry, SimilarityResult};

/// Cosine similarity accumulated in f64.
///
/// Returns `None` when the lengths differ, a vector is empty, or either
/// vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x64 = f64::from(x);
        let y64 = f64::from(y);
        dot += x64 * y64;
        norm_a += x64 * x64;
        norm_b += y64 * y64;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return None;
    }
    Some((dot / denom).clamp(-1.0, 1.0) as f32)
}

/// Linear scan for the entry most similar to `query`.
///
/// Entries with a different dimension are skipped. On ties the first entry
/// wins. With no comparable entry the result is `(None, -1.0)`.
pub fn find_best_match(query: &[f32], entries: &[KnowledgeEntry]) -> SimilarityResult {
    let mut best = SimilarityResult::default();

    for entry in entries {
        if entry.embedding.len() != query.len() {
            warn!(
                question = %entry.question,
                expected = query.len(),
                found = entry.embedding.len(),
                "Skipping knowledge entry with mismatched embedding dimension"
            );
            continue;
        }

        let Some(score) = cosine_similarity(query, &entry.embedding) else {
            debug!(question = %entry.question, "Skipping zero-magnitude embedding");
            continue;
        };

        if score > best.score {
            best = SimilarityResult {
                answer: Some(entry.answer.clone()),
                question: Some(entry.question.clone()),
                score,
            };
        }
    }

    best
}

/// A stored answer is reused only when its similarity strictly exceeds the threshold.
pub fn is_cache_hit(score: f32, threshold: f32) -> bool {
    score > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(question: &str, embedding: Vec<f32>) -> KnowledgeEntry {
        KnowledgeEntry::new(question.to_string(), format!("answer for {question}"), embedding)
    }

    #[test]
    fn test_cosine_identical_and_orthogonal() {
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_rejects_mismatch_and_zero() {
        assert!(cosine_similarity(&[1.0], &[1.0, 0.0]).is_none());
        assert!(cosine_similarity(&[], &[]).is_none());
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_none());
    }

    #[test]
    fn test_best_match_picks_highest() {
        let entries = vec![
            entry("far", vec![0.0, 1.0]),
            entry("near", vec![1.0, 0.1]),
        ];

        let result = find_best_match(&[1.0, 0.0], &entries);
        assert_eq!(result.question.as_deref(), Some("near"));
        assert_eq!(result.answer.as_deref(), Some("answer for near"));
        assert!(result.score > 0.99);
    }

    #[test]
    fn test_ties_keep_first() {
        let entries = vec![
            entry("first", vec![1.0, 0.0]),
            entry("second", vec![2.0, 0.0]),
        ];

        let result = find_best_match(&[1.0, 0.0], &entries);
        assert_eq!(result.question.as_deref(), Some("first"));
    }

    #[test]
    fn test_dimension_mismatch_is_skipped() {
        let entries = vec![
            entry("wrong", vec![1.0, 0.0, 0.0]),
            entry("corrupt", Vec::new()),
            entry("right", vec![0.6, 0.8]),
        ];

        let result = find_best_match(&[0.6, 0.8], &entries);
        assert_eq!(result.question.as_deref(), Some("right"));
    }

    #[test]
    fn test_no_comparable_entry() {
        let result = find_best_match(&[1.0, 0.0], &[entry("wrong", vec![1.0])]);
        assert_eq!(result, SimilarityResult::default());

        let result = find_best_match(&[1.0, 0.0], &[]);
        assert!(result.answer.is_none());
        assert_eq!(result.score, -1.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(is_cache_hit(0.80, 0.75));
        assert!(!is_cache_hit(0.75, 0.75));
        assert!(!is_cache_hit(0.5, 0.75));
    }
}
