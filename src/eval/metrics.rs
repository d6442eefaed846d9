use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, info};

/// Unique elements of an annotation collection
///
/// This is the single normalization point for comparison inputs: per-document
/// collections are flattened, missing values dropped and duplicates collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySet<T: Eq + Hash>(HashSet<T>);

impl<T: Eq + Hash> EntitySet<T> {
    /// Flatten one collection per document
    pub fn from_documents<D, I>(documents: D) -> Self
    where
        D: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        Self(documents.into_iter().flatten().collect())
    }

    /// Flatten one collection per document, dropping missing values
    pub fn from_optional_documents<D, I>(documents: D) -> Self
    where
        D: IntoIterator<Item = I>,
        I: IntoIterator<Item = Option<T>>,
    {
        Self(documents.into_iter().flatten().flatten().collect())
    }

    /// Collect a flat sequence of values
    pub fn from_flat<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self(values.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn as_set(&self) -> &HashSet<T> {
        &self.0
    }
}

/// Precision, recall and F1 of an evaluation set against ground truth
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics<T: Eq + Hash> {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Elements present in both sets
    pub true_positives: HashSet<T>,
    /// Elements only in the evaluation set
    pub false_positives: HashSet<T>,
    /// Elements only in the ground truth
    pub false_negatives: HashSet<T>,
}

/// Flat record of a comparison, for logging and storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl<T: Eq + Hash> Metrics<T> {
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            precision: self.precision,
            recall: self.recall,
            f1: self.f1,
            true_positives: self.true_positives.len(),
            false_positives: self.false_positives.len(),
            false_negatives: self.false_negatives.len(),
        }
    }
}

/// Compare two entity sets element by element
///
/// Every ratio with a zero denominator is 0, so empty inputs score 0 rather
/// than failing.
pub fn compute_metrics<T>(ground: &EntitySet<T>, eval: &EntitySet<T>) -> Metrics<T>
where
    T: Eq + Hash + Clone + std::fmt::Debug,
{
    let (ground, eval) = (ground.as_set(), eval.as_set());

    let true_positives: HashSet<T> = ground.intersection(eval).cloned().collect();
    let false_positives: HashSet<T> = eval.difference(ground).cloned().collect();
    let false_negatives: HashSet<T> = ground.difference(eval).cloned().collect();

    let precision = ratio(true_positives.len(), true_positives.len() + false_positives.len());
    let recall = ratio(true_positives.len(), true_positives.len() + false_negatives.len());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    info!(
        "Precision {:.2}, recall {:.2}, F1 {:.2} ({} false negatives, {} false positives)",
        precision,
        recall,
        f1,
        false_negatives.len(),
        false_positives.len()
    );
    debug!("False negatives: {:?}", false_negatives);
    debug!("False positives: {:?}", false_positives);

    Metrics {
        precision,
        recall,
        f1,
        true_positives,
        false_positives,
        false_negatives,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpanKey;

    fn labels(values: &[&str]) -> EntitySet<String> {
        EntitySet::from_flat(values.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_partial_overlap() {
        let metrics = compute_metrics(&labels(&["A", "B", "C"]), &labels(&["B", "C", "D"]));

        assert!((metrics.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.f1 - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.false_positives, HashSet::from(["D".to_string()]));
        assert_eq!(metrics.false_negatives, HashSet::from(["A".to_string()]));
        assert_eq!(metrics.true_positives.len(), 2);
    }

    #[test]
    fn test_both_empty_scores_zero() {
        let metrics = compute_metrics(&labels(&[]), &labels(&[]));

        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1, 0.0);
        assert!(!metrics.f1.is_nan());
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let metrics = compute_metrics(&labels(&["A"]), &labels(&["B"]));

        assert_eq!(metrics.summary().f1, 0.0);
        assert_eq!(metrics.summary().false_positives, 1);
    }

    #[test]
    fn test_identical_sets() {
        let metrics = compute_metrics(&labels(&["PER", "LOC"]), &labels(&["LOC", "PER"]));

        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 1.0);
        assert_eq!(metrics.f1, 1.0);
        assert!(metrics.false_positives.is_empty());
        assert!(metrics.false_negatives.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let ground = labels(&["A", "B", "C", "E"]);
        let eval = labels(&["B", "C", "D"]);

        let first = compute_metrics(&ground, &eval);
        let second = compute_metrics(&ground, &eval);

        assert_eq!(first.precision.to_bits(), second.precision.to_bits());
        assert_eq!(first.recall.to_bits(), second.recall.to_bits());
        assert_eq!(first.f1.to_bits(), second.f1.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_membership_is_not_frequency_weighted() {
        let ground = EntitySet::from_documents(vec![vec!["PER", "PER"], vec!["PER", "LOC"]]);
        let eval = EntitySet::from_documents(vec![vec!["PER"]]);

        let metrics = compute_metrics(&ground, &eval);

        assert_eq!(ground.len(), 2);
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 0.5);
    }

    #[test]
    fn test_optional_documents_drop_missing() {
        let set = EntitySet::from_optional_documents(vec![
            vec![Some("PER"), None],
            vec![],
            vec![None, Some("ORG")],
        ]);

        assert_eq!(set.len(), 2);
        assert!(set.contains(&"ORG"));
    }

    #[test]
    fn test_span_granularity() {
        let ground = EntitySet::from_flat([SpanKey::new(0, 5, "PER"), SpanKey::new(9, 14, "LOC")]);
        let eval = EntitySet::from_flat([SpanKey::new(0, 5, "PER"), SpanKey::new(9, 14, "ORG")]);

        let metrics = compute_metrics(&ground, &eval);

        assert_eq!(metrics.precision, 0.5);
        assert!(metrics.false_positives.contains(&SpanKey::new(9, 14, "ORG")));
        assert!(metrics.false_negatives.contains(&SpanKey::new(9, 14, "LOC")));
    }

    #[test]
    fn test_summary_serializes_flat() {
        let metrics = compute_metrics(&labels(&["A"]), &labels(&["A"]));

        let value = serde_json::to_value(metrics.summary()).unwrap();

        assert_eq!(value["f1"], 1.0);
        assert_eq!(value["true_positives"], 1);
    }
}
