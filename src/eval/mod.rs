pub mod labels;
pub mod metrics;

pub use labels::*;
pub use metrics::*;

use serde::Serialize;

use crate::models::{EntityMention, SpanDocument, SpanKey};

/// Which value of an annotation is compared between two corpora
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Granularity {
    /// `(start, end, label)` triples
    #[default]
    Span,
    /// Label strings only
    Label,
    /// `(text, label)` pairs
    Mention,
}

/// Configuration for corpus evaluation
#[derive(Debug, Clone, Default)]
pub struct EvalConfig {
    pub granularity: Granularity,
    /// Include the difference sets in reports, not only their sizes
    pub show_differences: bool,
}

/// Configuration for label counting over JSON records
#[derive(Debug, Clone)]
pub struct CountConfig {
    /// Record field holding the entity list
    pub field: String,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            field: "entities".to_string(),
        }
    }
}

/// Metrics at the granularity chosen by [`EvalConfig`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CorpusMetrics {
    Span(Metrics<SpanKey>),
    Label(Metrics<String>),
    Mention(Metrics<EntityMention>),
}

impl CorpusMetrics {
    pub fn summary(&self) -> MetricsSummary {
        match self {
            CorpusMetrics::Span(m) => m.summary(),
            CorpusMetrics::Label(m) => m.summary(),
            CorpusMetrics::Mention(m) => m.summary(),
        }
    }

    /// Sorted, printable false negatives and false positives
    pub fn differences(&self) -> (Vec<String>, Vec<String>) {
        match self {
            CorpusMetrics::Span(m) => {
                let show = |k: &SpanKey| format!("{}..{} {}", k.start, k.end, k.label);
                (
                    sorted_display(&m.false_negatives, show),
                    sorted_display(&m.false_positives, show),
                )
            }
            CorpusMetrics::Label(m) => (
                sorted_display(&m.false_negatives, String::clone),
                sorted_display(&m.false_positives, String::clone),
            ),
            CorpusMetrics::Mention(m) => (
                sorted_display(&m.false_negatives, |k| format!("{} ({})", k.text, k.label)),
                sorted_display(&m.false_positives, |k| format!("{} ({})", k.text, k.label)),
            ),
        }
    }
}

/// Compare two corpora read from the exchange format
pub fn evaluate_documents(
    ground: &[SpanDocument],
    eval: &[SpanDocument],
    config: &EvalConfig,
) -> CorpusMetrics {
    match config.granularity {
        Granularity::Span => CorpusMetrics::Span(compute_metrics(
            &EntitySet::from_documents(ground.iter().map(SpanDocument::keys)),
            &EntitySet::from_documents(eval.iter().map(SpanDocument::keys)),
        )),
        Granularity::Label => {
            let labels = |d: &SpanDocument| {
                d.spans
                    .iter()
                    .map(|s| s.label.clone())
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
            };
            CorpusMetrics::Label(compute_metrics(
                &EntitySet::from_documents(ground.iter().map(labels)),
                &EntitySet::from_documents(eval.iter().map(labels)),
            ))
        }
        Granularity::Mention => CorpusMetrics::Mention(compute_metrics(
            &EntitySet::from_documents(ground.iter().map(SpanDocument::mentions)),
            &EntitySet::from_documents(eval.iter().map(SpanDocument::mentions)),
        )),
    }
}

fn sorted_display<T, F>(set: &std::collections::HashSet<T>, show: F) -> Vec<String>
where
    F: Fn(&T) -> String,
{
    let mut shown: Vec<String> = set.iter().map(show).collect();
    shown.sort();
    shown
}
