pub mod error;
pub mod eval;
pub mod io;
pub mod models;
pub mod prelabel;
pub mod reader;

pub use error::{Error, Result};
pub use eval::{
    compute_metrics, count_labels, count_labels_in_records, evaluate_documents, CorpusMetrics,
    CountConfig, EntitySet, EvalConfig, Granularity, LabelCounts, Metrics, MetricsSummary,
};
pub use io::{
    parse_entity_list, parse_entity_list_or_empty, parse_exchange_file, parse_exchange_json,
    EvaluationReport, ReportConfig,
};
pub use models::{
    AnnotationSource, EntityMention, ExchangeTask, HasLabel, Span, SpanDocument, SpanKey,
    SpanSetDocument, TaggedDocument, TaggedToken, WordIndexedDocument, WordIndexedSpan,
};
pub use prelabel::{merge_tokens, prelabel_document, tag_languages, LanguageDetector, MergeResult};
pub use reader::{
    read_span_documents, read_span_set_documents, read_word_indexed_documents, WhitespaceBoundary,
    WordBoundary,
};
