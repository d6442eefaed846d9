pub mod boundary;

pub use boundary::*;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{
    char_slice, AnnotationSource, ExchangeResult, ExchangeTask, Span, SpanDocument, SpanKey,
    SpanSet, SpanSetDocument, WordIndexedDocument, WordIndexedSpan,
};

/// Read every task into text + spans, keeping result order and duplicates
pub fn read_span_documents(
    tasks: &[ExchangeTask],
    source: AnnotationSource,
) -> Result<Vec<SpanDocument>> {
    let documents = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let text = task.text(index)?;
            let spans = task
                .results(index, source)?
                .iter()
                .map(|result| to_span(result, text, index))
                .collect::<Result<Vec<_>>>()?;
            debug!("Document {}: {} spans", index, spans.len());
            Ok(SpanDocument {
                text: text.to_string(),
                spans,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Read {} documents with {} spans from {}",
        documents.len(),
        documents.iter().map(|d| d.spans.len()).sum::<usize>(),
        source.field()
    );
    Ok(documents)
}

/// Read every task into text + word-indexed spans
///
/// `start_word_id` is the number of words before the start offset and
/// `end_word_id` is the number of words before the end offset minus one.
///
/// Word positions are not checked against each other. An entity that starts
/// inside a whitespace word (e.g. right after an opening parenthesis) can get
/// `end_word_id < start_word_id`. When no word precedes the end offset the
/// subtraction saturates at 0 instead of going negative.
pub fn read_word_indexed_documents(
    tasks: &[ExchangeTask],
    source: AnnotationSource,
    boundary: &dyn WordBoundary,
) -> Result<Vec<WordIndexedDocument>> {
    read_span_documents(tasks, source).map(|documents| {
        documents
            .into_iter()
            .map(|doc| {
                let spans = doc
                    .spans
                    .iter()
                    .map(|span| {
                        let words_before_end = boundary.word_index(&doc.text, span.end);
                        WordIndexedSpan {
                            text: span.text.clone(),
                            label: span.label.clone(),
                            start_word_id: boundary.word_index(&doc.text, span.start),
                            end_word_id: words_before_end.saturating_sub(1),
                        }
                    })
                    .collect();
                WordIndexedDocument {
                    text: doc.text,
                    spans,
                }
            })
            .collect()
    })
}

/// Read every task into text + the unique set of `(start, end, label)` entries
pub fn read_span_set_documents(
    tasks: &[ExchangeTask],
    source: AnnotationSource,
) -> Result<Vec<SpanSetDocument>> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let text = task.text(index)?;
            let mut set = SpanSet::default();
            for result in task.results(index, source)? {
                let (start, end, label) = result.value.span_parts(index)?;
                set.entities.insert(SpanKey::new(start, end, label));
            }
            Ok(SpanSetDocument(text.to_string(), set))
        })
        .collect()
}

fn to_span(result: &ExchangeResult, text: &str, index: usize) -> Result<Span> {
    let (start, end, label) = result.value.span_parts(index)?;
    let covered = match &result.value.text {
        Some(annotated) => annotated.clone(),
        None => char_slice(text, start, end).to_string(),
    };

    Ok(Span {
        start,
        end,
        label: label.to_string(),
        text: covered,
    })
}
