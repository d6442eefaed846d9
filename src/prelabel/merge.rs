use std::collections::BTreeSet;

use crate::models::{Span, TaggedToken};

/// Result of merging token tags into spans
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeResult {
    /// Spans in token order
    pub spans: Vec<Span>,
    /// Distinct labels seen in the spans
    pub labels: BTreeSet<String>,
}

/// Collapse runs of adjacent tokens sharing a tag into spans
///
/// Runs are maximal groups of consecutive tokens with an equal tag. Runs with
/// an empty tag are dropped. Two runs with the same label separated by any other
/// token stay separate spans.
pub fn merge_tokens(tokens: &[TaggedToken]) -> MergeResult {
    let mut result = MergeResult::default();
    let mut run_start = 0usize;

    for index in 1..=tokens.len() {
        let run_ended = index == tokens.len() || tokens[index].tag != tokens[run_start].tag;
        if !run_ended {
            continue;
        }

        if let Some(span) = close_run(&tokens[run_start..index]) {
            result.labels.insert(span.label.clone());
            result.spans.push(span);
        }
        run_start = index;
    }

    result
}

/// Build the span for one run, `None` for untagged runs
fn close_run(run: &[TaggedToken]) -> Option<Span> {
    let (first, last) = (run.first()?, run.last()?);
    if !first.is_entity() {
        return None;
    }

    let text = run
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Some(Span {
        start: first.offset,
        // Last token's own length, not the joined text's
        end: last.offset + last.char_len(),
        label: first.tag.clone(),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[(&str, usize, &str)]) -> Vec<TaggedToken> {
        parts
            .iter()
            .map(|(text, offset, tag)| TaggedToken::new(text, *offset, tag))
            .collect()
    }

    #[test]
    fn test_merge_two_token_entity() {
        let result = merge_tokens(&tokens(&[("Barack", 0, "PER"), ("Obama", 7, "PER")]));

        assert_eq!(
            result.spans,
            vec![Span {
                start: 0,
                end: 12,
                label: "PER".to_string(),
                text: "Barack Obama".to_string(),
            }]
        );
        assert_eq!(result.labels.into_iter().collect::<Vec<_>>(), vec!["PER"]);
    }

    #[test]
    fn test_all_empty_tags_yield_nothing() {
        let result = merge_tokens(&tokens(&[("the", 0, ""), ("cat", 4, ""), ("sat", 8, "")]));

        assert!(result.spans.is_empty());
        assert!(result.labels.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(merge_tokens(&[]), MergeResult::default());
    }

    #[test]
    fn test_untagged_token_splits_same_label_runs() {
        let result = merge_tokens(&tokens(&[
            ("Paris", 0, "LOC"),
            ("and", 6, ""),
            ("Lyon", 10, "LOC"),
        ]));

        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.spans[0].text, "Paris");
        assert_eq!((result.spans[0].start, result.spans[0].end), (0, 5));
        assert_eq!(result.spans[1].text, "Lyon");
        assert_eq!((result.spans[1].start, result.spans[1].end), (10, 14));
        assert_eq!(result.labels.len(), 1);
    }

    #[test]
    fn test_adjacent_different_labels() {
        let result = merge_tokens(&tokens(&[
            ("Apple", 0, "ORG"),
            ("Cupertino", 6, "LOC"),
            ("office", 16, ""),
        ]));

        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.spans[0].label, "ORG");
        assert_eq!(result.spans[1].label, "LOC");
        assert_eq!(result.spans[1].end, 15);
        assert_eq!(
            result.labels.into_iter().collect::<Vec<_>>(),
            vec!["LOC", "ORG"]
        );
    }

    #[test]
    fn test_end_uses_last_token_length() {
        // "New  York" with a double space: joined text is shorter than the source region
        let result = merge_tokens(&tokens(&[("New", 0, "LOC"), ("York", 5, "LOC")]));

        assert_eq!(result.spans[0].end, 9);
        assert_eq!(result.spans[0].text, "New York");
    }

    #[test]
    fn test_multibyte_end_offset() {
        let result = merge_tokens(&tokens(&[
            ("em", 0, ""),
            ("São", 3, "LOC"),
            ("Paulo", 7, "LOC"),
        ]));

        assert_eq!(result.spans[0].start, 3);
        assert_eq!(result.spans[0].end, 12);
    }
}
