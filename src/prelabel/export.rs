use tracing::debug;

use crate::models::{
    Annotation, ExchangeResult, ExchangeTask, ResultValue, Span, TaggedDocument, TaskData,
};

use super::merge_tokens;

/// Length of generated result ids, matching what the annotation tool emits
const RESULT_ID_LEN: usize = 10;

/// Convert spans into exchange-format result entries
pub fn to_exchange_results(spans: &[Span]) -> Vec<ExchangeResult> {
    spans
        .iter()
        .map(|span| ExchangeResult {
            id: Some(new_result_id()),
            from_name: "label".to_string(),
            to_name: "text".to_string(),
            result_type: "labels".to_string(),
            value: ResultValue {
                start: Some(span.start),
                end: Some(span.end),
                text: Some(span.text.clone()),
                labels: vec![span.label.clone()],
            },
        })
        .collect()
}

/// Build a task carrying the merged spans of `doc` as a prediction
pub fn prelabel_document(doc: &TaggedDocument, model_version: Option<&str>) -> ExchangeTask {
    let merged = merge_tokens(&doc.tokens);
    debug!(
        "Merged {} tagged tokens into {} spans ({:?})",
        doc.entity_token_count(),
        merged.spans.len(),
        merged.labels
    );

    ExchangeTask {
        id: None,
        data: Some(TaskData {
            text: Some(doc.text.clone()),
        }),
        annotations: vec![],
        predictions: vec![Annotation {
            result: Some(to_exchange_results(&merged.spans)),
            model_version: model_version.map(str::to_string),
        }],
    }
}

fn new_result_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(RESULT_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaggedToken;

    #[test]
    fn test_to_exchange_results() {
        let spans = vec![Span {
            start: 0,
            end: 12,
            label: "PER".to_string(),
            text: "Barack Obama".to_string(),
        }];

        let results = to_exchange_results(&spans);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].from_name, "label");
        assert_eq!(results[0].to_name, "text");
        assert_eq!(results[0].result_type, "labels");
        assert_eq!(results[0].value.labels, vec!["PER"]);
        assert_eq!(results[0].value.span_parts(0).unwrap(), (0, 12, "PER"));
        assert_eq!(results[0].id.as_ref().map(String::len), Some(RESULT_ID_LEN));
    }

    #[test]
    fn test_prelabel_document() {
        let doc = TaggedDocument {
            text: "Obama met Merkel".to_string(),
            tokens: vec![
                TaggedToken::new("Obama", 0, "PER"),
                TaggedToken::new("met", 6, ""),
                TaggedToken::new("Merkel", 10, "PER"),
            ],
        };

        let task = prelabel_document(&doc, Some("tagger-v1"));

        assert_eq!(task.text(0).unwrap(), "Obama met Merkel");
        let prediction = &task.predictions[0];
        assert_eq!(prediction.model_version.as_deref(), Some("tagger-v1"));
        let results = prediction.result.as_ref().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].value.text.as_deref(), Some("Merkel"));
    }

    #[test]
    fn test_serialized_shape() {
        let results = to_exchange_results(&[Span {
            start: 3,
            end: 8,
            label: "LOC".to_string(),
            text: "Paris".to_string(),
        }]);

        let value = serde_json::to_value(&results[0]).unwrap();

        assert_eq!(value["type"], "labels");
        assert_eq!(value["value"]["start"], 3);
        assert_eq!(value["value"]["labels"][0], "LOC");
    }
}
