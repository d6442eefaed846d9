use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single task from the annotation tool's JSON export
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExchangeTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub data: Option<TaskData>,
    /// Human annotations, only the first one is read
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Model pre-annotations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predictions: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaskData {
    #[serde(default)]
    pub text: Option<String>,
}

/// One annotation (or prediction) pass over a task
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Annotation {
    #[serde(default)]
    pub result: Option<Vec<ExchangeResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

/// A labeled region inside an annotation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_to_name")]
    pub to_name: String,
    #[serde(rename = "type", default = "default_result_type")]
    pub result_type: String,
    #[serde(default)]
    pub value: ResultValue,
}

/// Character offsets, covered text and labels of a result
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResultValue {
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Which pass of a task the reader takes its results from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AnnotationSource {
    /// Human annotations (`annotations[0]`)
    #[default]
    Annotations,
    /// Model pre-annotations (`predictions[0]`)
    Predictions,
}

impl AnnotationSource {
    /// Name of the task field this source reads
    pub fn field(&self) -> &'static str {
        match self {
            AnnotationSource::Annotations => "annotations",
            AnnotationSource::Predictions => "predictions",
        }
    }
}

fn default_from_name() -> String {
    "label".to_string()
}

fn default_to_name() -> String {
    "text".to_string()
}

fn default_result_type() -> String {
    "labels".to_string()
}

impl ExchangeTask {
    /// The document text, or MalformedInput naming `index`
    pub fn text(&self, index: usize) -> Result<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.text.as_deref())
            .ok_or_else(|| Error::malformed(index, "missing data.text"))
    }

    /// Results of the first pass from `source`, or MalformedInput naming `index`
    pub fn results(&self, index: usize, source: AnnotationSource) -> Result<&[ExchangeResult]> {
        let passes = match source {
            AnnotationSource::Annotations => &self.annotations,
            AnnotationSource::Predictions => &self.predictions,
        };
        passes
            .first()
            .and_then(|a| a.result.as_deref())
            .ok_or_else(|| Error::malformed(index, format!("missing {}[0].result", source.field())))
    }
}

impl ResultValue {
    /// Validated `(start, end, first label)` of this value
    pub fn span_parts(&self, index: usize) -> Result<(usize, usize, &str)> {
        let start = self
            .start
            .ok_or_else(|| Error::malformed(index, "result without value.start"))?;
        let end = self
            .end
            .ok_or_else(|| Error::malformed(index, "result without value.end"))?;
        let label = self
            .labels
            .first()
            .ok_or_else(|| Error::malformed(index, "result with empty value.labels"))?;

        if start >= end {
            return Err(Error::malformed(
                index,
                format!("result span {}..{} is empty or inverted", start, end),
            ));
        }

        Ok((start, end, label.as_str()))
    }
}
