use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::io::parse_entity_list_or_empty;
use crate::models::HasLabel;

/// Label occurrence counts across a corpus
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCounts {
    counts: HashMap<String, usize>,
    /// Labels in first-encounter order
    order: Vec<String>,
}

impl LabelCounts {
    fn from_labels<'a, I: IntoIterator<Item = &'a str>>(labels: I) -> Result<Self> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order = Vec::new();

        for label in labels {
            match counts.get_mut(label) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(label.to_string(), 1);
                    order.push(label.to_string());
                }
            }
        }

        if order.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        info!(
            "Counted {} labels over {} entities",
            order.len(),
            counts.values().sum::<usize>()
        );
        Ok(Self { counts, order })
    }

    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(label, count)` pairs from most to least frequent, ties in encounter order
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|label| (label.as_str(), self.counts[label]))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Width of the longest label, used to align the rendering
    pub fn label_width(&self) -> usize {
        self.order
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// One `[LABEL] : count` line per label, labels padded to a common width
    pub fn render(&self) -> String {
        let width = self.label_width();
        self.sorted()
            .into_iter()
            .map(|(label, count)| format!("[{:<width$}] : {}", label, count, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for LabelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

/// Count labels of the entries extracted from every document
pub fn count_labels<'a, D, E, F, I>(documents: &'a [D], extract: F) -> Result<LabelCounts>
where
    E: HasLabel + 'a,
    F: Fn(&'a D) -> I,
    I: IntoIterator<Item = &'a E>,
{
    LabelCounts::from_labels(documents.iter().flat_map(extract).map(HasLabel::label))
}

/// Count labels stored under `field` in JSON records
///
/// Each entry is an array whose last element is the label, such as
/// `["Obama", "PER"]` or `[0, 5, "PER"]`. A field holding a string is re-parsed
/// as a serialized list; unparseable strings count as no entities.
pub fn count_labels_in_records(records: &[Value], field: &str) -> Result<LabelCounts> {
    let mut labels = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let entries = match record.get(field) {
            Some(Value::Array(entries)) => entries.clone(),
            Some(Value::String(raw)) => parse_entity_list_or_empty(raw),
            Some(Value::Null) => vec![],
            Some(_) => {
                return Err(Error::malformed(index, format!("field {:?} is not a list", field)));
            }
            None => return Err(Error::malformed(index, format!("missing field {:?}", field))),
        };

        for entry in &entries {
            let label = entry_label(entry).ok_or_else(|| {
                Error::malformed(index, format!("entry without a label: {}", entry))
            })?;
            labels.push(label.to_string());
        }
    }

    LabelCounts::from_labels(labels.iter().map(String::as_str))
}

fn entry_label(entry: &Value) -> Option<&str> {
    match entry {
        Value::Array(parts) => parts.last().and_then(Value::as_str),
        Value::Object(fields) => fields.get("label").and_then(Value::as_str),
        _ => None,
    }
}
