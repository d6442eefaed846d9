use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A labeled character-offset region of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Entity label (e.g. "PER")
    pub label: String,
    /// Covered text
    pub text: String,
}

impl Span {
    pub fn key(&self) -> SpanKey {
        SpanKey::new(self.start, self.end, &self.label)
    }

    pub fn mention(&self) -> EntityMention {
        EntityMention::new(&self.text, &self.label)
    }
}

/// `(start, end, label)` identity of a span, used for set comparisons
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpanKey {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl SpanKey {
    pub fn new(start: usize, end: usize, label: &str) -> Self {
        Self {
            start,
            end,
            label: label.to_string(),
        }
    }
}

/// `(entity text, label)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    pub label: String,
}

impl EntityMention {
    pub fn new(text: &str, label: &str) -> Self {
        Self {
            text: text.to_string(),
            label: label.to_string(),
        }
    }
}

/// A span located by whitespace word positions instead of character offsets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordIndexedSpan {
    pub text: String,
    pub label: String,
    pub start_word_id: usize,
    pub end_word_id: usize,
}

/// Document with its spans in original annotation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanDocument {
    pub text: String,
    pub spans: Vec<Span>,
}

impl SpanDocument {
    /// `(annotated text, label)` pairs, duplicates and order preserved
    pub fn mentions(&self) -> Vec<EntityMention> {
        self.spans.iter().map(Span::mention).collect()
    }

    pub fn keys(&self) -> Vec<SpanKey> {
        self.spans.iter().map(Span::key).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordIndexedDocument {
    pub text: String,
    pub spans: Vec<WordIndexedSpan>,
}

/// Unique `(start, end, label)` entries of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanSet {
    pub entities: HashSet<SpanKey>,
}

/// Serializes as `[text, {"entities": [...]}]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanSetDocument(pub String, pub SpanSet);

impl SpanSetDocument {
    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn entities(&self) -> &HashSet<SpanKey> {
        &self.1.entities
    }
}

/// Anything carrying an entity label component
pub trait HasLabel {
    fn label(&self) -> &str;
}

impl HasLabel for Span {
    fn label(&self) -> &str {
        &self.label
    }
}

impl HasLabel for SpanKey {
    fn label(&self) -> &str {
        &self.label
    }
}

impl HasLabel for EntityMention {
    fn label(&self) -> &str {
        &self.label
    }
}

impl HasLabel for WordIndexedSpan {
    fn label(&self) -> &str {
        &self.label
    }
}

impl HasLabel for (String, String) {
    fn label(&self) -> &str {
        &self.1
    }
}

impl HasLabel for (usize, usize, String) {
    fn label(&self) -> &str {
        &self.2
    }
}

/// Prefix of `text` covering the first `offset` characters, clamped to the text length
pub fn char_prefix(text: &str, offset: usize) -> &str {
    match text.char_indices().nth(offset) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Characters `start..end` of `text`, clamped to the text length
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let prefix = char_prefix(text, end);
    let from = char_prefix(prefix, start).len();
    &prefix[from..]
}
