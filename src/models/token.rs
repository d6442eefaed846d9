use serde::{Deserialize, Serialize};

/// A token produced by an external tagger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Token text as it appears in the source
    pub text: String,
    /// Character offset of the token in the source text
    pub offset: usize,
    /// Entity type, empty when the token belongs to no entity
    #[serde(default)]
    pub tag: String,
}

impl TaggedToken {
    pub fn new(text: &str, offset: usize, tag: &str) -> Self {
        Self {
            text: text.to_string(),
            offset,
            tag: tag.to_string(),
        }
    }

    /// Whether this token belongs to an entity
    pub fn is_entity(&self) -> bool {
        !self.tag.is_empty()
    }

    /// Length of the token text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A raw document together with the tagger's output for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedDocument {
    pub text: String,
    pub tokens: Vec<TaggedToken>,
}

impl TaggedDocument {
    pub fn entity_token_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_entity()).count()
    }
}
