use crate::models::char_prefix;

/// Maps a character offset to the index of the word it falls in
pub trait WordBoundary {
    /// Number of words that precede `char_offset` in `text`
    fn word_index(&self, text: &str, char_offset: usize) -> usize;
}

/// Counts whitespace-separated words in the text before the offset.
///
/// Entities that start or end inside a word (e.g. next to punctuation) get
/// positions that disagree with a real tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceBoundary;

impl WordBoundary for WhitespaceBoundary {
    fn word_index(&self, text: &str, char_offset: usize) -> usize {
        char_prefix(text, char_offset).split_whitespace().count()
    }
}
