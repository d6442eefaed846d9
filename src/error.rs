use thiserror::Error;

/// Result type for annotation processing.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading, converting or summarizing annotations.
#[derive(Error, Debug)]
pub enum Error {
    /// A document lacks required fields or carries an unusable entry.
    #[error("Malformed document at index {index}: {reason}")]
    MalformedInput { index: usize, reason: String },

    /// A serialized value could not be parsed back into its structured form.
    #[error("Failed to parse {input:?}: {reason}")]
    ParseFailure { input: String, reason: String },

    /// No labeled entities exist to summarize.
    #[error("Corpus contains no labeled entities")]
    EmptyCorpus,

    /// The injected language detector failed on a document.
    #[error("Language detection failed at index {index}: {reason}")]
    Detection { index: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            index,
            reason: reason.into(),
        }
    }

    pub fn parse_failure(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ParseFailure {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_index() {
        let err = Error::malformed(3, "missing data.text");
        assert_eq!(
            err.to_string(),
            "Malformed document at index 3: missing data.text"
        );
    }
}
