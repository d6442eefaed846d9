use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Text-level language classification, supplied by the caller
pub trait LanguageDetector {
    /// Language code of `text` (e.g. "en")
    fn detect(&self, text: &str) -> std::result::Result<String, String>;
}

/// A text together with its detected language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageTagged {
    pub text: String,
    pub detected_language: String,
}

/// Tag every text with the language reported by `detector`
///
/// The first detector failure aborts the batch and names the document's index.
pub fn tag_languages<'a, I>(
    texts: I,
    detector: &dyn LanguageDetector,
) -> Result<Vec<LanguageTagged>>
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let detected_language = detector
                .detect(text)
                .map_err(|reason| Error::Detection { index, reason })?;
            debug!("Document {} detected as {}", index, detected_language);
            Ok(LanguageTagged {
                text: text.to_string(),
                detected_language,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KeywordDetector;

    impl LanguageDetector for KeywordDetector {
        fn detect(&self, text: &str) -> std::result::Result<String, String> {
            if text.is_empty() {
                Err("empty text".to_string())
            } else if text.contains(" der ") {
                Ok("de".to_string())
            } else {
                Ok("en".to_string())
            }
        }
    }

    #[test]
    fn test_tag_languages() {
        let tagged =
            tag_languages(["the cat sat", "wo ist der Bahnhof"], &KeywordDetector).unwrap();

        assert_eq!(tagged[0].detected_language, "en");
        assert_eq!(tagged[1].detected_language, "de");
        assert_eq!(tagged[1].text, "wo ist der Bahnhof");
    }

    #[test]
    fn test_detector_failure_names_index() {
        let err = tag_languages(["fine", ""], &KeywordDetector).unwrap_err();

        assert!(matches!(err, Error::Detection { index: 1, .. }));
    }
}
