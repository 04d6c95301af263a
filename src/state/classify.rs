//! Maps free-text status labels to a completed signal.

use std::collections::BTreeSet;

/// Substring that marks a label as done in the deployment's locale.
pub const DEFAULT_COMPLETED_KEYWORD: &str = "완료";

/// Labels that mean done when matched exactly (case-insensitive).
pub const DEFAULT_COMPLETED_SYNONYMS: [&str; 3] = ["done", "completed", "complete"];

/// Decides whether a status label means "completed".
///
/// Labels are compared case-insensitively after trimming. A label is
/// completed if it contains one of `keywords` or equals one of `synonyms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusClassifier {
    keywords: Vec<String>,
    synonyms: BTreeSet<String>,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        StatusClassifier::new([DEFAULT_COMPLETED_KEYWORD], DEFAULT_COMPLETED_SYNONYMS)
    }
}

impl StatusClassifier {
    pub fn new<K, S>(
        keywords: impl IntoIterator<Item = K>,
        synonyms: impl IntoIterator<Item = S>,
    ) -> Self
    where
        K: AsRef<str>,
        S: AsRef<str>,
    {
        StatusClassifier {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            synonyms: synonyms
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn is_completed(&self, label: &str) -> bool {
        let normalized = label.trim().to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
            || self.synonyms.contains(&normalized)
    }

    pub fn any_completed<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        labels.iter().any(|label| self.is_completed(label.as_ref()))
    }
}

/// [`StatusClassifier::is_completed`] with the default vocabulary.
pub fn is_completed(label: &str) -> bool {
    StatusClassifier::default().is_completed(label)
}

/// [`StatusClassifier::any_completed`] with the default vocabulary.
pub fn any_completed<S: AsRef<str>>(labels: &[S]) -> bool {
    StatusClassifier::default().any_completed(labels)
}
