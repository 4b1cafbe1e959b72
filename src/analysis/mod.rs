//! Word frequency analysis.
//!
//! [`analyze`] turns extracted text into the unfiltered frequency table, the
//! top suggestions offered for exclusion, and the stopword-filtered token
//! stream that feeds the cloud renderer. Stopwords only ever affect the
//! filtered stream, never the table.

use tracing::debug;

use crate::stopwords::StopwordSet;

pub mod frequency;
pub mod tokenizer;

pub use frequency::{FrequencyTable, WordCount};
pub use tokenizer::tokenize;

/// How many of the most frequent words are offered as extra stopwords.
pub const SUGGESTION_LIMIT: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub tokens: Vec<String>,
    pub frequencies: FrequencyTable,
    pub suggestions: Vec<String>,
    pub filtered_tokens: Vec<String>,
}

pub fn analyze(text: &str, stopwords: &StopwordSet) -> Analysis {
    let tokens = tokenize(text);
    let frequencies = FrequencyTable::from_tokens(&tokens);

    let suggestions = frequencies.top(SUGGESTION_LIMIT)
        .iter()
        .map(|entry| entry.word.clone())
        .collect();

    let filtered_tokens: Vec<String> = tokens.iter()
        .filter(|token| !stopwords.contains(token))
        .cloned()
        .collect();

    debug!(
        "Analyzed {} tokens ({} distinct), {} left after {} stopwords",
        tokens.len(),
        frequencies.len(),
        filtered_tokens.len(),
        stopwords.len()
    );

    Analysis {
        tokens,
        frequencies,
        suggestions,
        filtered_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_document() {
        let stopwords = StopwordSet::from_words(["dog"]);
        let analysis = analyze("cat dog cat bird dog cat", &stopwords);

        assert_eq!(analysis.frequencies.get("cat"), Some(3));
        assert_eq!(analysis.frequencies.get("dog"), Some(2));
        assert_eq!(analysis.frequencies.get("bird"), Some(1));
        assert_eq!(analysis.filtered_tokens, vec!["cat", "cat", "bird", "cat"]);
        assert_eq!(analysis.suggestions, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_empty_text() {
        let analysis = analyze("", &StopwordSet::standard());
        assert!(analysis.tokens.is_empty());
        assert!(analysis.frequencies.is_empty());
        assert!(analysis.suggestions.is_empty());
        assert!(analysis.filtered_tokens.is_empty());
    }

    #[test]
    fn test_suggestions_capped_at_fifty() {
        let text: String = (0..80).map(|i| format!("word{} ", i)).collect();
        let analysis = analyze(&text, &StopwordSet::empty());
        assert_eq!(analysis.suggestions.len(), SUGGESTION_LIMIT);
        assert_eq!(analysis.suggestions[0], "word0");
    }

    #[test]
    fn test_contractions_leave_no_stems() {
        let analysis = analyze(
            "I don't think it isn't what they're doing",
            &StopwordSet::standard(),
        );
        assert_eq!(analysis.filtered_tokens, vec!["t", "think", "t"]);
        for stem in ["don", "isn", "re"] {
            assert!(!analysis.filtered_tokens.iter().any(|token| token == stem));
        }
    }

    #[test]
    fn test_standard_stopwords_only_filter_stream() {
        let analysis = analyze("The cat and the hat", &StopwordSet::standard());
        assert_eq!(analysis.filtered_tokens, vec!["cat", "hat"]);
        assert_eq!(analysis.frequencies.get("the"), Some(2));
        assert_eq!(analysis.frequencies.total(), 5);
    }
}
