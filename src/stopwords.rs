//! Stopword lists.
//!
//! The standard list is the common English list used by word-cloud
//! generators. A [`StopwordSet`] is the union of that list (when enabled)
//! and whatever the user picked from the suggestions.

use std::collections::HashSet;

use crate::analysis::tokenize;

pub const STANDARD_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an",
    "and", "any", "are", "aren't", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "can't", "cannot", "com",
    "could", "couldn't", "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down",
    "during", "each", "else", "ever", "few", "for", "from", "further", "get", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's",
    "hence", "her", "here", "here's", "hers", "herself", "him", "himself", "his", "how",
    "how's", "however", "http", "i", "i'd", "i'll", "i'm", "i've", "if", "in",
    "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k", "let's",
    "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our",
    "ours", "ourselves", "out", "over", "own", "r", "same", "shall", "shan't", "she",
    "she'd", "she'll", "she's", "should", "shouldn't", "since", "so", "some", "such", "than",
    "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "therefore", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// Words excluded from the cloud. Matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard list, plus the pieces the tokenizer splits its
    /// contractions into (`don't` becomes `don` and `t`). Single letters are
    /// left out so `t` and `s` stay countable unless listed on their own.
    pub fn standard() -> Self {
        let mut set = Self::from_words(STANDARD_STOPWORDS.iter().copied());
        for entry in STANDARD_STOPWORDS.iter().filter(|word| word.contains('\'')) {
            for fragment in tokenize(entry) {
                if fragment.chars().count() > 1 {
                    set.insert(&fragment);
                }
            }
        }
        set
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Standard list (if enabled) plus the user's additional picks.
    pub fn combined<S: AsRef<str>>(use_standard: bool, additional: &[S]) -> Self {
        let mut set = if use_standard { Self::standard() } else { Self::empty() };
        set.extend(additional);
        set
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
