use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the frequency table. Serialises as the `Word,Count` CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    #[serde(rename = "Word")]
    pub word: String,
    #[serde(rename = "Count")]
    pub count: usize,
}

/// Occurrence counts of every distinct token, ordered by descending count.
///
/// Ties keep the order in which the words first appeared in the token
/// stream (a stable sort over insertion order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
}

impl FrequencyTable {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<WordCount> = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            match index.get(token) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    index.insert(token, entries.len());
                    entries.push(WordCount { word: token.to_string(), count: 1 });
                }
            }
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries.iter()
            .find(|entry| entry.word == word)
            .map(|entry| entry.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    /// The `n` most frequent words.
    pub fn top(&self, n: usize) -> &[WordCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, equal to the length of the token stream.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}
